use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::pricing::{DateRange, Extra, PriceBreakdown, PricingBasis};
use crate::pagination::Pagination;

/// Lifecycle states of a booking.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// The stay is reserved and blocks its dates.
    #[default]
    Confirmed,
    /// The stay was called off and no longer blocks its dates.
    Cancelled,
}

impl From<&str> for BookingStatus {
    fn from(value: &str) -> Self {
        match value {
            "cancelled" => Self::Cancelled,
            _ => Self::Confirmed,
        }
    }
}

impl From<BookingStatus> for &'static str {
    fn from(value: BookingStatus) -> Self {
        match value {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

/// Extra selected for a booking, frozen at the price charged.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct BookingExtra {
    pub name: String,
    pub basis: PricingBasis,
    /// Unit price at booking time.
    pub price_cents: i64,
    /// What the extra contributed to the booking total.
    pub amount_cents: i64,
}

impl BookingExtra {
    /// Snapshot `extra` for a stay of `nights` nights and `guest_count` guests.
    pub fn from_extra(extra: &Extra, nights: u32, guest_count: u32) -> Self {
        Self {
            name: extra.name.clone(),
            basis: extra.basis,
            price_cents: extra.price_cents,
            amount_cents: extra.amount_cents(nights, guest_count),
        }
    }
}

/// Domain representation of a stay booked by a renter.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Booking {
    /// Unique identifier of the booking.
    pub id: i32,
    /// Booked property.
    pub property_id: i32,
    /// Identity of the renter as issued by the auth provider.
    pub renter_id: String,
    pub check_in_date: NaiveDate,
    /// Exclusive; the property is free again on this day.
    pub check_out_date: NaiveDate,
    pub guest_count: i32,
    pub status: BookingStatus,
    /// Price charged when the booking was made.
    pub price: PriceBreakdown,
    pub extras: Vec<BookingExtra>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Booking {
    pub fn range(&self) -> DateRange {
        DateRange::new(self.check_in_date, self.check_out_date)
    }

    pub fn is_active(&self) -> bool {
        self.status != BookingStatus::Cancelled
    }
}

/// Payload required to insert a new booking.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub property_id: i32,
    pub renter_id: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub guest_count: i32,
    pub status: BookingStatus,
    pub price: PriceBreakdown,
    pub extras: Vec<BookingExtra>,
    pub updated_at: NaiveDateTime,
}

impl NewBooking {
    /// Build a confirmed booking for `range` with the current timestamp.
    pub fn new(
        property_id: i32,
        renter_id: impl Into<String>,
        range: DateRange,
        guest_count: i32,
        price: PriceBreakdown,
    ) -> Self {
        let now = chrono::Local::now().naive_utc();
        Self {
            property_id,
            renter_id: renter_id.into(),
            check_in_date: range.check_in,
            check_out_date: range.check_out,
            guest_count,
            status: BookingStatus::default(),
            price,
            extras: Vec::new(),
            updated_at: now,
        }
    }

    /// Attach the extras snapshot to the payload.
    pub fn with_extras(mut self, extras: Vec<BookingExtra>) -> Self {
        self.extras = extras;
        self
    }

    pub fn range(&self) -> DateRange {
        DateRange::new(self.check_in_date, self.check_out_date)
    }
}

/// Query definition used to list bookings.
#[derive(Debug, Clone, Default)]
pub struct BookingListQuery {
    /// Optional property filter.
    pub property_id: Option<i32>,
    /// Optional renter filter.
    pub renter_id: Option<String>,
    /// Skip cancelled bookings.
    pub active_only: bool,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl BookingListQuery {
    /// Construct a query over every booking.
    pub fn new() -> Self {
        Self::default()
    }

    /// Only bookings for `property_id`.
    pub fn property(mut self, property_id: i32) -> Self {
        self.property_id = Some(property_id);
        self
    }

    /// Only bookings made by `renter_id`.
    pub fn renter(mut self, renter_id: impl Into<String>) -> Self {
        self.renter_id = Some(renter_id.into());
        self
    }

    /// Skip cancelled bookings.
    pub fn active(mut self) -> Self {
        self.active_only = true;
        self
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
