use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::booking::{
    Booking as DomainBooking, BookingExtra as DomainBookingExtra, BookingStatus,
    NewBooking as DomainNewBooking,
};
use crate::domain::pricing::{PriceBreakdown, PricingBasis};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::bookings)]
pub struct Booking {
    pub id: i32,
    pub property_id: i32,
    pub renter_id: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub guest_count: i32,
    pub status: String,
    pub nights: i32,
    pub weekday_nights: i32,
    pub weekend_nights: i32,
    pub base_price_cents: i64,
    pub discount_cents: i64,
    pub extras_total_cents: i64,
    pub service_fee_cents: i64,
    pub total_cents: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::booking_extras)]
#[diesel(belongs_to(Booking, foreign_key = booking_id))]
pub struct BookingExtra {
    pub id: i32,
    pub booking_id: i32,
    pub name: String,
    pub pricing_basis: String,
    pub price_cents: i64,
    pub amount_cents: i64,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::bookings)]
pub struct NewBooking<'a> {
    pub property_id: i32,
    pub renter_id: &'a str,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub guest_count: i32,
    pub status: &'a str,
    pub nights: i32,
    pub weekday_nights: i32,
    pub weekend_nights: i32,
    pub base_price_cents: i64,
    pub discount_cents: i64,
    pub extras_total_cents: i64,
    pub service_fee_cents: i64,
    pub total_cents: i64,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::booking_extras)]
pub struct NewBookingExtra<'a> {
    pub booking_id: i32,
    pub name: &'a str,
    pub pricing_basis: &'a str,
    pub price_cents: i64,
    pub amount_cents: i64,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::bookings)]
pub struct UpdateBookingStatus<'a> {
    pub status: &'a str,
    pub updated_at: NaiveDateTime,
}

impl Booking {
    pub fn into_domain(self, extras: Vec<BookingExtra>) -> DomainBooking {
        DomainBooking {
            id: self.id,
            property_id: self.property_id,
            renter_id: self.renter_id,
            check_in_date: self.check_in_date,
            check_out_date: self.check_out_date,
            guest_count: self.guest_count,
            status: self.status.as_str().into(),
            price: PriceBreakdown {
                nights: self.nights.max(0) as u32,
                weekday_nights: self.weekday_nights.max(0) as u32,
                weekend_nights: self.weekend_nights.max(0) as u32,
                base_price_cents: self.base_price_cents,
                discount_cents: self.discount_cents,
                extras_total_cents: self.extras_total_cents,
                service_fee_cents: self.service_fee_cents,
                total_cents: self.total_cents,
            },
            extras: extras.into_iter().map(BookingExtra::into_domain).collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl BookingExtra {
    pub fn into_domain(self) -> DomainBookingExtra {
        DomainBookingExtra {
            name: self.name,
            basis: PricingBasis::from(self.pricing_basis.as_str()),
            price_cents: self.price_cents,
            amount_cents: self.amount_cents,
        }
    }
}

impl From<(Booking, Vec<BookingExtra>)> for DomainBooking {
    fn from(value: (Booking, Vec<BookingExtra>)) -> Self {
        value.0.into_domain(value.1)
    }
}

impl<'a> From<&'a DomainNewBooking> for NewBooking<'a> {
    fn from(value: &'a DomainNewBooking) -> Self {
        let price = &value.price;
        Self {
            property_id: value.property_id,
            renter_id: value.renter_id.as_str(),
            check_in_date: value.check_in_date,
            check_out_date: value.check_out_date,
            guest_count: value.guest_count,
            status: value.status.into(),
            nights: price.nights as i32,
            weekday_nights: price.weekday_nights as i32,
            weekend_nights: price.weekend_nights as i32,
            base_price_cents: price.base_price_cents,
            discount_cents: price.discount_cents,
            extras_total_cents: price.extras_total_cents,
            service_fee_cents: price.service_fee_cents,
            total_cents: price.total_cents,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> NewBookingExtra<'a> {
    pub fn from_domain(booking_id: i32, value: &'a DomainBookingExtra) -> Self {
        Self {
            booking_id,
            name: value.name.as_str(),
            pricing_basis: value.basis.into(),
            price_cents: value.price_cents,
            amount_cents: value.amount_cents,
        }
    }
}

impl UpdateBookingStatus<'_> {
    pub fn new(status: BookingStatus) -> Self {
        Self {
            status: status.into(),
            updated_at: chrono::Local::now().naive_utc(),
        }
    }
}
