use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Flat service fee charged on every stay of at least one night, in cents.
pub const SERVICE_FEE_CENTS: i64 = 5_000;

/// Minimum number of nights before the weekly discount applies.
pub const WEEKLY_DISCOUNT_MIN_NIGHTS: u32 = 7;

/// How an optional add-on is charged.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PricingBasis {
    /// Charged once for every night of the stay.
    PerNight,
    /// Charged once for every guest.
    PerPerson,
    /// Charged once regardless of nights or guests.
    PerStay,
}

impl From<&str> for PricingBasis {
    fn from(value: &str) -> Self {
        match value {
            "per_night" => Self::PerNight,
            "per_person" => Self::PerPerson,
            _ => Self::PerStay,
        }
    }
}

impl From<PricingBasis> for &'static str {
    fn from(value: PricingBasis) -> Self {
        match value {
            PricingBasis::PerNight => "per_night",
            PricingBasis::PerPerson => "per_person",
            PricingBasis::PerStay => "per_stay",
        }
    }
}

/// Optional paid add-on offered by a property.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Extra {
    /// Name of the add-on, unique within a property.
    pub name: String,
    /// Unit price in the smallest currency unit.
    pub price_cents: i64,
    /// How the unit price is multiplied.
    pub basis: PricingBasis,
}

impl Extra {
    pub fn new(name: impl Into<String>, price_cents: i64, basis: PricingBasis) -> Self {
        Self {
            name: name.into(),
            price_cents,
            basis,
        }
    }

    /// Amount this extra adds to a stay of `nights` nights for `guest_count` guests.
    pub fn amount_cents(&self, nights: u32, guest_count: u32) -> i64 {
        match self.basis {
            PricingBasis::PerNight => self.price_cents * i64::from(nights),
            PricingBasis::PerPerson => self.price_cents * i64::from(guest_count),
            PricingBasis::PerStay => self.price_cents,
        }
    }
}

/// Pricing configuration attached to a property listing.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct PricingRule {
    /// Nightly price for nights starting Monday through Friday.
    pub base_price_cents: i64,
    /// Nightly price for nights starting on Saturday or Sunday.
    pub weekend_price_cents: Option<i64>,
    /// Percentage taken off the base price for weekly stays.
    pub weekly_discount_percent: Option<u8>,
    /// Add-ons guests may select, in display order.
    pub extras: Vec<Extra>,
}

impl PricingRule {
    pub fn new(base_price_cents: i64) -> Self {
        Self {
            base_price_cents,
            ..Self::default()
        }
    }

    pub fn with_weekend_price(mut self, weekend_price_cents: i64) -> Self {
        self.weekend_price_cents = Some(weekend_price_cents);
        self
    }

    pub fn with_weekly_discount(mut self, percent: u8) -> Self {
        self.weekly_discount_percent = Some(percent);
        self
    }

    pub fn with_extra(mut self, extra: Extra) -> Self {
        self.extras.push(extra);
        self
    }

    /// Weekend nightly price, falling back to the base price.
    pub fn weekend_price(&self) -> i64 {
        self.weekend_price_cents.unwrap_or(self.base_price_cents)
    }

    /// Look up an extra by its exact name.
    pub fn extra(&self, name: &str) -> Option<&Extra> {
        self.extras.iter().find(|extra| extra.name == name)
    }
}

/// Prospective stay. Check-out is exclusive.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl DateRange {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Self {
        Self {
            check_in,
            check_out,
        }
    }

    /// Whether the range covers at least one night.
    pub fn is_valid(&self) -> bool {
        self.check_out > self.check_in
    }

    /// Number of nights stayed, zero for inverted or same-day ranges.
    pub fn nights(&self) -> u32 {
        if !self.is_valid() {
            return 0;
        }
        let days = (self.check_out - self.check_in).num_days();
        u32::try_from(days).unwrap_or(u32::MAX)
    }

    /// Start dates of every night in `[check_in, check_out)`.
    pub fn night_dates(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.check_out;
        std::iter::successors(Some(self.check_in), |date| {
            date.checked_add_days(Days::new(1))
        })
        .take_while(move |date| *date < end)
    }

    /// Whether the night starting on `date` belongs to the stay.
    pub fn contains_night(&self, date: NaiveDate) -> bool {
        self.check_in <= date && date < self.check_out
    }
}

/// Check-in/check-out pair as picked in the booking form; either side may be missing.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateSelection {
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
}

impl DateSelection {
    pub fn new(check_in: Option<NaiveDate>, check_out: Option<NaiveDate>) -> Self {
        Self {
            check_in,
            check_out,
        }
    }

    /// The selected range once both ends are chosen.
    pub fn range(&self) -> Option<DateRange> {
        match (self.check_in, self.check_out) {
            (Some(check_in), Some(check_out)) => Some(DateRange::new(check_in, check_out)),
            _ => None,
        }
    }
}

/// Itemized price of a stay. All amounts are in cents.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct PriceBreakdown {
    pub nights: u32,
    pub weekday_nights: u32,
    pub weekend_nights: u32,
    pub base_price_cents: i64,
    pub discount_cents: i64,
    pub extras_total_cents: i64,
    pub service_fee_cents: i64,
    pub total_cents: i64,
}

impl PriceBreakdown {
    /// Breakdown for an empty or degenerate selection.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Whether the breakdown describes an actual stay.
    pub fn is_empty(&self) -> bool {
        self.nights == 0
    }
}

/// Whether the night starting on `date` is priced at the weekend rate.
pub fn is_weekend_night(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Price a stay.
///
/// Missing or degenerate ranges (`check_out <= check_in`) yield an all-zero
/// breakdown. Extras are summed as given; matching them against the
/// property's offer is the caller's job.
pub fn compute_price(
    range: Option<&DateRange>,
    rule: &PricingRule,
    selected_extras: &[Extra],
    guest_count: u32,
) -> PriceBreakdown {
    let Some(range) = range.filter(|range| range.is_valid()) else {
        return PriceBreakdown::zero();
    };

    let (weekday_nights, weekend_nights) =
        range
            .night_dates()
            .fold((0u32, 0u32), |(weekday, weekend), date| {
                if is_weekend_night(date) {
                    (weekday, weekend + 1)
                } else {
                    (weekday + 1, weekend)
                }
            });
    let nights = weekday_nights + weekend_nights;

    let base_price_cents = i64::from(weekday_nights) * rule.base_price_cents
        + i64::from(weekend_nights) * rule.weekend_price();

    let discount_cents = match rule.weekly_discount_percent {
        Some(percent) if percent > 0 && nights >= WEEKLY_DISCOUNT_MIN_NIGHTS => {
            percent_of(base_price_cents, percent.min(100))
        }
        _ => 0,
    };
    debug_assert!(discount_cents <= base_price_cents);

    let extras_total_cents = selected_extras
        .iter()
        .map(|extra| extra.amount_cents(nights, guest_count))
        .sum();

    let service_fee_cents = SERVICE_FEE_CENTS;

    PriceBreakdown {
        nights,
        weekday_nights,
        weekend_nights,
        base_price_cents,
        discount_cents,
        extras_total_cents,
        service_fee_cents,
        total_cents: base_price_cents - discount_cents + extras_total_cents + service_fee_cents,
    }
}

// Rounds half up to whole cents.
fn percent_of(amount_cents: i64, percent: u8) -> i64 {
    (amount_cents * i64::from(percent) + 50) / 100
}

/// Render cents as a decimal amount, e.g. `1250` as `12.50`.
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    format!("{sign}{}.{:02}", cents / 100, cents % 100)
}
