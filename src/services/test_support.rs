use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::auth::AuthenticatedUser;
use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::pricing::{Extra, PriceBreakdown, PricingBasis, PricingRule};
use crate::domain::property::Property;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

pub fn datetime() -> NaiveDateTime {
    date(2025, 1, 1).and_hms_opt(0, 0, 0).unwrap_or_default()
}

pub fn sample_pricing() -> PricingRule {
    PricingRule::new(10_000)
        .with_weekend_price(15_000)
        .with_weekly_discount(10)
        .with_extra(Extra::new("Breakfast", 2_000, PricingBasis::PerPerson))
        .with_extra(Extra::new("Cleaning", 3_000, PricingBasis::PerStay))
}

pub fn sample_property(id: i32, owner_id: &str) -> Property {
    Property {
        id,
        owner_id: owner_id.to_string(),
        title: "Beach house".to_string(),
        description: None,
        location: "Robertsport".to_string(),
        max_guests: 4,
        is_published: true,
        pricing: sample_pricing(),
        created_at: datetime(),
        updated_at: datetime(),
    }
}

pub fn sample_booking(
    id: i32,
    property_id: i32,
    renter_id: &str,
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> Booking {
    Booking {
        id,
        property_id,
        renter_id: renter_id.to_string(),
        check_in_date: check_in,
        check_out_date: check_out,
        guest_count: 2,
        status: BookingStatus::Confirmed,
        price: PriceBreakdown::zero(),
        extras: Vec::new(),
        created_at: datetime(),
        updated_at: datetime(),
    }
}

pub fn user(sub: &str, roles: &[&str]) -> AuthenticatedUser {
    AuthenticatedUser {
        sub: sub.to_string(),
        email: format!("{sub}@example.com"),
        name: "Tester".to_string(),
        email_verified: true,
        roles: roles.iter().map(|role| (*role).to_string()).collect(),
    }
}
