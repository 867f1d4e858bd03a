use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::availability::{BlockedDates, compute_blocked_dates};
use crate::domain::booking::BookingListQuery;
use crate::repository::{BookingReader, PropertyReader};
use crate::services::properties::fetch_property;
use crate::services::{ServiceError, ServiceResult};

/// Data the date picker needs to disable dates.
#[derive(Debug, Serialize)]
pub struct AvailabilityView {
    pub property_id: i32,
    /// Dates before this one are not selectable either.
    pub today: NaiveDate,
    pub blocked_dates: BlockedDates,
}

/// Loads the dates already taken by active bookings of a published property.
pub fn load_availability<R>(
    repo: &R,
    property_id: i32,
    today: NaiveDate,
) -> ServiceResult<AvailabilityView>
where
    R: PropertyReader + BookingReader + ?Sized,
{
    let property = fetch_property(repo, property_id)?;
    if !property.is_published {
        return Err(ServiceError::NotFound);
    }

    let blocked_dates = load_blocked_dates(repo, property_id)?;

    Ok(AvailabilityView {
        property_id,
        today,
        blocked_dates,
    })
}

/// Blocked dates for `property_id`, recomputed from the current bookings.
pub(crate) fn load_blocked_dates<R>(repo: &R, property_id: i32) -> ServiceResult<BlockedDates>
where
    R: BookingReader + ?Sized,
{
    let (_, bookings) = repo
        .list_bookings(BookingListQuery::new().property(property_id).active())
        .map_err(ServiceError::from)?;

    Ok(compute_blocked_dates(&bookings))
}
