use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::booking::{Booking, BookingExtra, BookingListQuery, BookingStatus, NewBooking};
use crate::domain::pricing::{compute_price, format_cents};
use crate::forms::stays::BookingForm;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{BookingReader, BookingWriter, PropertyReader};
use crate::services::availability::load_blocked_dates;
use crate::services::pricing::{check_guest_limit, resolve_extras};
use crate::services::properties::fetch_property;
use crate::services::{ServiceError, ServiceResult};
use crate::{ADMIN_ROLE, RENTER_ROLE};

/// Query parameters accepted by the "my bookings" endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct BookingsQuery {
    /// Page requested by the client (1-based).
    pub page: Option<usize>,
}

/// Reserves a stay for the signed-in renter.
///
/// The price is recomputed here from the stored pricing rule; whatever the
/// client displayed is not trusted.
pub fn create_booking<R>(
    repo: &R,
    user: &AuthenticatedUser,
    property_id: i32,
    form: BookingForm,
    today: NaiveDate,
) -> ServiceResult<Booking>
where
    R: PropertyReader + BookingReader + BookingWriter + ?Sized,
{
    if !user.has_role(RENTER_ROLE) || !user.email_verified {
        return Err(ServiceError::Unauthorized);
    }

    let request = form
        .into_booking_request()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    if request.range.check_in < today {
        return Err(ServiceError::Form(
            "check-in date cannot be in the past".to_string(),
        ));
    }

    let property = fetch_property(repo, property_id)?;
    if !property.is_published {
        return Err(ServiceError::NotFound);
    }

    check_guest_limit(&property, request.guest_count)?;
    let extras = resolve_extras(&property.pricing, &request.extra_names)?;

    let blocked = load_blocked_dates(repo, property_id)?;
    if blocked.conflicts_with(&request.range) {
        log::warn!(
            "Rejected booking of property {property_id} from {} to {}: dates taken",
            request.range.check_in,
            request.range.check_out
        );
        return Err(ServiceError::Conflict(
            "the selected dates are no longer available".to_string(),
        ));
    }

    let price = compute_price(
        Some(&request.range),
        &property.pricing,
        &extras,
        request.guest_count,
    );

    let snapshot = extras
        .iter()
        .map(|extra| BookingExtra::from_extra(extra, price.nights, request.guest_count))
        .collect();

    let guest_count = i32::try_from(request.guest_count)
        .map_err(|_| ServiceError::Form("too many guests".to_string()))?;

    let new_booking = NewBooking::new(property_id, &user.sub, request.range, guest_count, price)
        .with_extras(snapshot);

    let booking = repo.create_booking(&new_booking).map_err(ServiceError::from)?;

    log::info!(
        "Booking {} created for property {property_id} by {} ({} nights, total {})",
        booking.id,
        user.sub,
        price.nights,
        format_cents(price.total_cents)
    );

    Ok(booking)
}

/// Lists the caller's bookings, newest first.
pub fn list_user_bookings<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: BookingsQuery,
) -> ServiceResult<Paginated<Booking>>
where
    R: BookingReader + ?Sized,
{
    let page = query.page.unwrap_or(1);
    let list_query = BookingListQuery::new()
        .renter(&user.sub)
        .paginate(page, DEFAULT_ITEMS_PER_PAGE);

    let (total, bookings) = repo.list_bookings(list_query).map_err(ServiceError::from)?;

    Ok(Paginated::from_total(
        bookings,
        page,
        total,
        DEFAULT_ITEMS_PER_PAGE,
    ))
}

/// Cancels a booking, releasing its dates.
pub fn cancel_booking<R>(
    repo: &R,
    user: &AuthenticatedUser,
    booking_id: i32,
) -> ServiceResult<Booking>
where
    R: BookingReader + BookingWriter + ?Sized,
{
    let booking = repo
        .get_booking_by_id(booking_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    if booking.renter_id != user.sub && !user.has_role(ADMIN_ROLE) {
        return Err(ServiceError::Unauthorized);
    }

    if !booking.is_active() {
        return Err(ServiceError::Conflict(format!(
            "booking {booking_id} is already cancelled"
        )));
    }

    let cancelled = repo
        .update_booking_status(booking_id, BookingStatus::Cancelled)
        .map_err(ServiceError::from)?;

    log::info!("Booking {booking_id} cancelled by {}", user.sub);

    Ok(cancelled)
}
