use actix_web::{HttpResponse, Responder, get, post, web};

use crate::domain::auth::AuthenticatedUser;
use crate::forms::stays::BookingForm;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::bookings as bookings_service;
use crate::services::bookings::BookingsQuery;

#[post("/properties/{property_id}/bookings")]
/// Reserve a stay for the signed-in renter.
///
/// Answers `409 Conflict` when any night of the stay is already taken.
pub async fn create_booking(
    property_id: web::Path<i32>,
    user: AuthenticatedUser,
    form: web::Json<BookingForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let today = chrono::Local::now().date_naive();

    match bookings_service::create_booking(
        repo.get_ref(),
        &user,
        *property_id,
        form.into_inner(),
        today,
    ) {
        Ok(booking) => HttpResponse::Created().json(booking),
        Err(err) => error_response(err, "create booking"),
    }
}

#[get("/bookings")]
pub async fn list_bookings(
    params: web::Query<BookingsQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match bookings_service::list_user_bookings(repo.get_ref(), &user, params.into_inner()) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response(err, "list bookings"),
    }
}

#[post("/bookings/{booking_id}/cancel")]
pub async fn cancel_booking(
    booking_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match bookings_service::cancel_booking(repo.get_ref(), &user, *booking_id) {
        Ok(booking) => HttpResponse::Ok().json(booking),
        Err(err) => error_response(err, "cancel booking"),
    }
}
