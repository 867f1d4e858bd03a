use actix_web::{HttpResponse, Responder, get, post, put, web};

use crate::domain::auth::AuthenticatedUser;
use crate::forms::pricing::PricingForm;
use crate::forms::stays::QuoteForm;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::properties::PropertiesQuery;
use crate::services::{
    availability as availability_service, pricing as pricing_service,
    properties as properties_service,
};

#[get("/properties")]
/// Return published properties with optional search and pagination.
pub async fn list_properties(
    params: web::Query<PropertiesQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match properties_service::list_properties(repo.get_ref(), params.into_inner()) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response(err, "list properties"),
    }
}

#[get("/properties/{property_id}")]
pub async fn show_property(
    property_id: web::Path<i32>,
    viewer: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match properties_service::load_property(repo.get_ref(), viewer.as_ref(), *property_id) {
        Ok(property) => HttpResponse::Ok().json(property),
        Err(err) => error_response(err, "load property"),
    }
}

#[get("/properties/{property_id}/availability")]
/// Return the dates the date picker must disable.
pub async fn show_availability(
    property_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let today = chrono::Local::now().date_naive();

    match availability_service::load_availability(repo.get_ref(), *property_id, today) {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(err) => error_response(err, "load availability"),
    }
}

#[post("/properties/{property_id}/quote")]
/// Price a prospective stay without reserving it.
pub async fn quote_stay(
    property_id: web::Path<i32>,
    form: web::Json<QuoteForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match pricing_service::quote_stay(repo.get_ref(), *property_id, form.into_inner()) {
        Ok(breakdown) => HttpResponse::Ok().json(breakdown),
        Err(err) => error_response(err, "quote stay"),
    }
}

#[put("/properties/{property_id}/pricing")]
pub async fn update_pricing(
    property_id: web::Path<i32>,
    user: AuthenticatedUser,
    form: web::Json<PricingForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match properties_service::update_pricing(
        repo.get_ref(),
        &user,
        *property_id,
        form.into_inner(),
    ) {
        Ok(property) => HttpResponse::Ok().json(property),
        Err(err) => error_response(err, "update pricing"),
    }
}
