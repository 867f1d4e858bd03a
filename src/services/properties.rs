use serde::Deserialize;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::property::{Property, PropertyListQuery};
use crate::forms::pricing::PricingForm;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{PropertyReader, PropertyWriter};
use crate::services::{ServiceError, ServiceResult};
use crate::{ADMIN_ROLE, VENDOR_ROLE};

/// Query parameters accepted by the listings endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct PropertiesQuery {
    /// Optional search string matched against title and location.
    pub search: Option<String>,
    /// Page requested by the client (1-based).
    pub page: Option<usize>,
}

/// Lists published properties.
pub fn list_properties<R>(repo: &R, query: PropertiesQuery) -> ServiceResult<Paginated<Property>>
where
    R: PropertyReader + ?Sized,
{
    let page = query.page.unwrap_or(1);
    let mut list_query = PropertyListQuery::new()
        .published()
        .paginate(page, DEFAULT_ITEMS_PER_PAGE);

    if let Some(term) = query.search.as_deref().map(str::trim).filter(|term| !term.is_empty()) {
        list_query = list_query.search(term);
    }

    let (total, properties) = repo.list_properties(list_query).map_err(ServiceError::from)?;

    Ok(Paginated::from_total(
        properties,
        page,
        total,
        DEFAULT_ITEMS_PER_PAGE,
    ))
}

/// Loads a single property.
///
/// Unpublished listings are only visible to their owner and to admins.
pub fn load_property<R>(
    repo: &R,
    viewer: Option<&AuthenticatedUser>,
    property_id: i32,
) -> ServiceResult<Property>
where
    R: PropertyReader + ?Sized,
{
    let property = fetch_property(repo, property_id)?;

    if property.is_published || viewer.is_some_and(|user| can_manage(user, &property)) {
        Ok(property)
    } else {
        Err(ServiceError::NotFound)
    }
}

/// Replaces the pricing of a property owned by the caller.
pub fn update_pricing<R>(
    repo: &R,
    user: &AuthenticatedUser,
    property_id: i32,
    form: PricingForm,
) -> ServiceResult<Property>
where
    R: PropertyReader + PropertyWriter + ?Sized,
{
    if !user.has_role(VENDOR_ROLE) && !user.has_role(ADMIN_ROLE) {
        return Err(ServiceError::Unauthorized);
    }

    let property = fetch_property(repo, property_id)?;
    if !can_manage(user, &property) {
        return Err(ServiceError::Unauthorized);
    }

    let updates = form
        .into_update_pricing()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let updated = repo
        .update_pricing(property_id, &updates)
        .map_err(ServiceError::from)?;

    log::info!("Pricing of property {property_id} updated by {}", user.sub);

    Ok(updated)
}

/// Whether `user` may edit `property`.
pub fn can_manage(user: &AuthenticatedUser, property: &Property) -> bool {
    user.has_role(ADMIN_ROLE) || (user.has_role(VENDOR_ROLE) && property.is_owned_by(&user.sub))
}

pub(crate) fn fetch_property<R>(repo: &R, property_id: i32) -> ServiceResult<Property>
where
    R: PropertyReader + ?Sized,
{
    repo.get_property_by_id(property_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}
