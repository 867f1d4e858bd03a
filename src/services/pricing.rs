use crate::domain::pricing::{Extra, PriceBreakdown, PricingRule, compute_price};
use crate::domain::property::Property;
use crate::forms::stays::QuoteForm;
use crate::repository::PropertyReader;
use crate::services::properties::fetch_property;
use crate::services::{ServiceError, ServiceResult};

/// Prices a prospective stay at a published property.
///
/// Incomplete or inverted date selections quote to zero.
pub fn quote_stay<R>(repo: &R, property_id: i32, form: QuoteForm) -> ServiceResult<PriceBreakdown>
where
    R: PropertyReader + ?Sized,
{
    let request = form
        .into_quote_request()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let property = fetch_property(repo, property_id)?;
    if !property.is_published {
        return Err(ServiceError::NotFound);
    }

    check_guest_limit(&property, request.guest_count)?;
    let extras = resolve_extras(&property.pricing, &request.extra_names)?;

    Ok(compute_price(
        request.dates.range().as_ref(),
        &property.pricing,
        &extras,
        request.guest_count,
    ))
}

/// Match selected extra names against what the property offers.
pub(crate) fn resolve_extras(rule: &PricingRule, names: &[String]) -> ServiceResult<Vec<Extra>> {
    names
        .iter()
        .map(|name| {
            rule.extra(name)
                .cloned()
                .ok_or_else(|| ServiceError::Form(format!("unknown extra `{name}`")))
        })
        .collect()
}

pub(crate) fn check_guest_limit(property: &Property, guest_count: u32) -> ServiceResult<()> {
    let max_guests = u32::try_from(property.max_guests).unwrap_or(0);
    if guest_count > max_guests {
        return Err(ServiceError::Form(format!(
            "this property hosts at most {max_guests} guests"
        )));
    }
    Ok(())
}
