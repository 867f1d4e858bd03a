use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::pricing::{Extra, PricingBasis, PricingRule, format_cents};
use crate::domain::property::UpdatePricing;
use crate::forms::{MAX_PRICE_CENTS, parse_price_cents, sanitize_inline_text};

/// Maximum allowed length for an extra's name.
const EXTRA_NAME_MAX_LEN: u64 = 64;

/// Maximum number of extras a property may offer.
const MAX_EXTRAS: u64 = 32;

/// Result type returned by the pricing form helpers.
pub type PricingFormResult<T> = Result<T, PricingFormError>;

/// Errors that can occur while processing a pricing form.
#[derive(Debug, Error)]
pub enum PricingFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// A price could not be read as a non-negative amount.
    #[error("invalid price `{value}`")]
    InvalidPrice { value: String },
    /// A price exceeds what a listing may charge.
    #[error("price `{value}` exceeds the maximum of {max}")]
    PriceTooHigh { value: String, max: String },
    /// An extra has no name after sanitization.
    #[error("extra name cannot be empty")]
    EmptyExtraName,
    /// Two extras share the same name.
    #[error("extra `{name}` is listed more than once")]
    DuplicateExtra { name: String },
}

/// One add-on row of the pricing form.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct ExtraForm {
    #[validate(length(min = 1, max = EXTRA_NAME_MAX_LEN))]
    pub name: String,
    /// Decimal price such as `20` or `12.50`.
    pub price: String,
    pub basis: PricingBasis,
}

/// Payload emitted when a vendor edits the pricing of a listing.
#[derive(Debug, Deserialize, Validate)]
pub struct PricingForm {
    /// Decimal nightly price.
    pub base_price: String,
    /// Decimal weekend nightly price; blank means "same as base".
    pub weekend_price: Option<String>,
    #[validate(range(max = 100))]
    pub weekly_discount_percent: Option<u8>,
    #[serde(default)]
    #[validate(length(max = MAX_EXTRAS), nested)]
    pub extras: Vec<ExtraForm>,
}

impl PricingForm {
    /// Validates and sanitizes the payload into a domain `PricingRule`.
    pub fn into_pricing_rule(self) -> PricingFormResult<PricingRule> {
        self.validate()?;

        let mut rule = PricingRule::new(parse_price(&self.base_price)?);

        if let Some(weekend) = self
            .weekend_price
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
        {
            rule = rule.with_weekend_price(parse_price(weekend)?);
        }

        if let Some(percent) = self.weekly_discount_percent.filter(|percent| *percent > 0) {
            rule = rule.with_weekly_discount(percent);
        }

        for extra in self.extras {
            let name = sanitize_inline_text(&extra.name);
            if name.is_empty() {
                return Err(PricingFormError::EmptyExtraName);
            }
            if rule.extra(&name).is_some() {
                return Err(PricingFormError::DuplicateExtra { name });
            }
            let price_cents = parse_price(&extra.price)?;
            rule = rule.with_extra(Extra::new(name, price_cents, extra.basis));
        }

        Ok(rule)
    }

    /// Validates the payload into a pricing patch stamped with the current time.
    pub fn into_update_pricing(self) -> PricingFormResult<UpdatePricing> {
        Ok(UpdatePricing::new(self.into_pricing_rule()?))
    }
}

fn parse_price(value: &str) -> PricingFormResult<i64> {
    let value = value.trim();
    let cents = parse_price_cents(value).ok_or_else(|| PricingFormError::InvalidPrice {
        value: value.to_string(),
    })?;

    if cents > MAX_PRICE_CENTS {
        return Err(PricingFormError::PriceTooHigh {
            value: value.to_string(),
            max: format_cents(MAX_PRICE_CENTS),
        });
    }

    Ok(cents)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extra_form(name: &str, price: &str, basis: PricingBasis) -> ExtraForm {
        ExtraForm {
            name: name.to_string(),
            price: price.to_string(),
            basis,
        }
    }

    #[test]
    fn pricing_form_converts_successfully() {
        let form = PricingForm {
            base_price: "100".to_string(),
            weekend_price: Some(" 150.00 ".to_string()),
            weekly_discount_percent: Some(10),
            extras: vec![
                extra_form(" Breakfast ", "20", PricingBasis::PerPerson),
                extra_form("Cleaning", "35.5", PricingBasis::PerStay),
            ],
        };

        let rule = form.into_pricing_rule().expect("expected success");

        assert_eq!(rule.base_price_cents, 10_000);
        assert_eq!(rule.weekend_price_cents, Some(15_000));
        assert_eq!(rule.weekly_discount_percent, Some(10));
        assert_eq!(rule.extras.len(), 2);
        assert_eq!(rule.extras[0].name, "Breakfast");
        assert_eq!(rule.extras[0].price_cents, 2_000);
        assert_eq!(rule.extras[1].price_cents, 3_550);
        assert_eq!(rule.extras[1].basis, PricingBasis::PerStay);
    }

    #[test]
    fn blank_weekend_price_and_zero_discount_are_unset() {
        let form = PricingForm {
            base_price: "80".to_string(),
            weekend_price: Some("  ".to_string()),
            weekly_discount_percent: Some(0),
            extras: Vec::new(),
        };

        let rule = form.into_pricing_rule().expect("expected success");

        assert_eq!(rule.weekend_price_cents, None);
        assert_eq!(rule.weekly_discount_percent, None);
        assert_eq!(rule.weekend_price(), 8_000);
    }

    #[test]
    fn pricing_form_rejects_invalid_price() {
        let form = PricingForm {
            base_price: "-10".to_string(),
            weekend_price: None,
            weekly_discount_percent: None,
            extras: Vec::new(),
        };

        let result = form.into_pricing_rule();

        assert!(matches!(
            result,
            Err(PricingFormError::InvalidPrice { value }) if value == "-10"
        ));
    }

    #[test]
    fn pricing_form_rejects_oversized_prices() {
        let form = PricingForm {
            base_price: "92233720368547758".to_string(),
            weekend_price: None,
            weekly_discount_percent: None,
            extras: Vec::new(),
        };

        assert!(matches!(
            form.into_pricing_rule(),
            Err(PricingFormError::PriceTooHigh { value, .. }) if value == "92233720368547758"
        ));

        let form = PricingForm {
            base_price: "100".to_string(),
            weekend_price: None,
            weekly_discount_percent: None,
            extras: vec![extra_form("Helicopter", "1000000.01", PricingBasis::PerNight)],
        };

        assert!(matches!(
            form.into_pricing_rule(),
            Err(PricingFormError::PriceTooHigh { .. })
        ));
    }

    #[test]
    fn pricing_form_accepts_maximum_price() {
        let form = PricingForm {
            base_price: "1000000".to_string(),
            weekend_price: Some("1000000.00".to_string()),
            weekly_discount_percent: None,
            extras: Vec::new(),
        };

        let rule = form.into_pricing_rule().expect("expected success");

        assert_eq!(rule.base_price_cents, MAX_PRICE_CENTS);
        assert_eq!(rule.weekend_price_cents, Some(MAX_PRICE_CENTS));
    }

    #[test]
    fn pricing_form_rejects_too_many_extras() {
        let form = PricingForm {
            base_price: "10".to_string(),
            weekend_price: None,
            weekly_discount_percent: None,
            extras: (0..=MAX_EXTRAS)
                .map(|i| extra_form(&format!("Extra {i}"), "1", PricingBasis::PerStay))
                .collect(),
        };

        assert!(matches!(
            form.into_pricing_rule(),
            Err(PricingFormError::Validation(_))
        ));
    }

    #[test]
    fn pricing_form_rejects_discount_above_hundred() {
        let form = PricingForm {
            base_price: "10".to_string(),
            weekend_price: None,
            weekly_discount_percent: Some(120),
            extras: Vec::new(),
        };

        assert!(matches!(
            form.into_pricing_rule(),
            Err(PricingFormError::Validation(_))
        ));
    }

    #[test]
    fn pricing_form_rejects_duplicate_extras() {
        let form = PricingForm {
            base_price: "10".to_string(),
            weekend_price: None,
            weekly_discount_percent: None,
            extras: vec![
                extra_form("Breakfast", "5", PricingBasis::PerPerson),
                extra_form("Breakfast ", "6", PricingBasis::PerStay),
            ],
        };

        assert!(matches!(
            form.into_pricing_rule(),
            Err(PricingFormError::DuplicateExtra { name }) if name == "Breakfast"
        ));
    }

    #[test]
    fn pricing_form_rejects_whitespace_extra_name() {
        let form = PricingForm {
            base_price: "10".to_string(),
            weekend_price: None,
            weekly_discount_percent: None,
            extras: vec![extra_form("   ", "5", PricingBasis::PerStay)],
        };

        assert!(matches!(
            form.into_pricing_rule(),
            Err(PricingFormError::EmptyExtraName)
        ));
    }

    #[test]
    fn pricing_form_deserializes_basis_names() {
        let form: PricingForm = serde_json::from_str(
            r#"{"base_price":"100","extras":[{"name":"Parking","price":"5","basis":"per_night"}]}"#,
        )
        .expect("valid json");

        assert_eq!(form.extras[0].basis, PricingBasis::PerNight);
        assert!(form.weekend_price.is_none());
    }
}
