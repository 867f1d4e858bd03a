use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::pricing::{DateRange, DateSelection};
use crate::forms::sanitize_inline_text;

/// Upper bound on guests accepted by any stay form.
const MAX_GUESTS: u32 = 50;

/// Longest stay that can be quoted or booked in one go.
pub const MAX_STAY_NIGHTS: u32 = 365;

/// Upper bound on extras selected for a single stay.
const MAX_SELECTED_EXTRAS: u64 = 32;

/// Result type returned by the stay form helpers.
pub type StayFormResult<T> = Result<T, StayFormError>;

/// Errors that can occur while processing quote and booking forms.
#[derive(Debug, Error)]
pub enum StayFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// Check-out is not after check-in.
    #[error("check-out {check_out} must be after check-in {check_in}")]
    InvalidRange {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },
    /// The stay is longer than a single booking may be.
    #[error("stays are limited to {max} nights, got {nights}")]
    StayTooLong { nights: u32, max: u32 },
}

/// Payload submitted while a guest is exploring prices.
#[derive(Debug, Deserialize, Validate)]
pub struct QuoteForm {
    /// Check-in date, absent until picked.
    pub check_in: Option<NaiveDate>,
    /// Check-out date, absent until picked.
    pub check_out: Option<NaiveDate>,
    #[validate(range(min = 1, max = MAX_GUESTS))]
    pub guests: u32,
    /// Names of the selected extras.
    #[serde(default)]
    #[validate(length(max = MAX_SELECTED_EXTRAS))]
    pub extras: Vec<String>,
}

/// Stay details after validation; dates may still be incomplete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    pub dates: DateSelection,
    pub guest_count: u32,
    pub extra_names: Vec<String>,
}

impl QuoteForm {
    /// Validates and sanitizes the payload.
    ///
    /// Inverted ranges are accepted here; they price to zero.
    pub fn into_quote_request(self) -> StayFormResult<QuoteRequest> {
        self.validate()?;

        let dates = DateSelection::new(self.check_in, self.check_out);
        if let Some(range) = dates.range() {
            check_stay_length(&range)?;
        }

        Ok(QuoteRequest {
            dates,
            guest_count: self.guests,
            extra_names: sanitize_extra_names(&self.extras),
        })
    }
}

/// Payload submitted to reserve a stay.
#[derive(Debug, Deserialize, Validate)]
pub struct BookingForm {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[validate(range(min = 1, max = MAX_GUESTS))]
    pub guests: u32,
    /// Names of the selected extras.
    #[serde(default)]
    #[validate(length(max = MAX_SELECTED_EXTRAS))]
    pub extras: Vec<String>,
}

/// Validated booking request covering at least one night.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    pub range: DateRange,
    pub guest_count: u32,
    pub extra_names: Vec<String>,
}

impl BookingForm {
    /// Validates and sanitizes the payload into a bookable request.
    pub fn into_booking_request(self) -> StayFormResult<BookingRequest> {
        self.validate()?;

        let range = DateRange::new(self.check_in, self.check_out);
        if !range.is_valid() {
            return Err(StayFormError::InvalidRange {
                check_in: self.check_in,
                check_out: self.check_out,
            });
        }
        check_stay_length(&range)?;

        Ok(BookingRequest {
            range,
            guest_count: self.guests,
            extra_names: sanitize_extra_names(&self.extras),
        })
    }
}

fn check_stay_length(range: &DateRange) -> StayFormResult<()> {
    let nights = range.nights();
    if nights > MAX_STAY_NIGHTS {
        return Err(StayFormError::StayTooLong {
            nights,
            max: MAX_STAY_NIGHTS,
        });
    }
    Ok(())
}

// Trims names, drops blanks and repeats while keeping the first occurrence order.
fn sanitize_extra_names(names: &[String]) -> Vec<String> {
    let mut result: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        let sanitized = sanitize_inline_text(name);
        if sanitized.is_empty() || result.contains(&sanitized) {
            continue;
        }
        result.push(sanitized);
    }
    result
}
