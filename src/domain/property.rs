use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::pricing::PricingRule;
use crate::pagination::Pagination;

/// Domain representation of a rental listing.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Property {
    /// Unique identifier of the property.
    pub id: i32,
    /// Identity of the vendor who owns the listing.
    pub owner_id: String,
    pub title: String,
    pub description: Option<String>,
    /// Free-form location shown to renters, e.g. "Sinkor, Monrovia".
    pub location: String,
    /// Maximum number of guests per stay.
    pub max_guests: i32,
    /// Whether the listing is visible to renters.
    pub is_published: bool,
    pub pricing: PricingRule,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Property {
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.owner_id == user_id
    }
}

/// Payload required to insert a new property.
#[derive(Debug, Clone)]
pub struct NewProperty {
    pub owner_id: String,
    pub title: String,
    pub description: Option<String>,
    pub location: String,
    pub max_guests: i32,
    pub is_published: bool,
    pub pricing: PricingRule,
    pub updated_at: NaiveDateTime,
}

impl NewProperty {
    /// Build an unpublished listing with empty pricing and the current timestamp.
    pub fn new(
        owner_id: impl Into<String>,
        title: impl Into<String>,
        location: impl Into<String>,
        max_guests: i32,
    ) -> Self {
        let now = chrono::Local::now().naive_utc();
        Self {
            owner_id: owner_id.into(),
            title: title.into().trim().to_string(),
            description: None,
            location: location.into().trim().to_string(),
            max_guests,
            is_published: false,
            pricing: PricingRule::default(),
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_pricing(mut self, pricing: PricingRule) -> Self {
        self.pricing = pricing;
        self
    }

    /// Make the listing visible to renters.
    pub fn published(mut self) -> Self {
        self.is_published = true;
        self
    }
}

/// Replacement pricing for an existing property.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdatePricing {
    pub pricing: PricingRule,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl UpdatePricing {
    pub fn new(pricing: PricingRule) -> Self {
        Self {
            pricing,
            updated_at: chrono::Local::now().naive_utc(),
        }
    }
}

/// Query definition used to list properties.
#[derive(Debug, Clone, Default)]
pub struct PropertyListQuery {
    /// Optional owner filter.
    pub owner_id: Option<String>,
    /// Skip unpublished listings.
    pub published_only: bool,
    /// Optional case-insensitive substring search over title and location.
    pub search: Option<String>,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl PropertyListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn owner(mut self, owner_id: impl Into<String>) -> Self {
        self.owner_id = Some(owner_id.into());
        self
    }

    pub fn published(mut self) -> Self {
        self.published_only = true;
        self
    }

    /// Filter the results by a search term applied to title or location.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
