use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::pricing::{Extra as DomainExtra, PricingBasis, PricingRule};
use crate::domain::property::{
    NewProperty as DomainNewProperty, Property as DomainProperty,
    UpdatePricing as DomainUpdatePricing,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::properties)]
pub struct Property {
    pub id: i32,
    pub owner_id: String,
    pub title: String,
    pub description: Option<String>,
    pub location: String,
    pub max_guests: i32,
    pub is_published: bool,
    pub base_price_cents: i64,
    pub weekend_price_cents: Option<i64>,
    pub weekly_discount_percent: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::property_extras)]
#[diesel(belongs_to(Property, foreign_key = property_id))]
pub struct PropertyExtra {
    pub id: i32,
    pub property_id: i32,
    pub name: String,
    pub price_cents: i64,
    pub pricing_basis: String,
    pub position: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::properties)]
pub struct NewProperty<'a> {
    pub owner_id: &'a str,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub location: &'a str,
    pub max_guests: i32,
    pub is_published: bool,
    pub base_price_cents: i64,
    pub weekend_price_cents: Option<i64>,
    pub weekly_discount_percent: Option<i32>,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::property_extras)]
pub struct NewPropertyExtra<'a> {
    pub property_id: i32,
    pub name: &'a str,
    pub price_cents: i64,
    pub pricing_basis: &'a str,
    pub position: i32,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::properties)]
#[diesel(treat_none_as_null = true)]
pub struct UpdatePricing {
    pub base_price_cents: i64,
    pub weekend_price_cents: Option<i64>,
    pub weekly_discount_percent: Option<i32>,
    pub updated_at: NaiveDateTime,
}

impl Property {
    pub fn into_domain(self, extras: Vec<PropertyExtra>) -> DomainProperty {
        let pricing = PricingRule {
            base_price_cents: self.base_price_cents,
            weekend_price_cents: self.weekend_price_cents,
            weekly_discount_percent: self
                .weekly_discount_percent
                .and_then(|percent| u8::try_from(percent).ok()),
            extras: extras.into_iter().map(PropertyExtra::into_domain).collect(),
        };

        DomainProperty {
            id: self.id,
            owner_id: self.owner_id,
            title: self.title,
            description: self.description,
            location: self.location,
            max_guests: self.max_guests,
            is_published: self.is_published,
            pricing,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl PropertyExtra {
    pub fn into_domain(self) -> DomainExtra {
        DomainExtra {
            name: self.name,
            price_cents: self.price_cents,
            basis: PricingBasis::from(self.pricing_basis.as_str()),
        }
    }
}

impl From<(Property, Vec<PropertyExtra>)> for DomainProperty {
    fn from(value: (Property, Vec<PropertyExtra>)) -> Self {
        value.0.into_domain(value.1)
    }
}

impl<'a> From<&'a DomainNewProperty> for NewProperty<'a> {
    fn from(value: &'a DomainNewProperty) -> Self {
        Self {
            owner_id: value.owner_id.as_str(),
            title: value.title.as_str(),
            description: value.description.as_deref(),
            location: value.location.as_str(),
            max_guests: value.max_guests,
            is_published: value.is_published,
            base_price_cents: value.pricing.base_price_cents,
            weekend_price_cents: value.pricing.weekend_price_cents,
            weekly_discount_percent: value.pricing.weekly_discount_percent.map(i32::from),
            updated_at: value.updated_at,
        }
    }
}

impl<'a> NewPropertyExtra<'a> {
    /// Rows for the extras of `pricing`, keeping their display order.
    pub fn from_pricing(property_id: i32, pricing: &'a PricingRule) -> Vec<Self> {
        pricing
            .extras
            .iter()
            .enumerate()
            .map(|(position, extra)| Self {
                property_id,
                name: extra.name.as_str(),
                price_cents: extra.price_cents,
                pricing_basis: extra.basis.into(),
                position: position as i32,
            })
            .collect()
    }
}

impl From<&DomainUpdatePricing> for UpdatePricing {
    fn from(value: &DomainUpdatePricing) -> Self {
        Self {
            base_price_cents: value.pricing.base_price_cents,
            weekend_price_cents: value.pricing.weekend_price_cents,
            weekly_discount_percent: value.pricing.weekly_discount_percent.map(i32::from),
            updated_at: value.updated_at,
        }
    }
}
