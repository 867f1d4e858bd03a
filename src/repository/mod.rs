use crate::db::{DbConnection, DbPool};
use crate::domain::booking::{Booking, BookingListQuery, BookingStatus, NewBooking};
use crate::domain::property::{NewProperty, Property, PropertyListQuery, UpdatePricing};

pub mod booking;
pub mod errors;
pub mod property;

#[cfg(test)]
pub mod mock;

pub use errors::{RepositoryError, RepositoryResult};

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over property listings.
pub trait PropertyReader {
    fn get_property_by_id(&self, id: i32) -> RepositoryResult<Option<Property>>;
    fn list_properties(&self, query: PropertyListQuery)
    -> RepositoryResult<(usize, Vec<Property>)>;
}

/// Write operations over property listings.
pub trait PropertyWriter {
    fn create_property(&self, new_property: &NewProperty) -> RepositoryResult<Property>;
    /// Replace the pricing rule of a property, extras included.
    fn update_pricing(
        &self,
        property_id: i32,
        updates: &UpdatePricing,
    ) -> RepositoryResult<Property>;
}

/// Read-only operations over bookings.
pub trait BookingReader {
    fn get_booking_by_id(&self, id: i32) -> RepositoryResult<Option<Booking>>;
    fn list_bookings(&self, query: BookingListQuery) -> RepositoryResult<(usize, Vec<Booking>)>;
}

/// Write operations over bookings.
pub trait BookingWriter {
    /// Insert a booking, failing with `RepositoryError::Conflict` when an
    /// active booking already occupies one of its nights.
    fn create_booking(&self, new_booking: &NewBooking) -> RepositoryResult<Booking>;
    fn update_booking_status(
        &self,
        booking_id: i32,
        status: BookingStatus,
    ) -> RepositoryResult<Booking>;
}
