use mockall::mock;

use super::{BookingReader, BookingWriter, PropertyReader, PropertyWriter, RepositoryResult};
use crate::domain::{
    booking::{Booking, BookingListQuery, BookingStatus, NewBooking},
    property::{NewProperty, Property, PropertyListQuery, UpdatePricing},
};

mock! {
    pub PropertyReader {}

    impl PropertyReader for PropertyReader {
        fn get_property_by_id(&self, id: i32) -> RepositoryResult<Option<Property>>;
        fn list_properties(&self, query: PropertyListQuery) -> RepositoryResult<(usize, Vec<Property>)>;
    }
}

mock! {
    pub PropertyWriter {}

    impl PropertyWriter for PropertyWriter {
        fn create_property(&self, new_property: &NewProperty) -> RepositoryResult<Property>;
        fn update_pricing(&self, property_id: i32, updates: &UpdatePricing) -> RepositoryResult<Property>;
    }
}

mock! {
    pub BookingReader {}

    impl BookingReader for BookingReader {
        fn get_booking_by_id(&self, id: i32) -> RepositoryResult<Option<Booking>>;
        fn list_bookings(&self, query: BookingListQuery) -> RepositoryResult<(usize, Vec<Booking>)>;
    }
}

mock! {
    pub BookingWriter {}

    impl BookingWriter for BookingWriter {
        fn create_booking(&self, new_booking: &NewBooking) -> RepositoryResult<Booking>;
        fn update_booking_status(&self, booking_id: i32, status: BookingStatus) -> RepositoryResult<Booking>;
    }
}

/// Repository double combining the individual mocks for services that need
/// several traits at once.
#[derive(Default)]
pub struct MockRepo {
    pub property_reader: MockPropertyReader,
    pub property_writer: MockPropertyWriter,
    pub booking_reader: MockBookingReader,
    pub booking_writer: MockBookingWriter,
}

impl MockRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PropertyReader for MockRepo {
    fn get_property_by_id(&self, id: i32) -> RepositoryResult<Option<Property>> {
        self.property_reader.get_property_by_id(id)
    }

    fn list_properties(
        &self,
        query: PropertyListQuery,
    ) -> RepositoryResult<(usize, Vec<Property>)> {
        self.property_reader.list_properties(query)
    }
}

impl PropertyWriter for MockRepo {
    fn create_property(&self, new_property: &NewProperty) -> RepositoryResult<Property> {
        self.property_writer.create_property(new_property)
    }

    fn update_pricing(
        &self,
        property_id: i32,
        updates: &UpdatePricing,
    ) -> RepositoryResult<Property> {
        self.property_writer.update_pricing(property_id, updates)
    }
}

impl BookingReader for MockRepo {
    fn get_booking_by_id(&self, id: i32) -> RepositoryResult<Option<Booking>> {
        self.booking_reader.get_booking_by_id(id)
    }

    fn list_bookings(&self, query: BookingListQuery) -> RepositoryResult<(usize, Vec<Booking>)> {
        self.booking_reader.list_bookings(query)
    }
}

impl BookingWriter for MockRepo {
    fn create_booking(&self, new_booking: &NewBooking) -> RepositoryResult<Booking> {
        self.booking_writer.create_booking(new_booking)
    }

    fn update_booking_status(
        &self,
        booking_id: i32,
        status: BookingStatus,
    ) -> RepositoryResult<Booking> {
        self.booking_writer.update_booking_status(booking_id, status)
    }
}
