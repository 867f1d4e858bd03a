use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::{
    domain::booking::{
        Booking as DomainBooking, BookingListQuery, BookingStatus,
        NewBooking as DomainNewBooking,
    },
    models::booking::{
        Booking as DbBooking, BookingExtra as DbBookingExtra, NewBooking as DbNewBooking,
        NewBookingExtra as DbNewBookingExtra, UpdateBookingStatus as DbUpdateBookingStatus,
    },
    repository::{BookingReader, BookingWriter, DieselRepository, RepositoryError, RepositoryResult},
};

const CANCELLED: &str = "cancelled";

impl BookingReader for DieselRepository {
    fn get_booking_by_id(&self, id: i32) -> RepositoryResult<Option<DomainBooking>> {
        use crate::schema::bookings;

        let mut conn = self.conn()?;
        let booking = bookings::table
            .filter(bookings::id.eq(id))
            .first::<DbBooking>(&mut conn)
            .optional()?;

        let Some(booking) = booking else {
            return Ok(None);
        };

        let extras = load_extras(&mut conn, booking.id)?;
        Ok(Some(DomainBooking::from((booking, extras))))
    }

    fn list_bookings(
        &self,
        query: BookingListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainBooking>)> {
        use crate::schema::{booking_extras, bookings};

        let mut conn = self.conn()?;

        let BookingListQuery {
            property_id,
            renter_id,
            active_only,
            pagination,
        } = query;

        let mut count_query = bookings::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(property) = property_id {
            count_query = count_query.filter(bookings::property_id.eq(property));
        }

        if let Some(ref renter) = renter_id {
            count_query = count_query.filter(bookings::renter_id.eq(renter.as_str()));
        }

        if active_only {
            count_query = count_query.filter(bookings::status.ne(CANCELLED));
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = bookings::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(property) = property_id {
            items = items.filter(bookings::property_id.eq(property));
        }

        if let Some(ref renter) = renter_id {
            items = items.filter(bookings::renter_id.eq(renter.as_str()));
        }

        if active_only {
            items = items.filter(bookings::status.ne(CANCELLED));
        }

        items = items.order((bookings::created_at.desc(), bookings::id.desc()));

        if let Some(pagination) = pagination {
            items = items
                .offset(pagination.offset())
                .limit(pagination.limit());
        }

        let db_bookings = items.load::<DbBooking>(&mut conn)?;
        if db_bookings.is_empty() {
            return Ok((total, Vec::new()));
        }

        let booking_ids: Vec<i32> = db_bookings.iter().map(|booking| booking.id).collect();

        let mut extras_by_booking: HashMap<i32, Vec<DbBookingExtra>> = HashMap::new();
        let rows = booking_extras::table
            .filter(booking_extras::booking_id.eq_any(&booking_ids))
            .order(booking_extras::id.asc())
            .load::<DbBookingExtra>(&mut conn)?;
        for extra in rows {
            extras_by_booking
                .entry(extra.booking_id)
                .or_default()
                .push(extra);
        }

        let bookings = db_bookings
            .into_iter()
            .map(|booking| {
                let extras = extras_by_booking.remove(&booking.id).unwrap_or_default();
                DomainBooking::from((booking, extras))
            })
            .collect();

        Ok((total, bookings))
    }
}

impl BookingWriter for DieselRepository {
    fn create_booking(&self, new_booking: &DomainNewBooking) -> RepositoryResult<DomainBooking> {
        use crate::schema::{booking_extras, bookings};

        let mut conn = self.conn()?;

        conn.transaction::<DomainBooking, RepositoryError, _>(|conn| {
            // Stays overlap when each starts before the other ends.
            let overlapping = bookings::table
                .filter(bookings::property_id.eq(new_booking.property_id))
                .filter(bookings::status.ne(CANCELLED))
                .filter(bookings::check_in_date.lt(new_booking.check_out_date))
                .filter(bookings::check_out_date.gt(new_booking.check_in_date))
                .count()
                .get_result::<i64>(conn)?;

            if overlapping > 0 {
                return Err(RepositoryError::Conflict(format!(
                    "property {} is already booked between {} and {}",
                    new_booking.property_id, new_booking.check_in_date, new_booking.check_out_date
                )));
            }

            let db_new = DbNewBooking::from(new_booking);
            let created = diesel::insert_into(bookings::table)
                .values(&db_new)
                .get_result::<DbBooking>(conn)?;

            let booking_id = created.id;

            if !new_booking.extras.is_empty() {
                let payload: Vec<DbNewBookingExtra> = new_booking
                    .extras
                    .iter()
                    .map(|extra| DbNewBookingExtra::from_domain(booking_id, extra))
                    .collect();

                diesel::insert_into(booking_extras::table)
                    .values(&payload)
                    .execute(conn)?;
            }

            let extras = load_extras(conn, booking_id)?;
            Ok(DomainBooking::from((created, extras)))
        })
    }

    fn update_booking_status(
        &self,
        booking_id: i32,
        status: BookingStatus,
    ) -> RepositoryResult<DomainBooking> {
        use crate::schema::bookings;

        let mut conn = self.conn()?;

        let updated = diesel::update(bookings::table.filter(bookings::id.eq(booking_id)))
            .set(&DbUpdateBookingStatus::new(status))
            .get_result::<DbBooking>(&mut conn)?;

        let extras = load_extras(&mut conn, booking_id)?;
        Ok(DomainBooking::from((updated, extras)))
    }
}

fn load_extras(conn: &mut SqliteConnection, booking_id: i32) -> RepositoryResult<Vec<DbBookingExtra>> {
    use crate::schema::booking_extras;

    let rows = booking_extras::table
        .filter(booking_extras::booking_id.eq(booking_id))
        .order(booking_extras::id.asc())
        .load::<DbBookingExtra>(conn)?;

    Ok(rows)
}
