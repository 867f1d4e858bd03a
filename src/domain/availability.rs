use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::booking::Booking;
use crate::domain::pricing::DateRange;

/// Anything that occupies a property for a range of nights.
pub trait Occupancy {
    fn occupied_range(&self) -> DateRange;
}

impl Occupancy for DateRange {
    fn occupied_range(&self) -> DateRange {
        *self
    }
}

impl Occupancy for Booking {
    fn occupied_range(&self) -> DateRange {
        DateRange::new(self.check_in_date, self.check_out_date)
    }
}

/// Calendar dates that can no longer be picked for a new stay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BlockedDates(BTreeSet<NaiveDate>);

impl BlockedDates {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.0.contains(&date)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Blocked dates in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &NaiveDate> {
        self.0.iter()
    }

    /// Whether any night of `range` is already taken.
    pub fn conflicts_with(&self, range: &DateRange) -> bool {
        if !range.is_valid() {
            return false;
        }
        self.0.range(range.check_in..range.check_out).next().is_some()
    }
}

impl FromIterator<NaiveDate> for BlockedDates {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for BlockedDates {
    type Item = NaiveDate;
    type IntoIter = std::collections::btree_set::IntoIter<NaiveDate>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Dates occupied by existing stays.
///
/// Each stay blocks `[check_in, check_out)`; the check-out day remains free
/// for the next guest. Overlapping stays collapse into one set.
pub fn compute_blocked_dates<T: Occupancy>(bookings: &[T]) -> BlockedDates {
    bookings
        .iter()
        .flat_map(|booking| booking.occupied_range().night_dates())
        .collect()
}

/// Whether `date` may be chosen in the date picker.
pub fn is_date_selectable(date: NaiveDate, today: NaiveDate, blocked: &BlockedDates) -> bool {
    date >= today && !blocked.contains(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn no_bookings_block_nothing() {
        let blocked = compute_blocked_dates::<DateRange>(&[]);

        assert!(blocked.is_empty());
    }

    #[test]
    fn single_booking_excludes_check_out_day() {
        let bookings = [DateRange::new(date(2025, 6, 1), date(2025, 6, 4))];

        let blocked = compute_blocked_dates(&bookings);

        let dates: Vec<NaiveDate> = blocked.into_iter().collect();
        assert_eq!(
            dates,
            vec![date(2025, 6, 1), date(2025, 6, 2), date(2025, 6, 3)]
        );
    }

    #[test]
    fn overlapping_bookings_are_merged() {
        let bookings = [
            DateRange::new(date(2025, 7, 1), date(2025, 7, 3)),
            DateRange::new(date(2025, 7, 2), date(2025, 7, 5)),
        ];

        let blocked = compute_blocked_dates(&bookings);

        let dates: Vec<NaiveDate> = blocked.iter().copied().collect();
        assert_eq!(
            dates,
            vec![
                date(2025, 7, 1),
                date(2025, 7, 2),
                date(2025, 7, 3),
                date(2025, 7, 4)
            ]
        );
        assert!(!blocked.contains(date(2025, 7, 5)));
    }

    #[test]
    fn degenerate_bookings_block_nothing() {
        let bookings = [
            DateRange::new(date(2025, 7, 3), date(2025, 7, 3)),
            DateRange::new(date(2025, 7, 9), date(2025, 7, 4)),
        ];

        assert!(compute_blocked_dates(&bookings).is_empty());
    }

    #[test]
    fn back_to_back_stays_do_not_conflict() {
        let blocked = compute_blocked_dates(&[DateRange::new(date(2025, 6, 1), date(2025, 6, 4))]);

        assert!(!blocked.conflicts_with(&DateRange::new(date(2025, 6, 4), date(2025, 6, 6))));
        assert!(!blocked.conflicts_with(&DateRange::new(date(2025, 5, 28), date(2025, 6, 1))));
        assert!(blocked.conflicts_with(&DateRange::new(date(2025, 5, 30), date(2025, 6, 2))));
        assert!(blocked.conflicts_with(&DateRange::new(date(2025, 6, 3), date(2025, 6, 10))));
    }

    #[test]
    fn past_and_blocked_dates_are_not_selectable() {
        let today = date(2025, 6, 10);
        let blocked = compute_blocked_dates(&[DateRange::new(date(2025, 6, 12), date(2025, 6, 13))]);

        assert!(!is_date_selectable(date(2025, 6, 9), today, &blocked));
        assert!(is_date_selectable(today, today, &blocked));
        assert!(!is_date_selectable(date(2025, 6, 12), today, &blocked));
        assert!(is_date_selectable(date(2025, 6, 13), today, &blocked));
    }

    #[test]
    fn blocked_dates_serialize_as_sorted_list() {
        let blocked = compute_blocked_dates(&[
            DateRange::new(date(2025, 6, 20), date(2025, 6, 21)),
            DateRange::new(date(2025, 6, 1), date(2025, 6, 2)),
        ]);

        let value = serde_json::to_value(&blocked).unwrap();

        assert_eq!(value, serde_json::json!(["2025-06-01", "2025-06-20"]));
    }
}
