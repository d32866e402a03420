//! Compiled-in sample data.
//!
//! Guests and cabins have no identifiers of their own: a booking refers to
//! them by 1-based position in these sequences. Booking dates are kept as day
//! offsets from "today" so the sample always contains past, current and
//! upcoming stays.

mod bookings;
mod cabins;
mod guests;

use serde::Serialize;
use time::Date;

pub use bookings::bookings;
pub use cabins::cabins;
pub use guests::guests;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestSeed {
    pub full_name: &'static str,
    pub email: &'static str,
    #[serde(rename = "nationalID", skip_serializing_if = "Option::is_none")]
    pub national_id: Option<&'static str>,
    pub nationality: &'static str,
    pub country_flag: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CabinSeed {
    pub name: &'static str,
    pub max_capacity: u32,
    pub regular_price: i64,
    pub discount: i64,
    pub description: &'static str,
    pub image: &'static str,
}

/// A booking before its references are resolved against the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingSeed {
    pub start_date: Date,
    pub end_date: Date,
    pub num_guests: u32,
    pub has_breakfast: bool,
    pub is_paid: bool,
    pub observations: &'static str,
    /// 1-based position in the guest sequence.
    pub guest_ref: usize,
    /// 1-based position in the cabin sequence.
    pub cabin_ref: usize,
}

/// The three sequences uploaded together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedDataset {
    pub guests: Vec<GuestSeed>,
    pub cabins: Vec<CabinSeed>,
    pub bookings: Vec<BookingSeed>,
}

impl SeedDataset {
    /// The bundled sample data, with booking dates anchored at `today`.
    pub fn builtin(today: Date) -> Self {
        Self {
            guests: guests().to_vec(),
            cabins: cabins().to_vec(),
            bookings: bookings(today),
        }
    }

    /// Looks up a cabin by 1-based position.
    pub fn cabin(&self, cabin_ref: usize) -> Option<&CabinSeed> {
        cabin_ref.checked_sub(1).and_then(|i| self.cabins.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_builtin_references_are_in_range() {
        let dataset = SeedDataset::builtin(date!(2026 - 10 - 17));
        assert!(!dataset.bookings.is_empty());
        for booking in &dataset.bookings {
            assert!((1..=dataset.guests.len()).contains(&booking.guest_ref));
            assert!((1..=dataset.cabins.len()).contains(&booking.cabin_ref));
            assert!(booking.start_date <= booking.end_date);
            let cabin = dataset.cabin(booking.cabin_ref).unwrap();
            assert!(booking.num_guests <= cabin.max_capacity);
        }
    }

    #[test]
    fn test_cabin_lookup_is_one_based() {
        let dataset = SeedDataset::builtin(date!(2026 - 10 - 17));
        assert_eq!(dataset.cabin(1).unwrap().name, "001");
        assert!(dataset.cabin(0).is_none());
        assert!(dataset.cabin(dataset.cabins.len() + 1).is_none());
    }

    #[test]
    fn test_guest_serializes_with_column_names() {
        let value = serde_json::to_value(&guests()[0]).unwrap();
        assert!(value.get("fullName").is_some());
        assert!(value.get("nationalID").is_some());
        assert!(value.get("countryFlag").is_some());

        let without = GuestSeed {
            national_id: None,
            ..guests()[0].clone()
        };
        let value = serde_json::to_value(&without).unwrap();
        assert!(value.get("nationalID").is_none());
    }

    #[test]
    fn test_cabin_serializes_with_column_names() {
        let value = serde_json::to_value(&cabins()[0]).unwrap();
        assert_eq!(value["maxCapacity"], 2);
        assert!(value.get("regularPrice").is_some());
    }
}
