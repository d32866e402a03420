//! Turns booking seeds into rows ready for insertion.

use serde::Serialize;
use time::Date;
use tracing::warn;

use hotel::{BREAKFAST_PRICE, BookingStatus, PriceBreakdown, RecordId};

use super::status::{StatusPolicy, derive_status};
use crate::data::{BookingSeed, CabinSeed};

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Store-assigned identifiers of the seeded guests and cabins, by seed position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierMap {
    guests: Vec<RecordId>,
    cabins: Vec<RecordId>,
}

impl IdentifierMap {
    pub fn new(guests: Vec<RecordId>, cabins: Vec<RecordId>) -> Self {
        Self { guests, cabins }
    }

    /// Identifier of the guest at 1-based position `guest_ref`.
    pub fn guest(&self, guest_ref: usize) -> Option<RecordId> {
        guest_ref.checked_sub(1).and_then(|i| self.guests.get(i)).copied()
    }

    /// Identifier of the cabin at 1-based position `cabin_ref`.
    pub fn cabin(&self, cabin_ref: usize) -> Option<RecordId> {
        cabin_ref.checked_sub(1).and_then(|i| self.cabins.get(i)).copied()
    }

    pub fn guest_count(&self) -> usize {
        self.guests.len()
    }

    pub fn cabin_count(&self) -> usize {
        self.cabins.len()
    }
}

/// Options that shape derived booking fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    pub breakfast_price: i64,
    pub status_policy: StatusPolicy,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            breakfast_price: BREAKFAST_PRICE,
            status_policy: StatusPolicy::default(),
        }
    }
}

/// A booking row with derived fields and store identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedBooking {
    #[serde(with = "iso_date")]
    pub start_date: Date,
    #[serde(with = "iso_date")]
    pub end_date: Date,
    pub num_nights: i64,
    pub num_guests: u32,
    pub cabin_price: i64,
    pub extras_price: i64,
    pub total_price: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BookingStatus>,
    pub has_breakfast: bool,
    pub is_paid: bool,
    pub observations: &'static str,
    pub guest_id: Option<RecordId>,
    pub cabin_id: Option<RecordId>,
}

impl ResolvedBooking {
    pub fn is_resolved(&self) -> bool {
        self.guest_id.is_some() && self.cabin_id.is_some()
    }
}

/// Resolves every booking seed.
///
/// Prices use the cabin seed at `cabin_ref` (not the stored row). References
/// that fall outside `ids` are left as `None` and logged.
pub fn resolve_bookings(
    seeds: &[BookingSeed],
    cabins: &[CabinSeed],
    ids: &IdentifierMap,
    today: Date,
    options: &ResolveOptions,
) -> Vec<ResolvedBooking> {
    seeds
        .iter()
        .map(|seed| resolve_booking(seed, cabins, ids, today, options))
        .collect()
}

fn resolve_booking(
    seed: &BookingSeed,
    cabins: &[CabinSeed],
    ids: &IdentifierMap,
    today: Date,
    options: &ResolveOptions,
) -> ResolvedBooking {
    let (regular_price, discount) = match seed.cabin_ref.checked_sub(1).and_then(|i| cabins.get(i)) {
        Some(cabin) => (cabin.regular_price, cabin.discount),
        None => {
            warn!("No cabin seed at position {} for booking", seed.cabin_ref);
            (0, 0)
        }
    };
    let prices = PriceBreakdown::compute(
        seed.start_date,
        seed.end_date,
        regular_price,
        discount,
        seed.num_guests,
        seed.has_breakfast,
        options.breakfast_price,
    );

    let guest_id = ids.guest(seed.guest_ref);
    let cabin_id = ids.cabin(seed.cabin_ref);
    if guest_id.is_none() || cabin_id.is_none() {
        warn!(
            "Missing guestId or cabinId for booking (guest #{}, cabin #{}, {}..{})",
            seed.guest_ref, seed.cabin_ref, seed.start_date, seed.end_date
        );
    }

    ResolvedBooking {
        start_date: seed.start_date,
        end_date: seed.end_date,
        num_nights: prices.num_nights,
        num_guests: seed.num_guests,
        cabin_price: prices.cabin_price,
        extras_price: prices.extras_price,
        total_price: prices.total_price,
        status: derive_status(seed.start_date, seed.end_date, today, options.status_policy),
        has_breakfast: seed.has_breakfast,
        is_paid: seed.is_paid,
        observations: seed.observations,
        guest_id,
        cabin_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{SeedDataset, cabins};
    use time::Duration;
    use time::macros::date;

    const TODAY: Date = date!(2026 - 10 - 17);

    fn booking(guest_ref: usize, cabin_ref: usize) -> BookingSeed {
        BookingSeed {
            start_date: TODAY - Duration::days(1),
            end_date: TODAY + Duration::days(1),
            num_guests: 2,
            has_breakfast: true,
            is_paid: false,
            observations: "",
            guest_ref,
            cabin_ref,
        }
    }

    #[test]
    fn test_guest_ref_is_one_based() {
        let ids = IdentifierMap::new(
            vec![RecordId(10), RecordId(11), RecordId(12)],
            vec![RecordId(7)],
        );
        assert_eq!(ids.guest(2), Some(RecordId(11)));
        assert_eq!(ids.guest(0), None);
        assert_eq!(ids.guest(4), None);
        assert_eq!(ids.cabin(1), Some(RecordId(7)));

        let resolved = resolve_bookings(
            &[booking(2, 1)],
            cabins(),
            &ids,
            TODAY,
            &ResolveOptions::default(),
        );
        assert_eq!(resolved[0].guest_id, Some(RecordId(11)));
        assert_eq!(resolved[0].cabin_id, Some(RecordId(7)));
    }

    #[test]
    fn test_derived_fields_for_current_stay() {
        let ids = IdentifierMap::new(vec![RecordId(1), RecordId(2)], vec![RecordId(1)]);
        let resolved = resolve_bookings(
            &[booking(1, 1)],
            cabins(),
            &ids,
            TODAY,
            &ResolveOptions::default(),
        );
        let b = &resolved[0];
        assert_eq!(b.num_nights, 2);
        assert_eq!(b.cabin_price, 2 * 250);
        assert_eq!(b.extras_price, 60);
        assert_eq!(b.total_price, b.cabin_price + b.extras_price);
        assert_eq!(b.status, Some(BookingStatus::CheckedIn));
        assert!(b.is_resolved());
    }

    #[test]
    fn test_prices_follow_cabin_seed_for_whole_dataset() {
        let dataset = SeedDataset::builtin(TODAY);
        let ids = IdentifierMap::new(
            (1..=dataset.guests.len() as i64).map(RecordId).collect(),
            (1..=dataset.cabins.len() as i64).map(RecordId).collect(),
        );
        let resolved = resolve_bookings(
            &dataset.bookings,
            &dataset.cabins,
            &ids,
            TODAY,
            &ResolveOptions::default(),
        );
        for (seed, row) in dataset.bookings.iter().zip(&resolved) {
            let cabin = dataset.cabin(seed.cabin_ref).unwrap();
            assert_eq!(row.cabin_price, row.num_nights * (cabin.regular_price - cabin.discount));
            let expected_extras = if seed.has_breakfast {
                15 * row.num_nights * i64::from(seed.num_guests)
            } else {
                0
            };
            assert_eq!(row.extras_price, expected_extras);
            assert_eq!(row.total_price, row.cabin_price + row.extras_price);
            assert!(row.is_resolved());
        }
    }

    #[test]
    fn test_out_of_range_reference_is_left_unresolved() {
        let ids = IdentifierMap::new(vec![RecordId(1)], vec![RecordId(1)]);
        let resolved = resolve_bookings(
            &[booking(3, 1), booking(1, 9)],
            cabins(),
            &ids,
            TODAY,
            &ResolveOptions::default(),
        );
        assert_eq!(resolved[0].guest_id, None);
        assert_eq!(resolved[1].cabin_id, None);
        assert!(!resolved[0].is_resolved());
        assert!(!resolved[1].is_resolved());
    }

    #[test]
    fn test_breakfast_price_is_configurable() {
        let ids = IdentifierMap::new(vec![RecordId(1)], vec![RecordId(1)]);
        let options = ResolveOptions {
            breakfast_price: 20,
            ..ResolveOptions::default()
        };
        let resolved = resolve_bookings(&[booking(1, 1)], cabins(), &ids, TODAY, &options);
        assert_eq!(resolved[0].extras_price, 2 * 20 * 2);
    }

    #[test]
    fn test_row_uses_column_names_and_iso_dates() {
        let ids = IdentifierMap::new(vec![RecordId(5)], vec![RecordId(9)]);
        let resolved = resolve_bookings(
            &[booking(1, 1)],
            cabins(),
            &ids,
            TODAY,
            &ResolveOptions::default(),
        );
        let value = serde_json::to_value(&resolved[0]).unwrap();
        assert_eq!(value["startDate"], "2026-10-16");
        assert_eq!(value["endDate"], "2026-10-18");
        assert_eq!(value["guestId"], 5);
        assert_eq!(value["cabinId"], 9);
        assert_eq!(value["status"], "checked-in");
        assert_eq!(value["totalPrice"], 560);
    }
}
