use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier assigned by the record store when a row is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl RecordId {
    /// Lower bound used by "delete everything" predicates; every assigned id exceeds it.
    pub const FLOOR: RecordId = RecordId(0);
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Named collections held by the record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Guests,
    Cabins,
    Bookings,
}

impl Collection {
    /// Bookings reference guests and cabins, so they go first.
    pub const DELETE_ORDER: [Collection; 3] =
        [Collection::Bookings, Collection::Guests, Collection::Cabins];

    /// Table name on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Collection::Guests => "guests",
            Collection::Cabins => "cabins",
            Collection::Bookings => "bookings",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BookingStatus {
    Unconfirmed,
    CheckedIn,
    CheckedOut,
}

impl BookingStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Unconfirmed => "unconfirmed",
            BookingStatus::CheckedIn => "checked-in",
            BookingStatus::CheckedOut => "checked-out",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names() {
        for status in [
            BookingStatus::Unconfirmed,
            BookingStatus::CheckedIn,
            BookingStatus::CheckedOut,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
            assert_eq!(serde_json::from_str::<BookingStatus>(&json).unwrap(), status);
        }
    }

    #[test]
    fn test_status_rejects_unknown_wire_name() {
        assert!(serde_json::from_str::<BookingStatus>("\"checked_in\"").is_err());
    }

    #[test]
    fn test_delete_order_removes_bookings_first() {
        assert_eq!(
            Collection::DELETE_ORDER,
            [Collection::Bookings, Collection::Guests, Collection::Cabins]
        );
        assert_eq!(Collection::Guests.to_string(), "guests");
    }

    #[test]
    fn test_record_id_is_transparent() {
        assert_eq!(serde_json::to_string(&RecordId(42)).unwrap(), "42");
        assert!(RecordId(1) > RecordId::FLOOR);
    }
}
