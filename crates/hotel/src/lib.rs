//! Domain vocabulary shared by the Wild Oasis admin tooling.
//!
//! The hosted database stores three collections (guests, cabins and bookings).
//! This crate names them, defines the booking lifecycle status, and holds the
//! pricing rules used whenever a booking's derived fields are computed.

pub mod models;
pub mod pricing;

pub use models::{BookingStatus, Collection, RecordId};
pub use pricing::{BREAKFAST_PRICE, PriceBreakdown};
