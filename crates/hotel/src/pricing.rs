//! Pricing rules for bookings.
//!
//! Money amounts are whole currency units. A booking's price is fixed at the
//! moment it is created from the cabin's nightly rate and discount.

use time::Date;

/// Flat nightly breakfast rate, charged per guest.
pub const BREAKFAST_PRICE: i64 = 15;

/// Whole days between the start and end dates. Inverted ranges yield a negative count.
pub fn num_nights(start: Date, end: Date) -> i64 {
    (end - start).whole_days()
}

pub fn cabin_price(num_nights: i64, regular_price: i64, discount: i64) -> i64 {
    num_nights * (regular_price - discount)
}

/// Breakfast charge for the whole stay, or zero when breakfast wasn't booked.
pub fn extras_price(num_nights: i64, num_guests: u32, has_breakfast: bool, breakfast_price: i64) -> i64 {
    if has_breakfast {
        num_nights * breakfast_price * i64::from(num_guests)
    } else {
        0
    }
}

/// All derived money fields of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceBreakdown {
    pub num_nights: i64,
    pub cabin_price: i64,
    pub extras_price: i64,
    pub total_price: i64,
}

impl PriceBreakdown {
    pub fn compute(
        start: Date,
        end: Date,
        regular_price: i64,
        discount: i64,
        num_guests: u32,
        has_breakfast: bool,
        breakfast_price: i64,
    ) -> Self {
        let num_nights = num_nights(start, end);
        let cabin_price = cabin_price(num_nights, regular_price, discount);
        let extras_price = extras_price(num_nights, num_guests, has_breakfast, breakfast_price);
        Self {
            num_nights,
            cabin_price,
            extras_price,
            total_price: cabin_price + extras_price,
        }
    }
}
