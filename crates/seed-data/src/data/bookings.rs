use time::{Date, Duration};

use super::BookingSeed;

/// Booking with dates expressed as day offsets from "today".
struct BookingTemplate {
    start: i64,
    end: i64,
    num_guests: u32,
    has_breakfast: bool,
    is_paid: bool,
    observations: &'static str,
    guest_ref: usize,
    cabin_ref: usize,
}

const fn stay(
    start: i64,
    end: i64,
    num_guests: u32,
    has_breakfast: bool,
    is_paid: bool,
    guest_ref: usize,
    cabin_ref: usize,
) -> BookingTemplate {
    BookingTemplate {
        start,
        end,
        num_guests,
        has_breakfast,
        is_paid,
        observations: "",
        guest_ref,
        cabin_ref,
    }
}

const TEMPLATES: &[BookingTemplate] = &[
    // Cabin 001
    BookingTemplate {
        observations: "I have a gluten allergy and would like to request a gluten-free breakfast.",
        ..stay(-20, -13, 1, true, false, 2, 1)
    },
    stay(-33, -23, 2, true, true, 3, 1),
    stay(12, 18, 2, false, false, 4, 1),
    // Cabin 002
    stay(-45, -29, 2, false, true, 5, 2),
    stay(15, 18, 2, true, true, 6, 2),
    stay(33, 48, 2, true, false, 7, 2),
    // Cabin 003
    stay(-6, 0, 2, true, true, 8, 3),
    BookingTemplate {
        observations: "We will be bringing our small dog with us",
        ..stay(0, 7, 4, true, true, 9, 3)
    },
    stay(-2, 3, 1, false, true, 10, 3),
    // Cabin 004
    stay(-8, 2, 4, true, false, 11, 4),
    stay(30, 35, 3, true, true, 12, 4),
    // Cabin 005
    stay(-10, -6, 4, true, true, 13, 5),
    stay(4, 8, 5, false, true, 14, 5),
    // Cabin 006
    stay(-16, -9, 6, false, true, 15, 6),
    stay(-7, 1, 4, true, false, 16, 6),
    // Cabin 007
    stay(18, 26, 8, true, true, 1, 7),
    // Cabin 008
    BookingTemplate {
        observations: "Our party is celebrating a birthday and would like a late check-out.",
        ..stay(-4, 4, 9, true, true, 2, 8)
    },
    stay(45, 49, 10, false, false, 3, 8),
];

/// The sample bookings, with dates anchored at `today`.
pub fn bookings(today: Date) -> Vec<BookingSeed> {
    TEMPLATES
        .iter()
        .map(|t| BookingSeed {
            start_date: today.saturating_add(Duration::days(t.start)),
            end_date: today.saturating_add(Duration::days(t.end)),
            num_guests: t.num_guests,
            has_breakfast: t.has_breakfast,
            is_paid: t.is_paid,
            observations: t.observations,
            guest_ref: t.guest_ref,
            cabin_ref: t.cabin_ref,
        })
        .collect()
}
