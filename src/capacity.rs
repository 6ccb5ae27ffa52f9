// Capacity calculator: daily occupancy derived by scanning the stay and
// booking collections. A booking counts only while it is in Precheck; once
// converted, the stay counts instead (until checked out), so the same
// reservation is never counted twice on one day.

use chrono::NaiveDate;

use crate::bookings;
use crate::models::{effective_pet_count, Booking, BookingStatus, CapacityDay, Stay, StayStatus};
use crate::stays;
use crate::storage::KeyValueStore;

// Fixed daily capacity. Deliberately a constant rather than per-tenant
// configuration.
pub const DAILY_CAPACITY: u32 = 6;

// Half-open interval check: the checkout day itself is not occupied.
fn interval_contains(check_in: NaiveDate, check_out: NaiveDate, day: NaiveDate) -> bool {
    check_in <= day && day < check_out
}

fn booked_on_day(stays: &[Stay], bookings: &[Booking], day: NaiveDate) -> u32 {
    let from_stays: u32 = stays
        .iter()
        .filter(|s| s.status != StayStatus::CheckedOut)
        .filter(|s| interval_contains(s.check_in, s.check_out, day))
        .map(|s| effective_pet_count(s.pet_count))
        .sum();

    let from_bookings: u32 = bookings
        .iter()
        .filter(|b| b.status == BookingStatus::Precheck)
        .filter(|b| interval_contains(b.check_in, b.check_out, day))
        .map(|b| effective_pet_count(b.pet_count))
        .sum();

    from_stays + from_bookings
}

// One CapacityDay per calendar day in [start, end] inclusive. The booked
// count is capped at DAILY_CAPACITY so the free count never goes negative.
pub fn capacity_for_range(
    store: &dyn KeyValueStore,
    tenant_id: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<CapacityDay> {
    let stays = stays::list_stays(store, tenant_id);
    let bookings = bookings::list_bookings(store, tenant_id);

    start
        .iter_days()
        .take_while(|day| *day <= end)
        .map(|day| {
            let booked = booked_on_day(&stays, &bookings, day).min(DAILY_CAPACITY);
            CapacityDay {
                date: day,
                booked,
                capacity: DAILY_CAPACITY,
                free: DAILY_CAPACITY - booked,
            }
        })
        .collect()
}

// Admission gate used before accepting a booking: true iff the candidate's
// pet count fits on every day of its half-open range. The check uses the
// uncapped sum, so an already-overbooked day rejects any further candidate.
pub fn has_capacity_for_booking(
    store: &dyn KeyValueStore,
    tenant_id: &str,
    candidate: &Booking,
) -> bool {
    let stays = stays::list_stays(store, tenant_id);
    let bookings = bookings::list_bookings(store, tenant_id);
    let wanted = effective_pet_count(candidate.pet_count);

    candidate
        .check_in
        .iter_days()
        .take_while(|day| *day < candidate.check_out)
        .all(|day| booked_on_day(&stays, &bookings, day) + wanted <= DAILY_CAPACITY)
}
