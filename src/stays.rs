// Stay (check-in) operations. A stay is created from an accepted booking and
// carries a copy of its fields; while a stay is not checked out it is the
// record that counts toward capacity, not the source booking.

use chrono::NaiveDate;
use tracing::warn;

use crate::bookings;
use crate::models::{Booking, BookingStatus, Stay, StayStatus};
use crate::storage::{read_collection, write_collection, KeyValueStore};

pub const STAYS_COLLECTION: &str = "checkins";

pub fn list_stays(store: &dyn KeyValueStore, tenant_id: &str) -> Vec<Stay> {
    read_collection::<Stay>(store, STAYS_COLLECTION)
        .into_iter()
        .filter(|s| s.tenant_id == tenant_id)
        .collect()
}

pub fn find_stay(store: &dyn KeyValueStore, tenant_id: &str, id: &str) -> Option<Stay> {
    read_collection::<Stay>(store, STAYS_COLLECTION)
        .into_iter()
        .find(|s| s.tenant_id == tenant_id && s.id == id)
}

#[derive(Debug, Clone, Default)]
pub struct StayPatch {
    pub status: Option<StayStatus>,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub cage_id: Option<Option<String>>,
    pub pet_count: Option<u32>,
    pub note: Option<String>,
    pub care_instructions: Option<String>,
}

impl StayPatch {
    fn apply(self, stay: &mut Stay) {
        if let Some(status) = self.status {
            stay.status = status;
        }
        if let Some(check_in) = self.check_in {
            stay.check_in = check_in;
        }
        if let Some(check_out) = self.check_out {
            stay.check_out = check_out;
        }
        if let Some(cage_id) = self.cage_id {
            stay.cage_id = cage_id;
        }
        if let Some(pet_count) = self.pet_count {
            stay.pet_count = pet_count;
        }
        if let Some(note) = self.note {
            stay.note = note;
        }
        if let Some(care_instructions) = self.care_instructions {
            stay.care_instructions = care_instructions;
        }
    }
}

// Convert an accepted booking into a stay. Two-write contract: the stays
// collection is written first, and only after that write succeeds is the
// source booking flipped to Converted. A lost second write leaves the
// booking in its prior status; the warn below carries both ids so the flip
// can be re-run manually. There is no transaction across keys.
//
// Returns None when the booking does not exist for this tenant.
pub fn create_checkin_from_booking(
    store: &dyn KeyValueStore,
    tenant_id: &str,
    booking_id: &str,
) -> Option<Stay> {
    let booking = bookings::find_booking(store, tenant_id, booking_id)?;
    let stay = stay_from_booking(&booking);

    let mut all = read_collection::<Stay>(store, STAYS_COLLECTION);
    all.push(stay.clone());
    let stay_written = write_collection(store, STAYS_COLLECTION, &all);

    if stay_written {
        let flipped =
            bookings::set_booking_status(store, tenant_id, booking_id, BookingStatus::Converted);
        if flipped.is_none() {
            warn!(
                booking_id = %booking_id,
                stay_id = %stay.id,
                "stay created but booking could not be marked converted"
            );
        }
    } else {
        warn!(
            booking_id = %booking_id,
            stay_id = %stay.id,
            "stay write failed, booking left unconverted"
        );
    }

    Some(stay)
}

fn stay_from_booking(booking: &Booking) -> Stay {
    Stay {
        id: crate::models::new_id("stay"),
        booking_id: booking.id.clone(),
        tenant_id: booking.tenant_id.clone(),
        status: StayStatus::CheckedIn,
        source: booking.source,
        created_at: booking.created_at,
        check_in: booking.check_in,
        check_out: booking.check_out,
        cage_id: None,
        owner_name: booking.owner_name.clone(),
        owner_email: booking.owner_email.clone(),
        owner_phone: booking.owner_phone.clone(),
        pet_name: booking.pet_name.clone(),
        pet_count: booking.pet_count,
        note: booking.note.clone(),
        care_instructions: booking.care_instructions.clone(),
    }
}

// Merge-or-upsert, same contract as bookings::update_booking.
pub fn update_stay(store: &dyn KeyValueStore, tenant_id: &str, id: &str, patch: StayPatch) -> Stay {
    let mut all = read_collection::<Stay>(store, STAYS_COLLECTION);

    let updated = match all
        .iter_mut()
        .find(|s| s.tenant_id == tenant_id && s.id == id)
    {
        Some(existing) => {
            patch.apply(existing);
            existing.clone()
        }
        None => {
            let mut stay = Stay {
                id: id.to_string(),
                tenant_id: tenant_id.to_string(),
                created_at: chrono::Utc::now(),
                pet_count: 1,
                ..Stay::default()
            };
            patch.apply(&mut stay);
            all.push(stay.clone());
            stay
        }
    };

    write_collection(store, STAYS_COLLECTION, &all);
    updated
}

// Checked-out stays stop counting toward capacity for good.
pub fn check_out_stay(store: &dyn KeyValueStore, tenant_id: &str, id: &str) -> Option<Stay> {
    let mut all = read_collection::<Stay>(store, STAYS_COLLECTION);
    let stay = all
        .iter_mut()
        .find(|s| s.tenant_id == tenant_id && s.id == id)?;

    stay.status = StayStatus::CheckedOut;
    let updated = stay.clone();
    write_collection(store, STAYS_COLLECTION, &all);

    Some(updated)
}

// Narrow field update for cage (re)assignment; None clears the assignment.
pub fn assign_cage(
    store: &dyn KeyValueStore,
    tenant_id: &str,
    stay_id: &str,
    cage_id: Option<&str>,
) -> Option<Stay> {
    let mut all = read_collection::<Stay>(store, STAYS_COLLECTION);
    let stay = all
        .iter_mut()
        .find(|s| s.tenant_id == tenant_id && s.id == stay_id)?;

    stay.cage_id = cage_id.map(str::to_string);
    let updated = stay.clone();
    write_collection(store, STAYS_COLLECTION, &all);

    Some(updated)
}
