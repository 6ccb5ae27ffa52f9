// Booking operations: creation (internal and owner-facing), field-level
// merge updates, and status transitions. Bookings are never hard-deleted in
// the normal flow; terminal states are expressed through status.

use chrono::{NaiveDate, Utc};

use crate::models::{Booking, BookingSource, BookingStatus};
use crate::storage::{read_collection, write_collection, KeyValueStore};

pub const BOOKINGS_COLLECTION: &str = "bookings";

pub fn list_bookings(store: &dyn KeyValueStore, tenant_id: &str) -> Vec<Booking> {
    read_collection::<Booking>(store, BOOKINGS_COLLECTION)
        .into_iter()
        .filter(|b| b.tenant_id == tenant_id)
        .collect()
}

pub fn find_booking(store: &dyn KeyValueStore, tenant_id: &str, id: &str) -> Option<Booking> {
    read_collection::<Booking>(store, BOOKINGS_COLLECTION)
        .into_iter()
        .find(|b| b.tenant_id == tenant_id && b.id == id)
}

// Input for internally created bookings (admin UI).
#[derive(Debug, Clone, Default)]
pub struct BookingDraft {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub owner_name: String,
    pub owner_email: String,
    pub owner_phone: String,
    pub pet_name: String,
    pub pet_count: u32,
    pub note: String,
    pub care_instructions: String,
    pub source: BookingSource,
}

// Raw owner-facing form submission. The public form delivers the count as
// free text, so it is coerced here rather than rejected.
#[derive(Debug, Clone, Default)]
pub struct OwnerBookingForm {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub owner_name: String,
    pub owner_email: String,
    pub owner_phone: String,
    pub pet_name: String,
    pub pet_count: String,
    pub note: String,
}

// Field-level merge payload; `None` leaves the stored field untouched.
#[derive(Debug, Clone, Default)]
pub struct BookingPatch {
    pub status: Option<BookingStatus>,
    pub source: Option<BookingSource>,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub owner_name: Option<String>,
    pub owner_email: Option<String>,
    pub owner_phone: Option<String>,
    pub pet_name: Option<String>,
    pub pet_count: Option<u32>,
    pub note: Option<String>,
    pub care_instructions: Option<String>,
}

impl BookingPatch {
    fn apply(self, booking: &mut Booking) {
        if let Some(status) = self.status {
            booking.status = status;
        }
        if let Some(source) = self.source {
            booking.source = source;
        }
        if let Some(check_in) = self.check_in {
            booking.check_in = check_in;
        }
        if let Some(check_out) = self.check_out {
            booking.check_out = check_out;
        }
        if let Some(owner_name) = self.owner_name {
            booking.owner_name = owner_name;
        }
        if let Some(owner_email) = self.owner_email {
            booking.owner_email = owner_email;
        }
        if let Some(owner_phone) = self.owner_phone {
            booking.owner_phone = owner_phone;
        }
        if let Some(pet_name) = self.pet_name {
            booking.pet_name = pet_name;
        }
        if let Some(pet_count) = self.pet_count {
            booking.pet_count = pet_count;
        }
        if let Some(note) = self.note {
            booking.note = note;
        }
        if let Some(care_instructions) = self.care_instructions {
            booking.care_instructions = care_instructions;
        }
    }
}

// Creates a booking with a fresh id and timestamp. New bookings always start
// as Pending.
pub fn create_booking(store: &dyn KeyValueStore, tenant_id: &str, draft: BookingDraft) -> Booking {
    let booking = Booking {
        id: crate::models::new_id("booking"),
        tenant_id: tenant_id.to_string(),
        status: BookingStatus::Pending,
        source: draft.source,
        created_at: Utc::now(),
        check_in: draft.check_in,
        check_out: draft.check_out,
        owner_name: draft.owner_name,
        owner_email: draft.owner_email,
        owner_phone: draft.owner_phone,
        pet_name: draft.pet_name,
        pet_count: draft.pet_count.max(1),
        note: draft.note,
        care_instructions: draft.care_instructions,
    };

    let mut all = read_collection::<Booking>(store, BOOKINGS_COLLECTION);
    all.push(booking.clone());
    write_collection(store, BOOKINGS_COLLECTION, &all);

    booking
}

// Owner-facing submission path: always Pending, always source Owner, and
// the free-text count falls back to 1 when unparsable or zero.
pub fn submit_owner_request(
    store: &dyn KeyValueStore,
    tenant_id: &str,
    form: OwnerBookingForm,
) -> Booking {
    let pet_count = form.pet_count.trim().parse::<u32>().unwrap_or(1).max(1);

    create_booking(
        store,
        tenant_id,
        BookingDraft {
            check_in: form.check_in,
            check_out: form.check_out,
            owner_name: form.owner_name,
            owner_email: form.owner_email,
            owner_phone: form.owner_phone,
            pet_name: form.pet_name,
            pet_count,
            note: form.note,
            care_instructions: String::new(),
            source: BookingSource::Owner,
        },
    )
}

// Merge the patch into the booking with the given id; when the id is absent
// a fresh record carrying that id is materialized instead (upsert).
pub fn update_booking(
    store: &dyn KeyValueStore,
    tenant_id: &str,
    id: &str,
    patch: BookingPatch,
) -> Booking {
    let mut all = read_collection::<Booking>(store, BOOKINGS_COLLECTION);

    let updated = match all
        .iter_mut()
        .find(|b| b.tenant_id == tenant_id && b.id == id)
    {
        Some(existing) => {
            patch.apply(existing);
            existing.clone()
        }
        None => {
            let mut booking = Booking {
                id: id.to_string(),
                tenant_id: tenant_id.to_string(),
                created_at: Utc::now(),
                pet_count: 1,
                ..Booking::default()
            };
            patch.apply(&mut booking);
            all.push(booking.clone());
            booking
        }
    };

    write_collection(store, BOOKINGS_COLLECTION, &all);
    updated
}

pub fn set_booking_status(
    store: &dyn KeyValueStore,
    tenant_id: &str,
    id: &str,
    status: BookingStatus,
) -> Option<Booking> {
    let mut all = read_collection::<Booking>(store, BOOKINGS_COLLECTION);
    let booking = all
        .iter_mut()
        .find(|b| b.tenant_id == tenant_id && b.id == id)?;

    booking.status = status;
    let updated = booking.clone();
    write_collection(store, BOOKINGS_COLLECTION, &all);

    Some(updated)
}

// Accepting a booking moves it into Precheck, the only booking state that
// counts toward capacity.
pub fn accept_booking(store: &dyn KeyValueStore, tenant_id: &str, id: &str) -> Option<Booking> {
    set_booking_status(store, tenant_id, id, BookingStatus::Precheck)
}

pub fn cancel_booking(store: &dyn KeyValueStore, tenant_id: &str, id: &str) -> Option<Booking> {
    set_booking_status(store, tenant_id, id, BookingStatus::Cancelled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_create_booking_defaults() {
        let store = MemoryStore::new();
        let booking = create_booking(
            &store,
            "t1",
            BookingDraft {
                check_in: date("2024-03-01"),
                check_out: date("2024-03-05"),
                owner_name: "Ada".to_string(),
                pet_name: "Whiskers".to_string(),
                pet_count: 2,
                ..Default::default()
            },
        );

        assert!(booking.id.starts_with("booking-"));
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.source, BookingSource::Internal);
        assert_eq!(booking.pet_count, 2);

        let found = find_booking(&store, "t1", &booking.id).unwrap();
        assert_eq!(found.owner_name, "Ada");
    }

    #[test]
    fn test_owner_request_coerces_count() {
        let store = MemoryStore::new();
        let booking = submit_owner_request(
            &store,
            "t1",
            OwnerBookingForm {
                check_in: date("2024-03-01"),
                check_out: date("2024-03-03"),
                owner_name: "Grace".to_string(),
                pet_count: "lots".to_string(),
                ..Default::default()
            },
        );

        assert_eq!(booking.pet_count, 1);
        assert_eq!(booking.source, BookingSource::Owner);
        assert_eq!(booking.status, BookingStatus::Pending);

        let parsed = submit_owner_request(
            &store,
            "t1",
            OwnerBookingForm {
                pet_count: " 3 ".to_string(),
                ..Default::default()
            },
        );
        assert_eq!(parsed.pet_count, 3);
    }

    #[test]
    fn test_update_merges_only_set_fields() {
        let store = MemoryStore::new();
        let booking = create_booking(
            &store,
            "t1",
            BookingDraft {
                owner_name: "Ada".to_string(),
                note: "window seat".to_string(),
                pet_count: 2,
                ..Default::default()
            },
        );

        let updated = update_booking(
            &store,
            "t1",
            &booking.id,
            BookingPatch {
                note: Some("quiet corner".to_string()),
                ..Default::default()
            },
        );

        assert_eq!(updated.note, "quiet corner");
        assert_eq!(updated.owner_name, "Ada");
        assert_eq!(updated.pet_count, 2);
    }

    #[test]
    fn test_update_upserts_missing_id() {
        let store = MemoryStore::new();
        let updated = update_booking(
            &store,
            "t1",
            "booking-import-7",
            BookingPatch {
                owner_name: Some("Imported".to_string()),
                ..Default::default()
            },
        );

        assert_eq!(updated.id, "booking-import-7");
        assert_eq!(updated.status, BookingStatus::Pending);
        assert!(find_booking(&store, "t1", "booking-import-7").is_some());
    }

    #[test]
    fn test_accept_and_cancel_transitions() {
        let store = MemoryStore::new();
        let booking = create_booking(&store, "t1", BookingDraft::default());

        let accepted = accept_booking(&store, "t1", &booking.id).unwrap();
        assert_eq!(accepted.status, BookingStatus::Precheck);

        let cancelled = cancel_booking(&store, "t1", &booking.id).unwrap();
        assert_eq!(cancelled.status, BookingStatus::Cancelled);

        assert!(accept_booking(&store, "t1", "booking-nope").is_none());
    }

    #[test]
    fn test_listing_is_tenant_scoped() {
        let store = MemoryStore::new();
        create_booking(&store, "t1", BookingDraft::default());
        create_booking(&store, "t2", BookingDraft::default());

        assert_eq!(list_bookings(&store, "t1").len(), 1);
        assert_eq!(list_bookings(&store, "t2").len(), 1);
        assert!(list_bookings(&store, "t3").is_empty());
    }
}
