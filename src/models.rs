// Domain records for the cattery ledger. Everything here serializes to the
// persisted JSON shapes; `#[serde(default)]` keeps records written by older
// key versions loadable.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// Booking lifecycle. Closed enumeration with an explicit catch-all so that
// legacy or foreign status strings load as `Unknown` instead of failing the
// whole collection read. `Unknown` never counts toward capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    #[default]
    Pending,
    Precheck,
    Converted,
    Cancelled,
    Archived,
    CheckedIn,
    CheckedOut,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StayStatus {
    #[default]
    CheckedIn,
    CheckedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingSource {
    Owner,
    #[default]
    Internal,
    Other,
}

// A reservation request. Check-in/check-out use half-open interval
// semantics: the checkout day itself is not occupied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Booking {
    pub id: String,
    pub tenant_id: String,
    pub status: BookingStatus,
    pub source: BookingSource,
    pub created_at: DateTime<Utc>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub owner_name: String,
    pub owner_email: String,
    pub owner_phone: String,
    pub pet_name: String,
    pub pet_count: u32,
    pub note: String,
    pub care_instructions: String,
}

// An active or completed physical occupancy, created from an accepted
// booking. Carries a copy of the booking fields plus the cage assignment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Stay {
    pub id: String,
    pub booking_id: String,
    pub tenant_id: String,
    pub status: StayStatus,
    pub source: BookingSource,
    pub created_at: DateTime<Utc>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub cage_id: Option<String>,
    pub owner_name: String,
    pub owner_email: String,
    pub owner_phone: String,
    pub pet_name: String,
    pub pet_count: u32,
    pub note: String,
    pub care_instructions: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Cage {
    pub id: String,
    pub tenant_id: String,
    pub name: String,
    pub size: Option<String>,
    pub location: Option<String>,
    pub note: Option<String>,
}

// Per-tenant business metadata and editable marketing copy. Empty fields are
// backfilled from the hard-coded default on load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KennelProfile {
    pub id: String,
    pub business_name: String,
    pub tagline: String,
    pub about_text: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

// Derived daily occupancy summary; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CapacityDay {
    pub date: NaiveDate,
    pub booked: u32,
    pub capacity: u32,
    pub free: u32,
}

pub fn new_id(prefix: &str) -> String {
    format!("{}-{:08x}", prefix, rand::random::<u32>())
}

// Occupancy contribution of a record: stored counts of zero (patched or
// legacy data) still mean one cat.
pub fn effective_pet_count(pet_count: u32) -> u32 {
    pet_count.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_snake_case() {
        let raw = serde_json::to_string(&BookingStatus::CheckedIn).unwrap();
        assert_eq!(raw, "\"checked_in\"");
    }

    #[test]
    fn test_unknown_status_round_trips_to_unknown() {
        let status: BookingStatus = serde_json::from_str("\"waitlisted\"").unwrap();
        assert_eq!(status, BookingStatus::Unknown);
    }

    #[test]
    fn test_booking_loads_with_missing_fields() {
        // A record written before care_instructions existed.
        let raw = r#"{"id":"booking-1","tenant_id":"t1","status":"pending","check_in":"2024-01-10","check_out":"2024-01-12"}"#;
        let booking: Booking = serde_json::from_str(raw).unwrap();
        assert_eq!(booking.id, "booking-1");
        assert_eq!(booking.status, BookingStatus::Pending);
        assert!(booking.care_instructions.is_empty());
    }

    #[test]
    fn test_new_id_carries_prefix() {
        let id = new_id("cage");
        assert!(id.starts_with("cage-"));
        assert_ne!(new_id("cage"), new_id("cage"));
    }

    #[test]
    fn test_effective_pet_count_floors_at_one() {
        assert_eq!(effective_pet_count(0), 1);
        assert_eq!(effective_pet_count(3), 3);
    }
}
