// Per-tenant business profile. One record lives under the profile key; a
// stored record is only honored when its id matches the requested tenant,
// otherwise the hard-coded default wins.

use crate::models::KennelProfile;
use crate::storage::{read_object, write_object, KeyValueStore};

pub const PROFILE_OBJECT: &str = "profile";

pub fn default_kennel_profile(tenant_id: &str) -> KennelProfile {
    KennelProfile {
        id: tenant_id.to_string(),
        business_name: "The Cattery".to_string(),
        tagline: "A quiet home away from home for your cat".to_string(),
        about_text: "Family-run cat boarding with daily play time, \
                     individual cages and plenty of window seats."
            .to_string(),
        address: String::new(),
        phone: String::new(),
        email: String::new(),
    }
}

pub fn save_kennel_profile(store: &dyn KeyValueStore, profile: &KennelProfile) -> bool {
    write_object(store, PROFILE_OBJECT, profile)
}

// Stored profile with empty fields backfilled from the default; the default
// wholesale when nothing is stored or the stored record belongs to another
// tenant.
pub fn load_kennel_profile(store: &dyn KeyValueStore, tenant_id: &str) -> KennelProfile {
    let defaults = default_kennel_profile(tenant_id);

    match read_object::<KennelProfile>(store, PROFILE_OBJECT) {
        Some(stored) if stored.id == tenant_id => fill_defaults(stored, defaults),
        _ => defaults,
    }
}

fn fill_defaults(mut profile: KennelProfile, defaults: KennelProfile) -> KennelProfile {
    if profile.business_name.is_empty() {
        profile.business_name = defaults.business_name;
    }
    if profile.tagline.is_empty() {
        profile.tagline = defaults.tagline;
    }
    if profile.about_text.is_empty() {
        profile.about_text = defaults.about_text;
    }
    if profile.address.is_empty() {
        profile.address = defaults.address;
    }
    if profile.phone.is_empty() {
        profile.phone = defaults.phone;
    }
    if profile.email.is_empty() {
        profile.email = defaults.email;
    }
    profile
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_load_without_save_returns_defaults() {
        let store = MemoryStore::new();
        let profile = load_kennel_profile(&store, "t1");
        assert_eq!(profile, default_kennel_profile("t1"));
    }

    #[test]
    fn test_round_trip_keeps_set_fields_and_fills_rest() {
        let store = MemoryStore::new();
        let saved = KennelProfile {
            id: "t1".to_string(),
            business_name: "Purrfect Stays".to_string(),
            phone: "555-0102".to_string(),
            ..Default::default()
        };
        assert!(save_kennel_profile(&store, &saved));

        let loaded = load_kennel_profile(&store, "t1");
        assert_eq!(loaded.business_name, "Purrfect Stays");
        assert_eq!(loaded.phone, "555-0102");
        // Unset fields come from the defaults.
        assert_eq!(loaded.tagline, default_kennel_profile("t1").tagline);
    }

    #[test]
    fn test_mismatched_tenant_falls_back_to_defaults() {
        let store = MemoryStore::new();
        let other = KennelProfile {
            id: "t2".to_string(),
            business_name: "Someone Else's Cats".to_string(),
            ..Default::default()
        };
        save_kennel_profile(&store, &other);

        let profile = load_kennel_profile(&store, "t1");
        assert_eq!(profile, default_kennel_profile("t1"));
    }
}
