// Cage catalog: independently managed housing units. Nothing here enforces
// an occupancy link to stays beyond the optional cage id reference.

use crate::models::Cage;
use crate::storage::{read_collection, write_collection, KeyValueStore};

pub const CAGES_COLLECTION: &str = "cages";

pub fn list_cages(store: &dyn KeyValueStore, tenant_id: &str) -> Vec<Cage> {
    read_collection::<Cage>(store, CAGES_COLLECTION)
        .into_iter()
        .filter(|c| c.tenant_id == tenant_id)
        .collect()
}

// Replaces the cage with a matching id, otherwise inserts. A blank id gets a
// generated one.
pub fn upsert_cage(store: &dyn KeyValueStore, tenant_id: &str, mut cage: Cage) -> Cage {
    if cage.id.is_empty() {
        cage.id = crate::models::new_id("cage");
    }
    cage.tenant_id = tenant_id.to_string();

    let mut all = read_collection::<Cage>(store, CAGES_COLLECTION);
    match all
        .iter_mut()
        .find(|c| c.tenant_id == tenant_id && c.id == cage.id)
    {
        Some(existing) => *existing = cage.clone(),
        None => all.push(cage.clone()),
    }

    write_collection(store, CAGES_COLLECTION, &all);
    cage
}

// Filtered removal; returns whether anything was deleted.
pub fn delete_cage(store: &dyn KeyValueStore, tenant_id: &str, id: &str) -> bool {
    let mut all = read_collection::<Cage>(store, CAGES_COLLECTION);
    let before = all.len();
    all.retain(|c| !(c.tenant_id == tenant_id && c.id == id));

    if all.len() == before {
        return false;
    }

    write_collection(store, CAGES_COLLECTION, &all);
    true
}
