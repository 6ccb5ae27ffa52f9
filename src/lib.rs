// Main library file for the cattery booking ledger.

// One module per concern: storage seam, domain records, CRUD per
// collection, and the derived capacity view.
pub mod bookings;
pub mod cages;
pub mod capacity;
pub mod models;
pub mod profile;
pub mod stays;
pub mod storage;

// Re-export key types for convenience
pub use capacity::{capacity_for_range, has_capacity_for_booking, DAILY_CAPACITY};
pub use models::{
    Booking, BookingSource, BookingStatus, Cage, CapacityDay, KennelProfile, Stay, StayStatus,
};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
