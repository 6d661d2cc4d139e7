pub mod clearance_cache;
pub mod entry;

pub use clearance_cache::{ClearanceCache, RefreshGuard};
pub use entry::{ClearanceContext, ClearanceEntry};
