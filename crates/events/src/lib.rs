//! In-process eventing for sync runs.

pub mod bus;

pub use bus::{EventBus, SyncEvent};
