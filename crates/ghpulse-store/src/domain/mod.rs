//! Store components and the shared `EventStore` that owns them.

pub mod category_index;
pub mod event_store;
pub mod repository_timeline;
pub mod statistics;
pub mod timestamp_key;
pub mod timestamp_store;
