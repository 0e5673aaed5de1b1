// Freelancer profile and portfolio, persisted through a RecordStore.

pub mod handlers;
pub mod store;
