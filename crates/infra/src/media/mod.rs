//! Stored-media infrastructure
//!
//! Uploads land on the local filesystem and are served back over HTTP from
//! a static mount, so the store only has to hand out stable public URLs.

pub mod disk_store;

pub use disk_store::DiskMediaStore;
