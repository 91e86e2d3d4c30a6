//! Persistence of the inventory collection
//!
//! - [`blob`] - the [`BlobStore`] abstraction with file and in-memory backends
//! - [`manager`] - [`StoreManager`], which loads, guards, and mutates the collection

pub mod blob;
pub mod manager;

pub use blob::{create_blob_store, BlobStore, FileBlobStore, MemoryBlobStore};
pub use manager::{LoadOutcome, StoreManager};
