pub mod error;
pub mod graph;
pub mod json;
pub mod memory;
pub mod metadata;
pub mod store;

pub use error::{StorageError, StorageResult};
pub use graph::FileGraph;
pub use json::JsonIndexStore;
pub use memory::MemoryIndexStore;
pub use metadata::{IndexMetadata, utc_timestamp};
pub use store::{IndexStore, validate_files};
