pub mod sinks;
pub mod store;

pub use sinks::{JsonDirSink, MemorySink};
pub use store::{CatalogIds, StoreError, StoreResult, TableRecord, TableStore};
