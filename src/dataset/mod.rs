//! Dataset contract: product records, file loading and the snapshot cache.

pub mod cache;
pub mod loader;
pub mod record;

pub use cache::{CacheStats, DatasetCache, SourceSignature};
pub use loader::{load_dataset, Dataset, RawRecord, SourceFormat};
pub use record::{Division, ProductRecord};
