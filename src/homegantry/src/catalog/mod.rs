pub mod bus;
pub mod diff;
pub mod engine;

pub use bus::EventBus;
pub use diff::CatalogDiff;
pub use engine::{Catalog, CatalogEngine, ScanOptions, ScanReport};
