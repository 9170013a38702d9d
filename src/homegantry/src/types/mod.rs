pub mod event;
pub mod service;
pub mod snapshot;

pub use event::CatalogEvent;
pub use service::{Service, ServiceSource, ServiceStatus};
pub use snapshot::{ContainerSnapshot, PortPair};
