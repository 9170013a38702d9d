use crate::catalog::{CatalogEngine, EventBus};
use crate::storage::Stores;
use crate::types::Service;
use std::sync::Arc;

#[derive(Clone)]
pub struct DaemonState {
    engine: Arc<CatalogEngine>,
    stores: Arc<Stores>,
}

impl DaemonState {
    pub fn new(engine: Arc<CatalogEngine>, stores: Arc<Stores>) -> Self {
        Self { engine, stores }
    }

    pub fn engine(&self) -> &CatalogEngine {
        &self.engine
    }

    pub fn stores(&self) -> &Stores {
        &self.stores
    }

    pub fn bus(&self) -> &EventBus {
        self.engine.bus()
    }

    /// Container-backed services followed by manual ones.
    pub async fn merged_services(&self, include_hidden: bool) -> Vec<Service> {
        let mut services = self.engine.services().await;
        services.extend(
            self.stores
                .manual_services
                .list()
                .await
                .iter()
                .map(Service::from),
        );
        if !include_hidden {
            services.retain(|service| !service.hidden);
        }
        services
    }
}
