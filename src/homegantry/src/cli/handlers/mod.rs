mod scan;
mod serve;

pub(super) use scan::scan;
pub(super) use serve::serve;

use crate::catalog::{CatalogEngine, EventBus};
use crate::config::Config;
use crate::runtime::DockerRuntime;
use crate::service_identification::{KnowledgeBase, ServiceMatcher};
use crate::storage::OverrideStore;
use anyhow::Result;
use std::sync::Arc;

fn build_engine(config: &Config, overrides: Arc<OverrideStore>) -> Result<CatalogEngine> {
    let runtime = DockerRuntime::connect(&config.docker_socket)?;
    let knowledge_base = KnowledgeBase::from_config(config.known_services_file.as_deref());
    tracing::debug!("Knowledge base holds {} services", knowledge_base.len());
    let matcher = ServiceMatcher::new(Arc::new(knowledge_base), config.match_options());
    Ok(CatalogEngine::new(
        Arc::new(runtime),
        matcher,
        overrides,
        EventBus::default(),
        config.scan_options(),
    ))
}
