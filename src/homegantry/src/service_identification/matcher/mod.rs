pub mod identity;
pub mod url;

use crate::constants::{DEFAULT_CATEGORY, FALLBACK_HOST};
use crate::service_identification::knowledge_base::KnowledgeBase;
use crate::storage::overrides::ServiceOverride;
use crate::types::{ContainerSnapshot, Service, ServiceSource, ServiceStatus};
use std::sync::Arc;

pub use identity::{resolve_identity, Identity, KnownServiceLookup, LABEL_CASCADE};
pub use url::resolve_url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOptions {
    /// Honor `homepage.*` labels.
    pub homepage_compat: bool,
    /// Host used in synthesized port URLs; empty means `localhost`.
    pub host: String,
}

impl MatchOptions {
    pub fn url_host(&self) -> &str {
        if self.host.is_empty() {
            FALLBACK_HOST
        } else {
            &self.host
        }
    }
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            homepage_compat: true,
            host: String::new(),
        }
    }
}

/// Turns container snapshots into catalog services.
///
/// Matching is pure: the same snapshot, knowledge base and override always
/// produce the same service.
#[derive(Debug, Clone)]
pub struct ServiceMatcher {
    knowledge_base: Arc<KnowledgeBase>,
    options: MatchOptions,
}

impl ServiceMatcher {
    pub fn new(knowledge_base: Arc<KnowledgeBase>, options: MatchOptions) -> Self {
        Self {
            knowledge_base,
            options,
        }
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.knowledge_base
    }

    pub fn match_container(
        &self,
        snapshot: &ContainerSnapshot,
        service_override: Option<&ServiceOverride>,
    ) -> Service {
        let identity = resolve_identity(snapshot, &self.knowledge_base, &self.options);
        let mut service = Service {
            id: snapshot.id.clone(),
            source: ServiceSource::Container,
            name: identity.name.unwrap_or_else(|| snapshot.name.clone()),
            description: identity.description.unwrap_or_default(),
            url: resolve_url(snapshot, &self.options),
            icon: identity.icon.unwrap_or_default(),
            category: identity
                .category
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            status: ServiceStatus::from_state(&snapshot.state),
            stack: snapshot.compose_project.clone(),
            container: Some(snapshot.clone()),
            hidden: false,
            sort_order: 0,
        };
        if let Some(service_override) = service_override {
            service_override.apply_to(&mut service);
        }
        service
    }
}
