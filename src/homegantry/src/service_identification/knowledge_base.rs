use crate::service_identification::known_service::KnownService;
use crate::utils::yaml::YamlFile;
use anyhow::Result;
use std::path::Path;
use tracing::{info, warn};

const KNOWN_SERVICES_KEY: &str = "services";
const EMBEDDED_KNOWN_SERVICES: &str = include_str!("yml_rules/known_services.yml");

/// Static, ordered list of known services. Every lookup returns the first
/// entry that satisfies it.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    services: Vec<KnownService>,
}

impl KnowledgeBase {
    pub fn new(services: Vec<KnownService>) -> Self {
        Self { services }
    }

    /// A knowledge base with no entries; matching degrades to labels and ports.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn load(file: &YamlFile) -> Result<Self> {
        Ok(Self::new(file.load_array(KNOWN_SERVICES_KEY)?))
    }

    /// Loads `file`, falling back to an empty knowledge base if it is missing or malformed.
    pub fn load_or_empty(file: &YamlFile) -> Self {
        match Self::load(file) {
            Ok(knowledge_base) => {
                info!("Loaded {} known services", knowledge_base.len());
                knowledge_base
            }
            Err(e) => {
                warn!(
                    "Failed to load known services, matching will use labels and ports only: {:#}",
                    e
                );
                Self::empty()
            }
        }
    }

    /// The external file if one is configured, the embedded list otherwise.
    pub fn from_config(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Self::load_or_empty(&YamlFile::Path(path.to_path_buf())),
            None => Self::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    pub fn services(&self) -> &[KnownService] {
        &self.services
    }

    pub fn find_by_alias(&self, candidate: &str) -> Option<&KnownService> {
        self.services.iter().find(|service| service.has_alias(candidate))
    }

    pub fn find_by_image(&self, repository: &str) -> Option<&KnownService> {
        self.services
            .iter()
            .find(|service| service.matches_image(repository))
    }

    pub fn find_by_port(&self, port: u16) -> Option<&KnownService> {
        self.services
            .iter()
            .find(|service| service.default_port == Some(port))
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::load_or_empty(&YamlFile::Embedded(EMBEDDED_KNOWN_SERVICES))
    }
}
