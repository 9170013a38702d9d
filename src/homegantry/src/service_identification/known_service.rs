use crate::service_identification::names::normalize;
use crate::utils::yaml::{Yaml, YamlExt};
use anyhow::Result;

/// One entry of the knowledge base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnownService {
    pub name: String,
    pub description: String,
    pub icon: String,
    pub category: String,
    pub default_port: Option<u16>,
    pub aliases: Vec<String>,
    pub patterns: Vec<String>,
}

impl KnownService {
    /// True if any alias equals `candidate` once both are normalized.
    pub fn has_alias(&self, candidate: &str) -> bool {
        let candidate = normalize(candidate);
        !candidate.is_empty() && self.aliases.iter().any(|alias| normalize(alias) == candidate)
    }

    /// True if any pattern is a case-insensitive substring of `repository`.
    pub fn matches_image(&self, repository: &str) -> bool {
        let repository = repository.to_lowercase();
        self.patterns
            .iter()
            .filter(|pattern| !pattern.is_empty())
            .any(|pattern| repository.contains(&pattern.to_lowercase()))
    }
}

impl TryFrom<Yaml> for KnownService {
    type Error = anyhow::Error;

    fn try_from(yaml: Yaml) -> Result<Self> {
        Ok(KnownService {
            name: yaml.required_string("name")?,
            description: yaml.optional_string("description")?.unwrap_or_default(),
            icon: yaml.optional_string("icon")?.unwrap_or_default(),
            category: yaml
                .optional_string("category")?
                .unwrap_or_else(|| crate::constants::DEFAULT_CATEGORY.to_string()),
            default_port: yaml.optional_port("default_port")?,
            aliases: yaml.string_list("aliases")?,
            patterns: yaml.string_list("patterns")?,
        })
    }
}
