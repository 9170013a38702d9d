use crate::types::Service;
use std::collections::HashMap;

/// Changes between two catalog versions.
#[derive(Debug, Default, PartialEq)]
pub struct CatalogDiff {
    /// Ids present before and absent now, sorted.
    pub removed: Vec<String>,
    /// New services and services whose value changed, sorted by id.
    pub updated: Vec<Service>,
}

impl CatalogDiff {
    pub fn between(previous: &HashMap<String, Service>, next: &HashMap<String, Service>) -> Self {
        let mut removed: Vec<String> = previous
            .keys()
            .filter(|id| !next.contains_key(*id))
            .cloned()
            .collect();
        removed.sort();

        let mut updated: Vec<Service> = next
            .iter()
            .filter(|(id, service)| previous.get(*id) != Some(*service))
            .map(|(_, service)| service.clone())
            .collect();
        updated.sort_by(|a, b| a.id.cmp(&b.id));

        Self { removed, updated }
    }

    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.updated.is_empty()
    }
}
