pub mod knowledge_base;
pub mod known_service;
pub mod matcher;
pub mod names;

pub use knowledge_base::KnowledgeBase;
pub use known_service::KnownService;
pub use matcher::{MatchOptions, ServiceMatcher};
