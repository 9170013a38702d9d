pub mod backoff;
pub mod runtime_watcher;

pub use backoff::{BackoffOptions, ReconnectBackoff};
pub use runtime_watcher::RuntimeWatcher;
