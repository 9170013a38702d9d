mod error;
mod handlers;
mod routes;
mod server;
mod state;

pub use server::{get_router, DaemonServer};
pub use state::DaemonState;
