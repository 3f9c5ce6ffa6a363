pub mod error;
pub mod server;
pub mod wallet;

mod app;
mod handlers;
mod queue;
mod router;
mod state;
mod types;
