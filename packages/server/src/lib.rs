// Editorial Gateway - API Core
//
// Backend for the magazine's editorial dashboard: signed WordPress gateway
// functions, article generators, feed ingestion and the story/draft/press
// release review workflow.
//
// Actions are organized per-domain in domains/*/actions.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
