pub mod catchers;
pub mod config;
pub mod cors;
pub mod models;
pub mod routes;
pub mod service;
pub mod store;

pub use config::StoreConfig;
pub use models::{AnswerKey, Tally};
pub use service::{Persistence, VoteService};

#[cfg(test)]
mod tests;
