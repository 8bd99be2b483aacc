pub mod config;
pub mod db;
pub mod domain;
pub mod engine;
pub mod handlers;
pub mod paths;
pub mod sheets;
pub mod state;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;
