pub mod app_config;
pub mod artifacts;
pub mod config;
pub mod env_file;
pub mod error;
pub mod input;
pub mod runner;
pub mod schema;
pub mod secrets;
pub mod service;

#[cfg(test)]
mod test_fixtures;
