pub mod advisor;
pub mod app;
pub mod config;
pub mod content;
pub mod db;
pub mod domain;
pub mod handlers;
pub mod srs;
#[cfg(test)]
pub mod testing;
