pub mod api;
pub mod component;
pub mod config;
pub mod error;
pub mod loader;
pub mod optimizer;
pub mod partition;
pub mod scorer;
pub mod summary;
pub mod synthetic;
// cmd and reports are binary modules (declared in main.rs).
