pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod text;
// cmd and reports belong to the binary crate (main.rs).
