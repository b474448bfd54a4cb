pub mod classify;
pub mod config;
pub mod error;
pub mod extract;
pub mod registry;
pub mod render;
pub mod traits;
pub mod types;
