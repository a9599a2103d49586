pub mod app_config;
pub mod dtos;
pub mod entities;

// Re-export commonly used types
pub use app_config::AppConfig;
pub use dtos::*;
pub use entities::*;
