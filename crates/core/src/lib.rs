pub mod app_state;
pub mod db;
pub mod logging;
pub mod repositories;
pub mod services;

pub use app_state::{AppState, DbPool};
