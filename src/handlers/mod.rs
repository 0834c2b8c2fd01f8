pub mod generation_handler;
pub mod health_handler;

pub use generation_handler::{generate, json_config};
pub use health_handler::{health_check, health_check_live, health_check_ready};
