pub mod models;
pub mod prompts;
