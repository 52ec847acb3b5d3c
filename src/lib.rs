pub mod args;
pub mod error;
pub mod expand;
pub mod fs;
pub mod logging;
pub mod project_config;
pub mod save;
