// Module definitions
pub mod commands;
pub mod core;
pub mod history;

// Essential re-exports
pub use commands::{CommandHandler, CommandResult};
pub use crate::core::config::Config;
pub use crate::core::error::{HistoryError, Result, SetupError};
pub use history::{BasicPage, HistoryConfig, HistoryManager, Outcome, Page, PageRef};

use std::sync::Arc;

/// Builds a manager whose limits come from `config`.
pub fn create_manager(config: &Config) -> Arc<HistoryManager> {
    Arc::new(HistoryManager::with_config(HistoryConfig::from_main_config(
        config,
    )))
}

pub fn create_handler(config: &Config) -> CommandHandler {
    CommandHandler::new(create_manager(config))
}

pub async fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    Config::load(path).await
}
