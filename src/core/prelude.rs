// Core essentials
pub use crate::core::config::Config;
pub use crate::core::error::{HistoryError, Result, SetupError};

// Standard library essentials
pub use std::sync::Arc;
pub use std::time::Duration;

// History types
pub use crate::history::{BasicPage, HistoryConfig, HistoryManager, Outcome, Page, PageRef};
