// =====================================================
// FILE: history/mod.rs
// =====================================================

pub mod config;
pub mod manager;
pub mod page;
mod transition;

pub use config::HistoryConfig;
pub use manager::{HistoryManager, Outcome};
pub use page::{BasicPage, Page, PageRef, SetupFuture};
