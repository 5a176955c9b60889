// =====================================================
// FILE: history/config.rs
// =====================================================

use crate::core::prelude::*;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryConfig {
    /// Oldest back-stack entries are dropped beyond this many.
    pub max_entries: Option<usize>,
    pub setup_timeout: Option<Duration>,
}

impl HistoryConfig {
    pub fn from_main_config(config: &Config) -> Self {
        Self {
            max_entries: (config.history_max_entries > 0).then_some(config.history_max_entries),
            setup_timeout: config.setup_timeout,
        }
    }

    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = (max_entries > 0).then_some(max_entries);
        self
    }

    pub fn with_setup_timeout(mut self, timeout: Duration) -> Self {
        self.setup_timeout = Some(timeout);
        self
    }
}
