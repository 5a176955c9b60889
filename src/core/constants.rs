pub const APP_TITLE: &str = "PAGE HISTORY";
pub const DEFAULT_CONFIG_FILE: &str = "page-history.toml";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const MAX_SETUP_TIMEOUT_MS: u64 = 600_000;
pub const SHELL_PROMPT: &str = "nav> ";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
