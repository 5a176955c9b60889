// src/main.rs
use page_history::core::constants::{APP_TITLE, SHELL_PROMPT, VERSION};
use page_history::{create_handler, load_config, Config, Result};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = load_config(config_path.as_deref()).await?;
    init_logger(&config);

    log::info!("{} v{}", APP_TITLE, VERSION);
    log::info!("Config: {}", config.path().unwrap_or("<defaults>"));

    let handler = create_handler(&config);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    prompt(&mut stdout).await?;
    while let Some(line) = lines.next_line().await? {
        let result = handler.handle_input(&line).await;
        if !result.message.is_empty() {
            let marker = if result.success { "" } else { "! " };
            stdout
                .write_all(format!("{}{}\n", marker, result.message).as_bytes())
                .await?;
        }
        if result.should_exit {
            break;
        }
        prompt(&mut stdout).await?;
    }

    log::info!("Shell closed at {:?}", handler.history().url());
    Ok(())
}

// RUST_LOG still overrides the level from the config file.
fn init_logger(config: &Config) {
    env_logger::Builder::new()
        .filter_level(config.level_filter())
        .parse_default_env()
        .format_timestamp_millis()
        .init();
}

async fn prompt(stdout: &mut tokio::io::Stdout) -> Result<()> {
    stdout.write_all(SHELL_PROMPT.as_bytes()).await?;
    stdout.flush().await?;
    Ok(())
}
