// =====================================================
// FILE: src/commands/handler.rs
// =====================================================

use super::parsing::{parse_command, NavCommand};
use crate::core::prelude::*;

#[derive(Debug)]
pub struct CommandResult {
    pub message: String,
    pub success: bool,
    pub should_exit: bool,
}

impl CommandResult {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
            should_exit: false,
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
            should_exit: false,
        }
    }
}

/// Drives a shared [`HistoryManager`] from shell input.
pub struct CommandHandler {
    history: Arc<HistoryManager>,
}

impl CommandHandler {
    pub fn new(history: Arc<HistoryManager>) -> Self {
        Self { history }
    }

    pub fn history(&self) -> &Arc<HistoryManager> {
        &self.history
    }

    pub async fn handle_input(&self, input: &str) -> CommandResult {
        let command = parse_command(input);
        log::debug!("CommandHandler processing: {:?}", command);

        match command {
            NavCommand::Go { url, delay, fail } => {
                let page = Self::build_page(&url, delay, fail);
                let result = match self.history.go(page) {
                    Ok(navigation) => navigation.await,
                    Err(e) => Err(e),
                };
                self.report(result)
            }
            NavCommand::Back => {
                self.report_step(self.history.back().await, "Already at the first page")
            }
            NavCommand::Cancel => {
                self.report_step(self.history.cancel().await, "Already at the first page")
            }
            NavCommand::Forward => {
                self.report_step(self.history.forward().await, "Already at the last page")
            }
            NavCommand::First => self.report_step(
                self.history.back_to_first().await,
                "Already at the first page",
            ),
            NavCommand::Clear(url) => {
                let before = self.history.forward_len();
                self.history.clear_forward(url.as_deref());
                let removed = before - self.history.forward_len();
                CommandResult::ok(format!("Removed {} forward entries", removed))
            }
            NavCommand::Status => CommandResult::ok(self.status_line()),
            NavCommand::History => CommandResult::ok(self.render_history()),
            NavCommand::Help => CommandResult::ok(Self::help_text()),
            NavCommand::Exit => CommandResult {
                message: "Bye".to_string(),
                success: true,
                should_exit: true,
            },
            NavCommand::Empty => CommandResult::failed(String::new()),
            NavCommand::Invalid(reason) => {
                log::warn!("Rejected input '{}': {}", input.trim(), reason);
                CommandResult::failed(reason)
            }
        }
    }

    /// Stack moves; an empty stack is reported as `at_boundary`.
    fn report_step(&self, result: Result<Outcome>, at_boundary: &str) -> CommandResult {
        match result {
            Ok(Outcome::EmptyStack) => CommandResult::ok(at_boundary),
            other => self.report(other),
        }
    }

    fn report(&self, result: Result<Outcome>) -> CommandResult {
        match result {
            Ok(Outcome::Busy) => CommandResult::ok("Navigation in progress, ignored"),
            Ok(_) => CommandResult::ok(format!(
                "Now at '{}'",
                self.history.url().unwrap_or_default()
            )),
            Err(e) => {
                log::error!("Navigation failed: {}", e);
                CommandResult::failed(e.to_string())
            }
        }
    }

    fn build_page(url: &str, delay: Option<Duration>, fail: bool) -> PageRef {
        let leaving = url.to_string();
        let page = BasicPage::new(url).with_destroy(move || log::info!("Left '{}'", leaving));

        if delay.is_none() && !fail {
            return page.into_ref();
        }

        let url = url.to_string();
        page.with_setup(move || {
            let url = url.clone();
            async move {
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                if fail {
                    return Err::<(), SetupError>(format!("'{}' refused to load", url).into());
                }
                Ok(())
            }
        })
        .into_ref()
    }

    fn status_line(&self) -> String {
        format!(
            "current: {} | back: {} | forward: {}",
            self.history.url().unwrap_or_else(|| "-".to_string()),
            self.history.back_len(),
            self.history.forward_len()
        )
    }

    fn render_history(&self) -> String {
        let mut lines: Vec<String> = self
            .history
            .back_urls()
            .into_iter()
            .map(|url| format!("  {}", url))
            .collect();

        match self.history.url() {
            Some(url) => lines.push(format!("> {}", url)),
            None => lines.push("> (empty)".to_string()),
        }

        lines.extend(
            self.history
                .forward_urls()
                .into_iter()
                .rev()
                .map(|url| format!("  {}", url)),
        );
        lines.join("\n")
    }

    fn help_text() -> String {
        "Navigation Commands:\n\
        go <url> [--delay <ms>] [--fail]   Open a page\n\
        back                               Previous page\n\
        cancel                             Previous page, forget the current one\n\
        forward                            Next page\n\
        first                              Back to the first page\n\
        clear [url]                        Drop forward history\n\
        status | history                   Inspect the stacks\n\
        exit                               Leave"
            .to_string()
    }
}
