use super::config::HistoryConfig;
use super::page::PageRef;
use super::transition::{BusyGuard, Departure, Origin, Transition};
use crate::core::error::{HistoryError, Result};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// How a navigation call resolved when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The current page changed.
    Navigated,
    /// Another transition was in flight; nothing was touched.
    Busy,
    /// The stack to move along was empty.
    EmptyStack,
}

#[derive(Default)]
pub(crate) struct HistoryState {
    pub(crate) back: Vec<PageRef>,
    pub(crate) forward: Vec<PageRef>,
    pub(crate) current: Option<PageRef>,
}

/// Back/forward page history with serialized, hook-aware transitions.
///
/// All operations take `&self`, so one manager is usually shared as
/// `Arc<HistoryManager>`. Navigation calls that arrive while another
/// transition is in flight resolve to [`Outcome::Busy`] instead of waiting.
/// The busy flag is taken when a navigation future is first polled.
pub struct HistoryManager {
    state: Mutex<HistoryState>,
    busy: AtomicBool,
    config: HistoryConfig,
}

impl HistoryManager {
    pub fn new() -> Self {
        Self::with_config(HistoryConfig::default())
    }

    pub fn with_config(config: HistoryConfig) -> Self {
        Self {
            state: Mutex::new(HistoryState::default()),
            busy: AtomicBool::new(false),
            config,
        }
    }

    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    // =====================================================
    // Navigation
    // =====================================================

    /// Navigates to `page`, dropping all forward history.
    ///
    /// The url is checked here, at the call site: a page without one is
    /// refused with [`HistoryError::MissingUrl`] and no future is handed out.
    /// While a transition is in flight the call is a no-op instead, so the
    /// returned future resolves to [`Outcome::Busy`] whatever the page holds.
    pub fn go(
        &self,
        page: PageRef,
    ) -> Result<impl Future<Output = Result<Outcome>> + Send + '_> {
        if !self.is_busy() && page.url().is_none() {
            log::error!("go() called with a page that has no url");
            return Err(HistoryError::MissingUrl);
        }

        Ok(async move {
            let Some(busy) = BusyGuard::acquire(&self.busy) else {
                log::trace!("go() ignored: transition in flight");
                return Ok(Outcome::Busy);
            };
            if page.url().is_none() {
                // Arrived while busy; the flag was released before the first poll.
                log::trace!("go() without url dropped: arrived during a transition");
                return Ok(Outcome::Busy);
            }

            let cleared = std::mem::take(&mut self.state().forward);
            Transition::new(self, busy, page, Origin::Fresh(cleared), Departure::ToBack)
                .run()
                .await
        })
    }

    /// Returns to the previous page; the current one stays reachable through
    /// [`HistoryManager::forward`].
    pub async fn back(&self) -> Result<Outcome> {
        self.step_back(Departure::ToForward).await
    }

    /// Like [`HistoryManager::back`], but the current page is erased from
    /// history instead of moving to the forward stack.
    pub async fn cancel(&self) -> Result<Outcome> {
        self.step_back(Departure::Discard).await
    }

    pub async fn forward(&self) -> Result<Outcome> {
        let Some(busy) = BusyGuard::acquire(&self.busy) else {
            log::trace!("forward() ignored: transition in flight");
            return Ok(Outcome::Busy);
        };

        let next = self.state().forward.pop();
        let Some(next) = next else {
            return Ok(Outcome::EmptyStack);
        };

        Transition::new(self, busy, next, Origin::Forward, Departure::ToBack)
            .run()
            .await
    }

    /// Steps back until the back stack is empty.
    ///
    /// Stops at the first failing step and returns its error; pages already
    /// left stay left. Resolves to `Navigated` if any step moved.
    pub async fn back_to_first(&self) -> Result<Outcome> {
        let mut moved = false;
        loop {
            match self.back().await? {
                Outcome::Navigated => moved = true,
                other if moved => {
                    log::trace!("back_to_first() stopped: {:?}", other);
                    return Ok(Outcome::Navigated);
                }
                other => return Ok(other),
            }
        }
    }

    /// Drops forward entries: all of them, or only those whose url equals
    /// `url`. Allowed while a transition is in flight.
    pub fn clear_forward(&self, url: Option<&str>) {
        let mut state = self.state();
        let before = state.forward.len();
        match url {
            None => state.forward.clear(),
            Some(url) => state.forward.retain(|page| page.url() != Some(url)),
        }
        let removed = before - state.forward.len();
        if removed > 0 {
            log::debug!("Cleared {} forward entries", removed);
        }
    }

    async fn step_back(&self, departure: Departure) -> Result<Outcome> {
        let Some(busy) = BusyGuard::acquire(&self.busy) else {
            log::trace!("back() ignored: transition in flight");
            return Ok(Outcome::Busy);
        };

        let previous = self.state().back.pop();
        let Some(previous) = previous else {
            return Ok(Outcome::EmptyStack);
        };

        Transition::new(self, busy, previous, Origin::Back, departure)
            .run()
            .await
    }

    // =====================================================
    // Introspection
    // =====================================================

    pub fn current(&self) -> Option<PageRef> {
        self.state().current.clone()
    }

    pub fn url(&self) -> Option<String> {
        self.state()
            .current
            .as_ref()
            .and_then(|page| page.url())
            .map(str::to_owned)
    }

    pub fn has_back(&self) -> bool {
        !self.state().back.is_empty()
    }

    pub fn has_forward(&self) -> bool {
        !self.state().forward.is_empty()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn back_len(&self) -> usize {
        self.state().back.len()
    }

    pub fn forward_len(&self) -> usize {
        self.state().forward.len()
    }

    /// Back stack urls, oldest first.
    pub fn back_urls(&self) -> Vec<String> {
        Self::urls(&self.state().back)
    }

    /// Forward stack urls, bottom first; the last one is what `forward()` loads.
    pub fn forward_urls(&self) -> Vec<String> {
        Self::urls(&self.state().forward)
    }

    // =====================================================
    // Internals
    // =====================================================

    pub(crate) fn state(&self) -> MutexGuard<'_, HistoryState> {
        // Hooks never run under this lock, so a poisoned state is still consistent.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn trim_back(&self, back: &mut Vec<PageRef>) {
        let Some(max) = self.config.max_entries else {
            return;
        };
        if back.len() > max {
            let excess = back.len() - max;
            back.drain(..excess);
            log::debug!("Dropped {} oldest history entries", excess);
        }
    }

    fn urls(pages: &[PageRef]) -> Vec<String> {
        pages
            .iter()
            .map(|page| page.url().unwrap_or_default().to_owned())
            .collect()
    }
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HistoryManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryManager")
            .field("current", &self.url())
            .field("back", &self.back_urls())
            .field("forward", &self.forward_urls())
            .field("busy", &self.is_busy())
            .finish()
    }
}
