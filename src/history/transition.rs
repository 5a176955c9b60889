//! Load → commit → unload sequence shared by every navigation operation.
//!
//! A [`Transition`] owns the [`BusyGuard`] for its whole lifetime and the page
//! it is moving to. Until [`Transition::commit`] runs, dropping it (setup
//! failure, timeout, or the caller dropping the future) puts the incoming page
//! back where it came from, so the stacks end up exactly as before the call.

use super::manager::{HistoryManager, Outcome};
use super::page::PageRef;
use crate::core::error::{HistoryError, Result};
use std::sync::atomic::{AtomicBool, Ordering};

/// Holds the manager's busy flag; released on drop.
pub(crate) struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    /// Returns `None` if a transition is already in flight.
    pub(crate) fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        Some(Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Where the incoming page was taken from.
pub(crate) enum Origin {
    /// Handed to `go`; carries the forward entries it cleared.
    Fresh(Vec<PageRef>),
    Back,
    Forward,
}

/// Where the outgoing page goes on commit.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Departure {
    ToBack,
    ToForward,
    Discard,
}

pub(crate) struct Transition<'a> {
    manager: &'a HistoryManager,
    incoming: PageRef,
    origin: Origin,
    departure: Departure,
    committed: bool,
    _busy: BusyGuard<'a>,
}

impl<'a> Transition<'a> {
    pub(crate) fn new(
        manager: &'a HistoryManager,
        busy: BusyGuard<'a>,
        incoming: PageRef,
        origin: Origin,
        departure: Departure,
    ) -> Self {
        Self {
            manager,
            incoming,
            origin,
            departure,
            committed: false,
            _busy: busy,
        }
    }

    pub(crate) async fn run(mut self) -> Result<Outcome> {
        self.load().await?;

        if let Some(outgoing) = self.commit() {
            log::trace!("Unloading '{}'", outgoing.url().unwrap_or_default());
            outgoing.destroy();
        }

        Ok(Outcome::Navigated)
    }

    async fn load(&self) -> Result<()> {
        let Some(setup) = self.incoming.setup() else {
            return Ok(());
        };
        let url = self.incoming.url().unwrap_or_default();
        log::trace!("Running setup of '{}'", url);

        let result = match self.manager.config().setup_timeout {
            Some(limit) => match tokio::time::timeout(limit, setup).await {
                Ok(result) => result,
                Err(_) => {
                    log::warn!("Setup of '{}' timed out after {:?}", url, limit);
                    return Err(HistoryError::SetupTimeout {
                        url: url.to_owned(),
                        after: limit,
                    });
                }
            },
            None => setup.await,
        };

        result.map_err(|source| {
            log::warn!("Setup of '{}' failed: {}", url, source);
            HistoryError::Setup {
                url: url.to_owned(),
                source,
            }
        })
    }

    /// Swaps the incoming page in and files the outgoing one. No await points.
    fn commit(&mut self) -> Option<PageRef> {
        let mut state = self.manager.state();
        let outgoing = state.current.replace(self.incoming.clone());

        if let Some(page) = &outgoing {
            match self.departure {
                Departure::ToBack => {
                    state.back.push(page.clone());
                    self.manager.trim_back(&mut state.back);
                }
                Departure::ToForward => state.forward.push(page.clone()),
                Departure::Discard => {}
            }
        }
        self.committed = true;

        log::debug!(
            "Navigated {} -> {} ({:?})",
            outgoing
                .as_ref()
                .map_or("<none>", |page| page.url().unwrap_or_default()),
            self.incoming.url().unwrap_or_default(),
            self.departure
        );
        outgoing
    }
}

impl Drop for Transition<'_> {
    fn drop(&mut self) {
        if self.committed {
            return;
        }

        let mut state = self.manager.state();
        match &mut self.origin {
            Origin::Fresh(cleared) => {
                if !cleared.is_empty() {
                    let mut restored = std::mem::take(cleared);
                    restored.append(&mut state.forward);
                    state.forward = restored;
                }
            }
            Origin::Back => state.back.push(self.incoming.clone()),
            Origin::Forward => state.forward.push(self.incoming.clone()),
        }
        log::debug!(
            "Transition to '{}' rolled back",
            self.incoming.url().unwrap_or_default()
        );
    }
}
