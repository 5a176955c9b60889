use crate::core::error::SetupError;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::future::Future;
use std::sync::Arc;

pub type SetupFuture<'a> = BoxFuture<'a, std::result::Result<(), SetupError>>;

/// Shared handle the manager keeps on its stacks.
pub type PageRef = Arc<dyn Page>;

/// A navigable unit.
///
/// `url` is an opaque identifier; any value, the empty string included, is
/// valid. `None` means the page has no url at all and `go` refuses it. Both
/// hooks are optional. A page that returns `None` from [`Page::setup`]
/// becomes current without any suspension point, so a history made only of
/// such pages resolves every navigation on the first poll.
pub trait Page: Send + Sync {
    fn url(&self) -> Option<&str>;

    /// Runs before the page becomes current. The manager awaits the returned
    /// future and aborts the transition if it resolves to an error.
    fn setup(&self) -> Option<SetupFuture<'_>> {
        None
    }

    /// Runs once each time the page stops being current. Not awaited.
    fn destroy(&self) {}
}

type SetupHook = Box<dyn Fn() -> SetupFuture<'static> + Send + Sync>;
type DestroyHook = Box<dyn Fn() + Send + Sync>;

/// A [`Page`] assembled from a url and optional closures.
pub struct BasicPage {
    url: Option<String>,
    setup: Option<SetupHook>,
    destroy: Option<DestroyHook>,
}

impl BasicPage {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            setup: None,
            destroy: None,
        }
    }

    /// A page without a url. Navigating to it is a caller error.
    pub fn without_url() -> Self {
        Self {
            url: None,
            setup: None,
            destroy: None,
        }
    }

    pub fn with_setup<F, Fut>(mut self, setup: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<(), SetupError>> + Send + 'static,
    {
        self.setup = Some(Box::new(move || setup().boxed()));
        self
    }

    pub fn with_destroy<F>(mut self, destroy: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.destroy = Some(Box::new(destroy));
        self
    }

    pub fn into_ref(self) -> PageRef {
        Arc::new(self)
    }
}

impl Page for BasicPage {
    fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    fn setup(&self) -> Option<SetupFuture<'_>> {
        self.setup.as_ref().map(|hook| hook())
    }

    fn destroy(&self) {
        if let Some(hook) = &self.destroy {
            hook();
        }
    }
}

impl std::fmt::Debug for BasicPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicPage")
            .field("url", &self.url)
            .field("setup", &self.setup.is_some())
            .field("destroy", &self.destroy.is_some())
            .finish()
    }
}
