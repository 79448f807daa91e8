//! View navigation.

use std::fmt;
use std::sync::Mutex;

use tracing::info;

/// Name of the login view.
pub const LOGIN_PAGE: &str = "LoginPage";

/// A view the router can transition to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub name: String,
}

impl Destination {
    /// Creates a destination for the named view.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The login view, shown after a successful registration.
    #[must_use]
    pub fn login_page() -> Self {
        Self::new(LOGIN_PAGE)
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Fire-and-forget view transitions.
pub trait Router {
    /// Requests a transition to `destination`.
    fn navigate(&self, destination: Destination);
}

impl<R: Router + ?Sized> Router for &R {
    fn navigate(&self, destination: Destination) {
        (**self).navigate(destination);
    }
}

/// Router that logs each transition and remembers the last one.
///
/// Used by the command-line front end, where there is no view to switch to.
#[derive(Debug, Default)]
pub struct TracingRouter {
    last: Mutex<Option<Destination>>,
}

impl TracingRouter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the most recent destination, if any.
    #[must_use]
    pub fn last_destination(&self) -> Option<Destination> {
        self.last
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Router for TracingRouter {
    fn navigate(&self, destination: Destination) {
        info!(destination = %destination, "Navigating");
        *self
            .last
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(destination);
    }
}
