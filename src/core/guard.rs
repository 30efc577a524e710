//! Guard predicates for controlling navigation.
//!
//! Guards are pure boolean functions that decide whether a requested screen
//! change may happen. They keep access rules declarative and free of side
//! effects; the session evaluates them before every manual navigation.

use super::screen::Screen;
use std::fmt;

/// A navigation the session has been asked to perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavigationRequest {
    /// The screen currently shown
    pub from: Screen,
    /// The screen being requested
    pub to: Screen,
    /// Whether the session has passed PIN validation
    pub authenticated: bool,
}

/// Named pure predicate that determines if a navigation can execute.
///
/// # Example
///
/// ```rust
/// use atm_session::core::{Guard, NavigationRequest, Screen};
///
/// let no_statement = Guard::new("no-statement", |req: &NavigationRequest| {
///     req.to != Screen::Statement
/// });
///
/// let request = NavigationRequest {
///     from: Screen::Dashboard,
///     to: Screen::Statement,
///     authenticated: true,
/// };
/// assert!(!no_statement.check(&request));
/// ```
pub struct Guard {
    name: String,
    predicate: Box<dyn Fn(&NavigationRequest) -> bool + Send + Sync>,
}

impl Guard {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic and thread-safe (Send + Sync).
    pub fn new<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&NavigationRequest) -> bool + Send + Sync + 'static,
    {
        Guard {
            name: name.into(),
            predicate: Box::new(predicate),
        }
    }

    /// Refuses protected screens until the session is authenticated.
    ///
    /// ```rust
    /// use atm_session::core::{Guard, NavigationRequest, Screen};
    ///
    /// let guard = Guard::authenticated();
    /// let request = NavigationRequest {
    ///     from: Screen::Welcome,
    ///     to: Screen::Dashboard,
    ///     authenticated: false,
    /// };
    /// assert!(!guard.check(&request));
    /// ```
    pub fn authenticated() -> Self {
        Guard::new("authenticated", |req: &NavigationRequest| {
            req.authenticated || !req.to.requires_auth()
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check if the guard allows the navigation.
    pub fn check(&self, request: &NavigationRequest) -> bool {
        (self.predicate)(request)
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").field("name", &self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(to: Screen, authenticated: bool) -> NavigationRequest {
        NavigationRequest {
            from: Screen::Welcome,
            to,
            authenticated,
        }
    }

    #[test]
    fn authenticated_guard_blocks_protected_screens() {
        let guard = Guard::authenticated();

        for screen in Screen::ALL {
            assert_eq!(
                guard.check(&request(screen, false)),
                !screen.requires_auth(),
                "unexpected verdict for {screen}"
            );
        }
    }

    #[test]
    fn authenticated_guard_allows_everything_after_login() {
        let guard = Guard::authenticated();

        assert!(Screen::ALL
            .into_iter()
            .all(|screen| guard.check(&request(screen, true))));
    }

    #[test]
    fn custom_guard_uses_predicate() {
        let guard = Guard::new("stay-home", |req: &NavigationRequest| {
            req.to == Screen::Welcome
        });

        assert_eq!(guard.name(), "stay-home");
        assert!(guard.check(&request(Screen::Welcome, false)));
        assert!(!guard.check(&request(Screen::PinEntry, false)));
    }

    #[test]
    fn guard_is_deterministic() {
        let guard = Guard::authenticated();
        let req = request(Screen::Statement, false);

        assert_eq!(guard.check(&req), guard.check(&req));
    }

    #[test]
    fn debug_shows_name_only() {
        let guard = Guard::authenticated();
        assert_eq!(format!("{guard:?}"), "Guard { name: \"authenticated\" }");
    }
}
