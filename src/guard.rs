//! Session guard for authenticated pages.
//!
//! Every non-public page load runs through [`SessionGuard::check_page`]; a
//! missing or failed session lookup redirects to the login entry point. Once
//! a valid session exists, an inactivity deadline starts: any host activity
//! event resets it, and [`SessionGuard::poll`] past the deadline signs the
//! user out. Sign-out is fail-open — a provider failure is logged and the
//! redirect happens regardless.

use std::time::{Duration, Instant};

use tracing::warn;

use crate::error::Error;

/// Idle time after which an authenticated session is signed out.
pub const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(50 * 60);

/// Pages reachable without a session.
pub const PUBLIC_PAGES: &[&str] = &["index.html", "login.html"];

/// An authenticated session as reported by the identity provider.
#[derive(Debug, Clone)]
pub struct Session {
    /// Opaque token identifying the session; the guard only checks presence.
    pub access_token: String,
}

/// Identity/session backend.
pub trait SessionProvider {
    /// Returns the current session, or `None` when signed out.
    fn get_session(&mut self) -> Result<Option<Session>, Error>;
    /// Terminates the current session.
    fn sign_out(&mut self) -> Result<(), Error>;
    /// Sends a password-reset email with the given redirect target.
    fn reset_password_for_email(&mut self, email: &str, redirect_to: &str) -> Result<(), Error>;
}

/// What the host should do after a guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardAction {
    /// The page may be shown.
    Stay,
    /// Navigate to the login entry point.
    RedirectToLogin,
}

#[derive(Debug, Clone, Copy)]
struct InactivityDeadline {
    expires_at: Instant,
}

impl InactivityDeadline {
    fn starting(now: Instant) -> Self {
        Self {
            expires_at: now + INACTIVITY_TIMEOUT,
        }
    }

    fn reset(&mut self, now: Instant) {
        self.expires_at = now + INACTIVITY_TIMEOUT;
    }

    fn expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Page-load and inactivity guard around a [`SessionProvider`].
pub struct SessionGuard<P: SessionProvider> {
    provider: P,
    deadline: Option<InactivityDeadline>,
}

impl<P: SessionProvider> SessionGuard<P> {
    /// Wraps the given identity provider.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            deadline: None,
        }
    }

    /// Guards one page load.
    ///
    /// Public pages always pass without a session lookup. Otherwise a valid
    /// session arms the inactivity deadline and the page may be shown; a
    /// missing session or a provider failure redirects to login.
    pub fn check_page(&mut self, path: &str, now: Instant) -> GuardAction {
        if PUBLIC_PAGES.contains(&page_name(path)) {
            return GuardAction::Stay;
        }
        match self.provider.get_session() {
            Ok(Some(_)) => {
                self.deadline = Some(InactivityDeadline::starting(now));
                GuardAction::Stay
            }
            Ok(None) => GuardAction::RedirectToLogin,
            Err(err) => {
                warn!(%err, "session lookup failed");
                GuardAction::RedirectToLogin
            }
        }
    }

    /// Pushes the inactivity deadline out; the host calls this for every
    /// interaction event (pointer, key, scroll, touch).
    pub fn record_activity(&mut self, now: Instant) {
        if let Some(deadline) = &mut self.deadline {
            deadline.reset(now);
        }
    }

    /// Checks the inactivity deadline and signs out when it has passed.
    pub fn poll(&mut self, now: Instant) -> GuardAction {
        match self.deadline {
            Some(deadline) if deadline.expired(now) => self.logout(),
            _ => GuardAction::Stay,
        }
    }

    /// Signs the user out. Fail-open: a sign-out failure is logged but the
    /// redirect happens regardless.
    pub fn logout(&mut self) -> GuardAction {
        if let Err(err) = self.provider.sign_out() {
            warn!(%err, "sign-out failed, redirecting anyway");
        }
        self.deadline = None;
        GuardAction::RedirectToLogin
    }

    /// Requests a password-reset email, redirecting back to the reset page
    /// under `origin`.
    pub fn reset_password(&mut self, email: &str, origin: &str) -> Result<(), Error> {
        let redirect_to = format!("{origin}/reset-password.html");
        self.provider.reset_password_for_email(email, &redirect_to)
    }
}

// "/some/dir/map.html" -> "map.html"; a trailing slash means the index page.
fn page_name(path: &str) -> &str {
    match path.rsplit('/').next() {
        Some("") | None => "index.html",
        Some(name) => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct FakeProvider {
        session: Option<Session>,
        fail_get: bool,
        fail_sign_out: bool,
        sign_outs: usize,
        resets: Vec<(String, String)>,
    }

    impl SessionProvider for FakeProvider {
        fn get_session(&mut self) -> Result<Option<Session>, Error> {
            if self.fail_get {
                return Err(Error::Provider("backend down".into()));
            }
            Ok(self.session.clone())
        }

        fn sign_out(&mut self) -> Result<(), Error> {
            self.sign_outs += 1;
            if self.fail_sign_out {
                return Err(Error::Provider("network".into()));
            }
            self.session = None;
            Ok(())
        }

        fn reset_password_for_email(
            &mut self,
            email: &str,
            redirect_to: &str,
        ) -> Result<(), Error> {
            self.resets.push((email.into(), redirect_to.into()));
            Ok(())
        }
    }

    fn signed_in() -> FakeProvider {
        FakeProvider {
            session: Some(Session {
                access_token: "token".into(),
            }),
            ..FakeProvider::default()
        }
    }

    #[test]
    fn public_pages_pass_without_session() {
        let mut guard = SessionGuard::new(FakeProvider::default());
        let now = Instant::now();
        assert_eq!(guard.check_page("/index.html", now), GuardAction::Stay);
        assert_eq!(guard.check_page("/login.html", now), GuardAction::Stay);
        assert_eq!(guard.check_page("/", now), GuardAction::Stay);
    }

    #[test]
    fn missing_session_redirects() {
        let mut guard = SessionGuard::new(FakeProvider::default());
        assert_eq!(
            guard.check_page("/map.html", Instant::now()),
            GuardAction::RedirectToLogin
        );
    }

    #[test]
    fn provider_failure_redirects() {
        let mut guard = SessionGuard::new(FakeProvider {
            fail_get: true,
            ..FakeProvider::default()
        });
        assert_eq!(
            guard.check_page("/map.html", Instant::now()),
            GuardAction::RedirectToLogin
        );
    }

    #[test]
    fn activity_defers_the_idle_logout() {
        let mut guard = SessionGuard::new(signed_in());
        let start = Instant::now();
        assert_eq!(guard.check_page("/map.html", start), GuardAction::Stay);

        let almost = start + INACTIVITY_TIMEOUT - Duration::from_secs(1);
        assert_eq!(guard.poll(almost), GuardAction::Stay);

        guard.record_activity(almost);
        assert_eq!(guard.poll(start + INACTIVITY_TIMEOUT), GuardAction::Stay);

        let idle = almost + INACTIVITY_TIMEOUT;
        assert_eq!(guard.poll(idle), GuardAction::RedirectToLogin);
    }

    #[test]
    fn logout_is_fail_open() {
        let mut guard = SessionGuard::new(FakeProvider {
            session: Some(Session {
                access_token: "token".into(),
            }),
            fail_sign_out: true,
            ..FakeProvider::default()
        });
        assert_eq!(guard.logout(), GuardAction::RedirectToLogin);
    }

    #[test]
    fn password_reset_builds_redirect_from_origin() {
        let mut guard = SessionGuard::new(signed_in());
        guard
            .reset_password("voter@example.org", "https://map.example.org")
            .unwrap();
        assert_eq!(
            guard.provider.resets,
            [(
                "voter@example.org".to_string(),
                "https://map.example.org/reset-password.html".to_string()
            )]
        );
    }
}
