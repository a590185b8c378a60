//! Session service: login and registration.

use devicehub_domain::session::{AuthMode, CredentialsForm, Session};

use crate::ports::{ApiError, DeviceHubApi, Notifier};

/// Turns the login form into a [`Session`].
pub struct SessionService<A, N> {
    api: A,
    notifier: N,
}

impl<A: DeviceHubApi, N: Notifier> SessionService<A, N> {
    /// Create a new service backed by the given ports.
    pub fn new(api: A, notifier: N) -> Self {
        Self { api, notifier }
    }

    /// Submit the form in `mode`.
    ///
    /// Returns the session on success, for the caller to hand upward.
    /// Validation failures notify without touching the network; server
    /// failures surface the server's detail, or a generic message when the
    /// request never got an answer.
    #[tracing::instrument(skip(self, form), fields(username = %form.username))]
    pub async fn submit(&self, mode: AuthMode, form: &CredentialsForm) -> Option<Session> {
        let request = match form.validate(mode) {
            Ok(request) => request,
            Err(err) => {
                self.notifier.error(err.to_string());
                return None;
            }
        };

        match self.api.authenticate(&request).await {
            Ok(session) => {
                tracing::info!(user_id = %session.user.id, "authenticated");
                self.notifier.success(match mode {
                    AuthMode::Login => "Logged in successfully",
                    AuthMode::Register => "Account created successfully",
                });
                Some(session)
            }
            Err(err) => {
                tracing::warn!(error = %err, "authentication failed");
                self.notifier.error(match err {
                    ApiError::Http { message, .. } => message,
                    ApiError::Transport(_) => "Authentication failed".to_string(),
                });
                None
            }
        }
    }
}
