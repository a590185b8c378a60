//! Sessions: the logged-in user and the opaque token issued at login.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::UserId;

/// The authenticated user as returned by `/auth/*`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// An in-memory session. Dropped on logout; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: User,
    pub token: String,
}

/// Which authentication flow the login view is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

impl AuthMode {
    /// API path (relative to `/api`) the form posts to.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/auth/login",
            Self::Register => "/auth/register",
        }
    }

    /// The other mode, for the login/register toggle.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Login => Self::Register,
            Self::Register => Self::Login,
        }
    }

    /// Whether the email field is shown and required.
    #[must_use]
    pub fn requires_email(self) -> bool {
        matches!(self, Self::Register)
    }
}

/// Raw login/register form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialsForm {
    pub username: String,
    pub password: String,
    pub email: String,
}

/// Validated body for `/auth/login` or `/auth/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AuthRequest {
    Login {
        username: String,
        password: String,
    },
    Register {
        username: String,
        email: String,
        password: String,
    },
}

impl AuthRequest {
    /// Mode this request was built for.
    #[must_use]
    pub fn mode(&self) -> AuthMode {
        match self {
            Self::Login { .. } => AuthMode::Login,
            Self::Register { .. } => AuthMode::Register,
        }
    }
}

impl CredentialsForm {
    /// Check the fields required by `mode` and build the request body.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] for the first empty
    /// required field. Email is only required when registering.
    pub fn validate(&self, mode: AuthMode) -> Result<AuthRequest, ValidationError> {
        let username = self.username.trim();
        if username.is_empty() {
            return Err(ValidationError::MissingField("Username"));
        }
        if self.password.is_empty() {
            return Err(ValidationError::MissingField("Password"));
        }
        match mode {
            AuthMode::Login => Ok(AuthRequest::Login {
                username: username.to_string(),
                password: self.password.clone(),
            }),
            AuthMode::Register => {
                let email = self.email.trim();
                if email.is_empty() {
                    return Err(ValidationError::MissingField("Email"));
                }
                Ok(AuthRequest::Register {
                    username: username.to_string(),
                    email: email.to_string(),
                    password: self.password.clone(),
                })
            }
        }
    }
}
