//! Login form.

use crate::errors::{FieldError, Result};
use crate::models::{AuthResponse, LoginRequest};
use crate::AppState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// The form did not validate; nothing was sent
    Invalid(Vec<FieldError>),
    LoggedIn,
    Failed,
}

pub struct LoginScreen {
    app: AppState,
}

impl LoginScreen {
    pub fn new(app: AppState) -> Self {
        Self { app }
    }

    pub async fn submit(&self, request: LoginRequest) -> LoginOutcome {
        if let Err(errors) = request.validate() {
            return LoginOutcome::Invalid(errors);
        }

        let result = self.send(&request).await;

        match result {
            Ok(Some(_)) => {
                tracing::info!("Logged in as {}", request.email);
                LoginOutcome::LoggedIn
            }
            Ok(None) => {
                self.app
                    .caps
                    .alerts
                    .alert("Login Failed", "Invalid email or password");
                LoginOutcome::Failed
            }
            Err(e) => {
                tracing::error!("Login error: {}", e);
                self.app
                    .caps
                    .alerts
                    .alert("Login Failed", "Internal Server Error");
                LoginOutcome::Failed
            }
        }
    }

    /// Returns the stored token, or `None` when the response carried none.
    async fn send(&self, request: &LoginRequest) -> Result<Option<String>> {
        let AuthResponse { token, .. } = self.app.api.login(request).await?;
        match token.filter(|t| !t.is_empty()) {
            Some(token) => {
                self.app.session.set(&token).await?;
                Ok(Some(token))
            }
            None => Ok(None),
        }
    }
}
