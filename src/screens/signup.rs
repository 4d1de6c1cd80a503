//! Registration form.

use crate::errors::{ClientError, FieldError, Result};
use crate::models::{AuthResponse, SignUpForm};
use crate::AppState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpOutcome {
    /// The form did not validate; nothing was sent
    Invalid(Vec<FieldError>),
    Registered,
    /// The backend answered without a token; carries the alert message
    Rejected(String),
    /// The request failed; carries the alert message
    Failed(String),
}

pub struct SignUpScreen {
    app: AppState,
}

impl SignUpScreen {
    pub fn new(app: AppState) -> Self {
        Self { app }
    }

    pub async fn submit(&self, form: SignUpForm) -> SignUpOutcome {
        let request = match form.into_request() {
            Ok(request) => request,
            Err(errors) => return SignUpOutcome::Invalid(errors),
        };

        let result = self.app.api.register(&request).await;

        let alerts = &self.app.caps.alerts;
        match result {
            Ok(response) => match self.accept(response).await {
                Ok(()) => {
                    tracing::info!("Registered {}", request.email);
                    alerts.alert("Success", "Registration successful");
                    SignUpOutcome::Registered
                }
                Err(message) => {
                    alerts.alert("Error", &message);
                    SignUpOutcome::Rejected(message)
                }
            },
            Err(e) => {
                tracing::error!("Registration error: {}", e);
                let message = registration_error_message(&e);
                alerts.alert("Error", &message);
                SignUpOutcome::Failed(message)
            }
        }
    }

    /// Persist the token, or explain why the response was not accepted.
    async fn accept(&self, response: AuthResponse) -> std::result::Result<(), String> {
        let Some(token) = response.token.filter(|t| !t.is_empty()) else {
            return Err(response
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "Registration failed".to_string()));
        };

        self.store_token(&token).await.map_err(|e| {
            tracing::error!("Failed to store token: {}", e);
            "Registration failed".to_string()
        })
    }

    async fn store_token(&self, token: &str) -> Result<()> {
        self.app.session.set(token).await
    }
}

/// Backend field errors one per line, falling back to a generic message.
fn registration_error_message(error: &ClientError) -> String {
    error
        .flattened_field_errors()
        .unwrap_or_else(|| "An error occurred during registration".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_error_message_flattens_fields() {
        let field_errors = vec![
            (
                "telp".to_string(),
                vec!["The telp has already been taken.".to_string()],
            ),
            (
                "email".to_string(),
                vec!["The email has already been taken.".to_string()],
            ),
        ];
        let err = ClientError::Api {
            status: 422,
            message: "The given data was invalid.".to_string(),
            field_errors,
        };

        assert_eq!(
            registration_error_message(&err),
            "The telp has already been taken.\nThe email has already been taken."
        );
    }

    #[test]
    fn test_registration_error_message_fallback() {
        let err = ClientError::Network("connection refused".to_string());
        assert_eq!(
            registration_error_message(&err),
            "An error occurred during registration"
        );
    }
}
