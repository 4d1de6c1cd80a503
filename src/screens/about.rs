//! Account details screen.
//!
//! Lists the ten profile fields and lets the user edit one at a time. A
//! save sends just that field and, on success, merges it into the local copy
//! without re-fetching.

use tokio::sync::Mutex;

use crate::errors::Result;
use crate::models::{ProfileField, UserProfile};
use crate::AppState;

#[derive(Debug, Clone, Default)]
pub struct AccountState {
    pub user: UserProfile,
    /// Field currently open in the editor
    pub editing: Option<ProfileField>,
    pub draft: String,
}

pub struct AccountScreen {
    app: AppState,
    state: Mutex<AccountState>,
}

impl AccountScreen {
    pub fn new(app: AppState) -> Self {
        Self {
            app,
            state: Mutex::new(AccountState::default()),
        }
    }

    /// Load the profile. On failure the screen shows an empty profile and
    /// this returns false.
    pub async fn load(&self) -> bool {
        let (user, loaded) = match self.fetch().await {
            Ok(user) => (user, true),
            Err(e) => {
                tracing::error!("Error fetching user data: {}", e);
                (UserProfile::default(), false)
            }
        };
        self.state.lock().await.user = user;
        loaded
    }

    async fn fetch(&self) -> Result<UserProfile> {
        let token = self.app.session.require().await?;
        self.app.api.fetch_profile(&token).await
    }

    /// Open the editor for `field`, seeded with its current value.
    pub async fn begin_edit(&self, field: ProfileField) {
        let mut state = self.state.lock().await;
        let current = state.user.get(field).unwrap_or_default().to_string();
        state.editing = Some(field);
        state.draft = current;
    }

    pub async fn set_draft(&self, value: &str) {
        self.state.lock().await.draft = value.to_string();
    }

    /// Save the open draft. Does nothing when no field is being edited.
    pub async fn commit(&self) -> bool {
        let (field, value) = {
            let state = self.state.lock().await;
            match state.editing {
                Some(field) => (field, state.draft.clone()),
                None => return false,
            }
        };

        let saved = self.save_field(field, &value).await;
        if saved {
            let mut state = self.state.lock().await;
            state.editing = None;
            state.draft.clear();
        }
        saved
    }

    /// Send one field to the backend and merge it locally on success.
    pub async fn save_field(&self, field: ProfileField, value: &str) -> bool {
        match self.update(field, value).await {
            Ok(()) => {
                tracing::info!("Updated {}", field.key());
                self.state.lock().await.user.set(field, value.to_string());
                true
            }
            Err(e) => {
                tracing::error!("Error updating {}: {}", field.key(), e);
                self.app
                    .caps
                    .alerts
                    .alert("Error", "Failed to update user data. Please try again.");
                false
            }
        }
    }

    async fn update(&self, field: ProfileField, value: &str) -> Result<()> {
        let token = self.app.session.require().await?;
        self.app
            .api
            .update_profile_field(&token, field, value)
            .await?;
        Ok(())
    }

    /// `(label, value)` pairs in display order.
    pub async fn rows(&self) -> Vec<(&'static str, String)> {
        let state = self.state.lock().await;
        ProfileField::ALL
            .iter()
            .map(|f| (f.label(), state.user.display(*f).to_string()))
            .collect()
    }

    pub async fn snapshot(&self) -> AccountState {
        self.state.lock().await.clone()
    }
}
