//! Profile screen: identity card, today's check-in, to-do progress, avatar
//! upload and logout.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tokio::sync::Mutex;

use crate::errors::Result;
use crate::filter::{self, AttendanceCard};
use crate::models::{ProfileImageUpload, UserProfile};
use crate::AppState;

#[derive(Debug, Clone, Default)]
pub struct ProfileState {
    pub user: UserProfile,
    /// Reference to the avatar, as returned by the backend
    pub avatar: Option<String>,
    pub card: AttendanceCard,
    pub completed_todos: usize,
    pub refreshing: bool,
}

/// Result of a logout attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutOutcome {
    LoggedOut,
    Rejected,
    Failed,
}

pub struct ProfileScreen {
    app: AppState,
    state: Mutex<ProfileState>,
}

impl ProfileScreen {
    pub fn new(app: AppState) -> Self {
        Self {
            app,
            state: Mutex::new(ProfileState::default()),
        }
    }

    /// Load the summary. False when there is no session or any part failed.
    pub async fn on_focus(&self) -> bool {
        let Some(token) = self.token().await else {
            return false;
        };

        let user = self.fetch_user(&token).await;
        let today = self.fetch_today(&token).await;
        let todos = self.fetch_todo_count(&token).await;
        user && today && todos
    }

    /// Pull-to-refresh only reloads the profile itself.
    pub async fn refresh(&self) -> bool {
        {
            let mut state = self.state.lock().await;
            if state.refreshing {
                tracing::debug!("Refresh already running");
                return false;
            }
            state.refreshing = true;
        }
        let fetched = match self.token().await {
            Some(token) => self.fetch_user(&token).await,
            None => false,
        };
        self.state.lock().await.refreshing = false;
        fetched
    }

    async fn token(&self) -> Option<String> {
        match self.app.session.get().await {
            Ok(Some(token)) => Some(token),
            Ok(None) => {
                tracing::debug!("No session token, skipping profile fetch");
                None
            }
            Err(e) => {
                tracing::error!("Failed to read session token: {}", e);
                None
            }
        }
    }

    async fn fetch_user(&self, token: &str) -> bool {
        match self.app.api.fetch_profile(token).await {
            Ok(user) => {
                let mut state = self.state.lock().await;
                state.avatar = user.profile.clone().filter(|p| !p.is_empty());
                state.user = user;
                true
            }
            Err(e) => {
                tracing::error!("Failed to fetch user data: {}", e);
                false
            }
        }
    }

    async fn fetch_today(&self, token: &str) -> bool {
        match self.app.api.list_attendance(token).await {
            Ok(records) => {
                let offset = self.app.config.utc_offset;
                let today = self
                    .app
                    .caps
                    .clock
                    .now()
                    .with_timezone(&offset)
                    .date_naive();
                let todays = filter::todays_records(&records, today, &offset);
                self.state.lock().await.card = filter::attendance_card(&todays, &offset);
                true
            }
            Err(e) => {
                tracing::error!("Failed to fetch attendance data: {}", e);
                false
            }
        }
    }

    async fn fetch_todo_count(&self, token: &str) -> bool {
        match self.app.api.list_todos(token).await {
            Ok(list) => {
                self.state.lock().await.completed_todos = filter::completed_count(&list.todos);
                true
            }
            Err(e) => {
                tracing::error!("Failed to fetch to-do list: {}", e);
                false
            }
        }
    }

    /// Upload a picked image file as the new avatar, then reload the profile.
    pub async fn upload_avatar(&self, path: &Path) -> bool {
        match self.try_upload_avatar(path).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Error uploading image: {}", e);
                self.app.caps.alerts.alert(
                    "Upload Error",
                    "An error occurred while uploading the image. Please try again.",
                );
                false
            }
        }
    }

    async fn try_upload_avatar(&self, path: &Path) -> Result<()> {
        let bytes = tokio::fs::read(path).await?;
        let upload = ProfileImageUpload {
            profile_image: format!("data:{};base64,{}", image_mime(path), STANDARD.encode(bytes)),
        };

        let token = self.app.session.require().await?;
        let response = self.app.api.upload_profile_image(&token, &upload).await?;
        tracing::info!("Profile image uploaded: {}", response);

        self.fetch_user(&token).await;
        Ok(())
    }

    /// Log out. The token is only cleared when the backend confirms.
    pub async fn logout(&self) -> LogoutOutcome {
        match self.try_logout().await {
            Ok(true) => {
                tracing::info!("Logged out");
                *self.state.lock().await = ProfileState::default();
                LogoutOutcome::LoggedOut
            }
            Ok(false) => {
                self.app
                    .caps
                    .alerts
                    .alert("Error", "An error occurred while logging out.");
                LogoutOutcome::Rejected
            }
            Err(e) => {
                tracing::error!("Error logging out: {}", e);
                self.app.caps.alerts.alert(
                    "Error",
                    "An error occurred while logging out. Please try again.",
                );
                LogoutOutcome::Failed
            }
        }
    }

    async fn try_logout(&self) -> Result<bool> {
        let token = self.app.session.require().await?;
        let response = self.app.api.logout(&token).await?;
        if !response.is_success() {
            tracing::warn!("Unexpected logout response: {:?}", response.message);
            return Ok(false);
        }
        self.app.session.clear().await?;
        Ok(true)
    }

    pub async fn snapshot(&self) -> ProfileState {
        self.state.lock().await.clone()
    }
}

/// PNG files are labelled as such; everything else is sent as JPEG.
fn image_mime(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("png") => "image/png",
        _ => "image/jpeg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_mime() {
        assert_eq!(image_mime(Path::new("me.png")), "image/png");
        assert_eq!(image_mime(Path::new("me.PNG")), "image/png");
        assert_eq!(image_mime(Path::new("me.jpg")), "image/jpeg");
        assert_eq!(image_mime(Path::new("me.heic")), "image/jpeg");
        assert_eq!(image_mime(Path::new("me")), "image/jpeg");
    }
}
