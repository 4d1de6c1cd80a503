//! Home dashboard.
//!
//! Shows a clock, the user's name and avatar, today's check-in card and the
//! full attendance list. Fetch failures are logged only; the dashboard keeps
//! whatever it showed before. `on_focus` and `refresh` still report whether
//! everything loaded.

use chrono::DateTime;
use tokio::sync::Mutex;

use crate::filter::{self, dates, AttendanceCard, RowPresentation};
use crate::models::{AttendanceRecord, UserProfile};
use crate::AppState;

#[derive(Debug, Clone, Default)]
pub struct HomeState {
    pub user: UserProfile,
    pub records: Vec<AttendanceRecord>,
    pub today: Vec<AttendanceRecord>,
    pub card: AttendanceCard,
    pub refreshing: bool,
    /// `HH:mm`
    pub current_time: String,
    /// `ddd, D MMMM YYYY`
    pub current_date: String,
}

pub struct HomeScreen {
    app: AppState,
    state: Mutex<HomeState>,
}

impl HomeScreen {
    pub fn new(app: AppState) -> Self {
        Self {
            app,
            state: Mutex::new(HomeState::default()),
        }
    }

    /// Update the clock; the dashboard calls this every second.
    pub async fn tick(&self) {
        let now = self
            .app
            .caps
            .clock
            .now()
            .with_timezone(&self.app.config.utc_offset);

        let mut state = self.state.lock().await;
        state.current_time = now.format(dates::CLOCK_24H_FORMAT).to_string();
        state.current_date = dates::format_long_date(now.date_naive());
    }

    pub async fn on_focus(&self) -> bool {
        self.tick().await;
        self.fetch_all().await
    }

    pub async fn refresh(&self) -> bool {
        {
            let mut state = self.state.lock().await;
            if state.refreshing {
                tracing::debug!("Refresh already running");
                return false;
            }
            state.refreshing = true;
        }
        let fetched = self.fetch_all().await;
        self.state.lock().await.refreshing = false;
        fetched
    }

    /// Profile, full list, then today's records, one after another. A failed
    /// step does not stop the next one.
    async fn fetch_all(&self) -> bool {
        let token = match self.app.session.get().await {
            Ok(Some(token)) => token,
            Ok(None) => {
                tracing::debug!("No session token, skipping home fetch");
                return false;
            }
            Err(e) => {
                tracing::error!("Failed to read session token: {}", e);
                return false;
            }
        };

        let user = self.fetch_user(&token).await;
        let attendance = self.fetch_attendance(&token).await;
        let today = self.fetch_today(&token).await;
        user && attendance && today
    }

    async fn fetch_user(&self, token: &str) -> bool {
        match self.app.api.fetch_profile(token).await {
            Ok(user) => {
                self.state.lock().await.user = user;
                true
            }
            Err(e) => {
                tracing::error!("Failed to fetch user data: {}", e);
                false
            }
        }
    }

    async fn fetch_attendance(&self, token: &str) -> bool {
        match self.app.api.list_attendance(token).await {
            Ok(records) => {
                self.state.lock().await.records = records;
                true
            }
            Err(e) => {
                tracing::error!("Failed to fetch attendance data: {}", e);
                false
            }
        }
    }

    async fn fetch_today(&self, token: &str) -> bool {
        let records = match self.app.api.list_attendance(token).await {
            Ok(records) => records,
            Err(e) => {
                tracing::error!("Failed to fetch attendance data: {}", e);
                return false;
            }
        };

        let offset = self.app.config.utc_offset;
        let now: DateTime<_> = self.app.caps.clock.now().with_timezone(&offset);
        let today = filter::todays_records(&records, now.date_naive(), &offset);
        let card = filter::attendance_card(&today, &offset);

        let mut state = self.state.lock().await;
        state.today = today;
        state.card = card;
        true
    }

    pub async fn rows(&self) -> Vec<RowPresentation> {
        let state = self.state.lock().await;
        state
            .records
            .iter()
            .map(|r| filter::present_row(r, &self.app.config.utc_offset))
            .collect()
    }

    pub async fn snapshot(&self) -> HomeState {
        self.state.lock().await.clone()
    }
}
