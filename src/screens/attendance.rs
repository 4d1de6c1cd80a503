//! Attendance history screen.

use tokio::sync::Mutex;

use super::{FetchSequencer, ListControls, StalePolicy};
use crate::errors::Result;
use crate::export::{ExportOutcome, ExportPipeline};
use crate::filter::{self, dates, RowPresentation, MONTH_SENTINEL};
use crate::models::AttendanceRecord;
use crate::AppState;

#[derive(Debug, Clone, Default)]
pub struct AttendanceState {
    pub records: Vec<AttendanceRecord>,
    pub filtered: Vec<AttendanceRecord>,
    pub controls: ListControls,
    pub refreshing: bool,
    pub current_date: String,
}

pub struct AttendanceScreen {
    app: AppState,
    state: Mutex<AttendanceState>,
    sequencer: FetchSequencer,
}

impl AttendanceScreen {
    pub fn new(app: AppState, policy: StalePolicy) -> Self {
        let today = app
            .caps
            .clock
            .now()
            .with_timezone(&app.config.utc_offset)
            .date_naive();

        let state = AttendanceState {
            current_date: dates::format_long_date(today),
            ..Default::default()
        };

        Self {
            app,
            state: Mutex::new(state),
            sequencer: FetchSequencer::new(policy),
        }
    }

    /// The screen became visible.
    pub async fn on_focus(&self) -> bool {
        self.fetch().await
    }

    /// Pull-to-refresh. Ignored while a refresh is still running.
    pub async fn refresh(&self) -> bool {
        {
            let mut state = self.state.lock().await;
            if state.refreshing {
                tracing::debug!("Refresh already running");
                return false;
            }
            state.refreshing = true;
        }
        let fetched = self.fetch().await;
        self.state.lock().await.refreshing = false;
        fetched
    }

    /// Fetch the list; failures become an alert. Returns true when state was updated.
    pub async fn fetch(&self) -> bool {
        tracing::debug!("Fetching attendance list...");
        let ticket = self.sequencer.begin();

        match self.load().await {
            Ok(records) => {
                tracing::debug!("Attendance data: {} records", records.len());
                let mut state = self.state.lock().await;
                if !self.sequencer.should_apply(ticket) {
                    tracing::debug!("Dropping stale attendance response #{}", ticket);
                    return false;
                }
                let filtered = filter::filter_by_month(&records, &state.controls.selected_month);
                state.filtered = filtered;
                state.records = records;
                true
            }
            Err(e) => {
                tracing::error!("Error fetching attendance data: {}", e);
                self.app.caps.alerts.alert(
                    "Error",
                    "Failed to fetch attendance data. Please try again.",
                );
                false
            }
        }
    }

    async fn load(&self) -> Result<Vec<AttendanceRecord>> {
        let token = self.app.session.require().await?;
        self.app.api.list_attendance(&token).await
    }

    pub async fn toggle_month_dropdown(&self) {
        self.state.lock().await.controls.toggle_month_dropdown();
    }

    pub async fn toggle_filter_dropdown(&self) {
        self.state.lock().await.controls.toggle_filter_dropdown();
    }

    pub async fn select_month(&self, month: &str) {
        let mut state = self.state.lock().await;
        state.controls.choose_month(month);
        let filtered = filter::filter_by_month(&state.records, month);
        state.filtered = filtered;
    }

    pub async fn select_filter(&self, choice: &str) {
        let mut state = self.state.lock().await;
        if state.controls.choose_filter(choice) {
            state.controls.selected_month = MONTH_SENTINEL.to_string();
            let all = state.records.clone();
            state.filtered = all;
        }
    }

    /// Rows for the currently filtered records.
    pub async fn rows(&self) -> Vec<RowPresentation> {
        let state = self.state.lock().await;
        state
            .filtered
            .iter()
            .map(|r| filter::present_row(r, &self.app.config.utc_offset))
            .collect()
    }

    /// Download button.
    pub async fn download(&self) -> ExportOutcome {
        ExportPipeline::new(&self.app).run().await
    }

    pub async fn snapshot(&self) -> AttendanceState {
        self.state.lock().await.clone()
    }
}
