//! To-do list screen.

use tokio::sync::Mutex;

use super::{FetchSequencer, ListControls, StalePolicy};
use crate::errors::Result;
use crate::export::{ExportOutcome, ExportPipeline};
use crate::filter::{self, dates, MONTH_SENTINEL};
use crate::models::TodoItem;
use crate::AppState;

#[derive(Debug, Clone, Default)]
pub struct TodoState {
    pub todos: Vec<TodoItem>,
    pub filtered: Vec<TodoItem>,
    pub controls: ListControls,
    pub refreshing: bool,
    pub current_date: String,
}

impl TodoState {
    pub fn completed_count(&self) -> usize {
        filter::completed_count(&self.todos)
    }
}

pub struct TodoScreen {
    app: AppState,
    state: Mutex<TodoState>,
    sequencer: FetchSequencer,
}

impl TodoScreen {
    pub fn new(app: AppState, policy: StalePolicy) -> Self {
        let today = app
            .caps
            .clock
            .now()
            .with_timezone(&app.config.utc_offset)
            .date_naive();

        let state = TodoState {
            current_date: dates::format_long_date(today),
            ..Default::default()
        };

        Self {
            app,
            state: Mutex::new(state),
            sequencer: FetchSequencer::new(policy),
        }
    }

    pub async fn on_focus(&self) -> bool {
        self.fetch().await
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
        let fetched = self.fetch().await;
        self.state.lock().await.refreshing = false;
        fetched
    }

    /// Fetch the list; failures become an alert. Returns true when state was updated.
    pub async fn fetch(&self) -> bool {
        tracing::debug!("Fetching to-do list...");
        let ticket = self.sequencer.begin();

        match self.load().await {
            Ok(todos) => {
                tracing::debug!("Fetched todos: {} items", todos.len());
                let mut state = self.state.lock().await;
                if !self.sequencer.should_apply(ticket) {
                    tracing::debug!("Dropping stale to-do response #{}", ticket);
                    return false;
                }
                let filtered = filter::filter_by_month(&todos, &state.controls.selected_month);
                state.filtered = filtered;
                state.todos = todos;
                true
            }
            Err(e) => {
                tracing::error!("Error fetching to-do list: {}", e);
                self.app
                    .caps
                    .alerts
                    .alert("Error", "Failed to fetch to-do list. Please try again.");
                false
            }
        }
    }

    async fn load(&self) -> Result<Vec<TodoItem>> {
        let token = self.app.session.require().await?;
        Ok(self.app.api.list_todos(&token).await?.todos)
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
        let filtered = filter::filter_by_month(&state.todos, month);
        state.filtered = filtered;
    }

    pub async fn select_filter(&self, choice: &str) {
        let mut state = self.state.lock().await;
        if state.controls.choose_filter(choice) {
            state.controls.selected_month = MONTH_SENTINEL.to_string();
            let all = state.todos.clone();
            state.filtered = all;
        }
    }

    pub async fn download(&self) -> ExportOutcome {
        ExportPipeline::new(&self.app).run().await
    }

    pub async fn snapshot(&self) -> TodoState {
        self.state.lock().await.clone()
    }
}
