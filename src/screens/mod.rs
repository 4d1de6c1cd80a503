//! Screen controllers.
//!
//! Each controller owns its own state object; nothing is shared between
//! screens except the session token, which is read fresh before every call.

mod about;
mod attendance;
mod home;
mod login;
mod profile;
mod signup;
mod todo;

pub use about::*;
pub use attendance::*;
pub use home::*;
pub use login::*;
pub use profile::*;
pub use signup::*;
pub use todo::*;

use std::sync::atomic::{AtomicU64, Ordering};

use crate::filter::{FILTER_ALL, MONTH_SENTINEL};

/// What happens when overlapping fetches of the same list resolve out of order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StalePolicy {
    /// Whichever response resolves last overwrites the state.
    #[default]
    LastResolvedWins,
    /// Responses older than the newest issued request are dropped.
    LatestRequestWins,
}

/// Numbers fetches so stale responses can be recognised.
#[derive(Debug, Default)]
pub struct FetchSequencer {
    policy: StalePolicy,
    issued: AtomicU64,
}

impl FetchSequencer {
    pub fn new(policy: StalePolicy) -> Self {
        Self {
            policy,
            issued: AtomicU64::new(0),
        }
    }

    /// Register a new fetch and return its ticket.
    pub fn begin(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether the response for `ticket` may overwrite state.
    /// Call while holding the state lock.
    pub fn should_apply(&self, ticket: u64) -> bool {
        match self.policy {
            StalePolicy::LastResolvedWins => true,
            StalePolicy::LatestRequestWins => ticket == self.issued.load(Ordering::SeqCst),
        }
    }
}

/// Month selector, category selector and their dropdowns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListControls {
    pub selected_month: String,
    pub selected_filter: String,
    pub month_dropdown_open: bool,
    pub filter_dropdown_open: bool,
}

impl Default for ListControls {
    fn default() -> Self {
        Self {
            selected_month: MONTH_SENTINEL.to_string(),
            selected_filter: FILTER_ALL.to_string(),
            month_dropdown_open: false,
            filter_dropdown_open: false,
        }
    }
}

impl ListControls {
    pub fn toggle_month_dropdown(&mut self) {
        self.month_dropdown_open = !self.month_dropdown_open;
    }

    pub fn toggle_filter_dropdown(&mut self) {
        self.filter_dropdown_open = !self.filter_dropdown_open;
    }

    pub fn choose_month(&mut self, month: &str) {
        self.selected_month = month.to_string();
        self.month_dropdown_open = false;
    }

    /// Returns true when the choice resets the list to everything.
    pub fn choose_filter(&mut self, filter: &str) -> bool {
        self.selected_filter = filter.to_string();
        self.filter_dropdown_open = false;
        filter == FILTER_ALL
    }
}
