// In-memory state of one interactive run. Built once at startup and handed
// by reference to every component; nothing here touches the network.

use chrono::NaiveDate;

/// The current-date cursor plus whatever credentials the run has acquired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub current_date: NaiveDate,
    pub token: Option<String>,
    pub username: Option<String>,
}

impl Session {
    pub fn new(current_date: NaiveDate) -> Self {
        Session {
            current_date,
            token: None,
            username: None,
        }
    }

    /// Move the cursor one day back. The cursor stays put at the
    /// calendar's lower bound.
    pub fn previous_day(&mut self) {
        if let Some(d) = self.current_date.pred_opt() {
            self.current_date = d;
        }
        tracing::debug!(date = %self.current_date, "moved cursor back");
    }

    /// Move the cursor one day forward.
    pub fn next_day(&mut self) {
        if let Some(d) = self.current_date.succ_opt() {
            self.current_date = d;
        }
        tracing::debug!(date = %self.current_date, "moved cursor forward");
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}
