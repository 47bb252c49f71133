use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{ApplicationStatus, JobApplication, Priority};
use crate::config::TrackerConfig;

/// Aggregate counts and rates over a collection snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ApplicationStats {
    pub total: usize,
    pub interviews: usize,
    pub offers: usize,
    pub rejections: usize,
    pub pending: usize,
    /// Offers as a percentage of all applications.
    pub success_rate: f64,
    /// Interviews as a percentage of all applications.
    pub interview_rate: f64,
}

/// Count of applications sharing one enum value, with its display association.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakdownEntry<K> {
    pub key: K,
    pub label: &'static str,
    pub color: &'static str,
    pub count: usize,
}

/// Read-only queries over a snapshot of the store. Nothing here mutates or caches.
#[derive(Debug, Clone, Copy)]
pub struct Analytics<'a> {
    applications: &'a [JobApplication],
    config: TrackerConfig,
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

impl<'a> Analytics<'a> {
    pub fn new(applications: &'a [JobApplication]) -> Self {
        Self::with_config(applications, TrackerConfig::default())
    }

    pub fn with_config(applications: &'a [JobApplication], config: TrackerConfig) -> Self {
        Self {
            applications,
            config,
        }
    }

    fn count_status(&self, status: ApplicationStatus) -> usize {
        self.applications
            .iter()
            .filter(|app| app.status() == status)
            .count()
    }

    pub fn stats(&self) -> ApplicationStats {
        let total = self.applications.len();
        let interviews = self.count_status(ApplicationStatus::Interviewing);
        let offers = self.count_status(ApplicationStatus::Offer);
        let rejections = self.count_status(ApplicationStatus::Rejected);
        let pending = self
            .applications
            .iter()
            .filter(|app| app.status().is_pending())
            .count();

        ApplicationStats {
            total,
            interviews,
            offers,
            rejections,
            pending,
            success_rate: percentage(offers, total),
            interview_rate: percentage(interviews, total),
        }
    }

    pub fn high_priority(&self) -> Vec<&'a JobApplication> {
        self.applications
            .iter()
            .filter(|app| app.priority().is_high())
            .collect()
    }

    /// Follow-ups falling inside the configured window from `now`, soonest first.
    pub fn follow_ups_due(&self, now: DateTime<Utc>) -> Vec<&'a JobApplication> {
        let window = self.config.follow_up_window();
        let mut due: Vec<&'a JobApplication> = self
            .applications
            .iter()
            .filter(|app| app.has_follow_up_due(now, window))
            .collect();
        due.sort_by_key(|app| app.follow_up_date().unwrap_or(DateTime::<Utc>::MAX_UTC));
        due
    }

    /// Applications sent within the configured recent window (a week by default).
    pub fn this_week(&self, now: DateTime<Utc>) -> Vec<&'a JobApplication> {
        let cutoff = now
            .checked_sub_signed(self.config.recent_window())
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        self.applications
            .iter()
            .filter(|app| app.application_date() >= cutoff)
            .collect()
    }

    pub fn active_applications(&self) -> Vec<&'a JobApplication> {
        self.applications
            .iter()
            .filter(|app| app.status().is_active())
            .collect()
    }

    pub fn status_breakdown(&self) -> Vec<BreakdownEntry<ApplicationStatus>> {
        ApplicationStatus::ordered()
            .into_iter()
            .map(|status| BreakdownEntry {
                key: status,
                label: status.label(),
                color: status.color(),
                count: self.count_status(status),
            })
            .collect()
    }

    pub fn priority_breakdown(&self) -> Vec<BreakdownEntry<Priority>> {
        Priority::ordered()
            .into_iter()
            .map(|priority| BreakdownEntry {
                key: priority,
                label: priority.label(),
                color: priority.color(),
                count: self
                    .applications
                    .iter()
                    .filter(|app| app.priority() == priority)
                    .count(),
            })
            .collect()
    }
}
