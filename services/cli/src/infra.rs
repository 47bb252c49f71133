use chrono::{DateTime, NaiveDate, Utc};
use job_tracker::config::TrackerConfig;
use job_tracker::error::AppError;
use job_tracker::tracking::{
    ApplicationTracker, InMemoryApplicationRepository, JobApplication, TrackerError,
};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Accepts a calendar date (midnight UTC) or a full RFC 3339 timestamp.
pub(crate) fn parse_instant(raw: &str) -> Result<DateTime<Utc>, String> {
    let trimmed = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(instant.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("{} ('{raw}')", TrackerError::InvalidDate.message()))
}

pub(crate) fn load_snapshot(path: &Path) -> Result<Vec<JobApplication>, AppError> {
    let raw = fs::read_to_string(path)?;
    let applications: Vec<JobApplication> =
        serde_json::from_str(&raw).map_err(|source| AppError::Snapshot {
            path: path.to_path_buf(),
            source,
        })?;
    info!(path = %path.display(), total = applications.len(), "snapshot loaded");
    Ok(applications)
}

/// An entry the validator refused to admit.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct Rejection {
    pub(crate) index: usize,
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) kind: &'static str,
    pub(crate) reason: &'static str,
}

/// Admit every valid application into a fresh in-memory tracker, collecting the rest.
pub(crate) fn admit(
    applications: Vec<JobApplication>,
    config: TrackerConfig,
) -> Result<
    (
        ApplicationTracker<InMemoryApplicationRepository>,
        Vec<Rejection>,
    ),
    AppError,
> {
    let tracker = ApplicationTracker::in_memory(config);
    let mut rejections = Vec::new();

    for (index, app) in applications.into_iter().enumerate() {
        let id = app.id().to_string();
        let title = app.title().to_string();
        match tracker.add(app) {
            Ok(_) => {}
            Err(err @ TrackerError::SaveFailed) => return Err(err.into()),
            Err(err) => {
                warn!(index, %id, reason = err.message(), "skipping invalid application");
                rejections.push(Rejection {
                    index,
                    id,
                    title,
                    kind: err.kind_label(),
                    reason: err.message(),
                });
            }
        }
    }

    Ok((tracker, rejections))
}
