use std::sync::{Mutex, MutexGuard};

use tracing::{debug, info, warn};

use super::domain::{ApplicationStatus, ItemId, JobApplication};
use super::error::TrackerError;

/// Storage abstraction owning the canonical collection of applications.
///
/// Implementations serialize their own mutations; callers only ever see whole-value snapshots.
pub trait ApplicationRepository: Send + Sync {
    /// Append `app`. Duplicate company/role pairs are allowed.
    fn add(&self, app: JobApplication) -> Result<JobApplication, TrackerError>;
    /// Replace the stored entry carrying the same identifier and refresh its last-modified stamp.
    fn update(&self, app: JobApplication) -> Result<JobApplication, TrackerError>;
    /// Apply `change` to the stored entry with `id` in one step, refreshing its last-modified
    /// stamp. No other mutation can interleave between the read and the write.
    fn modify(
        &self,
        id: ItemId,
        change: &mut dyn FnMut(&mut JobApplication),
    ) -> Result<JobApplication, TrackerError>;
    /// Remove every entry with `id`, returning how many were dropped.
    fn delete_by_id(&self, id: ItemId) -> Result<usize, TrackerError>;
    fn fetch(&self, id: ItemId) -> Result<Option<JobApplication>, TrackerError>;
    fn list_all(&self) -> Result<Vec<JobApplication>, TrackerError>;
    fn list_by_status(&self, status: ApplicationStatus)
        -> Result<Vec<JobApplication>, TrackerError>;
}

/// Volatile, insertion-ordered store behind a single mutex.
#[derive(Debug, Default)]
pub struct InMemoryApplicationRepository {
    records: Mutex<Vec<JobApplication>>,
}

impl InMemoryApplicationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_applications(applications: Vec<JobApplication>) -> Self {
        Self {
            records: Mutex::new(applications),
        }
    }

    fn records(&self) -> Result<MutexGuard<'_, Vec<JobApplication>>, TrackerError> {
        self.records.lock().map_err(|_| {
            warn!("application store lock poisoned");
            TrackerError::SaveFailed
        })
    }
}

impl ApplicationRepository for InMemoryApplicationRepository {
    fn add(&self, app: JobApplication) -> Result<JobApplication, TrackerError> {
        let mut records = self.records()?;
        records.push(app.clone());
        info!(id = %app.id(), total = records.len(), "application added");
        Ok(app)
    }

    fn update(&self, mut app: JobApplication) -> Result<JobApplication, TrackerError> {
        let mut records = self.records()?;
        let Some(slot) = records.iter_mut().find(|stored| stored.id() == app.id()) else {
            warn!(id = %app.id(), "update skipped: application not found");
            return Err(TrackerError::ApplicationNotFound);
        };

        app.update_last_modified();
        *slot = app.clone();
        info!(id = %app.id(), status = %app.status(), "application updated");
        Ok(app)
    }

    fn modify(
        &self,
        id: ItemId,
        change: &mut dyn FnMut(&mut JobApplication),
    ) -> Result<JobApplication, TrackerError> {
        let mut records = self.records()?;
        let Some(slot) = records.iter_mut().find(|stored| stored.id() == id) else {
            warn!(%id, "modify skipped: application not found");
            return Err(TrackerError::ApplicationNotFound);
        };

        change(slot);
        slot.update_last_modified();
        info!(%id, status = %slot.status(), "application modified");
        Ok(slot.clone())
    }

    fn delete_by_id(&self, id: ItemId) -> Result<usize, TrackerError> {
        let mut records = self.records()?;
        let before = records.len();
        records.retain(|stored| stored.id() != id);
        let removed = before - records.len();
        info!(%id, removed, "application delete processed");
        Ok(removed)
    }

    fn fetch(&self, id: ItemId) -> Result<Option<JobApplication>, TrackerError> {
        let records = self.records()?;
        Ok(records.iter().find(|stored| stored.id() == id).cloned())
    }

    fn list_all(&self) -> Result<Vec<JobApplication>, TrackerError> {
        let records = self.records()?;
        debug!(total = records.len(), "listing applications");
        Ok(records.clone())
    }

    fn list_by_status(
        &self,
        status: ApplicationStatus,
    ) -> Result<Vec<JobApplication>, TrackerError> {
        let records = self.records()?;
        Ok(records
            .iter()
            .filter(|stored| stored.status() == status)
            .cloned()
            .collect())
    }
}
