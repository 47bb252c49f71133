use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use super::analytics::{Analytics, ApplicationStats, BreakdownEntry};
use super::domain::{ApplicationDraft, ApplicationStatus, ItemId, JobApplication, Priority};
use super::error::TrackerError;
use super::query::{ApplicationGroup, ApplicationQuery};
use super::repository::{ApplicationRepository, InMemoryApplicationRepository};
use super::validation;
use crate::config::TrackerConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Added,
    Updated,
    Removed,
}

/// Published after a mutation has been applied to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeEvent {
    /// Store version after the mutation; strictly increasing.
    pub version: u64,
    pub kind: ChangeKind,
    pub id: ItemId,
}

/// Observer hook for collection changes (view refresh, badges, reminders).
pub trait ChangeListener: Send + Sync {
    fn notify(&self, event: &ChangeEvent) -> Result<(), ListenerError>;
}

/// Listener failure. Logged by the tracker; never rolls back the mutation.
#[derive(Debug, thiserror::Error)]
pub enum ListenerError {
    #[error("listener unavailable: {0}")]
    Unavailable(String),
}

fn owned(applications: Vec<&JobApplication>) -> Vec<JobApplication> {
    applications.into_iter().cloned().collect()
}

/// Front door for callers: validates before admitting, stores, then tells subscribers.
pub struct ApplicationTracker<R> {
    repository: Arc<R>,
    listeners: RwLock<Vec<Arc<dyn ChangeListener>>>,
    config: TrackerConfig,
    version: AtomicU64,
}

impl ApplicationTracker<InMemoryApplicationRepository> {
    pub fn in_memory(config: TrackerConfig) -> Self {
        Self::new(Arc::new(InMemoryApplicationRepository::new()), config)
    }
}

impl<R> ApplicationTracker<R>
where
    R: ApplicationRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: TrackerConfig) -> Self {
        Self {
            repository,
            listeners: RwLock::new(Vec::new()),
            config,
            version: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> TrackerConfig {
        self.config
    }

    /// Number of successful mutations so far. Callers polling for changes compare versions.
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    pub fn subscribe(&self, listener: Arc<dyn ChangeListener>) -> Result<(), TrackerError> {
        let mut listeners = self
            .listeners
            .write()
            .map_err(|_| TrackerError::SaveFailed)?;
        listeners.push(listener);
        Ok(())
    }

    fn publish(&self, kind: ChangeKind, id: ItemId) {
        let version = self.version.fetch_add(1, Ordering::AcqRel) + 1;
        let event = ChangeEvent { version, kind, id };

        let listeners = match self.listeners.read() {
            Ok(listeners) => listeners.clone(),
            Err(_) => {
                warn!(version, "listener registry poisoned; change not broadcast");
                return;
            }
        };

        for listener in listeners {
            if let Err(err) = listener.notify(&event) {
                warn!(version, %id, error = %err, "change listener failed");
            }
        }
    }

    /// Create an application from caller-supplied fields and admit it.
    pub fn submit(&self, draft: ApplicationDraft) -> Result<JobApplication, TrackerError> {
        self.add(JobApplication::create(draft))
    }

    /// Validate then append. A rejected application leaves the collection untouched.
    pub fn add(&self, app: JobApplication) -> Result<JobApplication, TrackerError> {
        validation::validate(&app)?;
        let stored = self.repository.add(app)?;
        self.publish(ChangeKind::Added, stored.id());
        Ok(stored)
    }

    /// Validate then replace the stored application with the same identifier.
    pub fn save(&self, app: JobApplication) -> Result<JobApplication, TrackerError> {
        validation::validate(&app)?;
        let stored = self.repository.update(app)?;
        self.publish(ChangeKind::Updated, stored.id());
        Ok(stored)
    }

    /// Change only the status, leaving concurrent edits to other fields intact.
    pub fn update_status(
        &self,
        id: ItemId,
        status: ApplicationStatus,
    ) -> Result<JobApplication, TrackerError> {
        let stored = self
            .repository
            .modify(id, &mut |app| app.update_status(status))?;
        self.publish(ChangeKind::Updated, id);
        Ok(stored)
    }

    /// Remove by identifier. Deleting an unknown id is a no-op and publishes nothing.
    pub fn delete(&self, id: ItemId) -> Result<usize, TrackerError> {
        let removed = self.repository.delete_by_id(id)?;
        if removed > 0 {
            self.publish(ChangeKind::Removed, id);
        }
        Ok(removed)
    }

    pub fn get(&self, id: ItemId) -> Result<JobApplication, TrackerError> {
        self.repository
            .fetch(id)?
            .ok_or(TrackerError::ApplicationNotFound)
    }

    pub fn list_all(&self) -> Result<Vec<JobApplication>, TrackerError> {
        self.repository.list_all()
    }

    pub fn list_by_status(
        &self,
        status: ApplicationStatus,
    ) -> Result<Vec<JobApplication>, TrackerError> {
        self.repository.list_by_status(status)
    }

    fn with_snapshot<T>(&self, view: impl FnOnce(Analytics<'_>) -> T) -> Result<T, TrackerError> {
        let snapshot = self.repository.list_all()?;
        debug!(total = snapshot.len(), "computing view over snapshot");
        Ok(view(Analytics::with_config(&snapshot, self.config)))
    }

    pub fn stats(&self) -> Result<ApplicationStats, TrackerError> {
        self.with_snapshot(|analytics| analytics.stats())
    }

    pub fn high_priority(&self) -> Result<Vec<JobApplication>, TrackerError> {
        self.with_snapshot(|analytics| owned(analytics.high_priority()))
    }

    pub fn follow_ups_due(&self, now: DateTime<Utc>) -> Result<Vec<JobApplication>, TrackerError> {
        self.with_snapshot(|analytics| owned(analytics.follow_ups_due(now)))
    }

    pub fn this_week(&self, now: DateTime<Utc>) -> Result<Vec<JobApplication>, TrackerError> {
        self.with_snapshot(|analytics| owned(analytics.this_week(now)))
    }

    pub fn active_applications(&self) -> Result<Vec<JobApplication>, TrackerError> {
        self.with_snapshot(|analytics| owned(analytics.active_applications()))
    }

    pub fn status_breakdown(&self) -> Result<Vec<BreakdownEntry<ApplicationStatus>>, TrackerError> {
        self.with_snapshot(|analytics| analytics.status_breakdown())
    }

    pub fn priority_breakdown(&self) -> Result<Vec<BreakdownEntry<Priority>>, TrackerError> {
        self.with_snapshot(|analytics| analytics.priority_breakdown())
    }

    pub fn query(&self, query: &ApplicationQuery) -> Result<Vec<JobApplication>, TrackerError> {
        let snapshot = self.repository.list_all()?;
        Ok(owned(query.apply(&snapshot)))
    }

    pub fn grouped(
        &self,
        query: &ApplicationQuery,
    ) -> Result<Option<Vec<ApplicationGroup>>, TrackerError> {
        let snapshot = self.repository.list_all()?;
        Ok(query.group(&snapshot))
    }
}
