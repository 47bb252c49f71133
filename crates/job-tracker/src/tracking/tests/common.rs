use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::config::TrackerConfig;
use crate::tracking::domain::{
    ApplicationDraft, ApplicationStatus, ItemId, JobApplication, Priority,
};
use crate::tracking::error::TrackerError;
use crate::tracking::repository::{ApplicationRepository, InMemoryApplicationRepository};
use crate::tracking::service::{ApplicationTracker, ChangeEvent, ChangeListener, ListenerError};

pub(super) fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 6, 9, 0, 0)
        .single()
        .expect("valid reference instant")
}

pub(super) fn draft(company: &str, role: &str) -> ApplicationDraft {
    ApplicationDraft {
        company_name: company.to_string(),
        job_title: role.to_string(),
        priority: Priority::Medium,
        application_date: Some(reference_now() - Duration::days(1)),
        follow_up_date: None,
        salary: "$140k - $160k".to_string(),
        location: "Remote".to_string(),
        contact_email: "recruiting@example.com".to_string(),
        contact_name: "Dana Recruiter".to_string(),
        notes: String::new(),
    }
}

pub(super) fn application(company: &str, role: &str) -> JobApplication {
    JobApplication::create(draft(company, role))
}

pub(super) fn application_with(
    company: &str,
    status: ApplicationStatus,
    priority: Priority,
    days_ago: i64,
) -> JobApplication {
    let mut draft = draft(company, "Software Engineer");
    draft.priority = priority;
    draft.application_date = Some(reference_now() - Duration::days(days_ago));
    let mut app = JobApplication::create(draft);
    app.update_status(status);
    app
}

/// One application per status, in funnel order.
pub(super) fn one_of_each_status() -> Vec<JobApplication> {
    ApplicationStatus::ordered()
        .into_iter()
        .enumerate()
        .map(|(index, status)| {
            application_with(
                &format!("Company {index}"),
                status,
                Priority::Medium,
                index as i64,
            )
        })
        .collect()
}

pub(super) fn build_tracker() -> (
    ApplicationTracker<InMemoryApplicationRepository>,
    Arc<InMemoryApplicationRepository>,
    Arc<RecordingListener>,
) {
    let repository = Arc::new(InMemoryApplicationRepository::new());
    let listener = Arc::new(RecordingListener::default());
    let tracker = ApplicationTracker::new(repository.clone(), TrackerConfig::default());
    tracker
        .subscribe(listener.clone())
        .expect("listener registers");
    (tracker, repository, listener)
}

#[derive(Default)]
pub(super) struct RecordingListener {
    events: Mutex<Vec<ChangeEvent>>,
}

impl RecordingListener {
    pub(super) fn events(&self) -> Vec<ChangeEvent> {
        self.events.lock().expect("listener mutex poisoned").clone()
    }
}

impl ChangeListener for RecordingListener {
    fn notify(&self, event: &ChangeEvent) -> Result<(), ListenerError> {
        self.events
            .lock()
            .expect("listener mutex poisoned")
            .push(event.clone());
        Ok(())
    }
}

pub(super) struct FailingListener;

impl ChangeListener for FailingListener {
    fn notify(&self, _event: &ChangeEvent) -> Result<(), ListenerError> {
        Err(ListenerError::Unavailable("view closed".to_string()))
    }
}

pub(super) struct UnavailableRepository;

impl ApplicationRepository for UnavailableRepository {
    fn add(&self, _app: JobApplication) -> Result<JobApplication, TrackerError> {
        Err(TrackerError::SaveFailed)
    }

    fn update(&self, _app: JobApplication) -> Result<JobApplication, TrackerError> {
        Err(TrackerError::SaveFailed)
    }

    fn modify(
        &self,
        _id: ItemId,
        _change: &mut dyn FnMut(&mut JobApplication),
    ) -> Result<JobApplication, TrackerError> {
        Err(TrackerError::SaveFailed)
    }

    fn delete_by_id(&self, _id: ItemId) -> Result<usize, TrackerError> {
        Err(TrackerError::SaveFailed)
    }

    fn fetch(&self, _id: ItemId) -> Result<Option<JobApplication>, TrackerError> {
        Err(TrackerError::SaveFailed)
    }

    fn list_all(&self) -> Result<Vec<JobApplication>, TrackerError> {
        Err(TrackerError::SaveFailed)
    }

    fn list_by_status(
        &self,
        _status: ApplicationStatus,
    ) -> Result<Vec<JobApplication>, TrackerError> {
        Err(TrackerError::SaveFailed)
    }
}
