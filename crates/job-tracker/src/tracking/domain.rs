use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier assigned once when an item is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// Raised when a label does not name any variant of a tracking enum.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseLabelError {
    kind: &'static str,
    value: String,
}

impl ParseLabelError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// User-assigned urgency, independent of where the application sits in the funnel.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub const fn ordered() -> [Self; 4] {
        [Self::Low, Self::Medium, Self::High, Self::Urgent]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Urgent => "Urgent",
        }
    }

    pub const fn color(self) -> &'static str {
        match self {
            Self::Low => "green",
            Self::Medium => "blue",
            Self::High => "orange",
            Self::Urgent => "red",
        }
    }

    /// Sort weight, 1 (low) through 4 (urgent).
    pub const fn weight(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
            Self::Urgent => 4,
        }
    }

    pub const fn is_high(self) -> bool {
        matches!(self, Self::High | Self::Urgent)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Priority {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ordered()
            .into_iter()
            .find(|priority| priority.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseLabelError::new("priority", s))
    }
}

/// Position of an application in the hiring funnel.
///
/// `Applied` is the only initial state. Any status may follow any other; the funnel order only
/// drives sorting and grouping.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum ApplicationStatus {
    #[default]
    Applied,
    Screening,
    Interviewing,
    Offer,
    Rejected,
    Withdrawn,
}

impl ApplicationStatus {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Applied,
            Self::Screening,
            Self::Interviewing,
            Self::Offer,
            Self::Rejected,
            Self::Withdrawn,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Applied => "Applied",
            Self::Screening => "Screening",
            Self::Interviewing => "Interviewing",
            Self::Offer => "Offer",
            Self::Rejected => "Rejected",
            Self::Withdrawn => "Withdrawn",
        }
    }

    pub const fn color(self) -> &'static str {
        match self {
            Self::Applied => "blue",
            Self::Screening => "purple",
            Self::Interviewing => "orange",
            Self::Offer => "green",
            Self::Rejected => "red",
            Self::Withdrawn => "gray",
        }
    }

    /// Funnel position, 1 (applied) through 6 (withdrawn).
    pub const fn sort_order(self) -> u8 {
        match self {
            Self::Applied => 1,
            Self::Screening => 2,
            Self::Interviewing => 3,
            Self::Offer => 4,
            Self::Rejected => 5,
            Self::Withdrawn => 6,
        }
    }

    /// Still waiting on the employer to move things forward.
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Applied | Self::Screening)
    }

    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Rejected | Self::Withdrawn)
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ApplicationStatus {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ordered()
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseLabelError::new("status", s))
    }
}

/// Advance `stamp` to the current time. The stamp never moves backwards, even if the wall clock
/// does.
fn touch(stamp: &mut DateTime<Utc>) {
    let now = Utc::now();
    if now > *stamp {
        *stamp = now;
    }
}

/// The generic tracked record: identity, title, urgency, notes and timestamps.
///
/// Every setter refreshes `last_updated_date`, so no mutation path can skip the activity stamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackableItem {
    id: ItemId,
    title: String,
    #[serde(default)]
    priority: Priority,
    created_date: DateTime<Utc>,
    last_updated_date: DateTime<Utc>,
    #[serde(default)]
    notes: String,
}

impl TrackableItem {
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: ItemId::new(),
            title: title.into(),
            priority: Priority::default(),
            created_date: now,
            last_updated_date: now,
            notes: String::new(),
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn created_date(&self) -> DateTime<Utc> {
        self.created_date
    }

    pub fn last_updated_date(&self) -> DateTime<Utc> {
        self.last_updated_date
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.update_last_modified();
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
        self.update_last_modified();
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
        self.update_last_modified();
    }

    pub fn update_last_modified(&mut self) {
        touch(&mut self.last_updated_date);
    }
}

/// Caller-supplied fields for a new application. Everything except company and job title is
/// optional; `application_date` defaults to the creation instant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationDraft {
    pub company_name: String,
    pub job_title: String,
    pub priority: Priority,
    pub application_date: Option<DateTime<Utc>>,
    pub follow_up_date: Option<DateTime<Utc>>,
    pub salary: String,
    pub location: String,
    pub contact_email: String,
    pub contact_name: String,
    pub notes: String,
}

impl ApplicationDraft {
    pub fn new(company_name: impl Into<String>, job_title: impl Into<String>) -> Self {
        Self {
            company_name: company_name.into(),
            job_title: job_title.into(),
            ..Self::default()
        }
    }
}

/// One employer/role being pursued. Embeds the generic [`TrackableItem`]; the item's title is
/// always `"{job_title} at {company_name}"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobApplication {
    #[serde(flatten)]
    item: TrackableItem,
    company_name: String,
    job_title: String,
    application_date: DateTime<Utc>,
    #[serde(default)]
    status: ApplicationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    follow_up_date: Option<DateTime<Utc>>,
    #[serde(default)]
    salary: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    contact_email: String,
    #[serde(default)]
    contact_name: String,
}

fn derive_title(job_title: &str, company_name: &str) -> String {
    format!("{job_title} at {company_name}")
}

impl JobApplication {
    pub fn new(company_name: impl Into<String>, job_title: impl Into<String>) -> Self {
        Self::create(ApplicationDraft::new(company_name, job_title))
    }

    /// Build a fresh application in the `Applied` state with a new identifier.
    pub fn create(draft: ApplicationDraft) -> Self {
        let mut item = TrackableItem::new(derive_title(&draft.job_title, &draft.company_name));
        item.priority = draft.priority;
        item.notes = draft.notes;
        let application_date = draft.application_date.unwrap_or(item.created_date);

        Self {
            item,
            company_name: draft.company_name,
            job_title: draft.job_title,
            application_date,
            status: ApplicationStatus::Applied,
            follow_up_date: draft.follow_up_date,
            salary: draft.salary,
            location: draft.location,
            contact_email: draft.contact_email,
            contact_name: draft.contact_name,
        }
    }

    pub fn item(&self) -> &TrackableItem {
        &self.item
    }

    pub fn id(&self) -> ItemId {
        self.item.id
    }

    pub fn title(&self) -> &str {
        &self.item.title
    }

    pub fn priority(&self) -> Priority {
        self.item.priority
    }

    pub fn notes(&self) -> &str {
        &self.item.notes
    }

    pub fn created_date(&self) -> DateTime<Utc> {
        self.item.created_date
    }

    pub fn last_updated_date(&self) -> DateTime<Utc> {
        self.item.last_updated_date
    }

    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    pub fn job_title(&self) -> &str {
        &self.job_title
    }

    pub fn application_date(&self) -> DateTime<Utc> {
        self.application_date
    }

    pub fn status(&self) -> ApplicationStatus {
        self.status
    }

    pub fn follow_up_date(&self) -> Option<DateTime<Utc>> {
        self.follow_up_date
    }

    pub fn salary(&self) -> &str {
        &self.salary
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn contact_email(&self) -> &str {
        &self.contact_email
    }

    pub fn contact_name(&self) -> &str {
        &self.contact_name
    }

    /// Move to `status`. Any status is accepted from any other.
    pub fn update_status(&mut self, status: ApplicationStatus) {
        self.status = status;
        self.update_last_modified();
    }

    pub fn update_last_modified(&mut self) {
        self.item.update_last_modified();
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.item.set_priority(priority);
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.item.set_notes(notes);
    }

    pub fn set_company_name(&mut self, company_name: impl Into<String>) {
        self.company_name = company_name.into();
        self.item
            .set_title(derive_title(&self.job_title, &self.company_name));
    }

    pub fn set_job_title(&mut self, job_title: impl Into<String>) {
        self.job_title = job_title.into();
        self.item
            .set_title(derive_title(&self.job_title, &self.company_name));
    }

    pub fn set_application_date(&mut self, application_date: DateTime<Utc>) {
        self.application_date = application_date;
        self.update_last_modified();
    }

    pub fn set_follow_up_date(&mut self, follow_up_date: Option<DateTime<Utc>>) {
        self.follow_up_date = follow_up_date;
        self.update_last_modified();
    }

    pub fn set_salary(&mut self, salary: impl Into<String>) {
        self.salary = salary.into();
        self.update_last_modified();
    }

    pub fn set_location(&mut self, location: impl Into<String>) {
        self.location = location.into();
        self.update_last_modified();
    }

    pub fn set_contact_email(&mut self, contact_email: impl Into<String>) {
        self.contact_email = contact_email.into();
        self.update_last_modified();
    }

    pub fn set_contact_name(&mut self, contact_name: impl Into<String>) {
        self.contact_name = contact_name.into();
        self.update_last_modified();
    }

    /// Whole days between the application date and `now`; negative for future-dated entries.
    pub fn days_since_applied(&self, now: DateTime<Utc>) -> i64 {
        (now - self.application_date).num_days()
    }

    /// A follow-up is due when it falls inside `[now, now + window]`. The horizon saturates at
    /// the last representable instant.
    pub fn has_follow_up_due(&self, now: DateTime<Utc>, window: Duration) -> bool {
        let horizon = now
            .checked_add_signed(window)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.follow_up_date
            .is_some_and(|date| date >= now && date <= horizon)
    }
}
