//! Job application tracking: the entity model, validation gate, in-memory store and the read
//! views (statistics, follow-ups, search and sort) computed over it.

pub mod analytics;
pub mod domain;
pub mod error;
pub mod query;
pub mod repository;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use analytics::{Analytics, ApplicationStats, BreakdownEntry};
pub use domain::{
    ApplicationDraft, ApplicationStatus, ItemId, JobApplication, ParseLabelError, Priority,
    TrackableItem,
};
pub use error::TrackerError;
pub use query::{ApplicationGroup, ApplicationQuery, GroupKey, SortOrder};
pub use repository::{ApplicationRepository, InMemoryApplicationRepository};
pub use service::{ApplicationTracker, ChangeEvent, ChangeKind, ChangeListener, ListenerError};
pub use validation::{is_valid_email, validate, validate_contact, validate_dates, validate_item};
