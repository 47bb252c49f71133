use std::sync::OnceLock;

use regex::Regex;
use tracing::warn;

use super::domain::{JobApplication, TrackableItem};
use super::error::TrackerError;

const EMAIL_PATTERN: &str = r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,64}$";

static EMAIL_REGEX: OnceLock<Option<Regex>> = OnceLock::new();

fn email_regex() -> Option<&'static Regex> {
    EMAIL_REGEX
        .get_or_init(|| match Regex::new(EMAIL_PATTERN) {
            Ok(regex) => Some(regex),
            Err(err) => {
                warn!(error = %err, "email pattern failed to compile; rejecting all addresses");
                None
            }
        })
        .as_ref()
}

/// `local@domain.tld`, case-insensitive, with an alphabetic TLD of 2 to 64 letters.
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_some_and(|regex| regex.is_match(email))
}

/// Required-field check for the generic item.
pub fn validate_item(item: &TrackableItem) -> Result<(), TrackerError> {
    if item.title().is_empty() {
        return Err(TrackerError::EmptyFields);
    }
    Ok(())
}

/// Full admission gate for an application: required fields, contact syntax, then dates.
pub fn validate(app: &JobApplication) -> Result<(), TrackerError> {
    validate_item(app.item())?;

    if app.company_name().is_empty() || app.job_title().is_empty() {
        warn!(id = %app.id(), "application rejected: missing company or job title");
        return Err(TrackerError::EmptyFields);
    }

    validate_contact(app)?;
    validate_dates(app)
}

/// An empty contact email is allowed; anything else must look like an address.
pub fn validate_contact(app: &JobApplication) -> Result<(), TrackerError> {
    let email = app.contact_email();
    if email.is_empty() || is_valid_email(email) {
        return Ok(());
    }

    warn!(id = %app.id(), "application rejected: malformed contact email");
    Err(TrackerError::InvalidEmail)
}

/// A follow-up cannot be scheduled before the application went out.
pub fn validate_dates(app: &JobApplication) -> Result<(), TrackerError> {
    match app.follow_up_date() {
        Some(follow_up) if follow_up < app.application_date() => {
            warn!(id = %app.id(), "application rejected: follow-up precedes application date");
            Err(TrackerError::InvalidDate)
        }
        _ => Ok(()),
    }
}
