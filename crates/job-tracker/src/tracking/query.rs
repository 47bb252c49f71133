use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::domain::{ApplicationStatus, JobApplication, ParseLabelError, Priority};

/// Client-selectable orderings for application listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    DateDescending,
    DateAscending,
    CompanyAscending,
    CompanyDescending,
    PriorityHighToLow,
    PriorityLowToHigh,
    Status,
}

impl SortOrder {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::DateDescending,
            Self::DateAscending,
            Self::CompanyAscending,
            Self::CompanyDescending,
            Self::PriorityHighToLow,
            Self::PriorityLowToHigh,
            Self::Status,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::DateDescending => "Newest First",
            Self::DateAscending => "Oldest First",
            Self::CompanyAscending => "Company A-Z",
            Self::CompanyDescending => "Company Z-A",
            Self::PriorityHighToLow => "Priority (High to Low)",
            Self::PriorityLowToHigh => "Priority (Low to High)",
            Self::Status => "Status",
        }
    }

    /// Short form accepted on the command line.
    pub const fn key(self) -> &'static str {
        match self {
            Self::DateDescending => "date-desc",
            Self::DateAscending => "date-asc",
            Self::CompanyAscending => "company-asc",
            Self::CompanyDescending => "company-desc",
            Self::PriorityHighToLow => "priority-desc",
            Self::PriorityLowToHigh => "priority-asc",
            Self::Status => "status",
        }
    }

    fn compare(self, a: &JobApplication, b: &JobApplication) -> Ordering {
        match self {
            Self::DateDescending => b.application_date().cmp(&a.application_date()),
            Self::DateAscending => a.application_date().cmp(&b.application_date()),
            Self::CompanyAscending => compare_company(a.company_name(), b.company_name()),
            Self::CompanyDescending => compare_company(b.company_name(), a.company_name()),
            Self::PriorityHighToLow => b.priority().weight().cmp(&a.priority().weight()),
            Self::PriorityLowToHigh => a.priority().weight().cmp(&b.priority().weight()),
            Self::Status => a.status().sort_order().cmp(&b.status().sort_order()),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SortOrder {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ordered()
            .into_iter()
            .find(|order| {
                order.key().eq_ignore_ascii_case(wanted) || order.label().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| ParseLabelError::new("sort order", s))
    }
}

/// Case-insensitive first; exact text breaks ties so names differing only by case still order
/// deterministically.
fn compare_company(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Bucket heading for grouped listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum GroupKey {
    Priority(Priority),
    Status(ApplicationStatus),
}

impl GroupKey {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Priority(priority) => priority.label(),
            Self::Status(status) => status.label(),
        }
    }

    pub const fn color(self) -> &'static str {
        match self {
            Self::Priority(priority) => priority.color(),
            Self::Status(status) => status.color(),
        }
    }

    fn contains(self, app: &JobApplication) -> bool {
        match self {
            Self::Priority(priority) => app.priority() == priority,
            Self::Status(status) => app.status() == status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationGroup {
    pub key: GroupKey,
    pub label: &'static str,
    pub applications: Vec<JobApplication>,
}

/// Search text, exact-match filters and an ordering, applied in that sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationQuery {
    pub text: Option<String>,
    pub status: Option<ApplicationStatus>,
    pub priority: Option<Priority>,
    #[serde(default)]
    pub sort: SortOrder,
}

impl ApplicationQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_status(mut self, status: ApplicationStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn sorted_by(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Search matches company, job title, location or notes, ignoring case. Blank text matches
    /// everything.
    fn matches_text(&self, app: &JobApplication) -> bool {
        let needle = match self.text.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => text.to_lowercase(),
            _ => return true,
        };

        [
            app.company_name(),
            app.job_title(),
            app.location(),
            app.notes(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }

    pub fn matches(&self, app: &JobApplication) -> bool {
        self.matches_text(app)
            && self.status.map_or(true, |status| app.status() == status)
            && self.priority.map_or(true, |priority| app.priority() == priority)
    }

    /// Filtered view in the requested order. Equal keys keep their input order.
    pub fn apply<'a>(&self, applications: &'a [JobApplication]) -> Vec<&'a JobApplication> {
        let mut selected: Vec<&'a JobApplication> = applications
            .iter()
            .filter(|app| self.matches(app))
            .collect();
        selected.sort_by(|a, b| self.sort.compare(a, b));
        selected
    }

    /// Buckets for priority and status orderings, one per enum value in natural order, each
    /// sorted like the flat view. Empty buckets are omitted. Other orderings do not group.
    pub fn group(&self, applications: &[JobApplication]) -> Option<Vec<ApplicationGroup>> {
        let keys: Vec<GroupKey> = match self.sort {
            SortOrder::PriorityHighToLow | SortOrder::PriorityLowToHigh => Priority::ordered()
                .into_iter()
                .map(GroupKey::Priority)
                .collect(),
            SortOrder::Status => ApplicationStatus::ordered()
                .into_iter()
                .map(GroupKey::Status)
                .collect(),
            _ => return None,
        };

        let sorted = self.apply(applications);
        let groups = keys
            .into_iter()
            .filter_map(|key| {
                let members: Vec<JobApplication> = sorted
                    .iter()
                    .filter(|app| key.contains(app))
                    .map(|app| (*app).clone())
                    .collect();
                (!members.is_empty()).then(|| ApplicationGroup {
                    key,
                    label: key.label(),
                    applications: members,
                })
            })
            .collect();

        Some(groups)
    }
}
