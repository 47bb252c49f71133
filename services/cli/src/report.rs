use crate::cli::{ListArgs, OutputOptions, ReportArgs, SnapshotArgs};
use crate::infra::{admit, load_snapshot, Rejection};
use chrono::{DateTime, Utc};
use job_tracker::config::TrackerConfig;
use job_tracker::error::AppError;
use job_tracker::tracking::{
    validate, ApplicationGroup, ApplicationQuery, ApplicationStats, ApplicationStatus,
    BreakdownEntry, JobApplication,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct DashboardReport {
    evaluated_at: DateTime<Utc>,
    stats: ApplicationStats,
    status_breakdown: Vec<BreakdownEntry<ApplicationStatus>>,
    high_priority: Vec<JobApplication>,
    follow_ups_due: Vec<JobApplication>,
    this_week: Vec<JobApplication>,
    active: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    rejected: Vec<Rejection>,
}

#[derive(Debug, Serialize)]
struct ListReport {
    query: ApplicationQuery,
    #[serde(skip_serializing_if = "Option::is_none")]
    groups: Option<Vec<ApplicationGroup>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    applications: Option<Vec<JobApplication>>,
}

#[derive(Debug, Serialize)]
struct ValidationReport {
    checked: usize,
    valid: usize,
    rejected: Vec<Rejection>,
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn describe(app: &JobApplication) -> String {
    let mut line = format!(
        "{} [{} | {}] applied {}",
        app.title(),
        app.status().label(),
        app.priority().label(),
        app.application_date().format("%Y-%m-%d")
    );
    if !app.location().is_empty() {
        line.push_str(&format!(", {}", app.location()));
    }
    if let Some(follow_up) = app.follow_up_date() {
        line.push_str(&format!(", follow up {}", follow_up.format("%Y-%m-%d")));
    }
    line
}

fn print_section(heading: &str, applications: &[JobApplication]) {
    if applications.is_empty() {
        println!("\n{heading}: none");
        return;
    }
    println!("\n{heading}");
    for app in applications {
        println!("- {}", describe(app));
    }
}

fn print_rejections(rejections: &[Rejection]) {
    if rejections.is_empty() {
        return;
    }
    println!("\nSkipped entries");
    for rejection in rejections {
        let title = if rejection.title.is_empty() {
            "(untitled)"
        } else {
            rejection.title.as_str()
        };
        println!(
            "- #{} {} ({}): {}",
            rejection.index, title, rejection.id, rejection.reason
        );
    }
}

pub(crate) fn run_report(
    args: ReportArgs,
    config: TrackerConfig,
    output: OutputOptions,
) -> Result<(), AppError> {
    let now = args.now.unwrap_or_else(Utc::now);
    let (tracker, rejected) = admit(load_snapshot(&args.snapshot.input)?, config)?;

    let report = DashboardReport {
        evaluated_at: now,
        stats: tracker.stats()?,
        status_breakdown: tracker.status_breakdown()?,
        high_priority: tracker.high_priority()?,
        follow_ups_due: tracker.follow_ups_due(now)?,
        this_week: tracker.this_week(now)?,
        active: tracker.active_applications()?.len(),
        rejected,
    };

    if output.json {
        return print_json(&report);
    }

    let stats = &report.stats;
    println!("Job search report ({})", now.format("%Y-%m-%d %H:%M UTC"));
    println!(
        "{} applications, {} active, {} pending, {} interviewing, {} offers, {} rejected",
        stats.total, report.active, stats.pending, stats.interviews, stats.offers, stats.rejections
    );
    println!(
        "Interview rate {:.1}%, success rate {:.1}%",
        stats.interview_rate, stats.success_rate
    );

    println!("\nBy status");
    for entry in &report.status_breakdown {
        println!("- {}: {}", entry.label, entry.count);
    }

    print_section("High priority", &report.high_priority);
    print_section(
        &format!("Follow-ups due (next {} days)", config.follow_up_window_days),
        &report.follow_ups_due,
    );
    print_section(
        &format!("Applied in the last {} days", config.recent_window_days),
        &report.this_week,
    );
    print_rejections(&report.rejected);
    Ok(())
}

pub(crate) fn run_follow_ups(
    args: ReportArgs,
    config: TrackerConfig,
    output: OutputOptions,
) -> Result<(), AppError> {
    let now = args.now.unwrap_or_else(Utc::now);
    let (tracker, rejected) = admit(load_snapshot(&args.snapshot.input)?, config)?;
    let due = tracker.follow_ups_due(now)?;

    if output.json {
        return print_json(&due);
    }

    print_section(
        &format!("Follow-ups due (next {} days)", config.follow_up_window_days),
        &due,
    );
    print_rejections(&rejected);
    Ok(())
}

pub(crate) fn run_list(
    args: ListArgs,
    config: TrackerConfig,
    output: OutputOptions,
) -> Result<(), AppError> {
    let (tracker, rejected) = admit(load_snapshot(&args.snapshot.input)?, config)?;

    let mut query = ApplicationQuery::new().sorted_by(args.sort);
    if let Some(text) = args.search {
        query = query.with_text(text);
    }
    if let Some(status) = args.status {
        query = query.with_status(status);
    }
    if let Some(priority) = args.priority {
        query = query.with_priority(priority);
    }

    let groups = if args.grouped {
        tracker.grouped(&query)?
    } else {
        None
    };
    let applications = match groups {
        Some(_) => None,
        None => Some(tracker.query(&query)?),
    };

    if output.json {
        return print_json(&ListReport {
            query,
            groups,
            applications,
        });
    }

    println!("Sorted by {}", query.sort.label());
    if let Some(groups) = &groups {
        for group in groups {
            print_section(group.label, &group.applications);
        }
    }
    if let Some(applications) = &applications {
        print_section("Applications", applications);
    }
    print_rejections(&rejected);
    Ok(())
}

pub(crate) fn run_validate(args: SnapshotArgs, output: OutputOptions) -> Result<(), AppError> {
    let applications = load_snapshot(&args.input)?;
    let checked = applications.len();

    let rejected: Vec<Rejection> = applications
        .iter()
        .enumerate()
        .filter_map(|(index, app)| {
            validate(app).err().map(|err| Rejection {
                index,
                id: app.id().to_string(),
                title: app.title().to_string(),
                kind: err.kind_label(),
                reason: err.message(),
            })
        })
        .collect();

    let report = ValidationReport {
        checked,
        valid: checked - rejected.len(),
        rejected,
    };

    if output.json {
        print_json(&report)?;
    } else {
        println!("{} of {} applications valid", report.valid, report.checked);
        print_rejections(&report.rejected);
    }

    if report.rejected.is_empty() {
        Ok(())
    } else {
        Err(AppError::Input(format!(
            "{} application(s) failed validation",
            report.rejected.len()
        )))
    }
}
