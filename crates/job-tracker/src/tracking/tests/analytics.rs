use chrono::Duration;

use super::common::*;
use crate::config::TrackerConfig;
use crate::tracking::analytics::{Analytics, ApplicationStats};
use crate::tracking::domain::{ApplicationStatus, JobApplication, Priority};

fn companies(applications: &[&JobApplication]) -> Vec<String> {
    applications
        .iter()
        .map(|app| app.company_name().to_string())
        .collect()
}

fn with_follow_up(company: &str, offset: Duration) -> JobApplication {
    let mut app = application(company, "Engineer");
    app.set_follow_up_date(Some(reference_now() + offset));
    app
}

#[test]
fn stats_on_empty_collection_are_zero() {
    let stats = Analytics::new(&[]).stats();
    assert_eq!(stats, ApplicationStats::default());
    assert_eq!(stats.success_rate, 0.0);
    assert_eq!(stats.interview_rate, 0.0);
}

#[test]
fn stats_count_each_funnel_stage() {
    let applications = one_of_each_status();
    let stats = Analytics::new(&applications).stats();

    assert_eq!(stats.total, 6);
    assert_eq!(stats.interviews, 1);
    assert_eq!(stats.offers, 1);
    assert_eq!(stats.rejections, 1);
    assert_eq!(stats.pending, 2);
    assert!((stats.success_rate - 16.666).abs() < 0.01);
    assert!((stats.interview_rate - 16.666).abs() < 0.01);
}

#[test]
fn high_priority_selects_high_and_urgent() {
    let applications = vec![
        application_with("Low", ApplicationStatus::Applied, Priority::Low, 1),
        application_with("High", ApplicationStatus::Applied, Priority::High, 1),
        application_with("Medium", ApplicationStatus::Applied, Priority::Medium, 1),
        application_with("Urgent", ApplicationStatus::Offer, Priority::Urgent, 1),
    ];

    let selected = Analytics::new(&applications).high_priority();
    assert_eq!(companies(&selected), vec!["High", "Urgent"]);
}

#[test]
fn follow_ups_due_only_within_window() {
    let applications = vec![
        with_follow_up("Soon", Duration::days(1)),
        with_follow_up("Later", Duration::days(10)),
    ];

    let due = Analytics::new(&applications).follow_ups_due(reference_now());
    assert_eq!(companies(&due), vec!["Soon"]);
}

#[test]
fn follow_ups_due_sorted_soonest_first_with_inclusive_bounds() {
    let applications = vec![
        with_follow_up("Edge", Duration::days(3)),
        application("NoFollowUp", "Engineer"),
        with_follow_up("Past", -Duration::hours(1)),
        with_follow_up("Now", Duration::zero()),
        with_follow_up("Tomorrow", Duration::days(1)),
        with_follow_up("JustPast", Duration::days(3) + Duration::seconds(1)),
    ];

    let due = Analytics::new(&applications).follow_ups_due(reference_now());
    assert_eq!(companies(&due), vec!["Now", "Tomorrow", "Edge"]);
}

#[test]
fn follow_up_window_is_configurable() {
    let applications = vec![with_follow_up("NextWeek", Duration::days(6))];
    let config = TrackerConfig {
        follow_up_window_days: 7,
        ..TrackerConfig::default()
    };

    assert!(Analytics::new(&applications)
        .follow_ups_due(reference_now())
        .is_empty());
    let due = Analytics::with_config(&applications, config).follow_ups_due(reference_now());
    assert_eq!(companies(&due), vec!["NextWeek"]);
}

#[test]
fn this_week_covers_last_seven_days() {
    let applications = vec![
        application_with("Today", ApplicationStatus::Applied, Priority::Low, 0),
        application_with("SixDays", ApplicationStatus::Applied, Priority::Low, 6),
        application_with("SevenDays", ApplicationStatus::Applied, Priority::Low, 7),
        application_with("EightDays", ApplicationStatus::Applied, Priority::Low, 8),
        application_with("Month", ApplicationStatus::Applied, Priority::Low, 30),
    ];

    let recent = Analytics::new(&applications).this_week(reference_now());
    assert_eq!(companies(&recent), vec!["Today", "SixDays", "SevenDays"]);
}

#[test]
fn oversized_windows_saturate_instead_of_overflowing() {
    let applications = vec![
        with_follow_up("Soon", Duration::days(2)),
        with_follow_up("Overdue", Duration::days(-1)),
        application_with("Ancient", ApplicationStatus::Applied, Priority::Low, 3650),
    ];
    let config = TrackerConfig {
        follow_up_window_days: u32::MAX,
        recent_window_days: u32::MAX,
    };
    let analytics = Analytics::with_config(&applications, config);

    let due = analytics.follow_ups_due(reference_now());
    assert_eq!(companies(&due), vec!["Soon"]);
    assert_eq!(analytics.this_week(reference_now()).len(), 3);
}

#[test]
fn active_excludes_rejected_and_withdrawn() {
    let applications = one_of_each_status();
    let active = Analytics::new(&applications).active_applications();

    assert_eq!(active.len(), 4);
    assert!(active.iter().all(|app| !matches!(
        app.status(),
        ApplicationStatus::Rejected | ApplicationStatus::Withdrawn
    )));
}

#[test]
fn breakdowns_list_every_value_in_natural_order() {
    let mut applications = one_of_each_status();
    applications.push(application_with(
        "Extra",
        ApplicationStatus::Applied,
        Priority::Urgent,
        0,
    ));
    let analytics = Analytics::new(&applications);

    let statuses = analytics.status_breakdown();
    assert_eq!(statuses.len(), 6);
    assert_eq!(statuses[0].key, ApplicationStatus::Applied);
    assert_eq!(statuses[0].count, 2);
    assert_eq!(statuses[0].label, "Applied");
    assert!(statuses[1..].iter().all(|entry| entry.count == 1));

    let priorities = analytics.priority_breakdown();
    let counts: Vec<usize> = priorities.iter().map(|entry| entry.count).collect();
    assert_eq!(counts, vec![0, 6, 0, 1]);
    assert_eq!(priorities[3].color, "red");
}
