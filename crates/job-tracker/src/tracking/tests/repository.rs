use std::thread;

use super::common::*;
use crate::tracking::domain::{ApplicationStatus, ItemId, Priority};
use crate::tracking::error::TrackerError;
use crate::tracking::repository::{ApplicationRepository, InMemoryApplicationRepository};

#[test]
fn add_preserves_insertion_order_and_allows_duplicates() {
    let repository = InMemoryApplicationRepository::new();
    let first = repository.add(application("Acme", "Engineer")).expect("add");
    let second = repository.add(application("Acme", "Engineer")).expect("add");

    let all = repository.list_all().expect("list");
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id(), first.id());
    assert_eq!(all[1].id(), second.id());
}

#[test]
fn update_replaces_whole_entity_and_refreshes_timestamp() {
    let repository = InMemoryApplicationRepository::new();
    let stored = repository.add(application("Acme", "Engineer")).expect("add");
    let before = stored.last_updated_date();

    let mut edited = stored.clone();
    edited.set_priority(Priority::Urgent);
    edited.set_notes("Hiring manager replied");
    let updated = repository.update(edited).expect("update");

    assert!(updated.last_updated_date() >= before);
    let fetched = repository
        .fetch(stored.id())
        .expect("fetch")
        .expect("present");
    assert_eq!(fetched, updated);
    assert_eq!(fetched.priority(), Priority::Urgent);
    assert_eq!(fetched.notes(), "Hiring manager replied");
    assert_eq!(repository.list_all().expect("list").len(), 1);
}

#[test]
fn update_of_unknown_id_reports_not_found_and_changes_nothing() {
    let repository = InMemoryApplicationRepository::new();
    let stored = repository.add(application("Acme", "Engineer")).expect("add");

    let stranger = application("Globex", "Analyst");
    assert_eq!(
        repository.update(stranger),
        Err(TrackerError::ApplicationNotFound)
    );
    assert_eq!(repository.list_all().expect("list"), vec![stored]);
}

#[test]
fn modify_applies_change_in_place_and_refreshes_timestamp() {
    let repository = InMemoryApplicationRepository::new();
    let stored = repository.add(application("Acme", "Engineer")).expect("add");

    let modified = repository
        .modify(stored.id(), &mut |app| app.set_salary("$175k"))
        .expect("modify");

    assert_eq!(modified.salary(), "$175k");
    assert!(modified.last_updated_date() >= stored.last_updated_date());
    assert_eq!(repository.list_all().expect("list"), vec![modified]);
}

#[test]
fn modify_of_unknown_id_reports_not_found() {
    let repository = InMemoryApplicationRepository::new();
    let mut called = false;

    assert_eq!(
        repository.modify(ItemId::new(), &mut |_| called = true),
        Err(TrackerError::ApplicationNotFound)
    );
    assert!(!called);
}

#[test]
fn concurrent_modifications_are_not_lost() {
    let repository = InMemoryApplicationRepository::new();
    let stored = repository.add(application("Acme", "Engineer")).expect("add");

    thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                for _ in 0..25 {
                    repository
                        .modify(stored.id(), &mut |app| {
                            let notes = format!("{}.", app.notes());
                            app.set_notes(notes);
                        })
                        .expect("modify");
                }
            });
        }
    });

    let fetched = repository
        .fetch(stored.id())
        .expect("fetch")
        .expect("present");
    assert_eq!(fetched.notes().len(), 200);
}

#[test]
fn delete_removes_matching_id_and_ignores_unknown() {
    let repository = InMemoryApplicationRepository::new();
    let keep = repository.add(application("Acme", "Engineer")).expect("add");
    let drop = repository.add(application("Globex", "Analyst")).expect("add");

    assert_eq!(repository.delete_by_id(ItemId::new()), Ok(0));
    assert_eq!(repository.delete_by_id(drop.id()), Ok(1));
    assert_eq!(repository.delete_by_id(drop.id()), Ok(0));

    let remaining = repository.list_all().expect("list");
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id(), keep.id());
}

#[test]
fn list_by_status_keeps_insertion_order() {
    let repository = InMemoryApplicationRepository::with_applications(vec![
        application_with("Zeta", ApplicationStatus::Interviewing, Priority::Low, 3),
        application_with("Alpha", ApplicationStatus::Applied, Priority::Low, 2),
        application_with("Mu", ApplicationStatus::Interviewing, Priority::Low, 1),
    ]);

    let interviewing: Vec<String> = repository
        .list_by_status(ApplicationStatus::Interviewing)
        .expect("list")
        .iter()
        .map(|app| app.company_name().to_string())
        .collect();
    assert_eq!(interviewing, vec!["Zeta", "Mu"]);
    assert!(repository
        .list_by_status(ApplicationStatus::Offer)
        .expect("list")
        .is_empty());
}
