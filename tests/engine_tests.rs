use assign_tool::assignment::AssignmentMethod;
use assign_tool::engine::AssignmentEngine;
use assign_tool::roster::{PreferenceRow, Roster};

fn row(id: &str, name: &str, section: &str, activity: &str, weight: f64) -> PreferenceRow {
    PreferenceRow {
        employee_id: id.to_string(),
        name: name.to_string(),
        section: section.to_string(),
        cost_center: Some("CC-100".to_string()),
        activity: activity.to_string(),
        weight,
    }
}

fn billing_roster() -> Roster {
    Roster::from_rows(vec![
        row("E1", "Somchai", "Billing", "Corporate IT", 1.0),
        row("E2", "Pranee", "Billing", "Corporate IT", 0.6),
        row("E2", "Pranee", "Billing", "CRM Support", 0.4),
        row("E3", "Anong", "Billing", "Corporate IT", 0.2),
        row("E3", "Anong", "Billing", "CRM Support", 0.8),
    ])
    .unwrap()
}

#[test]
fn single_activity_employee_is_pinned_to_it() {
    let roster = billing_roster();
    let section = roster.section("Billing").unwrap();
    let outcome = AssignmentEngine::default().assign_section(&section).unwrap();

    assert_eq!(outcome.method, AssignmentMethod::Optimal);
    let e1 = outcome
        .assignments
        .iter()
        .find(|record| record.employee_id == "E1")
        .unwrap();
    assert_eq!(e1.assigned_activity, "Corporate IT");
}

#[test]
fn optimal_path_fills_every_quota_and_covers_everyone() {
    let roster = billing_roster();
    let section = roster.section("Billing").unwrap();
    let outcome = AssignmentEngine::default().assign_section(&section).unwrap();

    assert_eq!(outcome.assignments.len(), 3);
    assert!(outcome.quota_summary.iter().all(|line| line.matches_target));
    // Corporate IT carries 60% of the section mass, so it gets 2 of 3 seats.
    let it = outcome
        .quota_summary
        .iter()
        .find(|line| line.activity == "Corporate IT")
        .unwrap();
    assert_eq!(it.target_count, 2);
    assert_eq!(it.assigned_count, 2);
}

#[test]
fn everyone_matching_their_dominant_activity_scores_full_rate() {
    let roster = billing_roster();
    let section = roster.section("Billing").unwrap();
    let outcome = AssignmentEngine::default().assign_section(&section).unwrap();

    // E1 and E2 lean Corporate IT, E3 leans CRM Support; the optimum agrees.
    assert_eq!(outcome.preference_match_count, 3);
    assert!((outcome.preference_match_rate - 1.0).abs() < 1e-9);
}

#[test]
fn roster_run_keeps_section_input_order() {
    let mut rows = vec![
        row("E1", "Somchai", "Billing", "Corporate IT", 1.0),
        row("E2", "Pranee", "Billing", "Corporate IT", 0.6),
        row("E2", "Pranee", "Billing", "CRM Support", 0.4),
    ];
    rows.push(row("F1", "Wichai", "Support", "Helpdesk", 0.5));
    rows.push(row("F1", "Wichai", "Support", "Field Ops", 0.5));
    rows.push(row("F2", "Malee", "Support", "Helpdesk", 0.5));
    rows.push(row("F2", "Malee", "Support", "Field Ops", 0.5));
    let roster = Roster::from_rows(rows).unwrap();

    let run = AssignmentEngine::default().assign_roster(&roster).unwrap();
    let names: Vec<&str> = run
        .sections
        .iter()
        .map(|outcome| outcome.section.as_str())
        .collect();
    assert_eq!(names, vec!["Billing", "Support"]);
    assert_eq!(run.total_employees(), 4);
}

#[test]
fn every_employee_appears_exactly_once_in_the_rollup() {
    let roster = billing_roster();
    let run = AssignmentEngine::default().assign_roster(&roster).unwrap();
    let mut ids: Vec<&str> = run
        .combined_assignments()
        .iter()
        .map(|record| record.employee_id.as_str())
        .collect();
    ids.sort_unstable();
    assert_eq!(ids, vec!["E1", "E2", "E3"]);
}

#[test]
fn greedy_only_marks_the_section_degraded() {
    let roster = billing_roster();
    let run = AssignmentEngine::default()
        .greedy_only(true)
        .assign_roster(&roster)
        .unwrap();

    assert_eq!(run.sections[0].method, AssignmentMethod::Greedy);
    assert_eq!(run.degraded_sections(), vec!["Billing"]);
    // Degraded still means complete: one assignment per employee.
    assert_eq!(run.total_employees(), 3);
}

#[test]
fn greedy_and_optimal_agree_on_an_easy_section() {
    let roster = billing_roster();
    let section = roster.section("Billing").unwrap();
    let engine = AssignmentEngine::default();

    let optimal = engine.assign_section(&section).unwrap();
    let greedy = engine.greedy_only(true).assign_section(&section).unwrap();

    for (a, b) in optimal.assignments.iter().zip(greedy.assignments.iter()) {
        assert_eq!(a.employee_id, b.employee_id);
        assert_eq!(a.assigned_activity, b.assigned_activity);
    }
}
