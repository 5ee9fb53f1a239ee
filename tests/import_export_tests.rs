use assign_tool::engine::AssignmentEngine;
use assign_tool::persistence::{
    load_outcome_from_json, load_roster_from_csv, save_outcome_to_csv, save_outcome_to_json,
};
use std::fs;
use std::io::Write;
use tempfile::tempdir;

const SAMPLE_CSV: &str = "\
EMPLOYEE_ID,NAME,SECTION_NAME,COST_CENTER,Activity,Values
E1,Somchai,Billing,CC-100,Corporate IT,1.0
E2,Pranee,Billing,CC-100,Corporate IT,0.6
E2,Pranee,Billing,CC-100,CRM Support,0.4
E3,Anong,Billing,CC-100,Corporate IT,0.2
E3,Anong,Billing,CC-100,CRM Support,0.8
F1,Wichai,Support,,Helpdesk,0.7
F1,Wichai,Support,,Field Ops,0.3
F2,Malee,Support,,Helpdesk,0.3
F2,Malee,Support,,Field Ops,0.7
";

fn write_sample(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("preferences.csv");
    let mut file = fs::File::create(&path).unwrap();
    file.write_all(SAMPLE_CSV.as_bytes()).unwrap();
    path
}

#[test]
fn loads_roster_with_sections_in_first_appearance_order() {
    let dir = tempdir().unwrap();
    let roster = load_roster_from_csv(write_sample(dir.path())).unwrap();

    assert_eq!(roster.height(), 9);
    assert_eq!(roster.section_names().unwrap(), vec!["Billing", "Support"]);

    let billing = roster.section("Billing").unwrap();
    assert_eq!(billing.headcount(), 3);
    assert_eq!(billing.activities, vec!["Corporate IT", "CRM Support"]);
    // Blank COST_CENTER cells come through as None.
    let support = roster.section("Support").unwrap();
    assert_eq!(support.employees[0].cost_center, None);
}

#[test]
fn rejects_invalid_rows_with_their_file_position() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    let mut file = fs::File::create(&path).unwrap();
    file.write_all(
        b"EMPLOYEE_ID,NAME,SECTION_NAME,COST_CENTER,Activity,Values\n\
          E1,Somchai,Billing,CC-100,Corporate IT,-0.5\n",
    )
    .unwrap();

    let err = load_roster_from_csv(&path).unwrap_err();
    assert!(err.to_string().contains("row 2"), "got: {err}");
}

#[test]
fn rejects_a_file_with_no_data_rows() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    let mut file = fs::File::create(&path).unwrap();
    file.write_all(b"EMPLOYEE_ID,NAME,SECTION_NAME,COST_CENTER,Activity,Values\n")
        .unwrap();

    assert!(load_roster_from_csv(&path).is_err());
}

#[test]
fn writes_per_section_and_combined_csv_files() {
    let dir = tempdir().unwrap();
    let roster = load_roster_from_csv(write_sample(dir.path())).unwrap();
    let outcome = AssignmentEngine::default().assign_roster(&roster).unwrap();

    let out = dir.path().join("results");
    save_outcome_to_csv(&outcome, &out).unwrap();

    for name in [
        "Billing_assignments.csv",
        "Billing_assignments_details.csv",
        "Billing_assignments_summary.csv",
        "Support_assignments.csv",
        "Support_assignments_details.csv",
        "Support_assignments_summary.csv",
        "all_assignments.csv",
        "all_details.csv",
        "all_summary.csv",
    ] {
        assert!(out.join(name).is_file(), "missing {name}");
    }

    let assignments = fs::read_to_string(out.join("all_assignments.csv")).unwrap();
    let header = assignments.lines().next().unwrap();
    assert_eq!(
        header,
        "COST_CENTER,SECTION_NAME,EMPLOYEE_ID,NAME,ASSIGNED_ACTIVITY,ORIGINAL_VALUE,SCORE"
    );
    // Header plus one row per employee across both sections.
    assert_eq!(assignments.lines().count(), 6);

    let summary = fs::read_to_string(out.join("all_summary.csv")).unwrap();
    assert_eq!(
        summary.lines().next().unwrap(),
        "SECTION_NAME,ACTIVITY,ASSIGNED_COUNT,TARGET_COUNT,SECTION_RATIO,MATCHING"
    );
}

#[test]
fn json_outcome_round_trips() {
    let dir = tempdir().unwrap();
    let roster = load_roster_from_csv(write_sample(dir.path())).unwrap();
    let outcome = AssignmentEngine::default().assign_roster(&roster).unwrap();

    let path = dir.path().join("outcome.json");
    save_outcome_to_json(&outcome, &path).unwrap();
    let loaded = load_outcome_from_json(&path).unwrap();

    assert_eq!(loaded.sections.len(), outcome.sections.len());
    for (original, reloaded) in outcome.sections.iter().zip(loaded.sections.iter()) {
        assert_eq!(original.section, reloaded.section);
        assert_eq!(original.method, reloaded.method);
        assert_eq!(original.assignments, reloaded.assignments);
        assert_eq!(original.quota_summary, reloaded.quota_summary);
    }
}
