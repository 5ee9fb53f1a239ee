use super::{PersistenceError, PersistenceResult};
use crate::report::RunOutcome;
use crate::roster::{PreferenceRow, Roster};
use crate::validation;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::Path;

/// Input row as it appears on disk. Header names match the upstream HR
/// export, so the file can be fed in unmodified.
#[derive(Serialize, Deserialize)]
struct PreferenceCsvRecord {
    #[serde(rename = "EMPLOYEE_ID")]
    employee_id: String,
    #[serde(rename = "NAME")]
    name: String,
    #[serde(rename = "SECTION_NAME")]
    section: String,
    #[serde(rename = "COST_CENTER", default)]
    cost_center: Option<String>,
    #[serde(rename = "Activity")]
    activity: String,
    #[serde(rename = "Values")]
    weight: f64,
}

impl PreferenceCsvRecord {
    fn into_row(self) -> PreferenceRow {
        PreferenceRow {
            employee_id: self.employee_id.trim().to_string(),
            name: self.name.trim().to_string(),
            section: self.section.trim().to_string(),
            cost_center: self
                .cost_center
                .map(|cc| cc.trim().to_string())
                .filter(|cc| !cc.is_empty()),
            activity: self.activity.trim().to_string(),
            weight: self.weight,
        }
    }
}

pub fn load_roster_from_csv<P: AsRef<Path>>(path: P) -> PersistenceResult<Roster> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut rows = Vec::new();
    for (idx, record) in reader.deserialize::<PreferenceCsvRecord>().enumerate() {
        let row = record?.into_row();
        // Header is row 1, so data rows start at 2.
        validation::validate_row(&row)
            .map_err(|err| PersistenceError::InvalidData(format!("row {}: {err}", idx + 2)))?;
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(PersistenceError::InvalidData(
            "CSV file contained no preference rows".into(),
        ));
    }

    Ok(Roster::from_rows(rows)?)
}

#[derive(Serialize)]
struct AssignmentCsvRecord<'a> {
    #[serde(rename = "COST_CENTER")]
    cost_center: &'a str,
    #[serde(rename = "SECTION_NAME")]
    section: &'a str,
    #[serde(rename = "EMPLOYEE_ID")]
    employee_id: &'a str,
    #[serde(rename = "NAME")]
    name: &'a str,
    #[serde(rename = "ASSIGNED_ACTIVITY")]
    assigned_activity: &'a str,
    #[serde(rename = "ORIGINAL_VALUE")]
    original_weight: f64,
    #[serde(rename = "SCORE")]
    score: f64,
}

#[derive(Serialize)]
struct DetailCsvRecord<'a> {
    #[serde(rename = "COST_CENTER")]
    cost_center: &'a str,
    #[serde(rename = "SECTION_NAME")]
    section: &'a str,
    #[serde(rename = "EMPLOYEE_ID")]
    employee_id: &'a str,
    #[serde(rename = "NAME")]
    name: &'a str,
    #[serde(rename = "ORIGINAL_ACTIVITIES")]
    original_activities: &'a str,
    #[serde(rename = "ASSIGNED_ACTIVITY")]
    assigned_activity: &'a str,
}

#[derive(Serialize)]
struct SummaryCsvRecord<'a> {
    #[serde(rename = "ACTIVITY")]
    activity: &'a str,
    #[serde(rename = "ASSIGNED_COUNT")]
    assigned_count: usize,
    #[serde(rename = "TARGET_COUNT")]
    target_count: usize,
    #[serde(rename = "SECTION_RATIO")]
    section_ratio: f64,
    #[serde(rename = "MATCHING")]
    matches_target: bool,
}

#[derive(Serialize)]
struct SectionSummaryCsvRecord<'a> {
    #[serde(rename = "SECTION_NAME")]
    section: &'a str,
    #[serde(rename = "ACTIVITY")]
    activity: &'a str,
    #[serde(rename = "ASSIGNED_COUNT")]
    assigned_count: usize,
    #[serde(rename = "TARGET_COUNT")]
    target_count: usize,
    #[serde(rename = "SECTION_RATIO")]
    section_ratio: f64,
    #[serde(rename = "MATCHING")]
    matches_target: bool,
}

/// Writes the per-section triple (`{section}_assignments.csv`,
/// `{section}_assignments_details.csv`, `{section}_assignments_summary.csv`)
/// plus the combined `all_assignments.csv`, `all_details.csv` and
/// `all_summary.csv` into `dir`, creating it if needed.
pub fn save_outcome_to_csv<P: AsRef<Path>>(outcome: &RunOutcome, dir: P) -> PersistenceResult<()> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    for section in &outcome.sections {
        let stem = safe_file_stem(&section.section);

        let file = File::create(dir.join(format!("{stem}_assignments.csv")))?;
        let mut writer = csv::Writer::from_writer(file);
        for record in &section.assignments {
            writer.serialize(AssignmentCsvRecord {
                cost_center: record.cost_center.as_deref().unwrap_or(""),
                section: &record.section,
                employee_id: &record.employee_id,
                name: &record.name,
                assigned_activity: &record.assigned_activity,
                original_weight: record.original_weight,
                score: record.score,
            })?;
        }
        writer.flush()?;

        let file = File::create(dir.join(format!("{stem}_assignments_details.csv")))?;
        let mut writer = csv::Writer::from_writer(file);
        for detail in &section.details {
            writer.serialize(DetailCsvRecord {
                cost_center: detail.cost_center.as_deref().unwrap_or(""),
                section: &detail.section,
                employee_id: &detail.employee_id,
                name: &detail.name,
                original_activities: &detail.original_activities,
                assigned_activity: &detail.assigned_activity,
            })?;
        }
        writer.flush()?;

        let file = File::create(dir.join(format!("{stem}_assignments_summary.csv")))?;
        let mut writer = csv::Writer::from_writer(file);
        for line in &section.quota_summary {
            writer.serialize(SummaryCsvRecord {
                activity: &line.activity,
                assigned_count: line.assigned_count,
                target_count: line.target_count,
                section_ratio: line.section_ratio,
                matches_target: line.matches_target,
            })?;
        }
        writer.flush()?;
    }

    let file = File::create(dir.join("all_assignments.csv"))?;
    let mut writer = csv::Writer::from_writer(file);
    for record in outcome.combined_assignments() {
        writer.serialize(AssignmentCsvRecord {
            cost_center: record.cost_center.as_deref().unwrap_or(""),
            section: &record.section,
            employee_id: &record.employee_id,
            name: &record.name,
            assigned_activity: &record.assigned_activity,
            original_weight: record.original_weight,
            score: record.score,
        })?;
    }
    writer.flush()?;

    let file = File::create(dir.join("all_details.csv"))?;
    let mut writer = csv::Writer::from_writer(file);
    for detail in outcome.combined_details() {
        writer.serialize(DetailCsvRecord {
            cost_center: detail.cost_center.as_deref().unwrap_or(""),
            section: &detail.section,
            employee_id: &detail.employee_id,
            name: &detail.name,
            original_activities: &detail.original_activities,
            assigned_activity: &detail.assigned_activity,
        })?;
    }
    writer.flush()?;

    let file = File::create(dir.join("all_summary.csv"))?;
    let mut writer = csv::Writer::from_writer(file);
    for line in outcome.combined_summary() {
        writer.serialize(SectionSummaryCsvRecord {
            section: &line.section,
            activity: &line.activity,
            assigned_count: line.assigned_count,
            target_count: line.target_count,
            section_ratio: line.section_ratio,
            matches_target: line.matches_target,
        })?;
    }
    writer.flush()?;

    Ok(())
}

pub fn save_outcome_to_json<P: AsRef<Path>>(outcome: &RunOutcome, path: P) -> PersistenceResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, outcome)?;
    Ok(())
}

pub fn load_outcome_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<RunOutcome> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(file)?)
}

/// Section names become file stems, so path separators are replaced.
fn safe_file_stem(section: &str) -> String {
    section.replace(['/', '\\'], "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_stem_strips_path_separators() {
        assert_eq!(safe_file_stem("Billing/North"), "Billing_North");
        assert_eq!(safe_file_stem(r"Ops\South"), "Ops_South");
        assert_eq!(safe_file_stem("Billing"), "Billing");
    }
}
