use crate::assignment::AssignmentMethod;
use crate::roster::SectionRoster;
use crate::scoring::ScoreMatrix;
use serde::{Deserialize, Serialize};

/// One employee's final assignment with the score it earned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    pub employee_id: String,
    pub name: String,
    pub section: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_center: Option<String>,
    pub assigned_activity: String,
    /// The employee's original weight for the activity they ended up with.
    pub original_weight: f64,
    pub score: f64,
}

/// Side-by-side view of an employee's historical split and their assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityDetail {
    pub employee_id: String,
    pub name: String,
    pub section: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_center: Option<String>,
    pub original_activities: String,
    pub assigned_activity: String,
}

/// Per-activity tally of assigned headcount against the corrected target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotaSummary {
    pub activity: String,
    pub assigned_count: usize,
    pub target_count: usize,
    pub section_ratio: f64,
    pub matches_target: bool,
}

/// A quota summary line lifted into the cross-section roll-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionQuotaSummary {
    pub section: String,
    pub activity: String,
    pub assigned_count: usize,
    pub target_count: usize,
    pub section_ratio: f64,
    pub matches_target: bool,
}

/// Everything the engine produced for one section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionOutcome {
    pub section: String,
    pub method: AssignmentMethod,
    pub assignments: Vec<AssignmentRecord>,
    pub details: Vec<ActivityDetail>,
    pub quota_summary: Vec<QuotaSummary>,
    pub preference_match_count: usize,
    /// Fraction of employees assigned their personally-dominant activity.
    pub preference_match_rate: f64,
}

impl SectionOutcome {
    pub(crate) fn build(
        section: &SectionRoster,
        shares: &[f64],
        targets: &[usize],
        scores: &ScoreMatrix,
        picks: &[usize],
        method: AssignmentMethod,
    ) -> Self {
        let mut assignments = Vec::with_capacity(section.headcount());
        let mut details = Vec::with_capacity(section.headcount());
        let mut assigned_counts = vec![0_usize; section.activity_count()];
        let mut preference_match_count = 0;

        for (employee_idx, employee) in section.employees.iter().enumerate() {
            let activity_idx = picks[employee_idx];
            let activity = &section.activities[activity_idx];
            assigned_counts[activity_idx] += 1;

            if employee.dominant_activity(&section.activities) == Some(activity.as_str()) {
                preference_match_count += 1;
            }

            assignments.push(AssignmentRecord {
                employee_id: employee.id.clone(),
                name: employee.name.clone(),
                section: section.name.clone(),
                cost_center: employee.cost_center.clone(),
                assigned_activity: activity.clone(),
                original_weight: employee.weight(activity),
                score: scores.score(employee_idx, activity_idx),
            });
            details.push(ActivityDetail {
                employee_id: employee.id.clone(),
                name: employee.name.clone(),
                section: section.name.clone(),
                cost_center: employee.cost_center.clone(),
                original_activities: employee.activity_breakdown(&section.activities),
                assigned_activity: activity.clone(),
            });
        }

        let quota_summary = section
            .activities
            .iter()
            .enumerate()
            .map(|(activity_idx, activity)| QuotaSummary {
                activity: activity.clone(),
                assigned_count: assigned_counts[activity_idx],
                target_count: targets[activity_idx],
                section_ratio: shares[activity_idx],
                matches_target: assigned_counts[activity_idx] == targets[activity_idx],
            })
            .collect();

        let headcount = section.headcount();
        let preference_match_rate = if headcount > 0 {
            preference_match_count as f64 / headcount as f64
        } else {
            0.0
        };

        Self {
            section: section.name.clone(),
            method,
            assignments,
            details,
            quota_summary,
            preference_match_count,
            preference_match_rate,
        }
    }

    pub fn headcount(&self) -> usize {
        self.assignments.len()
    }

    pub fn to_cli_summary(&self) -> String {
        let quota_ok = self
            .quota_summary
            .iter()
            .filter(|line| line.matches_target)
            .count();
        format!(
            "section={}, employees={}, method={}, match={}/{} ({:.2}%), quota_ok={}/{}",
            self.section,
            self.headcount(),
            self.method,
            self.preference_match_count,
            self.headcount(),
            self.preference_match_rate * 100.0,
            quota_ok,
            self.quota_summary.len()
        )
    }
}

/// Cross-section roll-up: plain concatenation of section outcomes, no
/// recomputation of ratios or quotas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOutcome {
    pub sections: Vec<SectionOutcome>,
}

impl RunOutcome {
    pub fn total_employees(&self) -> usize {
        self.sections.iter().map(SectionOutcome::headcount).sum()
    }

    pub fn combined_assignments(&self) -> Vec<&AssignmentRecord> {
        self.sections
            .iter()
            .flat_map(|outcome| outcome.assignments.iter())
            .collect()
    }

    pub fn combined_details(&self) -> Vec<&ActivityDetail> {
        self.sections
            .iter()
            .flat_map(|outcome| outcome.details.iter())
            .collect()
    }

    pub fn combined_summary(&self) -> Vec<SectionQuotaSummary> {
        self.sections
            .iter()
            .flat_map(|outcome| {
                outcome.quota_summary.iter().map(|line| SectionQuotaSummary {
                    section: outcome.section.clone(),
                    activity: line.activity.clone(),
                    assigned_count: line.assigned_count,
                    target_count: line.target_count,
                    section_ratio: line.section_ratio,
                    matches_target: line.matches_target,
                })
            })
            .collect()
    }

    /// Sections whose result came from the greedy fallback.
    pub fn degraded_sections(&self) -> Vec<&str> {
        self.sections
            .iter()
            .filter(|outcome| outcome.method == AssignmentMethod::Greedy)
            .map(|outcome| outcome.section.as_str())
            .collect()
    }

    pub fn to_cli_summary(&self) -> String {
        let mut parts = Vec::new();
        parts.push(format!("sections={}", self.sections.len()));
        parts.push(format!("employees={}", self.total_employees()));
        let degraded = self.degraded_sections();
        if !degraded.is_empty() {
            parts.push(format!("degraded={}", degraded.join("|")));
        }
        parts.join(", ")
    }
}
