use crate::assignment::{AssignmentMethod, GreedyAssigner, OptimalAssigner};
use crate::quota::{self, QuotaError};
use crate::report::{RunOutcome, SectionOutcome};
use crate::roster::{Roster, SectionRoster};
use crate::scoring::{ScoreMatrix, ScoreWeights};
use crate::validation::{self, RosterValidationError};
use polars::prelude::PolarsError;
use rayon::prelude::*;
use std::fmt;
use tracing::{info, warn};

#[derive(Debug)]
pub enum EngineError {
    Validation(RosterValidationError),
    Quota(QuotaError),
    DataFrame(PolarsError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Validation(err) => write!(f, "input validation failed: {err}"),
            EngineError::Quota(err) => write!(f, "quota computation failed: {err}"),
            EngineError::DataFrame(err) => write!(f, "dataframe error: {err}"),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<RosterValidationError> for EngineError {
    fn from(value: RosterValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<QuotaError> for EngineError {
    fn from(value: QuotaError) -> Self {
        Self::Quota(value)
    }
}

impl From<PolarsError> for EngineError {
    fn from(value: PolarsError) -> Self {
        Self::DataFrame(value)
    }
}

/// Runs the whole pipeline for one section or a full roster: quotas, forced
/// resolution, scoring, the optimal assigner, and the greedy fallback.
#[derive(Debug, Clone, Copy)]
pub struct AssignmentEngine {
    weights: ScoreWeights,
    greedy_only: bool,
}

impl AssignmentEngine {
    pub fn new(weights: ScoreWeights) -> Self {
        Self {
            weights,
            greedy_only: false,
        }
    }

    /// Skips the optimizer entirely and goes straight to the greedy path.
    pub fn greedy_only(mut self, enabled: bool) -> Self {
        self.greedy_only = enabled;
        self
    }

    pub fn weights(&self) -> ScoreWeights {
        self.weights
    }

    pub fn assign_section(&self, section: &SectionRoster) -> Result<SectionOutcome, EngineError> {
        validation::validate_section(section)?;

        let shares = quota::compute_shares(section)?;
        let mut targets = quota::compute_targets(&shares, section.headcount());

        let forced = resolve_forced(section);
        let mut forced_counts = vec![0_usize; section.activity_count()];
        for (employee_idx, pin) in forced.iter().enumerate() {
            if let Some(activity_idx) = pin {
                forced_counts[*activity_idx] += 1;
                info!(
                    section = %section.name,
                    employee = %section.employees[employee_idx].id,
                    activity = %section.activities[*activity_idx],
                    "employee pinned to single activity"
                );
            }
        }

        for activity_idx in quota::apply_forced_floor(&mut targets, &forced_counts, &shares) {
            warn!(
                section = %section.name,
                activity = %section.activities[activity_idx],
                forced = forced_counts[activity_idx],
                "forced assignments exceed quota; target relaxed to forced count"
            );
        }

        let scores = ScoreMatrix::build(section, &shares, self.weights);
        let (picks, method) =
            solve_section(section, &targets, &scores, &forced, self.greedy_only);

        Ok(SectionOutcome::build(
            section, &shares, &targets, &scores, &picks, method,
        ))
    }

    /// Processes every section independently (sections share no state) and
    /// concatenates the outcomes in the input's section order.
    pub fn assign_roster(&self, roster: &Roster) -> Result<RunOutcome, EngineError> {
        let names = roster.section_names()?;
        let sections = names
            .par_iter()
            .map(|name| {
                let section = roster.section(name)?;
                self.assign_section(&section)
            })
            .collect::<Result<Vec<_>, EngineError>>()?;
        Ok(RunOutcome { sections })
    }
}

impl Default for AssignmentEngine {
    fn default() -> Self {
        Self::new(ScoreWeights::default())
    }
}

/// Runs the optimal assigner unless `greedy_only` is set, degrading to the
/// greedy path when the solver reports infeasibility or any other failure.
/// The greedy path is total, so this always yields one pick per employee.
fn solve_section(
    section: &SectionRoster,
    targets: &[usize],
    scores: &ScoreMatrix,
    forced: &[Option<usize>],
    greedy_only: bool,
) -> (Vec<usize>, AssignmentMethod) {
    if greedy_only {
        let picks = GreedyAssigner::new(section, targets, scores, forced).execute();
        return (picks, AssignmentMethod::Greedy);
    }
    match OptimalAssigner::new(section, targets, scores, forced).execute() {
        Ok(picks) => (picks, AssignmentMethod::Optimal),
        Err(err) => {
            warn!(
                section = %section.name,
                error = %err,
                "optimizer failed; falling back to greedy assignment"
            );
            let picks = GreedyAssigner::new(section, targets, scores, forced).execute();
            (picks, AssignmentMethod::Greedy)
        }
    }
}

/// One entry per employee in input order: the pinned activity index for
/// degenerate single-activity employees, `None` for everyone the assigner is
/// allowed to decide.
fn resolve_forced(section: &SectionRoster) -> Vec<Option<usize>> {
    section
        .employees
        .iter()
        .map(|employee| {
            employee
                .forced_activity()
                .and_then(|activity| section.activity_index(activity))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::employee::Employee;

    #[test]
    fn resolve_forced_maps_to_catalog_indices() {
        let mut pinned = Employee::new("E1", "n", "S1");
        pinned.set_weight("B", 1.0);
        let mut free = Employee::new("E2", "n", "S1");
        free.set_weight("A", 0.5);
        free.set_weight("B", 0.5);

        let section = SectionRoster {
            name: "S1".to_string(),
            activities: vec!["A".to_string(), "B".to_string()],
            employees: vec![pinned, free],
        };
        assert_eq!(resolve_forced(&section), vec![Some(1), None]);
    }

    #[test]
    fn solver_failure_falls_back_to_greedy() {
        let mut e1 = Employee::new("E1", "n", "S1");
        e1.set_weight("A", 0.5);
        e1.set_weight("B", 0.5);
        let mut e2 = Employee::new("E2", "n", "S1");
        e2.set_weight("A", 0.5);
        e2.set_weight("B", 0.5);
        let section = SectionRoster {
            name: "S1".to_string(),
            activities: vec!["A".to_string(), "B".to_string()],
            employees: vec![e1, e2],
        };
        let shares = [0.5, 0.5];
        let scores = ScoreMatrix::build(&section, &shares, ScoreWeights::default());
        let forced = vec![None, None];
        // Targets sum to 1 for 2 employees, so the optimizer reports
        // infeasibility and the greedy path must take over.
        let (picks, method) = solve_section(&section, &[1, 0], &scores, &forced, false);

        assert_eq!(method, AssignmentMethod::Greedy);
        assert_eq!(picks.len(), 2);
    }

    #[test]
    fn empty_section_fails_fast() {
        let section = SectionRoster {
            name: "S1".to_string(),
            activities: Vec::new(),
            employees: Vec::new(),
        };
        let engine = AssignmentEngine::default();
        assert!(engine.assign_section(&section).is_err());
    }
}
