use super::AssignmentError;
use crate::roster::SectionRoster;
use crate::scoring::ScoreMatrix;
use good_lp::{
    Expression, ResolutionError, Solution, SolverModel, constraint, default_solver, variable,
    variables,
};

/// Formulates the section's assignment as a maximum-weight binary program and
/// hands it to the external solver.
///
/// One binary variable per (employee, activity) pair; each employee is
/// assigned exactly one activity, each activity receives exactly its target
/// headcount, and forced employees have their pinned pair fixed to 1. The
/// caller must pass targets that already sum to the section headcount and
/// hold every activity's forced count.
pub struct OptimalAssigner<'a> {
    section: &'a SectionRoster,
    targets: &'a [usize],
    scores: &'a ScoreMatrix,
    forced: &'a [Option<usize>],
}

impl<'a> OptimalAssigner<'a> {
    pub fn new(
        section: &'a SectionRoster,
        targets: &'a [usize],
        scores: &'a ScoreMatrix,
        forced: &'a [Option<usize>],
    ) -> Self {
        Self {
            section,
            targets,
            scores,
            forced,
        }
    }

    /// Solves the program and reads off one activity index per employee, in
    /// employee input order. Infeasibility and solver failures come back as
    /// errors for the caller's fallback path; nothing is ever half-applied.
    pub fn execute(&self) -> Result<Vec<usize>, AssignmentError> {
        let employee_count = self.section.headcount();
        let activity_count = self.section.activity_count();

        let mut vars = variables!();
        let assign: Vec<Vec<_>> = (0..employee_count)
            .map(|_| {
                (0..activity_count)
                    .map(|_| vars.add(variable().binary()))
                    .collect()
            })
            .collect();

        let mut objective = Expression::from(0.0);
        for employee_idx in 0..employee_count {
            for activity_idx in 0..activity_count {
                objective = objective
                    + self.scores.score(employee_idx, activity_idx)
                        * assign[employee_idx][activity_idx];
            }
        }

        let mut model = vars.maximise(objective).using(default_solver);

        // Each employee ends up with exactly one activity.
        for row in &assign {
            let picked = row
                .iter()
                .fold(Expression::from(0.0), |acc, var| acc + *var);
            model = model.with(constraint!(picked == 1.0));
        }

        // Each activity receives exactly its corrected target headcount,
        // including targets of zero.
        for (activity_idx, &target) in self.targets.iter().enumerate() {
            let filled = assign
                .iter()
                .fold(Expression::from(0.0), |acc, row| acc + row[activity_idx]);
            model = model.with(constraint!(filled == target as f64));
        }

        for (employee_idx, forced) in self.forced.iter().enumerate() {
            if let Some(activity_idx) = forced {
                model = model.with(constraint!(assign[employee_idx][*activity_idx] == 1.0));
            }
        }

        let solution = model.solve().map_err(|err| match err {
            ResolutionError::Infeasible => AssignmentError::Infeasible,
            other => AssignmentError::Solver(other.to_string()),
        })?;

        let mut picks = Vec::with_capacity(employee_count);
        for (employee_idx, row) in assign.iter().enumerate() {
            let chosen = row
                .iter()
                .position(|var| solution.value(*var) > 0.5)
                .ok_or_else(|| {
                    AssignmentError::Solver(format!(
                        "no activity selected for employee {}",
                        self.section.employees[employee_idx].id
                    ))
                })?;
            picks.push(chosen);
        }
        Ok(picks)
    }
}
