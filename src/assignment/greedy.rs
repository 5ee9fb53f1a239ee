use crate::roster::SectionRoster;
use crate::scoring::ScoreMatrix;

/// Deterministic degradation path used when the optimizer cannot produce a
/// solution. Honors the same targets as the optimal path but trades
/// optimality for guaranteed termination and full coverage.
pub struct GreedyAssigner<'a> {
    section: &'a SectionRoster,
    targets: &'a [usize],
    scores: &'a ScoreMatrix,
    forced: &'a [Option<usize>],
}

impl<'a> GreedyAssigner<'a> {
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

    /// Assigns every employee exactly one activity:
    /// 1. forced employees take their pinned activity and consume capacity,
    /// 2. remaining candidate pairs are scanned once in stable
    ///    descending-score order, assigning wherever capacity remains,
    /// 3. any employee left over takes their single best-scoring activity
    ///    unconditionally (capacity overflow valve).
    pub fn execute(&self) -> Vec<usize> {
        let employee_count = self.section.headcount();
        let activity_count = self.section.activity_count();

        let mut used = vec![0_usize; activity_count];
        let mut picks: Vec<Option<usize>> = vec![None; employee_count];

        for (employee_idx, forced) in self.forced.iter().enumerate() {
            if let Some(activity_idx) = forced {
                picks[employee_idx] = Some(*activity_idx);
                used[*activity_idx] += 1;
            }
        }

        let mut candidates: Vec<(usize, usize, f64)> = Vec::new();
        for employee_idx in 0..employee_count {
            if picks[employee_idx].is_some() {
                continue;
            }
            for activity_idx in 0..activity_count {
                candidates.push((
                    employee_idx,
                    activity_idx,
                    self.scores.score(employee_idx, activity_idx),
                ));
            }
        }
        // Stable sort: equal scores keep employee input order, then catalog
        // order, so reruns are byte-identical.
        candidates.sort_by(|a, b| {
            b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal)
        });

        for (employee_idx, activity_idx, _) in candidates {
            if picks[employee_idx].is_some() {
                continue;
            }
            if used[activity_idx] < self.targets[activity_idx] {
                picks[employee_idx] = Some(activity_idx);
                used[activity_idx] += 1;
            }
        }

        for (employee_idx, pick) in picks.iter_mut().enumerate() {
            if pick.is_none() {
                let best = self.scores.best_activity(employee_idx);
                *pick = Some(best);
                used[best] += 1;
            }
        }

        picks.into_iter().flatten().collect()
    }
}
