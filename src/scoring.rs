use crate::roster::SectionRoster;
use serde::{Deserialize, Serialize};

/// Blend weights for the assignment score. The two parts need not sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub individual: f64,
    pub section: f64,
}

impl ScoreWeights {
    pub fn new(individual: f64, section: f64) -> Self {
        Self {
            individual,
            section,
        }
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            individual: 0.7,
            section: 0.3,
        }
    }
}

/// Dense desirability scores over every (employee, activity) pair in one
/// section, including zero-weight pairs so quotas can force a non-preferred
/// fit. Indices follow the section's employee input order and activity
/// catalog order.
pub struct ScoreMatrix {
    values: Vec<Vec<f64>>,
}

impl ScoreMatrix {
    pub fn build(section: &SectionRoster, shares: &[f64], weights: ScoreWeights) -> Self {
        let values = section
            .employees
            .iter()
            .map(|employee| {
                section
                    .activities
                    .iter()
                    .enumerate()
                    .map(|(activity_idx, activity)| {
                        weights.individual * employee.weight(activity)
                            + weights.section * shares[activity_idx]
                    })
                    .collect()
            })
            .collect();
        Self { values }
    }

    pub fn score(&self, employee_idx: usize, activity_idx: usize) -> f64 {
        self.values[employee_idx][activity_idx]
    }

    /// Highest-scoring activity for one employee; ties break on catalog order.
    pub fn best_activity(&self, employee_idx: usize) -> usize {
        let row = &self.values[employee_idx];
        let mut best = 0;
        for (activity_idx, &score) in row.iter().enumerate() {
            if score > row[best] {
                best = activity_idx;
            }
        }
        best
    }

    pub fn employee_count(&self) -> usize {
        self.values.len()
    }

    pub fn activity_count(&self) -> usize {
        self.values.first().map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::employee::Employee;

    fn one_employee_section() -> SectionRoster {
        let mut employee = Employee::new("E1", "Somchai", "S1");
        employee.set_weight("A", 0.8);
        SectionRoster {
            name: "S1".to_string(),
            activities: vec!["A".to_string(), "B".to_string()],
            employees: vec![employee],
        }
    }

    #[test]
    fn default_weights_are_point_seven_point_three() {
        let weights = ScoreWeights::default();
        assert_eq!(weights.individual, 0.7);
        assert_eq!(weights.section, 0.3);
    }

    #[test]
    fn blends_individual_and_section_terms() {
        let section = one_employee_section();
        let matrix = ScoreMatrix::build(&section, &[0.75, 0.25], ScoreWeights::default());
        assert!((matrix.score(0, 0) - (0.7 * 0.8 + 0.3 * 0.75)).abs() < 1e-9);
    }

    #[test]
    fn missing_weight_scores_only_the_section_term() {
        let section = one_employee_section();
        let matrix = ScoreMatrix::build(&section, &[0.75, 0.25], ScoreWeights::default());
        assert!((matrix.score(0, 1) - 0.3 * 0.25).abs() < 1e-9);
    }

    #[test]
    fn best_activity_ties_break_on_catalog_order() {
        let employee = Employee::new("E1", "Somchai", "S1");
        let section = SectionRoster {
            name: "S1".to_string(),
            activities: vec!["A".to_string(), "B".to_string()],
            employees: vec![employee],
        };
        let matrix = ScoreMatrix::build(&section, &[0.5, 0.5], ScoreWeights::default());
        assert_eq!(matrix.best_activity(0), 0);
    }
}
