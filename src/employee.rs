use crate::validation::WEIGHT_EPSILON;
use std::collections::HashMap;

/// One roster member with their historical effort weights per activity.
///
/// Weights are relative preference mass; they need not sum to exactly 1.0
/// (input noise is tolerated). Activities without an entry count as weight 0.
#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub section: String,
    pub cost_center: Option<String>,
    pub weights: HashMap<String, f64>,
}

impl Employee {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        section: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            section: section.into(),
            cost_center: None,
            weights: HashMap::new(),
        }
    }

    pub fn weight(&self, activity: &str) -> f64 {
        self.weights.get(activity).copied().unwrap_or(0.0)
    }

    pub fn set_weight(&mut self, activity: impl Into<String>, weight: f64) {
        self.weights.insert(activity.into(), weight);
    }

    /// Returns the pinned activity for a degenerate single-activity employee:
    /// exactly one weight equals 1.0 and every other weight is 0.
    pub fn forced_activity(&self) -> Option<&str> {
        let mut pinned: Option<&str> = None;
        for (activity, &weight) in &self.weights {
            if (weight - 1.0).abs() <= WEIGHT_EPSILON {
                if pinned.is_some() {
                    return None;
                }
                pinned = Some(activity.as_str());
            } else if weight.abs() > WEIGHT_EPSILON {
                return None;
            }
        }
        pinned
    }

    /// The employee's personally-highest-weight activity, resolved against the
    /// section catalog so ties break on catalog order. None when every weight
    /// is (approximately) zero.
    pub fn dominant_activity<'a>(&self, catalog: &'a [String]) -> Option<&'a str> {
        let mut best: Option<(&'a str, f64)> = None;
        for activity in catalog {
            let weight = self.weight(activity);
            if weight <= WEIGHT_EPSILON {
                continue;
            }
            match best {
                Some((_, current)) if current >= weight => {}
                _ => best = Some((activity.as_str(), weight)),
            }
        }
        best.map(|(activity, _)| activity)
    }

    /// Human-readable breakdown of the non-zero original weights, e.g.
    /// `"Corporate IT (70%), CRM Support (30%)"`, in catalog order.
    pub fn activity_breakdown(&self, catalog: &[String]) -> String {
        catalog
            .iter()
            .filter_map(|activity| {
                let weight = self.weight(activity);
                if weight > WEIGHT_EPSILON {
                    Some(format!("{} ({:.0}%)", activity, weight * 100.0))
                } else {
                    None
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}
