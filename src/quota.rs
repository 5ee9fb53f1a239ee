use crate::roster::SectionRoster;
use std::fmt;

#[derive(Debug, Clone)]
pub enum QuotaError {
    ZeroWeightMass { section: String },
}

impl fmt::Display for QuotaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuotaError::ZeroWeightMass { section } => write!(
                f,
                "section {section} has zero total effort weight; cannot derive activity ratios"
            ),
        }
    }
}

impl std::error::Error for QuotaError {}

/// Normalized share of the section's total effort weight per activity,
/// aligned with the section's activity catalog. Shares sum to 1.0.
pub fn compute_shares(section: &SectionRoster) -> Result<Vec<f64>, QuotaError> {
    let mut totals = vec![0.0_f64; section.activity_count()];
    for employee in &section.employees {
        for (idx, activity) in section.activities.iter().enumerate() {
            totals[idx] += employee.weight(activity);
        }
    }
    let mass: f64 = totals.iter().sum();
    if mass <= 0.0 {
        return Err(QuotaError::ZeroWeightMass {
            section: section.name.clone(),
        });
    }
    Ok(totals.into_iter().map(|total| total / mass).collect())
}

/// Catalog indices ordered by descending share; ties keep catalog order.
fn order_by_share_desc(shares: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..shares.len()).collect();
    order.sort_by(|&a, &b| {
        shares[b]
            .partial_cmp(&shares[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    order
}

/// Catalog indices ordered by ascending share; ties keep catalog order.
fn order_by_share_asc(shares: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..shares.len()).collect();
    order.sort_by(|&a, &b| {
        shares[a]
            .partial_cmp(&shares[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    order
}

/// Integer headcount targets per activity, aligned with the catalog.
///
/// Starts from `round(share * headcount)` and corrects rounding drift so the
/// targets always sum to the section headcount exactly: surplus headcount is
/// handed to the highest-share activities (cycling), deficits are taken from
/// the lowest-share activities that still have a non-zero target (cycling).
pub fn compute_targets(shares: &[f64], headcount: usize) -> Vec<usize> {
    let mut targets: Vec<usize> = shares
        .iter()
        .map(|share| (share * headcount as f64).round() as usize)
        .collect();
    if targets.is_empty() {
        return targets;
    }

    let total: usize = targets.iter().sum();
    if total < headcount {
        let order = order_by_share_desc(shares);
        let mut missing = headcount - total;
        let mut idx = 0;
        while missing > 0 {
            targets[order[idx % order.len()]] += 1;
            missing -= 1;
            idx += 1;
        }
    } else if total > headcount {
        let order = order_by_share_asc(shares);
        let mut excess = total - headcount;
        let mut idx = 0;
        while excess > 0 {
            let candidate = order[idx % order.len()];
            if targets[candidate] > 0 {
                targets[candidate] -= 1;
                excess -= 1;
            }
            idx += 1;
        }
    }
    targets
}

/// Raises targets so every activity can hold its forced headcount, shrinking
/// the lowest-share activities with spare (non-forced) capacity to keep the
/// total equal to the section headcount. Returns the indices of the relaxed
/// activities, for warning logs.
///
/// Total forced headcount can never exceed the section headcount, so the
/// shrink step always finds enough spare capacity.
pub fn apply_forced_floor(
    targets: &mut [usize],
    forced_counts: &[usize],
    shares: &[f64],
) -> Vec<usize> {
    let mut relaxed = Vec::new();
    let mut excess = 0_usize;
    for idx in 0..targets.len() {
        if forced_counts[idx] > targets[idx] {
            excess += forced_counts[idx] - targets[idx];
            targets[idx] = forced_counts[idx];
            relaxed.push(idx);
        }
    }
    if excess == 0 {
        return relaxed;
    }

    let order = order_by_share_asc(shares);
    let mut idx = 0;
    while excess > 0 {
        let candidate = order[idx % order.len()];
        if targets[candidate] > forced_counts[candidate] {
            targets[candidate] -= 1;
            excess -= 1;
        }
        idx += 1;
    }
    relaxed
}
