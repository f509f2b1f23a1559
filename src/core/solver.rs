use serde::Serialize;
use thiserror::Error;

use super::{SimulationParams, simulate};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BreakEvenTarget {
    MonthlyRent,
    HomePrice,
}

#[derive(Debug, Clone, Copy)]
pub struct BreakEvenConfig {
    pub target: BreakEvenTarget,
    pub search_min: f64,
    pub search_max: f64,
    pub tolerance: f64,
    pub max_iterations: u32,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakEvenIteration {
    pub iteration: u32,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub candidate_value: f64,
    pub net_worth_gap: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakEvenResult {
    pub target: BreakEvenTarget,
    pub search_min: f64,
    pub search_max: f64,
    pub tolerance: f64,
    pub max_iterations: u32,
    pub solved_value: Option<f64>,
    /// Final owner net worth minus final renter net worth at `solved_value`.
    pub achieved_gap: Option<f64>,
    pub iterations: Vec<BreakEvenIteration>,
    pub converged: bool,
    pub feasible: bool,
    pub message: String,
}

#[derive(Debug, Error, PartialEq)]
pub enum SolverError {
    #[error("search bounds must be finite")]
    NonFiniteBounds,
    #[error("search_max must be greater than search_min")]
    EmptyRange,
    #[error("tolerance must be > 0")]
    InvalidTolerance,
    #[error("max_iterations must be > 0")]
    NoIterations,
}

/// Bisects `config.target` for the value at which buying and renting end the
/// horizon with equal net worth. The bounds must bracket a sign change of the
/// owner-minus-renter gap.
pub fn solve_break_even(
    params: &SimulationParams,
    config: BreakEvenConfig,
) -> Result<BreakEvenResult, SolverError> {
    validate_config(config)?;

    let mut iterations = Vec::with_capacity(config.max_iterations as usize);
    let low_gap = net_worth_gap(params, config.target, config.search_min);
    let high_gap = net_worth_gap(params, config.target, config.search_max);

    let mut solved_value = None;
    let mut converged = false;
    let feasible;
    let message;

    if low_gap == 0.0 {
        solved_value = Some(config.search_min);
        converged = true;
        feasible = true;
        message = "Lower bound is already the break-even point.".to_string();
    } else if high_gap == 0.0 {
        solved_value = Some(config.search_max);
        converged = true;
        feasible = true;
        message = "Upper bound is already the break-even point.".to_string();
    } else if low_gap.signum() == high_gap.signum() {
        feasible = false;
        message = if low_gap > 0.0 {
            "Buying wins across the whole search range.".to_string()
        } else {
            "Renting wins across the whole search range.".to_string()
        };
    } else {
        let mut lo = config.search_min;
        let mut hi = config.search_max;
        let lo_sign = low_gap.signum();
        let mut it = 0;
        while it < config.max_iterations {
            it += 1;
            let mid = (lo + hi) * 0.5;
            let gap = net_worth_gap(params, config.target, mid);
            iterations.push(BreakEvenIteration {
                iteration: it,
                lower_bound: lo,
                upper_bound: hi,
                candidate_value: mid,
                net_worth_gap: gap,
            });

            if gap == 0.0 {
                lo = mid;
                hi = mid;
            } else if gap.signum() == lo_sign {
                lo = mid;
            } else {
                hi = mid;
            }

            if (hi - lo).abs() <= config.tolerance {
                converged = true;
                break;
            }
        }
        solved_value = Some((lo + hi) * 0.5);
        feasible = true;
        message = if converged {
            "Solved break-even value.".to_string()
        } else {
            "Reached max iterations before tolerance was met; returning best estimate."
                .to_string()
        };
    }

    let achieved_gap = solved_value.map(|value| net_worth_gap(params, config.target, value));

    Ok(BreakEvenResult {
        target: config.target,
        search_min: config.search_min,
        search_max: config.search_max,
        tolerance: config.tolerance,
        max_iterations: config.max_iterations,
        solved_value,
        achieved_gap,
        iterations,
        converged,
        feasible,
        message,
    })
}

fn net_worth_gap(base: &SimulationParams, target: BreakEvenTarget, candidate_value: f64) -> f64 {
    let mut params = base.clone();
    match target {
        BreakEvenTarget::MonthlyRent => params.monthly_rent = candidate_value.max(0.0),
        BreakEvenTarget::HomePrice => params.home_price = candidate_value.max(0.0),
    }
    let summary = simulate(&params).summary;
    summary.final_owner_net_worth - summary.final_renter_net_worth
}

fn validate_config(config: BreakEvenConfig) -> Result<(), SolverError> {
    if !config.search_min.is_finite() || !config.search_max.is_finite() {
        return Err(SolverError::NonFiniteBounds);
    }
    if config.search_max <= config.search_min {
        return Err(SolverError::EmptyRange);
    }
    if !config.tolerance.is_finite() || config.tolerance <= 0.0 {
        return Err(SolverError::InvalidTolerance);
    }
    if config.max_iterations == 0 {
        return Err(SolverError::NoIterations);
    }
    Ok(())
}
