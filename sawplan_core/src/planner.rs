//! End-to-end cut planning.
//!
//! [`plan_cut`] runs geometry, packing and yield in one pure pass:
//!
//! 1. Validate the request
//! 2. Resolve the cant (with oversized-log flattening)
//! 3. Shelf-pack the selected profiles
//! 4. Summarize board count and board feet
//!
//! Identical requests always produce identical plans.

use crate::config::InputLimits;
use crate::geometry::resolve_cant;
use crate::{
    pack_shelves, summarize, Advisory, BoardProfile, CantDimensions, CutPlan, Error, MillConfig,
    Result, YieldSummary,
};
use serde::{Deserialize, Serialize};

/// Inputs for a single log
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CutRequest {
    pub log_diameter: f64,
    pub log_length: f64,
    pub kerf: f64,
    /// Ordered selection; order drives packing
    pub profiles: Vec<BoardProfile>,
}

impl CutRequest {
    /// Preconditions the core relies on
    pub fn validate(&self) -> Result<()> {
        let inputs = [
            ("log diameter", self.log_diameter),
            ("log length", self.log_length),
            ("kerf", self.kerf),
        ];
        for (name, value) in inputs {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidInput(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        if self.profiles.is_empty() {
            return Err(Error::EmptySelection);
        }
        Ok(())
    }

    /// Caller-side minimums, stricter than [`CutRequest::validate`]
    pub fn check_limits(&self, limits: &InputLimits) -> Result<()> {
        let checks = [
            ("log diameter", self.log_diameter, limits.min_diameter),
            ("log length", self.log_length, limits.min_length),
            ("kerf", self.kerf, limits.min_kerf),
        ];
        for (name, value, min) in checks {
            if value < min {
                return Err(Error::InvalidInput(format!(
                    "{} must be at least {} in, got {}",
                    name, min, value
                )));
            }
        }
        Ok(())
    }
}

/// Everything the caller needs to present a plan
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MillPlan {
    pub cant: CantDimensions,
    pub cut_plan: CutPlan,
    pub summary: YieldSummary,
    pub advisories: Vec<Advisory>,
}

/// Plan the cuts for one log
pub fn plan_cut(request: &CutRequest, config: &MillConfig) -> Result<MillPlan> {
    request.validate()?;

    tracing::info!(
        "Planning {} in x {} in log with {} profile(s), kerf {}",
        request.log_diameter,
        request.log_length,
        request.profiles.len(),
        request.kerf
    );

    let resolved = resolve_cant(request.log_diameter, &request.profiles, &config.mill)?;
    let cut_plan = pack_shelves(
        &resolved.dimensions,
        &request.profiles,
        request.kerf,
        config.cutting.row_height,
    )?;
    let summary = summarize(&cut_plan, request.log_length)?;

    tracing::info!(
        "Planned {} boards, {:.2} BF",
        summary.total_boards,
        summary.total_board_feet
    );

    Ok(MillPlan {
        cant: resolved.dimensions,
        cut_plan,
        summary,
        advisories: resolved.advisory.into_iter().collect(),
    })
}
