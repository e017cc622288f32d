//! Cant geometry resolution.
//!
//! The cant is the largest square inscribed in the log's circular cross
//! section, with side `(diameter / 2) * sqrt(2)`. When the flattening
//! profile is selected and the log is taller than the throat, the cant
//! height is clamped to the throat height and an advisory is raised.

use crate::config::ThroatConfig;
use crate::{Advisory, BoardProfile, CantDimensions, Error, Result};

/// Cant dimensions plus the advisory raised while resolving them
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedCant {
    pub dimensions: CantDimensions,
    pub advisory: Option<Advisory>,
}

/// Side of the square inscribed in a circle of `log_diameter`
pub fn inscribed_square_side(log_diameter: f64) -> f64 {
    (log_diameter / 2.0) * std::f64::consts::SQRT_2
}

/// Resolve the cant for a log, applying the oversized-log flattening rule
pub fn resolve_cant(
    log_diameter: f64,
    profiles: &[BoardProfile],
    throat: &ThroatConfig,
) -> Result<ResolvedCant> {
    if !(log_diameter.is_finite() && log_diameter > 0.0) {
        return Err(Error::InvalidInput(format!(
            "log diameter must be positive, got {}",
            log_diameter
        )));
    }

    let side = inscribed_square_side(log_diameter);
    let mut dimensions = CantDimensions {
        width: side,
        height: side,
    };

    let flattening_selected = profiles
        .iter()
        .any(|p| p.label == throat.flattening_profile);

    let advisory = if flattening_selected && log_diameter > throat.throat_height {
        tracing::warn!(
            "Log diameter {} in exceeds throat height {} in, flattening one face",
            log_diameter,
            throat.throat_height
        );
        dimensions.height = throat.throat_height;
        Some(Advisory::FlattenFace {
            log_diameter,
            throat_height: throat.throat_height,
        })
    } else {
        None
    };

    tracing::debug!(
        "Resolved cant {:.4} x {:.4} for {} in log",
        dimensions.width,
        dimensions.height,
        log_diameter
    );

    Ok(ResolvedCant {
        dimensions,
        advisory,
    })
}
