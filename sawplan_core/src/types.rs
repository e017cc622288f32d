//! Core domain types for cut planning.
//!
//! This module defines the fundamental types used throughout the system:
//! - Board profiles selected by the caller
//! - Cant dimensions derived from the log
//! - Placements and the ordered cut plan
//! - Yield summaries and advisories

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Board Profiles
// ============================================================================

/// A board cross-section the caller wants milled, in inches.
///
/// Labels need not be unique; two profiles with the same label are packed
/// independently.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BoardProfile {
    pub label: String,
    pub width: f64,
    pub height: f64,
}

impl BoardProfile {
    pub fn new(label: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            label: label.into(),
            width,
            height,
        }
    }
}

// ============================================================================
// Cant and Placement Types
// ============================================================================

/// Usable square cross-section of the log, optionally flattened.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct CantDimensions {
    pub width: f64,
    pub height: f64,
}

/// A board positioned inside the cant. `(x, y)` is the lower-left corner.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Placement {
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Placement {
    pub(crate) fn at(profile: &BoardProfile, x: f64, y: f64) -> Self {
        Self {
            label: profile.label.clone(),
            x,
            y,
            width: profile.width,
            height: profile.height,
        }
    }

    /// Board feet of this board cut to `log_length` inches
    pub fn board_feet(&self, log_length: f64) -> f64 {
        self.width * self.height * log_length / crate::yields::CUBIC_INCHES_PER_BOARD_FOOT
    }

    /// Whether the rectangle lies inside `[0, cant.width] x [0, cant.height]`
    pub fn fits_within(&self, cant: &CantDimensions) -> bool {
        self.x >= 0.0
            && self.y >= 0.0
            && self.x + self.width <= cant.width
            && self.y + self.height <= cant.height
    }

    /// Whether the two rectangles share interior area (touching edges don't count)
    pub fn overlaps(&self, other: &Placement) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

/// Ordered sequence of placements, in the order the packer produced them.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct CutPlan {
    placements: Vec<Placement>,
}

impl CutPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, placement: Placement) {
        self.placements.push(placement);
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Placement> {
        self.placements.iter()
    }
}

impl<'a> IntoIterator for &'a CutPlan {
    type Item = &'a Placement;
    type IntoIter = std::slice::Iter<'a, Placement>;

    fn into_iter(self) -> Self::IntoIter {
        self.placements.iter()
    }
}

// ============================================================================
// Results
// ============================================================================

/// Board count and volume for a cut plan
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct YieldSummary {
    pub total_boards: usize,
    pub total_board_feet: f64,
}

/// Non-fatal notice raised while planning
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    /// The log is taller than the throat; the cant height was clamped to it
    FlattenFace {
        log_diameter: f64,
        throat_height: f64,
    },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::FlattenFace {
                log_diameter,
                throat_height,
            } => write!(
                f,
                "Log is taller than the mill throat height ({} in > {} in). \
                 Consider flattening one face before slabbing.",
                log_diameter, throat_height
            ),
        }
    }
}

/// How far the packer advances after a finished row
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RowHeightPolicy {
    /// Height of the last board placed in the row, even if an earlier one was taller
    #[default]
    LastPlaced,
    /// Height of the tallest board placed in the row
    Tallest,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placement(x: f64, y: f64, width: f64, height: f64) -> Placement {
        Placement {
            label: "test".into(),
            x,
            y,
            width,
            height,
        }
    }

    #[test]
    fn test_adjacent_placements_do_not_overlap() {
        let a = placement(0.0, 0.0, 6.0, 2.0);
        let b = placement(6.0, 0.0, 6.0, 2.0);
        let c = placement(0.0, 2.0, 6.0, 2.0);
        assert!(!a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_stacked_placements_overlap() {
        let a = placement(0.0, 0.0, 4.0, 4.0);
        let b = placement(0.0, 1.125, 4.0, 4.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_board_feet_of_one_placement() {
        // 2 x 6 x 96 / 144
        assert_eq!(placement(0.0, 0.0, 6.0, 2.0).board_feet(96.0), 8.0);
    }

    #[test]
    fn test_fits_within_cant() {
        let cant = CantDimensions {
            width: 10.0,
            height: 5.0,
        };
        assert!(placement(4.0, 3.0, 6.0, 2.0).fits_within(&cant));
        assert!(!placement(4.5, 0.0, 6.0, 2.0).fits_within(&cant));
        assert!(!placement(0.0, 3.5, 6.0, 2.0).fits_within(&cant));
    }

    #[test]
    fn test_flatten_advisory_message() {
        let advisory = Advisory::FlattenFace {
            log_diameter: 24.0,
            throat_height: 22.0,
        };
        let message = advisory.to_string();
        assert!(message.contains("flattening one face before slabbing"));
        assert!(message.contains("24 in > 22 in"));
    }

    #[test]
    fn test_row_height_policy_serde_names() {
        let policy: RowHeightPolicy = serde_json::from_str("\"tallest\"").unwrap();
        assert_eq!(policy, RowHeightPolicy::Tallest);
        assert_eq!(RowHeightPolicy::default(), RowHeightPolicy::LastPlaced);
    }
}
