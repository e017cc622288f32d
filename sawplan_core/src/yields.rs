//! Board-feet yield calculation.

use crate::{CutPlan, Error, Result, YieldSummary};

/// One board foot is 12 x 12 x 1 inches
pub const CUBIC_INCHES_PER_BOARD_FOOT: f64 = 144.0;

/// Count boards and total their volume at `log_length` inches long
pub fn summarize(plan: &CutPlan, log_length: f64) -> Result<YieldSummary> {
    if !(log_length.is_finite() && log_length > 0.0) {
        return Err(Error::InvalidInput(format!(
            "log length must be positive, got {}",
            log_length
        )));
    }

    // Start from +0.0; an empty f64 sum is -0.0
    let total_board_feet = plan
        .iter()
        .fold(0.0, |acc, p| acc + p.board_feet(log_length));

    Ok(YieldSummary {
        total_boards: plan.len(),
        total_board_feet,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{pack_shelves, BoardProfile, CantDimensions, RowHeightPolicy};

    #[test]
    fn test_empty_plan_yields_nothing() {
        let summary = summarize(&CutPlan::new(), 96.0).unwrap();
        assert_eq!(summary, YieldSummary::default());
        assert!(summary.total_board_feet.is_sign_positive());
    }

    #[test]
    fn test_board_feet_of_eight_foot_two_by_sixes() {
        let cant = CantDimensions {
            width: 14.142135623730951,
            height: 14.142135623730951,
        };
        let plan = pack_shelves(
            &cant,
            &[BoardProfile::new("2x6", 6.0, 2.0)],
            0.125,
            RowHeightPolicy::LastPlaced,
        )
        .unwrap();

        let summary = summarize(&plan, 96.0).unwrap();
        assert_eq!(summary.total_boards, 6);
        // 6 * 2 * 96 / 144 = 8 BF each
        assert!((summary.total_board_feet - 48.0).abs() < 1e-9);
    }

    #[test]
    fn test_matches_per_board_formula() {
        let profiles = [
            BoardProfile::new("4x4", 4.0, 4.0),
            BoardProfile::new("1x8", 8.0, 1.0),
        ];
        let cant = CantDimensions {
            width: 20.0,
            height: 20.0,
        };
        let plan = pack_shelves(&cant, &profiles, 0.125, RowHeightPolicy::Tallest).unwrap();

        let length = 120.0;
        let expected: f64 = plan
            .iter()
            .map(|p| p.width * p.height * length / 144.0)
            .sum();
        let summary = summarize(&plan, length).unwrap();
        assert!((summary.total_board_feet - expected).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_non_positive_length() {
        for length in [0.0, -96.0, f64::INFINITY] {
            assert!(matches!(
                summarize(&CutPlan::new(), length),
                Err(Error::InvalidInput(_))
            ));
        }
    }
}
