//! Greedy shelf packing of boards inside the cant.
//!
//! Rows ("shelves") are filled bottom-up. Each row walks the profile list
//! once, in the caller's order, placing every profile that still fits and
//! spacing neighbours by one kerf. Packing keeps opening rows while the
//! shortest profile in the whole list could still fit, and stops outright
//! at the first row where nothing was placed.
//!
//! With [`RowHeightPolicy::LastPlaced`] the next row starts one kerf above
//! the height of the last board placed, not the tallest. Rows that mix
//! heights can then overlap the row above; see [`RowHeightPolicy::Tallest`].

use crate::{BoardProfile, CantDimensions, CutPlan, Error, Placement, Result, RowHeightPolicy};

/// Pack `profiles` into `cant`, one instance of each profile per row
pub fn pack_shelves(
    cant: &CantDimensions,
    profiles: &[BoardProfile],
    kerf: f64,
    policy: RowHeightPolicy,
) -> Result<CutPlan> {
    validate_inputs(cant, profiles, kerf)?;

    let min_height = profiles
        .iter()
        .map(|p| p.height)
        .fold(f64::INFINITY, f64::min);

    let mut plan = CutPlan::new();
    let mut y_offset = 0.0;
    let mut row = 0usize;
    let mut short_rows = 0usize;

    while y_offset + min_height <= cant.height {
        let mut x_offset = 0.0;
        let mut last_height: Option<f64> = None;
        let mut tallest = 0.0_f64;

        for profile in profiles {
            if y_offset + profile.height <= cant.height && x_offset + profile.width <= cant.width {
                tracing::debug!(
                    "Row {}: placing {} at ({:.3}, {:.3})",
                    row,
                    profile.label,
                    x_offset,
                    y_offset
                );
                plan.push(Placement::at(profile, x_offset, y_offset));
                x_offset += profile.width + kerf;
                last_height = Some(profile.height);
                tallest = tallest.max(profile.height);
            }
        }

        let Some(last_height) = last_height else {
            tracing::debug!("Row {}: nothing fits at y={:.3}, stopping", row, y_offset);
            break;
        };

        let row_height = match policy {
            RowHeightPolicy::LastPlaced => {
                if tallest > last_height {
                    tracing::debug!(
                        "Row {}: advancing by last board height {} below tallest {}",
                        row,
                        last_height,
                        tallest
                    );
                    short_rows += 1;
                }
                last_height
            }
            RowHeightPolicy::Tallest => tallest,
        };

        y_offset += row_height + kerf;
        row += 1;
    }

    if short_rows > 0 {
        tracing::warn!(
            "{} row(s) advanced by a board shorter than the tallest in the row; placements overlap",
            short_rows
        );
    }

    tracing::debug!("Packed {} boards in {} rows", plan.len(), row);
    Ok(plan)
}

fn validate_inputs(cant: &CantDimensions, profiles: &[BoardProfile], kerf: f64) -> Result<()> {
    if profiles.is_empty() {
        return Err(Error::EmptySelection);
    }
    if !(kerf.is_finite() && kerf > 0.0) {
        return Err(Error::InvalidInput(format!("kerf must be positive, got {}", kerf)));
    }
    if !(cant.width.is_finite() && cant.width > 0.0 && cant.height.is_finite() && cant.height > 0.0)
    {
        return Err(Error::InvalidInput(format!(
            "cant must be positive, got {} x {}",
            cant.width, cant.height
        )));
    }
    for profile in profiles {
        if !(profile.width.is_finite() && profile.width > 0.0)
            || !(profile.height.is_finite() && profile.height > 0.0)
        {
            return Err(Error::InvalidInput(format!(
                "board profile '{}' must have positive dimensions, got {} x {}",
                profile.label, profile.width, profile.height
            )));
        }
    }
    Ok(())
}
