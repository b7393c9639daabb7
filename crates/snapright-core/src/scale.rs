//! Proportional target-size resolution.
//!
//! Given the upright raster's dimensions and a sizing constraint, this
//! module computes the output width and height. Exactly one resolution
//! strategy applies per request; with no constraint the natural size is
//! kept.
//!
//! # Rounding
//!
//! Derived dimensions round to the nearest integer with ties rounding half
//! away from zero (`f64::round`). A derived dimension of zero is an error,
//! never silently clamped.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for target-size resolution.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConstraintError {
    /// The source raster has no extent to scale from.
    #[error("Source raster has no pixels ({width}x{height})")]
    EmptySource { width: u32, height: u32 },

    /// The constraint resolved to a target with a zero dimension.
    #[error("Constraint resolves to an empty target ({width}x{height})")]
    EmptyTarget { width: u32, height: u32 },
}

/// Sizing constraint for a conversion request.
///
/// Built from the request options: an explicit width and/or height wins
/// over edge bounds, and edge bounds require both values (a lone `max` or
/// `min` falls through to the natural size).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SizeConstraint {
    /// No constraint: keep the upright raster's natural size.
    #[default]
    Natural,
    /// Explicit target width; height is derived from the aspect ratio.
    Width(u32),
    /// Explicit target height; width is derived from the aspect ratio.
    Height(u32),
    /// Both dimensions explicit. Used directly, no ratio recomputation.
    Exact { width: u32, height: u32 },
    /// Long-edge/short-edge bounds, orientation-relative: a landscape
    /// raster gets `max` x `min`, a portrait or square raster `min` x `max`.
    Bounds { max: u32, min: u32 },
}

/// Resolve the output dimensions for an upright raster.
///
/// # Arguments
///
/// * `width` - Upright raster width in pixels
/// * `height` - Upright raster height in pixels
/// * `constraint` - Active sizing strategy
///
/// # Returns
///
/// The target `(width, height)`. For the `Width`/`Height` strategies the
/// derived dimension preserves the source aspect ratio to within one pixel
/// of rounding.
///
/// # Errors
///
/// Returns `ConstraintError::EmptySource` when the source has a zero
/// dimension and `ConstraintError::EmptyTarget` when the resolved target
/// does.
pub fn resolve_target(
    width: u32,
    height: u32,
    constraint: &SizeConstraint,
) -> Result<(u32, u32), ConstraintError> {
    if width == 0 || height == 0 {
        return Err(ConstraintError::EmptySource { width, height });
    }

    let ratio = width as f64 / height as f64;

    let (out_w, out_h) = match *constraint {
        SizeConstraint::Natural => (width, height),
        SizeConstraint::Width(target) => (target, (target as f64 / ratio).round() as u32),
        SizeConstraint::Height(target) => ((target as f64 * ratio).round() as u32, target),
        SizeConstraint::Exact { width, height } => (width, height),
        SizeConstraint::Bounds { max, min } => {
            if ratio > 1.0 {
                (max, min)
            } else {
                (min, max)
            }
        }
    };

    if out_w == 0 || out_h == 0 {
        return Err(ConstraintError::EmptyTarget {
            width: out_w,
            height: out_h,
        });
    }

    Ok((out_w, out_h))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
