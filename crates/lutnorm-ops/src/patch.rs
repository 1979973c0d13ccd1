//! Whole-buffer entry points: parse, index, measure, correct.

use crate::{CorrectionContext, CorrectionReport, OpsResult, SkipReason, correct};
use lutnorm_dds::DdsContainer;
use lutnorm_lut::{LevelStats, LutCube, neutral_tint};
use serde::Serialize;
use tracing::trace;

/// A corrected file buffer and what happened to it.
#[derive(Debug, Clone)]
pub struct Patched {
    /// Outcome of the pass.
    pub report: CorrectionReport,
    /// The buffer, modified in place when `report.changed > 0`.
    pub buffer: Vec<u8>,
}

impl Patched {
    /// True if the buffer differs from the input and should be written out.
    #[inline]
    pub fn is_changed(&self) -> bool {
        self.report.is_changed()
    }
}

/// Corrects a DDS file held in memory, rewriting texels in place.
///
/// Containers with an unsupported format are left alone before any cube
/// indexing, so a non-LUT texture never produces a layout error.
///
/// # Errors
///
/// - [`OpsError::Container`](crate::OpsError::Container) if the buffer is
///   not a well formed DDS file
/// - [`OpsError::Layout`](crate::OpsError::Layout) if an accepted file's
///   dimensions do not describe a tiled cube
pub fn patch_in_place(ctx: &CorrectionContext, buffer: &mut [u8]) -> OpsResult<CorrectionReport> {
    trace!(len = buffer.len(), "patch_in_place");
    let mut dds = DdsContainer::parse(buffer)?;

    if !ctx.accepts(dds.dxgi_format()) {
        return Ok(CorrectionReport::skip(SkipReason::UnsupportedFormat(
            dds.dxgi_format(),
        )));
    }

    let cube = LutCube::with_order(&dds, ctx.axis_order)?;
    let levels = LevelStats::of_cube(&cube);
    Ok(correct(ctx, &mut dds, &cube, &levels))
}

/// Owned variant of [`patch_in_place`].
///
/// # Example
///
/// ```rust,no_run
/// use lutnorm_ops::{CorrectionContext, patch};
///
/// let bytes = std::fs::read("lut.dds")?;
/// let patched = patch(&CorrectionContext::default(), bytes)?;
/// if patched.is_changed() {
///     std::fs::write("lut_fixed.dds", &patched.buffer)?;
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn patch(ctx: &CorrectionContext, mut buffer: Vec<u8>) -> OpsResult<Patched> {
    let report = patch_in_place(ctx, &mut buffer)?;
    Ok(Patched { report, buffer })
}

/// Levels and tint of a LUT, as read from a DDS buffer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    /// Level statistics over every point.
    pub levels: LevelStats,
    /// Per-channel gain along the neutral diagonal.
    pub tint: [f64; 3],
}

/// Measures a DDS LUT without modifying it.
///
/// Takes `&mut` only because [`DdsContainer`] is a writable view.
pub fn measure(ctx: &CorrectionContext, buffer: &mut [u8]) -> OpsResult<Measurement> {
    let dds = DdsContainer::parse(buffer)?;
    let cube = LutCube::with_order(&dds, ctx.axis_order)?;
    Ok(Measurement {
        levels: LevelStats::of_cube(&cube),
        tint: neutral_tint(&cube),
    })
}
