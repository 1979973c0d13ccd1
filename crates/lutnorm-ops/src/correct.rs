//! Black/white renormalization with hue-preserving lightness remap.
//!
//! A LUT whose black corner sits above true black usually had its whole
//! range lifted by a tint. Each point is corrected in four moves:
//!
//! 1. **Detint**: remove the black-point lift per channel. This yields the
//!    right chroma but too little lightness.
//! 2. **Retint**: multiply the lift back in, which restores lightness
//!    without raising the floor again.
//! 3. **Highlight raise**: scale lightness by `1 / whiteL` near the white
//!    corner, fading to 1 at the black corner.
//! 4. **Recompose** in OKLch with the hue of the untouched input.
//!
//! Recomposed colors that leave [0, 1] on every channel at once are
//! reverted to the input (clip/crush) rather than flattened.

use crate::CorrectionContext;
use lutnorm_color::{Oklch, srgb, srgb8_from_linear};
use lutnorm_dds::DdsContainer;
use lutnorm_lut::{LevelStats, LutCube};
use serde::Serialize;
use tracing::{debug, trace};

/// Why a pass left the surface untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SkipReason {
    /// The DXGI format (if any) is not the one being corrected.
    UnsupportedFormat(Option<u32>),
    /// Black is already (0, 0, 0) and white (1, 1, 1).
    AlreadyNeutral,
}

/// Outcome of one correction pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CorrectionReport {
    /// Texels rewritten. Zero means the buffer should not be persisted.
    pub changed: usize,
    /// Points reverted because every channel went above 1.
    pub clipped: usize,
    /// Points reverted because every channel went below 0.
    pub crushed: usize,
    /// Set when the pass left the surface untouched on purpose.
    pub skipped: Option<SkipReason>,
}

impl CorrectionReport {
    /// Report for a pass that did not run.
    pub fn skip(reason: SkipReason) -> Self {
        Self {
            skipped: Some(reason),
            ..Default::default()
        }
    }

    /// True if any texel was rewritten.
    #[inline]
    pub fn is_changed(&self) -> bool {
        self.changed > 0
    }
}

/// How a recomposed color was brought back into [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeOutcome {
    /// Already in range.
    InRange,
    /// Some channels were clamped.
    Clamped,
    /// All channels exceeded 1; reverted to the input.
    Clip,
    /// All channels fell below 0; reverted to the input.
    Crush,
}

/// Maps `input` from `[min, max]` onto `[new_min, new_max]`.
///
/// A degenerate source range maps everything to `new_max`, the end where
/// the factors used here are 1.
#[inline]
pub fn linear_normalization(input: f64, min: f64, max: f64, new_min: f64, new_max: f64) -> f64 {
    if max == min {
        return new_max;
    }
    (input - min) * ((new_max - new_min) / (max - min)) + new_min
}

/// `1 / v`, or 1 when `v` is zero or the result is not finite.
#[inline]
fn recip_or_one(v: f64) -> f64 {
    let r = 1.0 / v;
    if r.is_finite() { r } else { 1.0 }
}

#[inline]
fn hypot3(v: [f64; 3]) -> f64 {
    v[0].hypot(v[1]).hypot(v[2])
}

/// Resolves a recomposed color against the input it came from.
///
/// A clip needs every channel above 1 while none of the inputs was already
/// exactly 1; a crush is the mirror case at 0. Both revert to `original`.
/// Anything else out of range is clamped per channel.
pub fn resolve_range(new: [f64; 3], original: [f64; 3]) -> ([f64; 3], RangeOutcome) {
    if new.iter().any(|&v| v > 1.0) {
        if (0..3).all(|c| new[c] > 1.0 && original[c] != 1.0) {
            return (original, RangeOutcome::Clip);
        }
        return (new.map(|v| v.clamp(0.0, 1.0)), RangeOutcome::Clamped);
    }
    if new.iter().any(|&v| v < 0.0) {
        if (0..3).all(|c| new[c] < 0.0 && original[c] != 0.0) {
            return (original, RangeOutcome::Crush);
        }
        return (new.map(|v| v.max(0.0)), RangeOutcome::Clamped);
    }
    (new, RangeOutcome::InRange)
}

/// Per-point corrector for one LUT.
///
/// Holds the black point and white lightness measured from the cube
/// before any texel is rewritten.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneCorrector {
    black: [f64; 3],
    white_l: f64,
}

impl ToneCorrector {
    /// Captures the black corner color and white corner lightness.
    pub fn new(cube: &LutCube) -> Self {
        Self::from_corners(cube.black().linear, cube.white().linear)
    }

    /// Builds a corrector from explicit corner colors (linear RGB).
    pub fn from_corners(black: [f64; 3], white: [f64; 3]) -> Self {
        Self {
            black,
            white_l: Oklch::from_linear(white).l,
        }
    }

    /// Corrects one point.
    ///
    /// `coord` is the point's normalized grid coordinate and `rgb` its
    /// current linear color. Returns the resolved color and how it was
    /// brought into range.
    pub fn correct_point(&self, coord: [f64; 3], rgb: [f64; 3]) -> ([f64; 3], RangeOutcome) {
        let lin = srgb::eotf_rgb(coord);

        let recomposed = if lin == [1.0, 1.0, 1.0] {
            [1.0, 1.0, 1.0]
        } else if lin == [0.0, 0.0, 0.0] {
            [0.0, 0.0, 0.0]
        } else {
            self.recompose(lin, rgb)
        };

        if !recomposed.iter().all(|v| v.is_finite()) {
            trace!(?coord, "non-finite correction discarded");
            return (rgb, RangeOutcome::InRange);
        }

        resolve_range(recomposed, rgb)
    }

    fn recompose(&self, lin: [f64; 3], rgb: [f64; 3]) -> [f64; 3] {
        let black_distance = hypot3(lin);
        let white_distance = hypot3(lin.map(|v| 1.0 - v));
        let total_range = black_distance + white_distance;

        let mut detinted = [0.0f64; 3];
        let mut retinted = [0.0f64; 3];
        for c in 0..3 {
            let reduce =
                linear_normalization(lin[c], 0.0, 1.0, recip_or_one(1.0 - self.black[c]), 1.0);
            detinted[c] = (1.0 - (1.0 - rgb[c]) * reduce).max(0.0);

            let increase = linear_normalization(lin[c], 0.0, 1.0, 1.0 + self.black[c], 1.0);
            retinted[c] = detinted[c] * increase;
        }

        let target_chroma = Oklch::from_linear(detinted).c;
        let mut target_l = Oklch::from_linear(retinted).l;
        let hue = Oklch::from_linear(rgb).h;

        let raise_l = linear_normalization(
            white_distance,
            0.0,
            total_range,
            recip_or_one(self.white_l),
            1.0,
        );
        target_l *= raise_l;

        Oklch::new(target_l, target_chroma, hue)
            .to_linear()
            .map(|v| v.max(0.0))
    }
}

fn rgb8_label(rgb: [f64; 3]) -> String {
    let [r, g, b] = srgb8_from_linear(rgb);
    format!("rgb({r},{g},{b})")
}

/// Runs the correction pass over a parsed container.
///
/// Containers whose DXGI format the context does not accept, and LUTs
/// that already span true black to true white, are returned untouched
/// with [`CorrectionReport::skipped`](CorrectionReport#structfield.skipped) set. Otherwise every point is read
/// from the live surface, corrected, and written back only if it differs
/// from its input at full precision.
pub fn correct(
    ctx: &CorrectionContext,
    dds: &mut DdsContainer<'_>,
    cube: &LutCube,
    levels: &LevelStats,
) -> CorrectionReport {
    if !ctx.accepts(dds.dxgi_format()) {
        return CorrectionReport::skip(SkipReason::UnsupportedFormat(dds.dxgi_format()));
    }
    if levels.spans_full_range() {
        return CorrectionReport::skip(SkipReason::AlreadyNeutral);
    }

    let corrector = ToneCorrector::new(cube);
    debug!(
        black = ?corrector.black,
        white_l = corrector.white_l,
        min_channel = levels.min_channel,
        max_channel = levels.max_channel,
        "correcting LUT"
    );

    let mut report = CorrectionReport::default();
    let surface = dds.surface_mut();

    for point in cube.points() {
        let rgb = point.read_linear(surface);
        let (new, outcome) = corrector.correct_point(point.coord, rgb);

        match outcome {
            RangeOutcome::Clip | RangeOutcome::Crush => {
                let [x, y, z] = point.coord;
                debug!(
                    "{} {x:.2} {y:.2} {z:.2} {} => {}",
                    if outcome == RangeOutcome::Clip { "Clip:" } else { "Crush:" },
                    rgb8_label(rgb),
                    rgb8_label(new)
                );
                if outcome == RangeOutcome::Clip {
                    report.clipped += 1;
                } else {
                    report.crushed += 1;
                }
            }
            RangeOutcome::InRange | RangeOutcome::Clamped => {}
        }

        if new != rgb {
            point.write_rgb8(surface, srgb8_from_linear(new));
            report.changed += 1;
        }
    }

    debug!(
        changed = report.changed,
        clipped = report.clipped,
        crushed = report.crushed,
        "correction pass complete"
    );
    report
}
