//! Level statistics over a LUT's decoded points.

use crate::{LutCube, LutPoint};
use lutnorm_color::luma_rec709;
use serde::Serialize;

/// Black/white level and tint measurements of a LUT.
///
/// Computed once per pass and read-only afterwards. Every field is always
/// present; an empty input yields all zeros.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelStats {
    /// Smallest linear channel over all points.
    pub min_channel: f64,
    /// Largest linear channel over all points.
    pub max_channel: f64,
    /// Mean linear red.
    pub average_red: f64,
    /// Mean linear green.
    pub average_green: f64,
    /// Mean linear blue.
    pub average_blue: f64,
    /// Mean of the three channel means.
    pub average_channel: f64,
    /// Smallest luma.
    pub min_y: f64,
    /// Largest luma.
    pub max_y: f64,
    /// Mean luma.
    pub average_y: f64,
    /// Median luma (mean of the two middle values for even counts).
    pub median_y: f64,
    /// `max_y - min_y`.
    pub range: f64,
    /// Luma of the first enumerated point (black corner).
    pub black_y: f64,
    /// Luma of the last enumerated point (white corner).
    pub white_y: f64,
    /// Points decoding to exactly (0, 0, 0).
    pub black_count: usize,
    /// Points decoding to exactly (1, 1, 1).
    pub white_count: usize,
    /// Number of points analyzed.
    pub point_count: usize,
}

impl LevelStats {
    /// Analyzes points in enumeration order.
    pub fn analyze(points: &[LutPoint]) -> Self {
        Self::from_linear(points.iter().map(|p| p.linear))
    }

    /// Analyzes every point of a cube.
    pub fn of_cube(cube: &LutCube) -> Self {
        Self::analyze(cube.points())
    }

    /// Analyzes a sequence of linear RGB values.
    ///
    /// The first value is taken as the black corner and the last as the
    /// white corner. Black/white counts use exact equality, so near-black
    /// and near-white values are not counted.
    pub fn from_linear<I>(values: I) -> Self
    where
        I: IntoIterator<Item = [f64; 3]>,
    {
        let mut min = [f64::INFINITY; 3];
        let mut max = [f64::NEG_INFINITY; 3];
        let mut sums = [0.0f64; 3];
        let mut ys = Vec::new();
        let mut black_count = 0;
        let mut white_count = 0;

        for rgb in values {
            for c in 0..3 {
                min[c] = min[c].min(rgb[c]);
                max[c] = max[c].max(rgb[c]);
                sums[c] += rgb[c];
            }
            if rgb == [0.0, 0.0, 0.0] {
                black_count += 1;
            } else if rgb == [1.0, 1.0, 1.0] {
                white_count += 1;
            }
            ys.push(luma_rec709(rgb));
        }

        let (Some(&black_y), Some(&white_y)) = (ys.first(), ys.last()) else {
            return Self::default();
        };

        let n = ys.len() as f64;
        let total_y: f64 = ys.iter().sum();
        let min_y = ys.iter().copied().fold(f64::INFINITY, f64::min);
        let max_y = ys.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let mut sorted = ys.clone();
        sorted.sort_by(f64::total_cmp);
        let mid = sorted.len() / 2;
        let median_y = if sorted.len() % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };

        Self {
            min_channel: min[0].min(min[1]).min(min[2]),
            max_channel: max[0].max(max[1]).max(max[2]),
            average_red: sums[0] / n,
            average_green: sums[1] / n,
            average_blue: sums[2] / n,
            average_channel: (sums[0] + sums[1] + sums[2]) / n / 3.0,
            min_y,
            max_y,
            average_y: total_y / n,
            median_y,
            range: max_y - min_y,
            black_y,
            white_y,
            black_count,
            white_count,
            point_count: ys.len(),
        }
    }

    /// True if the LUT already reaches true black and true white.
    ///
    /// With 8-bit texels luma can only be exactly 0 or 1 when all three
    /// channels are, so this is equivalent to checking both corners.
    pub fn spans_full_range(&self) -> bool {
        self.min_channel == 0.0
            && self.max_channel == 1.0
            && self.black_y == 0.0
            && self.white_y == 1.0
    }
}

/// Mean per-channel ratio `output / input` along the neutral diagonal.
///
/// An untinted LUT reports about `[1, 1, 1]`; a warm cast shows up as red
/// above blue. The zero coordinate is skipped.
pub fn neutral_tint(cube: &LutCube) -> [f64; 3] {
    let squares = cube.squares();
    let mut sums = [0.0f64; 3];
    for i in 1..squares {
        let coord = i as f64 / (squares - 1) as f64;
        let point = cube.at(coord, coord, coord);
        let input = lutnorm_color::srgb_eotf(coord);
        for c in 0..3 {
            sums[c] += point.linear[c] / input;
        }
    }
    let n = (squares - 1) as f64;
    sums.map(|s| s / n)
}
