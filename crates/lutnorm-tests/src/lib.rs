//! Integration tests for lutnorm crates.
//!
//! End-to-end checks across container parsing, cube indexing, level
//! analysis and correction, using synthetic LUTs from [`fixtures`] and
//! temporary directories for file round trips.

pub mod fixtures;

#[cfg(test)]
mod tests {
    use crate::fixtures::{LutFixture, rgb_at};
    use ddsfile::DxgiFormat;
    use lutnorm_color::{linear_from_srgb8, luma_rec709};
    use lutnorm_dds::DdsContainer;
    use lutnorm_lut::{LevelStats, LutCube, neutral_tint};
    use lutnorm_ops::{CorrectionContext, SkipReason, correct, measure, patch};
    use tempfile::tempdir;

    const WARM_LIFT: [f64; 3] = [0.03, 0.02, 0.01];
    const WARM_GAIN: [f64; 3] = [0.95, 0.97, 0.96];

    fn spread(v: [f64; 3]) -> f64 {
        v.iter().copied().fold(f64::NEG_INFINITY, f64::max)
            - v.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Read -> correct -> write -> re-read through the filesystem
    #[test]
    fn test_file_roundtrip() {
        let dir = tempdir().unwrap();
        let input = LutFixture::graded(17, WARM_LIFT, WARM_GAIN)
            .write_to(dir.path(), "lgt_lut_warm.dds")
            .unwrap();
        let output = dir.path().join("fixed.dds");

        let ctx = CorrectionContext::default();
        let patched = patch(&ctx, std::fs::read(&input).unwrap()).unwrap();
        assert!(patched.is_changed());
        std::fs::write(&output, &patched.buffer).unwrap();

        let mut data = std::fs::read(&output).unwrap();
        assert_eq!(data.len(), std::fs::metadata(&input).unwrap().len() as usize);
        assert_eq!(rgb_at(&data, 17, [0, 0, 0]), [0, 0, 0]);
        assert_eq!(rgb_at(&data, 17, [16, 16, 16]), [255, 255, 255]);

        let measured = measure(&ctx, &mut data).unwrap();
        assert!(measured.levels.spans_full_range());
        assert_eq!(measured.levels.range, 1.0);
    }

    #[test]
    fn test_graded_lut_is_neutralized() {
        let ctx = CorrectionContext::default();
        let mut file = LutFixture::graded(17, WARM_LIFT, WARM_GAIN).build().unwrap();

        let before = measure(&ctx, &mut file).unwrap();
        assert!(!before.levels.spans_full_range());
        assert!(before.tint[0] > before.tint[2]);

        let mut patched = patch(&ctx, file).unwrap();
        assert_eq!(patched.report.changed, 17 * 17 * 17);

        let after = measure(&ctx, &mut patched.buffer).unwrap();
        assert!(spread(after.tint) < spread(before.tint) / 4.0);
        for c in after.tint {
            assert!((c - 1.0).abs() < 0.1, "{:?}", after.tint);
        }
    }

    #[test]
    fn test_gray_lift_keeps_gray_diagonal() {
        let ctx = CorrectionContext::default();
        let file = LutFixture::graded(17, [0.02; 3], [0.9; 3]).build().unwrap();
        let patched = patch(&ctx, file).unwrap();

        for i in 0..17 {
            let [r, g, b] = rgb_at(&patched.buffer, 17, [i, i, i]);
            assert!(r.abs_diff(g) <= 1 && g.abs_diff(b) <= 1, "{i}: {r} {g} {b}");
        }
    }

    #[test]
    fn test_diagonal_is_monotonic() {
        let ctx = CorrectionContext::default();
        let file = LutFixture::graded(17, [0.05, 0.03, 0.01], [1.0, 0.98, 0.9])
            .build()
            .unwrap();
        let patched = patch(&ctx, file).unwrap();

        let ys: Vec<f64> = (0..17)
            .map(|i| luma_rec709(linear_from_srgb8(&rgb_at(&patched.buffer, 17, [i, i, i]))))
            .collect();
        assert!(ys.windows(2).all(|w| w[0] <= w[1]), "{ys:?}");
    }

    #[test]
    fn test_idempotent() {
        let ctx = CorrectionContext::default();
        let file = LutFixture::graded(17, WARM_LIFT, WARM_GAIN).build().unwrap();
        let first = patch(&ctx, file).unwrap();
        let once = first.buffer.clone();

        let second = patch(&ctx, first.buffer).unwrap();
        assert_eq!(second.report.changed, 0);
        assert_eq!(second.report.skipped, Some(SkipReason::AlreadyNeutral));
        assert_eq!(second.buffer, once);
    }

    #[test]
    fn test_identity_is_noop() {
        let ctx = CorrectionContext::default();
        let file = LutFixture::identity(33).build().unwrap();
        let patched = patch(&ctx, file.clone()).unwrap();
        assert_eq!(patched.report.changed, 0);
        assert_eq!(patched.buffer, file);
    }

    #[test]
    fn test_srgb_format_untouched() {
        let ctx = CorrectionContext::default();
        let file = LutFixture::graded(9, WARM_LIFT, WARM_GAIN)
            .format(DxgiFormat::R8G8B8A8_UNorm_sRGB)
            .build()
            .unwrap();
        let patched = patch(&ctx, file.clone()).unwrap();
        assert_eq!(
            patched.report.skipped,
            Some(SkipReason::UnsupportedFormat(Some(29)))
        );
        assert_eq!(patched.buffer, file);
    }

    /// Step-by-step pipeline gives the same bytes as the one-call entry point
    #[test]
    fn test_manual_pipeline_matches_patch() {
        let ctx = CorrectionContext::default();
        let file = LutFixture::identity(9)
            .black([39, 39, 39])
            .white([252, 252, 252])
            .build()
            .unwrap();

        let mut manual = file.clone();
        let report = {
            let mut dds = DdsContainer::parse(&mut manual).unwrap();
            let cube = LutCube::from_container(&dds).unwrap();
            let levels = LevelStats::of_cube(&cube);
            assert_eq!(levels.point_count, 729);
            assert_eq!(neutral_tint(&cube).len(), 3);
            correct(&ctx, &mut dds, &cube, &levels)
        };

        let patched = patch(&ctx, file).unwrap();
        assert_eq!(report, patched.report);
        assert_eq!(manual, patched.buffer);
    }

    #[test]
    fn test_batch_of_files() {
        let dir = tempdir().unwrap();
        let luts = [
            LutFixture::graded(9, WARM_LIFT, WARM_GAIN),
            LutFixture::identity(9),
            LutFixture::graded(9, [0.02; 3], [0.9; 3]).format(DxgiFormat::R8G8B8A8_UNorm_sRGB),
        ];
        let paths: Vec<_> = luts
            .iter()
            .enumerate()
            .map(|(i, lut)| lut.write_to(dir.path(), &format!("lut_{i}.dds")).unwrap())
            .collect();

        let ctx = CorrectionContext::default();
        let changed: Vec<bool> = paths
            .iter()
            .map(|p| patch(&ctx, std::fs::read(p).unwrap()).unwrap().is_changed())
            .collect();
        assert_eq!(changed, [true, false, false]);
    }

    #[test]
    fn test_report_json() {
        let ctx = CorrectionContext::default();
        let file = LutFixture::identity(5).build().unwrap();
        let patched = patch(&ctx, file).unwrap();

        let json = serde_json::to_value(patched.report).unwrap();
        assert_eq!(json["changed"], 0);
        assert_eq!(json["skipped"], "alreadyNeutral");
    }
}
