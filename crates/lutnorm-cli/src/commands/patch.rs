//! Level correction command

use crate::PatchArgs;
use anyhow::{Context, Result, bail};
use lutnorm_ops::{CorrectionContext, CorrectionReport, Measurement};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace, warn};

/// LUT folder of the game's per-user data, relative to the profile directory.
const DOCS_LUT_DIR: &str = "Documents/My Games/Starfield/Data/textures/effects/luts";

/// LUTs that must keep their grade.
const SKIP_FILES: &[&str] = &["lgt_lut_ui_negative_curve.dds"];
const SKIP_PREFIXES: &[&str] = &["photomode_", "qc_"];

/// What happened to one input file.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FileOutcome {
    input: PathBuf,
    output: PathBuf,
    report: CorrectionReport,
    /// Levels after correction, when anything changed.
    corrected: Option<Measurement>,
    written: bool,
}

pub fn run(args: PatchArgs) -> Result<()> {
    trace!(input = ?args.input, output = ?args.output, docs = args.docs, "patch::run");

    let (input, output) = resolve_paths(&args)?;
    if !input.exists() {
        bail!("Input not found: {}", input.display());
    }

    let input_is_dir = input.is_dir();
    if input_is_dir && !args.dry_run {
        std::fs::create_dir_all(&output)
            .with_context(|| format!("Failed to create: {}", output.display()))?;
    }
    let output_is_dir = input_is_dir || output.is_dir();

    let files: Vec<PathBuf> = collect_inputs(&input)?
        .into_iter()
        .filter(|path| should_process(path))
        .collect();

    info!(files = files.len(), input = %input.display(), dry_run = args.dry_run, "Starting LUT correction");

    let ctx = CorrectionContext::default();

    // Process files in parallel
    let results: Vec<(&PathBuf, Result<FileOutcome>)> = files
        .par_iter()
        .map(|file| {
            let target = output_path(file, &output, output_is_dir);
            (file, process_file(&ctx, file, &target, args.dry_run))
        })
        .collect();

    let mut written = 0;
    let mut failed = 0;
    for (file, result) in results {
        match result {
            Ok(outcome) => {
                if outcome.written {
                    written += 1;
                }
                if args.json {
                    println!("{}", serde_json::to_string(&outcome)?);
                }
            }
            Err(e) => {
                failed += 1;
                eprintln!("Error: {}: {:#}", file.display(), e);
            }
        }
    }

    info!(written, failed, "LUT correction complete");
    println!("{} {} written.", written, if written == 1 { "file" } else { "files" });

    if failed > 0 {
        bail!("{} files failed", failed);
    }

    Ok(())
}

/// Input and output roots, with `--docs` expanded.
fn resolve_paths(args: &PatchArgs) -> Result<(PathBuf, PathBuf)> {
    if args.docs {
        let dir = docs_lut_dir()?;
        return Ok((dir.clone(), dir));
    }
    match (&args.input, &args.output) {
        (Some(input), Some(output)) => Ok((input.clone(), output.clone())),
        _ => bail!("Both --in and --out are required unless --docs is given"),
    }
}

fn docs_lut_dir() -> Result<PathBuf> {
    let profile = std::env::var_os("USERPROFILE")
        .or_else(|| std::env::var_os("HOME"))
        .context("Neither USERPROFILE nor HOME is set")?;
    Ok(PathBuf::from(profile).join(DOCS_LUT_DIR))
}

/// Lists the `.dds` files of a directory (not recursive), or returns a
/// single file as is.
fn collect_inputs(input: &Path) -> Result<Vec<PathBuf>> {
    if !input.is_dir() {
        return Ok(vec![input.to_path_buf()]);
    }

    let dir = glob::Pattern::escape(&input.to_string_lossy());
    let pattern = format!("{}/*.dds", dir);
    let mut files: Vec<PathBuf> = readable_entries(glob::glob(&pattern)?)
        .into_iter()
        .filter(|p| p.is_file())
        .collect();
    files.sort();
    Ok(files)
}

/// Keeps the listed paths, logging entries that could not be read.
fn readable_entries<I, E>(entries: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = std::result::Result<PathBuf, E>>,
    E: std::fmt::Display,
{
    entries
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .collect()
}

/// True for `.dds` files that are not on the skip list.
fn should_process(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name.ends_with(".dds")
        && !SKIP_FILES.contains(&name)
        && !SKIP_PREFIXES.iter().any(|prefix| name.starts_with(prefix))
}

/// Output file for `input`: `output/<name>` for a directory, else `output`.
fn output_path(input: &Path, output: &Path, output_is_dir: bool) -> PathBuf {
    match (output_is_dir, input.file_name()) {
        (true, Some(name)) => output.join(name),
        _ => output.to_path_buf(),
    }
}

fn process_file(
    ctx: &CorrectionContext,
    input: &Path,
    output: &Path,
    dry_run: bool,
) -> Result<FileOutcome> {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string());

    let bytes = super::read_file(input)?;
    let mut patched = lutnorm_ops::patch(ctx, bytes)
        .with_context(|| format!("Failed to correct: {}", input.display()))?;
    let report = patched.report;

    if report.clipped > 0 || report.crushed > 0 {
        warn!(file = %name, clipped = report.clipped, crushed = report.crushed, "Out-of-range points kept their original color");
    }

    let mut outcome = FileOutcome {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        report,
        corrected: None,
        written: false,
    };

    if !patched.is_changed() {
        debug!(file = %name, skipped = ?report.skipped, "Unchanged");
        return Ok(outcome);
    }

    let measured = lutnorm_ops::measure(ctx, &mut patched.buffer)
        .with_context(|| format!("Failed to measure: {}", input.display()))?;
    let levels = &measured.levels;

    info!("{} | {:.2}Y | {}", name, levels.average_y, report.changed);
    debug!(file = %name, median_y = levels.median_y, tint = ?measured.tint, "Corrected levels");
    if levels.min_y != 0.0 || levels.max_y != 1.0 {
        warn!("{} [{}, {}]", name, levels.min_y, levels.max_y);
    }

    if !dry_run {
        super::write_file(output, &patched.buffer)?;
        outcome.written = true;
    }
    outcome.corrected = Some(measured);
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ddsfile::{
        AlphaMode, D3D10ResourceDimension, D3DFormat, Dds, DxgiFormat, NewD3dParams,
        NewDxgiParams,
    };
    use lutnorm_lut::identity_rgba8;
    use std::io;
    use tempfile::tempdir;

    fn serialize(mut dds: Dds, data: Vec<u8>) -> Vec<u8> {
        dds.data = data;
        let mut buf = Vec::new();
        dds.write(&mut buf).unwrap();
        buf
    }

    /// 9^3 LUT file around the given RGBA8 surface.
    fn lut_file(surface: Vec<u8>) -> Vec<u8> {
        let dds = Dds::new_dxgi(NewDxgiParams {
            height: 9,
            width: 81,
            depth: None,
            format: DxgiFormat::R8G8B8A8_UNorm,
            mipmap_levels: None,
            array_layers: None,
            caps2: None,
            is_cubemap: false,
            resource_dimension: D3D10ResourceDimension::Texture2D,
            alpha_mode: AlphaMode::Straight,
        })
        .unwrap();
        serialize(dds, surface)
    }

    /// 9^3 identity LUT with a lifted black corner.
    fn lifted_lut() -> Vec<u8> {
        let mut surface = identity_rgba8(9);
        surface[..3].copy_from_slice(&[39, 39, 39]);
        lut_file(surface)
    }

    #[test]
    fn test_should_process() {
        assert!(should_process(Path::new("luts/lgt_lut_day.dds")));
        assert!(!should_process(Path::new("luts/lgt_lut_ui_negative_curve.dds")));
        assert!(!should_process(Path::new("photomode_warm.dds")));
        assert!(!should_process(Path::new("qc_grid.dds")));
        assert!(!should_process(Path::new("notes.txt")));
        assert!(!should_process(Path::new("lut.DDS")));
        // only the file name is matched
        assert!(should_process(Path::new("qc_dir/lut.dds")));
    }

    #[test]
    fn test_output_path() {
        let out = Path::new("fixed");
        assert_eq!(
            output_path(Path::new("luts/a.dds"), out, true),
            PathBuf::from("fixed/a.dds")
        );
        assert_eq!(
            output_path(Path::new("luts/a.dds"), Path::new("b.dds"), false),
            PathBuf::from("b.dds")
        );
    }

    #[test]
    fn test_resolve_paths() {
        let args = PatchArgs {
            input: Some(PathBuf::from("in")),
            output: Some(PathBuf::from("out")),
            docs: false,
            dry_run: false,
            json: false,
        };
        let (i, o) = resolve_paths(&args).unwrap();
        assert_eq!(i, PathBuf::from("in"));
        assert_eq!(o, PathBuf::from("out"));

        let missing = PatchArgs { output: None, ..args };
        assert!(resolve_paths(&missing).is_err());
    }

    #[test]
    fn test_collect_inputs_lists_dds_only() {
        let dir = tempdir().unwrap();
        for name in ["b.dds", "a.dds", "readme.txt"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.dds")).unwrap();

        let files = collect_inputs(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, ["a.dds", "b.dds"]);
    }

    #[test]
    fn test_unreadable_entries_are_dropped() {
        let entries = vec![
            Ok(PathBuf::from("a.dds")),
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "locked.dds")),
            Ok(PathBuf::from("b.dds")),
        ];
        assert_eq!(
            readable_entries(entries),
            [PathBuf::from("a.dds"), PathBuf::from("b.dds")]
        );
    }

    #[test]
    fn test_collect_inputs_single_file() {
        let files = collect_inputs(Path::new("some/lut.dds")).unwrap();
        assert_eq!(files, [PathBuf::from("some/lut.dds")]);
    }

    #[test]
    fn test_process_file_writes_changed() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("lut.dds");
        let output = dir.path().join("out.dds");
        std::fs::write(&input, lifted_lut()).unwrap();

        let outcome = process_file(&CorrectionContext::default(), &input, &output, false).unwrap();
        assert!(outcome.written);
        assert!(outcome.report.changed > 0);
        let corrected = outcome.corrected.unwrap();
        assert_eq!(corrected.levels.min_y, 0.0);

        let data = std::fs::read(&output).unwrap();
        assert_eq!(data[148..151], [0, 0, 0]);
    }

    #[test]
    fn test_process_file_dry_run_writes_nothing() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("lut.dds");
        let output = dir.path().join("out.dds");
        std::fs::write(&input, lifted_lut()).unwrap();

        let outcome = process_file(&CorrectionContext::default(), &input, &output, true).unwrap();
        assert!(!outcome.written);
        assert!(outcome.report.changed > 0);
        assert!(!output.exists());
    }

    #[test]
    fn test_process_file_skips_neutral() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("lut.dds");
        let output = dir.path().join("out.dds");
        std::fs::write(&input, lut_file(identity_rgba8(9))).unwrap();

        let outcome = process_file(&CorrectionContext::default(), &input, &output, false).unwrap();
        assert!(!outcome.written);
        assert_eq!(outcome.report.changed, 0);
        assert!(!output.exists());
    }

    /// Compressed textures next to the LUTs are left alone, not failed
    #[test]
    fn test_process_file_passes_compressed_texture() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("lgt_lut_noise.dds");
        let output = dir.path().join("out.dds");
        let dds = Dds::new_d3d(NewD3dParams {
            height: 64,
            width: 64,
            depth: None,
            format: D3DFormat::DXT1,
            mipmap_levels: None,
            caps2: None,
        })
        .unwrap();
        std::fs::write(&input, serialize(dds, vec![0x5a; 2048])).unwrap();

        let outcome = process_file(&CorrectionContext::default(), &input, &output, false).unwrap();
        assert!(!outcome.written);
        assert_eq!(outcome.report.changed, 0);
        assert!(!output.exists());
    }

    #[test]
    fn test_process_file_reports_bad_input() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("broken.dds");
        std::fs::write(&input, b"nope").unwrap();

        let err = process_file(
            &CorrectionContext::default(),
            &input,
            &dir.path().join("out.dds"),
            false,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("broken.dds"));
    }

    #[test]
    fn test_outcome_serializes() {
        let outcome = FileOutcome {
            input: PathBuf::from("a.dds"),
            output: PathBuf::from("b.dds"),
            report: CorrectionReport::default(),
            corrected: None,
            written: false,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["report"]["changed"], 0);
        assert_eq!(json["written"], false);
    }
}
