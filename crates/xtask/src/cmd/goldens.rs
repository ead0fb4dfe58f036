use crate::XtaskError;
use fla_codec::golden::{match_golden, parse_hex_dump, to_hex_dump};
use fla_codec::{ConversionContext, Determinism, EdgePathCodec, FormatVersion, StyleTriple};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Styles every edge fixture is encoded with.
const FIXTURE_STYLES: StyleTriple = StyleTriple {
    stroke: 1,
    fill0: 1,
    fill1: 0,
};

fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("fixtures")
        .join("edges")
}

fn parse_filter(args: &[String]) -> Result<Option<Regex>, XtaskError> {
    let mut filter = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--filter" => {
                i += 1;
                let pattern = args.get(i).ok_or(XtaskError::Usage)?;
                filter = Some(Regex::new(pattern)?);
            }
            "--help" | "-h" => return Err(XtaskError::Usage),
            _ => return Err(XtaskError::Usage),
        }
        i += 1;
    }
    Ok(filter)
}

fn list_fixtures(root: &Path, filter: Option<&Regex>) -> Vec<PathBuf> {
    let mut out = Vec::new();
    let Ok(entries) = fs::read_dir(root) else {
        return out;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.extension().is_some_and(|e| e == "edges") {
            continue;
        }
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
        if filter.is_some_and(|re| !re.is_match(stem)) {
            continue;
        }
        out.push(path);
    }
    out.sort();
    out
}

fn encode_fixture(path: &Path) -> Result<Vec<u8>, String> {
    let text = fs::read_to_string(path)
        .map_err(|err| format!("failed to read {}: {err}", path.display()))?;
    let ctx = ConversionContext::for_version(FormatVersion::Cs4)
        .with_determinism(Determinism::Replay);
    let mut w = ctx.writer(Vec::new());
    EdgePathCodec::new()
        .write_edge_list(&mut w, &text, FIXTURE_STYLES)
        .map_err(|err| format!("encode failed for {}: {err}", path.display()))?;
    Ok(w.into_inner())
}

pub(crate) fn update_goldens(args: Vec<String>) -> Result<(), XtaskError> {
    let filter = parse_filter(&args)?;
    let root = fixtures_root();
    let fixtures = list_fixtures(&root, filter.as_ref());
    if fixtures.is_empty() {
        return Err(XtaskError::GoldenUpdateFailed(format!(
            "no .edges fixtures found under {}",
            root.display()
        )));
    }

    let mut failures = Vec::new();
    for path in fixtures {
        let bytes = match encode_fixture(&path) {
            Ok(v) => v,
            Err(err) => {
                failures.push(err);
                continue;
            }
        };
        let out_path = path.with_extension("golden.hex");
        if let Err(err) = fs::write(&out_path, to_hex_dump(&bytes)) {
            failures.push(format!("failed to write {}: {err}", out_path.display()));
            continue;
        }
        tracing::info!(fixture = %out_path.display(), bytes = bytes.len(), "updated golden");
    }

    if failures.is_empty() {
        return Ok(());
    }
    Err(XtaskError::GoldenUpdateFailed(failures.join("\n")))
}

pub(crate) fn verify_goldens(args: Vec<String>) -> Result<(), XtaskError> {
    let filter = parse_filter(&args)?;
    let root = fixtures_root();
    let fixtures = list_fixtures(&root, filter.as_ref());
    if fixtures.is_empty() {
        tracing::warn!(root = %root.display(), "no .edges fixtures found");
        return Ok(());
    }

    let mut failures = Vec::new();
    let mut checked = 0usize;
    for path in fixtures {
        let actual = match encode_fixture(&path) {
            Ok(v) => v,
            Err(err) => {
                failures.push(err);
                continue;
            }
        };
        let golden_path = path.with_extension("golden.hex");
        let golden = match fs::read_to_string(&golden_path) {
            Ok(text) => parse_hex_dump(&text),
            Err(err) => Err(err.to_string()),
        };
        let golden = match golden {
            Ok(v) => v,
            Err(err) => {
                failures.push(format!("{}: {err}", golden_path.display()));
                continue;
            }
        };
        if let Err(mismatch) = match_golden(&actual, &golden, true) {
            failures.push(format!("{}: {mismatch}", path.display()));
            continue;
        }
        checked += 1;
    }

    if failures.is_empty() {
        tracing::info!(checked, "goldens verified");
        return Ok(());
    }
    Err(XtaskError::VerifyFailed(format!(
        "{}\n\nupdate with `cargo run -p xtask -- update-goldens`",
        failures.join("\n")
    )))
}
