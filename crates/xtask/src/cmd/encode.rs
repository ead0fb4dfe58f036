use crate::XtaskError;
use fla_codec::golden::to_hex_dump;
use fla_codec::{
    ConversionContext, Determinism, EdgePathCodec, FormatProfile, FormatVersion, StyleTriple,
};
use std::path::Path;

/// Accepts either a version name (`cs4`, `8`, ...) or a path to a JSON profile.
fn resolve_profile(arg: &str) -> Result<FormatProfile, XtaskError> {
    if arg.ends_with(".json") || Path::new(arg).is_file() {
        let text = std::fs::read_to_string(arg).map_err(|source| XtaskError::ReadFile {
            path: arg.to_string(),
            source,
        })?;
        let profile = FormatProfile::from_json_str(&text)?;
        tracing::debug!(path = arg, ?profile, "loaded profile");
        return Ok(profile);
    }
    Ok(arg.parse::<FormatVersion>()?.profile())
}

fn parse_styles(arg: &str) -> Result<StyleTriple, XtaskError> {
    let parts: Vec<u16> = arg
        .split(',')
        .map(|p| p.trim().parse::<u16>())
        .collect::<Result<_, _>>()
        .map_err(|_| XtaskError::Usage)?;
    let [stroke, fill0, fill1] = parts[..] else {
        return Err(XtaskError::Usage);
    };
    Ok(StyleTriple::new(stroke, fill0, fill1))
}

pub(crate) fn encode_edges(args: Vec<String>) -> Result<(), XtaskError> {
    let mut edges: Option<String> = None;
    let mut profile = FormatVersion::Cs4.profile();
    let mut styles = StyleTriple::new(1, 0, 0);
    let mut determinism = Determinism::Live;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--profile" => {
                i += 1;
                profile = resolve_profile(args.get(i).ok_or(XtaskError::Usage)?)?;
            }
            "--styles" => {
                i += 1;
                styles = parse_styles(args.get(i).ok_or(XtaskError::Usage)?)?;
            }
            "--replay" => determinism = Determinism::Replay,
            "--help" | "-h" => return Err(XtaskError::Usage),
            other if edges.is_none() => edges = Some(other.to_string()),
            _ => return Err(XtaskError::Usage),
        }
        i += 1;
    }
    let edges = edges.ok_or(XtaskError::Usage)?;

    let ctx = ConversionContext::new(profile).with_determinism(determinism);
    let mut w = ctx.writer(Vec::new());
    let records = EdgePathCodec::new().write_edge_list(&mut w, &edges, styles)?;
    tracing::info!(records, bytes = w.position(), "encoded edges");
    print!("{}", to_hex_dump(w.get_ref()));
    Ok(())
}

pub(crate) fn print_profile(args: Vec<String>) -> Result<(), XtaskError> {
    let version = match args.as_slice() {
        [] => FormatVersion::Cs4,
        [name] => name.parse()?,
        _ => return Err(XtaskError::Usage),
    };
    let json = serde_json::to_string_pretty(&version.profile())?;
    println!("{json}");
    Ok(())
}
