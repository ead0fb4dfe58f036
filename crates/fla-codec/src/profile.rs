//! Per-generation format constants.
//!
//! The codec never matches on [`FormatVersion`] itself: a version only selects a
//! [`FormatProfile`], and every encoder reads the flags and tag bytes of that profile.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatVersion {
    Mx,
    Mx2004,
    Flash8,
    Cs3,
    Cs4,
}

impl FormatVersion {
    pub const ALL: [FormatVersion; 5] = [
        FormatVersion::Mx,
        FormatVersion::Mx2004,
        FormatVersion::Flash8,
        FormatVersion::Cs3,
        FormatVersion::Cs4,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FormatVersion::Mx => "mx",
            FormatVersion::Mx2004 => "mx2004",
            FormatVersion::Flash8 => "flash8",
            FormatVersion::Cs3 => "cs3",
            FormatVersion::Cs4 => "cs4",
        }
    }

    pub fn profile(self) -> FormatProfile {
        let row = |unicode, curve_tag, tags: [u8; 5], layer_colors, guide_layers| FormatProfile {
            unicode,
            curve_tag_disambiguation: curve_tag,
            document_tag: tags[0],
            page_tag: tags[1],
            shape_tag: tags[2],
            symbol_tag: tags[3],
            media_tag: tags[4],
            has_layer_colors: layer_colors,
            has_guide_layers: guide_layers,
        };
        match self {
            FormatVersion::Mx => row(false, false, [0x11, 0x0B, 0x03, 0x0C, 0x05], false, false),
            FormatVersion::Mx2004 => row(false, false, [0x15, 0x0D, 0x04, 0x0E, 0x06], true, true),
            FormatVersion::Flash8 => row(true, false, [0x18, 0x0F, 0x05, 0x10, 0x08], true, true),
            FormatVersion::Cs3 => row(true, true, [0x1A, 0x11, 0x05, 0x12, 0x09], true, true),
            FormatVersion::Cs4 => row(true, true, [0x1D, 0x13, 0x06, 0x14, 0x0A], true, true),
        }
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FormatVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase();
        let version = match normalized.as_str() {
            "mx" | "6" | "flashmx" => FormatVersion::Mx,
            "mx2004" | "7" | "flashmx2004" => FormatVersion::Mx2004,
            "flash8" | "8" | "f8" => FormatVersion::Flash8,
            "cs3" | "9" => FormatVersion::Cs3,
            "cs4" | "10" => FormatVersion::Cs4,
            _ => {
                return Err(Error::UnknownFormatVersion {
                    name: s.to_string(),
                });
            }
        };
        Ok(version)
    }
}

/// Read-only per-document constants consumed by the encoders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormatProfile {
    /// Strings are written as UTF-16LE (and BOM-framed where requested).
    pub unicode: bool,
    /// Straight edges carry a trailing byte telling `/` lines apart from `|` lines.
    pub curve_tag_disambiguation: bool,
    pub document_tag: u8,
    pub page_tag: u8,
    pub shape_tag: u8,
    pub symbol_tag: u8,
    pub media_tag: u8,
    pub has_layer_colors: bool,
    pub has_guide_layers: bool,
}

impl Default for FormatProfile {
    fn default() -> Self {
        FormatVersion::Cs4.profile()
    }
}

impl FormatProfile {
    /// Parses a complete profile; missing fields take the CS4 defaults.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Applies a JSON object of field overrides on top of this profile.
    ///
    /// Unknown keys are ignored, mirroring how the profile deserializer treats them.
    pub fn with_overrides(self, overrides: &Value) -> Result<Self> {
        let mut base = serde_json::to_value(self)?;
        merge_object(&mut base, overrides);
        Ok(serde_json::from_value(base)?)
    }
}

fn merge_object(base: &mut Value, incoming: &Value) {
    let (Value::Object(base_map), Value::Object(in_map)) = (base, incoming) else {
        return;
    };
    for (key, value) in in_map {
        if base_map.contains_key(key) {
            base_map.insert(key.clone(), value.clone());
        }
    }
}
