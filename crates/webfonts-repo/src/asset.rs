//! Font asset descriptors

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Binary format of a font file locator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFormat {
    /// Embedded OpenType (legacy IE)
    EmbeddedOpenType,
    /// Web Open Font Format
    Woff,
    /// SVG font
    Svg,
    /// TrueType
    TrueType,
}

/// A single font family's asset descriptor.
///
/// Field names follow the repository configuration format, so a descriptor
/// deserializes straight out of a JSON repository object:
///
/// ```json
/// { "eot": "TharLon/TharLon.eot", "ttf": "TharLon/TharLon.ttf",
///   "woff": "TharLon/TharLon.woff", "version": "1.0" }
/// ```
///
/// Descriptors are created at repository construction time and never
/// modified afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontAsset {
    /// Embedded-OpenType locator, relative to the repository base
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eot: Option<String>,
    /// WOFF locator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub woff: Option<String>,
    /// SVG locator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub svg: Option<String>,
    /// TrueType locator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttf: Option<String>,
    /// Version token, appended to every URL as a cache buster
    pub version: String,
    /// Declared `font-weight` value
    #[serde(rename = "fontweight", skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    /// Declared `font-style` value; "normal" when absent
    #[serde(rename = "fontstyle", skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    /// Variant name ("bold", "italic", ...) to target family name
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub variants: BTreeMap<String, String>,
    /// License metadata, carried but not interpreted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
}

impl FontAsset {
    /// Locator for the given binary format, if the asset declares one.
    pub fn locator(&self, format: FontFormat) -> Option<&str> {
        match format {
            FontFormat::EmbeddedOpenType => self.eot.as_deref(),
            FontFormat::Woff => self.woff.as_deref(),
            FontFormat::Svg => self.svg.as_deref(),
            FontFormat::TrueType => self.ttf.as_deref(),
        }
    }

    /// Target family for a declared variant name.
    pub fn variant(&self, name: &str) -> Option<&str> {
        self.variants.get(name).map(String::as_str)
    }
}
