//! Font repository

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::FontAsset;

/// Default URL prefix for font assets.
pub const DEFAULT_BASE: &str = "fonts";

/// Repository construction error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("font '{family}' variant '{variant}' references its own family")]
    VariantSelfReference { family: String, variant: String },
    #[error("variant references of font '{family}' form a cycle")]
    VariantCycle { family: String },
}

/// Maps language codes to font preference lists and family names to assets.
///
/// Language keys are canonicalized to ASCII lowercase and the variant
/// reference graph is checked for cycles when a repository is built with
/// [`Repository::from_parts`] or [`Repository::merge`]. A repository obtained
/// directly from deserialization is raw data; it is validated the first time
/// it is merged.
///
/// A family name referenced by a language list but missing from `fonts` is
/// not an error: lookups degrade to "no font available".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Repository {
    #[serde(skip_serializing_if = "Option::is_none")]
    base: Option<String>,
    languages: BTreeMap<String, Vec<String>>,
    fonts: BTreeMap<String, FontAsset>,
}

impl Repository {
    /// Create an empty repository with the default base path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a repository from its parts, canonicalizing language keys and
    /// validating the variant reference graph.
    pub fn from_parts(
        base: Option<String>,
        languages: BTreeMap<String, Vec<String>>,
        fonts: BTreeMap<String, FontAsset>,
    ) -> Result<Self, RepositoryError> {
        let languages = languages
            .into_iter()
            .map(|(code, families)| (code.to_ascii_lowercase(), families))
            .collect();
        let repo = Self { base, languages, fonts };
        repo.validate_variants()?;
        Ok(repo)
    }

    /// Combine caller overrides over this repository, producing a new value.
    ///
    /// Entries of `overrides` win per language code and per family name; an
    /// override base path replaces the current one. Neither input is
    /// mutated in place.
    pub fn merge(self, overrides: Repository) -> Result<Repository, RepositoryError> {
        let mut languages = self.languages;
        for (code, families) in overrides.languages {
            languages.insert(code, families);
        }
        let mut fonts = self.fonts;
        for (family, asset) in overrides.fonts {
            fonts.insert(family, asset);
        }
        Self::from_parts(overrides.base.or(self.base), languages, fonts)
    }

    /// URL prefix for asset locators.
    pub fn base(&self) -> &str {
        self.base.as_deref().unwrap_or(DEFAULT_BASE)
    }

    /// Default font family for a language code (case-insensitive): the first
    /// entry of its preference list, or `None` when the language is unknown
    /// or its list is empty.
    pub fn default_font(&self, language: &str) -> Option<&str> {
        self.languages
            .get(&language.to_ascii_lowercase())
            .and_then(|families| families.first())
            .map(String::as_str)
    }

    /// Asset descriptor for a family name.
    pub fn get(&self, family: &str) -> Option<&FontAsset> {
        self.fonts.get(family)
    }

    /// Preference list for a language code (case-insensitive).
    pub fn language_fonts(&self, language: &str) -> Option<&[String]> {
        self.languages.get(&language.to_ascii_lowercase()).map(Vec::as_slice)
    }

    /// All known language codes, in sorted order.
    pub fn languages(&self) -> Vec<String> {
        self.languages.keys().cloned().collect()
    }

    /// All known font family names, in sorted order.
    pub fn families(&self) -> Vec<String> {
        self.fonts.keys().cloned().collect()
    }

    // Variant references form a shallow graph over family names; walking it
    // must terminate, so self-references and cycles are rejected up front.
    fn validate_variants(&self) -> Result<(), RepositoryError> {
        for (family, asset) in &self.fonts {
            for (variant, target) in &asset.variants {
                if target == family {
                    return Err(RepositoryError::VariantSelfReference {
                        family: family.clone(),
                        variant: variant.clone(),
                    });
                }
            }
            self.walk_variants(family, &mut vec![family.as_str()])?;
        }
        Ok(())
    }

    fn walk_variants<'a>(
        &'a self,
        family: &str,
        path: &mut Vec<&'a str>,
    ) -> Result<(), RepositoryError> {
        let Some(asset) = self.fonts.get(family) else {
            return Ok(());
        };
        for target in asset.variants.values() {
            if path.iter().any(|seen| *seen == target.as_str()) {
                return Err(RepositoryError::VariantCycle { family: target.clone() });
            }
            if let Some((name, _)) = self.fonts.get_key_value(target.as_str()) {
                path.push(name.as_str());
                self.walk_variants(target, path)?;
                path.pop();
            }
        }
        Ok(())
    }
}
