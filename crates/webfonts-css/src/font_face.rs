//! `@font-face` block construction

use webfonts_repo::{FontFormat, Repository};

/// Build the `@font-face` CSS text for a font family.
///
/// A `variant` other than `"normal"` that the asset declares redirects the
/// lookup to the variant's target family. Returns `None` when no asset
/// resolves; callers treat that as "nothing to inject", not as an error.
///
/// When the asset declares variants beyond the requested one, their blocks
/// are appended after the first, so loading a family's normal form also
/// loads its bold/italic forms in one pass.
pub fn build_font_face(
    repo: &Repository,
    family: &str,
    variant: &str,
    user_agent: &str,
) -> Option<String> {
    let mut family = family;
    let mut asset = repo.get(family);
    if variant != "normal" {
        if let Some(target) = asset.and_then(|a| a.variant(variant)) {
            family = target;
            asset = repo.get(target);
        }
    }
    let Some(asset) = asset else {
        tracing::trace!("no font asset for family '{family}', skipping");
        return None;
    };

    let base = repo.base();
    let version_suffix = format!("?version={}", asset.version);

    let mut css = format!("@font-face {{ font-family: '{family}';\n");
    if let Some(eot) = asset.locator(FontFormat::EmbeddedOpenType) {
        css.push_str(&format!("\tsrc: url('{base}{eot}{version_suffix}');\n"));
    }
    css.push_str("\tsrc: ");
    if !user_agent.contains("Android 2.3") {
        // Android 2.3.x does not respect the local() syntax.
        // http://code.google.com/p/android/issues/detail?id=10609
        css.push_str(&format!("local('{family}'),"));
    }
    let mut sources = Vec::new();
    if let Some(woff) = asset.locator(FontFormat::Woff) {
        sources.push(format!("\t\turl('{base}{woff}{version_suffix}') format('woff')"));
    }
    if let Some(svg) = asset.locator(FontFormat::Svg) {
        sources.push(format!(
            "\t\turl('{base}{svg}{version_suffix}#{family}') format('svg')"
        ));
    }
    if let Some(ttf) = asset.locator(FontFormat::TrueType) {
        sources.push(format!("\t\turl('{base}{ttf}{version_suffix}') format('truetype')"));
    }
    css.push_str(&sources.join(","));
    css.push_str(";\n");
    if let Some(weight) = &asset.weight {
        css.push_str(&format!("\tfont-weight: {weight};\n"));
    }
    let style = asset.style.as_deref().unwrap_or("normal");
    css.push_str(&format!("\tfont-style: {style};}}\n"));

    for name in asset.variants.keys() {
        if name != variant {
            if let Some(block) = build_font_face(repo, family, name, user_agent) {
                css.push_str(&block);
            }
        }
    }

    Some(css)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tharlon_repo() -> Repository {
        let overrides: Repository = serde_json::from_str(
            r#"{
                "fonts": {
                    "TharLon": {
                        "eot": "TharLon/TharLon.eot",
                        "ttf": "TharLon/TharLon.ttf",
                        "woff": "TharLon/TharLon.woff",
                        "license": "OFL 1.1",
                        "version": "1.0"
                    }
                },
                "languages": { "my": ["TharLon"] }
            }"#,
        )
        .unwrap();
        Repository::new().merge(overrides).unwrap()
    }

    const THARLON_BLOCK: &str = "@font-face { font-family: 'TharLon';\n\
        \tsrc: url('fontsTharLon/TharLon.eot?version=1.0');\n\
        \tsrc: local('TharLon'),\
        \t\turl('fontsTharLon/TharLon.woff?version=1.0') format('woff'),\
        \t\turl('fontsTharLon/TharLon.ttf?version=1.0') format('truetype');\n\
        \tfont-style: normal;}\n";

    #[test]
    fn test_exact_block() {
        let css = build_font_face(&tharlon_repo(), "TharLon", "normal", "").unwrap();
        assert_eq!(css, THARLON_BLOCK);
    }

    #[test]
    fn test_deterministic_output() {
        let repo = tharlon_repo();
        let first = build_font_face(&repo, "TharLon", "normal", "Mozilla/5.0").unwrap();
        let second = build_font_face(&repo, "TharLon", "normal", "Mozilla/5.0").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_android_2_3_omits_local() {
        let ua = "Mozilla/5.0 (Linux; U; Android 2.3.5; en-us) AppleWebKit/533.1";
        let css = build_font_face(&tharlon_repo(), "TharLon", "normal", ua).unwrap();
        assert!(!css.contains("local("));
        assert!(css.contains("\tsrc: \t\turl('fontsTharLon/TharLon.woff?version=1.0')"));
    }

    #[test]
    fn test_unknown_family() {
        assert_eq!(build_font_face(&tharlon_repo(), "NoSuchFont", "normal", ""), None);
    }

    #[test]
    fn test_unknown_variant_falls_back_to_family() {
        // An undeclared variant builds the family itself.
        let css = build_font_face(&tharlon_repo(), "TharLon", "bold", "").unwrap();
        assert_eq!(css, THARLON_BLOCK);
    }

    #[test]
    fn test_svg_fragment_and_weight() {
        let overrides: Repository = serde_json::from_str(
            r#"{
                "base": "f/",
                "fonts": {
                    "Alef": {
                        "svg": "Alef/Alef.svg",
                        "version": "2.1",
                        "fontweight": "bold",
                        "fontstyle": "italic"
                    }
                }
            }"#,
        )
        .unwrap();
        let repo = Repository::new().merge(overrides).unwrap();
        let css = build_font_face(&repo, "Alef", "normal", "").unwrap();
        assert_eq!(
            css,
            "@font-face { font-family: 'Alef';\n\
             \tsrc: local('Alef'),\
             \t\turl('f/Alef/Alef.svg?version=2.1#Alef') format('svg');\n\
             \tfont-weight: bold;\n\
             \tfont-style: italic;}\n"
        );
    }

    #[test]
    fn test_no_locators_degenerate_rule() {
        let overrides: Repository =
            serde_json::from_str(r#"{ "fonts": { "Ghost": { "version": "0" } } }"#).unwrap();
        let repo = Repository::new().merge(overrides).unwrap();
        let css = build_font_face(&repo, "Ghost", "normal", "").unwrap();
        // Still a rule; the src list is empty but the block is emitted.
        assert_eq!(
            css,
            "@font-face { font-family: 'Ghost';\n\tsrc: local('Ghost'),;\n\tfont-style: normal;}\n"
        );
    }

    #[test]
    fn test_variant_redirect_and_recursion() {
        let overrides: Repository = serde_json::from_str(
            r#"{
                "fonts": {
                    "Lohit": {
                        "ttf": "Lohit/Lohit.ttf",
                        "version": "1.0",
                        "variants": { "bold": "LohitBold" }
                    },
                    "LohitBold": {
                        "ttf": "Lohit/LohitBold.ttf",
                        "version": "1.0",
                        "fontweight": "bold"
                    }
                }
            }"#,
        )
        .unwrap();
        let repo = Repository::new().merge(overrides).unwrap();

        // Requesting the declared variant redirects to the target family.
        let bold = build_font_face(&repo, "Lohit", "bold", "").unwrap();
        assert!(bold.starts_with("@font-face { font-family: 'LohitBold';\n"));
        assert!(bold.contains("\tfont-weight: bold;\n"));

        // Loading the normal form emits the bold block after it.
        let both = build_font_face(&repo, "Lohit", "normal", "").unwrap();
        let first = both.find("font-family: 'Lohit';").unwrap();
        let second = both.find("font-family: 'LohitBold';").unwrap();
        assert!(first < second);
        assert_eq!(both.matches("@font-face").count(), 2);
    }
}
