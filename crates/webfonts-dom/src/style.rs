//! Inline style declarations and font-family value handling
//!
//! Not a CSS parser: only `property: value` declaration lists (the `style`
//! attribute) and comma-separated `font-family` values are understood.

/// The five CSS generic family keywords
pub const GENERIC_FAMILIES: [&str; 5] =
    ["serif", "sans-serif", "monospace", "cursive", "fantasy"];

/// A single `property: value` pair from an inline style attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

/// Split a `style` attribute value into declarations.
///
/// Declarations with an empty property or value are dropped, matching how a
/// browser's style attribute parser recovers from junk.
pub fn parse_declarations(text: &str) -> Vec<Declaration> {
    let mut declarations = Vec::new();
    for piece in text.split(';') {
        let Some((property, value)) = piece.split_once(':') else {
            continue;
        };
        let property = property.trim();
        let value = value.trim();
        if !property.is_empty() && !value.is_empty() {
            declarations.push(Declaration {
                property: property.to_ascii_lowercase(),
                value: value.to_string(),
            });
        }
    }
    declarations
}

/// Serialize declarations back into a `style` attribute value.
pub fn serialize_declarations(declarations: &[Declaration]) -> String {
    declarations
        .iter()
        .map(|d| format!("{}: {};", d.property, d.value))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split a `font-family` value into unquoted family names.
///
/// Browsers reformat the string (quote style, comma spacing), so values are
/// compared as lists, never byte-for-byte.
pub fn parse_font_family_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|name| name.trim().trim_matches(|c| c == '\'' || c == '"').to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

/// Whether two font-family values name the same stack.
pub fn same_font_stack(a: &str, b: &str) -> bool {
    parse_font_family_list(a) == parse_font_family_list(b)
}

/// Whether a resolved font-family value is nothing but a generic keyword.
pub fn is_generic_family(value: &str) -> bool {
    let families = parse_font_family_list(value);
    match families.as_slice() {
        [only] => GENERIC_FAMILIES.iter().any(|g| only.eq_ignore_ascii_case(g)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_declarations() {
        let decls = parse_declarations("font-family: FancyFont; color: red;");
        assert_eq!(decls.len(), 2);
        assert_eq!(decls[0].property, "font-family");
        assert_eq!(decls[0].value, "FancyFont");
        assert_eq!(decls[1].property, "color");
    }

    #[test]
    fn test_parse_declarations_junk() {
        assert!(parse_declarations("").is_empty());
        assert!(parse_declarations(";;;").is_empty());
        assert!(parse_declarations("font-family").is_empty());
        assert!(parse_declarations("font-family:").is_empty());
        // Uppercase property names are folded.
        assert_eq!(parse_declarations("FONT-FAMILY: X")[0].property, "font-family");
    }

    #[test]
    fn test_serialize_round_trip() {
        let decls = parse_declarations("font-family: 'A', B; direction: rtl");
        assert_eq!(
            serialize_declarations(&decls),
            "font-family: 'A', B; direction: rtl;"
        );
    }

    #[test]
    fn test_parse_font_family_list() {
        assert_eq!(
            parse_font_family_list("'TharLon', Helvetica, Arial, sans-serif"),
            vec!["TharLon", "Helvetica", "Arial", "sans-serif"]
        );
        assert_eq!(parse_font_family_list("\"Fancy Font\""), vec!["Fancy Font"]);
        assert!(parse_font_family_list("").is_empty());
    }

    #[test]
    fn test_same_font_stack() {
        assert!(same_font_stack("'TharLon', Arial", "TharLon,Arial"));
        assert!(!same_font_stack("TharLon", "Arial"));
    }

    #[test]
    fn test_is_generic_family() {
        assert!(is_generic_family("serif"));
        assert!(is_generic_family("Sans-Serif"));
        assert!(is_generic_family(" monospace "));
        assert!(!is_generic_family("FancyFont"));
        assert!(!is_generic_family("serif, sans-serif"));
        assert!(!is_generic_family(""));
    }
}
