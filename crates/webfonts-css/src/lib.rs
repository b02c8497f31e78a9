//! Webfonts CSS rule builder
//!
//! Constructs `@font-face` declaration text from font asset descriptors.
//! No CSS is parsed here; rules are built from structured repository data
//! and the output is deterministic down to the byte for a fixed repository
//! and user-agent string.

mod font_face;

pub use font_face::build_font_face;
