//! Webfonts Engine
//!
//! Selects and injects web font CSS for elements based on their language
//! attribute, and propagates language-appropriate fonts through a document
//! subtree while leaving explicitly authored font styling alone.
//!
//! # Example
//! ```rust,ignore
//! use webfonts_engine::{Options, WebFonts};
//! use webfonts_engine::dom::Document;
//!
//! let mut doc = Document::new();
//! let root = doc.create_element("div");
//! let body = doc.body();
//! doc.append_child(body, root);
//! doc.set_attr(root, "lang", "my");
//!
//! let mut webfonts = WebFonts::attach(&mut doc, root, Options::default())?;
//! // ... document changed underneath us
//! webfonts.refresh(&mut doc);
//! ```
//!
//! Injected CSS is append-only for the life of the document: `reset`,
//! `refresh` and `detach` never remove `@font-face` rules. Each instance
//! tracks what it injected itself; two instances attached to the same
//! document may inject the same family twice, which is additive and
//! harmless.

mod engine;
mod options;
mod resolver;
mod select;

pub use engine::{ApplyOutcome, AttachError, CHANGED_CLASS, LoadOutcome, WebFonts};
pub use options::Options;
pub use resolver::ResolveReport;
pub use select::FontSelect;

pub use webfonts_dom::{Document, NodeId};
pub use webfonts_repo::{FontAsset, Repository, RepositoryError};

// Re-export sub-crates for advanced usage
pub use webfonts_css as css;
pub use webfonts_dom as dom;
pub use webfonts_repo as repo;
