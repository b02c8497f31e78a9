//! Per-attachment engine state and the public operations

use webfonts_dom::{Document, NodeId, SelectorList, same_font_stack};
use webfonts_repo::{Repository, RepositoryError};

use crate::options::Options;
use crate::resolver::{self, ResolveReport};
use crate::select::FontSelect;

/// Class marking elements whose font-family this engine has set.
pub const CHANGED_CLASS: &str = "webfonts-changed";

/// Outcome of loading a font family's CSS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// `@font-face` text was built and injected
    Injected,
    /// This instance already injected the family; nothing was emitted
    AlreadyLoaded,
    /// The repository has no asset for the family; nothing was emitted and
    /// the family is not marked loaded, so a later registration can succeed
    AssetNotFound,
}

/// Outcome of applying a font stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// A font stack was assigned to the targets
    Applied,
    /// The stack collapsed to empty and inline font-family overrides were
    /// removed, letting the cascade take over
    Cleared,
}

/// Attachment failure.
#[derive(Debug, thiserror::Error)]
pub enum AttachError {
    #[error("attach target is not an element")]
    NotAnElement,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// One attachment of the webfonts behavior to a document subtree.
///
/// All operations are synchronous and run to completion; the document is
/// passed explicitly to each call. Dropping (or [`WebFonts::detach`]ing) an
/// instance discards its bookkeeping only; applied styles and injected CSS
/// remain.
pub struct WebFonts {
    pub(crate) root: NodeId,
    pub(crate) repository: Repository,
    pub(crate) font_stack: Vec<String>,
    pub(crate) exclude: Option<SelectorList>,
    pub(crate) font_selector: Option<Box<dyn FontSelect>>,
    pub(crate) overridable: Vec<String>,
    /// Root language, lowercased, re-detected on every refresh
    pub(crate) language: Option<String>,
    /// Resolved font-family of the root as captured at attach time
    pub(crate) original_font_family: String,
    /// Families this instance has injected, in injection order
    pub(crate) loaded: Vec<String>,
}

impl WebFonts {
    /// Attach to `root` and run a full resolution pass over its subtree.
    pub fn attach(
        doc: &mut Document,
        root: NodeId,
        options: Options,
    ) -> Result<Self, AttachError> {
        if !doc.is_element(root) {
            return Err(AttachError::NotAnElement);
        }
        let Options {
            repository,
            font_stack,
            exclude,
            font_selector,
            overridable_font_families,
        } = options;
        let repository = match repository {
            Some(overrides) => Repository::new().merge(overrides)?,
            None => Repository::new(),
        };
        let original_font_family = doc.resolved_font_family(root);

        let mut webfonts = Self {
            root,
            repository,
            font_stack,
            exclude: exclude.as_deref().and_then(SelectorList::parse),
            font_selector,
            overridable: overridable_font_families,
            language: None,
            original_font_family,
            loaded: Vec::new(),
        };
        let report = webfonts.init(doc);
        tracing::debug!(?report, "webfonts attached");
        Ok(webfonts)
    }

    /// The attachment root.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The root language in effect, lowercased.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// The root's font-family as captured at attach time.
    pub fn original_font_family(&self) -> &str {
        &self.original_font_family
    }

    /// Families this instance has injected so far, in order.
    pub fn loaded_fonts(&self) -> &[String] {
        &self.loaded
    }

    fn init(&mut self, doc: &mut Document) -> ResolveReport {
        self.language = doc
            .attr(self.root, "lang")
            .or_else(|| doc.default_language())
            .map(|l| l.to_ascii_lowercase());
        resolver::resolve_subtree(self, doc)
    }

    pub(crate) fn resolve_font(&self, language: &str) -> Option<String> {
        let language = language.to_ascii_lowercase();
        match &self.font_selector {
            Some(strategy) => strategy.select(&self.repository, &language),
            None => self.repository.default_font(&language).map(str::to_owned),
        }
    }

    pub(crate) fn is_overridable(&self, declared: Option<&str>) -> bool {
        declared
            .is_some_and(|value| self.overridable.iter().any(|entry| same_font_stack(entry, value)))
    }

    /// Inject the `@font-face` rules for a family, once per instance.
    pub fn load(&mut self, doc: &mut Document, family: &str) -> LoadOutcome {
        if self.loaded.iter().any(|f| f == family) {
            return LoadOutcome::AlreadyLoaded;
        }
        let css = webfonts_css::build_font_face(&self.repository, family, "normal", doc.user_agent());
        match css {
            Some(css) => {
                doc.inject_css(&css);
                self.loaded.push(family.to_string());
                tracing::debug!("injected @font-face rules for '{family}'");
                LoadOutcome::Injected
            }
            None => LoadOutcome::AssetNotFound,
        }
    }

    /// Apply a font family, with the configured fallback stack, to the
    /// target elements and their descendant form controls.
    ///
    /// With no targets given, the attachment root is the target. The family
    /// is loaded first, so its rules are present before any style that
    /// depends on them is assigned. An empty family, or one equal to the
    /// captured original, collapses the stack: inline overrides are removed
    /// instead.
    pub fn apply(
        &mut self,
        doc: &mut Document,
        family: Option<&str>,
        targets: Option<&[NodeId]>,
    ) -> ApplyOutcome {
        let family = family.map(str::trim).filter(|f| !f.is_empty());
        tracing::debug!("applying font family {:?}", family);

        let mut stack = self.font_stack.clone();
        if let Some(family) = family {
            self.load(doc, family);
            if !stack.iter().any(|entry| entry == family) {
                stack.insert(0, format!("'{family}'"));
            }
        }
        let collapsed = match family {
            None => true,
            Some(family) => same_font_stack(family, &self.original_font_family),
        };
        let value = if collapsed { None } else { Some(stack.join(", ")) };

        let root_target = [self.root];
        let targets = targets.unwrap_or(&root_target[..]);
        for &target in targets {
            self.assign(doc, target, value.as_deref());
            // Form controls do not inherit font-family and are set explicitly.
            for control in doc.form_controls_of(target) {
                self.assign(doc, control, value.as_deref());
            }
        }
        if value.is_some() {
            ApplyOutcome::Applied
        } else {
            ApplyOutcome::Cleared
        }
    }

    fn assign(&self, doc: &mut Document, id: NodeId, value: Option<&str>) {
        if let Some(exclude) = &self.exclude {
            if doc.matches(id, exclude) {
                return;
            }
        }
        doc.set_font_family(id, value);
        match value {
            Some(_) => doc.add_class(id, CHANGED_CLASS),
            None => doc.remove_class(id, CHANGED_CLASS),
        }
    }

    /// Restore the root, its form controls and every element this instance
    /// has styled to the state captured at attach time. Injected CSS stays.
    pub fn reset(&mut self, doc: &mut Document) -> ApplyOutcome {
        let mut targets = vec![self.root];
        for id in doc.elements_with_class(self.root, CHANGED_CLASS) {
            if !targets.contains(&id) {
                targets.push(id);
            }
        }
        let original = self.original_font_family.clone();
        self.apply(doc, Some(&original), Some(targets.as_slice()))
    }

    /// Reset, re-detect the root language, and run a full resolution pass.
    pub fn refresh(&mut self, doc: &mut Document) -> ResolveReport {
        self.reset(doc);
        self.init(doc)
    }

    /// Known font family names; with a language, that language's preference
    /// list instead.
    pub fn list(&self, language: Option<&str>) -> Vec<String> {
        match language {
            Some(language) => self
                .repository
                .language_fonts(language)
                .map(<[String]>::to_vec)
                .unwrap_or_default(),
            None => self.repository.families(),
        }
    }

    /// Known language codes.
    pub fn languages(&self) -> Vec<String> {
        self.repository.languages()
    }

    /// Merge repository overrides into this instance's repository.
    ///
    /// Produces a new repository value; other instances are unaffected.
    pub fn set_repository(&mut self, overrides: Repository) -> Result<(), RepositoryError> {
        self.repository = self.repository.clone().merge(overrides)?;
        Ok(())
    }

    /// Drop the per-instance bookkeeping. Applied styles and injected CSS
    /// are left as they are.
    pub fn detach(self) {
        tracing::debug!("webfonts detached");
    }
}
