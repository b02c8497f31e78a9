//! Pluggable font selection

use webfonts_repo::Repository;

/// Font selection strategy.
///
/// A configured strategy is delegated to verbatim and may return `None` to
/// mean "no font for this language". Closures of the matching shape
/// implement the trait, so a strategy is usually just:
///
/// ```rust,ignore
/// options.font_selector = Some(Box::new(|repo: &Repository, lang: &str| {
///     repo.language_fonts(lang).and_then(|fonts| fonts.last()).cloned()
/// }));
/// ```
pub trait FontSelect {
    fn select(&self, repository: &Repository, language: &str) -> Option<String>;
}

impl<F> FontSelect for F
where
    F: Fn(&Repository, &str) -> Option<String>,
{
    fn select(&self, repository: &Repository, language: &str) -> Option<String> {
        self(repository, language)
    }
}
