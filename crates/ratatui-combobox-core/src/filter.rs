//! Derives the visible subset of a catalog from the current input text.

use crate::option::Catalog;
use crate::option::ComboOption;

/// Indices (into `catalog`) of every option whose label contains `text`, case-insensitively.
///
/// Blank text (empty or whitespace only) keeps the whole catalog. Non-blank text is matched as
/// typed, surrounding whitespace included.
pub fn filter(catalog: &Catalog, text: &str) -> Vec<usize> {
    if text.trim().is_empty() {
        return (0..catalog.len()).collect();
    }
    let needle = text.to_lowercase();
    catalog
        .iter()
        .enumerate()
        .filter(|(_, opt)| label_matches(&opt.label, &needle))
        .map(|(i, _)| i)
        .collect()
}

/// Convenience wrapper over [`filter`] returning the options themselves.
pub fn filtered_options<'a>(catalog: &'a Catalog, text: &str) -> Vec<&'a ComboOption> {
    filter(catalog, text)
        .into_iter()
        .filter_map(|i| catalog.get(i))
        .collect()
}

fn label_matches(label: &str, needle_lower: &str) -> bool {
    label.to_lowercase().contains(needle_lower)
}

/// Memoized [`filter`] result, keyed by the text it was computed for.
///
/// Callers must [`FilteredView::invalidate`] when the catalog is replaced.
#[derive(Clone, Debug, Default)]
pub struct FilteredView {
    text: Option<String>,
    indices: Vec<usize>,
}

impl FilteredView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recomputes if `text` differs from the cached key. Returns `true` when it recomputed.
    pub fn refresh(&mut self, catalog: &Catalog, text: &str) -> bool {
        if self.text.as_deref() == Some(text) {
            return false;
        }
        self.indices = filter(catalog, text);
        self.text = Some(text.to_string());
        true
    }

    pub fn invalidate(&mut self) {
        self.text = None;
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Maps a filtered row to its catalog index.
    pub fn catalog_index(&self, row: usize) -> Option<usize> {
        self.indices.get(row).copied()
    }
}
