//! The option catalog: the caller-owned list of selectable items.

use std::collections::HashSet;

use crate::error::ComboboxError;
use crate::error::Result;

/// One selectable item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComboOption {
    /// Unique within a catalog; this is what the owner receives on commit.
    pub value: String,
    /// Display text, also the text the filter matches against.
    pub label: String,
    pub disabled: bool,
}

impl ComboOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            disabled: false,
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// An ordered, immutable list of options.
///
/// Order is render order and highlight traversal order. The widget only ever reads it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    options: Vec<ComboOption>,
}

impl Catalog {
    /// Validates that every value is non-empty and unique.
    pub fn new(options: Vec<ComboOption>) -> Result<Self> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(options.len());
        for (index, opt) in options.iter().enumerate() {
            if opt.value.is_empty() {
                return Err(ComboboxError::EmptyValue { index });
            }
            if !seen.insert(opt.value.as_str()) {
                return Err(ComboboxError::DuplicateValue(opt.value.clone()));
            }
        }
        Ok(Self { options })
    }

    /// Skips validation. Lookups return the first option with a given value.
    pub fn from_unchecked(options: Vec<ComboOption>) -> Self {
        Self { options }
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ComboOption> {
        self.options.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ComboOption> {
        self.options.iter()
    }

    pub fn as_slice(&self) -> &[ComboOption] {
        &self.options
    }

    pub fn find(&self, value: &str) -> Option<&ComboOption> {
        self.options.iter().find(|o| o.value == value)
    }

    pub fn label_of(&self, value: &str) -> Option<&str> {
        self.find(value).map(|o| o.label.as_str())
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a ComboOption;
    type IntoIter = std::slice::Iter<'a, ComboOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
