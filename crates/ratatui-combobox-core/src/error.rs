use thiserror::Error;

/// Construction-time validation failures.
///
/// Interaction itself never fails: disabled options, empty filter results and unknown external
/// values are all handled silently. Only building a [`crate::option::Catalog`] or validating
/// [`crate::config::ComboboxOptions`] can return an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComboboxError {
    #[error("duplicate option value {0:?}")]
    DuplicateValue(String),

    /// The empty string is reserved for "no selection".
    #[error("option at index {index} has an empty value")]
    EmptyValue { index: usize },

    #[error("combobox id must not be empty")]
    EmptyId,

    #[error("combobox id {0:?} contains whitespace")]
    InvalidId(String),

    #[error("max_visible_rows must be at least 1")]
    ZeroVisibleRows,
}

pub type Result<T, E = ComboboxError> = std::result::Result<T, E>;
