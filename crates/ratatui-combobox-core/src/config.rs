use crate::error::ComboboxError;
use crate::error::Result;
use crate::navigator::ComboBindings;

/// Configuration for one combobox instance.
///
/// Validated once when the widget is built (see [`ComboboxOptions::validate`]); handlers never
/// re-check it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComboboxOptions {
    /// Shown when the display value is empty.
    pub placeholder: String,
    /// Suppresses all interaction and keeps the dropdown closed.
    pub disabled: bool,
    /// Whether the clear button and `Clear` are reachable.
    pub clearable: bool,
    /// Passthrough for the host's styling layer. No behavioral effect.
    pub class_name: Option<String>,
    /// Instance id. The listbox id and row ids are derived from it.
    pub id: String,
    pub max_visible_rows: u16,
    pub empty_message: String,
    pub bindings: ComboBindings,
}

impl Default for ComboboxOptions {
    fn default() -> Self {
        Self {
            placeholder: "Select an option...".to_string(),
            disabled: false,
            clearable: true,
            class_name: None,
            id: "combobox".to_string(),
            max_visible_rows: 8,
            empty_message: "No results found".to_string(),
            bindings: ComboBindings::default(),
        }
    }
}

impl ComboboxOptions {
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(ComboboxError::EmptyId);
        }
        if self.id.chars().any(char::is_whitespace) {
            return Err(ComboboxError::InvalidId(self.id.clone()));
        }
        if self.max_visible_rows == 0 {
            return Err(ComboboxError::ZeroVisibleRows);
        }
        Ok(())
    }

    pub fn listbox_id(&self) -> String {
        format!("{}-listbox", self.id)
    }

    pub fn option_id(&self, value: &str) -> String {
        format!("{}-option-{}", self.id, value)
    }
}
