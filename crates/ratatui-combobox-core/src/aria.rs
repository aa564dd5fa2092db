//! Pure projection of widget state into display text and accessibility attributes.
//!
//! Renderers (the ratatui widget, or a host that mirrors the widget into an accessibility tree)
//! should draw exclusively from a [`Projection`].

use crate::config::ComboboxOptions;
use crate::filter;
use crate::option::Catalog;
use crate::state::ComboState;

pub const ROLE_COMBOBOX: &str = "combobox";
pub const ROLE_LISTBOX: &str = "listbox";
pub const ROLE_OPTION: &str = "option";
pub const AUTOCOMPLETE_LIST: &str = "list";
pub const TOGGLE_OPEN: &str = "Open";
pub const TOGGLE_CLOSE: &str = "Close";

/// Attributes of the text field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComboAria {
    pub role: &'static str,
    pub expanded: bool,
    pub autocomplete: &'static str,
    /// Listbox id, only while open.
    pub controls: Option<String>,
    /// Id of the highlighted row, only while open and highlighted.
    pub active_descendant: Option<String>,
    pub disabled: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListRow {
    Option {
        id: String,
        /// Position in the filtered list.
        row: usize,
        label: String,
        selected: bool,
        disabled: bool,
        highlighted: bool,
    },
    /// Stands in for the options when the filter matches nothing. Not interactive.
    Empty { message: String },
}

impl ListRow {
    pub fn role(&self) -> Option<&'static str> {
        match self {
            ListRow::Option { .. } => Some(ROLE_OPTION),
            ListRow::Empty { .. } => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Projection {
    pub display_value: String,
    /// Set only when `display_value` is empty.
    pub placeholder: Option<String>,
    pub aria: ComboAria,
    pub listbox_id: String,
    pub listbox_role: &'static str,
    /// Empty while closed.
    pub rows: Vec<ListRow>,
    pub clear_visible: bool,
    pub toggle_label: &'static str,
}

impl Projection {
    pub fn is_open(&self) -> bool {
        self.aria.expanded
    }
}

/// `input_text` if non-empty, else the selected option's label, else empty.
pub fn display_value(state: &ComboState, catalog: &Catalog) -> String {
    if !state.input_text.is_empty() {
        return state.input_text.clone();
    }
    state
        .selected_value
        .as_deref()
        .and_then(|v| catalog.label_of(v))
        .unwrap_or_default()
        .to_string()
}

pub fn project(state: &ComboState, catalog: &Catalog, options: &ComboboxOptions) -> Projection {
    let filtered = filter::filter(catalog, &state.input_text);
    project_filtered(state, catalog, options, &filtered)
}

/// Like [`project`], with the filtered indices for `state.input_text` supplied by the caller.
pub fn project_filtered(
    state: &ComboState,
    catalog: &Catalog,
    options: &ComboboxOptions,
    filtered: &[usize],
) -> Projection {
    let display_value = display_value(state, catalog);
    let placeholder = display_value
        .is_empty()
        .then(|| options.placeholder.clone());
    let listbox_id = options.listbox_id();
    let open = state.open && !options.disabled;

    let rows = if !open {
        Vec::new()
    } else if filtered.is_empty() {
        vec![ListRow::Empty {
            message: options.empty_message.clone(),
        }]
    } else {
        filtered
            .iter()
            .enumerate()
            .filter_map(|(row, &i)| catalog.get(i).map(|o| (row, o)))
            .map(|(row, o)| ListRow::Option {
                id: options.option_id(&o.value),
                row,
                label: o.label.clone(),
                selected: state.selected_value.as_deref() == Some(o.value.as_str()),
                disabled: o.disabled,
                highlighted: state.highlighted == Some(row),
            })
            .collect()
    };

    let active_descendant = state
        .highlighted
        .filter(|_| open)
        .and_then(|row| filtered.get(row))
        .and_then(|&i| catalog.get(i))
        .map(|o| options.option_id(&o.value));

    Projection {
        display_value,
        placeholder,
        aria: ComboAria {
            role: ROLE_COMBOBOX,
            expanded: open,
            autocomplete: AUTOCOMPLETE_LIST,
            controls: open.then(|| listbox_id.clone()),
            active_descendant,
            disabled: options.disabled,
        },
        listbox_id,
        listbox_role: ROLE_LISTBOX,
        rows,
        clear_visible: options.clearable && !options.disabled && state.selected_value.is_some(),
        toggle_label: if open { TOGGLE_CLOSE } else { TOGGLE_OPEN },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::ComboOption;

    fn cities() -> Catalog {
        Catalog::new(vec![
            ComboOption::new("cai", "Cairo"),
            ComboOption::new("alx", "Alexandria"),
            ComboOption::new("gza", "Giza").disabled(true),
        ])
        .unwrap()
    }

    #[test]
    fn closed_projection_has_no_listbox_attributes() {
        let p = project(&ComboState::default(), &cities(), &ComboboxOptions::default());
        assert_eq!(p.display_value, "");
        assert_eq!(p.placeholder.as_deref(), Some("Select an option..."));
        assert_eq!(p.aria.role, "combobox");
        assert_eq!(p.aria.autocomplete, "list");
        assert!(!p.aria.expanded);
        assert_eq!(p.aria.controls, None);
        assert_eq!(p.aria.active_descendant, None);
        assert!(p.rows.is_empty());
        assert!(!p.clear_visible);
        assert_eq!(p.toggle_label, "Open");
    }

    #[test]
    fn open_projection_describes_every_row() {
        let s = ComboState {
            open: true,
            input_text: String::new(),
            selected_value: Some("alx".to_string()),
            highlighted: Some(2),
        };
        let p = project(&s, &cities(), &ComboboxOptions::default());
        assert_eq!(p.display_value, "Alexandria");
        assert_eq!(p.placeholder, None);
        assert_eq!(p.aria.controls.as_deref(), Some("combobox-listbox"));
        assert_eq!(p.listbox_id, "combobox-listbox");
        assert_eq!(p.listbox_role, "listbox");
        assert_eq!(
            p.aria.active_descendant.as_deref(),
            Some("combobox-option-gza")
        );
        assert_eq!(p.rows.len(), 3);
        assert_eq!(
            p.rows[1],
            ListRow::Option {
                id: "combobox-option-alx".to_string(),
                row: 1,
                label: "Alexandria".to_string(),
                selected: true,
                disabled: false,
                highlighted: false,
            }
        );
        assert!(matches!(
            p.rows[2],
            ListRow::Option {
                disabled: true,
                highlighted: true,
                ..
            }
        ));
        assert_eq!(p.rows[0].role(), Some("option"));
        assert!(p.clear_visible);
        assert_eq!(p.toggle_label, "Close");
    }

    #[test]
    fn empty_filter_renders_a_single_message_row() {
        let s = ComboState {
            open: true,
            input_text: "paris".to_string(),
            ..Default::default()
        };
        let p = project(&s, &cities(), &ComboboxOptions::default());
        assert_eq!(
            p.rows,
            vec![ListRow::Empty {
                message: "No results found".to_string()
            }]
        );
        assert_eq!(p.rows[0].role(), None);
        assert_eq!(p.display_value, "paris");
    }

    #[test]
    fn unmatched_selection_displays_empty() {
        let s = ComboState {
            selected_value: Some("lux".to_string()),
            ..Default::default()
        };
        let p = project(&s, &cities(), &ComboboxOptions::default());
        assert_eq!(p.display_value, "");
        assert!(p.placeholder.is_some());
    }

    #[test]
    fn disabled_widget_never_projects_open_or_clearable() {
        let s = ComboState {
            open: true,
            selected_value: Some("cai".to_string()),
            ..Default::default()
        };
        let options = ComboboxOptions {
            disabled: true,
            ..Default::default()
        };
        let p = project(&s, &cities(), &options);
        assert!(!p.aria.expanded);
        assert!(p.aria.disabled);
        assert!(p.rows.is_empty());
        assert!(!p.clear_visible);
    }
}
