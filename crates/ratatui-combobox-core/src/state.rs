//! Widget state and the transition function.
//!
//! Every interaction is a [`ComboEvent`]. [`reduce`] maps `(state, event)` to a new state plus a
//! list of [`Effect`]s for the owner to carry out (fire the value callback, move focus, scroll a
//! row into view). The reducer itself has no side effects, so every row of the navigation table
//! can be tested without a terminal.

use crate::config::ComboboxOptions;
use crate::filter;
use crate::navigator;
use crate::navigator::NavKey;
use crate::navigator::NavStep;
use crate::option::Catalog;

/// The single owned record behind a combobox.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComboState {
    pub open: bool,
    /// What the text field shows. May diverge from every label while the user types.
    pub input_text: String,
    /// The committed selection. May name a value missing from the catalog (see
    /// [`ComboEvent::ExternalValue`]).
    pub selected_value: Option<String>,
    /// Row in the filtered list. Always `None` while closed.
    pub highlighted: Option<usize>,
}

impl ComboState {
    /// Initial state for a freshly mounted widget, seeded from the owner's value.
    pub fn seeded(catalog: &Catalog, value: Option<&str>) -> Self {
        let mut state = Self::default();
        apply_external_value(&mut state, catalog, value);
        state
    }

    /// `true` when a selection is held but its value is not in `catalog`.
    pub fn is_selection_unresolved(&self, catalog: &Catalog) -> bool {
        self.selected_value
            .as_deref()
            .is_some_and(|v| catalog.find(v).is_none())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ComboEvent {
    /// The owner's controlled value changed. `None` and `Some("")` both mean "no selection".
    /// Never produces [`Effect::ValueChanged`].
    ExternalValue(Option<String>),
    /// The text field now contains this text.
    InputChanged(String),
    /// Commit the option at this catalog index.
    Select(usize),
    /// Drop the selection (clear button).
    Clear,
    Nav(NavKey),
    /// Pointer entered this row of the filtered list.
    Hover(usize),
    /// Pointer pressed on the text field.
    InputClicked,
    /// Pointer pressed on the open/close button.
    ToggleClicked,
    /// A pointer-down landed outside the widget.
    OutsidePointerDown,
    /// The caller supplied a new catalog. Drops the highlight; a held value that was unresolved
    /// and now resolves takes its label as the input text.
    CatalogReplaced,
}

impl ComboEvent {
    /// Events that stay live while the widget is disabled.
    fn is_passive(&self) -> bool {
        matches!(self, ComboEvent::ExternalValue(_) | ComboEvent::CatalogReplaced)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Tell the owner about a committed change. Empty string means "no selection".
    ValueChanged(String),
    /// Move focus back to the text field.
    FocusInput,
    /// Scroll this filtered row into view (nearest edge).
    ScrollIntoView(usize),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub state: ComboState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn unchanged(state: &ComboState) -> Self {
        Self {
            state: state.clone(),
            effects: Vec::new(),
        }
    }

    /// The committed value, if this transition produced one.
    pub fn value_change(&self) -> Option<&str> {
        self.effects.iter().find_map(|e| match e {
            Effect::ValueChanged(v) => Some(v.as_str()),
            _ => None,
        })
    }

    pub fn requests_focus(&self) -> bool {
        self.effects.contains(&Effect::FocusInput)
    }
}

/// Applies `event` to `state`, filtering the catalog for the current input text.
pub fn reduce(
    state: &ComboState,
    catalog: &Catalog,
    options: &ComboboxOptions,
    event: ComboEvent,
) -> Transition {
    let filtered = filter::filter(catalog, &state.input_text);
    reduce_filtered(state, catalog, options, &filtered, event)
}

/// Like [`reduce`], with the filtered indices for `state.input_text` supplied by the caller.
pub fn reduce_filtered(
    state: &ComboState,
    catalog: &Catalog,
    options: &ComboboxOptions,
    filtered: &[usize],
    event: ComboEvent,
) -> Transition {
    if options.disabled && !event.is_passive() {
        let mut t = Transition::unchanged(state);
        close(&mut t.state);
        return t;
    }

    let mut t = Transition::unchanged(state);
    match event {
        ComboEvent::ExternalValue(value) => {
            apply_external_value(&mut t.state, catalog, value.as_deref());
        }
        ComboEvent::InputChanged(text) => {
            let invalidates = t.state.selected_value.as_deref().is_some_and(|v| {
                catalog
                    .label_of(v)
                    .is_some_and(|label| label != text.as_str())
            });
            t.state.input_text = text;
            t.state.open = true;
            t.state.highlighted = None;
            if invalidates {
                t.state.selected_value = None;
                t.effects.push(Effect::ValueChanged(String::new()));
            }
        }
        ComboEvent::Select(index) => select_index(&mut t, catalog, index),
        ComboEvent::Clear => {
            if options.clearable && t.state.selected_value.is_some() {
                t.state.selected_value = None;
                t.state.input_text.clear();
                t.state.highlighted = None;
                t.effects.push(Effect::ValueChanged(String::new()));
                t.effects.push(Effect::FocusInput);
            }
        }
        ComboEvent::Nav(key) => {
            match navigator::step(t.state.open, t.state.highlighted, filtered.len(), key) {
                NavStep::Open => t.state.open = true,
                NavStep::Highlight(row) => highlight(&mut t, row),
                NavStep::Commit(row) => {
                    if let Some(&index) = filtered.get(row) {
                        select_index(&mut t, catalog, index);
                    }
                }
                NavStep::Toggle => t.state.open = !t.state.open,
                NavStep::Close => close(&mut t.state),
                NavStep::Nothing => {}
            }
        }
        ComboEvent::Hover(row) => {
            let enabled = filtered
                .get(row)
                .and_then(|&i| catalog.get(i))
                .is_some_and(|o| !o.disabled);
            if t.state.open && enabled && t.state.highlighted != Some(row) {
                highlight(&mut t, row);
            }
        }
        ComboEvent::InputClicked => t.state.open = true,
        ComboEvent::ToggleClicked => t.state.open = !t.state.open,
        ComboEvent::OutsidePointerDown => close(&mut t.state),
        ComboEvent::CatalogReplaced => {
            t.state.highlighted = None;
            // A held value that the new catalog resolves gets its label as editable text.
            let label = t.state.selected_value.as_deref().and_then(|v| catalog.label_of(v));
            if t.state.input_text.is_empty()
                && let Some(label) = label
            {
                t.state.input_text = label.to_string();
            }
        }
    }

    if !t.state.open {
        t.state.highlighted = None;
    }
    t
}

fn apply_external_value(state: &mut ComboState, catalog: &Catalog, value: Option<&str>) {
    let before = std::mem::take(&mut state.input_text);
    match value.filter(|v| !v.is_empty()) {
        None => {
            state.selected_value = None;
        }
        Some(v) => {
            state.selected_value = Some(v.to_string());
            if let Some(label) = catalog.label_of(v) {
                state.input_text = label.to_string();
            }
        }
    }
    if state.input_text != before {
        state.highlighted = None;
    }
}

fn select_index(t: &mut Transition, catalog: &Catalog, index: usize) {
    let Some(opt) = catalog.get(index) else {
        return;
    };
    if opt.disabled {
        return;
    }
    t.state.selected_value = Some(opt.value.clone());
    t.state.input_text = opt.label.clone();
    close(&mut t.state);
    t.effects.push(Effect::ValueChanged(opt.value.clone()));
    t.effects.push(Effect::FocusInput);
}

fn highlight(t: &mut Transition, row: usize) {
    t.state.highlighted = Some(row);
    t.effects.push(Effect::ScrollIntoView(row));
}

fn close(state: &mut ComboState) {
    state.open = false;
    state.highlighted = None;
}
