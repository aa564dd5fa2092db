//! The rendered combobox: a text field with a filterable dropdown below it.
//!
//! [`Combobox`] owns the widget state for one mounted instance. The owner supplies the catalog
//! and its controlled value, forwards input events, and renders it every frame:
//!
//! ```ignore
//! let hub = PointerHub::new();
//! let mut city = Combobox::new(&hub, catalog, Some("cai"), ComboboxOptions::default())?
//!     .on_value_change(|v| println!("city = {v:?}"));
//!
//! // event loop
//! if let InputEvent::Mouse(m) = &ev {
//!     hub.dispatch(m);
//! }
//! city.handle_event(ev);
//! city.render_ref(area, buf, &theme);
//! ```
//!
//! Hosts must pass every mouse event to [`PointerHub::dispatch`] before routing or rendering.
//! A widget marked by an outside pointer-down reports itself closed from [`Combobox::is_open`]
//! and [`Combobox::projection`] right away, and settles the close in `handle_event` or
//! `render_ref`, whichever runs first.
//!
//! Dropping the `Combobox` releases its pointer listener.

use ratatui::buffer::Buffer;
use ratatui::layout::Position;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui_combobox_core::aria;
use ratatui_combobox_core::aria::ListRow;
use ratatui_combobox_core::aria::Projection;
use ratatui_combobox_core::config::ComboboxOptions;
use ratatui_combobox_core::error::Result;
use ratatui_combobox_core::filter::FilteredView;
use ratatui_combobox_core::input::InputEvent;
use ratatui_combobox_core::input::KeyEvent;
use ratatui_combobox_core::input::MouseButton;
use ratatui_combobox_core::input::MouseEvent;
use ratatui_combobox_core::input::MouseEventKind;
use ratatui_combobox_core::navigator::NavKey;
use ratatui_combobox_core::option::Catalog;
use ratatui_combobox_core::outside::OutsideClickListener;
use ratatui_combobox_core::outside::PointerHub;
use ratatui_combobox_core::state;
use ratatui_combobox_core::state::ComboEvent;
use ratatui_combobox_core::state::ComboState;
use ratatui_combobox_core::state::Effect;
use ratatui_combobox_core::text_input::LineInput;
use ratatui_combobox_core::text_input::LineInputAction;
use std::borrow::Cow;
use unicode_width::UnicodeWidthStr;

use crate::render;
use crate::theme::Theme;
use crate::viewport::ViewportState;

const CLEAR_GLYPH: &str = "×";
const OPEN_GLYPH: &str = "▾";
const CLOSE_GLYPH: &str = "▴";
const CHECK_GLYPH: &str = "✓";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ComboboxAction {
    /// Consumed, nothing visible changed.
    None,
    Redraw,
    /// A selection was committed or cleared. Empty string means "no selection".
    ValueChanged(String),
    /// Not consumed; the caller may handle it (e.g. Tab moves focus). The dropdown may still
    /// have closed.
    Ignored,
}

/// Where things were drawn on the last frame. Used for pointer hit-testing.
#[derive(Clone, Debug, Default)]
struct HitMap {
    field: Rect,
    clear: Option<Rect>,
    toggle: Rect,
    list: Rect,
    /// `(screen row, filtered row)` of each visible option row.
    rows: Vec<(u16, usize)>,
}

impl HitMap {
    fn row_at(&self, pos: Position) -> Option<usize> {
        if !self.list.contains(pos) {
            return None;
        }
        self.rows
            .iter()
            .find(|(y, _)| *y == pos.y)
            .map(|(_, row)| *row)
    }
}

pub struct Combobox {
    options: ComboboxOptions,
    catalog: Catalog,
    state: ComboState,
    filtered: FilteredView,
    input: LineInput,
    list: ViewportState,
    listener: OutsideClickListener,
    on_value_change: Option<Box<dyn FnMut(&str)>>,
    last_external: Option<String>,
    focused: bool,
    focus_requested: bool,
    input_scroll: usize,
    cursor: Option<Position>,
    hits: HitMap,
}

impl std::fmt::Debug for Combobox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Combobox")
            .field("id", &self.options.id)
            .field("state", &self.state)
            .field("catalog_len", &self.catalog.len())
            .field("focused", &self.focused)
            .field("listener", &self.listener.id())
            .finish()
    }
}

impl Combobox {
    /// Mounts a combobox: validates `options`, seeds state from `value`, and subscribes to `hub`.
    pub fn new(
        hub: &PointerHub,
        catalog: Catalog,
        value: Option<&str>,
        options: ComboboxOptions,
    ) -> Result<Self> {
        options.validate()?;
        let value = normalize(value);
        let state = ComboState::seeded(&catalog, value.as_deref());
        if state.is_selection_unresolved(&catalog) {
            tracing::debug!(id = %options.id, value = ?value, "initial value not in catalog");
        }
        let mut input = LineInput::new();
        input.set_text(state.input_text.clone());
        let mut filtered = FilteredView::new();
        filtered.refresh(&catalog, &state.input_text);

        Ok(Self {
            options,
            catalog,
            state,
            filtered,
            input,
            list: ViewportState::default(),
            listener: hub.subscribe(),
            on_value_change: None,
            last_external: value,
            focused: false,
            focus_requested: false,
            input_scroll: 0,
            cursor: None,
            hits: HitMap::default(),
        })
    }

    /// Sets the owner callback, fired once per committed selection or clear.
    pub fn on_value_change(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_value_change = Some(Box::new(f));
        self
    }

    pub fn set_on_value_change(&mut self, f: Option<Box<dyn FnMut(&str)>>) {
        self.on_value_change = f;
    }

    pub fn options(&self) -> &ComboboxOptions {
        &self.options
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &ComboState {
        &self.state
    }

    /// The committed value, if any.
    pub fn value(&self) -> Option<&str> {
        self.state.selected_value.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.state.open && !self.listener.has_outside_hit()
    }

    /// `true` when the held value is not in the current catalog. The field then shows nothing
    /// until a catalog containing the value arrives.
    pub fn has_unresolved_selection(&self) -> bool {
        self.state.is_selection_unresolved(&self.catalog)
    }

    /// Filtered catalog indices for the current input text.
    pub fn filtered(&self) -> &[usize] {
        self.filtered.indices()
    }

    pub fn projection(&self) -> Projection {
        aria::project_filtered(
            &self.settled_state(),
            &self.catalog,
            &self.options,
            self.filtered.indices(),
        )
    }

    /// State with any pending outside pointer-down applied.
    fn settled_state(&self) -> Cow<'_, ComboState> {
        if !self.listener.has_outside_hit() {
            return Cow::Borrowed(&self.state);
        }
        let t = state::reduce_filtered(
            &self.state,
            &self.catalog,
            &self.options,
            self.filtered.indices(),
            ComboEvent::OutsidePointerDown,
        );
        Cow::Owned(t.state)
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Returns and clears a pending "focus the text field" request raised by a commit or clear.
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }

    /// Terminal cursor position for the text field, valid after `render_ref` while focused.
    pub fn cursor_pos(&self) -> Option<(u16, u16)> {
        self.cursor.map(|p| (p.x, p.y))
    }

    /// Rows needed to show the field and, while open, the dropdown.
    pub fn desired_height(&self) -> u16 {
        if !self.is_open() || self.options.disabled {
            return 1;
        }
        let rows = self.filtered.len().max(1).min(self.options.max_visible_rows as usize);
        1 + rows as u16
    }

    /// Replaces the catalog. The highlight is dropped because the filtered list may change.
    pub fn set_catalog(&mut self, catalog: Catalog) -> ComboboxAction {
        self.catalog = catalog;
        self.filtered.invalidate();
        self.filtered.refresh(&self.catalog, &self.state.input_text);
        self.list.to_top();
        if self.has_unresolved_selection() {
            tracing::debug!(id = %self.options.id, value = ?self.state.selected_value, "selected value not in new catalog");
        }
        match self.dispatch(ComboEvent::CatalogReplaced) {
            ComboboxAction::None => ComboboxAction::Redraw,
            action => action,
        }
    }

    /// Reconciles the owner's controlled value. Does nothing when `value` equals the last value
    /// seen from the owner or reported to it, so echoing a reported value back is safe.
    pub fn sync_external_value(&mut self, value: Option<&str>) -> ComboboxAction {
        let value = normalize(value);
        if value == self.last_external {
            return ComboboxAction::None;
        }
        self.set_external_value(value.as_deref())
    }

    /// Applies the owner's value unconditionally. Never fires the value callback.
    pub fn set_external_value(&mut self, value: Option<&str>) -> ComboboxAction {
        let value = normalize(value);
        self.last_external = value.clone();
        let action = self.dispatch(ComboEvent::ExternalValue(value));
        if self.has_unresolved_selection() {
            tracing::debug!(id = %self.options.id, value = ?self.state.selected_value, "external value not in catalog");
        }
        action
    }

    pub fn on_input_text_changed(&mut self, text: impl Into<String>) -> ComboboxAction {
        self.dispatch(ComboEvent::InputChanged(text.into()))
    }

    /// Commits the option with `value`. Disabled or unknown options are ignored.
    pub fn select_option(&mut self, value: &str) -> ComboboxAction {
        match self.catalog.iter().position(|o| o.value == value) {
            Some(index) => self.dispatch(ComboEvent::Select(index)),
            None => ComboboxAction::None,
        }
    }

    pub fn clear_selection(&mut self) -> ComboboxAction {
        self.dispatch(ComboEvent::Clear)
    }

    pub fn open(&mut self) -> ComboboxAction {
        self.dispatch(ComboEvent::InputClicked)
    }

    pub fn close(&mut self) -> ComboboxAction {
        self.dispatch(ComboEvent::Nav(NavKey::Escape))
    }

    /// Consumes an outside pointer-down recorded by the hub, closing the dropdown.
    pub fn sync_outside(&mut self) -> ComboboxAction {
        if self.listener.take_outside_hit() {
            return self.dispatch(ComboEvent::OutsidePointerDown);
        }
        ComboboxAction::None
    }

    pub fn handle_event(&mut self, event: InputEvent) -> ComboboxAction {
        let outside = self.sync_outside();
        let action = match event {
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Paste(_) => self.edit(&event),
            InputEvent::Mouse(m) => self.handle_mouse(m),
        };
        match (outside, action) {
            (ComboboxAction::Redraw, ComboboxAction::None | ComboboxAction::Ignored) => {
                ComboboxAction::Redraw
            }
            (_, action) => action,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> ComboboxAction {
        if self.options.disabled {
            return ComboboxAction::Ignored;
        }
        match self.options.bindings.action_for(&key) {
            Some(NavKey::Tab) => {
                self.dispatch(ComboEvent::Nav(NavKey::Tab));
                ComboboxAction::Ignored
            }
            Some(nav) => {
                let action = self.dispatch(ComboEvent::Nav(nav));
                if action == ComboboxAction::Ignored {
                    ComboboxAction::None
                } else {
                    action
                }
            }
            None => self.edit(&InputEvent::Key(key)),
        }
    }

    fn edit(&mut self, event: &InputEvent) -> ComboboxAction {
        if self.options.disabled {
            return ComboboxAction::Ignored;
        }
        match self.input.input(event) {
            LineInputAction::Changed => {
                let text = self.input.text().to_string();
                self.dispatch(ComboEvent::InputChanged(text))
            }
            LineInputAction::Moved => ComboboxAction::Redraw,
            LineInputAction::None => ComboboxAction::Ignored,
        }
    }

    fn handle_mouse(&mut self, m: MouseEvent) -> ComboboxAction {
        if self.options.disabled {
            return ComboboxAction::Ignored;
        }
        let pos = m.position();
        match m.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.hits.clear.is_some_and(|r| r.contains(pos)) {
                    return self.clear_selection();
                }
                if self.hits.toggle.contains(pos) {
                    self.focused = true;
                    return self.dispatch(ComboEvent::ToggleClicked);
                }
                if self.hits.field.contains(pos) {
                    self.focused = true;
                    return match self.dispatch(ComboEvent::InputClicked) {
                        ComboboxAction::None => ComboboxAction::Redraw,
                        action => action,
                    };
                }
                if let Some(row) = self.hits.row_at(pos) {
                    return match self.filtered.catalog_index(row) {
                        Some(index) => self.dispatch(ComboEvent::Select(index)),
                        None => ComboboxAction::None,
                    };
                }
                if self.hits.list.contains(pos) {
                    return ComboboxAction::None;
                }
                self.focused = false;
                ComboboxAction::Ignored
            }
            MouseEventKind::Moved => match self.hits.row_at(pos) {
                Some(row) => self.dispatch(ComboEvent::Hover(row)),
                None => ComboboxAction::Ignored,
            },
            MouseEventKind::ScrollUp if self.hits.list.contains(pos) => {
                self.list.scroll_y_by(-1);
                ComboboxAction::Redraw
            }
            MouseEventKind::ScrollDown if self.hits.list.contains(pos) => {
                self.list.scroll_y_by(1);
                ComboboxAction::Redraw
            }
            _ => ComboboxAction::Ignored,
        }
    }

    /// Runs one transition and carries out its effects.
    fn dispatch(&mut self, event: ComboEvent) -> ComboboxAction {
        self.filtered.refresh(&self.catalog, &self.state.input_text);
        tracing::trace!(id = %self.options.id, ?event, "combobox event");
        let t = state::reduce_filtered(
            &self.state,
            &self.catalog,
            &self.options,
            self.filtered.indices(),
            event,
        );

        let changed = t.state != self.state;
        if t.state.input_text != self.input.text() {
            self.input.set_text(t.state.input_text.clone());
        }
        self.state = t.state;
        if self.filtered.refresh(&self.catalog, &self.state.input_text) {
            self.list.to_top();
        }
        self.listener.set_armed(self.state.open);
        if self.state.open {
            let rows = self.filtered.len().max(1);
            let visible = rows.min(self.options.max_visible_rows as usize);
            self.list.set_content(rows.min(u16::MAX as usize) as u16);
            self.list.set_viewport(visible as u16);
        }

        let mut committed = None;
        for effect in t.effects {
            match effect {
                Effect::ValueChanged(value) => {
                    tracing::debug!(id = %self.options.id, value = %value, "combobox value committed");
                    self.last_external = normalize(Some(&value));
                    if let Some(cb) = self.on_value_change.as_mut() {
                        cb(&value);
                    }
                    committed = Some(value);
                }
                Effect::FocusInput => {
                    self.focused = true;
                    self.focus_requested = true;
                }
                Effect::ScrollIntoView(row) => {
                    self.list.ensure_visible(row.min(u16::MAX as usize) as u16);
                }
            }
        }

        match committed {
            Some(value) => ComboboxAction::ValueChanged(value),
            None if changed => ComboboxAction::Redraw,
            None => ComboboxAction::None,
        }
    }

    pub fn render_ref(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        self.sync_outside();
        self.cursor = None;
        self.hits = HitMap::default();
        if area.width == 0 || area.height == 0 {
            self.listener.set_regions(std::iter::empty());
            return;
        }

        let projection = self.projection();
        let field = Rect::new(area.x, area.y, area.width, 1);
        self.render_field(field, buf, theme, &projection);

        let list_h = (projection.rows.len())
            .min(self.options.max_visible_rows as usize)
            .min(area.height.saturating_sub(1) as usize) as u16;
        if list_h > 0 {
            let list = Rect::new(area.x, area.y + 1, area.width, list_h);
            self.render_list(list, buf, theme, &projection);
            self.hits.list = list;
        }

        self.listener.set_regions([self.hits.field, self.hits.list]);
    }

    fn render_field(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme, p: &Projection) {
        let disabled = self.options.disabled;
        let base = if disabled {
            theme.disabled
        } else {
            theme.text_primary
        };
        buf.set_style(area, base);
        self.hits.field = area;

        let mut right = area.x + area.width;
        if area.width >= 2 {
            right -= 1;
            let glyph = match p.toggle_label {
                aria::TOGGLE_CLOSE => CLOSE_GLYPH,
                _ => OPEN_GLYPH,
            };
            buf.set_stringn(right, area.y, glyph, 1, if disabled { base } else { theme.accent });
            self.hits.toggle = Rect::new(right, area.y, 1, 1);
        }
        if p.clear_visible && right >= area.x + 3 {
            right -= 2;
            buf.set_stringn(right, area.y, CLEAR_GLYPH, 1, theme.danger);
            self.hits.clear = Some(Rect::new(right, area.y, 1, 1));
        }

        let text_w = right.saturating_sub(area.x).saturating_sub(1);
        if text_w == 0 {
            return;
        }

        if let Some(placeholder) = &p.placeholder {
            self.input_scroll = 0;
            render::render_str_clipped(area.x, area.y, 0, text_w, buf, placeholder, theme.text_muted);
        } else {
            // The field shows the selected label while the buffer is empty; the caret then sits
            // at column 0.
            let editing = p.display_value == self.input.text();
            let cursor_x = if editing { self.input.cursor_x() } else { 0 };
            if cursor_x < self.input_scroll {
                self.input_scroll = cursor_x;
            } else if cursor_x >= self.input_scroll + text_w as usize {
                self.input_scroll = cursor_x + 1 - text_w as usize;
            }
            self.input_scroll = self
                .input_scroll
                .min(UnicodeWidthStr::width(p.display_value.as_str()));
            render::render_str_clipped(
                area.x,
                area.y,
                self.input_scroll,
                text_w,
                buf,
                &p.display_value,
                base,
            );
        }

        if self.focused && !disabled {
            let cursor_x = if p.placeholder.is_none() && p.display_value == self.input.text() {
                self.input.cursor_x().saturating_sub(self.input_scroll)
            } else {
                0
            };
            let dx = cursor_x.min(text_w as usize) as u16;
            self.cursor = Some(Position::new(area.x + dx, area.y));
        }
    }

    fn render_list(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme, p: &Projection) {
        buf.set_style(area, theme.popup);
        self.list.set_viewport(area.height);
        self.list.set_content(p.rows.len().min(u16::MAX as usize) as u16);

        let (rows_area, scrollbar_x) = if self.list.overflows() && area.width >= 2 {
            (
                Rect::new(area.x, area.y, area.width - 1, area.height),
                Some(area.x + area.width - 1),
            )
        } else {
            (area, None)
        };

        for dy in 0..rows_area.height {
            let idx = self.list.y as usize + dy as usize;
            let Some(row) = p.rows.get(idx) else {
                break;
            };
            let y = rows_area.y + dy;
            let line = Rect::new(rows_area.x, y, rows_area.width, 1);
            match row {
                ListRow::Empty { message } => {
                    buf.set_style(line, theme.text_muted);
                    render::render_str_clipped(
                        line.x + 1,
                        y,
                        0,
                        line.width.saturating_sub(1),
                        buf,
                        message,
                        theme.text_muted,
                    );
                }
                ListRow::Option {
                    row,
                    label,
                    selected,
                    disabled,
                    highlighted,
                    ..
                } => {
                    let style = row_style(theme, *selected, *disabled, *highlighted);
                    buf.set_style(line, style);
                    let label_w = line.width.saturating_sub(if *selected { 3 } else { 1 });
                    render::render_str_clipped(line.x + 1, y, 0, label_w, buf, label, style);
                    if *selected && line.width >= 3 {
                        buf.set_stringn(line.x + line.width - 2, y, CHECK_GLYPH, 1, style);
                    }
                    self.hits.rows.push((y, *row));
                }
            }
        }

        if let Some(sb_x) = scrollbar_x {
            render::render_scrollbar(
                Rect::new(sb_x, area.y, 1, area.height),
                buf,
                &self.list,
                theme.text_muted,
            );
        }
    }
}

fn row_style(theme: &Theme, selected: bool, disabled: bool, highlighted: bool) -> Style {
    if disabled {
        let s = theme.disabled;
        return if highlighted { s.patch(theme.highlight) } else { s };
    }
    match (highlighted, selected) {
        (true, true) => theme.selected.patch(theme.highlight),
        (true, false) => theme.text_primary.patch(theme.highlight),
        (false, true) => theme.selected,
        (false, false) => theme.text_primary,
    }
}

fn normalize(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}
