//! Binds a [`Combobox`] to a form field's value slot.
//!
//! The slot is the source of truth: [`FormField::bind`] pushes it into the widget as the
//! controlled value, [`FormField::apply`] writes committed values back. An empty string means
//! "no selection".

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use crate::combobox::Combobox;
use crate::combobox::ComboboxAction;
use crate::render;
use crate::theme::Theme;

#[derive(Debug)]
pub struct FormField<'a> {
    value: &'a mut String,
    label: Option<&'a str>,
    error: Option<&'a str>,
}

impl<'a> FormField<'a> {
    pub fn new(value: &'a mut String) -> Self {
        Self {
            value,
            label: None,
            error: None,
        }
    }

    pub fn label(mut self, label: &'a str) -> Self {
        self.label = Some(label);
        self
    }

    /// Validation message shown under the widget.
    pub fn error(mut self, error: Option<&'a str>) -> Self {
        self.error = error;
        self
    }

    pub fn value(&self) -> &str {
        self.value
    }

    /// Forwards the slot into `combo` as its controlled value.
    pub fn bind(&self, combo: &mut Combobox) -> ComboboxAction {
        combo.sync_external_value(Some(self.value.as_str()))
    }

    /// Writes a committed value back into the slot. Returns `true` if the slot changed.
    pub fn apply(&mut self, action: &ComboboxAction) -> bool {
        let ComboboxAction::ValueChanged(v) = action else {
            return false;
        };
        if *self.value == *v {
            return false;
        }
        tracing::debug!(label = ?self.label, value = %v, "form field updated");
        self.value.clone_from(v);
        true
    }

    /// Rows needed for the label, the widget and the error line.
    pub fn desired_height(&self, combo: &Combobox) -> u16 {
        combo.desired_height() + u16::from(self.label.is_some()) + u16::from(self.error.is_some())
    }

    /// Renders the label above `combo` and the error message below it.
    pub fn render_ref(&self, combo: &mut Combobox, area: Rect, buf: &mut Buffer, theme: &Theme) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let mut body = area;
        if let Some(label) = self.label {
            render::render_str_clipped(area.x, area.y, 0, area.width, buf, label, theme.text_muted);
            body.y += 1;
            body.height -= 1;
        }
        if let Some(error) = self.error
            && body.height > 1
        {
            let y = body.y + body.height - 1;
            render::render_str_clipped(body.x, y, 0, body.width, buf, error, theme.danger);
            body.height -= 1;
        }
        combo.render_ref(body, buf, theme);
    }
}
