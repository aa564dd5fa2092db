use crate::render;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui_combobox_core::config::ComboboxOptions;
use ratatui_combobox_core::keymap::Binding;

#[derive(Clone, Debug)]
pub struct HelpBarOptions {
    pub style: Style,
    pub key_style: Style,
    pub separator: String,
    pub space: String,
}

impl Default for HelpBarOptions {
    fn default() -> Self {
        Self {
            style: Style::default(),
            key_style: Style::default(),
            separator: " • ".to_string(),
            space: " ".to_string(),
        }
    }
}

/// One-line key hint bar.
#[derive(Clone, Debug, Default)]
pub struct HelpBar {
    bindings: Vec<Binding>,
    options: HelpBarOptions,
}

impl HelpBar {
    pub fn new(bindings: Vec<Binding>) -> Self {
        Self {
            bindings,
            options: HelpBarOptions::default(),
        }
    }

    pub fn with_options(bindings: Vec<Binding>, options: HelpBarOptions) -> Self {
        Self { bindings, options }
    }

    /// Hints for a combobox configured with `options`.
    pub fn for_combobox(options: &ComboboxOptions) -> Self {
        let mut bindings = vec![Binding::new("type", "filter", Vec::new())];
        bindings.extend(options.bindings.help());
        Self::new(bindings)
    }

    pub fn set_bindings(&mut self, bindings: Vec<Binding>) {
        self.bindings = bindings;
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        buf.set_style(area, self.options.style);
        let mut x = area.x;
        let right = area.x + area.width;
        for (text, style) in self.segments() {
            if x >= right {
                break;
            }
            x += render::render_str_clipped(x, area.y, 0, right - x, buf, text, style);
        }
    }

    fn segments(&self) -> Vec<(&str, Style)> {
        let o = &self.options;
        let mut out = Vec::new();
        for (i, b) in self.bindings.iter().enumerate() {
            if i > 0 {
                out.push((o.separator.as_str(), o.style));
            }
            out.push((b.help_key.as_str(), o.key_style));
            out.push((o.space.as_str(), o.style));
            out.push((b.help_desc.as_str(), o.style));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_bar_lists_combobox_keys() {
        let hb = HelpBar::for_combobox(&ComboboxOptions::default());
        let keys: Vec<&str> = hb.bindings().iter().map(|b| b.help_key.as_str()).collect();
        assert_eq!(keys, vec!["type", "↑/↓", "enter", "esc"]);

        let mut buf = Buffer::empty(Rect::new(0, 0, 40, 1));
        hb.render_ref(Rect::new(0, 0, 40, 1), &mut buf);
        let line: String = (0..11).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert_eq!(line, "type filter");
    }

    #[test]
    fn help_bar_renders_narrow_width() {
        let hb = HelpBar::for_combobox(&ComboboxOptions::default());
        let mut buf = Buffer::empty(Rect::new(0, 0, 3, 1));
        hb.render_ref(Rect::new(0, 0, 3, 1), &mut buf);
        assert_eq!(buf[(2, 0)].symbol(), "p");
    }
}
