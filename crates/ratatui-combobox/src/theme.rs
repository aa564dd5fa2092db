use ratatui::style::Modifier;
use ratatui::style::Style;

#[derive(Clone, Debug)]
pub struct Theme {
    pub text_primary: Style,
    pub text_muted: Style,
    pub accent: Style,
    pub danger: Style,
    /// Keyboard/pointer highlight row.
    pub highlight: Style,
    /// Row of the committed selection.
    pub selected: Style,
    pub disabled: Style,
    pub popup: Style,
}

impl Default for Theme {
    fn default() -> Self {
        use ratatui::style::Stylize;

        Self {
            text_primary: Style::default(),
            text_muted: Style::default().dark_gray(),
            accent: Style::default().cyan(),
            danger: Style::default().red(),
            highlight: Style::default().add_modifier(Modifier::REVERSED),
            selected: Style::default().cyan().add_modifier(Modifier::BOLD),
            disabled: Style::default().dark_gray().add_modifier(Modifier::DIM),
            popup: Style::default(),
        }
    }
}
