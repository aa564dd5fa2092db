use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui_combobox::Catalog;
use ratatui_combobox::ComboOption;
use ratatui_combobox::ComboboxOptions;
use ratatui_combobox::PointerHub;
use ratatui_combobox::combobox::Combobox;
use ratatui_combobox::combobox::ComboboxAction;
use ratatui_combobox::core::input::InputEvent;
use ratatui_combobox::core::input::KeyCode;
use ratatui_combobox::core::input::KeyEvent;
use ratatui_combobox::core::input::MouseButton;
use ratatui_combobox::core::input::MouseEvent;
use ratatui_combobox::core::input::MouseEventKind;
use ratatui_combobox::theme::Theme;
use std::cell::RefCell;
use std::rc::Rc;

const AREA: Rect = Rect::new(0, 0, 20, 5);

fn cities() -> Catalog {
    Catalog::new(vec![
        ComboOption::new("cai", "Cairo"),
        ComboOption::new("alx", "Alexandria"),
        ComboOption::new("gza", "Giza").disabled(true),
        ComboOption::new("asw", "Aswan"),
    ])
    .expect("valid catalog")
}

struct Harness {
    hub: PointerHub,
    combo: Combobox,
    calls: Rc<RefCell<Vec<String>>>,
    buf: Buffer,
}

impl Harness {
    fn new(value: Option<&str>) -> Self {
        Self::with_options(value, ComboboxOptions::default())
    }

    fn with_options(value: Option<&str>, options: ComboboxOptions) -> Self {
        let hub = PointerHub::new();
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = calls.clone();
        let combo = Combobox::new(&hub, cities(), value, options)
            .expect("valid options")
            .on_value_change(move |v| sink.borrow_mut().push(v.to_string()));
        Self {
            hub,
            combo,
            calls,
            buf: Buffer::empty(AREA),
        }
    }

    fn render(&mut self) {
        self.buf = Buffer::empty(AREA);
        self.combo.render_ref(AREA, &mut self.buf, &Theme::default());
    }

    fn row(&self, y: u16) -> String {
        let s: String = (0..self.buf.area.width)
            .map(|x| self.buf[(x, y)].symbol().to_string())
            .collect();
        s.trim_end().to_string()
    }

    fn key(&mut self, code: KeyCode) -> ComboboxAction {
        self.combo.handle_event(InputEvent::Key(KeyEvent::new(code)))
    }

    fn type_str(&mut self, s: &str) {
        for c in s.chars() {
            self.key(KeyCode::Char(c));
        }
    }

    fn mouse(&mut self, x: u16, y: u16, kind: MouseEventKind) -> ComboboxAction {
        let m = MouseEvent::new(x, y, kind);
        self.hub.dispatch(&m);
        self.combo.handle_event(InputEvent::Mouse(m))
    }

    fn click(&mut self, x: u16, y: u16) -> ComboboxAction {
        self.mouse(x, y, MouseEventKind::Down(MouseButton::Left))
    }
}

#[test]
fn closed_field_shows_label_clear_and_toggle() {
    let mut h = Harness::new(Some("alx"));
    h.render();
    assert_eq!(h.row(0), "Alexandria       × ▾");
    assert_eq!(h.row(1), "");
}

#[test]
fn empty_field_shows_placeholder() {
    let mut h = Harness::new(None);
    h.render();
    assert_eq!(h.row(0), "Select an option.. ▾");
}

#[test]
fn typing_filters_the_rendered_rows() {
    let mut h = Harness::new(None);
    h.type_str("an");
    h.render();
    assert_eq!(h.row(0), "an                 ▴");
    assert_eq!(h.row(1), " Alexandria");
    assert_eq!(h.row(2), " Aswan");
    assert_eq!(h.row(3), "");
}

#[test]
fn no_match_renders_the_empty_message() {
    let mut h = Harness::new(None);
    h.type_str("zz");
    h.render();
    assert_eq!(h.row(1), " No results found");
    assert_eq!(h.key(KeyCode::Down), ComboboxAction::None);
    assert_eq!(h.combo.state().highlighted, None);
}

#[test]
fn selected_row_carries_a_check_mark() {
    let mut h = Harness::new(Some("alx"));
    h.key(KeyCode::Down);
    h.render();
    assert!(h.combo.is_open());
    assert_eq!(h.row(1), " Alexandria       ✓");
}

#[test]
fn clicking_a_row_commits_once() {
    let mut h = Harness::new(None);
    h.type_str("an");
    h.render();
    assert_eq!(h.click(2, 2), ComboboxAction::ValueChanged("asw".to_string()));
    assert_eq!(*h.calls.borrow(), vec!["asw".to_string()]);
    assert!(!h.combo.is_open());
    assert!(h.combo.take_focus_request());

    h.render();
    assert_eq!(h.row(0), "Aswan            × ▾");
}

#[test]
fn clicking_a_disabled_row_does_nothing() {
    let mut h = Harness::new(None);
    h.combo.open();
    h.render();
    assert_eq!(h.row(3), " Giza");
    let before = h.combo.state().clone();
    assert_eq!(h.click(2, 3), ComboboxAction::None);
    assert_eq!(h.combo.state(), &before);
    assert!(h.calls.borrow().is_empty());
}

#[test]
fn hover_moves_the_highlight() {
    let mut h = Harness::new(None);
    h.type_str("an");
    h.render();
    assert_eq!(h.mouse(4, 2, MouseEventKind::Moved), ComboboxAction::Redraw);
    assert_eq!(h.combo.state().highlighted, Some(1));
    assert_eq!(
        h.combo.projection().aria.active_descendant.as_deref(),
        Some("combobox-option-asw")
    );
    assert_eq!(h.key(KeyCode::Enter), ComboboxAction::ValueChanged("asw".to_string()));
}

#[test]
fn toggle_button_opens_and_closes() {
    let mut h = Harness::new(None);
    h.render();
    assert_eq!(h.click(19, 0), ComboboxAction::Redraw);
    assert!(h.combo.is_open());
    h.render();
    assert_eq!(h.click(19, 0), ComboboxAction::Redraw);
    assert!(!h.combo.is_open());
}

#[test]
fn clear_button_clears_and_reports() {
    let mut h = Harness::new(Some("alx"));
    h.render();
    assert_eq!(h.click(17, 0), ComboboxAction::ValueChanged(String::new()));
    assert_eq!(*h.calls.borrow(), vec![String::new()]);
    h.render();
    assert_eq!(h.row(0), "Select an option.. ▾");
}

#[test]
fn outside_click_closes_without_changing_selection() {
    let mut h = Harness::new(Some("cai"));
    h.combo.open();
    h.render();
    assert_eq!(h.click(40, 0), ComboboxAction::Redraw);
    assert!(!h.combo.is_open());
    assert_eq!(h.combo.value(), Some("cai"));
    assert!(h.calls.borrow().is_empty());
}

#[test]
fn outside_detection_is_scoped_per_widget() {
    let hub = PointerHub::new();
    let mut a = Combobox::new(&hub, cities(), None, ComboboxOptions::default()).unwrap();
    let mut b = Combobox::new(
        &hub,
        cities(),
        None,
        ComboboxOptions {
            id: "other".to_string(),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(hub.listener_count(), 2);

    let theme = Theme::default();
    let mut buf = Buffer::empty(Rect::new(0, 0, 60, 5));
    a.open();
    b.open();
    a.render_ref(Rect::new(0, 0, 20, 5), &mut buf, &theme);
    b.render_ref(Rect::new(30, 0, 20, 5), &mut buf, &theme);

    let m = MouseEvent::new(2, 0, MouseEventKind::Down(MouseButton::Left));
    hub.dispatch(&m);
    a.handle_event(InputEvent::Mouse(m));
    b.handle_event(InputEvent::Mouse(m));
    assert!(a.is_open());
    assert!(!b.is_open());

    drop(b);
    assert_eq!(hub.listener_count(), 1);
}

#[test]
fn wheel_scrolls_an_overflowing_list() {
    let mut h = Harness::with_options(
        None,
        ComboboxOptions {
            max_visible_rows: 2,
            ..Default::default()
        },
    );
    h.combo.open();
    h.render();
    assert_eq!(h.row(1), " Cairo             █");
    assert_eq!(h.mouse(3, 1, MouseEventKind::ScrollDown), ComboboxAction::Redraw);
    h.render();
    assert!(h.row(1).starts_with(" Alexandria"));
    assert!(h.row(2).starts_with(" Giza"));
    assert_eq!(h.row(3), "");
}

#[test]
fn cursor_follows_typed_text() {
    let mut h = Harness::new(None);
    h.render();
    h.click(1, 0);
    assert!(h.combo.is_focused());
    h.type_str("ca");
    h.render();
    assert_eq!(h.combo.cursor_pos(), Some((2, 0)));
}

#[test]
fn disabled_widget_renders_closed() {
    let mut h = Harness::with_options(
        Some("alx"),
        ComboboxOptions {
            disabled: true,
            ..Default::default()
        },
    );
    h.combo.open();
    h.render();
    assert_eq!(h.row(0), "Alexandria         ▾");
    assert_eq!(h.row(1), "");
    assert!(!h.combo.projection().aria.expanded);
    assert!(h.combo.projection().aria.disabled);
}

#[test]
fn highlight_scrolls_after_the_filter_grows_between_frames() {
    let mut h = Harness::with_options(
        None,
        ComboboxOptions {
            max_visible_rows: 2,
            ..Default::default()
        },
    );
    h.type_str("zz");
    h.render();
    h.key(KeyCode::Backspace);
    h.key(KeyCode::Backspace);
    h.key(KeyCode::Up);
    assert_eq!(h.combo.state().highlighted, Some(3));
    h.render();
    assert!(h.row(1).starts_with(" Giza"));
    assert!(h.row(2).starts_with(" Aswan"));
}

#[test]
fn outside_pointer_down_closes_before_the_next_frame() {
    let mut h = Harness::new(Some("cai"));
    h.combo.open();
    h.render();
    assert!(h.combo.projection().aria.expanded);

    h.hub.dispatch(&MouseEvent::new(
        50,
        50,
        MouseEventKind::Down(MouseButton::Left),
    ));
    assert!(!h.combo.is_open());
    let p = h.combo.projection();
    assert!(!p.aria.expanded);
    assert!(p.rows.is_empty());
    assert_eq!(p.toggle_label, "Open");

    h.render();
    assert!(!h.combo.state().open);
    assert_eq!(h.row(0), "Cairo            × ▾");
    assert_eq!(h.row(1), "");
    assert_eq!(h.combo.value(), Some("cai"));
    assert!(h.calls.borrow().is_empty());
}

#[test]
fn open_list_reports_listbox_role_and_close_label() {
    let mut h = Harness::new(None);
    h.combo.open();
    h.render();
    let p = h.combo.projection();
    assert_eq!(p.listbox_role, "listbox");
    assert_eq!(p.toggle_label, "Close");
    assert_eq!(h.row(0), "Select an option.. ▴");
}
