use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::event::Event;
use crossterm::event::KeyCode;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Constraint;
use ratatui::layout::Direction;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui_combobox::Catalog;
use ratatui_combobox::ComboOption;
use ratatui_combobox::ComboboxOptions;
use ratatui_combobox::PointerHub;
use ratatui_combobox::combobox::Combobox;
use ratatui_combobox::combobox::ComboboxAction;
use ratatui_combobox::core::crossterm_input::input_event_from_crossterm;
use ratatui_combobox::core::input::InputEvent;
use ratatui_combobox::core::input::KeyCode as ComboKey;
use ratatui_combobox::field::FormField;
use ratatui_combobox::help::HelpBar;
use ratatui_combobox::theme::Theme;
use std::io;
use std::sync::Mutex;
use std::time::Duration;

/// Set to a file path to write `tracing` output there (filtered by `RUST_LOG`).
const LOG_ENV: &str = "RATATUI_COMBOBOX_LOG";

struct App {
    hub: PointerHub,
    city: Combobox,
    fruit: Combobox,
    city_value: String,
    fruit_value: String,
    focus: usize,
    help: HelpBar,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging()?;

    let hub = PointerHub::new();
    let cities = Catalog::new(vec![
        ComboOption::new("cai", "Cairo"),
        ComboOption::new("alx", "Alexandria"),
        ComboOption::new("gza", "Giza"),
        ComboOption::new("lux", "Luxor"),
        ComboOption::new("asw", "Aswan"),
        ComboOption::new("hrg", "Hurghada"),
        ComboOption::new("ssh", "Sharm El Sheikh"),
        ComboOption::new("ptsd", "Port Said").disabled(true),
        ComboOption::new("suz", "Suez"),
        ComboOption::new("mnf", "Mansoura"),
        ComboOption::new("tnt", "Tanta"),
    ])?;
    let fruits = Catalog::new(vec![
        ComboOption::new("apple", "Apple"),
        ComboOption::new("banana", "Banana"),
        ComboOption::new("cherry", "Cherry").disabled(true),
        ComboOption::new("date", "Date"),
        ComboOption::new("fig", "Fig"),
    ])?;

    let city_options = ComboboxOptions {
        id: "city".to_string(),
        placeholder: "Pick a city...".to_string(),
        max_visible_rows: 6,
        ..Default::default()
    };
    let fruit_options = ComboboxOptions {
        id: "fruit".to_string(),
        placeholder: "Pick a fruit...".to_string(),
        clearable: false,
        ..Default::default()
    };
    let help = HelpBar::for_combobox(&city_options);

    let mut app = App {
        city: Combobox::new(&hub, cities, Some("alx"), city_options)?,
        fruit: Combobox::new(&hub, fruits, None, fruit_options)?,
        hub,
        city_value: "alx".to_string(),
        fruit_value: String::new(),
        focus: 0,
        help,
    };
    app.city.set_focused(true);

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let theme = Theme::default();
    let res = run(&mut terminal, &theme, &mut app);

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    res?;
    println!("city={:?} fruit={:?}", app.city_value, app.fruit_value);
    Ok(())
}

fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let Ok(path) = std::env::var(LOG_ENV) else {
        return Ok(());
    };
    let file = std::fs::File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run<B: ratatui::backend::Backend<Error = io::Error>>(
    terminal: &mut Terminal<B>,
    theme: &Theme,
    app: &mut App,
) -> io::Result<()> {
    loop {
        // The field syncs its slot on every frame; owner echoes are no-ops.
        FormField::new(&mut app.city_value).bind(&mut app.city);
        FormField::new(&mut app.fruit_value).bind(&mut app.fruit);

        terminal.draw(|f| {
            let area = f.area();
            let [main, status, help] = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Min(1),
                    Constraint::Length(1),
                    Constraint::Length(1),
                ])
                .areas(area);

            let block = Block::default()
                .title("Combobox (type to filter, ↑/↓, Enter, Esc, Tab, Ctrl-C)")
                .borders(Borders::ALL);
            let inner = block.inner(main);
            f.render_widget(block, main);

            let [left, right] = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(inner);
            let left = Rect::new(left.x + 1, left.y, left.width.saturating_sub(2), left.height);
            let right = Rect::new(
                right.x + 1,
                right.y,
                right.width.saturating_sub(2),
                right.height,
            );

            let city_error = app.city_value.is_empty().then_some("City is required");
            let buf = f.buffer_mut();
            FormField::new(&mut app.city_value)
                .label("City")
                .error(city_error)
                .render_ref(&mut app.city, left, buf, theme);
            FormField::new(&mut app.fruit_value)
                .label("Fruit")
                .render_ref(&mut app.fruit, right, buf, theme);

            let p = if app.focus == 0 {
                app.city.projection()
            } else {
                app.fruit.projection()
            };
            let status_line = format!(
                "city={:?}  fruit={:?}  expanded={}  active={}",
                app.city_value,
                app.fruit_value,
                p.aria.expanded,
                p.aria.active_descendant.as_deref().unwrap_or("-"),
            );
            let status_span = Span::styled(status_line, theme.text_muted);
            buf.set_span(status.x, status.y, &status_span, status.width);
            app.help.render_ref(help, buf);

            let focused = if app.focus == 0 { &app.city } else { &app.fruit };
            if let Some((x, y)) = focused.cursor_pos() {
                f.set_cursor_position((x, y));
            }
        })?;

        if !crossterm::event::poll(Duration::from_millis(50))? {
            continue;
        }
        let ev = crossterm::event::read()?;
        if let Event::Key(key) = &ev
            && key.kind == KeyEventKind::Press
            && key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c'))
        {
            return Ok(());
        }
        let Some(ev) = input_event_from_crossterm(ev) else {
            continue;
        };

        if let InputEvent::Mouse(m) = &ev {
            app.hub.dispatch(m);
            let city = app.city.handle_event(ev.clone());
            apply(&mut app.city_value, &city);
            let fruit = app.fruit.handle_event(ev);
            apply(&mut app.fruit_value, &fruit);
            if app.city.is_focused() && city != ComboboxAction::Ignored {
                focus(app, 0);
            } else if app.fruit.is_focused() && fruit != ComboboxAction::Ignored {
                focus(app, 1);
            }
            continue;
        }

        let (combo, slot) = if app.focus == 0 {
            (&mut app.city, &mut app.city_value)
        } else {
            (&mut app.fruit, &mut app.fruit_value)
        };
        let action = combo.handle_event(ev.clone());
        apply(slot, &action);
        let tab = matches!(&ev, InputEvent::Key(k) if matches!(k.code, ComboKey::Tab | ComboKey::BackTab));
        if action == ComboboxAction::Ignored && tab {
            let next = (app.focus + 1) % 2;
            focus(app, next);
        }
    }
}

fn apply(slot: &mut String, action: &ComboboxAction) {
    FormField::new(slot).apply(action);
}

fn focus(app: &mut App, index: usize) {
    app.focus = index;
    app.city.set_focused(index == 0);
    app.fruit.set_focused(index == 1);
    if index == 0 {
        app.fruit.close();
    } else {
        app.city.close();
    }
}
