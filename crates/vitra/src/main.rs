use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::Stylize,
    text::Line,
};
use vitra_background::BackgroundState;
use vitra_config::{Config, ConfigError};
use vitra_core::{Focus, PointerCell, theme};

mod card;
mod logging;
mod login;
mod pointer;

use card::{CardLayout, CardTilt};
use login::LoginForm;
use pointer::{MouseCapture, PointerTracker};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let (config, config_warning) = config_or_default(Config::load());
    // Printed before the alternate screen takes over, so it shows after exit
    if let Some(warning) = &config_warning {
        eprintln!("vitra: {warning}");
    }
    if let Err(e) = logging::init(&config.logging) {
        eprintln!("vitra: logging disabled: {e}");
    }
    if let Some(warning) = &config_warning {
        tracing::warn!("{warning}");
    }

    let terminal = ratatui::init();
    let result = App::new(config).run(terminal);
    ratatui::restore();
    result
}

/// Fall back to defaults on a bad config file, with a warning for the user.
fn config_or_default(loaded: Result<Config, ConfigError>) -> (Config, Option<String>) {
    match loaded {
        Ok(config) => (config, None),
        Err(e) => (
            Config::default(),
            Some(format!("invalid config, using defaults: {e}")),
        ),
    }
}

/// The login screen: animated background, glass card and the event loop.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Time between frames when no input arrives.
    frame_interval: Duration,
    /// When the scene was mounted.
    started: Instant,
    /// Animated line field.
    background: BackgroundState,
    /// Writes mouse positions into the shared pointer cell.
    tracker: PointerTracker,
    /// Read side of the pointer cell, polled once per frame.
    pointer: PointerCell,
    /// Login card state.
    form: LoginForm,
    /// Eased card drift.
    tilt: CardTilt,
    /// Where the card controls were last drawn.
    layout: CardLayout,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config) -> Self {
        let tracker = PointerTracker::new(0, 0);
        let pointer = tracker.cell();
        Self {
            running: false,
            frame_interval: config.animation.frame_interval(),
            started: Instant::now(),
            background: BackgroundState::new(config.animation.seed),
            tracker,
            pointer,
            form: LoginForm::new(config.login.submit_delay()),
            tilt: CardTilt::default(),
            layout: CardLayout::default(),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        let _capture = MouseCapture::enable()?;
        let size = terminal.size()?;
        self.tracker.on_resize(size.width, size.height);
        self.started = Instant::now();

        self.running = true;
        while self.running {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
            self.form.tick(Instant::now());
        }
        tracing::debug!("login screen unmounted");
        Ok(())
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let elapsed = self.started.elapsed();
        let pointer = self.pointer.get();

        self.background.render(frame, elapsed, pointer);
        self.tilt.update(pointer);

        let chunks = Layout::vertical([
            Constraint::Fill(1),   // Card
            Constraint::Length(1), // Help text
        ])
        .split(frame.area());

        self.layout = card::render(frame, chunks[0], &self.form, self.tilt, elapsed);

        let help = Line::from(vec![
            "tab".bold().fg(theme::PRIMARY),
            " next field  ".fg(theme::MUTED_FOREGROUND),
            "ctrl+s".bold().fg(theme::PRIMARY),
            " show password  ".fg(theme::MUTED_FOREGROUND),
            "enter".bold().fg(theme::PRIMARY),
            " sign in  ".fg(theme::MUTED_FOREGROUND),
            "esc".bold().fg(theme::PRIMARY),
            " quit".fg(theme::MUTED_FOREGROUND),
        ])
        .centered();
        frame.render_widget(help, chunks[1]);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Polls with the frame interval as timeout so the animation keeps running.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(self.frame_interval)? {
            self.on_event(event::read()?);
        }
        Ok(())
    }

    fn on_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
            Event::Mouse(mouse) => self.on_mouse_event(mouse),
            Event::Resize(width, height) => self.tracker.on_resize(width, height),
            _ => {}
        }
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc)
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (KeyModifiers::CONTROL, KeyCode::Char('s') | KeyCode::Char('S')) => {
                self.form.toggle_password_visibility()
            }
            (_, KeyCode::Tab | KeyCode::Down) => self.form.focus_next(),
            (_, KeyCode::BackTab | KeyCode::Up) => self.form.focus_prev(),
            (_, KeyCode::Enter) => self.activate(self.form.focus()),
            (_, KeyCode::Backspace) => self.form.backspace(),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
                self.form.insert_char(c)
            }
            _ => {}
        }
    }

    /// Handles mouse movement and clicks.
    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                self.tracker.on_move(mouse.column, mouse.row)
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.tracker.on_move(mouse.column, mouse.row);
                if let Some(target) = self.layout.hit(mouse.column, mouse.row) {
                    self.form.set_focus(target);
                    if !target.is_text_input() {
                        self.activate(target);
                    }
                }
            }
            _ => {}
        }
    }

    /// Press the given control, or submit the form from a text field.
    fn activate(&mut self, focus: Focus) {
        match focus {
            Focus::ShowPassword => self.form.toggle_password_visibility(),
            Focus::Email | Focus::Password | Focus::Submit => self.submit(),
        }
    }

    /// Submit unless the button is disabled by a running sign-in.
    fn submit(&mut self) {
        if self.form.is_loading() {
            return;
        }
        self.form.submit(Instant::now());
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};
    use vitra_core::Pointer;

    fn new_app() -> App {
        let mut config = Config::default();
        config.animation.seed = Some(11);
        let mut app = App::new(config);
        app.tracker.on_resize(100, 40);
        app.running = true;
        app
    }

    fn key(code: KeyCode) -> Event {
        key_with(code, KeyModifiers::NONE)
    }

    fn key_with(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            app.on_event(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_bad_config_falls_back_with_warning() {
        let (config, warning) = config_or_default(Config::from_toml("[animation]\nseed = \"x\"\n"));
        assert_eq!(config, Config::default());
        let warning = warning.unwrap();
        assert!(warning.starts_with("invalid config, using defaults: failed to parse config"));

        let mut custom = Config::default();
        custom.login.submit_delay_ms = 10;
        let (config, warning) = config_or_default(Ok(custom.clone()));
        assert_eq!(config, custom);
        assert_eq!(warning, None);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = new_app();
        app.on_event(key(KeyCode::Esc));
        assert!(!app.running);

        let mut app = new_app();
        app.on_event(key_with(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);

        // 'q' is just text in a login form
        let mut app = new_app();
        app.on_event(key(KeyCode::Char('q')));
        assert!(app.running);
        assert_eq!(app.form.email(), "q");
    }

    #[test]
    fn test_typing_and_focus() {
        let mut app = new_app();
        type_str(&mut app, "ada@example.com");
        app.on_event(key(KeyCode::Tab));
        type_str(&mut app, "pw");
        assert_eq!(app.form.email(), "ada@example.com");
        assert_eq!(app.form.password(), "pw");

        app.on_event(key(KeyCode::BackTab));
        assert_eq!(app.form.focus(), Focus::Email);
        app.on_event(key(KeyCode::Backspace));
        assert_eq!(app.form.email(), "ada@example.co");
    }

    #[test]
    fn test_shift_types_uppercase() {
        let mut app = new_app();
        app.on_event(key_with(KeyCode::Char('A'), KeyModifiers::SHIFT));
        assert_eq!(app.form.email(), "A");
    }

    #[test]
    fn test_enter_with_empty_fields_shows_error() {
        let mut app = new_app();
        app.on_event(key(KeyCode::Tab));
        type_str(&mut app, "secret");
        app.on_event(key(KeyCode::Enter));
        assert_eq!(app.form.error(), Some(login::EMPTY_FIELDS_ERROR));
        assert!(!app.form.is_loading());
    }

    #[test]
    fn test_enter_submits_and_loads() {
        let mut app = new_app();
        type_str(&mut app, "a@b.c");
        app.on_event(key(KeyCode::Tab));
        type_str(&mut app, "secret");
        app.on_event(key(KeyCode::Enter));
        assert!(app.form.is_loading());
        assert_eq!(app.form.error(), None);
    }

    fn start_sign_in(app: &mut App) {
        type_str(app, "a@b.c");
        app.on_event(key(KeyCode::Tab));
        type_str(app, "secret");
        app.on_event(key(KeyCode::Enter));
        assert!(app.form.is_loading());
    }

    fn clear_email(app: &mut App) {
        app.form.set_focus(Focus::Email);
        for _ in 0..app.form.email().len() {
            app.on_event(key(KeyCode::Backspace));
        }
        assert_eq!(app.form.email(), "");
    }

    #[test]
    fn test_enter_ignored_while_loading() {
        let mut app = new_app();
        start_sign_in(&mut app);

        // Would be rejected if the submit went through
        clear_email(&mut app);
        app.on_event(key(KeyCode::Enter));
        assert_eq!(app.form.error(), None);
        assert!(app.form.is_loading());

        app.form.tick(Instant::now() + Duration::from_secs(3));
        assert!(!app.form.is_loading());
        app.on_event(key(KeyCode::Enter));
        assert_eq!(app.form.error(), Some(login::EMPTY_FIELDS_ERROR));
    }

    #[test]
    fn test_submit_click_ignored_while_loading() {
        let mut app = new_app();
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        start_sign_in(&mut app);
        clear_email(&mut app);
        terminal.draw(|frame| app.render(frame)).unwrap();

        let submit = app.layout.submit;
        app.on_event(mouse(
            MouseEventKind::Down(MouseButton::Left),
            submit.x + 1,
            submit.y + 1,
        ));
        assert_eq!(app.form.focus(), Focus::Submit);
        assert_eq!(app.form.error(), None);
        assert!(app.form.is_loading());
    }

    #[test]
    fn test_enter_on_toggle_and_ctrl_s() {
        let mut app = new_app();
        app.form.set_focus(Focus::ShowPassword);
        app.on_event(key(KeyCode::Enter));
        assert!(app.form.show_password());
        app.on_event(key_with(KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert!(!app.form.show_password());
        assert_eq!(app.form.error(), None);
    }

    #[test]
    fn test_mouse_moves_pointer() {
        let mut app = new_app();
        app.on_event(mouse(MouseEventKind::Moved, 75, 10));
        assert_eq!(app.pointer.get(), Pointer::new(0.5, 0.5));
    }

    #[test]
    fn test_resize_updates_tracker() {
        let mut app = new_app();
        app.on_event(Event::Resize(50, 20));
        app.on_event(mouse(MouseEventKind::Moved, 25, 10));
        assert_eq!(app.pointer.get(), Pointer::default());
    }

    #[test]
    fn test_render_and_click_controls() {
        let mut app = new_app();
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();

        let password = app.layout.password;
        app.on_event(mouse(
            MouseEventKind::Down(MouseButton::Left),
            password.x + 2,
            password.y + 1,
        ));
        assert_eq!(app.form.focus(), Focus::Password);

        let toggle = app.layout.toggle;
        app.on_event(mouse(MouseEventKind::Down(MouseButton::Left), toggle.x, toggle.y));
        assert!(app.form.show_password());

        let submit = app.layout.submit;
        app.on_event(mouse(
            MouseEventKind::Down(MouseButton::Left),
            submit.x + 1,
            submit.y + 1,
        ));
        assert_eq!(app.form.error(), Some(login::EMPTY_FIELDS_ERROR));

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("esc quit"));
    }
}
