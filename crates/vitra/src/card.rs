//! The glass login card drawn over the background.

use std::time::Duration;

use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Padding, Paragraph},
};
use vitra_background::{Rgb, gradient_at};
use vitra_core::{Focus, Pointer, lerp, theme};

use crate::login::LoginForm;

/// Preferred card width in cells.
const CARD_WIDTH: u16 = 58;

/// Card height without and with the error box.
const CARD_HEIGHT: u16 = 21;
const ERROR_HEIGHT: u16 = 4;

/// Maximum drift toward the pointer, in cells.
const TILT_COLUMNS: f32 = 3.0;
const TILT_ROWS: f32 = 1.0;

/// Per-frame easing factor for the card drift.
const TILT_EASE: f32 = 0.08;

/// How much white is mixed into the glass, and how much the lines behind fade.
const GLASS_TINT: f32 = 0.08;
const GLASS_BLUR: f32 = 0.7;

const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
const SPINNER_FRAME_MS: u128 = 80;

const TOGGLE_SHOW: &str = " show ";
const TOGGLE_HIDE: &str = " hide ";

/// Eased card offset that follows the pointer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CardTilt {
    x: f32,
    y: f32,
}

impl CardTilt {
    /// Ease toward the pointer target. Up on screen is a negative row offset.
    pub fn update(&mut self, pointer: Pointer) {
        self.x = lerp(self.x, pointer.x * TILT_COLUMNS, TILT_EASE);
        self.y = lerp(self.y, -pointer.y * TILT_ROWS, TILT_EASE);
    }

    /// Offset in whole cells.
    pub fn offset(&self) -> (i16, i16) {
        (self.x.round() as i16, self.y.round() as i16)
    }
}

/// Screen regions of the interactive card elements, for mouse hit testing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardLayout {
    pub email: Rect,
    pub password: Rect,
    pub toggle: Rect,
    pub submit: Rect,
}

impl CardLayout {
    /// Element under a terminal cell. The toggle wins over the password field it sits in.
    pub fn hit(&self, column: u16, row: u16) -> Option<Focus> {
        let pos = Position::new(column, row);
        if self.toggle.contains(pos) {
            Some(Focus::ShowPassword)
        } else if self.email.contains(pos) {
            Some(Focus::Email)
        } else if self.password.contains(pos) {
            Some(Focus::Password)
        } else if self.submit.contains(pos) {
            Some(Focus::Submit)
        } else {
            None
        }
    }
}

/// Where the card sits inside `area`, shifted by the tilt and kept on screen.
pub fn card_area(area: Rect, has_error: bool, offset: (i16, i16)) -> Rect {
    let width = CARD_WIDTH.min(area.width);
    let height = (CARD_HEIGHT + if has_error { ERROR_HEIGHT } else { 0 }).min(area.height);

    let max_x = area.x + area.width - width;
    let max_y = area.y + area.height - height;
    let x = (area.x + (area.width - width) / 2) as i32 + offset.0 as i32;
    let y = (area.y + (area.height - height) / 2) as i32 + offset.1 as i32;

    Rect::new(
        x.clamp(area.x as i32, max_x as i32) as u16,
        y.clamp(area.y as i32, max_y as i32) as u16,
        width,
        height,
    )
}

/// Render the card and return where its controls landed.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    form: &LoginForm,
    tilt: CardTilt,
    elapsed: Duration,
) -> CardLayout {
    let screen = frame.area();
    let card = card_area(area, form.error().is_some(), tilt.offset());
    frost(frame.buffer_mut(), card, screen);

    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::new().fg(theme::BORDER))
        .padding(Padding::new(2, 2, 1, 1));
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let error_height = if form.error().is_some() {
        ERROR_HEIGHT
    } else {
        0
    };
    let chunks = Layout::vertical([
        Constraint::Length(1),            // Title
        Constraint::Length(1),            // Subtitle
        Constraint::Length(1),            // Spacing
        Constraint::Length(error_height), // Error
        Constraint::Length(1),            // Email label
        Constraint::Length(3),            // Email input
        Constraint::Length(1),            // Password label
        Constraint::Length(3),            // Password input
        Constraint::Length(1),            // Spacing
        Constraint::Length(3),            // Submit
        Constraint::Length(1),            // Spacing
        Constraint::Length(1),            // Links
    ])
    .split(inner);

    let title =
        Paragraph::new("Sign In".bold().fg(theme::FOREGROUND)).alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);
    let subtitle = Paragraph::new(
        "Welcome back. Enter your credentials to continue.".fg(theme::MUTED_FOREGROUND),
    )
    .alignment(Alignment::Center);
    frame.render_widget(subtitle, chunks[1]);

    if let Some(error) = form.error() {
        let [error_area, _] =
            Layout::vertical([Constraint::Length(3), Constraint::Length(1)]).areas(chunks[3]);
        render_error(frame, error_area, error);
    }

    frame.render_widget(label("Email"), chunks[4]);
    let email = render_input(
        frame,
        chunks[5],
        form.email(),
        "you@company.com",
        form.focus() == Focus::Email,
        0,
    );

    frame.render_widget(label("Password"), chunks[6]);
    let password = render_input(
        frame,
        chunks[7],
        &form.password_display(),
        "••••••••",
        form.focus() == Focus::Password,
        TOGGLE_SHOW.len() as u16,
    );
    let toggle = render_toggle(frame, password, form);

    let submit = render_submit(frame, chunks[9], form, elapsed);
    render_links(frame, chunks[11]);

    CardLayout {
        email,
        password,
        toggle,
        submit,
    }
}

/// Tint the card region like frosted glass over the gradient, fading what shows through.
fn frost(buf: &mut Buffer, card: Rect, screen: Rect) {
    let white = Rgb(255, 255, 255);
    for y in card.top()..card.bottom() {
        for x in card.left()..card.right() {
            let glass = gradient_at(x, y, screen.width, screen.height).mix(white, GLASS_TINT);
            if let Some(cell) = buf.cell_mut((x, y)) {
                if let Color::Rgb(r, g, b) = cell.fg {
                    cell.set_fg(Rgb(r, g, b).mix(glass, GLASS_BLUR).into());
                }
                cell.set_bg(glass.into());
            }
        }
    }
}

fn label(text: &str) -> Paragraph<'_> {
    Paragraph::new(text.fg(theme::FOREGROUND).bold())
}

fn input_block(focused: bool) -> Block<'static> {
    let border = if focused { theme::PRIMARY } else { theme::INPUT };
    Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::new().fg(border))
        .style(Style::new().bg(theme::BACKGROUND))
        .padding(Padding::horizontal(1))
}

/// Render a text input and return its area. Places the cursor when focused.
///
/// `reserve` cells at the right edge are left for a control drawn over the input.
fn render_input(
    frame: &mut Frame,
    area: Rect,
    value: &str,
    placeholder: &str,
    focused: bool,
    reserve: u16,
) -> Rect {
    let block = input_block(focused);
    let inner = block.inner(area);
    frame.render_widget(Clear, area);

    let text = if value.is_empty() {
        Span::styled(placeholder.to_string(), Style::new().fg(theme::MUTED_FOREGROUND))
    } else {
        Span::styled(value.to_string(), Style::new().fg(theme::FOREGROUND))
    };
    // Keep the end of long values visible
    let visible = inner.width.saturating_sub(reserve).max(1);
    let len = value.chars().count() as u16;
    let scroll = len.saturating_sub(visible - 1);
    frame.render_widget(Paragraph::new(text).block(block).scroll((0, scroll)), area);

    if focused && inner.width > 0 {
        let cursor_x = inner.x + (len - scroll).min(visible - 1).min(inner.width - 1);
        frame.set_cursor_position(Position::new(cursor_x, inner.y));
    }
    area
}

/// Draw the show/hide toggle inside the right edge of the password field.
fn render_toggle(frame: &mut Frame, password: Rect, form: &LoginForm) -> Rect {
    let text = if form.show_password() {
        TOGGLE_HIDE
    } else {
        TOGGLE_SHOW
    };
    let width = text.len() as u16;
    if password.width < width + 4 || password.height < 3 {
        return Rect::default();
    }
    let area = Rect::new(password.right() - width - 2, password.y + 1, width, 1);

    let style = if form.focus() == Focus::ShowPassword {
        Style::new()
            .fg(theme::PRIMARY_FOREGROUND)
            .bg(theme::PRIMARY)
            .bold()
    } else {
        Style::new().fg(theme::MUTED_FOREGROUND).bg(theme::BACKGROUND)
    };
    frame.render_widget(Paragraph::new(text).style(style), area);
    area
}

fn render_error(frame: &mut Frame, area: Rect, message: &str) {
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::new().fg(theme::DESTRUCTIVE))
        .style(Style::new().bg(theme::DESTRUCTIVE_BACKGROUND))
        .padding(Padding::horizontal(1));
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(message.fg(theme::DESTRUCTIVE)).block(block),
        area,
    );
}

/// Submit button; dimmed with a spinner while signing in.
fn render_submit(frame: &mut Frame, area: Rect, form: &LoginForm, elapsed: Duration) -> Rect {
    let focused = form.focus() == Focus::Submit;
    let mut style = Style::new()
        .fg(theme::PRIMARY_FOREGROUND)
        .bg(theme::PRIMARY)
        .add_modifier(Modifier::BOLD);
    if form.is_loading() {
        style = style.add_modifier(Modifier::DIM);
    }
    let border = if focused {
        theme::FOREGROUND
    } else {
        theme::PRIMARY
    };

    let content = if form.is_loading() {
        let spinner = SPINNER[(elapsed.as_millis() / SPINNER_FRAME_MS) as usize % SPINNER.len()];
        Line::from(format!("{spinner} Signing in…"))
    } else {
        Line::from("Sign In")
    };

    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::new().fg(border).bg(theme::PRIMARY));
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(content)
            .alignment(Alignment::Center)
            .style(style)
            .block(block),
        area,
    );
    area
}

fn render_links(frame: &mut Frame, area: Rect) {
    let [left, right] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(area);
    let link = Style::new().fg(theme::PRIMARY).underlined();
    frame.render_widget(Paragraph::new(Span::styled("Forgot Password?", link)), left);
    frame.render_widget(
        Paragraph::new(Span::styled("Create Account", link)).alignment(Alignment::Right),
        right,
    );
}
