//! Login form state and the simulated sign-in.

use std::time::{Duration, Instant};

use vitra_core::Focus;

/// Message shown when a field is left empty.
pub const EMPTY_FIELDS_ERROR: &str = "Please fill in all fields.";

/// Result of a submit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A field was empty; the error message is set.
    Rejected,
    /// The simulated sign-in started.
    Started,
}

/// Local state of the login card.
#[derive(Debug, Clone)]
pub struct LoginForm {
    email: String,
    password: String,
    show_password: bool,
    error: Option<&'static str>,
    focus: Focus,
    /// When the running sign-in finishes.
    deadline: Option<Instant>,
    submit_delay: Duration,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new(Duration::from_secs(2))
    }
}

impl LoginForm {
    /// Create an empty form whose sign-in takes `submit_delay`.
    pub fn new(submit_delay: Duration) -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            show_password: false,
            error: None,
            focus: Focus::default(),
            deadline: None,
            submit_delay,
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn show_password(&self) -> bool {
        self.show_password
    }

    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Whether a sign-in is in flight.
    pub fn is_loading(&self) -> bool {
        self.deadline.is_some()
    }

    /// Password as it should be displayed.
    pub fn password_display(&self) -> String {
        if self.show_password {
            self.password.clone()
        } else {
            "•".repeat(self.password.chars().count())
        }
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn toggle_password_visibility(&mut self) {
        self.show_password = !self.show_password;
    }

    /// Type a character into the focused field.
    pub fn insert_char(&mut self, c: char) {
        if let Some(field) = self.focused_field_mut() {
            field.push(c);
        }
    }

    /// Delete the last character of the focused field.
    pub fn backspace(&mut self) {
        if let Some(field) = self.focused_field_mut() {
            field.pop();
        }
    }

    fn focused_field_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            Focus::Email => Some(&mut self.email),
            Focus::Password => Some(&mut self.password),
            Focus::ShowPassword | Focus::Submit => None,
        }
    }

    /// Validate the fields and start the simulated sign-in.
    ///
    /// A submit while one is already running keeps the earlier deadline.
    pub fn submit(&mut self, now: Instant) -> SubmitOutcome {
        self.error = None;
        if self.email.is_empty() || self.password.is_empty() {
            self.error = Some(EMPTY_FIELDS_ERROR);
            tracing::info!("sign-in rejected: empty field");
            return SubmitOutcome::Rejected;
        }

        let deadline = now + self.submit_delay;
        self.deadline = Some(self.deadline.map_or(deadline, |d| d.min(deadline)));
        tracing::info!(delay_ms = self.submit_delay.as_millis() as u64, "sign-in started");
        SubmitOutcome::Started
    }

    /// Finish the sign-in once its deadline has passed. Returns true if it finished.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                tracing::info!("sign-in finished");
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> LoginForm {
        let mut form = LoginForm::default();
        for c in "ada@example.com".chars() {
            form.insert_char(c);
        }
        form.focus_next();
        for c in "hunter2".chars() {
            form.insert_char(c);
        }
        form
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let form = filled();
        assert_eq!(form.email(), "ada@example.com");
        assert_eq!(form.password(), "hunter2");
        assert_eq!(form.focus(), Focus::Password);
    }

    #[test]
    fn test_typing_ignored_on_buttons() {
        let mut form = LoginForm::default();
        form.set_focus(Focus::Submit);
        form.insert_char('x');
        form.backspace();
        assert_eq!(form.email(), "");
        assert_eq!(form.password(), "");
    }

    #[test]
    fn test_backspace() {
        let mut form = filled();
        form.backspace();
        assert_eq!(form.password(), "hunter");
        form.set_focus(Focus::Email);
        form.backspace();
        assert_eq!(form.email(), "ada@example.co");
    }

    #[test]
    fn test_password_masking() {
        let mut form = filled();
        assert_eq!(form.password_display(), "•••••••");
        form.toggle_password_visibility();
        assert!(form.show_password());
        assert_eq!(form.password_display(), "hunter2");
    }

    #[test]
    fn test_empty_email_rejected() {
        let mut form = LoginForm::default();
        form.set_focus(Focus::Password);
        form.insert_char('p');

        let outcome = form.submit(Instant::now());
        assert_eq!(outcome, SubmitOutcome::Rejected);
        assert_eq!(form.error(), Some("Please fill in all fields."));
        assert!(!form.is_loading());
    }

    #[test]
    fn test_empty_password_rejected() {
        let mut form = LoginForm::default();
        form.insert_char('a');
        assert_eq!(form.submit(Instant::now()), SubmitOutcome::Rejected);
        assert!(!form.is_loading());
    }

    #[test]
    fn test_submit_loads_then_finishes() {
        let mut form = filled();
        let start = Instant::now();

        assert_eq!(form.submit(start), SubmitOutcome::Started);
        assert!(form.is_loading());
        assert_eq!(form.error(), None);

        assert!(!form.tick(start + Duration::from_millis(1999)));
        assert!(form.is_loading());

        assert!(form.tick(start + Duration::from_secs(2)));
        assert!(!form.is_loading());
        assert_eq!(form.error(), None);

        assert!(!form.tick(start + Duration::from_secs(3)));
    }

    #[test]
    fn test_valid_submit_clears_previous_error() {
        let mut form = LoginForm::default();
        form.submit(Instant::now());
        assert!(form.error().is_some());

        let mut form = LoginForm {
            error: form.error,
            ..filled()
        };
        form.submit(Instant::now());
        assert_eq!(form.error(), None);
    }

    #[test]
    fn test_second_submit_keeps_first_deadline() {
        let mut form = filled();
        let start = Instant::now();
        form.submit(start);
        form.submit(start + Duration::from_secs(1));
        assert!(form.tick(start + Duration::from_secs(2)));
        assert!(!form.is_loading());
    }

    #[test]
    fn test_custom_delay() {
        let mut form = LoginForm {
            submit_delay: Duration::from_millis(10),
            ..filled()
        };
        let start = Instant::now();
        form.submit(start);
        assert!(form.tick(start + Duration::from_millis(10)));
    }
}
