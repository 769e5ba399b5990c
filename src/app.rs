use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::api::{BmiClient, BmiRequest, HeightUnit};
use crate::display::ResultView;
use crate::theme::Theme;

/// Submit button label while idle
pub const SUBMIT_LABEL: &str = "Calculate BMI";
/// Submit button label while a request is in flight
pub const BUSY_LABEL: &str = "Calculating...";

/// Focusable widgets, in Tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Weight,
    Height,
    Unit,
    Calculate,
    Clear,
}

impl Field {
    fn next(self) -> Self {
        match self {
            Field::Weight => Field::Height,
            Field::Height => Field::Unit,
            Field::Unit => Field::Calculate,
            Field::Calculate => Field::Clear,
            Field::Clear => Field::Weight,
        }
    }

    fn prev(self) -> Self {
        match self {
            Field::Weight => Field::Clear,
            Field::Height => Field::Weight,
            Field::Unit => Field::Height,
            Field::Calculate => Field::Unit,
            Field::Clear => Field::Calculate,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    Alert,   // Blocking message, must be dismissed
    Help,
}

/// The submit control. Disabled for exactly as long as a request is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitButton {
    pub enabled: bool,
    pub label: &'static str,
}

impl Default for SubmitButton {
    fn default() -> Self {
        Self {
            enabled: true,
            label: SUBMIT_LABEL,
        }
    }
}

impl SubmitButton {
    fn hold(&mut self) {
        self.enabled = false;
        self.label = BUSY_LABEL;
    }

    fn release(&mut self) {
        *self = Self::default();
    }
}

/// The form controller: input fields, submit control, result region.
/// Built once at startup and kept for the life of the process.
pub struct App {
    pub focus: Field,
    pub popup: Popup,

    // Form inputs
    pub weight: String,
    pub height: String,
    pub unit: HeightUnit,

    pub submit_button: SubmitButton,
    pub result: ResultView,

    // Message for the alert popup
    pub alert: Option<String>,

    pub theme: Theme,

    client: BmiClient,

    // Validated request waiting to be sent (submit control is held meanwhile)
    in_flight: Option<BmiRequest>,
}

impl App {
    pub fn new(client: BmiClient, theme: Theme) -> Self {
        Self {
            focus: Field::Weight,
            popup: Popup::None,

            weight: String::new(),
            height: String::new(),
            unit: HeightUnit::default(),

            submit_button: SubmitButton::default(),
            result: ResultView::default(),

            alert: None,

            theme,

            client,
            in_flight: None,
        }
    }

    pub fn endpoint(&self) -> &str {
        self.client.endpoint()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Hide the result region and blank its fields
    pub fn reset_display(&mut self) {
        self.result.reset();
    }

    fn show_alert(&mut self, message: String) {
        self.alert = Some(message);
        self.popup = Popup::Alert;
    }

    fn dismiss_alert(&mut self) {
        self.alert = None;
        self.popup = Popup::None;
    }

    /// First half of a submit: reset the display, validate, and hold the
    /// submit control. Returns false when validation failed and nothing
    /// will be sent.
    pub fn begin_submit(&mut self) -> bool {
        if self.is_in_flight() || !self.submit_button.enabled {
            return false;
        }

        self.reset_display();

        match BmiRequest::from_form(&self.weight, &self.height, self.unit) {
            Ok(request) => {
                tracing::info!("Submitting BMI request ({})", self.unit);
                self.submit_button.hold();
                self.in_flight = Some(request);
                true
            }
            Err(e) => {
                tracing::info!("Rejected form input: {}", e);
                self.show_alert(e.alert_text());
                false
            }
        }
    }

    /// Second half of a submit: send the held request and render the
    /// outcome. The submit control is released on every path.
    pub async fn finish_submit(&mut self) {
        let Some(request) = self.in_flight.take() else {
            return;
        };

        let outcome = self.client.calculate(&request).await;
        self.submit_button.release();

        match outcome {
            Ok(response) => {
                tracing::info!("BMI {} ({})", response.bmi, response.category);
                self.result.render(&response);
            }
            Err(e) => {
                tracing::warn!(status = ?e.status(), "BMI calculation failed: {}", e);
                self.show_alert(e.alert_text());
            }
        }
    }

    /// Whole submit cycle in one call
    pub async fn submit(&mut self) {
        if self.begin_submit() {
            self.finish_submit().await;
        }
    }

    /// Empty the inputs, reset the unit to cm, and reset the display
    pub fn clear(&mut self) {
        if self.is_in_flight() {
            return;
        }
        self.weight.clear();
        self.height.clear();
        self.unit = HeightUnit::Cm;
        self.reset_display();
    }

    /// Whether `key` ends the program. Ctrl-C always does, even mid-request;
    /// `q` only from the bare form.
    pub fn is_quit_key(&self, key: &KeyEvent) -> bool {
        if Self::is_interrupt(key) {
            return true;
        }
        key.code == KeyCode::Char('q') && self.popup == Popup::None && !self.is_in_flight()
    }

    /// Ctrl-C, the one key honoured while a request is in flight
    pub fn is_interrupt(key: &KeyEvent) -> bool {
        key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
    }

    /// Handle one key press. Enter only starts a submit; the caller draws
    /// and then drives `finish_submit`.
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Nothing is interactive while a request is out
        if self.is_in_flight() {
            return;
        }

        match self.popup {
            Popup::Alert => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                    self.dismiss_alert();
                }
            }
            Popup::Help => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter | KeyCode::Char('q')) {
                    self.popup = Popup::None;
                }
            }
            Popup::None => self.handle_form_key(key),
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.prev(),

            KeyCode::Enter => match self.focus {
                Field::Clear => self.clear(),
                _ => {
                    self.begin_submit();
                }
            },

            KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right if self.focus == Field::Unit => {
                self.unit = self.unit.toggle();
            }
            KeyCode::Char(' ') if self.focus == Field::Clear => self.clear(),
            KeyCode::Char(' ') if self.focus == Field::Calculate => {
                self.begin_submit();
            }

            KeyCode::Char('u') => self.unit = self.unit.toggle(),
            KeyCode::Char('c') => self.clear(),
            KeyCode::Char('?') => self.popup = Popup::Help,

            KeyCode::Backspace => {
                if let Some(buffer) = self.focused_input() {
                    buffer.pop();
                }
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => {
                if let Some(buffer) = self.focused_input() {
                    // Only one decimal point per number
                    if c != '.' || !buffer.contains('.') {
                        buffer.push(c);
                    }
                }
            }

            _ => {}
        }
    }

    fn focused_input(&mut self) -> Option<&mut String> {
        match self.focus {
            Field::Weight => Some(&mut self.weight),
            Field::Height => Some(&mut self.height),
            _ => None,
        }
    }
}
