//! Application state and core logic

use crate::client::{RelayClient, RelayClientTrait};
use crate::config::BookingConfig;
use crate::relay::SubmissionPayload;
use crate::state::{BookingForm, Form, SubmitEffect};
use anyhow::{anyhow, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;

/// Status shown while a request is on its way to the relay
pub const SENDING_STATUS: &str = "Sending request...";

/// Main application struct
pub struct App {
    /// The booking form being edited
    pub form: BookingForm,
    /// Relay client; `None` confirms requests locally
    relay: Option<Box<dyn RelayClientTrait>>,
    /// Accepted request waiting to be posted after the next redraw
    pending: Option<SubmissionPayload>,
    /// Whether the app should quit
    quit: bool,
    /// Transient feedback shown in the status bar
    pub status_message: Option<String>,
}

impl App {
    /// Create a new App instance
    pub fn new(config: &BookingConfig, local_only: bool) -> Result<Self> {
        let relay: Option<Box<dyn RelayClientTrait>> = match &config.relay_url {
            Some(url) if !local_only => {
                let timeout = Duration::from_secs(config.request_timeout_secs);
                Some(Box::new(RelayClient::new(url.clone(), Some(timeout))?))
            }
            _ => None,
        };
        if let Some(relay) = &relay {
            tracing::info!("booking requests go to {}", relay.endpoint());
        }
        Ok(Self::with_relay(BookingForm::new(&config.services), relay))
    }

    pub fn with_relay(form: BookingForm, relay: Option<Box<dyn RelayClientTrait>>) -> Self {
        Self {
            form,
            relay,
            pending: None,
            quit: false,
            status_message: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Relay endpoint for display, if any
    pub fn relay_endpoint(&self) -> Option<String> {
        self.relay.as_ref().map(|r| r.endpoint())
    }

    /// Whether a request is waiting for [`App::deliver_pending`]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Handle keys in the booking form
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Clear any status messages on key press
        self.status_message = None;

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.quit = true,
            KeyCode::Char('s') if ctrl => self.submit(),
            KeyCode::Char('v') if ctrl || key.modifiers.contains(crate::platform::PASTE_MODIFIER) => {
                if let Err(err) = self.paste_from_clipboard() {
                    self.status_message = Some(format!("Paste failed: {err}"));
                }
            }
            KeyCode::Tab | KeyCode::Down => self.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.form.prev_field(),
            KeyCode::Right if self.form.is_active_field_choice() => {
                self.form.get_active_field_mut().next_choice();
                self.edited();
            }
            KeyCode::Left if self.form.is_active_field_choice() => {
                self.form.get_active_field_mut().prev_choice();
                self.edited();
            }
            KeyCode::Enter if self.form.is_active_field_multiline() => {
                self.form.get_active_field_mut().push_char('\n');
                self.edited();
            }
            // Enter on a single-line field submits, as in a browser
            KeyCode::Enter => self.submit(),
            KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::SUPER) => {
                self.form.get_active_field_mut().push_char(c);
                self.edited();
            }
            KeyCode::Backspace => {
                self.form.get_active_field_mut().pop_char();
                self.edited();
            }
            _ => {}
        }
        Ok(())
    }

    /// Re-validate the active field after its value changed
    fn edited(&mut self) {
        let index = self.form.active_field();
        self.form.on_input(index);
    }

    /// Validate and, when valid, confirm locally or queue for the relay
    fn submit(&mut self) {
        let SubmitEffect::Proceed(payload) = self.form.submit() else {
            return;
        };
        if self.relay.is_some() {
            self.status_message = Some(SENDING_STATUS.to_string());
            self.pending = Some(payload);
        } else {
            tracing::info!("booking request confirmed locally");
            self.form.complete_locally();
        }
    }

    /// Post the queued request and apply the relay's answer
    pub async fn deliver_pending(&mut self) {
        let Some(payload) = self.pending.take() else {
            return;
        };
        let Some(relay) = &self.relay else {
            return;
        };
        let reply = relay.submit(&payload).await;
        self.status_message = None;
        self.form.apply_relay_reply(reply);
    }

    fn paste_from_clipboard(&mut self) -> Result<()> {
        let text = arboard::Clipboard::new()
            .and_then(|mut clipboard| clipboard.get_text())
            .map_err(|e| anyhow!("clipboard unavailable: {e}"))?;
        let field = self.form.get_active_field_mut();
        if field.is_choice() {
            field.set_text(text.trim().to_string());
        } else {
            field.push_str(&text);
        }
        self.edited();
        Ok(())
    }
}
