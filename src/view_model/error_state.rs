use std::fmt::Display;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, error};

use crate::navigation::{NavHandler, NavKey};

use super::PersonIntent;

/// How long a notice stays visible in the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoticeDuration {
    Short,
    #[default]
    Long,
    Indefinite,
}

/// Payload of one error event.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorState {
    pub message: String,
    pub action_label: Option<String>,
    pub with_dismiss_action: bool,
    pub duration: NoticeDuration,
    /// Destination to open once the notice is dismissed.
    pub nav_key: Option<NavKey>,
    /// Intent dispatched when the user performs the notice's action.
    pub action: Option<Box<PersonIntent>>,
}

impl ErrorState {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            action_label: None,
            with_dismiss_action: true,
            duration: NoticeDuration::default(),
            nav_key: None,
            action: None,
        }
    }

    /// Labels the notice's action button and sets the intent it dispatches.
    pub fn with_action(mut self, label: impl Into<String>, intent: PersonIntent) -> Self {
        self.action_label = Some(label.into());
        self.action = Some(Box::new(intent));
        self
    }

    pub fn with_dismiss_action(mut self, with_dismiss_action: bool) -> Self {
        self.with_dismiss_action = with_dismiss_action;
        self
    }

    pub fn with_duration(mut self, duration: NoticeDuration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_nav_key(mut self, nav_key: NavKey) -> Self {
        self.nav_key = Some(nav_key);
        self
    }

    /// Runs the delayed navigation after the notice was dismissed.
    pub fn navigate_after_dismiss(&self, nav: &mut impl NavHandler) {
        if let Some(key) = &self.nav_key {
            debug!(nav_key = ?key, "Navigating after error dismissal");
            nav.pop_to_root_and_navigate(key.clone());
        }
    }
}

/// Error-event channel. Keeps the latest event so a subscriber that attaches
/// late still sees it; publishing `None` clears it.
#[derive(Clone)]
pub struct ErrorChannel {
    sender: Arc<watch::Sender<Option<ErrorState>>>,
    duration: NoticeDuration,
}

impl ErrorChannel {
    pub fn new(duration: NoticeDuration) -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            sender: Arc::new(sender),
            duration,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<ErrorState>> {
        self.sender.subscribe()
    }

    pub fn current(&self) -> Option<ErrorState> {
        self.sender.borrow().clone()
    }

    pub fn report(&self, state: ErrorState) {
        error!(message = %state.message, "Error event");
        self.sender.send_replace(Some(state));
    }

    /// An error state carrying the configured notice duration.
    pub fn notice(&self, message: impl Into<String>) -> ErrorState {
        ErrorState::new(message).with_duration(self.duration)
    }

    pub fn report_failure(&self, failure: &dyn Display) {
        self.report(self.notice(failure.to_string()));
    }

    pub fn clear(&self) {
        debug!("Clearing error state");
        self.sender.send_replace(None);
    }
}

impl Default for ErrorChannel {
    fn default() -> Self {
        Self::new(NoticeDuration::default())
    }
}
