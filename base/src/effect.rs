//! Side effects collected while handling an event.
//!
//! Operations never touch the terminal or the disk. They record notices
//! and persistence intents on an [`Effect`] and ask yes/no questions
//! through the injected [`Confirm`] capability; the driver acts on the
//! flags after the event returns.

/// Capability for yes/no prompts. The front-end asks on stdin, tests
/// inject fixed answers.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

#[derive(Default)]
pub struct Effect<'a> {
    confirm: Option<&'a mut dyn Confirm>,
    notices: Vec<String>,
    checkpoint: bool,
    clear_storage: bool,
}

impl<'a> Effect<'a> {
    pub fn with_confirm(confirm: &'a mut dyn Confirm) -> Self {
        Self {
            confirm: Some(confirm),
            ..Default::default()
        }
    }

    /// Record a notice for the front-end to surface.
    pub fn info(&mut self, msg: impl Into<String>) {
        self.notices.push(msg.into());
    }

    /// Ask the injected capability. Without one the answer is yes.
    pub fn confirm(&mut self, prompt: &str) -> bool {
        match self.confirm.as_mut() {
            Some(c) => c.confirm(prompt),
            None => true,
        }
    }

    /// Schedule a snapshot write after this event.
    pub fn checkpoint(&mut self) {
        self.checkpoint = true;
    }

    /// Schedule a storage wipe after this event. Wins over a checkpoint
    /// scheduled in the same event.
    pub fn clear_storage(&mut self) {
        self.clear_storage = true;
    }

    pub fn should_checkpoint(&self) -> bool {
        self.checkpoint && !self.clear_storage
    }

    pub fn should_clear_storage(&self) -> bool {
        self.clear_storage
    }

    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }
}
