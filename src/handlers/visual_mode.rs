/// Display states of an appointment slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Empty,
    Show,
    Create,
    Edit,
    Saving,
    Deleting,
    Confirm,
    ErrorSave,
    ErrorDelete,
}

impl Mode {
    /// Saving and Deleting wait on the scheduler API.
    pub fn is_transient(self) -> bool {
        matches!(self, Mode::Saving | Mode::Deleting)
    }

    pub fn is_error(self) -> bool {
        matches!(self, Mode::ErrorSave | Mode::ErrorDelete)
    }
}

/// Mode history. The initial mode is never popped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualMode {
    history: Vec<Mode>,
}

impl VisualMode {
    pub fn new(initial: Mode) -> Self {
        Self {
            history: vec![initial],
        }
    }

    pub fn mode(&self) -> Mode {
        // history is never empty
        self.history[self.history.len() - 1]
    }

    pub fn transition(&mut self, mode: Mode, replace: bool) {
        if replace && self.history.len() > 1 {
            self.history.pop();
        }
        self.history.push(mode);
    }

    pub fn back(&mut self) {
        if self.history.len() > 1 {
            self.history.pop();
        }
    }

    /// Drops the history and starts over from `mode`.
    pub fn reset(&mut self, mode: Mode) {
        self.history.clear();
        self.history.push(mode);
    }
}
