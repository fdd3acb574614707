//! Form modal shell: title, opaque body, Cancel and (optionally) Save.
//!
//! The modal knows nothing about its body. It never discards caller state
//! and never closes itself on Save; the caller closes it after a successful
//! submit.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalAction {
    Cancel,
    Save,
}

impl ModalAction {
    pub fn label(self) -> &'static str {
        match self {
            ModalAction::Cancel => "Cancel",
            ModalAction::Save => "Save",
        }
    }
}

#[derive(Clone, Debug)]
pub struct FormModal<B> {
    open: bool,
    title: String,
    body: B,
    can_submit: bool,
    submitting: bool,
    error: Option<String>,
}

impl<B: Default> FormModal<B> {
    /// Closed modal. `can_submit` decides whether Save is offered.
    pub fn new(can_submit: bool) -> Self {
        Self {
            open: false,
            title: String::new(),
            body: B::default(),
            can_submit,
            submitting: false,
            error: None,
        }
    }
}

impl<B> FormModal<B> {
    pub fn show(&mut self, title: impl Into<String>, body: B) {
        self.title = title.into();
        self.body = body;
        self.open = true;
        self.submitting = false;
        self.error = None;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.submitting = false;
        self.error = None;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Title while open; nothing is rendered when closed.
    pub fn title(&self) -> Option<&str> {
        self.open.then_some(self.title.as_str())
    }

    pub fn body(&self) -> &B {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut B {
        &mut self.body
    }

    /// Exit actions in display order. Save appears only when a submit handler exists.
    pub fn actions(&self) -> Vec<ModalAction> {
        if !self.open {
            return Vec::new();
        }
        if self.can_submit {
            vec![ModalAction::Cancel, ModalAction::Save]
        } else {
            vec![ModalAction::Cancel]
        }
    }

    /// Resolve a click. Cancel is always honoured; Save only when offered and not already
    /// in flight. The returned action is what the caller must run.
    pub fn press(&mut self, action: ModalAction) -> Option<ModalAction> {
        if !self.open {
            return None;
        }
        match action {
            ModalAction::Cancel => Some(ModalAction::Cancel),
            ModalAction::Save if self.can_submit && !self.submitting => {
                self.submitting = true;
                Some(ModalAction::Save)
            }
            ModalAction::Save => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Submit finished without closing: clear the in-flight flag and show `error`, if any.
    pub fn finish_submit(&mut self, error: Option<String>) {
        self.submitting = false;
        self.error = error;
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
