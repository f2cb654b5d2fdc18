/// Which user actions need confirmation before they run
///
/// The core only says whether to ask and what to ask. Showing the prompt is
/// up to the front end.

/// A user-triggered history operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Copy,
    Update,
    Delete,
    Clear,
}

/// Prompt text for a destructive action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub title: &'static str,
    pub message: &'static str,
    pub confirm_label: &'static str,
}

impl Action {
    #[inline]
    pub fn requires_confirmation(self) -> bool {
        matches!(self, Action::Delete | Action::Clear)
    }

    /// Prompt to show before running this action, if any
    pub fn confirmation(self) -> Option<Confirmation> {
        match self {
            Action::Copy | Action::Update => None,
            Action::Delete => Some(Confirmation {
                title: "Delete Confirmation",
                message: "Are you sure you want to delete this clipboard item?",
                confirm_label: "Delete",
            }),
            Action::Clear => Some(Confirmation {
                title: "Delete all snippets",
                message: "Are you sure you want to clear the clipboard? This action cannot be undone.",
                confirm_label: "Clear",
            }),
        }
    }
}
