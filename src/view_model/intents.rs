use crate::domain::Person;

use super::ErrorState;

/// Actions on the people list screen.
#[derive(Debug, Clone, PartialEq)]
pub enum PeopleIntent {
    Fetch,
}

/// Actions on the person form and on single list items.
#[derive(Debug, Clone, PartialEq)]
pub enum PersonIntent {
    FirstNameChange(String),
    LastNameChange(String),
    EmailChange(Option<String>),
    PhoneChange(Option<String>),
    ImagePathChange(Option<String>),

    Clear,
    FetchById(String),
    Create,
    Update,
    Remove(Person),

    /// Swipe-to-delete: optimistic remove that can be undone.
    RemoveUndo(Person),
    Undo,
    /// The list finished scrolling to the restored item.
    Restored,
    /// Shows the notice that offers to undo the last removal.
    UndoEvent(ErrorState),

    ErrorEvent(String),
}
