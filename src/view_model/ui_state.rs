use crate::domain::Person;

/// State of the people list. A projection of the store, rebuilt by every fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct PeopleUiState {
    pub is_loading: bool,
    pub people: Vec<Person>,
    /// Set by an undo so the list can scroll the restored item into view.
    pub restored_person_id: Option<String>,
}

impl Default for PeopleUiState {
    fn default() -> Self {
        Self {
            is_loading: true,
            people: Vec::new(),
            restored_person_id: None,
        }
    }
}

/// State of the person form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PersonUiState {
    pub person: Person,
}
