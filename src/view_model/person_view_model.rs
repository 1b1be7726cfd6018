use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info_span, instrument, Instrument};

use crate::clients::PersonClient;
use crate::domain::{sort_people, Person};
use crate::navigation::NavKey;
use crate::optimistic::{OptimisticController, UndoState};
use crate::person_actor::PersonError;

use super::{ErrorChannel, PeopleIntent, PeopleUiState, PersonIntent, PersonUiState, PersonValidator};

/// Presentation state for the people list and the person form.
///
/// All `&mut self` methods are expected to run on one task, which is what
/// orders the list publishes. Persistence runs detached on the controller's
/// task scope; dropping the view model aborts whatever is still in flight.
pub struct PersonViewModel {
    client: PersonClient,
    validator: PersonValidator,
    people_state: Arc<watch::Sender<PeopleUiState>>,
    person_state: Arc<watch::Sender<PersonUiState>>,
    controller: OptimisticController,
    undo: UndoState<Person>,
    fetch_task: Option<JoinHandle<()>>,
}

fn person_id(person: &Person) -> String {
    person.id.clone()
}

impl PersonViewModel {
    pub fn new(client: PersonClient, validator: PersonValidator, errors: ErrorChannel) -> Self {
        let (people_state, _) = watch::channel(PeopleUiState::default());
        let (person_state, _) = watch::channel(PersonUiState::default());
        Self {
            client,
            validator,
            people_state: Arc::new(people_state),
            person_state: Arc::new(person_state),
            controller: OptimisticController::new(errors),
            undo: UndoState::Idle,
            fetch_task: None,
        }
    }

    pub fn people_state(&self) -> watch::Receiver<PeopleUiState> {
        self.people_state.subscribe()
    }

    pub fn person_state(&self) -> watch::Receiver<PersonUiState> {
        self.person_state.subscribe()
    }

    pub fn errors(&self) -> &ErrorChannel {
        self.controller.errors()
    }

    pub fn undo_state(&self) -> &UndoState<Person> {
        &self.undo
    }

    pub fn person_id(&self) -> String {
        self.person_state.borrow().person.id.clone()
    }

    pub fn handle_people_intent(&mut self, intent: PeopleIntent) {
        match intent {
            PeopleIntent::Fetch => self.fetch(),
        }
    }

    pub fn handle_person_intent(&mut self, intent: PersonIntent) {
        debug!(intent = ?intent, "Handling person intent");
        match intent {
            PersonIntent::FirstNameChange(first_name) => {
                self.edit_person(|p| p.first_name = first_name.trim().to_string())
            }
            PersonIntent::LastNameChange(last_name) => {
                self.edit_person(|p| p.last_name = last_name.trim().to_string())
            }
            PersonIntent::EmailChange(email) => {
                self.edit_person(|p| p.email = email.map(|e| e.trim().to_string()))
            }
            PersonIntent::PhoneChange(phone) => self.edit_person(|p| p.phone = phone),
            PersonIntent::ImagePathChange(path) => {
                self.edit_person(|p| p.image_path = path.map(|s| s.trim().to_string()))
            }

            PersonIntent::Clear => self.clear_state(),
            PersonIntent::FetchById(id) => self.fetch_by_id(id),
            PersonIntent::Create => self.create(),
            PersonIntent::Update => self.update(),
            PersonIntent::Remove(person) => self.remove(person),

            PersonIntent::RemoveUndo(person) => self.remove_undo(person),
            PersonIntent::Undo => self.undo_remove(),
            PersonIntent::Restored => self.restored(),
            PersonIntent::UndoEvent(notice) => self.errors().report(notice),

            PersonIntent::ErrorEvent(message) => {
                let errors = self.errors();
                errors.report(errors.notice(message));
            }
        }
    }

    // --- Form editing ---

    /// Publishes only when the edit actually changed the person.
    fn edit_person(&self, apply: impl FnOnce(&mut Person)) {
        self.person_state.send_if_modified(|state| {
            let before = state.person.clone();
            apply(&mut state.person);
            state.person != before
        });
    }

    fn clear_state(&self) {
        self.person_state.send_replace(PersonUiState::default());
    }

    // --- Plain persistence ---

    fn fetch_by_id(&mut self, id: String) {
        let client = self.client.clone();
        let person_state = Arc::clone(&self.person_state);
        let errors = self.errors().clone();
        self.controller.spawn(async move {
            let failure = match client.find_by_id(id.clone()).await {
                Ok(Some(person)) => {
                    person_state.send_modify(|state| state.person = person);
                    return;
                }
                Ok(None) => PersonError::NotFound(id),
                Err(e) => e,
            };
            errors.report(errors.notice(failure.to_string()).with_nav_key(NavKey::PeopleList));
        });
    }

    fn create(&mut self) {
        let person = self.person_state.borrow().person.clone();
        debug!(person_id = %person.short_id(), "create");
        let client = self.client.clone();
        self.controller.launch(async move { client.create(person).await });
    }

    fn update(&mut self) {
        let person = self.person_state.borrow().person.clone();
        debug!(person_id = %person.short_id(), "update");
        let client = self.client.clone();
        self.controller
            .launch(async move { client.update(person).await.map(|_| ()) });
    }

    fn remove(&mut self, person: Person) {
        debug!(person_id = %person.short_id(), "remove");
        let client = self.client.clone();
        self.controller
            .launch(async move { client.remove(&person).await });
    }

    // --- Single-slot undo ---

    fn remove_undo(&mut self, person: Person) {
        let current = self.people_state.borrow().people.clone();
        let people_state = &self.people_state;
        let undo = &mut self.undo;
        let client = self.client.clone();

        self.controller.remove(
            person,
            &current,
            person_id,
            |item, index| *undo = UndoState::pending(item, index),
            |updated| people_state.send_modify(|state| state.people = updated),
            move |item| async move { client.remove(&item).await },
        );
    }

    fn undo_remove(&mut self) {
        let current = self.people_state.borrow().people.clone();
        let pending = std::mem::take(&mut self.undo);
        let people_state = &self.people_state;
        let client = self.client.clone();

        self.undo = self.controller.undo(
            pending,
            &current,
            person_id,
            |restored, restored_id| {
                people_state.send_modify(|state| {
                    state.people = restored;
                    state.restored_person_id = Some(restored_id);
                })
            },
            move |item| async move { client.create(item).await },
        );
    }

    /// The list has scrolled to the restored item.
    fn restored(&self) {
        self.people_state
            .send_modify(|state| state.restored_person_id = None);
    }

    // --- Full fetch ---

    /// Follows the store and republishes every sorted snapshot. A newer fetch
    /// replaces the running one.
    fn fetch(&mut self) {
        if let Some(previous) = self.fetch_task.take() {
            previous.abort();
        }
        self.people_state.send_modify(|state| state.is_loading = true);

        let client = self.client.clone();
        let people_state = Arc::clone(&self.people_state);
        let errors = self.errors().clone();
        let task = async move {
            let mut changes = match client.subscribe().await {
                Ok(changes) => changes,
                Err(e) => {
                    people_state.send_modify(|state| state.is_loading = false);
                    errors.report_failure(&e);
                    return;
                }
            };
            loop {
                let mut people = changes.borrow_and_update().clone();
                sort_people(&mut people);
                debug!(count = people.len(), "Publishing people");
                people_state.send_modify(|state| {
                    state.is_loading = false;
                    state.people = people;
                });
                if changes.changed().await.is_err() {
                    debug!("Store closed, fetch finished");
                    break;
                }
            }
        };
        self.fetch_task = Some(tokio::spawn(task.instrument(info_span!("fetch_people"))));
    }

    // --- Validation ---

    /// Checks first name, last name, email and phone in that order. The first
    /// failure is reported as an error event.
    #[instrument(skip(self))]
    pub fn validate(&self) -> bool {
        let person = self.person_state.borrow().person.clone();
        let result = self
            .validator
            .validate_first_name(&person.first_name)
            .and_then(|_| self.validator.validate_last_name(&person.last_name))
            .and_then(|_| self.validator.validate_email(person.email.as_deref()))
            .and_then(|_| self.validator.validate_phone(person.phone.as_deref()));

        match result {
            Ok(()) => true,
            Err(message) => {
                let errors = self.errors();
                errors.report(errors.notice(message));
                false
            }
        }
    }

    /// The user pressed the action button of the current notice. The notice
    /// is cleared and its intent, if any, is dispatched.
    pub fn perform_error_action(&mut self) {
        let Some(notice) = self.errors().current() else {
            return;
        };
        self.errors().clear();
        if let Some(action) = notice.action {
            debug!(label = ?notice.action_label, "Performing notice action");
            self.handle_person_intent(*action);
        }
    }

    pub fn clear_error_state(&self) {
        self.errors().clear();
    }

    pub fn clean_up(&self) {
        debug!("clean_up");
        self.people_state.send_modify(|state| state.is_loading = false);
    }

    /// Waits for every detached persistence call issued so far.
    pub async fn settle(&mut self) {
        self.controller.settle().await;
    }
}

impl Drop for PersonViewModel {
    fn drop(&mut self) {
        if let Some(task) = self.fetch_task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor_framework::ResourceActor;
    use crate::view_model::ErrorState;

    async fn start_with(people: Vec<Person>) -> (PersonViewModel, PersonClient) {
        let (actor, inner) = ResourceActor::<Person>::new(32);
        tokio::spawn(actor.run());
        let client = PersonClient::new(inner);
        client.create_all(people).await.unwrap();
        let vm = PersonViewModel::new(client.clone(), PersonValidator::default(), ErrorChannel::default());
        (vm, client)
    }

    fn trio() -> Vec<Person> {
        vec![
            Person::new("Arne", "Arndt").with_id("p1"),
            Person::new("Berta", "Bauer").with_id("p2"),
            Person::new("Cord", "Conrad").with_id("p3"),
        ]
    }

    fn ids(people: &[Person]) -> Vec<&str> {
        people.iter().map(|p| p.id.as_str()).collect()
    }

    async fn loaded(vm: &mut PersonViewModel) -> watch::Receiver<PeopleUiState> {
        let mut rx = vm.people_state();
        vm.handle_people_intent(PeopleIntent::Fetch);
        rx.wait_for(|state| !state.is_loading).await.unwrap();
        rx
    }

    #[tokio::test]
    async fn test_fetch_publishes_sorted_people() {
        let (mut vm, _client) = start_with(trio().into_iter().rev().collect()).await;
        let rx = loaded(&mut vm).await;
        assert_eq!(ids(&rx.borrow().people), vec!["p1", "p2", "p3"]);
    }

    #[tokio::test]
    async fn test_remove_undo_then_undo_restores_list_and_store() {
        let (mut vm, client) = start_with(trio()).await;
        let rx = loaded(&mut vm).await;

        vm.handle_person_intent(PersonIntent::RemoveUndo(trio()[1].clone()));
        assert_eq!(ids(&rx.borrow().people), vec!["p1", "p3"]);
        assert_eq!(vm.undo_state(), &UndoState::pending(trio()[1].clone(), 1));
        vm.settle().await;
        assert_eq!(client.find_by_id("p2".to_string()).await.unwrap(), None);

        vm.handle_person_intent(PersonIntent::Undo);
        assert_eq!(ids(&rx.borrow().people), vec!["p1", "p2", "p3"]);
        assert_eq!(rx.borrow().restored_person_id.as_deref(), Some("p2"));
        assert_eq!(vm.undo_state(), &UndoState::Idle);
        vm.settle().await;
        assert!(client.find_by_id("p2".to_string()).await.unwrap().is_some());

        vm.handle_person_intent(PersonIntent::Restored);
        assert_eq!(rx.borrow().restored_person_id, None);
    }

    #[tokio::test]
    async fn test_undo_notice_action_restores_person() {
        let (mut vm, client) = start_with(trio()).await;
        let rx = loaded(&mut vm).await;

        vm.handle_person_intent(PersonIntent::RemoveUndo(trio()[1].clone()));
        vm.settle().await;
        vm.handle_person_intent(PersonIntent::UndoEvent(
            ErrorState::new("Berta Bauer removed")
                .with_action("Undo", PersonIntent::Undo)
                .with_dismiss_action(false),
        ));
        let notice = vm.errors().current().unwrap();
        assert_eq!(notice.action_label.as_deref(), Some("Undo"));

        vm.perform_error_action();
        assert_eq!(vm.errors().current(), None);
        assert_eq!(ids(&rx.borrow().people), vec!["p1", "p2", "p3"]);
        assert_eq!(vm.undo_state(), &UndoState::Idle);

        vm.settle().await;
        assert!(client.find_by_id("p2".to_string()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_drop_cancels_pending_removal() {
        let (mut vm, client) = start_with(trio()).await;
        let _rx = loaded(&mut vm).await;

        vm.handle_person_intent(PersonIntent::RemoveUndo(trio()[0].clone()));
        drop(vm);
        tokio::task::yield_now().await;

        assert!(client.find_by_id("p1".to_string()).await.unwrap().is_some());
        assert_eq!(client.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_undo_without_pending_removal_changes_nothing() {
        let (mut vm, _client) = start_with(trio()).await;
        let rx = loaded(&mut vm).await;

        vm.handle_person_intent(PersonIntent::Undo);
        vm.settle().await;
        assert_eq!(ids(&rx.borrow().people), vec!["p1", "p2", "p3"]);
        assert_eq!(vm.errors().current(), None);
    }

    #[tokio::test]
    async fn test_form_edits_are_trimmed_and_created() {
        let (mut vm, client) = start_with(Vec::new()).await;
        vm.handle_person_intent(PersonIntent::Clear);
        vm.handle_person_intent(PersonIntent::FirstNameChange("  Hanna ".to_string()));
        vm.handle_person_intent(PersonIntent::LastNameChange("Hoffmann".to_string()));
        vm.handle_person_intent(PersonIntent::EmailChange(Some(" h.hoffmann@gmx.de ".to_string())));
        vm.handle_person_intent(PersonIntent::PhoneChange(Some("0511 123-4567".to_string())));
        assert!(vm.validate());

        vm.handle_person_intent(PersonIntent::Create);
        vm.settle().await;

        let stored = client.find_by_id(vm.person_id()).await.unwrap().unwrap();
        assert_eq!(stored.first_name, "Hanna");
        assert_eq!(stored.email.as_deref(), Some("h.hoffmann@gmx.de"));
    }

    #[tokio::test]
    async fn test_unchanged_edit_does_not_publish() {
        let (mut vm, _client) = start_with(Vec::new()).await;
        let mut rx = vm.person_state();
        vm.handle_person_intent(PersonIntent::FirstNameChange("Otto".to_string()));
        assert!(rx.has_changed().unwrap());
        rx.borrow_and_update();

        vm.handle_person_intent(PersonIntent::FirstNameChange(" Otto ".to_string()));
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_validate_reports_first_failure() {
        let (mut vm, _client) = start_with(Vec::new()).await;
        vm.handle_person_intent(PersonIntent::FirstNameChange("O".to_string()));
        vm.handle_person_intent(PersonIntent::EmailChange(Some("broken".to_string())));

        assert!(!vm.validate());
        let error = vm.errors().current().unwrap();
        assert!(error.message.starts_with("First name"));

        vm.clear_error_state();
        assert_eq!(vm.errors().current(), None);
    }

    #[tokio::test]
    async fn test_fetch_by_id_loads_or_navigates_back() {
        let (mut vm, _client) = start_with(trio()).await;

        vm.handle_person_intent(PersonIntent::FetchById("p3".to_string()));
        vm.settle().await;
        assert_eq!(vm.person_state().borrow().person.first_name, "Cord");

        vm.handle_person_intent(PersonIntent::FetchById("missing".to_string()));
        vm.settle().await;
        let error = vm.errors().current().unwrap();
        assert_eq!(error.nav_key, Some(NavKey::PeopleList));
    }

    #[tokio::test]
    async fn test_update_of_unknown_person_reports_error() {
        let (mut vm, _client) = start_with(Vec::new()).await;
        vm.handle_person_intent(PersonIntent::FirstNameChange("Otto".to_string()));
        vm.handle_person_intent(PersonIntent::LastNameChange("Olbrich".to_string()));

        vm.handle_person_intent(PersonIntent::Update);
        vm.settle().await;
        assert!(vm.errors().current().unwrap().message.starts_with("Person not found"));
    }
}
