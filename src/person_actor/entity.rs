use crate::actor_framework::Entity;
use crate::domain::Person;

impl Entity for Person {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }

    /// Rejects a record without a first or last name.
    fn on_create(&mut self) -> Result<(), String> {
        self.ensure_named()
    }

    /// Replaces the stored record after the same name check as on create.
    ///
    /// # Fields Updated
    /// All fields except `id`, which is the lookup key and stays the same.
    fn on_update(&mut self, replacement: Person) -> Result<(), String> {
        replacement.ensure_named()?;
        *self = replacement;
        Ok(())
    }
}
