use std::cmp::Ordering;
use std::fmt;
use uuid::Uuid;

/// A contact in the roster.
///
/// The `id` is a UUID string assigned when the value is first built and never
/// reassigned; it is the only identity used for matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub image_path: Option<String>,
}

impl Default for Person {
    fn default() -> Self {
        Self {
            id: new_uuid(),
            first_name: String::new(),
            last_name: String::new(),
            email: None,
            phone: None,
            image_path: None,
        }
    }
}

impl Person {
    /// Creates a new Person with a freshly generated id.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_image_path(mut self, image_path: impl Into<String>) -> Self {
        self.image_path = Some(image_path.into());
        self
    }

    /// First eight characters of the id, for log output.
    pub fn short_id(&self) -> &str {
        self.id.get(..8).unwrap_or(&self.id)
    }

    /// Both names must be present before a record may be stored.
    pub fn ensure_named(&self) -> Result<(), String> {
        if self.first_name.trim().is_empty() {
            return Err(format!("first name missing for {}", self.short_id()));
        }
        if self.last_name.trim().is_empty() {
            return Err(format!("last name missing for {}", self.short_id()));
        }
        Ok(())
    }

    /// Display order of the people list: first name, then last name, then id.
    pub fn display_order(a: &Person, b: &Person) -> Ordering {
        a.first_name
            .cmp(&b.first_name)
            .then_with(|| a.last_name.cmp(&b.last_name))
            .then_with(|| a.id.cmp(&b.id))
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.first_name, self.last_name, self.short_id())
    }
}

pub fn new_uuid() -> String {
    Uuid::new_v4().to_string()
}

/// Sorts a snapshot into display order.
pub fn sort_people(people: &mut [Person]) {
    people.sort_by(Person::display_order);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_person_gets_unique_uuid() {
        let a = Person::new("Arne", "Arndt");
        let b = Person::new("Arne", "Arndt");
        assert_ne!(a.id, b.id);
        assert!(Uuid::parse_str(&a.id).is_ok());
        assert_ne!(a, b);
    }

    #[test]
    fn test_display_uses_short_id() {
        let person = Person::new("Erika", "Mustermann")
            .with_id("10000000-0000-0000-0000-000000000000");
        assert_eq!(person.to_string(), "Erika Mustermann 10000000");
        assert_eq!(Person::new("A", "B").with_id("abc").short_id(), "abc");
    }

    #[test]
    fn test_builders_fill_optional_fields() {
        let person = Person::new("Erika", "Mustermann")
            .with_email("e.mustermann@t-online.de")
            .with_image_path("/images/erika.jpg");
        assert_eq!(person.email.as_deref(), Some("e.mustermann@t-online.de"));
        assert_eq!(person.image_path.as_deref(), Some("/images/erika.jpg"));
        assert_eq!(person.phone, None);
    }

    #[test]
    fn test_ensure_named() {
        assert!(Person::new("Erika", "Mustermann").ensure_named().is_ok());
        assert!(Person::new("  ", "Mustermann").ensure_named().is_err());
        assert!(Person::new("Erika", "").ensure_named().is_err());
    }

    #[test]
    fn test_sort_people_by_name_then_id() {
        let mut people = vec![
            Person::new("Cord", "Conrad").with_id("3"),
            Person::new("Arne", "Bauer").with_id("2"),
            Person::new("Arne", "Arndt").with_id("1"),
        ];
        sort_people(&mut people);
        let ids: Vec<&str> = people.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }
}
