use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(
        r"^[a-zA-Z0-9+._%\-]{1,256}@[a-zA-Z0-9][a-zA-Z0-9\-]{0,64}(\.[a-zA-Z0-9][a-zA-Z0-9\-]{0,25})+$"
    )
    .unwrap();
    static ref PHONE_RE: Regex =
        Regex::new(r"^(\+[0-9]+[\- .]*)?(\([0-9]+\)[\- .]*)?([0-9][0-9\- .]+[0-9])$").unwrap();
}

/// Form validation for a person. Each check returns the message to show on
/// failure.
#[derive(Debug, Clone)]
pub struct PersonValidator {
    name_min: usize,
    name_max: usize,
}

impl Default for PersonValidator {
    fn default() -> Self {
        Self::new(2, 64)
    }
}

impl PersonValidator {
    /// Name bounds count characters, not bytes.
    pub fn new(name_min: usize, name_max: usize) -> Self {
        Self { name_min, name_max }
    }

    pub fn validate_first_name(&self, first_name: &str) -> Result<(), String> {
        self.validate_name(first_name, "First name")
    }

    pub fn validate_last_name(&self, last_name: &str) -> Result<(), String> {
        self.validate_name(last_name, "Last name")
    }

    fn validate_name(&self, name: &str, label: &str) -> Result<(), String> {
        let length = name.chars().count();
        if length < self.name_min {
            Err(format!("{label} is too short (min {} characters)", self.name_min))
        } else if length > self.name_max {
            Err(format!("{label} is too long (max {} characters)", self.name_max))
        } else {
            Ok(())
        }
    }

    /// Empty or blank means "no email" and passes.
    pub fn validate_email(&self, email: Option<&str>) -> Result<(), String> {
        match email.map(str::trim) {
            None | Some("") => Ok(()),
            Some(email) if EMAIL_RE.is_match(email) => Ok(()),
            Some(_) => Err("Email address is not valid".to_string()),
        }
    }

    /// Empty or blank means "no phone" and passes.
    pub fn validate_phone(&self, phone: Option<&str>) -> Result<(), String> {
        match phone.map(str::trim) {
            None | Some("") => Ok(()),
            Some(phone) if PHONE_RE.is_match(phone) => Ok(()),
            Some(_) => Err("Phone number is not valid".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_bounds() {
        let validator = PersonValidator::new(2, 5);
        assert!(validator.validate_first_name("Uwe").is_ok());
        assert!(validator.validate_first_name("U").unwrap_err().contains("too short"));
        assert!(validator.validate_last_name("Hoffmann").unwrap_err().contains("too long"));
        // multi-byte characters count once
        assert!(validator.validate_last_name("Günter").unwrap_err().contains("too long"));
        assert!(validator.validate_last_name("Jüng").is_ok());
    }

    #[test]
    fn test_email() {
        let validator = PersonValidator::default();
        assert!(validator.validate_email(None).is_ok());
        assert!(validator.validate_email(Some("  ")).is_ok());
        assert!(validator.validate_email(Some("e.mustermann@t-online.de")).is_ok());
        assert!(validator.validate_email(Some("e.mustermann@")).is_err());
        assert!(validator.validate_email(Some("no-at-sign.de")).is_err());
    }

    #[test]
    fn test_phone() {
        let validator = PersonValidator::default();
        assert!(validator.validate_phone(None).is_ok());
        assert!(validator.validate_phone(Some("0987 6543-210")).is_ok());
        assert!(validator.validate_phone(Some("+49 (0)30 1234567")).is_ok());
        assert!(validator.validate_phone(Some("call me")).is_err());
    }
}
