//! Contact form fields, validation and the `mailto:` fallback.

use std::time::Duration;

use url::Url;

/// How long the fallback notice stays up before the fields are cleared.
pub const FALLBACK_CLEAR_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Email,
    Subject,
    Message,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Name,
        FormField::Email,
        FormField::Subject,
        FormField::Message,
    ];

    /// Element id of the input, also the key in the submitted body.
    pub fn id(self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Subject => "subject",
            FormField::Message => "message",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Email => "Email",
            FormField::Subject => "Subject",
            FormField::Message => "Message",
        }
    }

    pub fn from_id(id: &str) -> Option<FormField> {
        FormField::ALL.into_iter().find(|f| f.id() == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactFields {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Subject => &self.subject,
            FormField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: FormField, value: String) {
        match field {
            FormField::Name => self.name = value,
            FormField::Email => self.email = value,
            FormField::Subject => self.subject = value,
            FormField::Message => self.message = value,
        }
    }

    pub fn is_empty(&self) -> bool {
        FormField::ALL.iter().all(|f| self.get(*f).is_empty())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Checks the same constraints the form inputs declare: every field is
    /// required and the email must look like an address.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let missing: Vec<FormField> = FormField::ALL
            .into_iter()
            .filter(|f| self.get(*f).trim().is_empty())
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError::Missing(missing));
        }
        if !looks_like_email(self.email.trim()) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("please fill in: {}", field_list(.0))]
    Missing(Vec<FormField>),
    #[error("please enter a valid email address")]
    InvalidEmail,
}

fn field_list(fields: &[FormField]) -> String {
    fields
        .iter()
        .map(|f| f.label())
        .collect::<Vec<_>>()
        .join(", ")
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !value.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MailtoError {
    #[error("contact address {0:?} is not a valid recipient")]
    InvalidRecipient(String),
    #[error("mailto link rejected: {0}")]
    Malformed(String),
}

/// Builds a `mailto:` link pre-filled from the form.
///
/// The subject and body are percent-encoded with `%20` for spaces, which
/// mail clients expect in place of form-style `+`.
pub fn compose_mailto(recipient: &str, fields: &ContactFields) -> Result<String, MailtoError> {
    if !looks_like_email(recipient) || recipient.contains(['?', '&', '#']) {
        return Err(MailtoError::InvalidRecipient(recipient.to_string()));
    }
    let body = format!(
        "Name: {}\nEmail: {}\n\nMessage:\n{}",
        fields.name, fields.email, fields.message
    );
    let link = format!(
        "mailto:{}?subject={}&body={}",
        recipient,
        urlencoding::encode(&fields.subject),
        urlencoding::encode(&body)
    );
    Url::parse(&link).map_err(|err| MailtoError::Malformed(err.to_string()))?;
    Ok(link)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactFields {
        ContactFields {
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            subject: "Hello there".into(),
            message: "Line one\nLine & two".into(),
        }
    }

    #[test]
    fn mailto_encodes_subject_and_body() {
        let link = compose_mailto("me@example.com", &filled()).unwrap();
        assert_eq!(
            link,
            "mailto:me@example.com?subject=Hello%20there&body=Name%3A%20Ada%20Lovelace%0AEmail%3A%20ada%40example.com%0A%0AMessage%3A%0ALine%20one%0ALine%20%26%20two"
        );
    }

    #[test]
    fn bad_recipient_is_rejected() {
        assert_eq!(
            compose_mailto("not an address", &filled()),
            Err(MailtoError::InvalidRecipient("not an address".into()))
        );
        assert!(compose_mailto("a@b.c?cc=x@y.z", &filled()).is_err());
    }

    #[test]
    fn validation_lists_blank_fields_in_form_order() {
        let fields = ContactFields {
            name: "x".into(),
            message: "  ".into(),
            ..ContactFields::default()
        };
        assert_eq!(
            fields.validate(),
            Err(ValidationError::Missing(vec![
                FormField::Email,
                FormField::Subject,
                FormField::Message
            ]))
        );
        assert_eq!(
            fields.validate().unwrap_err().to_string(),
            "please fill in: Email, Subject, Message"
        );
    }

    #[test]
    fn email_needs_a_single_at_sign() {
        let mut fields = filled();
        fields.email = "ada.example.com".into();
        assert_eq!(fields.validate(), Err(ValidationError::InvalidEmail));
        fields.email = "a@b@c".into();
        assert_eq!(fields.validate(), Err(ValidationError::InvalidEmail));
        assert_eq!(filled().validate(), Ok(()));
    }
}
