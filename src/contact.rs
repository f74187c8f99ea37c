//! Contact form intake

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::{CatalogStore, ContactMessage};
use crate::error::Result;

/// Raw contact form fields, any of which may be missing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

fn filled(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

impl ContactForm {
    /// Build a message, or `None` when name, email or message is missing.
    /// A subject is folded into the message body.
    pub fn into_message(self, submitted_at: DateTime<Utc>) -> Option<ContactMessage> {
        let name = filled(&self.name)?;
        let email = filled(&self.email)?;
        let body = filled(&self.message)?;

        let message = match filled(&self.subject) {
            Some(subject) => format!("{}\n\n{}", subject, body),
            None => body.to_string(),
        };

        Some(ContactMessage {
            name: name.to_string(),
            email: email.to_string(),
            message,
            submitted_at,
        })
    }
}

/// Record a contact form submission. Returns whether a message was recorded;
/// incomplete forms are dropped.
pub async fn submit_contact<S: CatalogStore + ?Sized>(store: &S, form: ContactForm) -> Result<bool> {
    match form.into_message(Utc::now()) {
        Some(message) => {
            info!("✉️ Contact message from {}", message.name);
            store.record_contact_message(message).await?;
            Ok(true)
        }
        None => {
            debug!("Ignoring incomplete contact form");
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;

    fn form(subject: Option<&str>) -> ContactForm {
        ContactForm {
            name: Some("Ravi".to_string()),
            email: Some("ravi@example.com".to_string()),
            subject: subject.map(str::to_string),
            message: Some("Is the monstera in stock?".to_string()),
        }
    }

    #[test]
    fn test_subject_is_folded_into_body() {
        let message = form(Some("Stock question")).into_message(Utc::now()).unwrap();
        assert_eq!(message.message, "Stock question\n\nIs the monstera in stock?");

        let plain = form(None).into_message(Utc::now()).unwrap();
        assert_eq!(plain.message, "Is the monstera in stock?");

        let blank_subject = form(Some("")).into_message(Utc::now()).unwrap();
        assert_eq!(blank_subject.message, "Is the monstera in stock?");
    }

    #[test]
    fn test_required_fields() {
        let mut missing_email = form(None);
        missing_email.email = None;
        assert!(missing_email.into_message(Utc::now()).is_none());

        let mut blank_name = form(None);
        blank_name.name = Some(String::new());
        assert!(blank_name.into_message(Utc::now()).is_none());

        assert!(ContactForm::default().into_message(Utc::now()).is_none());
    }

    #[tokio::test]
    async fn test_submit_contact() {
        let store = InMemoryCatalog::default();

        assert!(submit_contact(&store, form(None)).await.unwrap());
        assert!(!submit_contact(&store, ContactForm::default()).await.unwrap());

        let messages = store.contact_messages().await;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].email, "ravi@example.com");
    }
}
