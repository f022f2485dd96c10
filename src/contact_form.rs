// Contact form: four required fields, one send at a time, reset after acknowledgment

use crate::submission::{BackendError, InquiryBackend, InquiryReceipt};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

pub const CONTACT_ACKNOWLEDGMENT: &str =
    "Thank you for your message! We will get back to you within 24 hours.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContactField {
    Name,
    Email,
    Subject,
    Message,
}

impl ContactField {
    pub const ALL: [ContactField; 4] = [
        ContactField::Name,
        ContactField::Email,
        ContactField::Subject,
        ContactField::Message,
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFormData {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactFormData {
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Subject => &self.subject,
            ContactField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: ContactField, value: &str) {
        let slot = match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Subject => &mut self.subject,
            ContactField::Message => &mut self.message,
        };
        *slot = value.to_string();
    }

    // Same semantics as a native `required` attribute: only an empty value fails
    pub fn missing_fields(&self) -> Vec<ContactField> {
        ContactField::ALL
            .into_iter()
            .filter(|field| self.get(*field).is_empty())
            .collect()
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContactError {
    #[error("Missing required fields: {0:?}")]
    MissingFields(Vec<ContactField>),

    #[error("A message is already being sent")]
    SendInProgress,

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactStatus {
    Idle,
    Sending,
    Sent(InquiryReceipt),
}

struct ContactState {
    data: ContactFormData,
    status: ContactStatus,
}

// Returns a sending form to idle if the submit future is dropped mid-flight
struct SendingGuard<'a> {
    state: &'a Mutex<ContactState>,
    active: bool,
}

impl SendingGuard<'_> {
    fn disarm(&mut self) {
        self.active = false;
    }
}

impl Drop for SendingGuard<'_> {
    fn drop(&mut self) {
        if self.active {
            let mut state = self.state.lock();
            if state.status == ContactStatus::Sending {
                warn!("contact send abandoned, form kept for retry");
                state.status = ContactStatus::Idle;
            }
        }
    }
}

pub struct ContactForm {
    backend: Arc<dyn InquiryBackend>,
    state: Mutex<ContactState>,
}

impl ContactForm {
    pub fn new(backend: Arc<dyn InquiryBackend>) -> Self {
        Self {
            backend,
            state: Mutex::new(ContactState {
                data: ContactFormData::default(),
                status: ContactStatus::Idle,
            }),
        }
    }

    pub fn data(&self) -> ContactFormData {
        self.state.lock().data.clone()
    }

    pub fn status(&self) -> ContactStatus {
        self.state.lock().status.clone()
    }

    // The send button is disabled while a message is in flight
    pub fn is_submit_enabled(&self) -> bool {
        self.state.lock().status != ContactStatus::Sending
    }

    // Edits are ignored while sending; returns whether the edit applied
    pub fn set_field(&self, field: ContactField, value: &str) -> bool {
        let mut state = self.state.lock();
        if state.status == ContactStatus::Sending {
            return false;
        }
        state.data.set(field, value);
        true
    }

    pub async fn submit(&self) -> Result<InquiryReceipt, ContactError> {
        let message = {
            let mut state = self.state.lock();
            if state.status == ContactStatus::Sending {
                return Err(ContactError::SendInProgress);
            }
            let missing = state.data.missing_fields();
            if !missing.is_empty() {
                return Err(ContactError::MissingFields(missing));
            }
            state.status = ContactStatus::Sending;
            state.data.clone()
        };

        let mut guard = SendingGuard {
            state: &self.state,
            active: true,
        };
        let result = self.backend.submit_contact(message).await;
        guard.disarm();

        let mut state = self.state.lock();
        match result {
            Ok(receipt) => {
                info!(reference = %receipt.reference, "contact message sent");
                state.data = ContactFormData::default();
                state.status = ContactStatus::Sent(receipt.clone());
                Ok(receipt)
            }
            Err(e) => {
                warn!(error = %e, "contact message failed, form kept for retry");
                state.status = ContactStatus::Idle;
                Err(e.into())
            }
        }
    }
}
