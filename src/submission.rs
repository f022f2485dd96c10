// Inquiry delivery
// The site has no backend yet: SimulatedBackend stands in for the booking and contact
// endpoints, waiting a fixed delay and acknowledging every inquiry.

use crate::booking_form::BookingFormData;
use crate::catalog::{Difficulty, Trek};
use crate::config::SubmissionConfig;
use crate::contact_form::ContactFormData;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;
use tokio::time::sleep;
use tracing::info;

pub const BOOKING_ENDPOINT: &str = "/api/send-booking-email";
pub const CONTACT_ENDPOINT: &str = "/api/contact";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Inquiry rejected: {0}")]
    Rejected(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InquiryKind {
    Booking,
    Contact,
}

impl InquiryKind {
    // Logical POST target for a real backend
    pub fn endpoint(&self) -> &'static str {
        match self {
            InquiryKind::Booking => BOOKING_ENDPOINT,
            InquiryKind::Contact => CONTACT_ENDPOINT,
        }
    }

    fn reference_prefix(&self) -> &'static str {
        match self {
            InquiryKind::Booking => "TT-B",
            InquiryKind::Contact => "TT-C",
        }
    }
}

// Body of a booking POST: the form plus details of the chosen trek
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingInquiry {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub nationality: String,
    pub trek_id: String,
    pub start_date: String,
    pub number_of_people: i32,
    pub special_requests: String,
    pub trek_name: Option<String>,
    pub trek_duration: Option<String>,
    pub trek_difficulty: Option<Difficulty>,
}

impl BookingInquiry {
    pub fn new(form: &BookingFormData, trek: Option<&Trek>) -> Self {
        Self {
            full_name: form.full_name.clone(),
            email: form.email.clone(),
            phone: form.phone.clone(),
            nationality: form.nationality.clone(),
            trek_id: form.trek_id.clone(),
            start_date: form.start_date.clone(),
            number_of_people: form.number_of_people,
            special_requests: form.special_requests.clone(),
            trek_name: trek.map(|t| t.name.clone()),
            trek_duration: trek.map(|t| t.duration.clone()),
            trek_difficulty: trek.map(|t| t.difficulty),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryReceipt {
    pub kind: InquiryKind,
    pub reference: String,
    pub received_at: DateTime<Utc>,
}

impl InquiryReceipt {
    pub fn issue(kind: InquiryKind) -> Self {
        Self {
            kind,
            reference: format!(
                "{}-{:06}",
                kind.reference_prefix(),
                rand::random::<u32>() % 1_000_000
            ),
            received_at: Utc::now(),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BackendStats {
    pub bookings_received: usize,
    pub contacts_received: usize,
}

#[async_trait]
pub trait InquiryBackend: Send + Sync + 'static {
    async fn submit_booking(&self, inquiry: BookingInquiry) -> Result<InquiryReceipt, BackendError>;

    async fn submit_contact(&self, message: ContactFormData)
        -> Result<InquiryReceipt, BackendError>;
}

// Waits the configured delay without blocking the runtime, then acknowledges.
// The delay cannot be cancelled and never times out.
pub struct SimulatedBackend {
    config: SubmissionConfig,
    bookings_received: AtomicUsize,
    contacts_received: AtomicUsize,
}

impl SimulatedBackend {
    pub fn new(config: SubmissionConfig) -> Self {
        Self {
            config,
            bookings_received: AtomicUsize::new(0),
            contacts_received: AtomicUsize::new(0),
        }
    }

    pub fn stats(&self) -> BackendStats {
        BackendStats {
            bookings_received: self.bookings_received.load(Ordering::SeqCst),
            contacts_received: self.contacts_received.load(Ordering::SeqCst),
        }
    }
}

impl Default for SimulatedBackend {
    fn default() -> Self {
        Self::new(SubmissionConfig::default())
    }
}

#[async_trait]
impl InquiryBackend for SimulatedBackend {
    async fn submit_booking(&self, inquiry: BookingInquiry) -> Result<InquiryReceipt, BackendError> {
        sleep(self.config.booking_delay()).await;

        self.bookings_received.fetch_add(1, Ordering::SeqCst);
        let receipt = InquiryReceipt::issue(InquiryKind::Booking);
        info!(
            reference = %receipt.reference,
            trek_id = %inquiry.trek_id,
            people = inquiry.number_of_people,
            endpoint = InquiryKind::Booking.endpoint(),
            "booking inquiry accepted (simulated)"
        );
        Ok(receipt)
    }

    async fn submit_contact(
        &self,
        message: ContactFormData,
    ) -> Result<InquiryReceipt, BackendError> {
        sleep(self.config.contact_delay()).await;

        self.contacts_received.fetch_add(1, Ordering::SeqCst);
        let receipt = InquiryReceipt::issue(InquiryKind::Contact);
        info!(
            reference = %receipt.reference,
            subject = %message.subject,
            endpoint = InquiryKind::Contact.endpoint(),
            "contact message accepted (simulated)"
        );
        Ok(receipt)
    }
}

#[cfg(test)]
pub(crate) mod mock_backend {
    use super::*;

    // Fails every call with the same error after the configured delay
    pub struct FailingBackend {
        pub delay_ms: u64,
        pub error: BackendError,
    }

    impl FailingBackend {
        pub fn unavailable(delay_ms: u64) -> Self {
            Self {
                delay_ms,
                error: BackendError::Unavailable("mail relay down".to_string()),
            }
        }

        pub fn rejected(delay_ms: u64) -> Self {
            Self {
                delay_ms,
                error: BackendError::Rejected("recipient mailbox full".to_string()),
            }
        }
    }

    #[async_trait]
    impl InquiryBackend for FailingBackend {
        async fn submit_booking(
            &self,
            _inquiry: BookingInquiry,
        ) -> Result<InquiryReceipt, BackendError> {
            sleep(std::time::Duration::from_millis(self.delay_ms)).await;
            Err(self.error.clone())
        }

        async fn submit_contact(
            &self,
            _message: ContactFormData,
        ) -> Result<InquiryReceipt, BackendError> {
            sleep(std::time::Duration::from_millis(self.delay_ms)).await;
            Err(self.error.clone())
        }
    }
}
