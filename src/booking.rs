// Booking form session: holds what the user typed, the errors on screen and the
// submission state. One instance per booking page.

use crate::booking_form::{validate_booking, BookingField, BookingFormData, FieldErrors};
use crate::catalog::{Trek, TrekCatalog};
use crate::submission::{BackendError, BookingInquiry, InquiryBackend, InquiryReceipt};
use chrono::{Local, NaiveDate};
use parking_lot::Mutex;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    #[error("Booking form has {} invalid field(s)", .0.len())]
    Invalid(FieldErrors),

    #[error("A booking request is already being submitted")]
    SubmissionInProgress,

    #[error("Booking request was already submitted")]
    AlreadySubmitted,

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingStatus {
    Editing,
    Submitting,
    Submitted(InquiryReceipt),
}

struct BookingState {
    data: BookingFormData,
    errors: FieldErrors,
    status: BookingStatus,
}

// Puts a submitting form back into editing if the submit future is dropped
// before the backend answers. Data and errors are left as they were.
struct SubmittingGuard<'a> {
    state: &'a Mutex<BookingState>,
    active: bool,
}

impl SubmittingGuard<'_> {
    fn disarm(&mut self) {
        self.active = false;
    }
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        if self.active {
            let mut state = self.state.lock();
            if state.status == BookingStatus::Submitting {
                warn!("booking submission abandoned, returning to editing");
                state.status = BookingStatus::Editing;
            }
        }
    }
}

pub struct BookingForm {
    catalog: &'static TrekCatalog,
    backend: Arc<dyn InquiryBackend>,
    state: Mutex<BookingState>,
}

impl BookingForm {
    pub fn new(catalog: &'static TrekCatalog, backend: Arc<dyn InquiryBackend>) -> Self {
        Self::with_data(catalog, backend, BookingFormData::default())
    }

    // Arriving from a trek page pre-selects that trek
    pub fn for_trek(
        catalog: &'static TrekCatalog,
        backend: Arc<dyn InquiryBackend>,
        trek_id: &str,
    ) -> Self {
        Self::with_data(catalog, backend, BookingFormData::for_trek(trek_id))
    }

    fn with_data(
        catalog: &'static TrekCatalog,
        backend: Arc<dyn InquiryBackend>,
        data: BookingFormData,
    ) -> Self {
        Self {
            catalog,
            backend,
            state: Mutex::new(BookingState {
                data,
                errors: FieldErrors::new(),
                status: BookingStatus::Editing,
            }),
        }
    }

    pub fn data(&self) -> BookingFormData {
        self.state.lock().data.clone()
    }

    pub fn errors(&self) -> FieldErrors {
        self.state.lock().errors.clone()
    }

    pub fn status(&self) -> BookingStatus {
        self.state.lock().status.clone()
    }

    pub fn is_submit_enabled(&self) -> bool {
        self.state.lock().status == BookingStatus::Editing
    }

    // Trek shown in the summary panel, if the current id is in the catalog
    pub fn selected_trek(&self) -> Option<&'static Trek> {
        let trek_id = self.state.lock().data.trek_id.clone();
        if trek_id.is_empty() {
            return None;
        }
        self.catalog.get_trek_by_id(&trek_id)
    }

    // Editing a field drops its error straight away; the field is not
    // re-validated until the next submit. Returns false once the form has
    // left the editing state.
    pub fn set_field(&self, field: BookingField, value: &str) -> bool {
        let mut state = self.state.lock();
        if state.status != BookingStatus::Editing {
            return false;
        }
        state.data.set(field, value);
        if state.errors.clear(field) {
            debug!(field = field.name(), "cleared field error on edit");
        }
        true
    }

    pub fn set_number_of_people(&self, people: i32) -> bool {
        let mut state = self.state.lock();
        if state.status != BookingStatus::Editing {
            return false;
        }
        state.data.number_of_people = people;
        state.errors.clear(BookingField::NumberOfPeople);
        true
    }

    pub async fn submit(&self) -> Result<InquiryReceipt, BookingError> {
        self.submit_on(Local::now().date_naive()).await
    }

    // Validate against `today`, then hand the inquiry to the backend. The form
    // stays in `Submitting` until the backend answers.
    pub async fn submit_on(&self, today: NaiveDate) -> Result<InquiryReceipt, BookingError> {
        let inquiry = {
            let mut state = self.state.lock();
            match state.status {
                BookingStatus::Submitting => return Err(BookingError::SubmissionInProgress),
                BookingStatus::Submitted(_) => return Err(BookingError::AlreadySubmitted),
                BookingStatus::Editing => {}
            }

            let errors = validate_booking(&state.data, today);
            if !errors.is_empty() {
                state.errors = errors.clone();
                return Err(BookingError::Invalid(errors));
            }

            state.errors = FieldErrors::new();
            state.status = BookingStatus::Submitting;
            let trek = self.catalog.get_trek_by_id(&state.data.trek_id);
            BookingInquiry::new(&state.data, trek)
        };

        info!(
            trek_id = %inquiry.trek_id,
            people = inquiry.number_of_people,
            "submitting booking request"
        );
        let mut guard = SubmittingGuard {
            state: &self.state,
            active: true,
        };
        let result = self.backend.submit_booking(inquiry).await;
        guard.disarm();

        let mut state = self.state.lock();
        match result {
            Ok(receipt) => {
                info!(reference = %receipt.reference, "booking request submitted");
                state.data = BookingFormData::default();
                state.status = BookingStatus::Submitted(receipt.clone());
                Ok(receipt)
            }
            Err(e) => {
                warn!(error = %e, "booking request failed, returning to editing");
                state.status = BookingStatus::Editing;
                Err(e.into())
            }
        }
    }
}
