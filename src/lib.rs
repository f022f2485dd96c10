// Main library file for the Trail Trust trekking site

// Catalog, listing filters, and the two inquiry forms
pub mod booking;
pub mod booking_form;
pub mod catalog;
pub mod config;
pub mod contact_form;
pub mod routes;
pub mod submission;
pub mod trek_search;

// Re-export key types for convenience
pub use booking::{BookingError, BookingForm, BookingStatus};
pub use booking_form::{
    validate_booking, BookingField, BookingFormData, FieldErrors, ValidationError,
};
pub use catalog::{
    catalog, featured_treks, get_top_treks, get_trek_by_id, CatalogError, DayItinerary, Difficulty,
    Trek, TrekCatalog,
};
pub use config::{SiteConfig, SubmissionConfig};
pub use contact_form::{ContactError, ContactField, ContactForm, ContactFormData, ContactStatus};
pub use routes::{resolve, Resolution, Route};
pub use submission::{
    BackendError, BookingInquiry, InquiryBackend, InquiryReceipt, SimulatedBackend,
};
pub use trek_search::{filter_treks, DifficultyFilter, TrekFilter, TrekSearch};
