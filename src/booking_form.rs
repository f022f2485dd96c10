// Booking inquiry form data and its field validation rules

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::num::IntErrorKind;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::debug;

// Loose shape check, not RFC 5322
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

// Format produced by an HTML date input
pub const START_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BookingField {
    FullName,
    Email,
    Phone,
    Nationality,
    TrekId,
    StartDate,
    NumberOfPeople,
    SpecialRequests,
}

impl BookingField {
    pub const ALL: [BookingField; 8] = [
        BookingField::FullName,
        BookingField::Email,
        BookingField::Phone,
        BookingField::Nationality,
        BookingField::TrekId,
        BookingField::StartDate,
        BookingField::NumberOfPeople,
        BookingField::SpecialRequests,
    ];

    // Form control name
    pub fn name(&self) -> &'static str {
        match self {
            BookingField::FullName => "fullName",
            BookingField::Email => "email",
            BookingField::Phone => "phone",
            BookingField::Nationality => "nationality",
            BookingField::TrekId => "trekId",
            BookingField::StartDate => "startDate",
            BookingField::NumberOfPeople => "numberOfPeople",
            BookingField::SpecialRequests => "specialRequests",
        }
    }

    pub fn from_name(name: &str) -> Option<BookingField> {
        BookingField::ALL.into_iter().find(|field| field.name() == name)
    }
}

impl fmt::Display for BookingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationError {
    #[error("value is required")]
    Required,

    #[error("value has an invalid format")]
    InvalidFormat,

    #[error("date must not be in the past")]
    MustBeFuture,

    #[error("value must be at least 1")]
    MustBePositive,
}

// Text shown next to the offending control
pub fn error_message(field: BookingField, error: ValidationError) -> &'static str {
    match (field, error) {
        (BookingField::FullName, ValidationError::Required) => "Full name is required",
        (BookingField::Email, ValidationError::Required) => "Email is required",
        (BookingField::Email, ValidationError::InvalidFormat) => "Please enter a valid email",
        (BookingField::Phone, ValidationError::Required) => "Phone number is required",
        (BookingField::Nationality, ValidationError::Required) => "Nationality is required",
        (BookingField::TrekId, ValidationError::Required) => "Please select a trek",
        (BookingField::StartDate, ValidationError::Required) => "Start date is required",
        (BookingField::StartDate, ValidationError::InvalidFormat) => "Please enter a valid date",
        (BookingField::StartDate, ValidationError::MustBeFuture) => {
            "Start date must be in the future"
        }
        (BookingField::NumberOfPeople, ValidationError::MustBePositive) => {
            "At least 1 person required"
        }
        (_, ValidationError::Required) => "This field is required",
        (_, ValidationError::InvalidFormat) => "Please enter a valid value",
        (_, ValidationError::MustBeFuture) => "Date must be in the future",
        (_, ValidationError::MustBePositive) => "Value must be at least 1",
    }
}

// At most one error per field; an empty set means the form is valid
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors {
    errors: BTreeMap<BookingField, ValidationError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: BookingField, error: ValidationError) {
        self.errors.insert(field, error);
    }

    pub fn get(&self, field: BookingField) -> Option<ValidationError> {
        self.errors.get(&field).copied()
    }

    pub fn message(&self, field: BookingField) -> Option<&'static str> {
        self.get(field).map(|error| error_message(field, error))
    }

    // Returns true when an error was actually removed
    pub fn clear(&mut self, field: BookingField) -> bool {
        self.errors.remove(&field).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BookingField, ValidationError)> + '_ {
        self.errors.iter().map(|(field, error)| (*field, *error))
    }

    pub fn messages(&self) -> Vec<(BookingField, &'static str)> {
        self.iter()
            .map(|(field, error)| (field, error_message(field, error)))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingFormData {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub nationality: String,
    pub trek_id: String,
    pub start_date: String,
    pub number_of_people: i32,
    #[serde(default)]
    pub special_requests: String,
}

impl Default for BookingFormData {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            email: String::new(),
            phone: String::new(),
            nationality: String::new(),
            trek_id: String::new(),
            start_date: String::new(),
            number_of_people: 1,
            special_requests: String::new(),
        }
    }
}

impl BookingFormData {
    // Empty form with the trek pre-selected, as when arriving from a trek page
    pub fn for_trek(trek_id: impl Into<String>) -> Self {
        Self {
            trek_id: trek_id.into(),
            ..Self::default()
        }
    }

    // Apply raw control input. A party size that does not parse becomes 0 and
    // is then caught by validation; one too large for i32 saturates.
    pub fn set(&mut self, field: BookingField, value: &str) {
        match field {
            BookingField::FullName => self.full_name = value.to_string(),
            BookingField::Email => self.email = value.to_string(),
            BookingField::Phone => self.phone = value.to_string(),
            BookingField::Nationality => self.nationality = value.to_string(),
            BookingField::TrekId => self.trek_id = value.to_string(),
            BookingField::StartDate => self.start_date = value.to_string(),
            BookingField::NumberOfPeople => {
                self.number_of_people = match value.trim().parse::<i32>() {
                    Ok(people) => people,
                    Err(e) if *e.kind() == IntErrorKind::PosOverflow => i32::MAX,
                    Err(_) => 0,
                }
            }
            BookingField::SpecialRequests => self.special_requests = value.to_string(),
        }
    }

    pub fn parsed_start_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.start_date.trim(), START_DATE_FORMAT).ok()
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

// Every rule runs; the result carries one error per failing field
pub fn validate_booking(form: &BookingFormData, today: NaiveDate) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if form.full_name.trim().is_empty() {
        errors.insert(BookingField::FullName, ValidationError::Required);
    }

    if form.email.trim().is_empty() {
        errors.insert(BookingField::Email, ValidationError::Required);
    } else if !is_valid_email(&form.email) {
        errors.insert(BookingField::Email, ValidationError::InvalidFormat);
    }

    if form.phone.trim().is_empty() {
        errors.insert(BookingField::Phone, ValidationError::Required);
    }

    if form.nationality.trim().is_empty() {
        errors.insert(BookingField::Nationality, ValidationError::Required);
    }

    // Catalog membership is not re-checked here
    if form.trek_id.is_empty() {
        errors.insert(BookingField::TrekId, ValidationError::Required);
    }

    if form.start_date.is_empty() {
        errors.insert(BookingField::StartDate, ValidationError::Required);
    } else {
        match form.parsed_start_date() {
            // Today is still bookable
            Some(start) if start < today => {
                errors.insert(BookingField::StartDate, ValidationError::MustBeFuture)
            }
            Some(_) => {}
            None => errors.insert(BookingField::StartDate, ValidationError::InvalidFormat),
        }
    }

    // The UI caps the party at 20; that cap is not a validation rule
    if form.number_of_people < 1 {
        errors.insert(BookingField::NumberOfPeople, ValidationError::MustBePositive);
    }

    if !errors.is_empty() {
        debug!(errors = errors.len(), "booking form failed validation");
    }

    errors
}

pub fn validate_booking_today(form: &BookingFormData) -> FieldErrors {
    validate_booking(form, chrono::Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use test_case::test_case;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    fn valid_form() -> BookingFormData {
        BookingFormData {
            full_name: "Pema Sherpa".to_string(),
            email: "pema@example.com".to_string(),
            phone: "+977 980 000 0000".to_string(),
            nationality: "Nepali".to_string(),
            trek_id: "everest-base-camp".to_string(),
            start_date: "2026-04-01".to_string(),
            number_of_people: 2,
            special_requests: String::new(),
        }
    }

    #[test]
    fn test_valid_form_passes() {
        let errors = validate_booking(&valid_form(), today());
        assert!(errors.is_empty(), "Unexpected errors: {:?}", errors);
    }

    #[test]
    fn test_every_field_fails_together() {
        let form = BookingFormData {
            full_name: String::new(),
            email: "bad".to_string(),
            phone: String::new(),
            nationality: String::new(),
            trek_id: String::new(),
            start_date: String::new(),
            number_of_people: 0,
            special_requests: String::new(),
        };

        let errors = validate_booking(&form, today());
        assert_eq!(errors.len(), 7);
        assert_eq!(errors.get(BookingField::FullName), Some(ValidationError::Required));
        assert_eq!(errors.get(BookingField::Email), Some(ValidationError::InvalidFormat));
        assert_eq!(errors.get(BookingField::Phone), Some(ValidationError::Required));
        assert_eq!(errors.get(BookingField::Nationality), Some(ValidationError::Required));
        assert_eq!(errors.get(BookingField::TrekId), Some(ValidationError::Required));
        assert_eq!(errors.get(BookingField::StartDate), Some(ValidationError::Required));
        assert_eq!(
            errors.get(BookingField::NumberOfPeople),
            Some(ValidationError::MustBePositive)
        );
        assert_eq!(errors.get(BookingField::SpecialRequests), None);
    }

    #[test]
    fn test_start_date_today_is_accepted() {
        let mut form = valid_form();
        form.start_date = today().format(START_DATE_FORMAT).to_string();
        assert!(validate_booking(&form, today()).is_empty());
    }

    #[test]
    fn test_start_date_yesterday_is_rejected() {
        let mut form = valid_form();
        form.start_date = (today() - Duration::days(1))
            .format(START_DATE_FORMAT)
            .to_string();

        let errors = validate_booking(&form, today());
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get(BookingField::StartDate),
            Some(ValidationError::MustBeFuture)
        );
        assert_eq!(
            errors.message(BookingField::StartDate),
            Some("Start date must be in the future")
        );
    }

    #[test]
    fn test_start_date_against_real_clock() {
        let mut form = valid_form();
        form.start_date = "2100-01-01".to_string();
        assert!(validate_booking_today(&form).is_empty());

        form.start_date = "2000-01-01".to_string();
        assert_eq!(
            validate_booking_today(&form).get(BookingField::StartDate),
            Some(ValidationError::MustBeFuture)
        );
    }

    #[test_case("14/03/2026"; "#1 Day first")]
    #[test_case("2026-02-30"; "#2 Impossible date")]
    #[test_case("soon"; "#3 Not a date")]
    fn test_unparseable_start_date(value: &str) {
        let mut form = valid_form();
        form.start_date = value.to_string();
        let errors = validate_booking(&form, today());
        assert_eq!(
            errors.get(BookingField::StartDate),
            Some(ValidationError::InvalidFormat)
        );
    }

    #[test_case("a@b.co", true; "#1 Minimal")]
    #[test_case("first.last+tag@mail.example.org", true; "#2 Subdomains and tag")]
    #[test_case("bad", false; "#3 No at sign")]
    #[test_case("a@b", false; "#4 No dot after at")]
    #[test_case("a b@c.d", false; "#5 Space in local part")]
    #[test_case("a@@b.c", false; "#6 Double at")]
    #[test_case("@b.c", false; "#7 Empty local part")]
    fn test_email_shape(email: &str, expected: bool) {
        assert_eq!(is_valid_email(email), expected);
    }

    #[test]
    fn test_whitespace_only_counts_as_empty() {
        let mut form = valid_form();
        form.full_name = "   ".to_string();
        form.email = " \t".to_string();
        form.phone = " ".to_string();
        form.nationality = "\n".to_string();

        let errors = validate_booking(&form, today());
        assert_eq!(errors.get(BookingField::FullName), Some(ValidationError::Required));
        assert_eq!(errors.get(BookingField::Email), Some(ValidationError::Required));
        assert_eq!(errors.get(BookingField::Phone), Some(ValidationError::Required));
        assert_eq!(errors.get(BookingField::Nationality), Some(ValidationError::Required));
    }

    #[test_case(0, false; "#1 Zero")]
    #[test_case(-3, false; "#2 Negative")]
    #[test_case(1, true; "#3 Single trekker")]
    #[test_case(35, true; "#4 Above the UI cap")]
    fn test_number_of_people(people: i32, valid: bool) {
        let mut form = valid_form();
        form.number_of_people = people;
        assert_eq!(validate_booking(&form, today()).is_empty(), valid);
    }

    #[test]
    fn test_trek_id_is_not_checked_against_catalog() {
        let mut form = valid_form();
        form.trek_id = "k2-base-camp".to_string();
        assert!(validate_booking(&form, today()).is_empty());
    }

    #[test]
    fn test_set_fields_from_raw_input() {
        let mut form = BookingFormData::for_trek("mardi-himal");
        assert_eq!(form.trek_id, "mardi-himal");
        assert_eq!(form.number_of_people, 1);

        form.set(BookingField::NumberOfPeople, " 4 ");
        assert_eq!(form.number_of_people, 4);
        form.set(BookingField::NumberOfPeople, "four");
        assert_eq!(form.number_of_people, 0);

        let field = BookingField::from_name("specialRequests").unwrap();
        form.set(field, "Vegetarian meals");
        assert_eq!(form.special_requests, "Vegetarian meals");
        assert!(BookingField::from_name("favouriteColour").is_none());
    }

    #[test_case("99999999999", i32::MAX; "#1 Too large saturates")]
    #[test_case("-99999999999", 0; "#2 Too small is rejected")]
    #[test_case("2147483647", i32::MAX; "#3 Largest i32")]
    fn test_party_size_out_of_range(raw: &str, expected: i32) {
        let mut form = valid_form();
        form.set(BookingField::NumberOfPeople, raw);
        assert_eq!(form.number_of_people, expected);
    }

    #[test]
    fn test_huge_party_size_is_not_reported_as_missing() {
        let mut form = valid_form();
        form.set(BookingField::NumberOfPeople, "99999999999");
        assert!(validate_booking(&form, today()).is_empty());

        form.set(BookingField::NumberOfPeople, "-99999999999");
        assert_eq!(
            validate_booking(&form, today()).get(BookingField::NumberOfPeople),
            Some(ValidationError::MustBePositive)
        );
    }

    #[test]
    fn test_field_errors_messages_and_clear() {
        let mut errors = validate_booking(&BookingFormData::default(), today());
        assert_eq!(errors.message(BookingField::TrekId), Some("Please select a trek"));
        assert_eq!(errors.message(BookingField::Email), Some("Email is required"));

        assert!(errors.clear(BookingField::TrekId));
        assert!(!errors.clear(BookingField::TrekId));
        assert_eq!(errors.message(BookingField::TrekId), None);

        let fields: Vec<BookingField> = errors.messages().into_iter().map(|(f, _)| f).collect();
        assert_eq!(
            fields,
            vec![
                BookingField::FullName,
                BookingField::Email,
                BookingField::Phone,
                BookingField::Nationality,
                BookingField::StartDate,
            ]
        );
    }

    #[test]
    fn test_form_data_json_shape() {
        let json = serde_json::to_value(valid_form()).unwrap();
        assert_eq!(json["fullName"], "Pema Sherpa");
        assert_eq!(json["numberOfPeople"], 2);

        let errors = validate_booking(&BookingFormData::default(), today());
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["trekId"], "required");
        assert!(json.get("numberOfPeople").is_none());
    }
}
