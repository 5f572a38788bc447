//! Booking request validation.
//!
//! Rules run in a fixed order and stop at the first failure, so a client
//! always sees the same message for the same input. Field size caps are the
//! last rule.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use parish_core::error::AppError;
use parish_core::result::AppResult;
use parish_entity::{NewReservation, PaymentMethod, time_of_day};

use crate::availability::parse_date;
use crate::context::RequestContext;

/// Longest accepted intention text, in characters.
pub const MAX_INTENTION_LENGTH: usize = 1000;

/// A booking request as received, before any checks.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    /// `YYYY-MM-DD`.
    pub date: Option<String>,
    /// `HH:MM` or `HH:MM:SS`.
    pub time: Option<String>,
    /// Given name.
    #[validate(length(max = 100, message = "firstName must be at most 100 characters"))]
    pub first_name: Option<String>,
    /// Family name.
    #[validate(length(max = 100, message = "lastName must be at most 100 characters"))]
    pub last_name: Option<String>,
    /// 8-digit national ID.
    pub national_id: Option<String>,
    /// Phone.
    #[validate(length(max = 30, message = "phone must be at most 30 characters"))]
    pub phone: Option<String>,
    /// Email.
    #[validate(length(max = 254, message = "email must be at most 254 characters"))]
    pub email: Option<String>,
    /// Mass type code.
    #[validate(length(max = 50, message = "massTypeCode must be at most 50 characters"))]
    pub mass_type_code: Option<String>,
    /// Intention text.
    pub intention: Option<String>,
    /// Names of the deceased.
    #[validate(length(max = 500, message = "deceasedNames must be at most 500 characters"))]
    pub deceased_names: Option<String>,
    /// Requester notes.
    #[validate(length(max = 1000, message = "notes must be at most 1000 characters"))]
    pub notes: Option<String>,
    /// Claimed payment method.
    pub payment_method: Option<String>,
    /// Proof-of-payment reference.
    #[validate(length(max = 500, message = "proofOfPaymentRef must be at most 500 characters"))]
    pub proof_of_payment_ref: Option<String>,
}

/// Flatten validator output into one sentence per failed rule, sorted.
pub fn validation_message(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Whether `value` is exactly 8 ASCII digits.
pub fn is_valid_national_id(value: &str) -> bool {
    value.len() == 8 && value.bytes().all(|b| b.is_ascii_digit())
}

/// Whether `value` has the `local@domain.tld` shape.
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty()
        && host.split('.').all(|label| !label.is_empty())
        && tld.len() >= 2
        && tld.chars().all(|c| c.is_ascii_alphabetic())
}

/// Check `request` against `today` and turn it into a storable reservation.
pub fn validate_booking(
    request: BookingRequest,
    today: NaiveDate,
    min_intention_length: usize,
    ctx: &RequestContext,
) -> AppResult<NewReservation> {
    let required = [
        ("date", &request.date),
        ("time", &request.time),
        ("firstName", &request.first_name),
        ("lastName", &request.last_name),
        ("nationalId", &request.national_id),
        ("phone", &request.phone),
        ("email", &request.email),
        ("massTypeCode", &request.mass_type_code),
        ("intention", &request.intention),
        ("paymentMethod", &request.payment_method),
    ];
    let missing: Vec<&str> = required
        .iter()
        .filter(|(_, value)| present(value).is_none())
        .map(|(name, _)| *name)
        .collect();
    if !missing.is_empty() {
        return Err(AppError::validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    let field = |value: &Option<String>| present(value).unwrap_or_default().to_string();

    let date = parse_date(&field(&request.date))?;
    if date < today {
        return Err(AppError::validation(
            "Reservations cannot be made for past dates",
        ));
    }

    let national_id = field(&request.national_id);
    if !is_valid_national_id(&national_id) {
        return Err(AppError::validation("National ID must be exactly 8 digits"));
    }

    let email = field(&request.email);
    if !is_valid_email(&email) {
        return Err(AppError::validation("Email address is not valid"));
    }

    let time = time_of_day::parse(&field(&request.time))
        .ok_or_else(|| AppError::validation("Time must use the HH:MM format"))?;

    let payment_method: PaymentMethod = field(&request.payment_method)
        .parse()
        .map_err(|_| AppError::validation("Unknown payment method"))?;

    let intention = field(&request.intention);
    let intention_length = intention.chars().count();
    if intention_length < min_intention_length {
        return Err(AppError::validation(format!(
            "Intention must be at least {min_intention_length} characters"
        )));
    }
    if intention_length > MAX_INTENTION_LENGTH {
        return Err(AppError::validation(format!(
            "Intention must be at most {MAX_INTENTION_LENGTH} characters"
        )));
    }

    request
        .validate()
        .map_err(|e| AppError::validation(validation_message(&e)))?;

    Ok(NewReservation {
        date,
        time,
        first_name: field(&request.first_name),
        last_name: field(&request.last_name),
        national_id,
        phone: field(&request.phone),
        email,
        mass_type_code: field(&request.mass_type_code),
        intention,
        deceased_names: optional(request.deceased_names),
        notes: optional(request.notes),
        payment_method,
        proof_of_payment_url: optional(request.proof_of_payment_ref),
        client_ip: ctx.ip_address.clone(),
        user_agent: ctx.user_agent.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date")
    }

    fn request() -> BookingRequest {
        BookingRequest {
            date: Some("2024-06-02".to_string()),
            time: Some("09:00".to_string()),
            first_name: Some(" Ana ".to_string()),
            last_name: Some("Quispe".to_string()),
            national_id: Some("12345678".to_string()),
            phone: Some("999888777".to_string()),
            email: Some("a@b.com".to_string()),
            mass_type_code: Some("accion_gracias".to_string()),
            intention: Some("For the health of the family".to_string()),
            deceased_names: Some("  ".to_string()),
            notes: None,
            payment_method: Some("cash".to_string()),
            proof_of_payment_ref: None,
        }
    }

    fn message(request: BookingRequest) -> String {
        validate_booking(request, today(), 10, &RequestContext::default())
            .expect_err("should be rejected")
            .message
    }

    #[test]
    fn test_valid_request() {
        let ctx = RequestContext::new(Some("10.0.0.1".to_string()), None);
        let booking = validate_booking(request(), today(), 10, &ctx).expect("valid");
        assert_eq!(booking.first_name, "Ana");
        assert_eq!(booking.deceased_names, None);
        assert_eq!(booking.payment_method, PaymentMethod::Cash);
        assert_eq!(booking.client_ip.as_deref(), Some("10.0.0.1"));
    }

    #[test]
    fn test_today_is_allowed_past_is_not() {
        let mut req = request();
        req.date = Some("2024-06-01".to_string());
        assert!(validate_booking(req, today(), 10, &RequestContext::default()).is_ok());

        let mut req = request();
        req.date = Some("2024-05-31".to_string());
        assert_eq!(message(req), "Reservations cannot be made for past dates");
    }

    #[test]
    fn test_missing_fields_are_listed() {
        let mut req = request();
        req.email = None;
        req.time = Some("   ".to_string());
        assert_eq!(message(req), "Missing required fields: time, email");
    }

    #[test]
    fn test_national_id_shape() {
        assert!(is_valid_national_id("12345678"));
        assert!(!is_valid_national_id("1234567"));
        assert!(!is_valid_national_id("12345678a"));
        assert!(!is_valid_national_id("1234567a"));

        let mut req = request();
        req.national_id = Some("1234567".to_string());
        assert_eq!(message(req), "National ID must be exactly 8 digits");
    }

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("maria.lopez@parroquia.org.pe"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@b@c.com"));
    }

    #[test]
    fn test_rules_run_in_order() {
        let mut req = request();
        req.date = Some("2024-05-01".to_string());
        req.national_id = Some("1".to_string());
        req.email = Some("a@b".to_string());
        assert_eq!(message(req), "Reservations cannot be made for past dates");

        let mut req = request();
        req.national_id = Some("1".to_string());
        req.email = Some("a@b".to_string());
        assert_eq!(message(req), "National ID must be exactly 8 digits");
    }

    #[test]
    fn test_payment_and_intention() {
        let mut req = request();
        req.payment_method = Some("bitcoin".to_string());
        assert_eq!(message(req), "Unknown payment method");

        let mut req = request();
        req.intention = Some("short".to_string());
        assert_eq!(message(req), "Intention must be at least 10 characters");

        let mut req = request();
        req.intention = Some("x".repeat(MAX_INTENTION_LENGTH + 1));
        assert_eq!(message(req), "Intention must be at most 1000 characters");
    }

    #[test]
    fn test_size_caps_run_after_ordered_rules() {
        let mut req = request();
        req.date = Some("2024-06-02T09:00:00.000000Z".to_string());
        req.first_name = Some("x".repeat(101));
        assert_eq!(message(req), "Date must use the YYYY-MM-DD format");

        let mut req = request();
        req.date = Some("2024-05-31".to_string());
        req.notes = Some("x".repeat(1001));
        assert_eq!(message(req), "Reservations cannot be made for past dates");

        let mut req = request();
        req.first_name = Some("x".repeat(101));
        req.phone = Some("9".repeat(31));
        assert_eq!(
            message(req),
            "firstName must be at most 100 characters; phone must be at most 30 characters"
        );
    }

    #[test]
    fn test_bad_time() {
        let mut req = request();
        req.time = Some("9am".to_string());
        assert_eq!(message(req), "Time must use the HH:MM format");
    }
}
