//! # Dealer Assignment
//!
//! The JSON blob the checkout extension stores under
//! [`ASSIGNMENT_ATTRIBUTE_KEY`](crate::ASSIGNMENT_ATTRIBUTE_KEY), and its parser.
//!
//! ## Blob Shape
//! ```json
//! {
//!   "dealerId": "dealer_3",
//!   "dealerName": "Complete Watersports",
//!   "consultation": {
//!     "type": "product_selection",
//!     "preferredDate": "2026-11-02",
//!     "preferredTime": "10:00",
//!     "contactMethod": "phone",
//!     "notes": ""
//!   },
//!   "deliveryInstructions": "",
//!   "setupPreference": "dealer_setup",
//!   "timestamp": "2026-10-15T09:12:44.120Z"
//! }
//! ```
//!
//! Decoding is permissive: every field may be missing or `null`, unknown
//! fields are ignored, and consultation strings stay raw so that the rule
//! engine (not the parser) decides what is valid. Only `dealerId` must be a
//! string when present.
//!
//! ## Off-type Values
//! ```text
//! type / preferredDate / preferredTime   non-string ──► raw JSON text
//! every other field                      non-string ──► None
//! consultation                           non-object ──► None
//! ```

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ParseError;

// =============================================================================
// Consultation Enums
// =============================================================================

/// The advisory sessions a dealer offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ConsultationType {
    ProductSelection,
    TechnicalSetup,
    SkillAssessment,
    LocalConditions,
}

impl ConsultationType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConsultationType::ProductSelection => "product_selection",
            ConsultationType::TechnicalSetup => "technical_setup",
            ConsultationType::SkillAssessment => "skill_assessment",
            ConsultationType::LocalConditions => "local_conditions",
        }
    }
}

impl fmt::Display for ConsultationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown consultation type names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown consultation type: '{0}'")]
pub struct UnknownConsultationType(pub String);

impl FromStr for ConsultationType {
    type Err = UnknownConsultationType;

    /// Exact wire names only; the checkout extension never sends variants.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "product_selection" => Ok(ConsultationType::ProductSelection),
            "technical_setup" => Ok(ConsultationType::TechnicalSetup),
            "skill_assessment" => Ok(ConsultationType::SkillAssessment),
            "local_conditions" => Ok(ConsultationType::LocalConditions),
            other => Err(UnknownConsultationType(other.to_string())),
        }
    }
}

/// How the dealer should reach the shopper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ContactMethod {
    Phone,
    Email,
    VideoCall,
}

impl ContactMethod {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ContactMethod::Phone => "phone",
            ContactMethod::Email => "email",
            ContactMethod::VideoCall => "video_call",
        }
    }
}

impl fmt::Display for ContactMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown contact method names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown contact method: '{0}'")]
pub struct UnknownContactMethod(pub String);

impl FromStr for ContactMethod {
    type Err = UnknownContactMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "phone" => Ok(ContactMethod::Phone),
            "email" => Ok(ContactMethod::Email),
            "video_call" => Ok(ContactMethod::VideoCall),
            other => Err(UnknownContactMethod(other.to_string())),
        }
    }
}

// =============================================================================
// Consultation
// =============================================================================

/// A requested advisory session, exactly as the shopper submitted it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Consultation {
    /// Raw session type; see [`Consultation::consultation_type`].
    #[serde(rename = "type", default, deserialize_with = "raw_text")]
    pub kind: Option<String>,

    /// Calendar date, `YYYY-MM-DD` (RFC 3339 timestamps also accepted).
    #[serde(default, deserialize_with = "raw_text")]
    pub preferred_date: Option<String>,

    /// Time of day, `HH:MM`.
    #[serde(default, deserialize_with = "raw_text")]
    pub preferred_time: Option<String>,

    #[serde(default, deserialize_with = "string_or_none")]
    pub contact_method: Option<String>,

    #[serde(default, deserialize_with = "string_or_none")]
    pub notes: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl Consultation {
    /// True when type, date and time are all present and non-empty.
    pub fn is_complete(&self) -> bool {
        non_empty(&self.kind).is_some()
            && non_empty(&self.preferred_date).is_some()
            && non_empty(&self.preferred_time).is_some()
    }

    /// The session type, if it is one of the four offered.
    pub fn consultation_type(&self) -> Option<ConsultationType> {
        non_empty(&self.kind).and_then(|kind| kind.parse().ok())
    }

    pub fn contact_method(&self) -> Option<ContactMethod> {
        non_empty(&self.contact_method).and_then(|method| method.parse().ok())
    }

    pub fn notes(&self) -> Option<&str> {
        non_empty(&self.notes)
    }

    /// The instant the preferred date begins.
    ///
    /// Date-only values start at midnight UTC. Full RFC 3339 timestamps are
    /// taken as-is. Anything else yields `None`.
    ///
    /// ## Example
    /// ```rust
    /// use dealer_core::Consultation;
    ///
    /// let consultation = Consultation {
    ///     preferred_date: Some("2026-11-02".to_string()),
    ///     ..Default::default()
    /// };
    /// let start = consultation.scheduled_instant().unwrap();
    /// assert_eq!(start.to_rfc3339(), "2026-11-02T00:00:00+00:00");
    /// ```
    pub fn scheduled_instant(&self) -> Option<DateTime<Utc>> {
        let raw = non_empty(&self.preferred_date)?.trim();

        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return date
                .and_hms_opt(0, 0, 0)
                .map(|midnight| Utc.from_utc_datetime(&midnight));
        }

        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|instant| instant.with_timezone(&Utc))
    }
}

// =============================================================================
// Dealer Assignment
// =============================================================================

/// The shopper's dealer choice plus optional consultation booking.
///
/// Built once per validation call, never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DealerAssignment {
    #[serde(default)]
    pub dealer_id: Option<String>,

    #[serde(default, deserialize_with = "string_or_none")]
    pub dealer_name: Option<String>,

    #[serde(default, deserialize_with = "object_or_none")]
    pub consultation: Option<Consultation>,

    /// Passed through to the order, not validated.
    #[serde(default, deserialize_with = "string_or_none")]
    pub delivery_instructions: Option<String>,

    /// Passed through to the order, not validated.
    #[serde(default, deserialize_with = "string_or_none")]
    pub setup_preference: Option<String>,

    /// When the extension last wrote the blob (ISO-8601, not validated).
    #[serde(default, deserialize_with = "string_or_none")]
    pub timestamp: Option<String>,
}

impl DealerAssignment {
    /// The selected dealer id, if one was chosen.
    pub fn dealer_id(&self) -> Option<&str> {
        non_empty(&self.dealer_id)
    }

    pub fn delivery_instructions(&self) -> Option<&str> {
        non_empty(&self.delivery_instructions)
    }

    pub fn setup_preference(&self) -> Option<&str> {
        non_empty(&self.setup_preference)
    }
}

// =============================================================================
// Lenient Field Decoders
// =============================================================================

/// Strings as-is, `null` as `None`, any other value as its JSON text.
fn raw_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

fn string_or_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn object_or_none<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Consultation>, D::Error> {
    match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => Consultation::deserialize(value)
            .map(Some)
            .map_err(<D::Error as de::Error>::custom),
        _ => Ok(None),
    }
}

// =============================================================================
// Parser
// =============================================================================

/// Decodes the cart attribute value.
///
/// ## Outcomes
/// ```text
/// None / ""             ──► Ok(None)              (no assignment)
/// JSON object           ──► Ok(Some(assignment))
/// anything else         ──► Err(ParseError)       (malformed)
/// ```
///
/// ## Example
/// ```rust
/// use dealer_core::parse_assignment;
///
/// assert!(parse_assignment(None).unwrap().is_none());
///
/// let assignment = parse_assignment(Some(r#"{"dealerId":"dealer_1","extra":1}"#))
///     .unwrap()
///     .unwrap();
/// assert_eq!(assignment.dealer_id(), Some("dealer_1"));
///
/// assert!(parse_assignment(Some("{not json")).is_err());
/// ```
pub fn parse_assignment(raw: Option<&str>) -> Result<Option<DealerAssignment>, ParseError> {
    match raw {
        None | Some("") => Ok(None),
        Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_blob() {
        let raw = r#"{
            "dealerId": "dealer_3",
            "dealerName": "Complete Watersports",
            "consultation": {
                "type": "technical_setup",
                "preferredDate": "2026-11-02",
                "preferredTime": "14:00",
                "contactMethod": "video_call",
                "notes": "New to foiling"
            },
            "deliveryInstructions": "Leave at the shop",
            "setupPreference": "dealer_setup",
            "timestamp": "2026-10-15T09:12:44.120Z"
        }"#;

        let assignment = parse_assignment(Some(raw)).unwrap().unwrap();
        assert_eq!(assignment.dealer_id(), Some("dealer_3"));
        assert_eq!(assignment.setup_preference(), Some("dealer_setup"));

        let consultation = assignment.consultation.unwrap();
        assert!(consultation.is_complete());
        assert_eq!(
            consultation.consultation_type(),
            Some(ConsultationType::TechnicalSetup)
        );
        assert_eq!(consultation.contact_method(), Some(ContactMethod::VideoCall));
        assert_eq!(consultation.notes(), Some("New to foiling"));
    }

    #[test]
    fn test_parse_nulls_and_missing_fields() {
        let raw = r#"{"dealerId": null, "consultation": null, "deliveryInstructions": ""}"#;
        let assignment = parse_assignment(Some(raw)).unwrap().unwrap();
        assert_eq!(assignment.dealer_id(), None);
        assert!(assignment.consultation.is_none());
        assert_eq!(assignment.delivery_instructions(), None);

        let assignment = parse_assignment(Some("{}")).unwrap().unwrap();
        assert_eq!(assignment, DealerAssignment::default());
    }

    #[test]
    fn test_empty_dealer_id_is_not_selected() {
        let assignment = parse_assignment(Some(r#"{"dealerId": ""}"#))
            .unwrap()
            .unwrap();
        assert_eq!(assignment.dealer_id(), None);
    }

    #[test]
    fn test_parse_absent_or_empty() {
        assert_eq!(parse_assignment(None).unwrap(), None);
        assert_eq!(parse_assignment(Some("")).unwrap(), None);
    }

    #[test]
    fn test_parse_malformed() {
        assert!(parse_assignment(Some("{not json")).is_err());
        assert!(parse_assignment(Some("null")).is_err());
        assert!(parse_assignment(Some("[1, 2]")).is_err());
        // dealerId must be a string when present
        assert!(parse_assignment(Some(r#"{"dealerId": 7}"#)).is_err());
    }

    #[test]
    fn test_unknown_consultation_values_survive_parsing() {
        let raw = r#"{"dealerId":"dealer_1","consultation":{"type":"surf_lesson","contactMethod":"pigeon"}}"#;
        let consultation = parse_assignment(Some(raw))
            .unwrap()
            .unwrap()
            .consultation
            .unwrap();
        assert_eq!(consultation.kind.as_deref(), Some("surf_lesson"));
        assert_eq!(consultation.consultation_type(), None);
        assert_eq!(consultation.contact_method(), None);
        assert!(!consultation.is_complete());
    }

    #[test]
    fn test_scheduled_instant() {
        let mut consultation = Consultation {
            preferred_date: Some("2026-11-02T15:30:00-07:00".to_string()),
            ..Default::default()
        };
        assert_eq!(
            consultation.scheduled_instant().unwrap().to_rfc3339(),
            "2026-11-02T22:30:00+00:00"
        );

        consultation.preferred_date = Some("next tuesday".to_string());
        assert_eq!(consultation.scheduled_instant(), None);

        consultation.preferred_date = None;
        assert_eq!(consultation.scheduled_instant(), None);
    }

    #[test]
    fn test_consultation_type_names() {
        for kind in [
            ConsultationType::ProductSelection,
            ConsultationType::TechnicalSetup,
            ConsultationType::SkillAssessment,
            ConsultationType::LocalConditions,
        ] {
            assert_eq!(kind.as_str().parse::<ConsultationType>(), Ok(kind));
        }
        assert_eq!(
            "Product_Selection".parse::<ConsultationType>(),
            Err(UnknownConsultationType("Product_Selection".to_string()))
        );
    }

    #[test]
    fn test_contact_method_names() {
        for method in [ContactMethod::Phone, ContactMethod::Email, ContactMethod::VideoCall] {
            assert_eq!(method.to_string().parse::<ContactMethod>(), Ok(method));
        }
        let err = "pigeon".parse::<ContactMethod>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown contact method: 'pigeon'");
    }

    #[test]
    fn test_off_type_pass_through_fields_are_dropped() {
        let raw = r#"{
            "dealerId": "dealer_3",
            "dealerName": 42,
            "deliveryInstructions": ["porch"],
            "setupPreference": true,
            "timestamp": 1760519564120
        }"#;
        let assignment = parse_assignment(Some(raw)).unwrap().unwrap();
        assert_eq!(assignment.dealer_id(), Some("dealer_3"));
        assert_eq!(assignment.dealer_name, None);
        assert_eq!(assignment.delivery_instructions(), None);
        assert_eq!(assignment.setup_preference(), None);
        assert_eq!(assignment.timestamp, None);
    }

    #[test]
    fn test_non_object_consultation_is_absent() {
        for consultation in ["false", "0", "\"soon\"", "[]"] {
            let raw = format!(r#"{{"dealerId":"dealer_1","consultation":{consultation}}}"#);
            let assignment = parse_assignment(Some(&raw)).unwrap().unwrap();
            assert!(assignment.consultation.is_none(), "{consultation}");
        }
    }

    #[test]
    fn test_off_type_consultation_values_stay_raw() {
        let raw = r#"{"dealerId":"dealer_1","consultation":{
            "type": 5, "preferredDate": 20261102, "preferredTime": "10:00",
            "contactMethod": 1, "notes": {"text": "hi"}
        }}"#;
        let consultation = parse_assignment(Some(raw))
            .unwrap()
            .unwrap()
            .consultation
            .unwrap();
        assert_eq!(consultation.kind.as_deref(), Some("5"));
        assert_eq!(consultation.preferred_date.as_deref(), Some("20261102"));
        assert!(consultation.is_complete());
        assert_eq!(consultation.consultation_type(), None);
        assert_eq!(consultation.scheduled_instant(), None);
        assert_eq!(consultation.contact_method, None);
        assert_eq!(consultation.notes(), None);
    }
}
