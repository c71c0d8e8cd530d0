use serde::{Deserialize, Serialize};
use std::fmt;
use crate::error::TooltipError;

/// Guest name the booking backend uses for blocked/owner stays
pub const UNKNOWN_GUEST: &str = "Unknown Guest";

/// A scalar value from the embedded payload.
///
/// The renderer is loose about types (`"guests": 2` and `"guests": "2"` both
/// occur), so every scalar is accepted and shown verbatim. Numbers keep
/// their JSON form: `2.0` stays `2.0` and large integers stay exact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Flag(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Booking data embedded in a booking item. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_name: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apartment_name: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_out: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guests: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adults: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_price: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_name: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assistant_notice: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<FieldValue>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub booking_type: Option<FieldValue>,
}

impl BookingDetails {
    /// Parse a structured payload.
    ///
    /// # Errors
    ///
    /// Returns `MalformedPayload` if the text is not valid JSON or not a JSON object
    pub fn from_json(json: &str) -> Result<Self, TooltipError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if !value.is_object() {
            return Err(<serde_json::Error as serde::de::Error>::custom(
                "booking payload must be a JSON object",
            )
            .into());
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Build from discrete `data-*` attributes. Never fails; absent attributes stay `None`.
    pub fn from_attributes(attribute: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| attribute(name).map(FieldValue::Text);
        Self {
            check_in: read("data-check-in"),
            check_out: read("data-check-out"),
            guests: read("data-guests"),
            total_price: read("data-total-price"),
            status: read("data-status"),
            booking_type: read("data-type"),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn guest_name_text(&self) -> String {
        text_or_empty(self.guest_name.as_ref())
    }

    #[must_use]
    pub fn apartment_name_text(&self) -> String {
        text_or_empty(self.apartment_name.as_ref())
    }

    #[must_use]
    pub fn is_unknown_guest(&self) -> bool {
        self.guest_name_text() == UNKNOWN_GUEST
    }
}

fn text_or_empty(value: Option<&FieldValue>) -> String {
    value.map(ToString::to_string).unwrap_or_default()
}

/// Which form the item supplied its data in; decides the rendered field set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadSource {
    Structured,
    Attributes,
}

/// Booking data read from one item, tagged with where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct BookingPayload {
    pub source: PayloadSource,
    pub details: BookingDetails,
}

impl BookingPayload {
    /// Read an item's payload: the structured attribute wins when present,
    /// otherwise the discrete `data-*` attributes are used.
    ///
    /// # Errors
    ///
    /// Returns `MalformedPayload` when the structured attribute does not parse
    pub fn read(
        payload_attribute: &str,
        attribute: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, TooltipError> {
        match attribute(payload_attribute) {
            Some(json) => Ok(Self {
                source: PayloadSource::Structured,
                details: BookingDetails::from_json(&json)?,
            }),
            None => Ok(Self {
                source: PayloadSource::Attributes,
                details: BookingDetails::from_attributes(attribute),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_mixed_scalar_types() {
        let details = BookingDetails::from_json(
            r#"{"guest_name": "Jane Doe", "guests": 2, "total_price": 349.5, "children": null}"#,
        )
        .unwrap();
        assert_eq!(details.guest_name_text(), "Jane Doe");
        assert_eq!(details.guests, Some(FieldValue::Number(2.into())));
        assert_eq!(details.total_price.unwrap().to_string(), "349.5");
        assert_eq!(details.children, None);
    }

    #[test]
    fn test_numbers_shown_as_written() {
        let details = BookingDetails::from_json(
            r#"{"guests": 2.0, "adults": 18446744073709551615, "children": -3, "total_price": 1e3}"#,
        )
        .unwrap();
        assert_eq!(details.guests.unwrap().to_string(), "2.0");
        assert_eq!(details.adults.unwrap().to_string(), u64::MAX.to_string());
        assert_eq!(details.children.unwrap().to_string(), "-3");
        assert_eq!(details.total_price.unwrap().to_string(), "1000.0");
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let details = BookingDetails::from_json(r#"{"check_in": "2024-01-01", "id": 77}"#).unwrap();
        assert_eq!(details.check_in, Some(FieldValue::from("2024-01-01")));
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let result = BookingDetails::from_json("{guest_name: Jane");
        assert!(matches!(result, Err(TooltipError::MalformedPayload { .. })));
    }

    #[test]
    fn test_non_object_is_malformed() {
        for json in ["[1, 2]", "\"Jane\"", "null", "42"] {
            let result = BookingDetails::from_json(json);
            assert!(matches!(result, Err(TooltipError::MalformedPayload { .. })), "{json}");
        }
    }

    #[test]
    fn test_read_prefers_structured_payload() {
        let attrs: HashMap<&str, &str> = HashMap::from([
            ("data-booking", r#"{"guest_name": "Ana"}"#),
            ("data-check-in", "2024-03-01"),
        ]);
        let payload = BookingPayload::read("data-booking", |name| {
            attrs.get(name).map(ToString::to_string)
        })
        .unwrap();
        assert_eq!(payload.source, PayloadSource::Structured);
        assert_eq!(payload.details.guest_name_text(), "Ana");
        assert_eq!(payload.details.check_in, None);
    }

    #[test]
    fn test_read_falls_back_to_attributes() {
        let attrs: HashMap<&str, &str> = HashMap::from([
            ("data-check-in", "2024-03-01"),
            ("data-status", "confirmed"),
            ("data-type", "reservation"),
        ]);
        let payload = BookingPayload::read("data-booking", |name| {
            attrs.get(name).map(ToString::to_string)
        })
        .unwrap();
        assert_eq!(payload.source, PayloadSource::Attributes);
        assert_eq!(payload.details.check_in, Some(FieldValue::from("2024-03-01")));
        assert_eq!(payload.details.status, Some(FieldValue::from("confirmed")));
        assert_eq!(payload.details.booking_type, Some(FieldValue::from("reservation")));
        assert_eq!(payload.details.total_price, None);
    }

    #[test]
    fn test_unknown_guest() {
        let details = BookingDetails {
            guest_name: Some(FieldValue::from(UNKNOWN_GUEST)),
            ..BookingDetails::default()
        };
        assert!(details.is_unknown_guest());
        assert!(!BookingDetails::default().is_unknown_guest());
    }
}
