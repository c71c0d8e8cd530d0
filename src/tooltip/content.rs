use std::fmt;
use crate::models::{BookingDetails, BookingPayload, FieldValue, PayloadSource};

/// One labeled line of the tooltip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipRow {
    pub label: &'static str,
    pub value: String,
}

impl fmt::Display for TooltipRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.value)
    }
}

/// Rendered tooltip text, independent of the DOM
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TooltipContent {
    pub rows: Vec<TooltipRow>,
}

type FieldGetter = fn(&BookingDetails) -> Option<&FieldValue>;

const STRUCTURED_FIELDS: &[(&str, FieldGetter)] = &[
    ("Guest", |d| d.guest_name.as_ref()),
    ("Apartment", |d| d.apartment_name.as_ref()),
    ("Check-in", |d| d.check_in.as_ref()),
    ("Check-out", |d| d.check_out.as_ref()),
    ("Guests", |d| d.guests.as_ref()),
    ("Adults", |d| d.adults.as_ref()),
    ("Children", |d| d.children.as_ref()),
    ("Total Price", |d| d.total_price.as_ref()),
    ("Phone", |d| d.phone_number.as_ref()),
    ("Email", |d| d.email.as_ref()),
    ("Language", |d| d.language.as_ref()),
    ("Channel", |d| d.channel_name.as_ref()),
    ("Notes", |d| d.assistant_notice.as_ref()),
];

/// Shown after the structured fields only when the payload carries them
const STRUCTURED_EXTRA_FIELDS: &[(&str, FieldGetter)] = &[
    ("Status", |d| d.status.as_ref()),
    ("Type", |d| d.booking_type.as_ref()),
];

const ATTRIBUTE_FIELDS: &[(&str, FieldGetter)] = &[
    ("Check-in", |d| d.check_in.as_ref()),
    ("Check-out", |d| d.check_out.as_ref()),
    ("Guests", |d| d.guests.as_ref()),
    ("Total Price", |d| d.total_price.as_ref()),
    ("Status", |d| d.status.as_ref()),
    ("Type", |d| d.booking_type.as_ref()),
];

impl TooltipContent {
    /// Render every field for the payload's source, using `placeholder` for missing ones
    #[must_use]
    pub fn from_payload(payload: &BookingPayload, placeholder: &str) -> Self {
        let fields = match payload.source {
            PayloadSource::Structured => STRUCTURED_FIELDS,
            PayloadSource::Attributes => ATTRIBUTE_FIELDS,
        };

        let details = &payload.details;
        let mut rows: Vec<TooltipRow> = fields
            .iter()
            .map(|&(label, get)| TooltipRow {
                label,
                value: present_text(get(details)).unwrap_or_else(|| placeholder.to_string()),
            })
            .collect();

        if payload.source == PayloadSource::Structured {
            rows.extend(
                STRUCTURED_EXTRA_FIELDS
                    .iter()
                    .filter_map(|&(label, get)| Some(TooltipRow { label, value: present_text(get(details))? })),
            );
        }

        Self { rows }
    }

    /// Rows as `Label: value` lines
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.rows.iter().map(ToString::to_string).collect()
    }
}

fn present_text(value: Option<&FieldValue>) -> Option<String> {
    value.map(ToString::to_string).filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn structured(json: &str) -> BookingPayload {
        BookingPayload {
            source: PayloadSource::Structured,
            details: BookingDetails::from_json(json).unwrap(),
        }
    }

    #[test]
    fn test_missing_price_uses_placeholder() {
        let payload = structured(
            r#"{"guest_name": "Jane Doe", "check_in": "2024-01-01", "check_out": "2024-01-05", "guests": 2}"#,
        );
        let lines = TooltipContent::from_payload(&payload, "N/A").lines();

        assert!(lines.contains(&"Total Price: N/A".to_string()));
        assert!(lines.contains(&"Guest: Jane Doe".to_string()));
        assert!(lines.contains(&"Check-in: 2024-01-01".to_string()));
        assert!(lines.contains(&"Check-out: 2024-01-05".to_string()));
        assert!(lines.contains(&"Guests: 2".to_string()));
    }

    #[test]
    fn test_structured_field_order() {
        let content = TooltipContent::from_payload(&structured("{}"), "N/A");
        let labels: Vec<_> = content.rows.iter().map(|r| r.label).collect();
        assert_eq!(labels.first(), Some(&"Guest"));
        assert_eq!(labels.last(), Some(&"Notes"));
        assert_eq!(labels.len(), 13);
        assert!(content.rows.iter().all(|r| r.value == "N/A"));
    }

    #[test]
    fn test_structured_status_and_type_when_present() {
        let content = TooltipContent::from_payload(
            &structured(r#"{"guest_name": "Ana", "status": "confirmed", "type": "reservation"}"#),
            "N/A",
        );
        let lines = content.lines();
        assert_eq!(lines.len(), 15);
        assert_eq!(lines[13], "Status: confirmed");
        assert_eq!(lines[14], "Type: reservation");

        let status_only = TooltipContent::from_payload(&structured(r#"{"status": "cancelled", "type": " "}"#), "N/A");
        assert_eq!(status_only.rows.len(), 14);
        assert_eq!(status_only.rows.last().map(ToString::to_string).as_deref(), Some("Status: cancelled"));
    }

    #[test]
    fn test_blank_value_uses_placeholder() {
        let content = TooltipContent::from_payload(&structured(r#"{"email": "  "}"#), "-");
        let email = content.rows.iter().find(|r| r.label == "Email").unwrap();
        assert_eq!(email.value, "-");
    }

    #[test]
    fn test_attribute_source_rows() {
        let payload = BookingPayload {
            source: PayloadSource::Attributes,
            details: BookingDetails::from_attributes(|name| match name {
                "data-guests" => Some("3".to_string()),
                "data-status" => Some("confirmed".to_string()),
                _ => None,
            }),
        };
        let lines = TooltipContent::from_payload(&payload, "N/A").lines();
        assert_eq!(
            lines,
            vec![
                "Check-in: N/A",
                "Check-out: N/A",
                "Guests: 3",
                "Total Price: N/A",
                "Status: confirmed",
                "Type: N/A",
            ]
        );
    }
}
