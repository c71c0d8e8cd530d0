use crate::error::TooltipError;
use crate::models::BookingDetails;

/// Bookings shown on the demo page, embedded at build time
///
/// # Errors
///
/// Returns an error if the embedded JSON does not parse
pub fn sample_bookings() -> Result<Vec<BookingDetails>, TooltipError> {
    parse_bookings(include_str!("../test-data/bookings.json"))
}

/// Parse a JSON array of booking payloads
///
/// # Errors
///
/// Returns `MalformedPayload` if the JSON is not an array of booking objects
pub fn parse_bookings(json: &str) -> Result<Vec<BookingDetails>, TooltipError> {
    Ok(serde_json::from_str(json)?)
}
