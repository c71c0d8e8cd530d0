mod booking;

pub use booking::{BookingDetails, BookingPayload, FieldValue, PayloadSource, UNKNOWN_GUEST};
