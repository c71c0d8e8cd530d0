use chrono::NaiveDate;
use std::collections::BTreeSet;
use crate::models::{BookingDetails, FieldValue};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Filters for the booking list. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingFilter {
    /// Case-insensitive substring of the guest name
    pub guest: String,
    /// Apartment name, compared case-insensitively
    pub apartment: String,
    /// `YYYY-MM-DD` date the stay must cover (check-in to check-out, inclusive)
    pub date: String,
}

impl BookingFilter {
    #[must_use]
    pub fn matches(&self, booking: &BookingDetails) -> bool {
        if booking.is_unknown_guest() {
            return false;
        }

        let guest = self.guest.trim().to_lowercase();
        if !booking.guest_name_text().to_lowercase().contains(&guest) {
            return false;
        }

        let apartment = self.apartment.trim().to_lowercase();
        if !apartment.is_empty() && booking.apartment_name_text().to_lowercase() != apartment {
            return false;
        }

        self.covers_date(booking)
    }

    fn covers_date(&self, booking: &BookingDetails) -> bool {
        let date = self.date.trim();
        if date.is_empty() {
            return true;
        }
        let Ok(date) = NaiveDate::parse_from_str(date, DATE_FORMAT) else {
            return false;
        };

        match (parse_date(booking.check_in.as_ref()), parse_date(booking.check_out.as_ref())) {
            (Some(check_in), Some(check_out)) => (check_in..=check_out).contains(&date),
            _ => false,
        }
    }

    /// Keep the matching bookings, paired with their index in `bookings`
    #[must_use]
    pub fn apply(&self, bookings: &[BookingDetails]) -> Vec<(usize, BookingDetails)> {
        bookings
            .iter()
            .enumerate()
            .filter(|(_, booking)| self.matches(booking))
            .map(|(i, booking)| (i, booking.clone()))
            .collect()
    }
}

pub(crate) fn parse_date(value: Option<&FieldValue>) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&value?.to_string(), DATE_FORMAT).ok()
}

/// Sorted, de-duplicated apartment names
#[must_use]
pub fn apartments(bookings: &[BookingDetails]) -> Vec<String> {
    bookings
        .iter()
        .map(BookingDetails::apartment_name_text)
        .filter(|name| !name.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
