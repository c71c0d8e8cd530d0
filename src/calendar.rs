use chrono::{Datelike, Days, NaiveDate};
use crate::filter::{parse_date, BookingFilter};
use crate::models::BookingDetails;

const DAYS_PER_WEEK: u64 = 7;

/// A Monday-to-Sunday week
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarWeek {
    start: NaiveDate,
}

impl CalendarWeek {
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        let since_monday = u64::from(date.weekday().num_days_from_monday());
        Self { start: date - Days::new(since_monday) }
    }

    #[must_use]
    pub const fn start(self) -> NaiveDate {
        self.start
    }

    /// ISO 8601 week number
    #[must_use]
    pub fn number(self) -> u32 {
        self.start.iso_week().week()
    }

    #[must_use]
    pub fn previous(self) -> Self {
        Self { start: self.start - Days::new(DAYS_PER_WEEK) }
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self { start: self.start + Days::new(DAYS_PER_WEEK) }
    }

    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        (0..DAYS_PER_WEEK).map(move |offset| self.start + Days::new(offset))
    }
}

/// Whether the guest occupies the apartment on the night of `day`.
///
/// Check-out day is free: the stay covers `check_in <= day < check_out`.
#[must_use]
pub fn stays_on(booking: &BookingDetails, day: NaiveDate) -> bool {
    match (parse_date(booking.check_in.as_ref()), parse_date(booking.check_out.as_ref())) {
        (Some(check_in), Some(check_out)) => check_in <= day && day < check_out,
        _ => false,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarCell {
    pub day: NaiveDate,
    /// Bookings staying that night, paired with their index in the booking list
    pub bookings: Vec<(usize, BookingDetails)>,
}

/// One apartment's week
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarRow {
    pub apartment: String,
    pub cells: Vec<CalendarCell>,
}

/// Apartment by day grid for `week`, holding the bookings that pass `filter`.
///
/// Every apartment in `apartments` gets a row, even when nothing matches.
#[must_use]
pub fn week_grid(
    bookings: &[BookingDetails],
    apartments: &[String],
    filter: &BookingFilter,
    week: CalendarWeek,
) -> Vec<CalendarRow> {
    let visible = filter.apply(bookings);

    apartments
        .iter()
        .map(|apartment| CalendarRow {
            apartment: apartment.clone(),
            cells: week
                .days()
                .map(|day| CalendarCell {
                    day,
                    bookings: visible
                        .iter()
                        .filter(|(_, booking)| booking.apartment_name_text() == *apartment && stays_on(booking, day))
                        .cloned()
                        .collect(),
                })
                .collect(),
        })
        .collect()
}

/// Week to open the calendar on: the current week if any guest stays in it,
/// otherwise the week of the earliest check-in.
#[must_use]
pub fn initial_week(bookings: &[BookingDetails], today: NaiveDate) -> CalendarWeek {
    let current = CalendarWeek::containing(today);
    let known = bookings.iter().filter(|booking| !booking.is_unknown_guest());

    if known.clone().any(|booking| current.days().any(|day| stays_on(booking, day))) {
        return current;
    }
    known
        .filter_map(|booking| parse_date(booking.check_in.as_ref()))
        .min()
        .map_or(current, CalendarWeek::containing)
}
