use leptos::{component, view, For, IntoView, Signal, SignalGet, StoredValue};
use crate::components::app::BOOKING_LIST_ID;
use crate::filter::BookingFilter;
use crate::models::{BookingDetails, FieldValue};

fn text(value: Option<&FieldValue>) -> String {
    value.map(ToString::to_string).unwrap_or_default()
}

/// The full booking as carried in `data-booking` for the tooltip
pub(crate) fn booking_payload(booking: &BookingDetails) -> String {
    serde_json::to_string(booking).unwrap_or_default()
}

#[component]
#[must_use]
pub fn BookingList(bookings: StoredValue<Vec<BookingDetails>>, filter: Signal<BookingFilter>) -> impl IntoView {
    let visible = move || {
        let filter = filter.get();
        bookings.with_value(|all| filter.apply(all))
    };

    view! {
        <ul id=BOOKING_LIST_ID class="booking-list">
            <For
                each=visible
                key=|(index, _)| *index
                children=move |(_, booking): (usize, BookingDetails)| {
                    view! { <BookingRow booking=booking /> }
                }
            />
        </ul>
    }
}

/// One booking item in the list
#[component]
#[must_use]
pub fn BookingRow(booking: BookingDetails) -> impl IntoView {
    let payload = booking_payload(&booking);

    view! {
        <li class="booking-item" data-booking=payload>
            <span class="booking-guest">{booking.guest_name_text()}</span>
            <span class="booking-apartment">{booking.apartment_name_text()}</span>
            <span class="booking-dates">
                {text(booking.check_in.as_ref())}
                " → "
                {text(booking.check_out.as_ref())}
            </span>
        </li>
    }
}
