use leptos::{component, view, create_signal, store_value, IntoView, Signal, SignalGet};
use leptos_meta::{provide_meta_context, Title};
use crate::components::booking_calendar::BookingCalendar;
use crate::components::booking_filters::BookingFilters;
use crate::components::booking_list::BookingList;
use crate::data::sample_bookings;
use crate::filter::{apartments, BookingFilter};

/// Id of the booking list the tooltip controller is attached to
pub const BOOKING_LIST_ID: &str = "booking-list";
/// Id of the weekly calendar, which gets its own tooltip controller
pub const BOOKING_CALENDAR_ID: &str = "booking-calendar";

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let bookings = sample_bookings().unwrap_or_else(|err| {
        web_sys::console::error_1(&format!("Failed to load bookings: {err}").into());
        Vec::new()
    });
    let apartment_names = apartments(&bookings);
    let bookings = store_value(bookings);

    let (guest, set_guest) = create_signal(String::new());
    let (apartment, set_apartment) = create_signal(String::new());
    let (date, set_date) = create_signal(String::new());
    let filter = Signal::derive(move || BookingFilter {
        guest: guest.get(),
        apartment: apartment.get(),
        date: date.get(),
    });

    view! {
        <Title text="Bookings"/>

        <div class="app">
            <h1>"Bookings"</h1>
            <BookingFilters
                apartments=apartment_names.clone()
                guest=guest
                set_guest=set_guest
                apartment=apartment
                set_apartment=set_apartment
                date=date
                set_date=set_date
            />
            <BookingList bookings=bookings filter=filter />
            <h2>"Calendar"</h2>
            <BookingCalendar bookings=bookings apartments=apartment_names filter=filter />
        </div>
    }
}
