use chrono::Local;
use leptos::{component, view, create_signal, CollectView, IntoView, Signal, SignalGet, SignalUpdate, StoredValue};
use crate::calendar::{initial_week, week_grid, CalendarRow};
use crate::components::app::BOOKING_CALENDAR_ID;
use crate::components::booking_list::booking_payload;
use crate::filter::BookingFilter;
use crate::models::BookingDetails;

/// Weekly apartment-by-day view of the filtered bookings
#[component]
#[must_use]
pub fn BookingCalendar(
    bookings: StoredValue<Vec<BookingDetails>>,
    apartments: Vec<String>,
    filter: Signal<BookingFilter>,
) -> impl IntoView {
    let today = Local::now().date_naive();
    let (week, set_week) = create_signal(bookings.with_value(|all| initial_week(all, today)));

    let grid = move || {
        let filter = filter.get();
        bookings.with_value(|all| week_grid(all, &apartments, &filter, week.get()))
    };

    view! {
        <section class="booking-calendar">
            <div class="calendar-nav">
                <button class="prev-week" on:click=move |_| set_week.update(|w| *w = w.previous())>
                    "← Previous week"
                </button>
                <span class="week-number">{move || format!("Week {}", week.get().number())}</span>
                <button class="next-week" on:click=move |_| set_week.update(|w| *w = w.next())>
                    "Next week →"
                </button>
            </div>
            <table id=BOOKING_CALENDAR_ID class="calendar">
                <thead>
                    <tr>
                        <th>"Apartment"</th>
                        {move || week.get().days().map(|day| view! {
                            <th>{day.format("%a %d.%m.").to_string()}</th>
                        }).collect_view()}
                    </tr>
                </thead>
                <tbody>
                    {move || grid().into_iter().map(|row| view! { <CalendarWeekRow row=row /> }).collect_view()}
                </tbody>
            </table>
        </section>
    }
}

#[component]
#[must_use]
fn CalendarWeekRow(row: CalendarRow) -> impl IntoView {
    view! {
        <tr>
            <th class="calendar-apartment">{row.apartment}</th>
            {row.cells.into_iter().map(|cell| view! {
                <td class="calendar-day">
                    {cell.bookings.into_iter().map(|(_, booking)| {
                        let payload = booking_payload(&booking);
                        view! {
                            <div class="booking-item calendar-booking" data-booking=payload>
                                {booking.guest_name_text()}
                            </div>
                        }
                    }).collect_view()}
                </td>
            }).collect_view()}
        </tr>
    }
}
