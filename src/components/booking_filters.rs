use leptos::{component, view, event_target_value, IntoView, ReadSignal, WriteSignal, SignalSet, CollectView};

#[component]
#[must_use]
pub fn BookingFilters(
    apartments: Vec<String>,
    guest: ReadSignal<String>,
    set_guest: WriteSignal<String>,
    apartment: ReadSignal<String>,
    set_apartment: WriteSignal<String>,
    date: ReadSignal<String>,
    set_date: WriteSignal<String>,
) -> impl IntoView {
    view! {
        <div class="booking-filters">
            <input
                type="text"
                class="guest-filter"
                placeholder="Guest name"
                prop:value=guest
                on:input=move |ev| set_guest.set(event_target_value(&ev))
            />
            <select
                class="apartment-filter"
                prop:value=apartment
                on:change=move |ev| set_apartment.set(event_target_value(&ev))
            >
                <option value="">"All apartments"</option>
                {apartments.into_iter().map(|name| view! {
                    <option value=name.clone()>{name}</option>
                }).collect_view()}
            </select>
            <input
                type="date"
                class="date-filter"
                prop:value=date
                on:input=move |ev| set_date.set(event_target_value(&ev))
            />
            <button
                class="clear-filters"
                on:click=move |_| {
                    set_guest.set(String::new());
                    set_apartment.set(String::new());
                    set_date.set(String::new());
                }
            >
                "Clear"
            </button>
        </div>
    }
}
