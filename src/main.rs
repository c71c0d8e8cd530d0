use booking_tooltip::{attach_or_report, App, TooltipConfig, BOOKING_CALENDAR_ID, BOOKING_LIST_ID};

fn main() {
    console_error_panic_hook::set_once();
    leptos::mount_to_body(App);

    // One independent controller per container
    for id in [BOOKING_LIST_ID, BOOKING_CALENDAR_ID] {
        if let Some(binding) = attach_or_report(&format!("#{id}"), TooltipConfig::default()) {
            binding.forget();
        }
    }
}
