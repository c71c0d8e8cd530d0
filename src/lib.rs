pub mod calendar;
pub mod components;
pub mod config;
pub mod data;
pub mod error;
pub mod filter;
pub mod logging;
pub mod models;
pub mod tooltip;

pub use components::app::{App, BOOKING_CALENDAR_ID, BOOKING_LIST_ID};
pub use config::TooltipConfig;
pub use error::TooltipError;
pub use tooltip::{attach, attach_or_report, TooltipBinding, TooltipController, TooltipHost};
