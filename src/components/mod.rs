#![allow(clippy::needless_pass_by_value)]

pub mod app;
pub mod booking_calendar;
pub mod booking_filters;
pub mod booking_list;
