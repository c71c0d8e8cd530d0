//! Hover tooltip for booking items.
//!
//! [`TooltipController`] holds the lifecycle and placement logic and talks to
//! the page through [`TooltipHost`]. [`dom::attach`] wires a controller to a
//! real container with delegated mouse listeners.

mod content;
mod controller;
pub mod dom;
mod placement;

pub use content::{TooltipContent, TooltipRow};
pub use controller::{TooltipController, TooltipHost};
pub use dom::{attach, attach_or_report, BookingItem, TooltipBinding, WebHost};
pub use placement::{place, Point, Size};
