use crate::config::TooltipConfig;
use crate::error::TooltipError;
use crate::logging::log;
use crate::models::BookingPayload;
use super::content::TooltipContent;
use super::placement::{place, Point, Size};

/// Everything the controller needs from the page.
///
/// `WebHost` implements this over `web-sys`; tests use an in-memory document.
pub trait TooltipHost {
    type Container: Clone;
    /// Typed handle to one booking item
    type Item: Clone + PartialEq;
    /// A live tooltip node
    type Node;

    fn find_container(&self, selector: &str) -> Option<Self::Container>;

    /// Read an attribute of a booking item
    fn attribute(&self, item: &Self::Item, name: &str) -> Option<String>;

    /// Whether the item is still part of the document
    fn is_attached(&self, item: &Self::Item) -> bool;

    /// Create the tooltip and insert it, hidden, at the viewport origin
    ///
    /// # Errors
    ///
    /// Returns an error if the node cannot be created or inserted
    fn insert_tooltip(&self, class: &str, content: &TooltipContent) -> Result<Self::Node, TooltipError>;

    /// Rendered size of an inserted tooltip
    fn measure(&self, node: &Self::Node) -> Size;

    fn move_tooltip(&self, node: &Self::Node, at: Point);

    /// Make a placed tooltip visible
    fn reveal(&self, node: &Self::Node);

    fn remove_tooltip(&self, node: &Self::Node);

    fn viewport(&self) -> Size;

    /// Developer-facing diagnostic channel
    fn report(&self, error: &TooltipError);
}

struct ActiveTooltip<H: TooltipHost> {
    item: H::Item,
    node: H::Node,
    size: Size,
}

/// Hover tooltip lifecycle for the booking items of one container.
///
/// Owns at most one tooltip at a time. A controller whose container was not
/// found is inert: every handler is a no-op.
pub struct TooltipController<H: TooltipHost> {
    host: H,
    config: TooltipConfig,
    container: Option<H::Container>,
    active: Option<ActiveTooltip<H>>,
}

impl<H: TooltipHost> TooltipController<H> {
    /// Locate `container_selector`; reports `MissingContainer` and stays inert if absent
    pub fn initialize(host: H, config: TooltipConfig, container_selector: &str) -> Self {
        let container = host.find_container(container_selector);
        if container.is_none() {
            host.report(&TooltipError::MissingContainer {
                selector: container_selector.to_string(),
            });
        }

        Self { host, config, container, active: None }
    }

    #[must_use]
    pub const fn is_inert(&self) -> bool {
        self.container.is_none()
    }

    #[must_use]
    pub const fn container(&self) -> Option<&H::Container> {
        self.container.as_ref()
    }

    #[must_use]
    pub const fn config(&self) -> &TooltipConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: TooltipConfig) {
        self.config = config;
    }

    #[must_use]
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// Item whose tooltip is currently shown
    #[must_use]
    pub fn current_item(&self) -> Option<&H::Item> {
        self.active.as_ref().map(|active| &active.item)
    }

    #[must_use]
    pub const fn is_showing(&self) -> bool {
        self.active.is_some()
    }

    /// Show the tooltip for `item`, replacing any tooltip already shown
    pub fn on_pointer_enter_item(&mut self, item: &H::Item, pointer_x: f64, pointer_y: f64) {
        if self.is_inert() {
            return;
        }
        self.destroy_tooltip();

        let payload = match BookingPayload::read(&self.config.payload_attribute, |name| {
            self.host.attribute(item, name)
        }) {
            Ok(payload) => payload,
            Err(err) => {
                self.host.report(&err);
                return;
            }
        };

        let content = TooltipContent::from_payload(&payload, &self.config.placeholder);
        let node = match self.host.insert_tooltip(&self.config.tooltip_class, &content) {
            Ok(node) => node,
            Err(err) => {
                self.host.report(&err);
                return;
            }
        };

        // Measured at the origin, where the viewport edge cannot squeeze it
        let size = self.host.measure(&node);
        let pointer = Point::new(pointer_x, pointer_y);
        let position = place(pointer, size, self.host.viewport(), self.config.offset);
        self.host.move_tooltip(&node, position);
        self.host.reveal(&node);

        log!("Showing booking tooltip at {:.0},{:.0}", position.x, position.y);
        self.active = Some(ActiveTooltip { item: item.clone(), node, size });
    }

    /// Keep the tooltip tracking the pointer; drops it if its item left the document
    pub fn on_pointer_move(&mut self, pointer_x: f64, pointer_y: f64) {
        let Some(active) = &self.active else { return };
        if !self.host.is_attached(&active.item) {
            self.destroy_tooltip();
            return;
        }
        let position = place(
            Point::new(pointer_x, pointer_y),
            active.size,
            self.host.viewport(),
            self.config.offset,
        );
        self.host.move_tooltip(&active.node, position);
    }

    /// `entered_item` is the booking item containing the pointer's new target, if any
    pub fn on_pointer_leave_item(&mut self, entered_item: Option<&H::Item>) {
        if entered_item.is_none() {
            self.destroy_tooltip();
        }
    }

    pub fn destroy_tooltip(&mut self) {
        if let Some(active) = self.active.take() {
            self.host.remove_tooltip(&active.node);
        }
    }
}
