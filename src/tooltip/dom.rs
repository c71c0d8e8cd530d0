use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, EventTarget, HtmlElement, MouseEvent, Node, Window};
use crate::config::{TooltipConfig, CONFIG_ATTRIBUTE};
use crate::error::TooltipError;
use crate::logging::log;
use super::content::TooltipContent;
use super::controller::{TooltipController, TooltipHost};
use super::placement::{Point, Size};

const FALLBACK_VIEWPORT_WIDTH: f64 = 1920.0;
const FALLBACK_VIEWPORT_HEIGHT: f64 = 1080.0;
const TOOLTIP_Z_INDEX: &str = "1000";

type MouseListener = Closure<dyn FnMut(MouseEvent)>;

fn dom_err(context: &'static str) -> impl Fn(JsValue) -> TooltipError {
    move |err| TooltipError::dom(context, &err)
}

/// A booking item element inside a tooltip container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingItem(Element);

impl BookingItem {
    /// The booking item containing `target`, if it lies inside `container`
    #[must_use]
    pub fn from_target(
        target: Option<EventTarget>,
        container: &Element,
        item_selector: &str,
    ) -> Option<Self> {
        let target = target?;
        // Text nodes can be event targets in some engines; use their parent element
        let element = match target.dyn_ref::<Element>() {
            Some(element) => element.clone(),
            None => target.dyn_ref::<Node>()?.parent_element()?,
        };

        let item = element.closest(item_selector).ok().flatten()?;
        container.contains(Some(&item)).then_some(Self(item))
    }

    #[must_use]
    pub const fn element(&self) -> &Element {
        &self.0
    }
}

/// `TooltipHost` backed by the browser document
#[derive(Debug, Clone)]
pub struct WebHost {
    window: Window,
    document: Document,
}

impl WebHost {
    /// # Errors
    ///
    /// Returns an error outside a browser window
    pub fn new() -> Result<Self, TooltipError> {
        let window = web_sys::window().ok_or_else(|| TooltipError::Dom("no window".to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| TooltipError::Dom("no document".to_string()))?;
        Ok(Self { window, document })
    }

    fn create_html_element(&self, tag: &str) -> Result<HtmlElement, TooltipError> {
        self.document
            .create_element(tag)
            .map_err(dom_err("create element"))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| TooltipError::Dom(format!("<{tag}> is not an HtmlElement")))
    }

    fn render_row(&self, label: &str, value: &str) -> Result<HtmlElement, TooltipError> {
        let line = self.create_html_element("p")?;
        let strong = self.create_html_element("strong")?;
        strong.set_text_content(Some(&format!("{label}:")));
        line.append_child(&strong).map_err(dom_err("append label"))?;
        line.append_child(&self.document.create_text_node(&format!(" {value}")))
            .map_err(dom_err("append value"))?;
        Ok(line)
    }
}

fn set_position(node: &HtmlElement, at: Point) -> Result<(), TooltipError> {
    let style = node.style();
    style.set_property("left", &format!("{}px", at.x)).map_err(dom_err("set left"))?;
    style.set_property("top", &format!("{}px", at.y)).map_err(dom_err("set top"))?;
    Ok(())
}

impl TooltipHost for WebHost {
    type Container = Element;
    type Item = BookingItem;
    type Node = HtmlElement;

    fn find_container(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn attribute(&self, item: &BookingItem, name: &str) -> Option<String> {
        item.0.get_attribute(name)
    }

    fn is_attached(&self, item: &BookingItem) -> bool {
        item.0.is_connected()
    }

    fn insert_tooltip(&self, class: &str, content: &TooltipContent) -> Result<HtmlElement, TooltipError> {
        let tooltip = self.create_html_element("div")?;
        tooltip.set_class_name(class);

        let style = tooltip.style();
        // Positioned in client coordinates and never a mouse target itself.
        // Sized by its content (capped by the stylesheet's max-width), not by its position.
        for (property, value) in [
            ("position", "fixed"),
            ("pointer-events", "none"),
            ("z-index", TOOLTIP_Z_INDEX),
            ("width", "max-content"),
            ("visibility", "hidden"),
        ] {
            style.set_property(property, value).map_err(dom_err("style tooltip"))?;
        }
        set_position(&tooltip, Point::default())?;

        for row in &content.rows {
            let line = self.render_row(row.label, &row.value)?;
            tooltip.append_child(&line).map_err(dom_err("append row"))?;
        }

        let body = self
            .document
            .body()
            .ok_or_else(|| TooltipError::Dom("document has no body".to_string()))?;
        body.append_child(&tooltip).map_err(dom_err("insert tooltip"))?;

        Ok(tooltip)
    }

    fn measure(&self, node: &HtmlElement) -> Size {
        let rect = node.get_bounding_client_rect();
        Size::new(rect.width(), rect.height())
    }

    fn move_tooltip(&self, node: &HtmlElement, at: Point) {
        if let Err(err) = set_position(node, at) {
            self.report(&err);
        }
    }

    fn reveal(&self, node: &HtmlElement) {
        if let Err(err) = node.style().remove_property("visibility") {
            self.report(&TooltipError::dom("reveal tooltip", &err));
        }
    }

    fn remove_tooltip(&self, node: &HtmlElement) {
        node.remove();
    }

    fn viewport(&self) -> Size {
        let width = self
            .window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(FALLBACK_VIEWPORT_WIDTH);
        let height = self
            .window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(FALLBACK_VIEWPORT_HEIGHT);
        Size::new(width, height)
    }

    fn report(&self, error: &TooltipError) {
        let message = JsValue::from_str(&format!("[booking-tooltip] {error}"));
        if error.is_warning() {
            web_sys::console::warn_1(&message);
        } else {
            web_sys::console::error_1(&message);
        }
    }
}

/// Delegated listeners wiring a controller to its container.
///
/// Dropping the binding removes the listeners and any visible tooltip.
pub struct TooltipBinding {
    controller: Rc<RefCell<TooltipController<WebHost>>>,
    container: Element,
    listeners: Vec<(&'static str, MouseListener)>,
}

impl TooltipBinding {
    #[must_use]
    pub fn is_showing(&self) -> bool {
        self.controller.try_borrow().is_ok_and(|c| c.is_showing())
    }

    #[must_use]
    pub fn current_item(&self) -> Option<BookingItem> {
        self.controller.try_borrow().ok()?.current_item().cloned()
    }

    /// Keep the listeners installed for the rest of the page's life
    pub fn forget(self) {
        std::mem::forget(self);
    }
}

impl Drop for TooltipBinding {
    fn drop(&mut self) {
        for (event, listener) in &self.listeners {
            let _ = self
                .container
                .remove_event_listener_with_callback(event, listener.as_ref().unchecked_ref());
        }
        if let Ok(mut controller) = self.controller.try_borrow_mut() {
            controller.destroy_tooltip();
        }
    }
}

/// Attach a tooltip controller to the container matching `container_selector`.
///
/// A `data-tooltip-config` attribute on the container overrides `config`
/// field by field.
///
/// # Errors
///
/// Returns `MissingContainer` (already reported to the console) if the
/// container is absent, or a DOM error if listeners cannot be installed
pub fn attach(container_selector: &str, config: TooltipConfig) -> Result<TooltipBinding, TooltipError> {
    let host = WebHost::new()?;
    let mut controller = TooltipController::initialize(host, config, container_selector);
    let Some(container) = controller.container().cloned() else {
        return Err(TooltipError::MissingContainer {
            selector: container_selector.to_string(),
        });
    };

    if let Some(overrides) = container.get_attribute(CONFIG_ATTRIBUTE) {
        match controller.config().with_overrides(&overrides) {
            Ok(config) => controller.set_config(config),
            Err(err) => controller.host().report(&err),
        }
    }

    let item_selector = controller.config().item_selector();
    let controller = Rc::new(RefCell::new(controller));

    let on_over = {
        let controller = Rc::clone(&controller);
        let container = container.clone();
        let selector = item_selector.clone();
        Closure::wrap(Box::new(move |ev: MouseEvent| {
            let Ok(mut controller) = controller.try_borrow_mut() else { return };
            let Some(item) = BookingItem::from_target(ev.target(), &container, &selector) else {
                // Over a gap; also clears a tooltip whose item was removed without a mouseout
                controller.on_pointer_leave_item(None);
                return;
            };
            // Moving between children of one item is not a new hover
            let from = BookingItem::from_target(ev.related_target(), &container, &selector);
            if from.as_ref() == Some(&item) && controller.current_item() == Some(&item) {
                return;
            }
            controller.on_pointer_enter_item(&item, f64::from(ev.client_x()), f64::from(ev.client_y()));
        }) as Box<dyn FnMut(MouseEvent)>)
    };

    let on_move = {
        let controller = Rc::clone(&controller);
        Closure::wrap(Box::new(move |ev: MouseEvent| {
            if let Ok(mut controller) = controller.try_borrow_mut() {
                controller.on_pointer_move(f64::from(ev.client_x()), f64::from(ev.client_y()));
            }
        }) as Box<dyn FnMut(MouseEvent)>)
    };

    let on_out = {
        let controller = Rc::clone(&controller);
        let container = container.clone();
        let selector = item_selector;
        Closure::wrap(Box::new(move |ev: MouseEvent| {
            if BookingItem::from_target(ev.target(), &container, &selector).is_none() {
                return;
            }
            let entered = BookingItem::from_target(ev.related_target(), &container, &selector);
            if let Ok(mut controller) = controller.try_borrow_mut() {
                controller.on_pointer_leave_item(entered.as_ref());
            }
        }) as Box<dyn FnMut(MouseEvent)>)
    };

    // Built before registering so a failed registration is undone on drop
    let binding = TooltipBinding {
        controller,
        container,
        listeners: vec![("mouseover", on_over), ("mousemove", on_move), ("mouseout", on_out)],
    };
    for (event, listener) in &binding.listeners {
        binding
            .container
            .add_event_listener_with_callback(event, listener.as_ref().unchecked_ref())
            .map_err(dom_err("add listener"))?;
    }

    log!("Booking tooltips attached to {}", container_selector);
    Ok(binding)
}

/// `attach`, sending any failure to the console instead of returning it.
///
/// `MissingContainer` was already reported by the controller; every other
/// error is logged here. The page keeps working without tooltips either way.
pub fn attach_or_report(container_selector: &str, config: TooltipConfig) -> Option<TooltipBinding> {
    match attach(container_selector, config) {
        Ok(binding) => Some(binding),
        Err(TooltipError::MissingContainer { .. }) => None,
        Err(err) => {
            web_sys::console::error_1(&JsValue::from_str(&format!(
                "Failed to attach booking tooltips to {container_selector}: {err}"
            )));
            None
        }
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;
    use web_sys::MouseEventInit;

    wasm_bindgen_test_configure!(run_in_browser);

    fn document() -> Document {
        web_sys::window().unwrap().document().unwrap()
    }

    fn mount(id: &str, inner_html: &str) -> Element {
        let container = document().create_element("div").unwrap();
        container.set_id(id);
        container.set_inner_html(inner_html);
        document().body().unwrap().append_child(&container).unwrap();
        container
    }

    fn by_id(id: &str) -> Element {
        document().get_element_by_id(id).unwrap()
    }

    fn dispatch(kind: &str, target: &Element, related: Option<&Element>, x: i32, y: i32) {
        let init = MouseEventInit::new();
        init.set_bubbles(true);
        init.set_client_x(x);
        init.set_client_y(y);
        init.set_related_target(related.map(|el| el.unchecked_ref::<EventTarget>()));
        let event = MouseEvent::new_with_mouse_event_init_dict(kind, &init).unwrap();
        target.dispatch_event(&event).unwrap();
    }

    fn tooltips() -> Vec<String> {
        let found = document().get_elements_by_class_name("booking-tooltip");
        (0..found.length())
            .filter_map(|i| found.item(i))
            .map(|el| el.text_content().unwrap_or_default())
            .collect()
    }

    fn tooltip_elements() -> Vec<Element> {
        let found = document().get_elements_by_class_name("booking-tooltip");
        (0..found.length()).filter_map(|i| found.item(i)).collect()
    }

    fn inner_width() -> f64 {
        web_sys::window().unwrap().inner_width().unwrap().as_f64().unwrap()
    }

    const ITEMS: &str = r#"
        <div id="jane" class="booking-item"
             data-booking='{"guest_name": "Jane Doe", "check_in": "2024-01-01", "check_out": "2024-01-05", "guests": 2}'>
            <span id="jane-name">Jane Doe</span>
        </div>
        <div id="bob" class="booking-item" data-booking='{"guest_name": "Bob"}'>Bob</div>
        <div id="broken" class="booking-item" data-booking='{"guest_name": '>Broken</div>
        <div id="outside">gap</div>
    "#;

    #[wasm_bindgen_test]
    fn test_missing_container() {
        let result = attach("#no-such-bookings", TooltipConfig::default());
        assert!(matches!(result, Err(TooltipError::MissingContainer { .. })));
    }

    #[wasm_bindgen_test]
    fn test_hover_renders_placeholder() {
        let container = mount("bookings-render", ITEMS);
        let binding = attach("#bookings-render", TooltipConfig::default()).unwrap();

        dispatch("mouseover", &by_id("jane"), Some(&by_id("outside")), 20, 20);
        let shown = tooltips();
        assert_eq!(shown.len(), 1);
        assert!(shown[0].contains("Total Price: N/A"));
        assert!(shown[0].contains("Guest: Jane Doe"));
        assert!(shown[0].contains("Check-in: 2024-01-01"));

        drop(binding);
        assert!(tooltips().is_empty());
        container.remove();
    }

    #[wasm_bindgen_test]
    fn test_enter_enter_and_child_leave() {
        let container = mount("bookings-lifecycle", ITEMS);
        let binding = attach("#bookings-lifecycle", TooltipConfig::default()).unwrap();

        dispatch("mouseover", &by_id("jane"), None, 20, 20);
        dispatch("mouseover", &by_id("bob"), None, 20, 40);
        let shown = tooltips();
        assert_eq!(shown.len(), 1);
        assert!(shown[0].contains("Guest: Bob"));

        dispatch("mouseover", &by_id("jane"), Some(&by_id("bob")), 20, 20);
        dispatch("mouseout", &by_id("jane"), Some(&by_id("jane-name")), 22, 22);
        assert_eq!(tooltips().len(), 1);
        assert_eq!(binding.current_item().map(|i| i.element().id()), Some("jane".to_string()));

        dispatch("mouseout", &by_id("jane-name"), Some(&by_id("outside")), 22, 90);
        assert!(tooltips().is_empty());

        drop(binding);
        container.remove();
    }

    #[wasm_bindgen_test]
    fn test_malformed_then_valid() {
        let container = mount("bookings-malformed", ITEMS);
        let binding = attach("#bookings-malformed", TooltipConfig::default()).unwrap();

        dispatch("mouseover", &by_id("broken"), None, 20, 20);
        assert!(tooltips().is_empty());
        assert!(!binding.is_showing());

        dispatch("mouseover", &by_id("bob"), Some(&by_id("broken")), 20, 20);
        assert_eq!(tooltips().len(), 1);

        drop(binding);
        container.remove();
    }

    #[wasm_bindgen_test]
    fn test_width_at_right_edge_matches_width_at_origin() {
        let container = mount("bookings-edge", ITEMS);
        let binding = attach("#bookings-edge", TooltipConfig::default()).unwrap();

        dispatch("mouseover", &by_id("jane"), None, 20, 20);
        let natural = tooltip_elements()[0].get_bounding_client_rect().width();
        assert!(natural > 0.0);
        dispatch("mouseout", &by_id("jane"), Some(&by_id("outside")), 20, 90);
        assert!(tooltips().is_empty());

        let edge = (inner_width() - 5.0).floor();
        #[allow(clippy::cast_possible_truncation)]
        let edge_x = edge as i32;
        dispatch("mouseover", &by_id("jane"), None, edge_x, 20);
        let shown = tooltip_elements();
        assert_eq!(shown.len(), 1);
        let rect = shown[0].get_bounding_client_rect();
        assert_eq!(rect.width(), natural);
        assert!(rect.left() < edge);
        assert!(rect.right() <= inner_width());

        drop(binding);
        container.remove();
    }

    #[wasm_bindgen_test]
    fn test_removed_item_tooltip_cleared_on_container_over() {
        let container = mount("bookings-removed", ITEMS);
        let binding = attach("#bookings-removed", TooltipConfig::default()).unwrap();

        dispatch("mouseover", &by_id("jane"), None, 20, 20);
        assert_eq!(tooltips().len(), 1);

        // Re-rendering a list drops the row without any mouseout
        by_id("jane").remove();
        dispatch("mouseover", &container, None, 20, 20);
        assert!(tooltips().is_empty());
        assert!(!binding.is_showing());

        drop(binding);
        container.remove();
    }

    #[wasm_bindgen_test]
    fn test_removed_item_tooltip_cleared_on_move() {
        let container = mount("bookings-removed-move", ITEMS);
        let binding = attach("#bookings-removed-move", TooltipConfig::default()).unwrap();

        dispatch("mouseover", &by_id("bob"), None, 20, 20);
        by_id("bob").remove();
        dispatch("mousemove", &container, None, 24, 24);
        assert!(tooltips().is_empty());

        drop(binding);
        container.remove();
    }

    #[wasm_bindgen_test]
    fn test_attach_or_report() {
        assert!(attach_or_report("#no-such-calendar", TooltipConfig::default()).is_none());

        let container = mount("bookings-report", ITEMS);
        let binding = attach_or_report("#bookings-report", TooltipConfig::default()).unwrap();
        dispatch("mouseover", &by_id("bob"), None, 20, 20);
        assert_eq!(tooltips().len(), 1);

        drop(binding);
        container.remove();
    }
}
