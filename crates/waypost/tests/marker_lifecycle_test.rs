//! End-to-end tests for the component marker lifecycle.
//!
//! These drive a marker against an in-memory host engine the way real
//! bindings would: build the icon, simulate the engine creating the element
//! and firing add/remove, and read anchors at engine-chosen times.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use float_cmp::assert_approx_eq;

use waypost::ComponentMarker;
use waypost::config::{LayoutMode, ManualLayoutConfig, MarkerConfig};
use waypost::geometry::Size;
use waypost::host::{HostElement, HostEngine};

#[derive(Debug, Default)]
struct Element {
    size: Cell<Size>,
    click_guarded: Cell<bool>,
}

impl Element {
    fn sized(width: f32, height: f32) -> Rc<Self> {
        let element = Self::default();
        element.size.set(Size::new(width, height));
        Rc::new(element)
    }
}

impl HostElement for Element {
    fn measured_size(&self) -> Size {
        self.size.get()
    }

    fn disable_click_propagation(&self) {
        self.click_guarded.set(true);
    }

    fn disable_scroll_propagation(&self) {}
}

#[derive(Default)]
struct Engine {
    elements: RefCell<HashMap<String, Rc<Element>>>,
}

impl Engine {
    fn create_element(&self, id: &str, element: Rc<Element>) {
        self.elements.borrow_mut().insert(id.to_owned(), element);
    }
}

impl HostEngine for Engine {
    fn element_by_id(&self, id: &str) -> Option<Rc<dyn HostElement>> {
        self.elements
            .borrow()
            .get(id)
            .map(|element| Rc::clone(element) as Rc<dyn HostElement>)
    }
}

/// Stand-in for stateful caller content.
#[derive(Debug, Default)]
struct Counter {
    value: u32,
}

#[test]
fn test_content_relocates_only_after_add_signal() {
    let engine = Engine::default();
    let mut marker =
        ComponentMarker::new(Counter::default(), MarkerConfig::default()).expect("valid config");

    // Mounted but the engine has not signalled yet: no relocation.
    assert!(!marker.is_attached());

    let element = Element::sized(20.0, 20.0);
    engine.create_element(marker.id(), element);
    marker.handle_add(&engine).expect("element exists");
    assert!(marker.is_attached());

    marker.handle_remove();
    assert!(!marker.is_attached());
}

#[test]
fn test_content_state_survives_remove_and_re_add() {
    let engine = Engine::default();
    let mut marker =
        ComponentMarker::new(Counter::default(), MarkerConfig::default()).expect("valid config");
    let channel = marker.portal().handle();

    engine.create_element(marker.id(), Element::sized(20.0, 20.0));
    marker.handle_add(&engine).expect("element exists");
    marker.content_mut().value += 3;

    // Clustering-style churn: the engine tears the marker down and later
    // recreates it with a fresh element.
    marker.handle_remove();
    engine.create_element(marker.id(), Element::sized(20.0, 20.0));
    marker.handle_add(&engine).expect("element exists");

    assert_eq!(marker.content().value, 3);
    // Same relocation channel throughout; it was re-pointed, not recreated.
    assert!(channel.ptr_eq(&marker.portal().handle()));
}

#[test]
fn test_auto_anchors_follow_content_resize_without_rebuild() {
    let engine = Engine::default();
    let mut marker =
        ComponentMarker::new(Counter::default(), MarkerConfig::default()).expect("valid config");
    let channel = marker.portal().handle();

    let element = Element::sized(20.0, 20.0);
    engine.create_element(marker.id(), Rc::clone(&element));
    marker.handle_add(&engine).expect("element exists");

    let tooltip = marker
        .icon()
        .tooltip_anchor()
        .expect("auto layout provides a tooltip anchor")
        .clone();
    // Default `top` anchor: y factor rebased to middle is -0.5.
    assert_approx_eq!(f32, tooltip.y(), -10.0);

    element.size.set(Size::new(100.0, 100.0));
    assert_approx_eq!(f32, tooltip.y(), -50.0);

    // No icon rebuild and no channel recreation happened along the way.
    assert_eq!(marker.icon_generation(), 0);
    assert!(channel.ptr_eq(&marker.portal().handle()));
}

#[test]
fn test_popup_anchor_reads_at_engine_chosen_time() {
    let engine = Engine::default();
    let mut marker =
        ComponentMarker::new(Counter::default(), MarkerConfig::default()).expect("valid config");

    // The popup anchor exists before the element does; reading it now is
    // safe and measures zero.
    let popup = marker
        .icon()
        .popup_anchor()
        .expect("auto layout provides a popup anchor")
        .clone();
    assert_approx_eq!(f32, popup.y(), 7.0);

    engine.create_element(marker.id(), Element::sized(30.0, 40.0));
    marker.handle_add(&engine).expect("element exists");

    // Default `top` anchor: y factor rebased to bottom-right is -1, plus
    // the engine's 7px popup clearance.
    assert_approx_eq!(f32, popup.y(), -33.0);
}

#[test]
fn test_click_guard_applied_to_engine_element() {
    let engine = Engine::default();
    let config = MarkerConfig::default().with_disable_click_propagation(true);
    let mut marker = ComponentMarker::new(Counter::default(), config).expect("valid config");

    let element = Element::sized(10.0, 10.0);
    engine.create_element(marker.id(), Rc::clone(&element));
    marker.handle_add(&engine).expect("element exists");
    assert!(element.click_guarded.get());
}

#[test]
fn test_caller_lifecycle_callbacks_compose() {
    let signals: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));
    let on_add = Rc::clone(&signals);
    let on_remove = Rc::clone(&signals);

    let engine = Engine::default();
    let mut marker = ComponentMarker::new(Counter::default(), MarkerConfig::default())
        .expect("valid config")
        .with_on_add(move || on_add.borrow_mut().push("add"))
        .with_on_remove(move || on_remove.borrow_mut().push("remove"));

    engine.create_element(marker.id(), Element::sized(10.0, 10.0));
    marker.handle_add(&engine).expect("element exists");
    marker.handle_remove();
    marker.handle_add(&engine).expect("re-add");

    assert_eq!(*signals.borrow(), vec!["add", "remove", "add"]);
}

#[test]
fn test_manual_layout_passes_geometry_to_icon() {
    let config = MarkerConfig::default()
        .with_layout_mode(LayoutMode::Manual)
        .with_manual_layout(
            ManualLayoutConfig::default()
                .with_icon_size([32.0, 32.0])
                .with_icon_anchor([16.0, 32.0]),
        );
    let marker = ComponentMarker::new(Counter::default(), config).expect("valid config");

    let icon = marker.icon();
    assert_eq!(icon.icon_size().expect("size set").read().x(), 32.0);
    assert_eq!(icon.icon_anchor().read().y(), 32.0);
    assert!(icon.html().contains("width: 100%; height: 100%"));
}
