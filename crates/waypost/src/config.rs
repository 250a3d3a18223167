//! Configuration types for component markers.
//!
//! This module provides the configuration structures that select and tune a
//! layout strategy for a marker. All types implement [`serde::Deserialize`]
//! for flexible loading from external sources.
//!
//! # Overview
//!
//! - [`MarkerConfig`] - Top-level marker configuration: layout mode,
//!   per-mode options, propagation guards, and advisory switches.
//! - [`AutoLayoutConfig`] - Anchor-position specs for the auto layout.
//! - [`ManualLayoutConfig`] - Static icon geometry for the manual layout.
//!
//! Position specs are validated at layout evaluation time, not here, so a
//! malformed spec surfaces as a hard error on the render that uses it.

use serde::Deserialize;

use waypost_core::position::Position;

/// Which layout strategy drives a marker's icon geometry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutMode {
    /// Derive anchors from declarative position specs and the injected
    /// content's measured size.
    #[default]
    Auto,

    /// Pass caller-supplied static icon geometry straight through. An escape
    /// hatch; no derived behavior.
    Manual,
}

/// Top-level configuration for a component marker.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    /// The selected layout strategy.
    layout_mode: LayoutMode,

    /// Options for the auto layout. Ignored in manual mode.
    auto_layout: AutoLayoutConfig,

    /// Options for the manual layout. Ignored in auto mode.
    manual_layout: ManualLayoutConfig,

    /// Stop clicks on the injected content reaching the underlying map.
    disable_click_propagation: bool,

    /// Stop scroll/pan gestures on the injected content reaching the
    /// underlying map.
    disable_scroll_propagation: bool,

    /// Switch for the advisory fired when marker options are supplied
    /// alongside non-component icon content.
    unused_opts_warning: bool,

    /// Switch for the advisory fired when manual layout has no `icon_size`.
    root_size_warning: bool,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            layout_mode: LayoutMode::default(),
            auto_layout: AutoLayoutConfig::default(),
            manual_layout: ManualLayoutConfig::default(),
            disable_click_propagation: false,
            disable_scroll_propagation: false,
            unused_opts_warning: true,
            root_size_warning: true,
        }
    }
}

impl MarkerConfig {
    /// Returns the selected layout mode.
    pub fn layout_mode(&self) -> LayoutMode {
        self.layout_mode
    }

    /// Returns the auto layout options.
    pub fn auto_layout(&self) -> &AutoLayoutConfig {
        &self.auto_layout
    }

    /// Returns the manual layout options.
    pub fn manual_layout(&self) -> &ManualLayoutConfig {
        &self.manual_layout
    }

    /// Whether click propagation should be suppressed on the injected node.
    pub fn disable_click_propagation(&self) -> bool {
        self.disable_click_propagation
    }

    /// Whether scroll propagation should be suppressed on the injected node.
    pub fn disable_scroll_propagation(&self) -> bool {
        self.disable_scroll_propagation
    }

    /// Whether the unused-options advisory is enabled.
    pub fn unused_opts_warning(&self) -> bool {
        self.unused_opts_warning
    }

    /// Whether the manual-layout size advisory is enabled.
    pub fn root_size_warning(&self) -> bool {
        self.root_size_warning
    }

    /// True when any option differs from the defaults. Outer marker
    /// surfaces use this to detect component options paired with an icon
    /// that is not component content.
    pub fn is_customized(&self) -> bool {
        *self != Self::default()
    }

    /// Selects the layout mode (builder style).
    pub fn with_layout_mode(mut self, layout_mode: LayoutMode) -> Self {
        self.layout_mode = layout_mode;
        self
    }

    /// Sets the auto layout options (builder style).
    pub fn with_auto_layout(mut self, auto_layout: AutoLayoutConfig) -> Self {
        self.auto_layout = auto_layout;
        self
    }

    /// Sets the manual layout options (builder style).
    pub fn with_manual_layout(mut self, manual_layout: ManualLayoutConfig) -> Self {
        self.manual_layout = manual_layout;
        self
    }

    /// Toggles click propagation suppression (builder style).
    pub fn with_disable_click_propagation(mut self, disable: bool) -> Self {
        self.disable_click_propagation = disable;
        self
    }

    /// Toggles scroll propagation suppression (builder style).
    pub fn with_disable_scroll_propagation(mut self, disable: bool) -> Self {
        self.disable_scroll_propagation = disable;
        self
    }

    /// Toggles the unused-options advisory (builder style).
    pub fn with_unused_opts_warning(mut self, enabled: bool) -> Self {
        self.unused_opts_warning = enabled;
        self
    }

    /// Toggles the manual-layout size advisory (builder style).
    pub fn with_root_size_warning(mut self, enabled: bool) -> Self {
        self.root_size_warning = enabled;
        self
    }
}

/// Anchor-position specs for the auto layout.
///
/// Each spec is optional; the icon anchor defaults to the `top` preset and
/// the tooltip/popup anchors fall back to the icon anchor's factors.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AutoLayoutConfig {
    /// Where the icon sits relative to the marker location.
    icon_anchor: Option<Position>,

    /// Override for the tooltip anchor position.
    tooltip_anchor: Option<Position>,

    /// Override for the popup anchor position.
    popup_anchor: Option<Position>,
}

impl AutoLayoutConfig {
    /// Returns the icon location anchor spec, if set.
    pub fn icon_anchor(&self) -> Option<&Position> {
        self.icon_anchor.as_ref()
    }

    /// Returns the tooltip anchor override, if set.
    pub fn tooltip_anchor(&self) -> Option<&Position> {
        self.tooltip_anchor.as_ref()
    }

    /// Returns the popup anchor override, if set.
    pub fn popup_anchor(&self) -> Option<&Position> {
        self.popup_anchor.as_ref()
    }

    /// Sets the icon location anchor (builder style).
    pub fn with_icon_anchor(mut self, position: Position) -> Self {
        self.icon_anchor = Some(position);
        self
    }

    /// Sets the tooltip anchor override (builder style).
    pub fn with_tooltip_anchor(mut self, position: Position) -> Self {
        self.tooltip_anchor = Some(position);
        self
    }

    /// Sets the popup anchor override (builder style).
    pub fn with_popup_anchor(mut self, position: Position) -> Self {
        self.popup_anchor = Some(position);
        self
    }
}

/// Static icon geometry for the manual layout, passed straight through to
/// the base icon. Coordinates are `[x, y]` pixel pairs.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ManualLayoutConfig {
    /// The fixed size of the icon box. Without this the injected content is
    /// invisible, which triggers a one-time advisory.
    icon_size: Option<[f32; 2]>,

    /// Offset of the icon's tip from its top-left corner.
    icon_anchor: Option<[f32; 2]>,

    /// Popup open point relative to the icon anchor.
    popup_anchor: Option<[f32; 2]>,

    /// Tooltip open point relative to the icon anchor.
    tooltip_anchor: Option<[f32; 2]>,

    /// Extra class applied to the icon wrapper.
    class_name: Option<String>,

    /// Attribution string forwarded to the engine.
    attribution: Option<String>,

    /// Engine pane the marker is placed in.
    pane: Option<String>,
}

impl ManualLayoutConfig {
    /// Returns the fixed icon size, if set.
    pub fn icon_size(&self) -> Option<[f32; 2]> {
        self.icon_size
    }

    /// Returns the icon anchor, if set.
    pub fn icon_anchor(&self) -> Option<[f32; 2]> {
        self.icon_anchor
    }

    /// Returns the popup anchor, if set.
    pub fn popup_anchor(&self) -> Option<[f32; 2]> {
        self.popup_anchor
    }

    /// Returns the tooltip anchor, if set.
    pub fn tooltip_anchor(&self) -> Option<[f32; 2]> {
        self.tooltip_anchor
    }

    /// Returns the wrapper class name, if set.
    pub fn class_name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    /// Returns the attribution string, if set.
    pub fn attribution(&self) -> Option<&str> {
        self.attribution.as_deref()
    }

    /// Returns the engine pane, if set.
    pub fn pane(&self) -> Option<&str> {
        self.pane.as_deref()
    }

    /// Sets the fixed icon size (builder style).
    pub fn with_icon_size(mut self, size: [f32; 2]) -> Self {
        self.icon_size = Some(size);
        self
    }

    /// Sets the icon anchor (builder style).
    pub fn with_icon_anchor(mut self, anchor: [f32; 2]) -> Self {
        self.icon_anchor = Some(anchor);
        self
    }

    /// Sets the popup anchor (builder style).
    pub fn with_popup_anchor(mut self, anchor: [f32; 2]) -> Self {
        self.popup_anchor = Some(anchor);
        self
    }

    /// Sets the tooltip anchor (builder style).
    pub fn with_tooltip_anchor(mut self, anchor: [f32; 2]) -> Self {
        self.tooltip_anchor = Some(anchor);
        self
    }

    /// Sets the wrapper class name (builder style).
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Sets the attribution string (builder style).
    pub fn with_attribution(mut self, attribution: impl Into<String>) -> Self {
        self.attribution = Some(attribution.into());
        self
    }

    /// Sets the engine pane (builder style).
    pub fn with_pane(mut self, pane: impl Into<String>) -> Self {
        self.pane = Some(pane.into());
        self
    }
}
