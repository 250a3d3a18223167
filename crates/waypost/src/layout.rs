//! The layout evaluator contract.
//!
//! A layout strategy turns contextual inputs (a handle to the relocation
//! channel and a handle to the marker instance) into the anchor, size, and
//! style values needed to build the host-engine icon. Outputs carry the name
//! of the strategy that produced them; consumers reject foreign or untagged
//! outputs rather than building an icon from values that may omit required
//! invariants.

pub mod auto;
pub mod manual;

use waypost_core::dynamic::Anchor;

use crate::error::WaypostError;
use crate::host::{MarkerHandle, PortalHandle};

/// Contextual inputs handed to a layout evaluator.
///
/// Both handles are cheap clones; evaluators move further clones into
/// dynamic-anchor getters so reads reflect live state at the engine's chosen
/// read time.
#[derive(Debug, Clone)]
pub struct LayoutInput {
    /// Handle to the relocation channel; the underlying element's size can
    /// be measured at read time.
    pub portal: PortalHandle,

    /// Handle to the underlying marker instance, possibly not yet populated.
    pub marker: MarkerHandle,
}

/// The geometry and style values a layout strategy produced for one marker.
///
/// Only constructible through [`LayoutOutput::for_strategy`], which stamps
/// the producing strategy's name into the output.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOutput {
    strategy: &'static str,
    root_style: String,
    icon_size: Option<Anchor>,
    icon_anchor: Option<Anchor>,
    popup_anchor: Option<Anchor>,
    tooltip_anchor: Option<Anchor>,
    class_name: Option<String>,
    attribution: Option<String>,
    pane: Option<String>,
}

impl LayoutOutput {
    /// Creates an output tagged with the producing strategy's name.
    pub fn for_strategy(strategy: &'static str, root_style: impl Into<String>) -> Self {
        Self {
            strategy,
            root_style: root_style.into(),
            icon_size: None,
            icon_anchor: None,
            popup_anchor: None,
            tooltip_anchor: None,
            class_name: None,
            attribution: None,
            pane: None,
        }
    }

    /// The name of the strategy that produced this output.
    pub fn strategy(&self) -> &'static str {
        self.strategy
    }

    /// Inline style for the injected content's wrapper element.
    pub fn root_style(&self) -> &str {
        &self.root_style
    }

    /// The icon box size, if the strategy supplies one.
    pub fn icon_size(&self) -> Option<&Anchor> {
        self.icon_size.as_ref()
    }

    /// The icon anchor, if the strategy supplies one.
    pub fn icon_anchor(&self) -> Option<&Anchor> {
        self.icon_anchor.as_ref()
    }

    /// The popup anchor, if the strategy supplies one.
    pub fn popup_anchor(&self) -> Option<&Anchor> {
        self.popup_anchor.as_ref()
    }

    /// The tooltip anchor, if the strategy supplies one.
    pub fn tooltip_anchor(&self) -> Option<&Anchor> {
        self.tooltip_anchor.as_ref()
    }

    /// Extra class for the icon wrapper, if any.
    pub fn class_name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    /// Attribution string, if any.
    pub fn attribution(&self) -> Option<&str> {
        self.attribution.as_deref()
    }

    /// Engine pane, if any.
    pub fn pane(&self) -> Option<&str> {
        self.pane.as_deref()
    }

    /// Sets the icon size (builder style).
    pub fn with_icon_size(mut self, anchor: Anchor) -> Self {
        self.icon_size = Some(anchor);
        self
    }

    /// Sets the icon anchor (builder style).
    pub fn with_icon_anchor(mut self, anchor: Anchor) -> Self {
        self.icon_anchor = Some(anchor);
        self
    }

    /// Sets the popup anchor (builder style).
    pub fn with_popup_anchor(mut self, anchor: Anchor) -> Self {
        self.popup_anchor = Some(anchor);
        self
    }

    /// Sets the tooltip anchor (builder style).
    pub fn with_tooltip_anchor(mut self, anchor: Anchor) -> Self {
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

    /// Verifies this output was produced by the expected strategy.
    ///
    /// # Errors
    ///
    /// Returns [`WaypostError::ForeignLayout`] when the tag is empty or
    /// names a different strategy.
    pub fn ensure_strategy(&self, expected: &'static str) -> Result<(), WaypostError> {
        if self.strategy.is_empty() || self.strategy != expected {
            return Err(WaypostError::ForeignLayout {
                expected,
                found: self.strategy.to_owned(),
            });
        }
        Ok(())
    }
}

/// A pluggable layout strategy.
///
/// Evaluation must be idempotent and safe to repeat on every render; it
/// computes values but performs no relocation or engine calls itself.
pub trait LayoutEvaluator {
    /// The strategy's stable name, used as the output tag and in
    /// diagnostics.
    fn name(&self) -> &'static str;

    /// Computes the layout output for the given marker context.
    ///
    /// # Errors
    ///
    /// Returns a [`WaypostError`] when a configured position spec fails
    /// validation.
    fn evaluate(&self, input: &LayoutInput) -> Result<LayoutOutput, WaypostError>;
}

#[cfg(test)]
mod tests {
    use waypost_core::dynamic::DynamicPoint;
    use waypost_core::geometry::Point;

    use super::*;

    #[test]
    fn test_ensure_strategy_accepts_own_output() {
        let output = LayoutOutput::for_strategy("auto-layout", "");
        assert!(output.ensure_strategy("auto-layout").is_ok());
    }

    #[test]
    fn test_ensure_strategy_rejects_foreign_output() {
        let output = LayoutOutput::for_strategy("someone-elses-layout", "");
        let err = output
            .ensure_strategy("auto-layout")
            .expect_err("foreign tag");
        let message = err.to_string();
        assert!(message.contains("someone-elses-layout"));
        assert!(message.contains("auto-layout"));
    }

    #[test]
    fn test_ensure_strategy_rejects_empty_tag() {
        let output = LayoutOutput::for_strategy("", "");
        assert!(output.ensure_strategy("").is_err());
    }

    #[test]
    fn test_output_equality_static_by_value() {
        let lhs = LayoutOutput::for_strategy("manual-layout", "width: 100%; height: 100%")
            .with_icon_size(Point::new(32.0, 32.0).into());
        let rhs = LayoutOutput::for_strategy("manual-layout", "width: 100%; height: 100%")
            .with_icon_size(Point::new(32.0, 32.0).into());
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn test_output_equality_dynamic_by_identity() {
        let proxy = DynamicPoint::new(|| 1.0, || 2.0);
        let lhs = LayoutOutput::for_strategy("auto-layout", "")
            .with_popup_anchor(proxy.clone().into());
        let rhs = LayoutOutput::for_strategy("auto-layout", "").with_popup_anchor(proxy.into());
        assert_eq!(lhs, rhs);

        let fresh = LayoutOutput::for_strategy("auto-layout", "")
            .with_popup_anchor(DynamicPoint::new(|| 1.0, || 2.0).into());
        assert_ne!(lhs, fresh);
    }
}
