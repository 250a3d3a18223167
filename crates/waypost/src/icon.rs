//! Builds the host-engine icon descriptor from a layout evaluation output.
//!
//! The markup is a single empty wrapper element carrying the generated
//! marker id as its identity attribute and the evaluator's root style
//! inline; the engine creates this element, and the relocation bridge later
//! moves the live content into it by looking the id up.

use waypost_core::dynamic::Anchor;
use waypost_core::geometry::Point;

use crate::error::WaypostError;
use crate::layout::LayoutOutput;

/// The concrete icon descriptor handed to the host engine.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseIcon {
    html: String,
    icon_size: Option<Anchor>,
    icon_anchor: Anchor,
    popup_anchor: Option<Anchor>,
    tooltip_anchor: Option<Anchor>,
    class_name: Option<String>,
    attribution: Option<String>,
    pane: Option<String>,
}

impl BaseIcon {
    /// The wrapper markup the engine injects for this marker.
    pub fn html(&self) -> &str {
        &self.html
    }

    /// The icon box size, if any.
    pub fn icon_size(&self) -> Option<&Anchor> {
        self.icon_size.as_ref()
    }

    /// The icon anchor; defaults to the implicit top-left corner.
    pub fn icon_anchor(&self) -> &Anchor {
        &self.icon_anchor
    }

    /// The popup anchor, if any.
    pub fn popup_anchor(&self) -> Option<&Anchor> {
        self.popup_anchor.as_ref()
    }

    /// The tooltip anchor, if any.
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
}

/// Builds the base icon for a marker from a tagged layout output.
///
/// # Errors
///
/// Returns [`WaypostError::ForeignLayout`] when the output's strategy tag is
/// missing or does not belong to `evaluator` (a hand-built output that
/// bypassed [`LayoutOutput::for_strategy`]).
pub fn build_base_icon(
    output: &LayoutOutput,
    evaluator: &'static str,
    marker_id: &str,
) -> Result<BaseIcon, WaypostError> {
    output.ensure_strategy(evaluator)?;

    let html = format!(
        r#"<div data-component-marker="root" style="{style}" id="{marker_id}"></div>"#,
        style = output.root_style(),
    );

    Ok(BaseIcon {
        html,
        icon_size: output.icon_size().cloned(),
        icon_anchor: output
            .icon_anchor()
            .cloned()
            .unwrap_or_else(|| Anchor::from(Point::default())),
        popup_anchor: output.popup_anchor().cloned(),
        tooltip_anchor: output.tooltip_anchor().cloned(),
        class_name: output.class_name().map(str::to_owned),
        attribution: output.attribution().map(str::to_owned),
        pane: output.pane().map(str::to_owned),
    })
}
