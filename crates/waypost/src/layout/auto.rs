//! The auto layout: icon alignment, popup anchor, and tooltip anchor derived
//! from declarative anchor-position specs and the injected content's
//! measured size.
//!
//! The engine's container for the icon is a zero-size element positioned on
//! the marker location, so the icon's default paint position is to the
//! bottom right of the location in accordance with standard layout flow.
//! Factors supplied by presets/users describe the icon's position, so the
//! root transform and every derived anchor is rebased from that implicit
//! corner.

use waypost_core::dynamic::DynamicPoint;
use waypost_core::position::{AnchorPreset, FactorPair, Position};

use crate::config::AutoLayoutConfig;
use crate::error::WaypostError;
use crate::host::{TooltipDirection, ViewSide};
use crate::layout::{LayoutEvaluator, LayoutInput, LayoutOutput};

/// Vertical clearance between content and popup, matching the engine's
/// built-in default marker.
pub const POPUP_CLEARANCE: f32 = 7.0;

/// Layout strategy deriving all geometry from position specs and live
/// content measurement.
#[derive(Debug, Clone, Default)]
pub struct AutoLayout {
    config: AutoLayoutConfig,
}

impl AutoLayout {
    /// The strategy name carried by this evaluator's outputs.
    pub const NAME: &'static str = "auto-layout";

    pub fn new(config: AutoLayoutConfig) -> Self {
        Self { config }
    }

    fn resolve(
        spec: Option<&Position>,
        fallback: FactorPair,
        option: &'static str,
    ) -> Result<FactorPair, WaypostError> {
        match spec {
            Some(position) => position
                .resolve()
                .map_err(|source| WaypostError::position(option, source)),
            None => Ok(fallback),
        }
    }
}

impl LayoutEvaluator for AutoLayout {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn evaluate(&self, input: &LayoutInput) -> Result<LayoutOutput, WaypostError> {
        let base = match self.config.icon_anchor() {
            Some(position) => position
                .resolve()
                .map_err(|source| WaypostError::position("auto_layout.icon_anchor", source))?,
            None => AnchorPreset::Top.factors(),
        };
        let tooltip_base =
            Self::resolve(self.config.tooltip_anchor(), base, "auto_layout.tooltip_anchor")?;
        let popup_base =
            Self::resolve(self.config.popup_anchor(), base, "auto_layout.popup_anchor")?;

        let root = base.rebase(AnchorPreset::BottomRight);
        let root_style = format!(
            "width: min-content; transform: translate({}%, {}%)",
            root.x() * 100.0,
            root.y() * 100.0,
        );

        Ok(LayoutOutput::for_strategy(Self::NAME, root_style)
            .with_popup_anchor(popup_anchor(input, popup_base).into())
            .with_tooltip_anchor(tooltip_anchor(input, tooltip_base).into()))
    }
}

/// Popup open point, computed from the content's measured size at read time.
fn popup_anchor(input: &LayoutInput, base: FactorPair) -> DynamicPoint {
    let x_factor = base.rebase(AnchorPreset::Middle).x();
    let y_factor = base.rebase(AnchorPreset::BottomRight).y();
    let portal_x = input.portal.clone();
    let portal_y = input.portal.clone();

    DynamicPoint::new(
        move || {
            portal_x
                .measured_size()
                .offset_by_factors(x_factor, y_factor)
                .x()
        },
        move || {
            portal_y
                .measured_size()
                .offset_by_factors(x_factor, y_factor)
                .y()
                + POPUP_CLEARANCE
        },
    )
}

/// Tooltip open point with direction-sensitive X mirroring.
///
/// The engine's tooltip auto-placement assumes the icon anchor controls the
/// icon location on the x axis. The auto layout keeps the icon anchor at
/// `(0, 0)` and positions via the root transform instead, so the tooltip
/// offset has to be corrected here: explicit `left` direction forces the
/// half-width term negative, and auto direction mirrors the factor term
/// according to which side of the view the marker sits on. An unknown view
/// side behaves like the right half, matching the engine default. An
/// unpopulated marker handle reads as unset direction.
fn tooltip_anchor(input: &LayoutInput, base: FactorPair) -> DynamicPoint {
    let mid = base.rebase(AnchorPreset::Middle);
    let portal_x = input.portal.clone();
    let portal_y = input.portal.clone();
    let marker = input.marker.clone();
    let x_factor = mid.x();
    let y_factor = mid.y();

    DynamicPoint::new(
        move || {
            let width = portal_x.measured_size().width();
            let direction = marker.tooltip_direction();
            let explicit_left = direction == Some(TooltipDirection::Left);
            let auto_direction = matches!(direction, None | Some(TooltipDirection::Auto));
            let mirrored = auto_direction
                && marker.view_side().unwrap_or(ViewSide::Right) == ViewSide::Right;

            let half = (width / 2.0) * if explicit_left { -1.0 } else { 1.0 };
            half + x_factor * width * if mirrored { -1.0 } else { 1.0 }
        },
        move || {
            portal_y
                .measured_size()
                .offset_by_factors(x_factor, y_factor)
                .y()
        },
    )
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use float_cmp::assert_approx_eq;

    use waypost_core::position::AnchorPreset;

    use crate::host::{HostElement, MarkerHandle, PortalNode, testing::FakeElement};

    use super::*;

    fn attached_input(width: f32, height: f32) -> (LayoutInput, Rc<FakeElement>) {
        let portal: PortalNode<()> = PortalNode::new(());
        let handle = portal.handle();
        let element = FakeElement::with_size(width, height);
        handle.attach(Rc::clone(&element) as Rc<dyn HostElement>);
        (
            LayoutInput {
                portal: handle,
                marker: MarkerHandle::new(),
            },
            element,
        )
    }

    #[test]
    fn test_default_root_style_rebases_top_to_bottom_right() {
        let (input, _element) = attached_input(10.0, 10.0);
        let output = AutoLayout::default().evaluate(&input).expect("evaluates");
        // top = (0, 0), bottom-right origin = (0.5, 1) -> (-50%, -100%).
        assert_eq!(
            output.root_style(),
            "width: min-content; transform: translate(-50%, -100%)"
        );
    }

    #[test]
    fn test_output_is_tagged() {
        let (input, _element) = attached_input(10.0, 10.0);
        let output = AutoLayout::default().evaluate(&input).expect("evaluates");
        assert_eq!(output.strategy(), AutoLayout::NAME);
        assert!(output.ensure_strategy(AutoLayout::NAME).is_ok());
    }

    #[test]
    fn test_popup_anchor_includes_engine_clearance() {
        let (input, _element) = attached_input(20.0, 40.0);
        let output = AutoLayout::default().evaluate(&input).expect("evaluates");
        let popup = output.popup_anchor().expect("popup anchor present");
        // top preset: x factor rebased to middle is 0; y factor rebased to
        // bottom-right is -1 -> 40 * -1 + 7.
        assert_approx_eq!(f32, popup.x(), 0.0);
        assert_approx_eq!(f32, popup.y(), -33.0);
    }

    #[test]
    fn test_popup_anchor_y_matches_documented_example() {
        let (input, _element) = attached_input(20.0, 40.0);
        let layout = AutoLayout::new(
            AutoLayoutConfig::default().with_icon_anchor(Position::factors(0.0, 0.0)),
        );
        let output = layout.evaluate(&input).expect("evaluates");
        let popup = output.popup_anchor().expect("popup anchor present");
        // Factors (0, 0): y rebased to bottom-right is -1, so 40 * (0 - 1) + 7.
        assert_approx_eq!(f32, popup.y(), -33.0);

        let layout = AutoLayout::new(
            AutoLayoutConfig::default().with_popup_anchor(Position::from(AnchorPreset::Bottom)),
        );
        let output = layout.evaluate(&input).expect("evaluates");
        let popup = output.popup_anchor().expect("popup anchor present");
        // bottom = (0, 1): 40 * (1 - 1) + 7 = 7.
        assert_approx_eq!(f32, popup.y(), 7.0);
    }

    #[test]
    fn test_anchors_track_live_resize_without_reevaluation() {
        let (input, element) = attached_input(20.0, 20.0);
        let output = AutoLayout::default().evaluate(&input).expect("evaluates");
        let tooltip = output.tooltip_anchor().expect("tooltip anchor present");

        // top preset: y factor rebased to middle is -0.5.
        assert_approx_eq!(f32, tooltip.y(), -10.0);
        element.resize(100.0, 100.0);
        assert_approx_eq!(f32, tooltip.y(), -50.0);
    }

    #[test]
    fn test_tooltip_anchor_reads_zero_when_detached() {
        let portal: PortalNode<()> = PortalNode::new(());
        let input = LayoutInput {
            portal: portal.handle(),
            marker: MarkerHandle::new(),
        };
        let output = AutoLayout::default().evaluate(&input).expect("evaluates");
        let tooltip = output.tooltip_anchor().expect("tooltip anchor present");
        assert_approx_eq!(f32, tooltip.x(), 0.0);
        assert_approx_eq!(f32, tooltip.y(), 0.0);
    }

    #[test]
    fn test_tooltip_explicit_left_forces_negative_half_width() {
        let (input, _element) = attached_input(60.0, 20.0);
        input
            .marker
            .set_tooltip_direction(Some(TooltipDirection::Left));

        let layout = AutoLayout::new(
            AutoLayoutConfig::default().with_icon_anchor(Position::from(AnchorPreset::Right)),
        );
        let output = layout.evaluate(&input).expect("evaluates");
        let tooltip = output.tooltip_anchor().expect("tooltip anchor present");
        // right = (0.5, 0.5): x rebased to middle is 0.5. Explicit left
        // negates the half-width term but not the factor term:
        // -30 + 0.5 * 60 = 0.
        assert_approx_eq!(f32, tooltip.x(), 0.0);
    }

    #[test]
    fn test_tooltip_auto_direction_mirrors_factor_term() {
        let (input, _element) = attached_input(60.0, 20.0);
        let layout = AutoLayout::new(
            AutoLayoutConfig::default().with_icon_anchor(Position::from(AnchorPreset::Right)),
        );
        let output = layout.evaluate(&input).expect("evaluates");
        let tooltip = output.tooltip_anchor().expect("tooltip anchor present");

        // Unpopulated handle reads as unset direction; unknown view side
        // behaves like the right half: 30 + 0.5 * 60 * -1 = 0.
        assert_approx_eq!(f32, tooltip.x(), 0.0);

        // On the left half of the view no mirroring applies.
        input.marker.set_view_side(Some(ViewSide::Left));
        assert_approx_eq!(f32, tooltip.x(), 60.0);

        // An explicit non-left direction also disables mirroring.
        input.marker.set_view_side(None);
        input
            .marker
            .set_tooltip_direction(Some(TooltipDirection::Right));
        assert_approx_eq!(f32, tooltip.x(), 60.0);
    }

    #[test]
    fn test_invalid_icon_anchor_is_fatal_and_names_option() {
        let (input, _element) = attached_input(10.0, 10.0);
        let layout = AutoLayout::new(
            AutoLayoutConfig::default().with_icon_anchor(Position::factors("oops%", 0.0)),
        );
        let err = layout.evaluate(&input).expect_err("malformed spec");
        assert!(err.to_string().contains("auto_layout.icon_anchor"));
    }

    #[test]
    fn test_tooltip_override_takes_precedence_over_icon_anchor() {
        let (input, _element) = attached_input(20.0, 40.0);
        let layout = AutoLayout::new(
            AutoLayoutConfig::default()
                .with_icon_anchor(Position::from(AnchorPreset::Top))
                .with_tooltip_anchor(Position::from(AnchorPreset::Bottom)),
        );
        let output = layout.evaluate(&input).expect("evaluates");
        let tooltip = output.tooltip_anchor().expect("tooltip anchor present");
        // bottom = (0, 1): y rebased to middle is 0.5 -> 40 * 0.5.
        assert_approx_eq!(f32, tooltip.y(), 20.0);
    }
}
