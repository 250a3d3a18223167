//! The manual layout: a thin passthrough of caller-supplied static icon
//! geometry, included as an escape hatch. No measurement, no dynamic
//! anchors.

use waypost_core::geometry::Point;

use crate::advisory::{AdvisoryFlag, codes};
use crate::config::ManualLayoutConfig;
use crate::error::WaypostError;
use crate::layout::{LayoutEvaluator, LayoutInput, LayoutOutput};

/// Layout strategy passing caller geometry straight through to the icon.
///
/// Without an `icon_size` the injected content collapses to a zero-size box
/// and is invisible; a one-time advisory flags that unless suppressed.
#[derive(Debug)]
pub struct ManualLayout {
    config: ManualLayoutConfig,
    size_warning: bool,
    size_advisory: AdvisoryFlag,
}

impl Default for ManualLayout {
    fn default() -> Self {
        Self::new(ManualLayoutConfig::default())
    }
}

impl ManualLayout {
    /// The strategy name carried by this evaluator's outputs.
    pub const NAME: &'static str = "manual-layout";

    pub fn new(config: ManualLayoutConfig) -> Self {
        Self {
            config,
            size_warning: true,
            size_advisory: AdvisoryFlag::new(),
        }
    }

    /// Toggles the missing-size advisory (builder style).
    pub fn with_size_warning(mut self, enabled: bool) -> Self {
        self.size_warning = enabled;
        self
    }

    /// Replaces the advisory latch with a shared one (builder style).
    ///
    /// The latch scopes the "warn once" semantics. A caller that rebuilds
    /// its evaluator over time passes the same flag to every replacement so
    /// the advisory stays once-per-caller rather than once-per-evaluator.
    pub fn with_size_advisory(mut self, flag: AdvisoryFlag) -> Self {
        self.size_advisory = flag;
        self
    }

    /// Whether the missing-size advisory has fired for this instance.
    pub fn has_advised_missing_size(&self) -> bool {
        self.size_advisory.has_advised()
    }
}

impl LayoutEvaluator for ManualLayout {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn evaluate(&self, _input: &LayoutInput) -> Result<LayoutOutput, WaypostError> {
        if self.size_warning && self.config.icon_size().is_none() {
            self.size_advisory.advise_once(
                codes::UNBOUND_MANUAL_SIZE,
                "`manual_layout.icon_size` was not set but the manual layout mode is selected; \
                 the marker content will not be visible. Set `root_size_warning: false` to \
                 silence this warning.",
            );
        }

        let mut output =
            LayoutOutput::for_strategy(Self::NAME, "width: 100%; height: 100%");
        if let Some([x, y]) = self.config.icon_size() {
            output = output.with_icon_size(Point::new(x, y).into());
        }
        if let Some([x, y]) = self.config.icon_anchor() {
            output = output.with_icon_anchor(Point::new(x, y).into());
        }
        if let Some([x, y]) = self.config.popup_anchor() {
            output = output.with_popup_anchor(Point::new(x, y).into());
        }
        if let Some([x, y]) = self.config.tooltip_anchor() {
            output = output.with_tooltip_anchor(Point::new(x, y).into());
        }
        if let Some(class_name) = self.config.class_name() {
            output = output.with_class_name(class_name);
        }
        if let Some(attribution) = self.config.attribution() {
            output = output.with_attribution(attribution);
        }
        if let Some(pane) = self.config.pane() {
            output = output.with_pane(pane);
        }

        Ok(output)
    }
}
