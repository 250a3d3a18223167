//! Declarative anchor-position specs and the factor resolver.
//!
//! A [`Position`] describes where content sits relative to a marker location,
//! either as one of a fixed set of named presets or as an explicit `(x, y)`
//! pair of numeric factors / percentage strings. Resolution produces a
//! [`FactorPair`] in units where `1.0` is one full content dimension along
//! that axis and `(0, 0)` is the content's top-left origin.

use std::fmt;

use serde::{Deserialize, Deserializer, de};
use thiserror::Error;

/// The named anchor-position presets.
///
/// Each preset resolves to a fixed [`FactorPair`] constant, and doubles as an
/// origin convention for [`FactorPair::rebase`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnchorPreset {
    Left,
    TopLeft,
    BottomLeft,
    Right,
    TopRight,
    BottomRight,
    Top,
    Bottom,
    Middle,
}

impl AnchorPreset {
    const ALL: [AnchorPreset; 9] = [
        Self::Left,
        Self::TopLeft,
        Self::BottomLeft,
        Self::Right,
        Self::TopRight,
        Self::BottomRight,
        Self::Top,
        Self::Bottom,
        Self::Middle,
    ];

    /// Returns the kebab-case name of this preset.
    pub fn name(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::TopLeft => "top-left",
            Self::BottomLeft => "bottom-left",
            Self::Right => "right",
            Self::TopRight => "top-right",
            Self::BottomRight => "bottom-right",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Middle => "middle",
        }
    }

    /// Looks up a preset by its kebab-case name.
    ///
    /// # Errors
    ///
    /// Returns [`PositionError::UnknownPreset`] listing the valid preset
    /// names when `name` does not match any of them.
    pub fn from_name(name: &str) -> Result<Self, PositionError> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name() == name)
            .ok_or_else(|| PositionError::UnknownPreset {
                value: name.to_owned(),
            })
    }

    /// Returns the fixed factor constants for this preset.
    pub fn factors(self) -> FactorPair {
        match self {
            Self::Left => FactorPair::new(-0.5, 0.5),
            Self::TopLeft => FactorPair::new(-0.5, 0.0),
            Self::BottomLeft => FactorPair::new(-0.5, 1.0),
            Self::Right => FactorPair::new(0.5, 0.5),
            Self::TopRight => FactorPair::new(0.5, 0.0),
            Self::BottomRight => FactorPair::new(0.5, 1.0),
            Self::Top => FactorPair::new(0.0, 0.0),
            Self::Bottom => FactorPair::new(0.0, 1.0),
            Self::Middle => FactorPair::new(0.0, 0.5),
        }
    }

    fn valid_names() -> String {
        Self::ALL
            .into_iter()
            .map(Self::name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for AnchorPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A resolved `(x, y)` offset expressed as fractions of the content size.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FactorPair {
    x: f32,
    y: f32,
}

impl FactorPair {
    /// Creates a new factor pair.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x factor.
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y factor.
    pub fn y(self) -> f32 {
        self.y
    }

    /// Re-expresses this pair relative to the given origin preset.
    ///
    /// The host engine's zero-size marker element paints with its own
    /// top-left at the marker location, so "origin at middle/bottom-right"
    /// semantics are expressed as an offset from that implicit corner.
    /// Rebasing a preset's own factors to that preset yields `(0, 0)`.
    pub fn rebase(self, origin: AnchorPreset) -> Self {
        let origin = origin.factors();
        Self {
            x: self.x - origin.x,
            y: self.y - origin.y,
        }
    }
}

/// Which axis of an `(x, y)` tuple a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => f.write_str("X"),
            Self::Y => f.write_str("Y"),
        }
    }
}

/// Validation failures raised while resolving a [`Position`].
///
/// These are deterministic configuration errors; they are propagated to the
/// caller rather than silently defaulted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PositionError {
    #[error(
        "tried to interpret '{value}' as a percentage for the {axis} value in an X/Y tuple \
         but the string is invalid; percentage strings must be valid CSS values, e.g. 59.5%"
    )]
    MalformedPercentage { axis: Axis, value: String },

    #[error(
        "the {axis} value in an X/Y tuple must be a finite numerical factor \
         (e.g. 0.595) or a percentage string (e.g. 59.5%), got {value}"
    )]
    NonFiniteFactor { axis: Axis, value: f32 },

    #[error(
        "tried to interpret '{value}' as a positional preset but it did not match any of the \
         available presets: {valid}", valid = AnchorPreset::valid_names()
    )]
    UnknownPreset { value: String },
}

/// One element of an explicit `(x, y)` tuple: a plain numeric factor or a
/// percentage string such as `"59.5%"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FactorSpec {
    Factor(f32),
    Percent(String),
}

impl FactorSpec {
    fn resolve(&self, axis: Axis) -> Result<f32, PositionError> {
        match self {
            Self::Factor(value) => {
                if value.is_finite() {
                    Ok(*value)
                } else {
                    Err(PositionError::NonFiniteFactor {
                        axis,
                        value: *value,
                    })
                }
            }
            Self::Percent(raw) => {
                parse_percentage(raw).ok_or_else(|| PositionError::MalformedPercentage {
                    axis,
                    value: raw.clone(),
                })
            }
        }
    }
}

impl From<f32> for FactorSpec {
    fn from(value: f32) -> Self {
        Self::Factor(value)
    }
}

impl From<&str> for FactorSpec {
    fn from(value: &str) -> Self {
        Self::Percent(value.to_owned())
    }
}

/// Parses a signed decimal percentage string (`^-?\d+(\.\d+)?%$`) into a
/// factor, dividing by 100. Returns `None` for anything else.
fn parse_percentage(raw: &str) -> Option<f32> {
    let body = raw.strip_suffix('%')?;
    let digits = body.strip_prefix('-').unwrap_or(body);
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits, None),
    };

    if int_part.is_empty() || !int_part.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    if let Some(frac_part) = frac_part {
        if frac_part.is_empty() || !frac_part.bytes().all(|byte| byte.is_ascii_digit()) {
            return None;
        }
    }

    body.parse::<f32>().ok().map(|percent| percent / 100.0)
}

/// A declarative position specification: a named preset or an explicit
/// `(x, y)` tuple of [`FactorSpec`] values.
///
/// Deserializes from either a preset string (`"bottom-right"`) or a
/// two-element sequence (`[0.5, "25%"]`).
#[derive(Debug, Clone, PartialEq)]
pub enum Position {
    Preset(AnchorPreset),
    Factors([FactorSpec; 2]),
}

impl Position {
    /// Convenience constructor for an explicit factor tuple.
    pub fn factors(x: impl Into<FactorSpec>, y: impl Into<FactorSpec>) -> Self {
        Self::Factors([x.into(), y.into()])
    }

    /// Resolves this specification into a normalized [`FactorPair`].
    ///
    /// # Errors
    ///
    /// Returns a [`PositionError`] identifying the offending axis when a
    /// tuple element is neither a finite number nor a well-formed percentage
    /// string.
    pub fn resolve(&self) -> Result<FactorPair, PositionError> {
        match self {
            Self::Preset(preset) => Ok(preset.factors()),
            Self::Factors([x, y]) => {
                Ok(FactorPair::new(x.resolve(Axis::X)?, y.resolve(Axis::Y)?))
            }
        }
    }
}

impl From<AnchorPreset> for Position {
    fn from(preset: AnchorPreset) -> Self {
        Self::Preset(preset)
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PositionVisitor;

        impl<'de> de::Visitor<'de> for PositionVisitor {
            type Value = Position;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(
                    formatter,
                    "a position preset name ({}) or an X/Y tuple of factors",
                    AnchorPreset::valid_names()
                )
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                AnchorPreset::from_name(value)
                    .map(Position::Preset)
                    .map_err(E::custom)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let x: FactorSpec = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &"an X/Y tuple"))?;
                let y: FactorSpec = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &"an X/Y tuple"))?;
                if seq.next_element::<FactorSpec>()?.is_some() {
                    return Err(de::Error::invalid_length(3, &"an X/Y tuple"));
                }
                Ok(Position::Factors([x, y]))
            }
        }

        deserializer.deserialize_any(PositionVisitor)
    }
}
