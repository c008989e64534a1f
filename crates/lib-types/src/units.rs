//! Physical units with an enumerated quantity kind.
//!
//! Traces are matched across collections by the *kind* of quantity they
//! carry (voltage, current, power, ...), not by channel name. The kind is
//! a proper enum rather than a lowercase string tag, so a typo in a unit
//! label is a parse failure instead of a silent mismatch.

use serde::{Deserialize, Deserializer, Serialize};

/// The class of physical quantity a unit measures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    Voltage,
    Current,
    Power,
    Resistance,
    Frequency,
    Time,
    Phase,
    /// Dimensionless quantity (counts, ratios, unitless metrics).
    Ratio,
}

impl UnitKind {
    /// Parse a legacy case-insensitive label (unit name or quantity name).
    ///
    /// Accepts both the unit ("volt") and the quantity ("voltage") spelling,
    /// matching the labels found in instrument exports.
    pub fn parse(label: &str) -> Option<Self> {
        match label.to_ascii_lowercase().as_str() {
            "volt" | "voltage" => Some(Self::Voltage),
            "ampere" | "amp" | "current" => Some(Self::Current),
            "watt" | "power" => Some(Self::Power),
            "ohm" | "resistance" => Some(Self::Resistance),
            "hertz" | "frequency" => Some(Self::Frequency),
            "second" | "time" => Some(Self::Time),
            "degree" | "phase" => Some(Self::Phase),
            "ratio" | "dimensionless" => Some(Self::Ratio),
            _ => None,
        }
    }

    /// Canonical quantity name for this kind.
    pub fn datum(&self) -> &'static str {
        match self {
            Self::Voltage => "voltage",
            Self::Current => "current",
            Self::Power => "power",
            Self::Resistance => "resistance",
            Self::Frequency => "frequency",
            Self::Time => "time",
            Self::Phase => "phase",
            Self::Ratio => "ratio",
        }
    }
}

/// A physical unit shared by reference across many traces.
///
/// `base_exponent` records a power-of-ten scale relative to the SI base
/// unit (e.g. -3 for millivolts). The canonical constants below are all
/// base-scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Unit {
    /// SI unit name, e.g. "volt".
    pub name: &'static str,

    /// Quantity class used for cross-trace matching.
    pub kind: UnitKind,

    /// Power-of-ten scale relative to the base unit.
    pub base_exponent: i32,
}

impl Unit {
    pub const fn new(name: &'static str, kind: UnitKind) -> Self {
        Self {
            name,
            kind,
            base_exponent: 0,
        }
    }

    /// The canonical base-scale unit for a quantity kind.
    pub const fn of(kind: UnitKind) -> Self {
        match kind {
            UnitKind::Voltage => V,
            UnitKind::Current => A,
            UnitKind::Power => W,
            UnitKind::Resistance => OHM,
            UnitKind::Frequency => HZ,
            UnitKind::Time => S,
            UnitKind::Phase => DEGREE,
            UnitKind::Ratio => RATIO,
        }
    }

    /// Multiplier to convert a value in this unit to the base unit.
    #[inline]
    pub fn base_multiplier(&self) -> f64 {
        10f64.powi(self.base_exponent)
    }
}

// Unit names are static strings; deserialization resolves the canonical
// name from the kind rather than borrowing the input.
impl<'de> Deserialize<'de> for Unit {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            #[serde(default)]
            #[allow(dead_code)]
            name: Option<String>,
            kind: UnitKind,
            #[serde(default)]
            base_exponent: i32,
        }

        let raw = Raw::deserialize(deserializer)?;
        let mut unit = Unit::of(raw.kind);
        unit.base_exponent = raw.base_exponent;
        Ok(unit)
    }
}

/// Volt.
pub const V: Unit = Unit::new("volt", UnitKind::Voltage);
/// Ampere.
pub const A: Unit = Unit::new("ampere", UnitKind::Current);
/// Watt.
pub const W: Unit = Unit::new("watt", UnitKind::Power);
/// Ohm.
pub const OHM: Unit = Unit::new("ohm", UnitKind::Resistance);
/// Hertz.
pub const HZ: Unit = Unit::new("hertz", UnitKind::Frequency);
/// Second.
pub const S: Unit = Unit::new("second", UnitKind::Time);
/// Degree of phase.
pub const DEGREE: Unit = Unit::new("degree", UnitKind::Phase);
/// Dimensionless ratio.
pub const RATIO: Unit = Unit::new("ratio", UnitKind::Ratio);
