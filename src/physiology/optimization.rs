//! Marginal risk (∂Θ/∂E) of the optimization stomatal models.
//!
//! Optimization models open stomata until the marginal carbon gain equals the
//! marginal risk of increasing transpiration E. Only the risk term is
//! evaluated here.

use super::{finite, nonzero, output, require};
use crate::error::{ModelError, ModelResult};
use std::str::FromStr;

/// Parameter set of an optimization model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarginalRiskModel {
    /// `∂Θ/∂E = −(∂K/∂E) A/K`
    Eller,
    /// `∂Θ/∂E = −(∂K/∂E) A_max/K_max`
    Sperry,
    /// `∂Θ/∂E = A/(E_crit − E)`
    Wang,
    /// Wolf-Anderegg-Pacala: `∂Θ/∂E = (2aP + b)/K`
    Wap { a: f64, b: f64 },
    /// Modified Wolf-Anderegg-Pacala: `∂Θ/∂E = a A P/K`, P taken as |P|
    WapMod { a: f64 },
}

/// Leaf hydraulic and carbon state; each model reads the values it needs.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HydraulicState {
    /// Net photosynthetic rate A
    pub a_net: Option<f64>,
    /// Maximal photosynthetic rate A_max
    pub a_max: Option<f64>,
    /// Hydraulic conductance K
    pub k: Option<f64>,
    /// Maximal hydraulic conductance K_max
    pub k_max: Option<f64>,
    /// Derivative of conductance with respect to transpiration ∂K/∂E
    pub dk_de: Option<f64>,
    /// Transpiration rate E
    pub e: Option<f64>,
    /// Critical transpiration rate E_crit
    pub e_crit: Option<f64>,
    /// Leaf xylem pressure P [MPa]
    pub p: Option<f64>,
}

impl MarginalRiskModel {
    /// Build a model from its name; `a`/`b` are only read by the WAP variants.
    pub fn from_parts(name: &str, a: Option<f64>, b: Option<f64>) -> ModelResult<Self> {
        let kind: RiskKind = name.parse()?;
        Ok(match kind {
            RiskKind::Eller => Self::Eller,
            RiskKind::Sperry => Self::Sperry,
            RiskKind::Wang => Self::Wang,
            RiskKind::Wap => Self::Wap {
                a: require("a", a)?,
                b: require("b", b)?,
            },
            RiskKind::WapMod => Self::WapMod {
                a: require("a", a)?,
            },
        })
    }

    /// Name of the documented parameter-set type.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Eller => "OSMEller",
            Self::Sperry => "OSMSperry",
            Self::Wang => "OSMWang",
            Self::Wap { .. } => "OSMWAP",
            Self::WapMod { .. } => "OSMWAPMod",
        }
    }

    /// Evaluate ∂Θ/∂E for a hydraulic state.
    pub fn marginal_risk(&self, state: &HydraulicState) -> ModelResult<f64> {
        let risk = match *self {
            Self::Eller => {
                let dk_de = require("∂K/∂E", state.dk_de)?;
                let a = require("A", state.a_net)?;
                let k = nonzero("K", require("K", state.k)?)?;
                -dk_de * a / k
            }
            Self::Sperry => {
                let dk_de = require("∂K/∂E", state.dk_de)?;
                let a_max = require("A_max", state.a_max)?;
                let k_max = nonzero("K_max", require("K_max", state.k_max)?)?;
                -dk_de * a_max / k_max
            }
            Self::Wang => {
                let a = require("A", state.a_net)?;
                let e = require("E", state.e)?;
                let e_crit = require("E_crit", state.e_crit)?;
                let headroom = nonzero("E_crit - E", e_crit - e)?;
                a / headroom
            }
            Self::Wap { a, b } => {
                let a = finite("a", a)?;
                let b = finite("b", b)?;
                let p = require("P", state.p)?;
                let k = nonzero("K", require("K", state.k)?)?;
                (2.0 * a * p + b) / k
            }
            Self::WapMod { a } => {
                let a = finite("a", a)?;
                let a_net = require("A", state.a_net)?;
                let p = require("P", state.p)?.abs();
                let k = nonzero("K", require("K", state.k)?)?;
                a * a_net * p / k
            }
        };
        output("∂Θ/∂E", risk)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RiskKind {
    Eller,
    Sperry,
    Wang,
    Wap,
    WapMod,
}

impl FromStr for RiskKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        let key = key.strip_prefix("osm").unwrap_or(&key);
        match key {
            "eller" => Ok(Self::Eller),
            "sperry" => Ok(Self::Sperry),
            "wang" => Ok(Self::Wang),
            "wap" => Ok(Self::Wap),
            "wapmod" => Ok(Self::WapMod),
            _ => Err(ModelError::OutOfDomain {
                name: "model",
                reason: format!(
                    "unknown optimization model '{}' (expected eller, sperry, wang, wap or wap_mod)",
                    s.trim()
                ),
            }),
        }
    }
}
