//! Empirical stomatal conductance models.
//!
//! Each model returns the steady-state stomatal conductance to water vapour
//! (gsw, mol m⁻² s⁻¹). β scales the g1 term only; Gentine uses the leaf
//! hydraulic conductance ratio instead and ignores β.

use super::{finite, nonzero, output, require};
use crate::error::{ModelError, ModelResult};
use std::fmt;
use std::str::FromStr;

/// Parameter set of an empirical model, as documented on its type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EmpiricalModel {
    /// `gs = g0 + g1 β RH A/Cs`
    BallBerry { g0: f64, g1: f64 },
    /// `gs = g0 + g1 (k_leaf/k_max) A/Ca`
    Gentine { g0: f64, g1: f64 },
    /// `gs = g0 + g1 β A/(Cs − Γ*) · 1/(1 + VPD/d0)`, d0 in Pa
    Leuning { g0: f64, g1: f64, d0: f64 },
    /// `gs = g0 + 1.6 (1 + g1 β/√VPD) A/Ca`, g1 in Pa⁰·⁵
    Medlyn { g0: f64, g1: f64 },
}

/// Environmental and leaf inputs; each model reads the ones its equation uses.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LeafDrivers {
    /// Net photosynthetic rate A
    pub a_net: Option<f64>,
    /// Leaf surface CO₂ (Cs)
    pub cs: Option<f64>,
    /// Atmospheric CO₂ (Ca)
    pub ca: Option<f64>,
    /// Relative humidity at the leaf surface, 0-1
    pub rh: Option<f64>,
    /// Vapour pressure deficit [Pa]
    pub vpd: Option<f64>,
    /// CO₂ compensation point Γ*
    pub gamma_star: Option<f64>,
    /// Leaf hydraulic conductance
    pub k_leaf: Option<f64>,
    /// Maximal leaf hydraulic conductance
    pub k_max: Option<f64>,
}

/// Which model families exist, for name parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmpiricalKind {
    BallBerry,
    Gentine,
    Leuning,
    Medlyn,
}

impl FromStr for EmpiricalKind {
    type Err = ModelError;

    /// Accepts `ballberry`, `ball_berry`, `Ball-Berry` and `ESMBallBerry` spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        let key = key.strip_prefix("esm").unwrap_or(&key);
        match key {
            "ballberry" => Ok(Self::BallBerry),
            "gentine" => Ok(Self::Gentine),
            "leuning" => Ok(Self::Leuning),
            "medlyn" => Ok(Self::Medlyn),
            _ => Err(ModelError::OutOfDomain {
                name: "model",
                reason: format!(
                    "unknown empirical model '{}' (expected ball_berry, gentine, leuning or medlyn)",
                    s.trim()
                ),
            }),
        }
    }
}

impl EmpiricalModel {
    /// Build a parameter set; `d0` is only read by Leuning.
    pub fn new(kind: EmpiricalKind, g0: f64, g1: f64, d0: Option<f64>) -> ModelResult<Self> {
        let g0 = finite("g0", g0)?;
        let g1 = finite("g1", g1)?;
        Ok(match kind {
            EmpiricalKind::BallBerry => Self::BallBerry { g0, g1 },
            EmpiricalKind::Gentine => Self::Gentine { g0, g1 },
            EmpiricalKind::Leuning => Self::Leuning {
                g0,
                g1,
                d0: require("d0", d0)?,
            },
            EmpiricalKind::Medlyn => Self::Medlyn { g0, g1 },
        })
    }

    /// Name of the documented parameter-set type.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::BallBerry { .. } => "ESMBallBerry",
            Self::Gentine { .. } => "ESMGentine",
            Self::Leuning { .. } => "ESMLeuning",
            Self::Medlyn { .. } => "ESMMedlyn",
        }
    }

    /// Whether β enters the equation.
    pub fn uses_beta(&self) -> bool {
        !matches!(self, Self::Gentine { .. })
    }

    /// Stomatal conductance to H₂O for the given drivers and β.
    pub fn gsw(&self, drivers: &LeafDrivers, beta: f64) -> ModelResult<f64> {
        let beta = finite("β", beta)?;
        if self.uses_beta() && !(0.0..=1.0).contains(&beta) {
            return Err(ModelError::OutOfDomain {
                name: "β",
                reason: format!("{} is outside [0, 1]", beta),
            });
        }
        let a = require("A", drivers.a_net)?;

        let gsw = match *self {
            Self::BallBerry { g0, g1 } => {
                let rh = require("RH", drivers.rh)?;
                let cs = nonzero("Cs", require("Cs", drivers.cs)?)?;
                g0 + g1 * beta * rh * a / cs
            }
            Self::Gentine { g0, g1 } => {
                let k_leaf = require("k_leaf", drivers.k_leaf)?;
                let k_max = nonzero("k_max", require("k_max", drivers.k_max)?)?;
                let ca = nonzero("Ca", require("Ca", drivers.ca)?)?;
                g0 + g1 * (k_leaf / k_max) * a / ca
            }
            Self::Leuning { g0, g1, d0 } => {
                let cs = require("Cs", drivers.cs)?;
                let gamma_star = require("Γ*", drivers.gamma_star)?;
                let vpd = require("VPD", drivers.vpd)?;
                let d0 = nonzero("d0", d0)?;
                let co2_gap = nonzero("Cs - Γ*", cs - gamma_star)?;
                let humidity = nonzero("1 + VPD/d0", 1.0 + vpd / d0)?;
                g0 + g1 * beta * a / co2_gap / humidity
            }
            Self::Medlyn { g0, g1 } => {
                let vpd = require("VPD", drivers.vpd)?;
                if vpd <= 0.0 {
                    return Err(ModelError::OutOfDomain {
                        name: "VPD",
                        reason: format!("{} must be positive", vpd),
                    });
                }
                let ca = nonzero("Ca", require("Ca", drivers.ca)?)?;
                g0 + 1.6 * (1.0 + g1 * beta / vpd.sqrt()) * a / ca
            }
        };
        output("gsw", gsw)
    }
}

impl fmt::Display for EmpiricalModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn drivers() -> LeafDrivers {
        LeafDrivers {
            a_net: Some(10.0),
            cs: Some(400.0),
            ca: Some(400.0),
            rh: Some(0.7),
            vpd: Some(1600.0),
            gamma_star: Some(40.0),
            k_leaf: Some(0.5),
            k_max: Some(1.0),
        }
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("Ball-Berry".parse::<EmpiricalKind>(), Ok(EmpiricalKind::BallBerry));
        assert_eq!("ESMMedlyn".parse::<EmpiricalKind>(), Ok(EmpiricalKind::Medlyn));
        assert_eq!(" leuning ".parse::<EmpiricalKind>(), Ok(EmpiricalKind::Leuning));
        assert!("jarvis".parse::<EmpiricalKind>().is_err());
    }

    #[test]
    fn test_ball_berry() {
        let model = EmpiricalModel::BallBerry { g0: 0.025, g1: 9.0 };
        assert_relative_eq!(model.gsw(&drivers(), 1.0).unwrap(), 0.1825, epsilon = 1e-12);
        // β = 0 leaves only the residual conductance
        assert_relative_eq!(model.gsw(&drivers(), 0.0).unwrap(), 0.025, epsilon = 1e-12);
    }

    #[test]
    fn test_gentine_ignores_beta() {
        let model = EmpiricalModel::Gentine { g0: 0.025, g1: 9.0 };
        let full = model.gsw(&drivers(), 1.0).unwrap();
        assert_relative_eq!(full, 0.1375, epsilon = 1e-12);
        assert_relative_eq!(model.gsw(&drivers(), 0.3).unwrap(), full, epsilon = 1e-12);
        assert!(!model.uses_beta());
    }

    #[test]
    fn test_leuning() {
        let model = EmpiricalModel::new(EmpiricalKind::Leuning, 0.025, 8.0, Some(3000.0)).unwrap();
        let d = LeafDrivers {
            vpd: Some(1500.0),
            ..drivers()
        };
        // 8 * 10 / 360 / 1.5 + 0.025
        assert_relative_eq!(model.gsw(&d, 1.0).unwrap(), 0.173_148_148_148, epsilon = 1e-9);
    }

    #[test]
    fn test_medlyn() {
        let model = EmpiricalModel::Medlyn { g0: 0.025, g1: 125.0 };
        assert_relative_eq!(model.gsw(&drivers(), 1.0).unwrap(), 0.19, epsilon = 1e-12);
        assert_relative_eq!(model.gsw(&drivers(), 0.5).unwrap(), 0.1275, epsilon = 1e-12);
    }

    #[test]
    fn test_medlyn_requires_positive_vpd() {
        let model = EmpiricalModel::Medlyn { g0: 0.025, g1: 125.0 };
        let d = LeafDrivers {
            vpd: Some(0.0),
            ..drivers()
        };
        assert!(matches!(
            model.gsw(&d, 1.0),
            Err(ModelError::OutOfDomain { name: "VPD", .. })
        ));
    }

    #[test]
    fn test_zero_denominators() {
        let leuning = EmpiricalModel::Leuning { g0: 0.0, g1: 8.0, d0: 3000.0 };
        let d = LeafDrivers {
            gamma_star: Some(400.0),
            ..drivers()
        };
        assert_eq!(
            leuning.gsw(&d, 1.0),
            Err(ModelError::ZeroDenominator { what: "Cs - Γ*" })
        );

        let bb = EmpiricalModel::BallBerry { g0: 0.0, g1: 9.0 };
        let d = LeafDrivers {
            cs: Some(0.0),
            ..drivers()
        };
        assert_eq!(bb.gsw(&d, 1.0), Err(ModelError::ZeroDenominator { what: "Cs" }));
    }

    #[test]
    fn test_overflowing_result_is_an_error() {
        let bb = EmpiricalModel::BallBerry { g0: 0.0, g1: 1e200 };
        let d = LeafDrivers {
            a_net: Some(1e200),
            cs: Some(1.0),
            rh: Some(1.0),
            ..drivers()
        };
        assert_eq!(
            bb.gsw(&d, 1.0),
            Err(ModelError::NonFiniteResult { name: "gsw" })
        );
    }

    #[test]
    fn test_missing_and_invalid_inputs() {
        let bb = EmpiricalModel::BallBerry { g0: 0.0, g1: 9.0 };
        let d = LeafDrivers {
            rh: None,
            ..drivers()
        };
        assert_eq!(bb.gsw(&d, 1.0), Err(ModelError::MissingInput { name: "RH" }));
        assert!(matches!(
            bb.gsw(&drivers(), 1.5),
            Err(ModelError::OutOfDomain { name: "β", .. })
        ));
        assert_eq!(
            EmpiricalModel::new(EmpiricalKind::Leuning, 0.0, 8.0, None),
            Err(ModelError::MissingInput { name: "d0" })
        );
        assert_eq!(
            EmpiricalModel::new(EmpiricalKind::Medlyn, f64::NAN, 8.0, None),
            Err(ModelError::NonFinite { name: "g0" })
        );
    }
}
