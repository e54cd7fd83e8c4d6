//! Linear β correction factors.
//!
//! `BetaG*` variants scale g1 in empirical models, `BetaV*` variants scale
//! Vcmax. Each is driven by leaf water potential, soil water potential or
//! soil water content and is linear between its lower and upper bound.

use super::{finite, require};
use crate::error::{ModelError, ModelResult};
use std::fmt;

/// Which parameter the factor corrects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BetaTarget {
    /// `BetaG*`: slope g1 of empirical models
    G1,
    /// `BetaV*`: maximal carboxylation rate
    Vcmax,
}

/// Quantity the factor responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BetaDriver {
    /// Leaf water potential [MPa]
    Pleaf,
    /// Soil water potential [MPa]
    Psoil,
    /// Soil water content
    Swc,
}

impl BetaDriver {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pleaf => "Pleaf",
            Self::Psoil => "Psoil",
            Self::Swc => "SWC",
        }
    }
}

/// A linear β function with validated bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearBeta {
    target: BetaTarget,
    driver: BetaDriver,
    lower: f64,
    upper: f64,
}

impl LinearBeta {
    /// Create a β function.
    ///
    /// # Errors
    ///
    /// `InvalidBounds` unless `lower < upper`.
    pub fn new(
        target: BetaTarget,
        driver: BetaDriver,
        lower: f64,
        upper: f64,
    ) -> ModelResult<Self> {
        let lower = finite("lower", lower)?;
        let upper = finite("upper", upper)?;
        if lower >= upper {
            return Err(ModelError::InvalidBounds { lower, upper });
        }
        Ok(Self {
            target,
            driver,
            lower,
            upper,
        })
    }

    /// Create a β function from a documented type name such as `BetaGLinearPleaf`.
    pub fn from_type_name(name: &str, lower: f64, upper: f64) -> ModelResult<Self> {
        let name = name.trim();
        let unknown = || ModelError::OutOfDomain {
            name: "beta_function",
            reason: format!(
                "unknown β function '{}' (expected Beta[G|V]Linear[Pleaf|Psoil|SWC])",
                name
            ),
        };

        let rest = name.strip_prefix("Beta").ok_or_else(unknown)?;
        let (target, rest) = match rest.chars().next() {
            Some('G') => (BetaTarget::G1, &rest[1..]),
            Some('V') => (BetaTarget::Vcmax, &rest[1..]),
            _ => return Err(unknown()),
        };
        let driver = match rest.strip_prefix("Linear").ok_or_else(unknown)? {
            "Pleaf" => BetaDriver::Pleaf,
            "Psoil" => BetaDriver::Psoil,
            "SWC" => BetaDriver::Swc,
            _ => return Err(unknown()),
        };

        Self::new(target, driver, lower, upper)
    }

    pub fn target(&self) -> BetaTarget {
        self.target
    }

    pub fn driver(&self) -> BetaDriver {
        self.driver
    }

    pub fn bounds(&self) -> (f64, f64) {
        (self.lower, self.upper)
    }

    /// Documented type name of this variant.
    pub fn type_name(&self) -> String {
        let target = match self.target {
            BetaTarget::G1 => "G",
            BetaTarget::Vcmax => "V",
        };
        format!("Beta{}Linear{}", target, self.driver.as_str())
    }

    /// β for a driver value: 1 at or above the upper bound, 0 at or below the
    /// lower bound, linear in between.
    pub fn beta(&self, value: f64) -> ModelResult<f64> {
        let value = finite(self.driver.as_str(), value)?;
        if value >= self.upper {
            Ok(1.0)
        } else if value <= self.lower {
            Ok(0.0)
        } else {
            // Halved so that wide finite bounds cannot overflow the span
            Ok((value / 2.0 - self.lower / 2.0) / (self.upper / 2.0 - self.lower / 2.0))
        }
    }

    /// β from the full set of drivers; only the one this variant reads is required.
    pub fn beta_factor(
        &self,
        pl: Option<f64>,
        ps: Option<f64>,
        swc: Option<f64>,
    ) -> ModelResult<f64> {
        let value = match self.driver {
            BetaDriver::Pleaf => require("pl", pl)?,
            BetaDriver::Psoil => require("ps", ps)?,
            BetaDriver::Swc => require("swc", swc)?,
        };
        self.beta(value)
    }
}

impl fmt::Display for LinearBeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}, {}]", self.type_name(), self.lower, self.upper)
    }
}
