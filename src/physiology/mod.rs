//! Closed-form equations stated in the StomataModels docstrings.
//!
//! Only the documented expressions are evaluated: empirical stomatal
//! conductance, linear β correction factors, and the marginal risk of the
//! optimization models. Solvers and leaf state updates are out of scope.

pub mod beta;
pub mod empirical;
pub mod optimization;

pub use beta::{BetaDriver, BetaTarget, LinearBeta};
pub use empirical::{EmpiricalKind, EmpiricalModel, LeafDrivers};
pub use optimization::{HydraulicState, MarginalRiskModel};

use crate::error::{ModelError, ModelResult};

fn finite(name: &'static str, value: f64) -> ModelResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ModelError::NonFinite { name })
    }
}

fn output(name: &'static str, value: f64) -> ModelResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ModelError::NonFiniteResult { name })
    }
}

fn require(name: &'static str, value: Option<f64>) -> ModelResult<f64> {
    finite(name, value.ok_or(ModelError::MissingInput { name })?)
}

fn nonzero(what: &'static str, value: f64) -> ModelResult<f64> {
    if value == 0.0 {
        Err(ModelError::ZeroDenominator { what })
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_helpers() {
        assert_eq!(finite("A", 1.5), Ok(1.5));
        assert_eq!(finite("A", f64::NAN), Err(ModelError::NonFinite { name: "A" }));
        assert_eq!(
            require("Cs", None),
            Err(ModelError::MissingInput { name: "Cs" })
        );
        assert_eq!(
            require("Cs", Some(f64::INFINITY)),
            Err(ModelError::NonFinite { name: "Cs" })
        );
        assert_eq!(
            output("gsw", f64::INFINITY),
            Err(ModelError::NonFiniteResult { name: "gsw" })
        );
        assert_eq!(
            nonzero("K", 0.0),
            Err(ModelError::ZeroDenominator { what: "K" })
        );
    }
}
