//! Physiology service layer.
//!
//! Turns loosely typed tool input into validated model parameter sets and
//! evaluates the documented equations.

use crate::error::ModelResult;
use crate::physiology::{
    EmpiricalKind, EmpiricalModel, HydraulicState, LeafDrivers, LinearBeta, MarginalRiskModel,
};
use serde::Serialize;

/// Input for an empirical conductance evaluation.
#[derive(Debug, Clone, Default)]
pub struct ConductanceRequest {
    /// Model name (`ball_berry`, `gentine`, `leuning`, `medlyn` or the `ESM*` type name)
    pub model: String,
    pub g0: f64,
    pub g1: f64,
    /// Leuning only [Pa]
    pub d0: Option<f64>,
    /// Correction factor; 1 when absent
    pub beta: Option<f64>,
    pub drivers: LeafDrivers,
}

/// Result of an empirical conductance evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct ConductanceResult {
    pub model: &'static str,
    /// Stomatal conductance to H₂O [mol m⁻² s⁻¹]
    pub gsw: f64,
    pub beta: f64,
    pub beta_applied: bool,
}

/// Input for a β evaluation.
#[derive(Debug, Clone, Default)]
pub struct BetaRequest {
    /// Type name such as `BetaGLinearPleaf`
    pub beta_function: String,
    pub lower: f64,
    pub upper: f64,
    /// Leaf water potential [MPa]
    pub pl: Option<f64>,
    /// Soil water potential [MPa]
    pub ps: Option<f64>,
    /// Soil water content
    pub swc: Option<f64>,
}

/// Result of a β evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct BetaResult {
    pub beta_function: String,
    pub driver: &'static str,
    pub beta: f64,
}

/// Input for a marginal risk evaluation.
#[derive(Debug, Clone, Default)]
pub struct MarginalRiskRequest {
    /// Model name (`eller`, `sperry`, `wang`, `wap`, `wap_mod` or the `OSM*` type name)
    pub model: String,
    /// WAP/WAPMod quadratic parameter a
    pub a: Option<f64>,
    /// WAP quadratic parameter b
    pub b: Option<f64>,
    pub state: HydraulicState,
}

/// Result of a marginal risk evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct MarginalRiskResult {
    pub model: &'static str,
    /// ∂Θ/∂E
    pub marginal_risk: f64,
}

/// Physiology service trait for evaluating the documented equations.
pub trait PhysiologyService: Send + Sync {
    /// Steady-state gsw from an empirical model.
    fn empirical_conductance(&self, request: ConductanceRequest) -> ModelResult<ConductanceResult>;

    /// β from a linear β function.
    fn beta_factor(&self, request: BetaRequest) -> ModelResult<BetaResult>;

    /// ∂Θ/∂E from an optimization model.
    fn marginal_risk(&self, request: MarginalRiskRequest) -> ModelResult<MarginalRiskResult>;
}

/// Default implementation of PhysiologyService.
#[derive(Debug, Clone, Default)]
pub struct PhysiologyServiceImpl;

impl PhysiologyServiceImpl {
    pub fn new() -> Self {
        Self
    }
}

impl PhysiologyService for PhysiologyServiceImpl {
    fn empirical_conductance(&self, request: ConductanceRequest) -> ModelResult<ConductanceResult> {
        let kind: EmpiricalKind = request.model.parse()?;
        let model = EmpiricalModel::new(kind, request.g0, request.g1, request.d0)?;
        let beta = request.beta.unwrap_or(1.0);
        let gsw = model.gsw(&request.drivers, beta)?;

        tracing::debug!("{} gsw = {}", model, gsw);
        Ok(ConductanceResult {
            model: model.type_name(),
            gsw,
            beta,
            beta_applied: model.uses_beta(),
        })
    }

    fn beta_factor(&self, request: BetaRequest) -> ModelResult<BetaResult> {
        let bt = LinearBeta::from_type_name(&request.beta_function, request.lower, request.upper)?;
        let beta = bt.beta_factor(request.pl, request.ps, request.swc)?;

        tracing::debug!("{} β = {}", bt, beta);
        Ok(BetaResult {
            beta_function: bt.type_name(),
            driver: bt.driver().as_str(),
            beta,
        })
    }

    fn marginal_risk(&self, request: MarginalRiskRequest) -> ModelResult<MarginalRiskResult> {
        let model = MarginalRiskModel::from_parts(&request.model, request.a, request.b)?;
        let marginal_risk = model.marginal_risk(&request.state)?;

        tracing::debug!("{} ∂Θ/∂E = {}", model.type_name(), marginal_risk);
        Ok(MarginalRiskResult {
            model: model.type_name(),
            marginal_risk,
        })
    }
}
