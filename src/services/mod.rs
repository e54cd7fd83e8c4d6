//! Application service layer.
//!
//! Services contain business logic and input validation. They provide a
//! clean boundary between the MCP handlers and the tools underneath.

mod docs_service;
mod physiology_service;

pub use docs_service::{DocsService, DocsServiceImpl};
pub use physiology_service::{
    BetaRequest, BetaResult, ConductanceRequest, ConductanceResult, MarginalRiskRequest,
    MarginalRiskResult, PhysiologyService, PhysiologyServiceImpl,
};
