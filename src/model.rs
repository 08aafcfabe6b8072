use serde::{Deserialize, Serialize};
use crate::config::FlowConfig;
use crate::hydro::error::Error;




/// Ratio of specific heats used for air.
pub const GAMMA_LAW_INDEX: f64 = 1.4;

/// Gas constant used in the reference Mach number, J/(mol K).
pub const UNIVERSAL_GAS_CONSTANT: f64 = 8.314462175;




/**
 * Immutable model parameters shared read-only by the flux kernels. All values
 * are in the normalized unit system, except `ref_temperature` which
 * redimensionalizes temperature for Sutherland's law.
 */
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub gamma: f64,
    pub gas_constant: f64,
    pub cv: f64,
    pub ref_mu: f64,
    pub ref_temperature: f64,
    pub ref_mach: f64,
}




// ============================================================================
impl Model {

    /**
     * Build a model from a reference Mach number. The normalized gas constant
     * is `1 / (gamma Ma^2)` so that the reference state has unit density,
     * velocity, and temperature.
     */
    pub fn new(gamma: f64, ref_mach: f64, ref_mu: f64, ref_temperature: f64) -> Self {
        let gas_constant = 1.0 / (gamma * ref_mach * ref_mach);
        Self {
            gamma,
            gas_constant,
            cv: gas_constant / (gamma - 1.0),
            ref_mu,
            ref_temperature,
            ref_mach,
        }
    }

    /**
     * Normalize the dimensional reference quantities of a flow description.
     */
    pub fn from_reference(flow: &FlowConfig) -> Result<Self, Error> {
        flow.validate()?;

        let gamma = GAMMA_LAW_INDEX;
        let ref_mach = flow.velocity / (gamma * UNIVERSAL_GAS_CONSTANT * flow.temperature).sqrt();
        let ref_mu = flow.viscosity / (flow.density * flow.velocity * flow.length);

        Ok(Self::new(gamma, ref_mach, ref_mu, flow.temperature))
    }
}
