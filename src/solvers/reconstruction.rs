use std::convert::TryFrom;
use serde::{Deserialize, Serialize};
use crate::hydro::error::Error;




/// Slope limiter for the MUSCL reconstruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Limiter {
    MinMod,
    VanLeer,
}

/// How a face value is reconstructed from the nodes around the face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reconstruction {
    /// Piecewise constant: the upwind node value.
    FirstOrder,

    /// Piecewise linear with a limited slope.
    Muscl { limiter: Limiter },
}




// ============================================================================
impl Limiter {

    /**
     * Limited slope from the backward and forward differences. Zero at
     * extrema, where the two differences have opposite signs.
     */
    pub fn limit(&self, a: f64, b: f64) -> f64 {
        if a * b <= 0.0 {
            return 0.0;
        }
        match self {
            Limiter::MinMod => a.signum() * a.abs().min(b.abs()),
            Limiter::VanLeer => 2.0 * a * b / (a + b),
        }
    }
}




// ============================================================================
impl Reconstruction {

    /**
     * Number of nodes needed on each side of a face.
     */
    pub fn stencil_radius(&self) -> i64 {
        match self {
            Reconstruction::FirstOrder => 1,
            Reconstruction::Muscl { .. } => 2,
        }
    }

    /**
     * Face value from a stencil of `2 r` values ordered in the upwind
     * direction: the face sits between `s[r - 1]` and `s[r]`, and `s[r - 1]`
     * is the upwind node. Mirror the stencil to reconstruct from the other
     * side.
     */
    pub fn face_value(&self, s: &[f64]) -> f64 {
        match self {
            Reconstruction::FirstOrder => s[0],
            Reconstruction::Muscl { limiter } => s[1] + 0.5 * limiter.limit(s[1] - s[0], s[2] - s[1]),
        }
    }
}

impl Default for Reconstruction {
    fn default() -> Self {
        Reconstruction::Muscl { limiter: Limiter::MinMod }
    }
}

impl TryFrom<i64> for Reconstruction {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self, Error> {
        match value {
            0 => Ok(Reconstruction::FirstOrder),
            1 => Ok(Reconstruction::Muscl { limiter: Limiter::MinMod }),
            2 => Ok(Reconstruction::Muscl { limiter: Limiter::VanLeer }),
            _ => Err(Error::BadSelector { kind: "reconstruction", value }),
        }
    }
}
