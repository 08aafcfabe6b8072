use std::io;
use thiserror::Error;

use super::geometry::Direction;




/**
 * Error to represent nonphysical hydrodynamics data, invalid model selectors,
 * misconfigured geometry, or failures while reading and writing case data.
 */
#[derive(Debug, Error)]
pub enum Error {
    #[error("nonphysical state: density {density}, specific internal energy {internal_energy}")]
    NonphysicalState {
        density: f64,
        internal_energy: f64,
    },

    #[error("bad {kind} selector: {value}")]
    BadSelector { kind: &'static str, value: i64 },

    #[error("obstacle {index} has non-positive radius {radius}")]
    NonPositiveRadius { index: usize, radius: f64 },

    #[error("obstacle {index} is centered outside the domain")]
    ObstacleOutsideDomain { index: usize },

    #[error("stencil along {axis:?} at node {index:?} reaches outside the node array")]
    StencilOutOfRange {
        axis: Direction,
        index: (i64, i64, i64),
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("cbor: {0}")]
    Cbor(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}
