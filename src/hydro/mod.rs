pub mod characteristic;
pub mod error;
pub mod euler;
pub mod geometry;
pub mod splitting;
pub mod viscous;
