//! Artra is the numerical flux core of a compressible Navier-Stokes solver
//! on structured Cartesian grids, with rigid obstacles embedded through a
//! ghost-cell immersed boundary method. It provides the characteristic
//! decomposition of the 3D Euler system, flux-vector splitting of its
//! eigenvalues, upwind reconstruction of the convective flux in
//! characteristic variables, viscous fluxes from a staggered ten-point
//! stencil, and the classification of grid nodes into fluid, solid, and
//! ghost nodes. A forward Euler sweep and an Ensight Gold exporter are
//! included to drive and inspect the kernels.

pub mod config;
pub mod ensight;
pub mod gcibm;
pub mod grid;
pub mod hydro;
pub mod index_space;
pub mod model;
pub mod node;
pub mod partition;
pub mod solvers;
