//! CAMB Reionization Bindings
//!
//! Configuration types for the reionization models of the CAMB
//! Boltzmann solver. The records defined here share their binary layout
//! with the compiled Fortran library, which performs the actual
//! reionization-history calculations.

pub mod error;
pub mod fortran_ffi;
pub mod params;
pub mod reionization;
pub mod solver;

pub use error::ReionError;
pub use fortran_ffi::FortranSolver;
pub use params::CambParams;
pub use reionization::{ModelHeader, ReionizationModel, SplinedReionization, TanhReionization};
pub use solver::ReionizationSolver;
