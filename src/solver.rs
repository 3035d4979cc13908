//! Solver boundary for reionization calculations
//!
//! The numerical work (spline construction, optical-depth inversion)
//! happens in the compiled CAMB library. This trait is the seam in
//! front of it, so configuration code and tests can run against a stub
//! while production code uses [`FortranSolver`](crate::FortranSolver).

use crate::error::ReionError;
use crate::params::CambParams;
use crate::reionization::SplinedReionization;

/// Entry points of the compiled reionization solver.
///
/// Every method is a direct, blocking call: table buffers are borrowed
/// only for the duration of the call and the solver keeps no pointer to
/// them afterwards. The resulting spline state is owned by the solver
/// and attached to the model record passed in.
pub trait ReionizationSolver {
    /// Ingest an explicit Xe(z) table for spline interpolation.
    ///
    /// `z` and `xe` must be equal-length contiguous buffers; the model
    /// layer validates this before calling.
    fn set_xe_table(
        &self,
        model: &mut SplinedReionization,
        z: &[f64],
        xe: &[f64],
    ) -> Result<(), ReionError>;

    /// Ingest Xe samples spaced log-uniformly in z over `[zmin, zmax]`.
    fn set_xe_log_regular(
        &self,
        model: &mut SplinedReionization,
        zmin: f64,
        zmax: f64,
        xe: &[f64],
    ) -> Result<(), ReionError>;

    /// Invert an optical depth into the mid-point reionization redshift
    /// for the given cosmological parameter set.
    fn zre_from_tau(&self, params: &CambParams, tau: f64) -> Result<f64, ReionError>;
}
