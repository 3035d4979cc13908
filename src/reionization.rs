//! Reionization model configuration
//!
//! This module contains the configuration records mirrored by the
//! Fortran side of CAMB. Field order and primitive types are the binary
//! contract with the solver: the solver reads these records in place,
//! so any reordering breaks interoperability.

use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

use crate::error::ReionError;
use crate::params::CambParams;
use crate::solver::ReionizationSolver;

/// Solver-side default parameter values
pub mod defaults {
    /// Mid-point reionization redshift when redshift-driven
    pub const REDSHIFT: f64 = 10.0;
    /// Duration of the ionization transition in redshift
    pub const DELTA_REDSHIFT: f64 = 0.5;
    /// Sentinel fraction: full hydrogen plus first helium ionization
    pub const FULL_IONIZATION: f64 = -1.0;
    /// Redshift of the second helium reionization
    pub const HELIUM_REDSHIFT: f64 = 3.5;
    /// Width in redshift of the second helium reionization
    pub const HELIUM_DELTA_REDSHIFT: f64 = 0.4;
    /// Second helium reionization is included below this redshift
    pub const HELIUM_REDSHIFT_START: f64 = 5.0;
    /// Maximum redshift allowed when mapping tau into a redshift
    pub const MAX_REDSHIFT: f64 = 50.0;
    /// Neutral value for the solver accuracy tuning knobs
    pub const ACCURACY_BOOST: f64 = 1.0;
}

/// Fields shared by every reionization variant.
///
/// Embedded at offset zero of each concrete record so the solver can
/// read `active` and `use_spline` without knowing the variant.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelHeader {
    pub active: bool,     // is reionization modeled at all?
    pub use_spline: bool, // is the Xe curve a tabulated spline?
}

impl Default for ModelHeader {
    fn default() -> Self {
        Self {
            active: true,
            use_spline: false,
        }
    }
}

/// Smooth-step (tanh) parameterization of the ionization fraction,
/// with an optional second helium reionization transition.
///
/// Either `redshift` or `optical_depth` is authoritative, selected by
/// `use_optical_depth`; the setters keep the flag consistent.
#[repr(C)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TanhReionization {
    pub header: ModelHeader,
    pub use_optical_depth: bool,
    pub redshift: f64,                  // mid-point z, if redshift-driven
    pub optical_depth: f64,             // tau, if optical-depth-driven
    pub delta_redshift: f64,            // transition width
    pub fraction: f64,                  // asymptotic Xe, or -1 sentinel
    pub include_helium_fullreion: bool, // second helium reionization?
    pub helium_redshift: f64,
    pub helium_delta_redshift: f64,
    pub helium_redshiftstart: f64,
    pub tau_solve_accuracy_boost: f64,
    pub timestep_boost: f64,
    pub max_redshift: f64,
}

impl Default for TanhReionization {
    fn default() -> Self {
        Self {
            header: ModelHeader::default(),
            use_optical_depth: false,
            redshift: defaults::REDSHIFT,
            optical_depth: 0.0,
            delta_redshift: defaults::DELTA_REDSHIFT,
            fraction: defaults::FULL_IONIZATION,
            include_helium_fullreion: true,
            helium_redshift: defaults::HELIUM_REDSHIFT,
            helium_delta_redshift: defaults::HELIUM_DELTA_REDSHIFT,
            helium_redshiftstart: defaults::HELIUM_REDSHIFT_START,
            tau_solve_accuracy_boost: defaults::ACCURACY_BOOST,
            timestep_boost: defaults::ACCURACY_BOOST,
            max_redshift: defaults::MAX_REDSHIFT,
        }
    }
}

impl TanhReionization {
    /// Set the mid-point reionization redshift.
    ///
    /// Switches the model to redshift-driven mode; `delta_redshift`
    /// optionally overrides the transition width. Returns `self` so
    /// calls can be chained.
    pub fn set_zrei(&mut self, zrei: f64, delta_redshift: Option<f64>) -> &mut Self {
        self.use_optical_depth = false;
        self.redshift = zrei;
        if let Some(dz) = delta_redshift {
            self.delta_redshift = dz;
        }
        self
    }

    /// Set the optical depth.
    ///
    /// Switches the model to optical-depth-driven mode; `delta_redshift`
    /// optionally overrides the transition width. Returns `self` so
    /// calls can be chained.
    pub fn set_tau(&mut self, tau: f64, delta_redshift: Option<f64>) -> &mut Self {
        self.use_optical_depth = true;
        self.optical_depth = tau;
        if let Some(dz) = delta_redshift {
            self.delta_redshift = dz;
        }
        self
    }

    /// Mid-point redshift of reionization.
    ///
    /// In optical-depth mode, or when `tau` is given explicitly, the
    /// solver inverts the effective optical depth (an explicit `tau`
    /// wins over the stored one) against the full cosmological
    /// parameter set. In redshift mode with no override the stored
    /// redshift is returned without calling the solver.
    pub fn get_zre(
        &self,
        solver: &dyn ReionizationSolver,
        params: &CambParams,
        tau: Option<f64>,
    ) -> Result<f64, ReionError> {
        if self.use_optical_depth || tau.is_some() {
            solver.zre_from_tau(params, tau.unwrap_or(self.optical_depth))
        } else {
            Ok(self.redshift)
        }
    }
}

/// Reionization model set from sampled (z, Xe) values.
///
/// The table itself is not retained here: it is forwarded once to the
/// solver, which builds and owns the interpolating spline attached to
/// this record.
#[repr(C)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplinedReionization {
    pub header: ModelHeader,
    pub timestep_boost: f64,
}

impl Default for SplinedReionization {
    fn default() -> Self {
        Self {
            // the shared header must advertise the tabulated representation
            header: ModelHeader {
                active: true,
                use_spline: true,
            },
            timestep_boost: defaults::ACCURACY_BOOST,
        }
    }
}

impl SplinedReionization {
    /// Construct and immediately ingest an explicit (z, Xe) table.
    pub fn from_table(
        solver: &dyn ReionizationSolver,
        z: ArrayView1<'_, f64>,
        xe: ArrayView1<'_, f64>,
    ) -> Result<Self, ReionError> {
        let mut model = Self::default();
        model.set_scalar_table(solver, z, xe)?;
        Ok(model)
    }

    /// Set arrays of z and Xe(z) values for spline interpolation.
    ///
    /// [`set_log_regular`](Self::set_log_regular) is usually preferable:
    /// it is faster and makes fine spacing at low z easier to obtain.
    /// z ordering is not checked here; the solver rejects implausible
    /// tables itself.
    pub fn set_scalar_table(
        &mut self,
        solver: &dyn ReionizationSolver,
        z: ArrayView1<'_, f64>,
        xe: ArrayView1<'_, f64>,
    ) -> Result<(), ReionError> {
        if z.len() != xe.len() {
            return Err(ReionError::TableLengthMismatch {
                z_len: z.len(),
                xe_len: xe.len(),
            });
        }
        if z.is_empty() {
            return Err(ReionError::TableTooShort { min: 1, len: 0 });
        }
        let z = contiguous(&z, "z")?;
        let xe = contiguous(&xe, "Xe")?;

        solver.set_xe_table(self, z, xe)
    }

    /// Set a log-regular Xe(z) table.
    ///
    /// `xe` holds samples spaced log-uniformly in z, with `xe[0]` at
    /// `zmin` and the last sample at `zmax` (inclusive).
    pub fn set_log_regular(
        &mut self,
        solver: &dyn ReionizationSolver,
        zmin: f64,
        zmax: f64,
        xe: ArrayView1<'_, f64>,
    ) -> Result<(), ReionError> {
        if !(zmin < zmax) {
            return Err(ReionError::InvalidBounds { zmin, zmax });
        }
        if xe.len() < 2 {
            return Err(ReionError::TableTooShort {
                min: 2,
                len: xe.len(),
            });
        }
        let xe = contiguous(&xe, "Xe")?;

        solver.set_xe_log_regular(self, zmin, zmax, xe)
    }
}

/// A concrete reionization model, tagged by representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ReionizationModel {
    /// Smooth-step parameterization
    Tanh(TanhReionization),
    /// Tabulated Xe(z) curve splined by the solver
    Splined(SplinedReionization),
}

impl ReionizationModel {
    /// The header fields shared by every variant.
    pub fn header(&self) -> &ModelHeader {
        match self {
            ReionizationModel::Tanh(model) => &model.header,
            ReionizationModel::Splined(model) => &model.header,
        }
    }

    pub fn is_active(&self) -> bool {
        self.header().active
    }

    pub fn uses_spline(&self) -> bool {
        self.header().use_spline
    }
}

impl Default for ReionizationModel {
    fn default() -> Self {
        ReionizationModel::Tanh(TanhReionization::default())
    }
}

/// View the table data as a raw contiguous buffer for the solver.
fn contiguous<'a>(
    view: &ArrayView1<'a, f64>,
    array: &'static str,
) -> Result<&'a [f64], ReionError> {
    view.to_slice()
        .ok_or(ReionError::NonContiguousTable { array })
}
