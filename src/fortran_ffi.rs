//! FFI bindings to the Fortran reionization module of CAMB
//!
//! This module provides safe Rust wrappers around the solver entry
//! points. The solver is compiled separately and attached as a shared
//! library at runtime.

use std::env;
use std::ffi::c_void;
use std::path::{Path, PathBuf};

use libloading::{Library, Symbol};
use log::{debug, info};

use crate::error::ReionError;
use crate::params::CambParams;
use crate::reionization::SplinedReionization;
use crate::solver::ReionizationSolver;

// ============================================================================
// Type definitions for Fortran function signatures
// ============================================================================

/// Ingest an explicit tabulated Xe(z) curve into the solver-owned spline.
/// Scalars are passed by reference, Fortran-style.
type SetTable = unsafe extern "C" fn(
    this: *mut SplinedReionization,
    n: *const i32,
    z: *const f64,
    xe: *const f64,
);

/// Ingest a log-regularly sampled Xe curve between zmin and zmax.
type SetLogRegular = unsafe extern "C" fn(
    this: *mut SplinedReionization,
    zmin: *const f64,
    zmax: *const f64,
    n: *const i32,
    xe: *const f64,
);

/// Invert optical depth into the mid-point reionization redshift.
/// Declared `nopass` on the Fortran side, so there is no instance
/// argument; the parameter record carries all required context.
type GetZreFromTau = unsafe extern "C" fn(params: *mut c_void, tau: *const f64) -> f64;

// gfortran-mangled names of the module procedures in reionization.f90
const SYM_SET_TABLE: &[u8] = b"__reionization_MOD_tsplinedreionizationmodel_settable";
const SYM_SET_LOG_REGULAR: &[u8] = b"__reionization_MOD_tsplinedreionizationmodel_setlogregular";
const SYM_GET_ZRE_FROM_TAU: &[u8] = b"__reionization_MOD_ttanhreionization_getzrefromtau";

#[cfg(target_os = "windows")]
const LIBRARY_FILE: &str = "camblib.dll";
#[cfg(target_os = "macos")]
const LIBRARY_FILE: &str = "libcamblib.dylib";
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
const LIBRARY_FILE: &str = "libcamblib.so";

// ============================================================================
// Library attachment
// ============================================================================

/// Candidate locations for the solver shared library, in search order.
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    // Explicit override
    if let Ok(path) = env::var("CAMB_LIBRARY_PATH") {
        paths.push(PathBuf::from(path));
    }

    // Next to the current executable
    if let Some(dir) = env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
    {
        paths.push(dir.join(LIBRARY_FILE));
    }

    // Current working directory
    paths.push(PathBuf::from(LIBRARY_FILE));

    paths
}

/// Handle to the compiled CAMB solver library.
///
/// Production implementation of [`ReionizationSolver`]: each call
/// resolves the Fortran entry point and forwards the arguments with no
/// buffering or state of its own.
#[derive(Debug)]
pub struct FortranSolver {
    lib: Library,
}

impl FortranSolver {
    /// Attach to the solver library, searching the usual locations.
    pub fn load() -> Result<Self, ReionError> {
        let candidates = candidate_paths();
        for path in &candidates {
            match unsafe { Library::new(path) } {
                Ok(lib) => {
                    info!("Loaded CAMB solver library from: {}", path.display());
                    return Ok(Self { lib });
                }
                Err(err) => debug!("No CAMB solver library at {}: {}", path.display(), err),
            }
        }
        Err(ReionError::LibraryNotFound {
            searched: candidates.len(),
        })
    }

    /// Attach to the solver library at an explicit path.
    pub fn with_path<P: AsRef<Path>>(path: P) -> Result<Self, ReionError> {
        let path = path.as_ref();
        let lib = unsafe { Library::new(path) }.map_err(|source| ReionError::LibraryLoad {
            path: path.display().to_string(),
            source,
        })?;
        info!("Loaded CAMB solver library from: {}", path.display());
        Ok(Self { lib })
    }

    fn symbol<T>(
        &self,
        name: &'static str,
        mangled: &'static [u8],
    ) -> Result<Symbol<T>, ReionError> {
        unsafe { self.lib.get(mangled) }
            .map_err(|source| ReionError::MissingSymbol { name, source })
    }
}

// ============================================================================
// Safe wrappers for the Fortran entry points
// ============================================================================

impl ReionizationSolver for FortranSolver {
    fn set_xe_table(
        &self,
        model: &mut SplinedReionization,
        z: &[f64],
        xe: &[f64],
    ) -> Result<(), ReionError> {
        debug_assert_eq!(z.len(), xe.len());
        let func: Symbol<SetTable> = self.symbol("SetTable", SYM_SET_TABLE)?;
        let n = z.len() as i32;

        debug!("Forwarding {} Xe(z) samples to the solver spline", n);
        unsafe {
            func(model, &n, z.as_ptr(), xe.as_ptr());
        }

        Ok(())
    }

    fn set_xe_log_regular(
        &self,
        model: &mut SplinedReionization,
        zmin: f64,
        zmax: f64,
        xe: &[f64],
    ) -> Result<(), ReionError> {
        let func: Symbol<SetLogRegular> = self.symbol("SetLogRegular", SYM_SET_LOG_REGULAR)?;
        let n = xe.len() as i32;

        debug!(
            "Forwarding {} log-regular Xe samples over z = [{}, {}]",
            n, zmin, zmax
        );
        unsafe {
            func(model, &zmin, &zmax, &n, xe.as_ptr());
        }

        Ok(())
    }

    fn zre_from_tau(&self, params: &CambParams, tau: f64) -> Result<f64, ReionError> {
        let func: Symbol<GetZreFromTau> = self.symbol("GetZreFromTau", SYM_GET_ZRE_FROM_TAU)?;

        debug!("Inverting optical depth {} into a reionization redshift", tau);
        let zre = unsafe { func(params.as_ptr(), &tau) };

        Ok(zre)
    }
}
