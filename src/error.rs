//! Error types for the reionization binding layer

use thiserror::Error;

/// Errors raised while configuring reionization models or marshaling
/// them into the compiled solver.
///
/// Table-shape and bounds problems are caught before any foreign call
/// is made; everything past the boundary either succeeds or fails
/// inside the solver as a whole, so no partial state is committed.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReionError {
    /// The z and Xe tables must pair up sample-for-sample.
    #[error("z and Xe tables must have equal length (got {z_len} z values and {xe_len} Xe values)")]
    TableLengthMismatch { z_len: usize, xe_len: usize },

    /// Too few samples to describe an ionization curve.
    #[error("ionization table needs at least {min} samples (got {len})")]
    TableTooShort { min: usize, len: usize },

    /// A strided view cannot be handed to the solver as a raw buffer.
    #[error("{array} array must be contiguous in memory to cross the solver boundary")]
    NonContiguousTable { array: &'static str },

    /// Log-regular sampling needs a non-empty, ordered z interval.
    #[error("log-regular bounds require zmin < zmax (got zmin = {zmin}, zmax = {zmax})")]
    InvalidBounds { zmin: f64, zmax: f64 },

    /// The cosmological parameter handle does not point at a solver record.
    #[error("cosmological parameter handle is null")]
    NullParams,

    /// No solver shared library was found in any candidate location.
    #[error("could not find the CAMB solver library in {searched} candidate locations; set CAMB_LIBRARY_PATH to the shared library")]
    LibraryNotFound { searched: usize },

    /// The solver shared library exists but could not be loaded.
    #[error("failed to load CAMB solver library from {path}: {source}")]
    LibraryLoad {
        path: String,
        #[source]
        source: libloading::Error,
    },

    /// The loaded library does not export an expected entry point.
    #[error("CAMB solver library is missing symbol {name}: {source}")]
    MissingSymbol {
        name: &'static str,
        #[source]
        source: libloading::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_mismatch_message_names_both_lengths() {
        let err = ReionError::TableLengthMismatch { z_len: 4, xe_len: 3 };
        let message = err.to_string();
        assert!(message.contains("4 z values"));
        assert!(message.contains("3 Xe values"));
    }

    #[test]
    fn library_not_found_message_suggests_override() {
        let err = ReionError::LibraryNotFound { searched: 3 };
        assert!(err.to_string().contains("CAMB_LIBRARY_PATH"));
    }
}
