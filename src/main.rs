//! Reionization configuration demo - Main Entry Point
//!
//! Builds a reionization model, prints it as JSON, and attaches to the
//! compiled CAMB solver library if one is available.

use camb_reionization::{FortranSolver, ReionizationModel, TanhReionization};
use log::{info, warn};

fn main() {
    // Initialize logging
    env_logger::init();

    // Planck-like optical depth configuration
    let mut tanh = TanhReionization::default();
    tanh.set_tau(0.054, None);
    let model = ReionizationModel::Tanh(tanh);

    match serde_json::to_string_pretty(&model) {
        Ok(json) => println!("{json}"),
        Err(err) => warn!("Could not serialize the model: {err}"),
    }

    match FortranSolver::load() {
        Ok(_solver) => info!("CAMB solver library attached and ready"),
        Err(err) => warn!("CAMB solver library unavailable: {err}"),
    }
}
