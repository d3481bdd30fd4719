//! CLI logic for the Chordal layout tool.
//!
//! This module contains the core CLI logic: load the configuration and chord
//! data, lay the diagram out, and write the layout as TOML.

pub mod data;
pub mod error_adapter;
pub mod output;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use chordal::{ChordBuilder, ChordalError};

/// Run the Chordal CLI application
///
/// This function lays out the chord data in the input file and writes the
/// resulting layout document to the output file.
///
/// # Errors
///
/// Returns `ChordalError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Data file errors
/// - Layout errors
pub fn run(args: &Args) -> Result<(), ChordalError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing chord data"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let data = data::load_data(&args.input)?;

    let builder = ChordBuilder::new(app_config);
    let prepared = builder.prepare(&data);
    let layout = builder.layout_prepared(&prepared)?;

    fs::write(&args.output, output::to_toml(&prepared, &layout)?)?;

    info!(output_file = args.output; "Layout exported successfully");

    Ok(())
}
