use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use chordal::ChordalError;
use chordal_cli::{Args, run};

/// Collects all .toml files from a directory
fn collect_toml_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("toml")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

/// Demos are at workspace root, relative to workspace not the crate
fn demos_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

fn args_for(input: &Path, output: &Path, config: Option<&Path>) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        config: config.map(|path| path.to_string_lossy().to_string()),
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let valid_demos = collect_toml_files(demos_path());

    assert!(!valid_demos.is_empty(), "No valid demos found in demos/");

    let mut failed_demos = Vec::new();

    for demo_path in &valid_demos {
        let output_path = temp_dir.path().join(format!(
            "{}.layout.toml",
            demo_path.file_stem().unwrap().to_string_lossy()
        ));

        match run(&args_for(demo_path, &output_path, None)) {
            Ok(()) => {
                let written = fs::read_to_string(&output_path).expect("output written");
                let table: toml::Table = written.parse().expect("output is valid TOML");
                assert!(table.contains_key("entities"), "{}", demo_path.display());
                assert!(table.contains_key("layout"), "{}", demo_path.display());
            }
            Err(e) => failed_demos.push((demo_path.clone(), e)),
        }
    }

    if !failed_demos.is_empty() {
        eprintln!("\nValid demos that failed:");
        for (path, err) in &failed_demos {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid demo(s) failed unexpectedly", failed_demos.len());
    }

    println!("All {} valid demos passed", valid_demos.len());
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let error_demos = collect_toml_files(demos_path().join("errors"));

    assert!(!error_demos.is_empty(), "No error demos found in demos/errors/");

    let mut unexpectedly_succeeded = Vec::new();

    for demo_path in &error_demos {
        let output_path = temp_dir.path().join(format!(
            "error_{}.toml",
            demo_path.file_stem().unwrap().to_string_lossy()
        ));

        if run(&args_for(demo_path, &output_path, None)).is_ok() {
            unexpectedly_succeeded.push(demo_path.clone());
        }
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError demos that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error demo(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }
}

#[test]
fn e2e_explicit_config_applies_filters() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("trade.layout.toml");
    let config_path = demos_path().join("configs").join("clockwise.toml");

    run(&args_for(
        &demos_path().join("trade.toml"),
        &output_path,
        Some(config_path.as_path()),
    ))
    .expect("trade demo lays out with the clockwise config");

    let table: toml::Table = fs::read_to_string(&output_path)
        .expect("output written")
        .parse()
        .expect("output is valid TOML");
    let layout = table["layout"].as_table().expect("layout table");

    assert_eq!(layout["outer_radius"].as_float(), Some(200.0));
    // Seven ribbons reach 1.0; the top six are kept.
    assert_eq!(layout["ribbons"].as_array().map(Vec::len), Some(6));
}

#[test]
fn e2e_invalid_config_is_rejected() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("unused.toml");
    let config_path = demos_path().join("configs").join("invalid-radii.toml");

    let err = run(&args_for(
        &demos_path().join("trade.toml"),
        &output_path,
        Some(config_path.as_path()),
    ))
    .unwrap_err();

    assert!(matches!(
        err,
        ChordalError::Configuration {
            field: "outer_radius",
            ..
        }
    ));
    assert!(!output_path.exists());
}
