//! Compose command implementation.

use std::fs;
use std::path::Path;

use figment::providers::Serialized;
use knit_config::{BuildConfig, Composition, ProjectSettings};

use crate::cli::ComposeArgs;
use crate::commands::utils;
use crate::error::{CliError, Result, ResultExt};
use crate::ui;

/// Execute the compose command.
///
/// Loads settings (with `--debug` layered on top), composes, and writes the
/// JSON document to `--out` or stdout. Nothing is written if any step fails.
pub fn execute(args: ComposeArgs) -> Result<()> {
    if let Some(out) = &args.out {
        check_out_path(out)?;
    }

    let (root, mut figment) = utils::project_figment(&args.project)?;
    if args.debug {
        figment = figment.merge(Serialized::default("debug", true));
    }
    let settings = ProjectSettings::extract(&figment)?;

    let composition = knit_config::compose(&settings, &root)?;
    report_drift(&composition);

    let json = render(&composition.config, args.compact)?;
    match args.out {
        Some(path) => {
            write_output(&path, &json)?;
            ui::success(&format!(
                "Wrote {} build configuration to {}",
                if settings.debug { "debug" } else { "production" },
                path.display()
            ));
        }
        None => println!("{json}"),
    }

    Ok(())
}

/// Serialize the composed configuration.
pub fn render(config: &BuildConfig, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(config)?
    } else {
        serde_json::to_string_pretty(config)?
    };
    Ok(json)
}

fn report_drift(composition: &Composition) {
    for logical in &composition.unmatched {
        tracing::warn!(
            "Replacement for '{}' matched no compiler plugin; the table may be stale",
            logical
        );
    }
}

fn check_out_path(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Err(CliError::InvalidArgument(format!(
            "--out {} is a directory; pass a file path",
            path.display()
        )));
    }
    Ok(())
}

fn write_output(path: &Path, json: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_path(parent)?;
    }
    fs::write(path, format!("{json}\n")).with_path(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use knit_config::{Assembler, CompilerConfig, ExternalSet, PluginEntry, select_passes};

    fn config() -> BuildConfig {
        Assembler::new("src/index.js").assemble(
            CompilerConfig::default(),
            PluginEntry::named("transform-import-duplicate"),
            select_passes(true),
            ["rxjs", "graphql"].into_iter().collect::<ExternalSet>(),
        )
    }

    #[test]
    fn test_render_compact_is_single_line() {
        let json = render(&config(), true).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.starts_with(r#"{"input":"src/index.js""#));
    }

    #[test]
    fn test_render_pretty_round_trips() {
        let json = render(&config(), false).unwrap();
        assert!(json.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["external"], serde_json::json!(["rxjs", "graphql"]));
    }

    #[test]
    fn test_out_path_must_not_be_a_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = check_out_path(dir.path()).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
        assert!(check_out_path(&dir.path().join("rollup.json")).is_ok());
    }

    #[test]
    fn test_write_output_creates_parent() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("build/rollup.json");
        write_output(&path, "{}").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "{}\n");
    }
}
