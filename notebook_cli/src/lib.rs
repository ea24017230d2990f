//! # Notebook Console (Demo)
//!
//! A line-oriented console that drives a [`ModelEditor`] from text commands.
//! It is NOT a notebook UI; it exists to exercise the editor end to end.

pub mod commands;
pub mod session;

pub use commands::{parse_command, CliError, NotebookCommand};
pub use session::{Response, Session};

use double_theory::stdlib::default_library;
use notebook_settings::persistence::load_from_path;
use notebook_settings::{EditorConfig, SettingsRegistry};
use services_model_editor::ModelEditor;
use std::path::Path;

/// Bootstrap function
///
/// Loads settings overrides (if a path is given), reads the profile's
/// editor config, applies an explicit theory choice and opens an editor on
/// the standard theory library.
pub fn bootstrap(
    settings: Option<&Path>,
    profile: &str,
    theory: Option<&str>,
) -> Result<Session, CliError> {
    let mut registry = SettingsRegistry::with_notebook_defaults();
    if let Some(path) = settings {
        if let Err(err) = load_from_path(&mut registry, path) {
            tracing::warn!(path = %path.display(), %err, "settings not loaded, using defaults");
        }
    }

    let mut config = EditorConfig::from_registry(&registry, profile);
    if let Some(theory) = theory {
        config.theory = theory.to_string();
    }
    tracing::debug!(profile, theory = %config.theory, "opening notebook");

    let library = default_library();
    let editor = ModelEditor::from_library(&library, config)?;
    Ok(Session::new(editor, library))
}
