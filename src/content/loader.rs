//! Loader for RON tuning files.

use ron::Options;
use std::fs;
use std::path::Path;

use crate::movement::MovementTuning;

/// Error type for content loading failures.
#[derive(Debug)]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

impl std::error::Error for ContentLoadError {}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse and validate movement tuning from RON text.
/// Fields missing from the text keep their default values.
pub fn parse_movement_tuning(
    contents: &str,
    file: &str,
) -> Result<MovementTuning, ContentLoadError> {
    let tuning: MovementTuning = ron_options()
        .from_str(contents)
        .map_err(|e| ContentLoadError {
            file: file.to_string(),
            message: format!("Parse error: {}", e),
        })?;

    let errors = tuning.validate();
    if !errors.is_empty() {
        let details: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        return Err(ContentLoadError {
            file: file.to_string(),
            message: format!("Invalid tuning: {}", details.join("; ")),
        });
    }

    Ok(tuning)
}

/// Load movement tuning from a RON file on disk.
pub fn load_movement_tuning(path: &Path) -> Result<MovementTuning, ContentLoadError> {
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| ContentLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    parse_movement_tuning(&contents, &file_name)
}
