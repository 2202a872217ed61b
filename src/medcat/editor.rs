use crate::error::{MedcatError, Result};
use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

/// The basic fields as laid out in an editor buffer.
/// Format: commercial name on line 1, registry code on line 2, a blank
/// line, then the free-text description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailBuffer {
    pub commercial_name: String,
    pub registry_code: String,
    pub description: String,
}

impl DetailBuffer {
    pub fn new(commercial_name: String, registry_code: String, description: String) -> Self {
        Self {
            commercial_name,
            registry_code,
            description,
        }
    }

    pub fn to_buffer(&self) -> String {
        if self.description.is_empty() {
            format!("{}\n{}\n\n", self.commercial_name, self.registry_code)
        } else {
            format!(
                "{}\n{}\n\n{}",
                self.commercial_name, self.registry_code, self.description
            )
        }
    }

    pub fn from_buffer(buffer: &str) -> Self {
        let mut lines = buffer.lines();
        let commercial_name = lines.next().unwrap_or_default().trim().to_string();
        let registry_code = lines.next().unwrap_or_default().trim().to_string();
        let description = lines.collect::<Vec<&str>>().join("\n").trim().to_string();
        Self {
            commercial_name,
            registry_code,
            description,
        }
    }
}

/// Gets the editor command from environment.
/// Checks $EDITOR, then $VISUAL, then falls back to common editors.
pub fn get_editor() -> Result<String> {
    if let Ok(editor) = env::var("EDITOR") {
        if !editor.is_empty() {
            return Ok(editor);
        }
    }

    if let Ok(editor) = env::var("VISUAL") {
        if !editor.is_empty() {
            return Ok(editor);
        }
    }

    for fallback in &["vim", "vi", "nano"] {
        if Command::new("which")
            .arg(fallback)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
        {
            return Ok((*fallback).to_string());
        }
    }

    Err(MedcatError::Api(
        "No editor found. Set $EDITOR environment variable.".to_string(),
    ))
}

/// Opens a file in the user's editor and waits for it to close.
/// Returns the contents of the file after editing.
pub fn open_in_editor<P: AsRef<Path>>(file_path: P) -> Result<String> {
    let editor = get_editor()?;
    let path = file_path.as_ref();

    let status = Command::new(&editor)
        .arg(path)
        .status()
        .map_err(|e| MedcatError::Api(format!("Failed to launch editor '{}': {}", editor, e)))?;

    if !status.success() {
        return Err(MedcatError::Api(format!(
            "Editor '{}' exited with non-zero status",
            editor
        )));
    }

    fs::read_to_string(path).map_err(MedcatError::Io)
}

/// Opens an editor with initial content in a temp file with the given
/// extension and returns the edited content.
pub fn edit_text(initial: &str, file_extension: &str) -> Result<String> {
    let temp_dir = env::temp_dir();
    let temp_file = temp_dir.join(format!("medcat_edit{}", file_extension));

    fs::write(&temp_file, initial).map_err(MedcatError::Io)?;

    let result = open_in_editor(&temp_file)?;

    let _ = fs::remove_file(&temp_file);

    Ok(result)
}
