//! Concrete collaborators for the CLI: an external command as the text
//! generator and a directory of topic images.

use lesson_core::{Error, ImageLookup, ImageRef, Result, TextGenerator};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Runs an external program with the prompt on stdin and takes its stdout
/// as the lesson text.
///
/// Credentials for the provider belong in the child's environment; they
/// are never stored here.
#[derive(Debug, Clone)]
pub struct CommandGenerator {
    program: String,
    args: Vec<String>,
}

impl CommandGenerator {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl TextGenerator for CommandGenerator {
    fn generate(&self, prompt: &str) -> Result<String> {
        log::debug!("Running generator: {} {:?}", self.program, self.args);

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::Generation(format!("Failed to start '{}': {}", self.program, e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(prompt.as_bytes())
                .map_err(|e| Error::Generation(format!("Failed to send prompt: {}", e)))?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| Error::Generation(format!("Failed to read generator output: {}", e)))?;
        if !output.status.success() {
            return Err(Error::Generation(format!(
                "'{}' exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| Error::Generation(format!("Generator output is not UTF-8: {}", e)))
    }
}

/// Looks for `<topic>.png`, `.jpg` or `.jpeg` in a directory, matching the
/// topic either verbatim or as a lowercase dash-separated slug.
#[derive(Debug, Clone)]
pub struct DirectoryImageLookup {
    dir: PathBuf,
}

impl DirectoryImageLookup {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ImageLookup for DirectoryImageLookup {
    fn lookup(&self, topic: &str) -> Option<ImageRef> {
        let topic = topic.trim();
        if topic.is_empty() {
            return None;
        }

        let stems = [topic.to_string(), slug(topic)];
        for stem in &stems {
            for ext in ["png", "jpg", "jpeg"] {
                let candidate = self.dir.join(format!("{}.{}", stem, ext));
                if candidate.is_file() {
                    return Some(
                        ImageRef::new(candidate.to_string_lossy()).with_alt(topic),
                    );
                }
            }
        }
        None
    }
}

/// Lowercase, alphanumerics kept, every other run collapsed to one dash.
pub fn slug(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_alphanumeric() {
            out.extend(c.to_lowercase());
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    out.trim_end_matches('-').to_string()
}
