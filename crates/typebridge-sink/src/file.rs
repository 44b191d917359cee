use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use typebridge_translate::SchemaScript;

use crate::{SchemaSink, SinkError};

/// Writes the script as text, one statement per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSink {
    Path(PathBuf),
    Stdout,
}

impl FileSink {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        FileSink::Path(path.into())
    }

    /// `-` means stdout.
    pub fn from_arg(arg: Option<&Path>) -> Self {
        match arg {
            Some(path) if path != Path::new("-") => FileSink::path(path),
            _ => FileSink::Stdout,
        }
    }
}

impl SchemaSink for FileSink {
    fn define(&mut self, script: &SchemaScript) -> Result<(), SinkError> {
        let mut text = script.to_string();
        if !text.is_empty() {
            text.push('\n');
        }

        match &*self {
            FileSink::Path(path) => {
                let io = |source| SinkError::Io {
                    path: path.clone(),
                    source,
                };
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent).map_err(io)?;
                }
                fs::write(path, text).map_err(io)?;
                tracing::info!(path = %path.display(), statements = script.len(), "wrote schema");
            }
            FileSink::Stdout => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(text.as_bytes()).map_err(SinkError::Stdout)?;
                stdout.flush().map_err(SinkError::Stdout)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script() -> SchemaScript {
        ["define name sub attribute, value string;", "define Gene sub entity, owns name;"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn writes_statements_and_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/nested/schema.tql");

        FileSink::path(&path).define(&script()).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "define name sub attribute, value string;\ndefine Gene sub entity, owns name;\n"
        );
    }

    #[test]
    fn dash_means_stdout() {
        assert_eq!(FileSink::from_arg(Some(Path::new("-"))), FileSink::Stdout);
        assert_eq!(FileSink::from_arg(None), FileSink::Stdout);
        assert_eq!(
            FileSink::from_arg(Some(Path::new("schema.tql"))),
            FileSink::Path(PathBuf::from("schema.tql"))
        );
    }
}
