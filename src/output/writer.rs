use std::path::{
    Path,
    PathBuf,
};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use thiserror::Error;

use crate::ir::ReferenceTable;

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("Failed to write \"{}\": {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize the reference table: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Writes `contents` to `path`, creating parent directories.
pub fn write_file(path: &Path, contents: &str) -> Result<(), WriteError> {
    let io_error = |source| WriteError::Io { path: path.to_path_buf(), source };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(io_error)?;
    }
    std::fs::write(path, contents).map_err(io_error)
}

/// Writes the reference table as JSON indented with four spaces.
pub fn write_reference(path: &Path, table: &ReferenceTable) -> Result<(), WriteError> {
    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
    table.serialize(&mut serializer)?;

    let json = String::from_utf8_lossy(&buffer);
    write_file(path, &json)
}
