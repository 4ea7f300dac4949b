//! Scoped on-disk storage for uploads.

use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Write `bytes` to a uniquely named temporary file.
///
/// The file is deleted when the returned handle is dropped or closed, so callers own its
/// lifetime for exactly as long as they need the path.
pub(crate) fn persist_upload(bytes: &[u8], directory: Option<&Path>) -> io::Result<NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    builder.prefix("docsum-upload-");
    let mut file = match directory {
        Some(directory) => builder.tempfile_in(directory)?,
        None => builder.tempfile()?,
    };
    file.write_all(bytes)?;
    file.flush()?;
    Ok(file)
}
