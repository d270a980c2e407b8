//! Committing rendered documents to disk.
//!
//! Every file is first written to a temporary file next to its destination;
//! only when all of them are staged are they renamed into place. A failure
//! while staging leaves existing outputs untouched.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("failed to write `{}`", path.display())]
pub struct WriteError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

impl WriteError {
    fn new(path: &Path, source: io::Error) -> Self {
        Self {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// A rendered document and where it goes.
#[derive(Debug, Clone, Copy)]
pub struct OutputFile<'a> {
    pub path: &'a Path,
    pub content: &'a [u8],
}

/// Write all files, or none of them.
pub fn commit(files: &[OutputFile<'_>]) -> Result<(), WriteError> {
    let staged = files
        .iter()
        .map(stage)
        .collect::<Result<Vec<_>, _>>()?;

    for (file, temp) in files.iter().zip(staged) {
        temp.persist(file.path)
            .map_err(|err| WriteError::new(file.path, err.error))?;
    }
    Ok(())
}

fn stage(file: &OutputFile<'_>) -> Result<NamedTempFile, WriteError> {
    let parent = match file.path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let fail = |err| WriteError::new(file.path, err);

    fs::create_dir_all(parent).map_err(fail)?;
    let mut temp = NamedTempFile::new_in(parent).map_err(fail)?;
    temp.write_all(file.content).map_err(fail)?;
    temp.as_file().sync_all().map_err(fail)?;
    Ok(temp)
}
