//! Read access to a platform archive (a jar, i.e. a zip container).
//!
//! `ArchiveHandle` is the seam the release reader consumes; `ZipArchiveHandle`
//! is the file-backed implementation. A handle owns its open file and releases
//! it when dropped, so callers scope it to the read they need.

use crate::error::CatalogError;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::debug;
use zip::ZipArchive;
use zip::result::ZipError;

/// An opened archive whose entries can be listed and read.
pub trait ArchiveHandle {
    /// Path the archive was opened from, for diagnostics.
    fn path(&self) -> &Path;

    fn entry_names(&self) -> Vec<String>;

    /// Contents of `name`, or `None` when the archive has no such entry.
    fn read_entry(&mut self, name: &str) -> Result<Option<Vec<u8>>, CatalogError>;
}

pub struct ZipArchiveHandle {
    path: PathBuf,
    archive: ZipArchive<BufReader<File>>,
}

impl ZipArchiveHandle {
    pub fn open(path: &Path) -> Result<Self, CatalogError> {
        let file = File::open(path).map_err(|err| CatalogError::io(path, err))?;
        let archive = ZipArchive::new(BufReader::new(file))
            .map_err(|err| CatalogError::io(path, zip_to_io(err)))?;
        debug!(path = %path.display(), entries = archive.len(), "opened archive");
        Ok(Self {
            path: path.to_path_buf(),
            archive,
        })
    }
}

impl ArchiveHandle for ZipArchiveHandle {
    fn path(&self) -> &Path {
        &self.path
    }

    fn entry_names(&self) -> Vec<String> {
        self.archive.file_names().map(str::to_string).collect()
    }

    fn read_entry(&mut self, name: &str) -> Result<Option<Vec<u8>>, CatalogError> {
        let mut file = match self.archive.by_name(name) {
            Ok(file) => file,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(err) => return Err(CatalogError::io(&self.path, zip_to_io(err))),
        };
        // The declared size comes from the archive header, so it only hints.
        let mut contents = Vec::with_capacity((file.size() as usize).min(1 << 20));
        file.read_to_end(&mut contents)
            .map_err(|err| CatalogError::io(&self.path, err))?;
        Ok(Some(contents))
    }
}

fn zip_to_io(err: ZipError) -> io::Error {
    match err {
        ZipError::Io(inner) => inner,
        other => io::Error::new(io::ErrorKind::InvalidData, other),
    }
}
