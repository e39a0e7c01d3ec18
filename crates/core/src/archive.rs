//! Directory archiving with temp-archive lifecycle management
//!
//! A directory upload is really an archive upload: the directory's full
//! contents are compressed into a single deflate zip at a fixed, predictable
//! path in the directory's parent, uploaded, then removed. The fixed name
//! means a stale archive from a crashed prior run is simply overwritten, and
//! it also means two concurrent directory uploads from the same parent
//! directory will race on the file. That is an accepted, documented
//! limitation of the fixed-name scheme, not something this module guards
//! against.
//!
//! The archive lives in the parent of the source directory so that it can
//! never end up inside its own contents.

use std::fs;
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;
use zip::{CompressionMethod, ZipWriter, write::FileOptions};

use crate::error::{Error, Result};

/// Fixed file name of the temporary archive
pub const TEMP_ARCHIVE_NAME: &str = "TempS3Archive.zip";

/// Read buffer size for streaming file contents into the archive
const COPY_CHUNK_SIZE: usize = 64 * 1024;

/// Handle to a temporary archive on disk
///
/// Exclusively owned by the pipeline for the duration of one directory
/// upload. `remove` is called after the upload attempt regardless of its
/// outcome.
#[derive(Debug)]
pub struct TempArchive {
    path: PathBuf,
}

impl TempArchive {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the archive from disk. Best-effort: a failure is logged by the
    /// caller, never fatal, and deleting an already-missing file is a no-op.
    pub fn remove(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "Removed temp archive");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Io(e)),
        }
    }
}

/// Compute the temp-archive path for a directory: `<parent>/TempS3Archive.zip`
///
/// Fails with `PathResolution` when the directory has no usable parent: a
/// filesystem root, or a bare relative name whose parent is the empty path.
/// Callers resolve relative input to an absolute path first.
pub fn temp_archive_path(dir: &Path) -> Result<PathBuf> {
    let parent = dir
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or_else(|| {
            Error::PathResolution(format!(
                "directory '{}' has no parent to hold the temp archive",
                dir.display()
            ))
        })?;
    Ok(parent.join(TEMP_ARCHIVE_NAME))
}

/// Create a compressed archive of a directory's full contents.
///
/// `dir` must already be canonicalized; the pipeline resolves the source
/// path exactly once before calling in. The archive is written to
/// `<parent>/TempS3Archive.zip`; any stale file at that path from a prior
/// failed run is deleted first. Entries are stored under their paths
/// relative to the directory root, and directory entries are recorded so
/// empty directories survive a round trip.
pub fn create_archive(dir: &Path) -> Result<TempArchive> {
    let archive_path = temp_archive_path(dir)?;

    // Idempotent cleanup of a crashed prior run
    match fs::remove_file(&archive_path) {
        Ok(()) => info!(path = %archive_path.display(), "Removed stale temp archive"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            return Err(Error::Archive(format!(
                "cannot remove stale archive '{}': {e}",
                archive_path.display()
            )));
        }
    }

    info!(
        source = %dir.display(),
        archive = %archive_path.display(),
        "Archiving directory"
    );

    let file = fs::File::create(&archive_path)
        .map_err(|e| Error::Archive(format!("cannot create '{}': {e}", archive_path.display())))?;
    let mut zip = ZipWriter::new(file);
    // zip64 entries, so a single file over 4 GiB does not abort the archive
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .large_file(true);

    let mut buffer = vec![0u8; COPY_CHUNK_SIZE];
    let mut entries = 0usize;

    for entry in WalkDir::new(&dir).min_depth(1) {
        let entry =
            entry.map_err(|e| Error::Archive(format!("cannot walk '{}': {e}", dir.display())))?;
        let rel_path = entry
            .path()
            .strip_prefix(&dir)
            .map_err(|e| Error::Archive(e.to_string()))?
            .to_string_lossy()
            .into_owned();

        if entry.file_type().is_dir() {
            zip.add_directory(&rel_path, options)
                .map_err(|e| Error::Archive(format!("cannot add directory '{rel_path}': {e}")))?;
            continue;
        }

        zip.start_file(&rel_path, options)
            .map_err(|e| Error::Archive(format!("cannot start entry '{rel_path}': {e}")))?;

        let source = fs::File::open(entry.path()).map_err(|e| {
            Error::Archive(format!("cannot open '{}': {e}", entry.path().display()))
        })?;
        let mut reader = BufReader::new(source);

        // Stream in chunks so large files never sit fully in memory
        loop {
            let read = reader.read(&mut buffer).map_err(|e| {
                Error::Archive(format!("cannot read '{}': {e}", entry.path().display()))
            })?;
            if read == 0 {
                break;
            }
            zip.write_all(&buffer[..read])
                .map_err(|e| Error::Archive(format!("cannot write entry '{rel_path}': {e}")))?;
        }

        entries += 1;
        debug!(entry = %rel_path, "Archived");
    }

    zip.finish()
        .map_err(|e| Error::Archive(format!("cannot finalize archive: {e}")))?;

    info!(entries, archive = %archive_path.display(), "Archive complete");

    Ok(TempArchive { path: archive_path })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read as _;
    use tempfile::TempDir;
    use zip::read::ZipArchive;

    fn populate(base: &Path) {
        fs::create_dir_all(base.join("b")).unwrap();
        fs::write(base.join("a.txt"), b"alpha").unwrap();
        fs::write(base.join("b/c.txt"), b"gamma").unwrap();
    }

    fn entry_names(path: &Path) -> Vec<String> {
        let file = fs::File::open(path).unwrap();
        let mut archive = ZipArchive::new(file).unwrap();
        (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect()
    }

    #[test]
    fn test_temp_archive_path() {
        let path = temp_archive_path(Path::new("/data/photos")).unwrap();
        assert_eq!(path, Path::new("/data/TempS3Archive.zip"));
    }

    #[test]
    fn test_temp_archive_path_no_parent() {
        let err = temp_archive_path(Path::new("/")).unwrap_err();
        assert!(matches!(err, Error::PathResolution(_)));
    }

    #[test]
    fn test_temp_archive_path_bare_relative_name() {
        // A bare name has an empty parent; callers must resolve to an
        // absolute path first
        let err = temp_archive_path(Path::new("photos")).unwrap_err();
        assert!(matches!(err, Error::PathResolution(_)));
    }

    #[test]
    fn test_round_trip_preserves_relative_paths() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("payload");
        fs::create_dir(&source).unwrap();
        populate(&source);

        let archive = create_archive(&source).unwrap();
        assert!(archive.path().exists());
        assert_eq!(archive.path().file_name().unwrap(), TEMP_ARCHIVE_NAME);

        let names = entry_names(archive.path());
        assert!(names.contains(&"a.txt".to_string()));
        assert!(names.contains(&"b/c.txt".to_string()));

        // Contents survive extraction
        let file = fs::File::open(archive.path()).unwrap();
        let mut zip = ZipArchive::new(file).unwrap();
        let mut content = String::new();
        zip.by_name("b/c.txt").unwrap().read_to_string(&mut content).unwrap();
        assert_eq!(content, "gamma");

        archive.remove().unwrap();
    }

    #[test]
    fn test_stale_archive_is_overwritten() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("payload");
        fs::create_dir(&source).unwrap();
        fs::write(source.join("a.txt"), b"fresh").unwrap();

        // Simulate a crashed prior run leaving garbage behind
        let stale = temp.path().join(TEMP_ARCHIVE_NAME);
        fs::write(&stale, b"not a zip at all").unwrap();

        let archive = create_archive(&source).unwrap();
        let names = entry_names(archive.path());
        assert_eq!(names, vec!["a.txt".to_string()]);
    }

    #[test]
    fn test_empty_directory_produces_empty_archive() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("empty");
        fs::create_dir(&source).unwrap();

        let archive = create_archive(&source).unwrap();
        assert!(entry_names(archive.path()).is_empty());
    }

    #[test]
    fn test_empty_subdirectory_survives() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("payload");
        fs::create_dir_all(source.join("hollow")).unwrap();

        let archive = create_archive(&source).unwrap();
        let names = entry_names(archive.path());
        assert_eq!(names, vec!["hollow/".to_string()]);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("payload");
        fs::create_dir(&source).unwrap();

        let archive = create_archive(&source).unwrap();
        archive.remove().unwrap();
        assert!(!archive.path().exists());
        // Removing a missing file is a no-op, not an error
        archive.remove().unwrap();
    }
}
