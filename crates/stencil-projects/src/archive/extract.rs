//! Filtered archive extraction (zip and tar.gz)

use super::rewrite::PathRewriteRule;
use crate::error::{Error, Result};
use camino::Utf8Path;
use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io::{self, Cursor, Read};
use tracing::debug;

/// File type bits of a unix mode and the value marking a symlink
const S_IFMT: u32 = 0o170000;
const S_IFLNK: u32 = 0o120000;

/// Supported archive containers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    TarGz,
}

impl ArchiveFormat {
    /// Detect the format from the leading magic bytes
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(b"PK\x03\x04") || bytes.starts_with(b"PK\x05\x06") {
            Some(Self::Zip)
        } else if bytes.starts_with(&[0x1f, 0x8b]) {
            Some(Self::TarGz)
        } else {
            None
        }
    }
}

/// Extract entries kept by `rule` into `dest`, returning the number of files written
///
/// `dest` is only created once a matching entry is found.
pub fn extract_archive(bytes: &[u8], rule: &PathRewriteRule, dest: &Utf8Path) -> Result<usize> {
    match ArchiveFormat::detect(bytes) {
        Some(ArchiveFormat::Zip) => extract_zip(bytes, rule, dest),
        Some(ArchiveFormat::TarGz) => extract_tar_gz(bytes, rule, dest),
        None => Err(Error::archive(
            "unrecognized archive format (expected zip or tar.gz)",
        )),
    }
}

fn extract_zip(bytes: &[u8], rule: &PathRewriteRule, dest: &Utf8Path) -> Result<usize> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| Error::archive(format!("failed to open zip: {}", e)))?;

    let mut written = 0;
    for index in 0..archive.len() {
        let mut file = archive
            .by_index(index)
            .map_err(|e| Error::archive(format!("failed to read zip entry {}: {}", index, e)))?;

        let Some(relative) = rule.apply(file.name()) else {
            continue;
        };
        let target = dest.join(&relative);

        if file.is_dir() {
            fs::create_dir_all(&target)?;
            continue;
        }
        if file.unix_mode().is_some_and(|mode| mode & S_IFMT == S_IFLNK) {
            debug!("Skipping non-regular entry {}", file.name());
            continue;
        }

        write_entry(&mut file, &target)?;
        // Owner keeps read/write so the manifest can be rendered in place
        #[cfg(unix)]
        if let Some(mode) = file.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&target, fs::Permissions::from_mode((mode & 0o777) | 0o600))?;
        }
        written += 1;
    }

    Ok(written)
}

fn extract_tar_gz(bytes: &[u8], rule: &PathRewriteRule, dest: &Utf8Path) -> Result<usize> {
    let mut archive = tar::Archive::new(GzDecoder::new(bytes));

    let mut written = 0;
    for entry in archive.entries()? {
        let mut entry = entry?;
        let name = entry.path()?.to_string_lossy().into_owned();

        let Some(relative) = rule.apply(&name) else {
            continue;
        };
        let target = dest.join(&relative);

        let kind = entry.header().entry_type();
        if kind.is_dir() {
            fs::create_dir_all(&target)?;
        } else if kind.is_file() {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            entry.unpack(&target)?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let mode = (entry.header().mode()? & 0o777) | 0o600;
                fs::set_permissions(&target, fs::Permissions::from_mode(mode))?;
            }
            written += 1;
        } else {
            debug!("Skipping non-regular entry {}", name);
        }
    }

    Ok(written)
}

fn write_entry<R: Read>(reader: &mut R, target: &Utf8Path) -> Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut out = File::create(target)?;
    io::copy(reader, &mut out)?;
    Ok(())
}
