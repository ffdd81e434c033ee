//! Staging of base files and feature files from the template source

use super::ScaffoldError;
use crate::config::{TemplateSource, BUNDLED_TEMPLATES};
use include_dir::{Dir, DirEntry};
use std::io;
use std::path::Path;
use tokio::fs;
use walkdir::WalkDir;

/// Support files copied into every project when present at the source
pub const BASE_FILES: &[&str] = &[".claude/", ".gitignore", "README.md"];

/// Copy each entry of `entries` from `source` into `target_dir`.
///
/// Directories are copied recursively. Entries missing at the source are
/// skipped; existing files at the destination are overwritten, unrelated
/// files are left alone. Returns the entries that were staged.
pub async fn stage_entries<'a>(
    source: &TemplateSource,
    target_dir: &Path,
    entries: impl IntoIterator<Item = &'a str>,
) -> Result<Vec<String>, ScaffoldError> {
    let mut staged = Vec::new();

    for entry in entries {
        let present = match source {
            TemplateSource::Bundled => stage_bundled(entry, target_dir).await?,
            TemplateSource::Directory(dir) => stage_from_dir(dir, entry, target_dir).await?,
        };

        if present {
            tracing::debug!(entry, "staged");
            staged.push(entry.to_string());
        } else {
            tracing::debug!(entry, "not present in template source, skipping");
        }
    }

    Ok(staged)
}

async fn stage_from_dir(
    source_dir: &Path,
    entry: &str,
    target_dir: &Path,
) -> Result<bool, ScaffoldError> {
    let src = source_dir.join(entry);
    let dest = target_dir.join(entry);

    let metadata = match fs::metadata(&src).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(source) => return Err(copy_error(&src, &dest, source)),
    };

    if metadata.is_dir() {
        copy_dir(&src, &dest).await?;
    } else {
        copy_file(&src, &dest).await?;
    }
    Ok(true)
}

async fn stage_bundled(entry: &str, target_dir: &Path) -> Result<bool, ScaffoldError> {
    let path = entry.trim_end_matches('/');

    if let Some(file) = BUNDLED_TEMPLATES.get_file(path) {
        write_bundled(file.path(), file.contents(), target_dir).await?;
        return Ok(true);
    }

    let Some(dir) = BUNDLED_TEMPLATES.get_dir(path) else {
        return Ok(false);
    };

    let mut pending: Vec<&Dir<'static>> = vec![dir];
    while let Some(dir) = pending.pop() {
        for item in dir.entries() {
            match item {
                DirEntry::Dir(sub) => pending.push(sub),
                DirEntry::File(file) => {
                    write_bundled(file.path(), file.contents(), target_dir).await?
                }
            }
        }
    }
    Ok(true)
}

/// Write an embedded file; `relative` is its path inside the bundle
async fn write_bundled(
    relative: &Path,
    contents: &[u8],
    target_dir: &Path,
) -> Result<(), ScaffoldError> {
    let dest = target_dir.join(relative);
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|source| copy_error(relative, &dest, source))?;
    }
    fs::write(&dest, contents)
        .await
        .map_err(|source| copy_error(relative, &dest, source))
}

async fn copy_dir(src: &Path, dest: &Path) -> Result<(), ScaffoldError> {
    for item in WalkDir::new(src).follow_links(true) {
        let item = item.map_err(|e| copy_error(src, dest, e.into()))?;
        let relative = item
            .path()
            .strip_prefix(src)
            .map_err(|e| copy_error(src, dest, io::Error::new(io::ErrorKind::Other, e)))?;
        let target = dest.join(relative);

        if item.file_type().is_dir() {
            fs::create_dir_all(&target)
                .await
                .map_err(|source| copy_error(item.path(), &target, source))?;
        } else {
            copy_file(item.path(), &target).await?;
        }
    }

    Ok(())
}

async fn copy_file(src: &Path, dest: &Path) -> Result<(), ScaffoldError> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|source| copy_error(src, dest, source))?;
    }
    fs::copy(src, dest)
        .await
        .map_err(|source| copy_error(src, dest, source))?;
    Ok(())
}

fn copy_error(from: &Path, to: &Path, source: io::Error) -> ScaffoldError {
    ScaffoldError::Copy {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    }
}
