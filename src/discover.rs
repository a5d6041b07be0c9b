use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::errors::CompRunError;
use crate::types::{SampleFile, SampleFolder};

/// List the immediate subdirectories of `input_dir` as `(name, path)` pairs.
///
/// Sorted by name so that folder indices are stable from run to run.
/// Plain files at the top level are ignored.
pub fn discover_folders(input_dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    if !input_dir.is_dir() {
        return Err(CompRunError::InputDirNotFound {
            path: input_dir.to_path_buf(),
        }
        .into());
    }

    let entries = std::fs::read_dir(input_dir).map_err(|source| CompRunError::ReadDir {
        path: input_dir.to_path_buf(),
        source,
    })?;

    let mut folders = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };

        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        folders.push((entry.file_name().to_string_lossy().into_owned(), path));
    }

    folders.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(folders)
}

/// Create `<folder>/<output_dir_name>` and list the regular files of `folder`.
///
/// The output directory is created before listing; directories (including the
/// output directory itself) are never returned as samples. Files are sorted
/// by name.
pub fn prepare_folder(name: &str, folder: &Path, output_dir_name: &str) -> Result<SampleFolder> {
    let output_dir = folder.join(output_dir_name);
    std::fs::create_dir_all(&output_dir).map_err(|source| CompRunError::OutputDirCreate {
        path: output_dir.clone(),
        source,
    })?;

    let entries = std::fs::read_dir(folder).map_err(|source| CompRunError::ReadDir {
        path: folder.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };

        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        files.push(SampleFile {
            name: entry.file_name().to_string_lossy().into_owned(),
            path,
        });
    }

    files.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(SampleFolder {
        name: name.to_string(),
        path: folder.to_path_buf(),
        output_dir,
        files,
    })
}

/// Path of the compressed artifact for `file`: `<output_dir>/<stem>.<extension>`.
pub fn output_path_for(file: &SampleFile, output_dir: &Path, extension: &str) -> PathBuf {
    let stem = file
        .path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.name.clone());
    output_dir.join(format!("{}.{}", stem, extension))
}
