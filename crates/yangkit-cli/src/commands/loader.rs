use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use tracing::debug;
use yangkit_lib::SourceMap;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read '{}': {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to read stdin: {0}")]
    Stdin(io::Error),

    #[error("no .yang files found in '{}'", .0.display())]
    EmptyDirectory(PathBuf),

    #[error("stdin can only be given once")]
    StdinTwice,
}

/// Reads every path into one source map: files as given, directories as
/// their `.yang` files in name order, `-` as stdin.
pub fn load_sources(paths: &[PathBuf]) -> Result<SourceMap, LoadError> {
    if paths.iter().filter(|p| p.as_os_str() == "-").count() > 1 {
        return Err(LoadError::StdinTwice);
    }

    let mut map = SourceMap::new();
    for path in paths {
        if path.as_os_str() == "-" {
            map.add_stdin(&read_stdin()?);
        } else if path.is_dir() {
            for file in directory_files(path)? {
                add_file(&mut map, &file)?;
            }
        } else {
            add_file(&mut map, path)?;
        }
    }

    debug!(sources = map.len(), "loaded");
    Ok(map)
}

fn read_stdin() -> Result<String, LoadError> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .map_err(LoadError::Stdin)?;
    Ok(buf)
}

fn add_file(map: &mut SourceMap, path: &Path) -> Result<(), LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    map.add_file(&path.to_string_lossy(), &content);
    Ok(())
}

fn directory_files(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let entries = fs::read_dir(dir).map_err(|source| LoadError::Read {
        path: dir.to_path_buf(),
        source,
    })?;
    let files = yang_files(entries.filter_map(|e| e.ok()).map(|e| e.path()));
    if files.is_empty() {
        return Err(LoadError::EmptyDirectory(dir.to_path_buf()));
    }
    Ok(files)
}

/// `.yang` paths, sorted for deterministic source ids.
pub fn yang_files(paths: impl IntoIterator<Item = PathBuf>) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = paths
        .into_iter()
        .filter(|p| p.extension().is_some_and(|ext| ext == "yang"))
        .collect();
    files.sort();
    files
}
