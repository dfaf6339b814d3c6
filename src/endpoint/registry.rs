//! Endpoint registry loading.
//!
//! # Responsibilities
//! - Discover `*.json` definition files under a directory (recursively)
//! - Compile every definition, failing on the first bad one
//! - Sort endpoints by URI template for stable match order
//!
//! # Design Decisions
//! - Built once at startup, never mutated; shared via `Arc`
//! - An empty registry is a startup error, not a degraded mode
//! - Directory entries are visited in name order and the sort is stable, so
//!   endpoints with identical templates keep file order across restarts

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::endpoint::definition::{DefinitionError, Endpoint, EndpointDefinition};
use crate::routing::{first_match, RouteMatch};

/// Errors loading the endpoint set.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{source_name}: {source}")]
    Definition {
        source_name: String,
        #[source]
        source: DefinitionError,
    },

    #[error("no endpoint configs found in {0}")]
    Empty(String),
}

/// The immutable, ordered set of compiled endpoints.
#[derive(Debug, Clone)]
pub struct Registry {
    endpoints: Vec<Endpoint>,
}

impl Registry {
    /// Compile definitions labelled by their source (file path or other name).
    pub fn from_definitions<I, S>(definitions: I, origin: &str) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = (S, EndpointDefinition)>,
        S: Into<String>,
    {
        let mut endpoints = Vec::new();
        for (source_name, def) in definitions {
            let endpoint = Endpoint::compile(def).map_err(|source| LoadError::Definition {
                source_name: source_name.into(),
                source,
            })?;
            tracing::debug!(
                method = %endpoint.method(),
                uri = %endpoint.uri(),
                timeout = ?endpoint.timeout(),
                "Endpoint compiled"
            );
            endpoints.push(endpoint);
        }

        if endpoints.is_empty() {
            return Err(LoadError::Empty(origin.to_string()));
        }

        endpoints.sort_by(|a, b| a.uri().cmp(b.uri()));
        Ok(Self { endpoints })
    }

    /// Load every `*.json` definition found under `dir`.
    pub fn load_dir(dir: &Path) -> Result<Self, LoadError> {
        let mut files = Vec::new();
        collect_definition_files(dir, &mut files)?;

        let mut definitions = Vec::with_capacity(files.len());
        for path in files {
            let content = fs::read(&path).map_err(|source| LoadError::Io {
                path: path.clone(),
                source,
            })?;
            let def: EndpointDefinition = serde_json::from_slice(&content).map_err(|source| LoadError::Parse {
                path: path.clone(),
                source,
            })?;
            definitions.push((path.display().to_string(), def));
        }

        let registry = Self::from_definitions(definitions, &dir.display().to_string())?;
        tracing::info!(
            count = registry.len(),
            dir = %dir.display(),
            "Loaded endpoints"
        );
        Ok(registry)
    }

    /// Find the first endpoint matching `method` and `path`.
    pub fn find(&self, method: &str, path: &str) -> Option<RouteMatch<'_>> {
        first_match(&self.endpoints, method, path)
    }

    /// Endpoints in match order.
    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

fn collect_definition_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), LoadError> {
    let io_err = |source| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = fs::read_dir(dir)
        .map_err(io_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(io_err)?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        let file_type = entry.file_type().map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;

        if file_type.is_dir() {
            collect_definition_files(&path, out)?;
        } else if is_definition_file(&path) {
            out.push(path);
        }
    }
    Ok(())
}

fn is_definition_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}
