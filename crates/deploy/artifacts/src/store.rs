//! Lookup of artifacts in a Hardhat `artifacts/` tree.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::debug;

use crate::{ArtifactError, BuildInfo, ContractArtifact};

/// Where the build writes artifacts, relative to the project root.
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

const BUILD_INFO_DIR: &str = "build-info";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DebugFile {
    build_info: PathBuf,
}

/// Read-only view of an artifacts directory.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    /// Creates a store rooted at `root` (usually `./artifacts`).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Loads an artifact by bare name (`LabelFactory`) or fully qualified name
    /// (`contracts/LabelFactory.sol:LabelFactory`).
    pub fn load(&self, name: &str) -> Result<ContractArtifact, ArtifactError> {
        let path = self.artifact_path(name)?;
        debug!(contract = name, path = %path.display(), "Loading artifact");
        read_json(&path)
    }

    /// Resolves a contract name to its artifact file.
    pub fn artifact_path(&self, name: &str) -> Result<PathBuf, ArtifactError> {
        if let Some((source, contract)) = name.rsplit_once(':') {
            let path = self.root.join(source).join(format!("{contract}.json"));
            return if path.is_file() { Ok(path) } else { Err(self.not_found(name)) };
        }

        let file_name = format!("{name}.json");
        let mut matches = Vec::new();
        self.collect(&self.root, &file_name, &mut matches)?;
        matches.sort();

        match matches.len() {
            0 => Err(self.not_found(name)),
            1 => Ok(matches.remove(0)),
            _ => Err(ArtifactError::Ambiguous {
                name: name.to_string(),
                candidates: matches.iter().map(|path| self.qualified_name(path, name)).collect(),
            }),
        }
    }

    /// Loads the build-info that produced `artifact`, via its `.dbg.json` pointer.
    pub fn build_info(&self, artifact: &ContractArtifact) -> Result<BuildInfo, ArtifactError> {
        let dir = self.root.join(&artifact.source_name);
        let debug_path = dir.join(format!("{}.dbg.json", artifact.contract_name));
        let debug_file: DebugFile = read_json(&debug_path)?;

        let path = dir.join(&debug_file.build_info);
        let mut build_info: BuildInfo = read_json(&path)?;
        if build_info.id.is_empty() {
            if let Some(stem) = path.file_stem() {
                build_info.id = stem.to_string_lossy().into_owned();
            }
        }
        Ok(build_info)
    }

    fn collect(
        &self,
        dir: &Path,
        file_name: &str,
        out: &mut Vec<PathBuf>,
    ) -> Result<(), ArtifactError> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(source) => return Err(ArtifactError::Io { path: dir.to_path_buf(), source }),
        };

        for entry in entries {
            let entry =
                entry.map_err(|source| ArtifactError::Io { path: dir.to_path_buf(), source })?;
            let path = entry.path();
            if path.is_dir() {
                if dir == self.root && entry.file_name() == BUILD_INFO_DIR {
                    continue;
                }
                self.collect(&path, file_name, out)?;
            } else if entry.file_name() == file_name {
                out.push(path);
            }
        }
        Ok(())
    }

    fn qualified_name(&self, path: &Path, contract: &str) -> String {
        let source = path
            .parent()
            .and_then(|parent| parent.strip_prefix(&self.root).ok())
            .map(|source| source.to_string_lossy().replace('\\', "/"))
            .unwrap_or_default();
        format!("{source}:{contract}")
    }

    fn not_found(&self, name: &str) -> ArtifactError {
        ArtifactError::NotFound { name: name.to_string(), root: self.root.clone() }
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let contents = fs::read_to_string(path)
        .map_err(|source| ArtifactError::Io { path: path.to_path_buf(), source })?;
    serde_json::from_str(&contents)
        .map_err(|source| ArtifactError::Json { path: path.to_path_buf(), source })
}
