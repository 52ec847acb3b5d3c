use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{ParamsError, Result};

/// The subset of the project configuration this tool reads. Other keys in the
/// file belong to the training stages and are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProjectConfig {
    pub project_dir: PathBuf,
}

pub trait ProjectConfigSource {
    fn load(&self, path: &Path) -> Result<ProjectConfig>;
}

/// Reads the project configuration from a YAML file on disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct YamlProjectConfig;

impl ProjectConfigSource for YamlProjectConfig {
    fn load(&self, path: &Path) -> Result<ProjectConfig> {
        let file = std::fs::File::open(path).map_err(|e| ParamsError::io(path, e))?;
        let config: ProjectConfig = serde_yaml::from_reader(file)
            .map_err(|source| ParamsError::ProjectConfig { path: path.to_path_buf(), source })?;

        debug!("Project config from '{}' loaded: {:?}", path.display(), config);
        Ok(config)
    }
}
