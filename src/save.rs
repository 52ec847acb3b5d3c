use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{ParamsError, Result};
use crate::expand::ExpandedConfig;
use crate::fs::Filesystem;

/// Every field of the config keyed by name, in name order.
pub fn sorted_fields(config: &ExpandedConfig) -> Result<BTreeMap<String, serde_yaml::Value>> {
    let value = serde_yaml::to_value(config)?;
    Ok(serde_yaml::from_value(value)?)
}

/// Saves a copy of the params used for this iteration to
/// `{output_dir}/{name}_params.yaml`, replacing any earlier copy.
pub fn save_params(config: &ExpandedConfig, fs: &impl Filesystem) -> Result<PathBuf> {
    let params_path = config.params_path();
    let contents = serde_yaml::to_string(&sorted_fields(config)?)?;

    fs.write(&params_path, &contents).map_err(|e| ParamsError::io(&params_path, e))?;
    info!("Saved params to {}", params_path.display());

    Ok(params_path)
}

/// Reads back a params file written by [`save_params`].
pub fn load_params(path: &Path) -> Result<ExpandedConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| ParamsError::io(path, e))?;
    serde_yaml::from_str(&contents).map_err(|source| ParamsError::ParamsFile { path: path.to_path_buf(), source })
}
