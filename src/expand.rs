use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::args::Args;
use crate::error::{ParamsError, Result};
use crate::fs::Filesystem;
use crate::project_config::ProjectConfigSource;

pub const OUTPUT_SUBDIR: &str = "active_learning";

/// Parsed arguments plus the fields derived from the project configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpandedConfig {
    #[serde(flatten)]
    pub args: Args,
    pub project_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Only set for iterations after the first.
    pub prev_iteration_info_fp: Option<PathBuf>,
    pub name: String,
}

impl ExpandedConfig {
    pub fn params_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}_params.yaml", self.name))
    }
}

pub fn run_name(sampling_iteration: u32) -> String {
    format!("iter_{sampling_iteration}")
}

/// Marker written by the training stage once `iteration` has been annotated.
pub fn iteration_info_path(output_dir: &Path, iteration: u32) -> PathBuf {
    output_dir.join(format!("train_info_iter_{iteration}"))
}

/// Derives the output directory, previous iteration marker and run name.
///
/// Creates the output directory if it is missing. For any iteration after the
/// first, the previous iteration's marker must already exist.
pub fn expand(args: Args, source: &impl ProjectConfigSource, fs: &impl Filesystem) -> Result<ExpandedConfig> {
    let project_config = source.load(Path::new(&args.project_config_fp))?;
    let project_dir = project_config.project_dir;

    let output_dir = project_dir.join(OUTPUT_SUBDIR);
    if !fs.exists(&output_dir) {
        fs.create_dir_all(&output_dir).map_err(|e| ParamsError::io(&output_dir, e))?;
        info!("Created output directory {}", output_dir.display());
    }

    let prev_iteration_info_fp = match args.sampling_iteration.checked_sub(1) {
        Some(prev) => {
            let path = iteration_info_path(&output_dir, prev);
            if !fs.exists(&path) {
                return Err(ParamsError::MissingPreviousIteration { path });
            }
            debug!("Found previous iteration info at {}", path.display());
            Some(path)
        }
        None => None,
    };

    let name = run_name(args.sampling_iteration);

    Ok(ExpandedConfig { args, project_dir, output_dir, prev_iteration_info_fp, name })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::memory::MemoryFilesystem;
    use crate::fs::LocalFilesystem;
    use crate::project_config::{ProjectConfig, YamlProjectConfig};
    use clap::Parser;
    use tempfile::TempDir;

    struct FixedProjectDir(&'static str);

    impl ProjectConfigSource for FixedProjectDir {
        fn load(&self, _path: &Path) -> Result<ProjectConfig> {
            Ok(ProjectConfig { project_dir: PathBuf::from(self.0) })
        }
    }

    fn args_for_iteration(iteration: u32) -> Args {
        let iteration = iteration.to_string();
        Args::try_parse_from([
            "al",
            "--project-config-fp",
            "cfg.yaml",
            "--sampling-iteration",
            iteration.as_str(),
        ])
        .unwrap()
    }

    #[test]
    fn test_first_iteration() {
        let fs = MemoryFilesystem::default();
        let config = expand(args_for_iteration(0), &FixedProjectDir("/data/proj"), &fs).unwrap();

        assert_eq!(config.project_dir, PathBuf::from("/data/proj"));
        assert_eq!(config.output_dir, PathBuf::from("/data/proj/active_learning"));
        assert_eq!(config.prev_iteration_info_fp, None);
        assert_eq!(config.name, "iter_0");
        assert_eq!(config.params_path(), PathBuf::from("/data/proj/active_learning/iter_0_params.yaml"));
        assert!(fs.exists(Path::new("/data/proj/active_learning")));
    }

    #[test]
    fn test_first_iteration_ignores_stray_markers() {
        let fs = MemoryFilesystem::default().with_file("/data/proj/active_learning/train_info_iter_0", "");
        let config = expand(args_for_iteration(0), &FixedProjectDir("/data/proj"), &fs).unwrap();
        assert_eq!(config.prev_iteration_info_fp, None);
    }

    #[test]
    fn test_existing_output_dir_is_not_recreated() {
        let fs = MemoryFilesystem::default();
        fs.create_dir_all(Path::new("/data/proj/active_learning")).unwrap();

        expand(args_for_iteration(0), &FixedProjectDir("/data/proj"), &fs).unwrap();
        expand(args_for_iteration(0), &FixedProjectDir("/data/proj"), &fs).unwrap();
        assert_eq!(*fs.dir_creations.borrow(), 1);
    }

    #[test]
    fn test_later_iteration_without_marker_fails() {
        let fs = MemoryFilesystem::default();
        let err = expand(args_for_iteration(2), &FixedProjectDir("/data/proj"), &fs).unwrap_err();

        match err {
            ParamsError::MissingPreviousIteration { path } => {
                assert_eq!(path, PathBuf::from("/data/proj/active_learning/train_info_iter_1"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_later_iteration_records_marker_path() {
        let fs = MemoryFilesystem::default().with_file("/data/proj/active_learning/train_info_iter_1", "");
        let config = expand(args_for_iteration(2), &FixedProjectDir("/data/proj"), &fs).unwrap();

        assert_eq!(
            config.prev_iteration_info_fp,
            Some(PathBuf::from("/data/proj/active_learning/train_info_iter_1"))
        );
        assert_eq!(config.name, "iter_2");
    }

    #[test]
    fn test_run_name_is_not_padded() {
        assert_eq!(run_name(10), "iter_10");
    }

    #[test]
    fn test_expand_on_disk() {
        let temp_dir = TempDir::new().unwrap();
        let project_dir = temp_dir.path().join("proj");
        let config_path = temp_dir.path().join("cfg.yaml");
        std::fs::write(&config_path, format!("project_dir: {}\n", project_dir.display())).unwrap();

        let args = Args::try_parse_from(["al", "--project-config-fp", config_path.to_str().unwrap()]).unwrap();
        let config = expand(args.clone(), &YamlProjectConfig, &LocalFilesystem).unwrap();
        assert!(config.output_dir.is_dir());

        let again = expand(args, &YamlProjectConfig, &LocalFilesystem).unwrap();
        assert_eq!(config, again);
    }

    #[test]
    fn test_missing_project_config_propagates() {
        let args = Args::try_parse_from(["al", "--project-config-fp", "/nonexistent/cfg.yaml"]).unwrap();
        let fs = MemoryFilesystem::default();

        assert!(expand(args, &YamlProjectConfig, &fs).is_err());
        assert!(fs.entries.borrow().is_empty());
    }
}
