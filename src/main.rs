use anyhow::Context;
use clap::Parser;
use tracing::info;

use active_learning_params::args::Args;
use active_learning_params::expand::expand;
use active_learning_params::fs::LocalFilesystem;
use active_learning_params::logging::setup_logging;
use active_learning_params::project_config::YamlProjectConfig;
use active_learning_params::save::save_params;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    setup_logging();

    let config_fp = args.project_config_fp.clone();
    let config = expand(args, &YamlProjectConfig, &LocalFilesystem)
        .with_context(|| format!("Failed to expand active learning args from {config_fp}"))?;

    info!(
        "Sampling iteration {} ({:?}), output dir {}",
        config.args.sampling_iteration,
        config.args.sampling_method,
        config.output_dir.display()
    );

    let params_path = save_params(&config, &LocalFilesystem).context("Failed to save params")?;
    println!("{}", params_path.display());

    Ok(())
}
