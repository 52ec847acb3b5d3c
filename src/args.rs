use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

pub const DEFAULT_AVES_MODEL_WEIGHT_FP: &str =
    "/home/jupyter/carrion_crows/clip/pretrained_weights/aves-base-bio.pt";

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SamplingMethod {
    Uncertainty,
    Random,
    Coreset,
}

/// Selects audio clips for the next round of annotation.
#[derive(Parser, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[arg(long)]
    pub project_config_fp: String,

    /// Random seed
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Duration of clip to sample for annotation, in seconds
    #[arg(long, default_value_t = 30.0)]
    pub sample_duration: f64,

    /// How many clips to sample
    #[arg(long, default_value_t = 120)]
    pub max_n_clips_to_sample: usize,

    /// What method to use when sampling clips
    #[arg(long, value_enum, default_value_t = SamplingMethod::Uncertainty)]
    pub sampling_method: SamplingMethod,

    /// How many times data have previously been sampled and annotated for this project
    #[arg(long, default_value_t = 0)]
    pub sampling_iteration: u32,

    /// For benchmarking, use predefined annotations to simulate the annotation step
    #[arg(long)]
    pub query_oracle: bool,

    /// Sample rate of output audio
    #[arg(long, default_value_t = 16000)]
    pub output_sr: u32,

    /// Model params saved as yaml, used by coreset and uncertainty sampling
    #[arg(long)]
    pub model_args_fp: Option<String>,

    // Fallbacks for coreset sampling when no trained detection model is given.
    #[arg(long, default_value_t = 16000)]
    pub sr: u32,

    /// Downscaling performed by aves
    #[arg(long, default_value_t = 320)]
    pub scale_factor: u32,

    #[arg(long, default_value = DEFAULT_AVES_MODEL_WEIGHT_FP)]
    pub aves_model_weight_fp: String,

    /// Maximum clips to sample per file
    #[arg(long, default_value_t = 1)]
    pub uncertainty_clips_per_file: usize,

    /// Geometric weighting of sorted uncertainties; closer to 0 discourages
    /// sampling clips with lots of detections
    #[arg(long, default_value_t = 0.8)]
    pub uncertainty_discount_factor: f64,

    /// Ignore detection peaks lower than this value when computing uncertainty
    #[arg(long, default_value_t = 0.1)]
    pub uncertainty_detection_threshold: f64,

    /// Maximum clips to sample per file
    #[arg(long)]
    pub random_clips_per_file: Option<usize>,
}

impl Args {
    /// Seeded generator for the sampling stages, reproducible from the saved params.
    pub fn rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.seed)
    }
}
