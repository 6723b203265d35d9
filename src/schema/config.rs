//! Run configuration for the genetic optimizer.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::BionicDesignParams;

/// Genetic algorithm settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneticAlgorithmConfig {
    /// Individuals per generation.
    #[serde(default = "default_population_size")]
    pub population_size: usize,
    /// Maximum number of generations. Zero still evaluates the initial population.
    #[serde(default = "default_generations")]
    pub generations: usize,
    /// Probability that an offspring is mutated (0.0-1.0).
    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: f32,
    /// Probability that a parent pair is recombined (0.0-1.0).
    #[serde(default = "default_crossover_rate")]
    pub crossover_rate: f32,
    /// Fraction of the population carried over unchanged (0.0-1.0).
    #[serde(default = "default_elitism_rate")]
    pub elitism_rate: f32,
    /// Parent selection strategy.
    #[serde(default)]
    pub selection_method: SelectionMethod,
    /// Random seed for reproducibility.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for GeneticAlgorithmConfig {
    fn default() -> Self {
        Self {
            population_size: default_population_size(),
            generations: default_generations(),
            mutation_rate: default_mutation_rate(),
            crossover_rate: default_crossover_rate(),
            elitism_rate: default_elitism_rate(),
            selection_method: SelectionMethod::default(),
            random_seed: None,
        }
    }
}

fn default_population_size() -> usize {
    50
}
fn default_generations() -> usize {
    100
}
fn default_mutation_rate() -> f32 {
    0.1
}
fn default_crossover_rate() -> f32 {
    0.8
}
fn default_elitism_rate() -> f32 {
    0.1
}

/// Selection method for genetic algorithm.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMethod {
    /// Best of three random picks.
    #[default]
    Tournament,
    /// Fitness-proportionate.
    Roulette,
    /// Quadratic bias toward the top ranks.
    Rank,
}

impl GeneticAlgorithmConfig {
    /// Number of genomes carried over unchanged each generation.
    ///
    /// Never zero when the rate is positive, never more than the population.
    pub fn elite_count(&self) -> usize {
        if self.elitism_rate <= 0.0 {
            return 0;
        }
        let count = (self.elitism_rate * self.population_size as f32).round() as usize;
        count.max(1).min(self.population_size)
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        let check_rate = |value: f32, name: &'static str| {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(ConfigError::RateOutOfRange { name, value })
            }
        };
        check_rate(self.mutation_rate, "mutation_rate")?;
        check_rate(self.crossover_rate, "crossover_rate")?;
        check_rate(self.elitism_rate, "elitism_rate")?;
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("Population size must be at least 1")]
    EmptyPopulation,
    #[error("{name} must be within [0, 1], got {value}")]
    RateOutOfRange { name: &'static str, value: f32 },
}

/// A complete optimization job as stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OptimizationRequest {
    /// Project the result belongs to.
    #[serde(default)]
    pub project_id: String,
    /// Design intent.
    #[serde(default)]
    pub params: BionicDesignParams,
    /// Algorithm settings.
    #[serde(default)]
    pub config: GeneticAlgorithmConfig,
}

impl OptimizationRequest {
    /// Load and validate a request from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, RequestError> {
        let text = fs::read_to_string(path)?;
        let request: Self = serde_json::from_str(&text)?;
        request.config.validate()?;
        Ok(request)
    }
}

/// Errors loading an optimization request.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("Failed to read request: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse request: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}
