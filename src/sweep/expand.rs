use std::collections::BTreeMap;

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_yaml::Value;

use super::{SweepDefinition, SweepError, DEFAULT_SWEEP_SEED};

/// One fully specified run: dotted parameter name to value
pub type RunConfig = BTreeMap<String, Value>;

fn cartesian_product(axes: &[(&String, Vec<Value>)]) -> Vec<RunConfig> {
    let Some(((name, values), rest)) = axes.split_first() else {
        return vec![RunConfig::new()];
    };
    let rest_configs = cartesian_product(rest);
    values
        .iter()
        .flat_map(|value| {
            rest_configs.iter().map(move |config| {
                let mut config = config.clone();
                config.insert((*name).clone(), value.clone());
                config
            })
        })
        .collect()
}

impl SweepDefinition {
    /// Expand into concrete run configurations.
    ///
    /// Every grid point is combined with every random draw, and each run
    /// carries the fixed parameters. Draws are made once from a seeded RNG,
    /// so the same definition and seed always yield the same runs. With no
    /// random parameters each grid point yields exactly one run.
    pub fn expand(
        &self,
        samples_override: Option<usize>,
        seed_override: Option<u64>,
    ) -> Result<Vec<RunConfig>, SweepError> {
        self.validate_parameters()?;

        let draws: Vec<RunConfig> = if self.random.parameters.is_empty() {
            vec![RunConfig::new()]
        } else {
            let samples = samples_override.unwrap_or(self.random.samples);
            if samples == 0 {
                return Err(SweepError::NoSamples);
            }
            let seed = seed_override
                .or(self.random.seed)
                .unwrap_or(DEFAULT_SWEEP_SEED);
            let mut rng = StdRng::seed_from_u64(seed);
            (0..samples)
                .map(|_| {
                    self.random
                        .parameters
                        .iter()
                        .map(|(name, distribution)| (name.clone(), distribution.sample(&mut rng)))
                        .collect()
                })
                .collect()
        };

        let axes = self
            .grid
            .iter()
            .map(|(name, distribution)| {
                distribution.grid_values(name).map(|values| (name, values))
            })
            .collect::<Result<Vec<_>, SweepError>>()?;
        let grid_points = cartesian_product(&axes);

        let mut runs = Vec::with_capacity(grid_points.len() * draws.len());
        for point in &grid_points {
            for draw in &draws {
                let mut run = self.fixed.clone();
                run.extend(point.iter().map(|(k, v)| (k.clone(), v.clone())));
                run.extend(draw.iter().map(|(k, v)| (k.clone(), v.clone())));
                runs.push(run);
            }
        }

        info!(
            "Expanded sweep into {} runs ({} grid points x {} draws)",
            runs.len(),
            grid_points.len(),
            draws.len()
        );
        Ok(runs)
    }
}
