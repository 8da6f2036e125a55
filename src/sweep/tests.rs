use std::collections::BTreeSet;

use serde_yaml::Value;

use super::*;

const CHEMCPA_SWEEP: &str = r#"
seml:
  executable: chemCPA/seml_sweep_icb.py
  name: finetuning_num_genes
  output_dir: sweeps/logs
  conda_environment: chemical_CPA

fixed:
  profiling.run_profiler: false
  model:
    hparams:
      dim: 32
      dropout: 0.262378

random:
  samples: 5
  seed: 42
  model.hparams.autoencoder_lr:
    type: loguniform
    min: 1.0e-4
    max: 1.0e-2
  model.hparams.batch_size:
    type: choice
    options: [32, 64, 128]
  model.hparams.step_size_lr:
    type: randint
    min: 50
    max: 100

grid:
  dataset.data_params.split_key:
    type: choice
    options: [split_ood_finetuning, split_random]
  model.embedding.model:
    type: choice
    options: [rdkit, grover_base, jtvae]
"#;

fn sweep() -> SweepDefinition {
    SweepDefinition::from_yaml_str(CHEMCPA_SWEEP).unwrap()
}

#[test]
fn test_parse_groups() {
    let sweep = sweep();
    let seml = sweep.seml.as_ref().unwrap();
    assert_eq!(seml.name.as_deref(), Some("finetuning_num_genes"));
    assert!(seml.other.contains_key("conda_environment"));

    assert_eq!(sweep.fixed.len(), 3);
    assert_eq!(sweep.fixed["model.hparams.dim"], Value::from(32));
    assert_eq!(sweep.random.samples, 5);
    assert_eq!(sweep.random.seed, Some(42));
    assert_eq!(sweep.random.parameters.len(), 3);
    assert_eq!(
        sweep.random.parameters["model.hparams.autoencoder_lr"],
        Distribution::Loguniform {
            min: 1e-4,
            max: 1e-2
        }
    );
    assert_eq!(sweep.grid.len(), 2);
    sweep.validate().unwrap();
}

#[test]
fn test_nested_and_dotted_keys_agree() {
    let nested = SweepDefinition::from_yaml_str(
        "random:\n  samples: 1\n  model:\n    lr: {type: uniform, min: 0.0, max: 1.0}\n",
    )
    .unwrap();
    let dotted = SweepDefinition::from_yaml_str(
        "random:\n  samples: 1\n  model.lr: {type: uniform, min: 0.0, max: 1.0}\n",
    )
    .unwrap();
    assert_eq!(nested, dotted);
}

#[test]
fn test_expand_counts_and_fixed_values() {
    let runs = sweep().expand(None, None).unwrap();
    // 2 split keys x 3 embeddings x 5 samples
    assert_eq!(runs.len(), 30);
    for run in &runs {
        assert_eq!(run["model.hparams.dim"], Value::from(32));
        assert_eq!(run.len(), 3 + 3 + 2);
    }

    let grid_points: BTreeSet<(String, String)> = runs
        .iter()
        .map(|run| {
            (
                run["dataset.data_params.split_key"].as_str().unwrap().to_string(),
                run["model.embedding.model"].as_str().unwrap().to_string(),
            )
        })
        .collect();
    assert_eq!(grid_points.len(), 6);
}

#[test]
fn test_samples_are_within_bounds() {
    let runs = sweep().expand(Some(50), None).unwrap();
    assert_eq!(runs.len(), 300);
    for run in &runs {
        let lr = run["model.hparams.autoencoder_lr"].as_f64().unwrap();
        assert!((1e-4..1e-2).contains(&lr), "lr {}", lr);
        let step = run["model.hparams.step_size_lr"].as_i64().unwrap();
        assert!((50..100).contains(&step), "step {}", step);
        let batch = run["model.hparams.batch_size"].as_i64().unwrap();
        assert!([32, 64, 128].contains(&batch));
    }
}

#[test]
fn test_expand_is_deterministic() {
    let sweep = sweep();
    assert_eq!(
        sweep.expand(None, None).unwrap(),
        sweep.expand(None, None).unwrap()
    );
    assert_ne!(
        sweep.expand(None, Some(1)).unwrap(),
        sweep.expand(None, Some(2)).unwrap()
    );
}

#[test]
fn test_grid_only_sweep() {
    let sweep = SweepDefinition::from_yaml_str(
        "fixed:\n  a: 1\ngrid:\n  b: {type: randint, min: 0, max: 4}\n",
    )
    .unwrap();
    let runs = sweep.expand(None, None).unwrap();
    assert_eq!(runs.len(), 4);
    assert_eq!(runs[3]["b"], Value::from(3));
}

#[test]
fn test_empty_definition_yields_one_run() {
    let sweep = SweepDefinition::from_yaml_str("fixed:\n  a: 1\n").unwrap();
    let runs = sweep.expand(None, None).unwrap();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0]["a"], Value::from(1));
}

#[test]
fn test_invalid_bounds() {
    for yaml in [
        "random:\n  samples: 1\n  lr: {type: loguniform, min: 0.0, max: 1.0}\n",
        "random:\n  samples: 1\n  lr: {type: loguniform, min: 0.1, max: 0.01}\n",
        "random:\n  samples: 1\n  x: {type: uniform, min: 1.0, max: 1.0}\n",
        "random:\n  samples: 1\n  x: {type: choice, options: []}\n",
        "random:\n  samples: 1\n  x: {type: randint, min: 5, max: 5}\n",
    ] {
        let sweep = SweepDefinition::from_yaml_str(yaml).unwrap();
        assert!(
            matches!(sweep.validate(), Err(SweepError::InvalidDistribution { .. })),
            "{}",
            yaml
        );
    }
}

#[test]
fn test_unknown_distribution_type() {
    let err = SweepDefinition::from_yaml_str(
        "random:\n  samples: 1\n  x: {type: normal, mean: 0.0, std: 1.0}\n",
    )
    .unwrap_err();
    assert!(matches!(err, SweepError::InvalidDistribution { ref name, .. } if name == "x"));
}

#[test]
fn test_duplicate_parameter() {
    let sweep = SweepDefinition::from_yaml_str(
        "fixed:\n  model.dim: 32\ngrid:\n  model:\n    dim: {type: choice, options: [16, 64]}\n",
    )
    .unwrap();
    assert!(matches!(
        sweep.validate(),
        Err(SweepError::DuplicateParameter(name)) if name == "model.dim"
    ));
}

#[test]
fn test_continuous_grid_is_rejected() {
    let sweep = SweepDefinition::from_yaml_str(
        "grid:\n  lr: {type: uniform, min: 0.0, max: 1.0}\n",
    )
    .unwrap();
    assert!(matches!(sweep.validate(), Err(SweepError::NotEnumerable(_))));
}

#[test]
fn test_missing_samples() {
    let sweep = SweepDefinition::from_yaml_str(
        "random:\n  lr: {type: uniform, min: 0.0, max: 1.0}\n",
    )
    .unwrap();
    assert!(matches!(sweep.validate(), Err(SweepError::NoSamples)));
    assert!(matches!(sweep.expand(None, None), Err(SweepError::NoSamples)));
    assert_eq!(sweep.expand(Some(2), None).unwrap().len(), 2);
}
