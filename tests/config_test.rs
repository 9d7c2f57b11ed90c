use clap::Parser;
use mixforge::config::{Config, Method, PoolMode};
use mixforge::error::MixError;
use mixforge::optimizer::cooling::CoolingMethod;
use std::str::FromStr;

#[derive(Parser, Debug)]
struct TestCli {
    #[command(flatten)]
    config: Config,
}

#[test]
fn test_defaults() {
    let cfg = Config::default();
    assert_eq!(cfg.design.mode, PoolMode::Mixtures);
    assert_eq!(cfg.design.n, 2);
    assert_eq!(cfg.design.method, Method::Greedy);
    assert_eq!(cfg.scoring.peak_cap, 10);
    assert_eq!(cfg.scoring.saturation_bucket, 5);
    assert_eq!(cfg.anneal.start_temp, 1000.0);
    assert_eq!(cfg.anneal.temp_k, 200.0);
    assert_eq!(cfg.anneal.cooling_method(), Some(CoolingMethod::Linear));
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_cli_defaults_match_struct_defaults() {
    let cli = TestCli::parse_from(["test"]);
    let d = Config::default();
    assert_eq!(cli.config.design.mode, d.design.mode);
    assert_eq!(cli.config.scoring.levels, d.scoring.levels);
    assert_eq!(cli.config.scoring.floor_bucket, d.scoring.floor_bucket);
    assert_eq!(cli.config.anneal.final_temp, d.anneal.final_temp);
    assert_eq!(cli.config.anneal.iterations, d.anneal.iterations);
}

#[test]
fn test_cli_overrides() {
    let cli = TestCli::parse_from([
        "test",
        "--mode",
        "nComponentsPerSample",
        "-n",
        "4",
        "--method",
        "first-fit",
        "--floor-bucket",
        "-3",
        "--cooling",
        "exponential",
    ]);
    assert_eq!(cli.config.design.mode, PoolMode::ComponentsPerMixture);
    assert_eq!(cli.config.design.n, 4);
    assert_eq!(cli.config.design.method, Method::FirstFit);
    assert_eq!(cli.config.scoring.floor_bucket, -3);
    assert_eq!(cli.config.anneal.cooling_method(), Some(CoolingMethod::Exponential));
}

#[test]
fn test_mode_names() {
    assert_eq!(PoolMode::from_str("nMixtures").unwrap(), PoolMode::Mixtures);
    assert_eq!(PoolMode::from_str("nSamples").unwrap(), PoolMode::Mixtures);
    assert_eq!(
        PoolMode::from_str("nComponentsPerMixture").unwrap(),
        PoolMode::ComponentsPerMixture
    );
    assert_eq!(PoolMode::Mixtures.to_string(), "nMixtures");
    assert!(PoolMode::from_str("nBananas").is_err());
    assert_eq!(Method::from_str("Refined").unwrap(), Method::Refined);
}

#[test]
fn test_json_round_trip_with_aliases() {
    let json = r#"{
        "design": {"mode": "nSamples", "n": 3, "method": "annealing"},
        "anneal": {"cooling": "quadratic", "iterations": 4}
    }"#;
    let cfg: Config = serde_json::from_str(json).unwrap();
    assert_eq!(cfg.design.mode, PoolMode::Mixtures);
    assert_eq!(cfg.design.n, 3);
    assert_eq!(cfg.design.method, Method::Annealing);
    assert_eq!(cfg.anneal.iterations, 4);
    // Missing blocks and fields keep their defaults.
    assert_eq!(cfg.anneal.start_temp, 1000.0);
    assert_eq!(cfg.scoring.peak_cap, 10);
    // Unknown cooling names are not a configuration error.
    assert_eq!(cfg.anneal.cooling_method(), None);
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mix.json");
    std::fs::write(&path, r#"{"design": {"n": 6}}"#).unwrap();
    let cfg = Config::load_from_file(&path).unwrap();
    assert_eq!(cfg.design.n, 6);

    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(Config::load_from_file(&path), Err(MixError::Json(_))));
}

#[test]
fn test_invalid_configuration() {
    let mut cfg = Config::default();
    cfg.scoring.levels = "0.5-10".to_string();
    assert!(matches!(cfg.validate(), Err(MixError::Config(_))));

    let mut cfg = Config::default();
    cfg.scoring.min_distance = -0.1;
    assert!(matches!(cfg.validate(), Err(MixError::Config(_))));

    let mut cfg = Config::default();
    cfg.anneal.temp_k = f64::NAN;
    assert!(matches!(cfg.validate(), Err(MixError::Config(_))));
}
