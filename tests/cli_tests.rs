use regex::Regex;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

struct TestContext {
    dir: TempDir,
    library_path: PathBuf,
}

impl TestContext {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let library_path = dir.path().join("library.csv");

        let mut f = File::create(&library_path).unwrap();
        writeln!(f, "name,position").unwrap();
        // Two colliding pairs and two loners.
        writeln!(f, "alpha,1.00").unwrap();
        writeln!(f, "alpha,7.00").unwrap();
        writeln!(f, "beta,1.00").unwrap();
        writeln!(f, "beta,8.00").unwrap();
        writeln!(f, "gamma,3.00").unwrap();
        writeln!(f, "delta,3.00").unwrap();
        writeln!(f, "epsilon,5.50").unwrap();
        writeln!(f, "zeta,9.50").unwrap();

        Self { dir, library_path }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mixforge"))
        .args(args)
        .output()
        .expect("Failed to execute binary")
}

/// `(mixture, size)` for every row of the summary table.
fn parse_mixture_rows(stdout: &str) -> Vec<(String, usize)> {
    let row = Regex::new(r"^\|\s*(Mixture-\d+|Mix-\w+)\s*\|\s*(\d+)\s*\|").unwrap();
    stdout
        .lines()
        .filter_map(|line| {
            row.captures(line)
                .map(|c| (c[1].to_string(), c[2].parse().unwrap()))
        })
        .collect()
}

#[test]
fn test_cli_generate_greedy() {
    let ctx = TestContext::new();
    let output = run(&["generate", ctx.library_path.to_str().unwrap(), "-n", "2"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let rows = parse_mixture_rows(&stdout);
    assert_eq!(rows.len(), 2, "STDOUT:\n{}", stdout);
    assert_eq!(rows.iter().map(|r| r.1).sum::<usize>(), 6);
    assert!(stdout.contains("Total overlap"));
}

#[test]
fn test_cli_generate_refined_writes_json() {
    let ctx = TestContext::new();
    let out = ctx.path("design.json");
    let output = run(&[
        "generate",
        ctx.library_path.to_str().unwrap(),
        "--mode",
        "nComponentsPerMixture",
        "-n",
        "2",
        "--method",
        "refined",
        "--seed",
        "7",
        "--output",
        out.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let design: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    let pools = design["pools"].as_array().unwrap();
    assert_eq!(pools.len(), 3);
    assert_eq!(design["totalOverlap"].as_f64(), Some(0.0));
    assert_eq!(design["mode"], "nComponentsPerMixture");
}

#[test]
fn test_cli_infeasible_request_fails() {
    let ctx = TestContext::new();
    let output = run(&["generate", ctx.library_path.to_str().unwrap(), "-n", "50"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Clustering Error"), "STDERR:\n{}", stderr);
}

#[test]
fn test_cli_first_fit_needs_size_mode() {
    let ctx = TestContext::new();
    let output = run(&[
        "generate",
        ctx.library_path.to_str().unwrap(),
        "--method",
        "first-fit",
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Configuration Error"));
}

#[test]
fn test_cli_evaluate() {
    let ctx = TestContext::new();
    let mixtures = ctx.path("mixtures.json");
    std::fs::write(
        &mixtures,
        r#"{"Mix-1": ["alpha", "beta", "gamma"], "Mix-2": ["delta", "epsilon", "zeta"]}"#,
    )
    .unwrap();

    let output = run(&[
        "evaluate",
        ctx.library_path.to_str().unwrap(),
        mixtures.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let rows = parse_mixture_rows(&stdout);
    assert_eq!(rows, vec![("Mix-1".to_string(), 3), ("Mix-2".to_string(), 3)]);
}

#[test]
fn test_cli_simulate_then_generate() {
    let ctx = TestContext::new();
    let library = ctx.path("simulated.json");
    let output = run(&[
        "simulate",
        library.to_str().unwrap(),
        "--count",
        "12",
        "--peaks",
        "3",
        "--seed",
        "1",
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let output = run(&[
        "generate",
        library.to_str().unwrap(),
        "-n",
        "3",
        "--method",
        "annealing",
        "--seed",
        "1",
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let rows = parse_mixture_rows(&String::from_utf8_lossy(&output.stdout));
    assert_eq!(rows.iter().map(|r| r.1).collect::<Vec<_>>(), vec![4, 4, 4]);
}
