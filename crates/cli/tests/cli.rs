use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

const SMALL: [&str; 24] = [
    "--capacity", "40",
    "--seed", "5",
    "--gene-length", "50",
    "--gene-count", "8",
    "--chromosomes", "2",
    "--del-mut", "20",
    "--mutation-rate", "1e-3",
    "--burn-in", "1",
    "--bottleneck-ne", "10",
    "--bottleneck-duration", "3",
    "--tail", "3",
    "--pi-window", "100",
];

#[test]
fn test_init_writes_config() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("params.json");

    let mut cmd = Command::cargo_bin("purgesim").unwrap();
    cmd.arg("init")
        .arg("--file")
        .arg(&path)
        .arg("--capacity")
        .arg("321")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration written"))
        .stdout(predicate::str::contains("Carrying Capacity: 321"));

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"capacity\": 321"));
}

#[test]
fn test_init_refuses_to_overwrite() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("params.json");
    std::fs::write(&path, "{}").unwrap();

    let mut cmd = Command::cargo_bin("purgesim").unwrap();
    cmd.arg("init")
        .arg("--file")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    let mut cmd = Command::cargo_bin("purgesim").unwrap();
    cmd.arg("init").arg("--file").arg(&path).arg("--force").assert().success();
}

#[test]
fn test_schedule_example() {
    let mut cmd = Command::cargo_bin("purgesim").unwrap();
    cmd.args([
        "schedule",
        "--capacity", "1000",
        "--burn-in", "2.5",
        "--bottleneck-ne", "5",
        "--bottleneck-ramp", "5",
        "--bottleneck-duration", "20",
        "--recovery-fraction", "0.4",
        "--recovery-ramp", "5",
        "--tail", "20",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("# burnInEnd\t2500"))
    .stdout(predicate::str::contains("# end\t2555"))
    .stdout(predicate::str::contains("2505\t1000"))
    .stdout(predicate::str::contains("2510\t5"))
    .stdout(predicate::str::contains("2535\t400"));
}

#[test]
fn test_schedule_reads_config_file() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("params.json");

    let mut cmd = Command::cargo_bin("purgesim").unwrap();
    cmd.arg("init")
        .arg("--file")
        .arg(&path)
        .args(["--capacity", "200", "--burn-in", "1"])
        .assert()
        .success();

    let mut cmd = Command::cargo_bin("purgesim").unwrap();
    cmd.arg("schedule")
        .arg("--config")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("# burnInEnd\t200"));
}

#[test]
fn test_invalid_parameters_fail() {
    let mut cmd = Command::cargo_bin("purgesim").unwrap();
    cmd.args(["schedule", "--gene-count", "10", "--chromosomes", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn test_run_writes_reports() {
    let temp = tempdir().unwrap();

    let mut cmd = Command::cargo_bin("purgesim").unwrap();
    cmd.arg("run")
        .arg("--no-progress")
        .args(SMALL)
        .arg("--output-dir")
        .arg(temp.path())
        .args(["--name", "small", "-t", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Simulation complete!"));

    for suffix in ["popLoad", "indLoad", "mutSummary", "mutSummarySample", "pi"] {
        let path = temp.path().join(format!("small_{suffix}.tsv"));
        assert!(path.exists(), "{}", path.display());
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.lines().count() > 1, "{}", path.display());
    }
}
