use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn write_input(dir: &TempDir, name: &str, contents: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path.to_string_lossy().into_owned()
}

fn plotternova() -> Command {
    Command::cargo_bin("plotternova").unwrap()
}

#[test]
fn test_lines_writes_svg() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "series.csv", "t,up,down\n0,0,3\n1,1,2\n2,2,1\n");
    let out = dir.path().join("plots/series.svg");

    plotternova()
        .args(["lines", "--input", input.as_str(), "--out"])
        .arg(&out)
        .args(["--xlabel", "time", "--style", "publication", "--grid", "dashed"])
        .assert()
        .success();

    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.contains(">up</text>"));
    assert!(svg.contains(">down</text>"));
}

#[test]
fn test_refuses_to_overwrite_without_force() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "series.csv", "x,y\n0,1\n1,2\n");
    let out = dir.path().join("series.svg");
    fs::write(&out, "old").unwrap();

    plotternova()
        .args(["lines", "--input", input.as_str(), "--out"])
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists. Use --force to overwrite."));
    assert_eq!(fs::read_to_string(&out).unwrap(), "old");

    plotternova()
        .args(["lines", "--input", input.as_str(), "--out"])
        .arg(&out)
        .arg("--force")
        .assert()
        .success();
    assert!(fs::read_to_string(&out).unwrap().contains("<svg"));
}

#[test]
fn test_hist_with_ratio_and_errors() {
    let dir = TempDir::new().unwrap();
    let input = write_input(
        &dir,
        "samples.csv",
        "data,model\n0.1,0.2\n0.4,0.3\n0.45,0.8\n0.9,\n",
    );
    let out = dir.path().join("hist.svg");

    plotternova()
        .args(["hist", "--input", input.as_str(), "--out"])
        .arg(&out)
        .args(["--edges", "0,0.5,1", "--errors", "--err-style", "errorbar", "--ratio"])
        .assert()
        .success();

    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.contains(">Ratio</text>"));
    assert!(svg.contains(">model</text>"));
}

#[test]
fn test_stacked_bar_hist_from_tsv() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "samples.tsv", "a\tb\n1\t2\n2\t3\n3\t3\n");
    let out = dir.path().join("stack.svg");

    plotternova()
        .args(["hist", "--input", input.as_str(), "--out"])
        .arg(&out)
        .args(["--delimiter", "tab", "--bins", "3", "--stack", "--hist-type", "bar"])
        .assert()
        .success();
    assert!(out.exists());
}

#[test]
fn test_invalid_inputs_fail() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "bad.csv", "x,y\n0,1\n1,oops\n");

    plotternova()
        .args(["lines", "--input", input.as_str(), "--out"])
        .arg(dir.path().join("bad.svg"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid value 'oops'"));

    let good = write_input(&dir, "good.csv", "x,y\n0,1\n1,2\n");
    plotternova()
        .args(["lines", "--input", good.as_str(), "--out"])
        .arg(dir.path().join("plot.pdf"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported output format"));

    plotternova()
        .args(["hist", "--input", good.as_str(), "--out"])
        .arg(dir.path().join("h.svg"))
        .args(["--hist-type", "violin"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown histogram type 'violin'"));
}

#[test]
fn test_xlim_accepts_negative_bounds() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "series.csv", "x,y\n-1,1\n1,2\n");
    plotternova()
        .args(["lines", "--input", input.as_str(), "--out"])
        .arg(dir.path().join("lim.svg"))
        .args(["--xlim", "-2,2", "--legend", "none"])
        .assert()
        .success();
}

#[test]
fn test_bad_input_leaves_output_dir_untouched() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "bad.csv", "x,y\n0,oops\n");
    let out_dir = dir.path().join("never");

    plotternova()
        .args(["hist", "--input", input.as_str(), "--out"])
        .arg(out_dir.join("h.svg"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error reading"));
    plotternova()
        .args(["lines", "--input"])
        .arg(dir.path().join("missing.csv"))
        .arg("--out")
        .arg(out_dir.join("l.svg"))
        .assert()
        .failure();
    assert!(!out_dir.exists());
}

#[test]
fn test_export_logged_once() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "series.csv", "x,y\n0,1\n1,2\n");
    let log = dir.path().join("run.log");

    plotternova()
        .args(["lines", "--input", input.as_str(), "--out"])
        .arg(dir.path().join("once.svg"))
        .arg("--log-file")
        .arg(&log)
        .assert()
        .success();
    let text = fs::read_to_string(&log).unwrap().to_lowercase();
    assert_eq!(text.matches("wrote ").count(), 1);
}
