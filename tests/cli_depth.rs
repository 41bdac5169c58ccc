use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use std::process::Command;
use tempfile::TempDir;

#[test]
fn command_invalid() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("segpile")?;
    cmd.arg("foobar");
    cmd.assert().failure().stderr(predicate::str::contains(
        "recognized",
    ));

    Ok(())
}

#[test]
fn command_depth_help() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("segpile")?;
    let output = cmd.arg("depth").arg("--help").output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(stdout.contains("Count overlapping match segments"));
    Ok(())
}

#[test]
fn command_depth_table() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("segpile")?;
    let output = cmd
        .arg("depth")
        .arg("tests/segments/matches.csv")
        .arg("--chromosome")
        .arg("1")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success());
    assert_eq!(stdout, "1;100;1\n1;150;3\n1;200;2\n1;250;0\n");

    Ok(())
}

#[test]
fn command_depth_threshold() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("segpile")?;
    let output = cmd
        .arg("depth")
        .arg("tests/segments/matches.csv")
        .arg("--chromosome")
        .arg("1")
        .arg("--min-cm")
        .arg("6")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    // Bob (5.2 cM) drops out, Alice and David stay
    assert!(output.status.success());
    assert_eq!(stdout, "1;100;1\n1;150;2\n1;200;1\n1;250;0\n");

    Ok(())
}

#[test]
fn command_depth_names() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("segpile")?;
    let output = cmd
        .arg("depth")
        .arg("tests/segments/matches.csv")
        .arg("--chromosome")
        .arg("1")
        .arg("--names")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success());
    assert_eq!(
        stdout,
        "1;100;1\n  + Alice Example\n\
         1;150;3\n  + Bob Example, David Example\n\
         1;200;2\n  - Alice Example\n\
         1;250;0\n  - Bob Example, David Example\n"
    );

    Ok(())
}

#[test]
fn command_depth_plot() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("segpile")?;
    let output = cmd
        .arg("depth")
        .arg("tests/segments/matches.csv")
        .arg("--chromosome")
        .arg("1")
        .arg("--plot")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success());

    // (50 * 1 + 50 * 3 + 50 * 2) / 150 = 2
    assert!(stdout.starts_with("# chromosome 1, average depth 2\n"));

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2 + 6);
    assert_eq!(lines[2], "0.0001\t1");
    assert_eq!(lines[3], "0.000149\t1");
    assert_eq!(lines[4], "0.00015\t3");
    assert_eq!(lines[7], "0.000249\t2");

    Ok(())
}

#[test]
fn command_depth_outfile() -> anyhow::Result<()> {
    let tempdir = TempDir::new()?;
    let outfile = tempdir.path().join("chr1.tsv");

    let mut cmd = Command::cargo_bin("segpile")?;
    cmd.arg("depth")
        .arg("tests/segments/matches.csv")
        .arg("--chromosome")
        .arg("1")
        .arg("--plot")
        .arg("-o")
        .arg(outfile.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = fs::read_to_string(&outfile)?;
    assert!(written.contains("# locus.Mb\tmatches"));

    tempdir.close()?;
    Ok(())
}

#[test]
fn command_depth_mode_conflict() -> anyhow::Result<()> {
    // Conflicting display modes are rejected before any file is opened
    let mut cmd = Command::cargo_bin("segpile")?;
    cmd.arg("depth")
        .arg("tests/segments/matches.csv")
        .arg("--chromosome")
        .arg("1")
        .arg("--names")
        .arg("--plot")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));

    Ok(())
}

#[test]
fn command_depth_no_data() -> anyhow::Result<()> {
    // Nothing on chromosome 5: the table is empty but fine
    let mut cmd = Command::cargo_bin("segpile")?;
    cmd.arg("depth")
        .arg("tests/segments/matches.csv")
        .arg("--chromosome")
        .arg("5")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    // The plot average is undefined there
    let mut cmd = Command::cargo_bin("segpile")?;
    cmd.arg("depth")
        .arg("tests/segments/matches.csv")
        .arg("--chromosome")
        .arg("5")
        .arg("--plot")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no data"));

    Ok(())
}

#[test]
fn command_depth_skips_malformed_rows() -> anyhow::Result<()> {
    let tempdir = TempDir::new()?;
    let infile = tempdir.path().join("ragged.csv");

    let mut file = fs::File::create(&infile)?;
    writeln!(file, "ID,Name,Match name,Chromosome,Start Location,End Location,Start RSID,End RSID,Centimorgans,SNPs")?;
    writeln!(file, "A1B2,Tester,Alice Example,1,100,200,rs101,rs102,7.5,500")?;
    writeln!(file, "this,row,is,short")?;
    writeln!(file, "A1B2,Tester,Bob Example,1,150,250,rs103,rs104,5.2,450")?;
    drop(file);

    let mut cmd = Command::cargo_bin("segpile")?;
    let output = cmd
        .arg("depth")
        .arg(infile.to_str().unwrap())
        .arg("--chromosome")
        .arg("1")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success());
    assert_eq!(stdout, "1;100;1\n1;150;2\n1;200;1\n1;250;0\n");

    tempdir.close()?;
    Ok(())
}

#[test]
fn command_depth_corrupt_field() -> anyhow::Result<()> {
    let tempdir = TempDir::new()?;
    let infile = tempdir.path().join("corrupt.csv");

    let mut file = fs::File::create(&infile)?;
    writeln!(file, "ID,Name,Match name,Chromosome,Start Location,End Location,Start RSID,End RSID,Centimorgans,SNPs")?;
    writeln!(file, "A1B2,Tester,Alice Example,seven,100,200,rs101,rs102,7.5,500")?;
    drop(file);

    let mut cmd = Command::cargo_bin("segpile")?;
    cmd.arg("depth")
        .arg(infile.to_str().unwrap())
        .arg("--chromosome")
        .arg("7")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not numeric"));

    tempdir.close()?;
    Ok(())
}
