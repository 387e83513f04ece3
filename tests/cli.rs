extern crate assert_cmd;
extern crate predicates;
extern crate tempfile;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;

#[test]
fn renders_a_small_ppm() {
    let dir = tempfile::tempdir().unwrap();
    let outfile = dir.path().join("tiny.ppm");

    Command::cargo_bin("mandel")
        .unwrap()
        .args(&[
            "-o",
            outfile.to_str().unwrap(),
            "-s",
            "8x8",
            "--tile",
            "4x4",
            "-n",
            "4",
            "-i",
            "64",
            "-t",
            "1",
            "--ordered",
        ])
        .assert()
        .success();

    let text = fs::read_to_string(&outfile).unwrap();
    assert!(text.starts_with("P3 8 8 255\n"));
    assert_eq!(text.lines().count(), 9);
}

#[test]
fn same_seed_gives_identical_files() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("a.ppm");
    let second = dir.path().join("b.ppm");

    for outfile in &[&first, &second] {
        Command::cargo_bin("mandel")
            .unwrap()
            .args(&[
                "-o",
                outfile.to_str().unwrap(),
                "-s",
                "16x12",
                "--tile",
                "4x4",
                "-n",
                "8",
                "-i",
                "64",
                "-t",
                "2",
                "--seed",
                "12345",
            ])
            .assert()
            .success();
    }

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn rejects_an_oversized_tile() {
    let dir = tempfile::tempdir().unwrap();
    let outfile = dir.path().join("never.ppm");

    Command::cargo_bin("mandel")
        .unwrap()
        .args(&[
            "-o",
            outfile.to_str().unwrap(),
            "-s",
            "8x8",
            "--tile",
            "16x16",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("do not fit"));

    assert!(!outfile.exists());
}

#[test]
fn dumps_sampling_data_on_request() {
    let dir = tempfile::tempdir().unwrap();
    let outfile = dir.path().join("tiny.ppm");

    Command::cargo_bin("mandel")
        .unwrap()
        .current_dir(dir.path())
        .args(&[
            "-o",
            outfile.to_str().unwrap(),
            "-s",
            "8x8",
            "--tile",
            "4x4",
            "-n",
            "16",
            "-i",
            "64",
            "-t",
            "1",
            "--dump-sampling-data",
        ])
        .assert()
        .success();

    for name in &["halton23.dat", "mitchell_1d.dat", "mitchell_2d.dat"] {
        let table = fs::read_to_string(dir.path().join(name)).unwrap();
        assert!(table.starts_with("# X Y"), "{} lacks its header", name);
    }
}
