//! Tests for the subprocess prober against real child processes.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use corpus_sweep::{CommandProber, Driver, Error, ProbeOutcome, Prober};
use tempfile::tempdir;

/// Drop a small executable shell script into `dir`.
fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[test]
fn decode_probe_receives_the_candidate_path() {
    let dir = tempdir().unwrap();
    let probe = script(dir.path(), "probe.sh", r#"test -f "$1""#);
    let candidate = dir.path().join("candidate.txt");
    fs::write(&candidate, b"data").unwrap();

    let prober = CommandProber::new(
        probe.to_str().unwrap(),
        probe.to_str().unwrap(),
        dir.path().join("scratch.out"),
    )
    .unwrap();

    assert_eq!(prober.probe_decode(&candidate).unwrap(), ProbeOutcome::Passed);
    assert_eq!(
        prober.probe_decode(&dir.path().join("missing.txt")).unwrap(),
        ProbeOutcome::Failed { code: 1 }
    );
}

#[test]
fn compress_probe_receives_source_and_scratch() {
    let dir = tempdir().unwrap();
    let compress = script(dir.path(), "compress.sh", r#"cp "$1" "$2""#);
    let candidate = dir.path().join("candidate.txt");
    fs::write(&candidate, b"round trip me").unwrap();
    let scratch = dir.path().join("scratch.out");

    let prober = CommandProber::new("true", compress.to_str().unwrap(), scratch.clone()).unwrap();

    assert_eq!(prober.probe_compress(&candidate).unwrap(), ProbeOutcome::Passed);
    assert_eq!(fs::read(&scratch).unwrap(), b"round trip me");
}

#[test]
fn nonzero_exit_codes_come_through_verbatim() {
    let dir = tempdir().unwrap();
    let failing = script(dir.path(), "failing.sh", "exit 3");
    let candidate = dir.path().join("candidate.txt");
    fs::write(&candidate, b"data").unwrap();

    let prober = CommandProber::new(
        failing.to_str().unwrap(),
        failing.to_str().unwrap(),
        dir.path().join("scratch.out"),
    )
    .unwrap();

    assert_eq!(
        prober.probe_decode(&candidate).unwrap(),
        ProbeOutcome::Failed { code: 3 }
    );
}

#[test]
fn scratch_is_overwritten_between_probes() {
    let dir = tempdir().unwrap();
    let compress = script(dir.path(), "compress.sh", r#"cp "$1" "$2""#);
    let first = dir.path().join("first.txt");
    let second = dir.path().join("second.txt");
    fs::write(&first, b"first payload, the longer one").unwrap();
    fs::write(&second, b"second").unwrap();
    let scratch = dir.path().join("scratch.out");

    let prober = CommandProber::new("true", compress.to_str().unwrap(), scratch.clone()).unwrap();

    prober.probe_compress(&first).unwrap();
    prober.probe_compress(&second).unwrap();

    assert_eq!(fs::read(&scratch).unwrap(), b"second");
}

#[test]
fn end_to_end_sweep_against_shell_harness() {
    let dir = tempdir().unwrap();

    // Decode accepts any readable file; compress rejects files containing
    // the POISON marker with exit code 2, mimicking a round-trip mismatch.
    let decode = script(dir.path(), "decode.sh", r#"test -r "$1""#);
    let compress = script(
        dir.path(),
        "compress.sh",
        r#"if grep -q POISON "$1"; then exit 2; fi
cp "$1" "$2""#,
    );

    let corpus = dir.path().join("corpus");
    fs::create_dir(&corpus).unwrap();
    fs::write(corpus.join("good_a.txt"), b"plain text").unwrap();
    fs::write(corpus.join("good_b.txt"), b"more plain text").unwrap();
    fs::write(corpus.join("bad.txt"), b"POISON pill").unwrap();

    let prober = CommandProber::new(
        decode.to_str().unwrap(),
        compress.to_str().unwrap(),
        dir.path().join("scratch.out"),
    )
    .unwrap();

    let candidates = corpus_sweep::collect_candidates(&corpus, &Default::default());
    assert_eq!(candidates.len(), 3);

    let err = Driver::new(prober).run(candidates).unwrap_err();

    match err {
        Error::RoundTrip { path, code } => {
            assert!(path.ends_with("bad.txt"));
            assert_eq!(code, 2);
            println!("✅ Sweep aborted on the poisoned file: {}", path);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn clean_corpus_sweeps_to_completion() {
    let dir = tempdir().unwrap();
    let compress = script(dir.path(), "compress.sh", r#"cp "$1" "$2""#);

    let corpus = dir.path().join("corpus");
    fs::create_dir(&corpus).unwrap();
    for i in 0..5 {
        fs::write(corpus.join(format!("file{}.txt", i)), b"payload").unwrap();
    }

    let prober = CommandProber::new(
        "true",
        compress.to_str().unwrap(),
        dir.path().join("scratch.out"),
    )
    .unwrap();

    let candidates = corpus_sweep::collect_candidates(&corpus, &Default::default());
    let report = Driver::new(prober).run(candidates).unwrap();

    assert_eq!(report.candidates, 5);
    assert_eq!(report.passed, 5);

    println!("✅ Clean corpus swept to completion");
}
