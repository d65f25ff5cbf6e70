//! The sweep loop.
//!
//! Takes an owned candidate list, shuffles it, and runs every candidate
//! through the prober's two-stage pipeline: local open, decode probe,
//! compress probe. A decode rejection filters the candidate out; a compress
//! failure aborts the whole sweep. Progress is surfaced through an optional
//! per-candidate callback so the binary can stream results while the
//! library stays silent.

use std::fs::File;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::Error;
use crate::probe::{ProbeOutcome, Prober};

/// How one candidate fared. The fatal fourth case (compress probe failed)
/// is not a verdict; it is returned as [`Error::RoundTrip`] from
/// [`Driver::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The driver itself could not open the file for reading. Expected when
    /// files vanish between traversal and probing; never fatal.
    Unreadable,
    /// The decode probe reported the file is not valid input for the
    /// library. Filtered out, not a failure.
    Rejected { code: i32 },
    /// The compress round trip succeeded.
    Passed,
}

/// Counters for a completed sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub candidates: usize,
    pub passed: usize,
    pub rejected: usize,
    pub unreadable: usize,
}

type OutcomeCallback = Box<dyn Fn(&Path, Verdict)>;

pub struct Driver<P> {
    prober: P,
    seed: Option<u64>,
    on_outcome: Option<OutcomeCallback>,
}

impl<P: Prober> Driver<P> {
    pub fn new(prober: P) -> Self {
        Self {
            prober,
            seed: None,
            on_outcome: None,
        }
    }

    /// Fix the shuffle seed for a reproducible iteration order. Without a
    /// seed the order comes from OS entropy, which is all exploratory
    /// sweeping needs.
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Set a callback invoked once per candidate with its verdict.
    pub fn on_outcome<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Path, Verdict) + 'static,
    {
        self.on_outcome = Some(Box::new(callback));
        self
    }

    /// Shuffle the candidates and sweep them front to back.
    ///
    /// Returns the aggregate report on a clean pass. Returns
    /// [`Error::RoundTrip`] the moment a compress probe fails; candidates
    /// after the failing one are never probed. A probe that cannot be
    /// launched at all surfaces as [`Error::Spawn`].
    pub fn run(&self, mut candidates: Vec<PathBuf>) -> Result<SweepReport, Error> {
        shuffle_candidates(&mut candidates, self.seed);

        let mut report = SweepReport {
            candidates: candidates.len(),
            ..Default::default()
        };

        for path in &candidates {
            // Files may have vanished or changed since traversal; that is
            // the driver's environment problem, not a library defect.
            if File::open(path).is_err() {
                report.unreadable += 1;
                self.emit(path, Verdict::Unreadable);
                continue;
            }

            match self.prober.probe_decode(path)? {
                ProbeOutcome::Failed { code } => {
                    report.rejected += 1;
                    self.emit(path, Verdict::Rejected { code });
                    continue;
                }
                ProbeOutcome::Passed => {}
            }

            match self.prober.probe_compress(path)? {
                ProbeOutcome::Passed => {
                    report.passed += 1;
                    self.emit(path, Verdict::Passed);
                }
                ProbeOutcome::Failed { code } => {
                    return Err(Error::RoundTrip {
                        path: path.display().to_string(),
                        code,
                    });
                }
            }
        }

        Ok(report)
    }

    fn emit(&self, path: &Path, verdict: Verdict) {
        if let Some(callback) = &self.on_outcome {
            callback(path, verdict);
        }
    }
}

/// Uniform shuffle of the candidate list: seeded for a reproducible order,
/// OS entropy otherwise.
pub fn shuffle_candidates(candidates: &mut [PathBuf], seed: Option<u64>) {
    match seed {
        Some(seed) => candidates.shuffle(&mut StdRng::seed_from_u64(seed)),
        None => candidates.shuffle(&mut rand::thread_rng()),
    }
}
