//! Probe oracles.
//!
//! Probers normalize the library under test into a common two-probe
//! interface for the sweep driver: a decode probe ("can the library read
//! this file at all") and a compress probe ("does a compress round trip
//! succeed"). The stock implementation shells out to an external test
//! command; tests swap in scripted in-process probers.

mod command;

pub use command::CommandProber;

use std::path::Path;

use crate::error::Error;

/// Result of one probe invocation, as judged by the collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Collaborator exited 0.
    Passed,
    /// Collaborator exited nonzero. A signal death maps to a negative code.
    Failed { code: i32 },
}

/// The test oracle for one external library.
///
/// `Err` from either method means the driver could not run the probe at all
/// (e.g. the command does not exist); that is the driver's failure, not the
/// library's verdict.
pub trait Prober {
    /// Can the library under test open and read `path`?
    fn probe_decode(&self, path: &Path) -> Result<ProbeOutcome, Error>;

    /// Does `path` survive a compress-then-verify round trip?
    fn probe_compress(&self, path: &Path) -> Result<ProbeOutcome, Error>;
}
