//! # corpus_sweep
//!
//! Randomized on-disk corpus regression driver for compression test
//! harnesses.
//!
//! The sweep walks a directory tree, collects every regular file under a
//! size threshold that does not look like a previously generated artifact,
//! shuffles the list, and runs each file through an external test command
//! twice: a decode probe (can the library under test read this file) and a
//! compress probe (does a compress-then-verify round trip succeed). Files
//! the library refuses to decode are filtered out silently; the first
//! failed round trip aborts the sweep and its exit status becomes the
//! driver's own.
//!
//! ## Example
//!
//! ```rust,no_run
//! use corpus_sweep::{collect_candidates, CandidateFilter, CommandProber, Driver};
//!
//! # fn main() -> Result<(), corpus_sweep::Error> {
//! let filter = CandidateFilter::default();
//! let candidates = collect_candidates("/corpus".as_ref(), &filter);
//!
//! let prober = CommandProber::new(
//!     "luajit tests/Test.lua -o",
//!     "luajit tests/Test.lua -c",
//!     std::env::temp_dir().join("corpus_sweep.out"),
//! )?;
//!
//! let report = Driver::new(prober)
//!     .on_outcome(|path, verdict| println!("{}: {:?}", path.display(), verdict))
//!     .run(candidates)?;
//!
//! println!("{} passed, {} rejected", report.passed, report.rejected);
//! # Ok(())
//! # }
//! ```
//!
//! The external command is reachable only through the [`Prober`] trait, so
//! an in-process binding can replace the subprocess oracle without touching
//! the loop.

pub mod driver;
pub mod error;
pub mod filter;
pub mod probe;
pub mod walk;

pub use driver::{shuffle_candidates, Driver, SweepReport, Verdict};
pub use error::Error;
pub use filter::CandidateFilter;
pub use probe::{CommandProber, ProbeOutcome, Prober};
pub use walk::collect_candidates;
