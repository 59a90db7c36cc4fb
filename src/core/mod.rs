//! Hook orchestration engine.
//!
//! ```text
//! sources ──load──▶ CheckRegistry ──into_definitions──▶ [CheckDefinition]
//!                                                          │
//!                        HookContext ──▶ HookRunner ◀──────┘
//!                                           │
//!                                           ├──▶ Reporter (events)
//!                                           ▼
//!                                       RunResult ──▶ Verdict
//! ```
//!
//! - `check`: the check contract and resolved definitions
//! - `registry`: override-aware registry and multi-source loader
//! - `context`: execution context contract and cleanup guard
//! - `runner`: sequential execution state machine and aggregation
//! - `status`: statuses, outcomes and verdicts

pub mod check;
pub mod context;
pub mod error;
pub mod interrupt;
pub mod process;
pub mod registry;
pub mod reporter;
pub mod runner;
pub mod skip;
pub mod status;

#[cfg(test)]
pub(crate) mod testing;

pub use check::{Check, CheckDefinition, CheckInput, CheckOutcome, CheckSettings, FileFilter, Origin};
pub use context::{EnvironmentGuard, HookContext};
pub use error::{Interrupted, LoadError};
pub use interrupt::Interrupt;
pub use registry::{CheckRegistry, CheckSource, LoadReport, LoadWarning, load};
pub use reporter::Reporter;
pub use runner::{CheckResult, HookRunner, RunResult};
pub use skip::SkipDirective;
pub use status::{Outcome, Status, Verdict};
