//! Verification orchestrator
//!
//! Drives one attempt per probe URL through the proxy, first success wins,
//! and folds every network-phase failure into a [`VerificationResult`].

mod attempt;
pub mod checker;
pub mod ip;
pub mod outcome;
pub mod timeline;

pub use attempt::ProbeState;
pub use checker::ProxyChecker;
pub use ip::extract_external_ip;
pub use outcome::VerificationResult;
pub use timeline::{Timeline, Timings};
