//! Composition root for the posefire client.
//!
//! # Architecture
//!
//! ```text
//! posefire (binary)
//!   ├─→ config   (environment → ClientConfig / RuntimeConfig)
//!   ├─→ logging  (per-session log file)
//!   └─→ replay   (scripted pose source + video feed driving a MatchRuntime)
//! ```
//!
//! The camera and pose model are replaced by a replay script, so a whole
//! match can be exercised headless and its outbound traffic inspected.

pub mod config;
pub mod logging;
pub mod replay;

pub use config::ClientConfig;
pub use replay::{ReplayAction, ReplayOutcome, ReplayScript, ReplayStep, ReplaySummary};
