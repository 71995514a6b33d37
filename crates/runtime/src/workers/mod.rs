//! Worker tasks that back the runtime orchestration.
//!
//! The shot worker owns all mutable session state; pose estimation runs on
//! short-lived tasks that report back to it.

mod shot;

pub use shot::{Command, SessionServices, SessionSettings, ShotWorker};
