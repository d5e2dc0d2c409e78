//! Metis Core - Agent Orchestration Engine
//!
//! This crate provides the orchestration logic for the Metis backend:
//! - Agent: the named unit of work seam (`Agent` trait + echo placeholder)
//! - Controller: registry, concurrent dispatch, and bookkeeping
//! - History: bounded FIFO log of past dispatch executions
//! - Upgrades: append-only queue of human-submitted change proposals

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod agent;
pub mod controller;
pub mod error;

pub use agent::{Agent, EchoAgent};
pub use controller::{
    AgentOutcome, AgentReport, AgentStatus, Context, Controller, ControllerConfig,
    ControllerStatus, DispatchResult, ExecutionRecord, UpgradeRequest, UpgradeStatus,
};
pub use error::{Error, Result};
