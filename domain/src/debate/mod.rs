//! Debate orchestration domain
//!
//! This module contains the pure parts of running a debate: the
//! `DebateSpec`, the phase sequence, the turn schedule and premise interpretation.

pub mod entities;
pub mod outcome;
pub mod schedule;
