//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod batch_observer;
pub mod event_bus;
pub mod event_listener;
pub mod lineup;
pub mod llm_gateway;
