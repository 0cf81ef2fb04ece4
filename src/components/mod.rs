//! Camera control components.
//!
//! - `node_map`: register access seam and typed register names
//! - `family`: per-family register tables
//! - `gige`, `usb`: the two family bindings
//! - `boundary`: logging and conversion of register failures
//! - `features`: startup configuration and parameter accessors
//! - `sequencer`: exposure sequence programming

pub mod boundary;
pub mod family;
pub mod features;
pub mod gige;
pub mod node_map;
pub mod sequencer;
pub mod usb;
