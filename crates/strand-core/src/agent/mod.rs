//! Agent turn driver

pub mod turn;

pub use turn::{ToolInvocation, TurnOutcome, TurnRunner};
