//! Command dispatch: parsing, the command trait + registry, and the
//! cooldown / exclusive-session gate every invocation passes through.

pub mod gate;
pub mod parser;
pub mod registry;

pub use gate::{CommandGate, CooldownDecision, SessionDecision, SessionToken};
pub use registry::{ChatCommand, CommandOutcome, CommandRegistry};
