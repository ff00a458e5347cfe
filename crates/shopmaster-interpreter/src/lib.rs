//! # shopmaster-interpreter: AI Command Interpretation
//!
//! The only asynchronous, network-facing surface of ShopMaster. A host
//! layer sends the operator's free-text command here together with
//! lightweight snapshots of the inventory and customer registry; the
//! service answers with an [`shopmaster_core::AiDraft`] that the ledger's
//! draft adapter stages for human confirmation.
//!
//! The ledger core never awaits this crate. A failed or unparsable call is
//! reported to the operator as "no draft available" and nothing else
//! happens.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod client;
pub mod error;
pub mod snapshot;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use client::{GeminiInterpreter, Interpreter, DEFAULT_MODEL};
pub use error::{InterpreterError, InterpreterResult};
pub use snapshot::{CustomerRef, ProductRef};
