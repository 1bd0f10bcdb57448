//! SafeGate store contracts.
//!
//! The document store and the credential store are external collaborators;
//! this crate pins down the traits the core depends on, an in-memory
//! implementation of each (used by tests and local runs), and the event
//! router that delivers document create/update events to registered handlers.

pub mod credential;
pub mod document;
pub mod events;
pub mod memory;

pub use credential::{Credential, CredentialStore};
pub use document::DocumentStore;
pub use events::{DocEvent, DocEventHandler, EventRouter, PathPattern};
pub use memory::{MemoryCredentialStore, MemoryStore};
