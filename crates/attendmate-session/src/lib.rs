//! Session state for AttendMate.
//!
//! This crate holds the login-session state shared across the app's screens:
//! the session credential, the login form defaults, and the consent flags.
//!
//! It provides:
//! - `SessionState`: the state holder - observable fields written through to
//!   a durable key-value store on every mutation
//! - `SessionCredential`: token-based session identity with expiry checks
//! - `KeyValueStore`: the storage port, with `JsonFileStore` (on-disk) and
//!   `MemoryStore` (in-memory) implementations
//! - `Observable`: a current-value container UI code can read and subscribe to
//!
//! State is hydrated from the store once at construction and persisted on
//! every setter call.

pub mod observe;
pub mod session;
pub mod store;

pub use observe::Observable;
pub use session::{SessionCredential, SessionState};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore, Value};
