//! Pidfile management for the running server instance.
//!
//! The pidfile is the only rendezvous between a started server and later
//! `stop`/`kill`/`restart` invocations. It is not locked: concurrent
//! writers and readers race.
//!
//! # Guarantees
//! - Atomic writes via temp file + rename, so readers never see a partial id
//! - Parent directories are created on write
//! - Removal is idempotent

mod io;

pub use io::Pidfile;
