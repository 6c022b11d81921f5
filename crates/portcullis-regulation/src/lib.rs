//! Portcullis Regulation - brute-force protection for first-factor logins
//!
//! Every completed username/password attempt leaves an
//! [`AuthenticationTrace`](portcullis_core::AuthenticationTrace) in a
//! [`TraceStore`]. Before the next attempt the [`Regulator`] inspects the
//! user's most recent traces and refuses the attempt while the user is
//! locked out.
//!
//! # Lockout rule
//!
//! With parameters `max_retries`, `find_time` and `ban_time`, a user is
//! locked out when the `max_retries` most recent traces
//!
//! 1. are all failures,
//! 2. span less than `find_time` seconds from oldest to newest, and
//! 3. the newest is less than `ban_time` seconds old.
//!
//! `max_retries = 0` disables regulation altogether.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use portcullis_core::RegulationParameters;
//! use portcullis_regulation::{MemoryTraceStore, Regulator};
//!
//! # tokio_test::block_on(async {
//! let regulator = Regulator::new(
//!     RegulationParameters::new(3, 120, 300),
//!     Arc::new(MemoryTraceStore::new()),
//! );
//!
//! for _ in 0..3 {
//!     regulator.mark("john", false).await?;
//! }
//! assert!(regulator.regulate("john").await.unwrap_err().is_regulated());
//! assert!(regulator.regulate("harry").await.is_ok());
//! # Ok::<(), portcullis_regulation::StoreError>(())
//! # }).unwrap();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod clock;
pub mod error;
pub mod regulator;
pub mod store;

// Re-exports for convenience
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{RegulationError, RegulationResult, StoreError, StoreResult};
pub use regulator::Regulator;
pub use store::{MemoryTraceStore, TraceStore, DEFAULT_HISTORY_PER_USER};
