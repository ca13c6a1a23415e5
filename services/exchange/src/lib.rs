//! # Exchange Service
//!
//! Front-end layer over the pool core: converts user-facing decimal amounts,
//! gates every operation on the wallet session, and replays scripted
//! sessions against an in-memory ledger.
//!
//! ## Modules
//!
//! - [`amounts`]: decimal string boundary
//! - [`session`]: wallet and network checks
//! - [`quotes`]: one-shot quotes for the `quote` command
//! - [`scenario`]: scripted sessions for the `run` command

pub mod amounts;
pub mod error;
pub mod quotes;
pub mod scenario;
pub mod session;

pub use amounts::AmountFormat;
pub use error::{Result, ServiceError};
pub use quotes::{quote, QuoteKind, QuoteView};
pub use scenario::{Scenario, ScenarioReport, ScenarioRunner, StepOutcome};
pub use session::{ChainSession, SessionError, SessionGate};
