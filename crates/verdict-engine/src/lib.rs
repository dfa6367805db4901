//! # verdict-engine
//!
//! Report intake, moderation decisions, and strike-based enforcement.
//!
//! ## Flow
//! 1. **Intake** validates a report against the content store and persists it pending.
//! 2. **Decision** closes the report (the single linearization point), then
//!    deactivates content and records a strike when the report is upheld.
//! 3. **Ledger** appends the strike and recounts the rolling window.
//! 4. **Escalation** decides whether the count warrants a block.
//! 5. **Enforcement** blocks the account once and fires a notice off-thread.
//!
//! Effects after step 2 never roll the report back; their failures come back
//! as [`verdict_core::models::PartialFailure`] entries on the result.

pub mod api;
pub mod decision;
pub mod enforcement;
pub mod escalation;
pub mod intake;
pub mod ledger;
pub mod notify;
pub mod service;
pub mod tracing_setup;

pub use decision::DecisionEngine;
pub use enforcement::AccountEnforcer;
pub use escalation::EscalationPolicy;
pub use intake::ReportIntake;
pub use ledger::StrikeLedger;
pub use notify::NotificationDispatcher;
pub use service::{Collaborators, ModerationService};
