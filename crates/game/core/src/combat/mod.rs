//! Combat resolution.
//!
//! Outcome types plus [`resolve_contact`], the pure function deciding
//! whether a contact is blocked, lands, or counter-hits, and how much stun
//! it deals. Applying the outcome to combatants is left to the engine.

mod hit;
mod resolve;

pub use hit::{Contact, HitData, HitResult, HitboxRegion};
pub use resolve::{ContactOutcome, resolve_contact};
