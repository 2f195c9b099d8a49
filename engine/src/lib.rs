//! `ClanHall` Engine
//!
//! Authorization and lifecycle rules for clans, memberships, and accounts.
//! The engine owns the rule set only: HTTP routing, session storage,
//! persistence, and input format validation live in the embedding
//! application and talk to this crate through raw session strings, the
//! in-memory [`Store`], and typed results.

pub mod account;
pub mod bootstrap;
pub mod clan;
pub mod config;
pub mod credentials;
pub mod permissions;
pub mod roles;
pub mod store;
pub mod validation;


pub use config::EngineConfig;
pub use roles::{ClanRank, GlobalRole};
pub use store::Store;
pub use validation::ValidationError;
