//! Read-only permission projection for clan views.
//!
//! The resolver is pure: given a clan, its roster, and an optional viewer it
//! computes the same view every time, with no store access and no mutation.

mod models;
mod resolver;

pub use models::{ClanView, MemberView};
pub use resolver::{can_change_member_rank, can_remove_member, evaluate_clan_view};
