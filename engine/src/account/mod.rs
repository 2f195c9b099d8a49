//! Account lifecycle and platform-wide moderation.

mod lifecycle;
mod types;

pub use lifecycle::{
    account_detail, change_role, list_accounts, login, register, toggle_ban, AccountError,
    RoleChangeError, ToggleBanError,
};
pub use types::{AccountSummary, AccountView, Credentials, RegisterRequest};
