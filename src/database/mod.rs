//! Central hub for all database access. Submodules are specialized by domain
//! and reached via their full path, e.g. `database::economy::add_wallet`.
//!
//! Conventions: reads take a `&PgPool`; anything that mutates balances runs
//! inside a caller-owned `Transaction` so multi-step settlements (bet, payout,
//! refund) commit or roll back as a unit. Conditional updates that match no
//! row (insufficient funds, missing loan) surface as `sqlx::Error::RowNotFound`.

pub mod economy;
pub mod items;
pub mod jobs;
pub mod loans;
pub mod models;
