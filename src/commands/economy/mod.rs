//! Wallet/bank economy commands.

pub mod balance;
pub mod daily;
pub mod deposit;
pub mod give;
pub mod leaderboard;
pub mod profile;
pub mod withdraw;
