//! All chat commands. `all()` is the single registration point; the registry
//! indexes what it returns by name and alias.

pub mod cooldowns;
pub mod economy;
pub mod games;
pub mod help;
pub mod jobs;
pub mod loans;
pub mod ping;
pub mod prefix;
pub mod shop;

use crate::dispatch::ChatCommand;
use std::sync::Arc;

pub fn all() -> Vec<Arc<dyn ChatCommand>> {
    vec![
        Arc::new(ping::Ping),
        Arc::new(help::Help),
        Arc::new(prefix::Prefix),
        Arc::new(cooldowns::Cooldowns),
        Arc::new(economy::balance::Balance),
        Arc::new(economy::deposit::Deposit),
        Arc::new(economy::withdraw::Withdraw),
        Arc::new(economy::give::Give),
        Arc::new(economy::daily::Daily),
        Arc::new(economy::leaderboard::Leaderboard),
        Arc::new(economy::profile::Profile),
        Arc::new(games::dice::Dice),
        Arc::new(games::roulette::Roulette),
        Arc::new(games::rob::Rob),
        Arc::new(games::dig::Dig),
        Arc::new(games::wager::Wager),
        Arc::new(jobs::Job),
        Arc::new(jobs::Work),
        Arc::new(loans::Loan),
        Arc::new(loans::Repay),
        Arc::new(shop::Shop),
        Arc::new(shop::Buy),
        Arc::new(shop::Sell),
        Arc::new(shop::Inventory),
    ]
}
