//! Pure game and economy math: payout tables, rob cuts, the loan and level
//! curves.

use chrono::{Duration as ChronoDuration, Utc};
use croupier_bot::commands::economy::daily::next_claim_wait;
use croupier_bot::commands::games::dice::dice_payout;
use croupier_bot::commands::games::dig::{dig_outcome, DigFind};
use croupier_bot::commands::games::rob::{rob_cut, rob_fine};
use croupier_bot::commands::games::roulette::{
    parse_roulette_bet, payout_multiplier, pocket_color, PocketColor, RouletteBet,
};
use croupier_bot::database::items::Item;
use croupier_bot::database::jobs::{apply_xp, streak_bonus, xp_to_next};
use croupier_bot::database::loans::{loan_cap, with_interest};
use croupier_bot::database::models::Profile;
use std::time::Duration;

#[test]
fn dice_pays_six_to_one_on_a_hit() {
    assert_eq!(dice_payout(3, 3, 100), 600);
    assert_eq!(dice_payout(3, 4, 100), 0);
    assert_eq!(dice_payout(6, 6, 1), 6);
}

#[test]
fn roulette_wheel_colors() {
    assert_eq!(pocket_color(0), PocketColor::Green);
    assert_eq!(pocket_color(1), PocketColor::Red);
    assert_eq!(pocket_color(2), PocketColor::Black);
    assert_eq!(pocket_color(36), PocketColor::Red);
    // 18 red + 18 black + green zero.
    let reds = (0..=36).filter(|&n| pocket_color(n) == PocketColor::Red).count();
    let blacks = (0..=36)
        .filter(|&n| pocket_color(n) == PocketColor::Black)
        .count();
    assert_eq!((reds, blacks), (18, 18));
}

#[test]
fn roulette_payout_table() {
    assert_eq!(payout_multiplier(RouletteBet::Red, 1), 2);
    assert_eq!(payout_multiplier(RouletteBet::Red, 2), 0);
    assert_eq!(payout_multiplier(RouletteBet::Black, 2), 2);
    assert_eq!(payout_multiplier(RouletteBet::Green, 0), 36);
    assert_eq!(payout_multiplier(RouletteBet::Green, 5), 0);
    assert_eq!(payout_multiplier(RouletteBet::Straight(17), 17), 36);
    assert_eq!(payout_multiplier(RouletteBet::Straight(17), 18), 0);
    // Color bets never pay on zero.
    assert_eq!(payout_multiplier(RouletteBet::Red, 0), 0);
    assert_eq!(payout_multiplier(RouletteBet::Black, 0), 0);
}

#[test]
fn roulette_bet_parsing() {
    assert_eq!(parse_roulette_bet("red"), Some(RouletteBet::Red));
    assert_eq!(parse_roulette_bet("BLACK"), Some(RouletteBet::Black));
    assert_eq!(parse_roulette_bet("green"), Some(RouletteBet::Green));
    assert_eq!(parse_roulette_bet("17"), Some(RouletteBet::Straight(17)));
    assert_eq!(parse_roulette_bet("37"), None);
    assert_eq!(parse_roulette_bet("crimson"), None);
}

#[test]
fn rob_cut_stays_within_the_rolled_share() {
    for pct in 10..=25 {
        let cut = rob_cut(1_000, pct);
        assert!(cut >= 100 && cut <= 250);
    }
    // Tiny wallets still yield at least one coin on success.
    assert_eq!(rob_cut(3, 10), 1);
}

#[test]
fn rob_fine_never_exceeds_the_wallet() {
    assert_eq!(rob_fine(1_000), 150);
    assert_eq!(rob_fine(0), 0);
    assert!(rob_fine(5) <= 5);
}

#[test]
fn dig_outcome_bands() {
    assert_eq!(dig_outcome(0, 80, 0), DigFind::Coins(80));
    assert_eq!(dig_outcome(39, 20, 0), DigFind::Coins(20));
    assert_eq!(dig_outcome(40, 0, 0), DigFind::Item(Item::RustyNail));
    assert_eq!(dig_outcome(74, 0, 99), DigFind::Item(Item::Diamond));
    assert_eq!(dig_outcome(75, 0, 0), DigFind::Nothing);
    assert_eq!(dig_outcome(99, 0, 0), DigFind::Nothing);
}

#[test]
fn loan_caps_and_interest() {
    assert_eq!(loan_cap(0), 500);
    assert_eq!(loan_cap(4), 1_500);
    assert_eq!(with_interest(1_000), 1_100);
    assert_eq!(with_interest(10), 11);
}

#[test]
fn xp_curve_levels_up_across_thresholds() {
    assert_eq!(xp_to_next(0), 100);
    assert_eq!(xp_to_next(1), 100);
    assert_eq!(xp_to_next(5), 500);

    let (level, xp, leveled) = apply_xp(0, 0, 50);
    assert_eq!((level, xp, leveled), (0, 50, false));

    let (level, xp, leveled) = apply_xp(0, 90, 20);
    assert_eq!((level, xp, leveled), (1, 10, true));

    // A big grant can cross several levels at once.
    let (level, _, leveled) = apply_xp(0, 0, 350);
    assert!(level >= 2);
    assert!(leveled);
}

#[test]
fn streak_bonus_caps_at_fifty_percent() {
    assert_eq!(streak_bonus(100, 0), 100);
    assert_eq!(streak_bonus(100, 4), 120);
    assert_eq!(streak_bonus(100, 10), 150);
    assert_eq!(streak_bonus(100, 99), 150);
}

#[test]
fn daily_window_blocks_until_twenty_hours_pass() {
    let now = Utc::now();
    // Never claimed: nothing to wait for.
    assert_eq!(next_claim_wait(None, now), None);

    let wait = next_claim_wait(Some(now - ChronoDuration::hours(1)), now)
        .expect("one hour in is still inside the window");
    assert!(wait <= Duration::from_secs(19 * 3600));
    assert!(wait > Duration::from_secs(18 * 3600));

    assert_eq!(next_claim_wait(Some(now - ChronoDuration::hours(20)), now), None);
    assert_eq!(next_claim_wait(Some(now - ChronoDuration::hours(48)), now), None);
}

#[test]
fn profile_total_combines_wallet_and_bank() {
    let profile = Profile {
        user_id: 1,
        wallet: 250,
        bank: 750,
        xp: 0,
        level: 0,
        job: None,
        work_streak: 0,
        last_work: None,
        last_daily: None,
    };
    assert_eq!(profile.total(), 1_000);
}
