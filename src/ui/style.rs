//! Central UI style constants and helpers.

use serenity::builder::CreateEmbed;

pub const COLOR_WIN: u32 = 0x2ECC71; // Green
pub const COLOR_LOSS: u32 = 0xE74C3C; // Red
pub const COLOR_NEUTRAL: u32 = 0x3498DB; // Blue
pub const COLOR_GOLD: u32 = 0xF1C40F; // Gold
pub const COLOR_ALERT: u32 = 0xE74C3C; // Red

pub const EMOJI_COIN: &str = "💰";
pub const EMOJI_BANK: &str = "🏦";
pub const EMOJI_DICE: &str = "🎲";
pub const EMOJI_SHIELD: &str = "🛡️";

/// Convenience builder for an alert/error-styled embed.
pub fn error_embed<T: Into<String>, U: Into<String>>(title: T, description: U) -> CreateEmbed {
    CreateEmbed::new()
        .title(title)
        .description(description)
        .color(COLOR_ALERT)
}

/// Standard coin formatting used across embeds.
pub fn coins(amount: i64) -> String {
    format!("{EMOJI_COIN} {amount}")
}

/// Rough human formatting for a remaining wait.
pub fn format_wait(duration: std::time::Duration) -> String {
    let secs = duration.as_secs().max(1);
    if secs >= 3600 {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    } else if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{secs}s")
    }
}
