//! Message-to-invocation parsing: prefix stripping and quote-aware argument
//! splitting (`give "lucky charm" 5` is three arguments, not four).

/// Splits a command body into whitespace-separated arguments, honoring double
/// quotes. Unterminated quotes swallow the rest of the line as one argument.
pub fn split_args(body: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for ch in body.chars() {
        match ch {
            '"' => {
                if in_quotes {
                    args.push(std::mem::take(&mut current));
                }
                in_quotes = !in_quotes;
            }
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    args.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        args.push(current);
    }
    args
}

/// Extracts `(command, args)` from raw message content, or `None` if the
/// message does not start with the prefix or names no command. Command names
/// are matched case-insensitively.
pub fn parse_invocation(content: &str, prefix: &str) -> Option<(String, Vec<String>)> {
    let body = content.strip_prefix(prefix)?;
    let mut args = split_args(body);
    if args.is_empty() {
        return None;
    }
    let command = args.remove(0).to_lowercase();
    Some((command, args))
}

/// Pulls a user id out of a raw argument: either a `<@123>` / `<@!123>`
/// mention or a bare numeric id.
pub fn parse_user_arg(arg: &str) -> Option<u64> {
    let trimmed = arg
        .strip_prefix("<@!")
        .or_else(|| arg.strip_prefix("<@"))
        .map(|s| s.strip_suffix('>').unwrap_or(s))
        .unwrap_or(arg);
    trimmed.parse().ok()
}

/// Parses a bet/amount argument: a positive integer, with `k`/`m` suffixes
/// for thousands/millions.
pub fn parse_amount(arg: &str) -> Option<i64> {
    let lower = arg.to_lowercase();
    let (digits, multiplier) = if let Some(stripped) = lower.strip_suffix('k') {
        (stripped, 1_000)
    } else if let Some(stripped) = lower.strip_suffix('m') {
        (stripped, 1_000_000)
    } else {
        (lower.as_str(), 1)
    };
    let value: i64 = digits.parse().ok()?;
    value.checked_mul(multiplier).filter(|v| *v > 0)
}

/// Parses an item quantity for shop trades: a positive integer capped at 100
/// per transaction, which also keeps price arithmetic inside `i64`.
pub fn parse_quantity(arg: &str) -> Option<i64> {
    parse_amount(arg).filter(|q| *q <= 100)
}
