//! Invocation parsing: prefix handling, quote-aware argument splitting and
//! the mention/amount helpers.

use croupier_bot::dispatch::parser::{
    parse_amount, parse_invocation, parse_quantity, parse_user_arg, split_args,
};

#[test]
fn splits_on_whitespace() {
    assert_eq!(split_args("dice 3 100"), vec!["dice", "3", "100"]);
    assert_eq!(split_args("  dice   3  "), vec!["dice", "3"]);
    assert!(split_args("").is_empty());
}

#[test]
fn quotes_group_words() {
    assert_eq!(
        split_args(r#"buy "lucky charm" 5"#),
        vec!["buy", "lucky charm", "5"]
    );
    assert_eq!(split_args(r#"sell "old boot""#), vec!["sell", "old boot"]);
}

#[test]
fn unterminated_quote_takes_the_rest() {
    assert_eq!(split_args(r#"buy "gold nugget"#), vec!["buy", "gold nugget"]);
}

#[test]
fn invocation_requires_the_prefix() {
    assert_eq!(
        parse_invocation("!dice 3 100", "!"),
        Some(("dice".to_string(), vec!["3".to_string(), "100".to_string()]))
    );
    assert_eq!(parse_invocation("dice 3 100", "!"), None);
    assert_eq!(parse_invocation("!", "!"), None);
    assert_eq!(parse_invocation("?dice 1 5", "?"), Some(("dice".to_string(), vec!["1".to_string(), "5".to_string()])));
}

#[test]
fn command_names_are_case_insensitive() {
    let (name, _) = parse_invocation("!DiCe 3 100", "!").unwrap();
    assert_eq!(name, "dice");
}

#[test]
fn user_args_accept_mentions_and_raw_ids() {
    assert_eq!(parse_user_arg("<@123456>"), Some(123456));
    assert_eq!(parse_user_arg("<@!123456>"), Some(123456));
    assert_eq!(parse_user_arg("123456"), Some(123456));
    assert_eq!(parse_user_arg("notauser"), None);
    assert_eq!(parse_user_arg("<@abc>"), None);
}

#[test]
fn amounts_accept_suffixes_and_reject_nonpositive() {
    assert_eq!(parse_amount("100"), Some(100));
    assert_eq!(parse_amount("2k"), Some(2_000));
    assert_eq!(parse_amount("3M"), Some(3_000_000));
    assert_eq!(parse_amount("0"), None);
    assert_eq!(parse_amount("-5"), None);
    assert_eq!(parse_amount("lots"), None);
}

#[test]
fn shop_quantities_are_capped_per_trade() {
    assert_eq!(parse_quantity("1"), Some(1));
    assert_eq!(parse_quantity("100"), Some(100));
    assert_eq!(parse_quantity("101"), None);
    assert_eq!(parse_quantity("0"), None);
    // Quantities big enough to overflow price math never reach a handler.
    assert_eq!(parse_quantity(&i64::MAX.to_string()), None);
    assert_eq!(parse_quantity("9m"), None);
}
