use super::*;

use crate::payout::{fmt_dollars, payout_instructions};

#[test]
fn test_group_for_payout_combines_equal_balances() {
    let ledger = ledger_with(vec![
        sample_player("a", "Alice", 1, 240),
        sample_player("b", "Bob", 1, 240),
        sample_player("c", "Carol", 1, 120),
    ]);

    let groups = ledger.group_for_payout();
    assert_eq!(groups.len(), 2);

    let winners: Vec<&str> = groups[&1000].iter().map(|p| p.name.as_str()).collect();
    assert_eq!(winners, vec!["Alice", "Bob"]);

    let losers: Vec<&str> = groups[&-2000].iter().map(|p| p.name.as_str()).collect();
    assert_eq!(losers, vec!["Carol"]);
}

#[test]
fn test_payout_instructions_list_requests_before_payments() {
    let ledger = ledger_with(vec![
        sample_player("a", "Alice", 1, 240),
        sample_player("b", "Bob", 1, 240),
        sample_player("c", "Carol", 1, 120),
    ]);

    assert_eq!(
        payout_instructions(&ledger),
        vec![
            "request $20.00 from Carol".to_string(),
            "pay $10.00 to Alice, Bob".to_string(),
        ]
    );
}

#[test]
fn test_broke_even_players_get_their_own_line() {
    let ledger = ledger_with(vec![
        sample_player("a", "Alice", 1, 200),
        sample_player("b", "Bob", 1, 200),
    ]);

    assert_eq!(
        payout_instructions(&ledger),
        vec!["Alice, Bob broke even".to_string()]
    );
}

#[test]
fn test_equal_cents_from_different_chip_paths_share_a_group() {
    let mut ledger = ledger_with(vec![
        sample_player("a", "Alice", 2, 201),
        sample_player("b", "Bob", 1, 101),
    ]);
    ledger.settings = Settings {
        chips_per_buy_in: 100,
        dollars_per_buy_in: 30,
    };

    // Both are one chip up, 30 cents at the quantized 3.33 rate.
    let groups = ledger.group_for_payout();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[&30].len(), 2);
}

#[test]
fn test_fmt_dollars() {
    assert_eq!(fmt_dollars(0), "0.00");
    assert_eq!(fmt_dollars(5), "0.05");
    assert_eq!(fmt_dollars(1234), "12.34");
    assert_eq!(fmt_dollars(-25), "-0.25");
    assert_eq!(fmt_dollars(-120000), "-1200.00");
}

#[test]
fn test_payout_on_an_empty_roster_is_empty() {
    let ledger = Ledger::default();
    assert!(payout_instructions(&ledger).is_empty());
}
