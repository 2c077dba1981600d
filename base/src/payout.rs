//! Payout instructions for settling up.

use std::cmp::Ordering;

use crate::essential::Player;
use crate::ledger::Ledger;

/// Formats cents as a two-decimal dollar string, no currency sign:
/// `-250` becomes `"-2.50"`.
pub fn fmt_dollars(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

/// One instruction per balance group, most negative first. Every player
/// lands in exactly one line.
pub fn payout_instructions(ledger: &Ledger) -> Vec<String> {
    ledger
        .group_for_payout()
        .into_iter()
        .map(|(cents, players)| instruction(cents, &players))
        .collect()
}

fn instruction(cents: i64, players: &[&Player]) -> String {
    let names = players
        .iter()
        .map(|p| p.display_name())
        .collect::<Vec<_>>()
        .join(", ");
    match cents.cmp(&0) {
        Ordering::Less => format!("request ${} from {}", fmt_dollars(cents.saturating_abs()), names),
        Ordering::Equal => format!("{} broke even", names),
        Ordering::Greater => format!("pay ${} to {}", fmt_dollars(cents), names),
    }
}
