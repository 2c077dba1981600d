//! Plain-text rendering of the ledger.

use homegame_ledger_base::essential::LedgerMode;
use homegame_ledger_base::ledger::Ledger;
use homegame_ledger_base::payout::{fmt_dollars, payout_instructions};

const HEADERS: [&str; 6] = ["#", "Name", "Venmo / Wallet", "Buy Ins", "Stack Size", "$ Balance"];

// Text columns are left-aligned, numeric ones right-aligned.
const LEFT_ALIGNED: [bool; 6] = [false, true, true, false, false, false];

/// The whole screen for the current mode: settings header, then either
/// the roster table or the payout instructions, then reconciliation
/// warnings.
pub fn render(ledger: &Ledger) -> String {
    let settings = ledger.settings();
    let mut out = format!(
        "Buy-in: {} chips for ${}\n\n",
        settings.chips_per_buy_in,
        fmt_dollars((settings.dollars_per_buy_in * 100) as i64),
    );

    match ledger.mode() {
        LedgerMode::Editing => out.push_str(&render_table(ledger)),
        LedgerMode::Settling => out.push_str(&render_payout(ledger)),
    }

    for error in ledger.reconciliation_errors() {
        out.push_str(&format!("warning: {error}\n"));
    }
    out
}

fn render_table(ledger: &Ledger) -> String {
    if ledger.player_count() == 0 {
        return "No players yet. Type `add` to seat the first one.\n".to_string();
    }

    let rows: Vec<[String; 6]> = ledger
        .players()
        .enumerate()
        .map(|(i, player)| {
            [
                (i + 1).to_string(),
                player.name.clone(),
                player.payment_method.clone(),
                player.buy_ins.to_string(),
                player.chips.to_string(),
                fmt_dollars(ledger.balance_cents(player)),
            ]
        })
        .collect();

    let mut widths: [usize; 6] = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    out.push_str(&format_row(&HEADERS.map(str::to_string), &widths));
    out.push_str(&separator(&widths));
    for row in &rows {
        out.push_str(&format_row(row, &widths));
    }
    out
}

fn format_row(cells: &[String; 6], widths: &[usize; 6]) -> String {
    let formatted: Vec<String> = cells
        .iter()
        .zip(widths.iter().copied())
        .zip(LEFT_ALIGNED.iter().copied())
        .map(|((cell, width), left)| {
            if left {
                format!("{cell:<width$}")
            } else {
                format!("{cell:>width$}")
            }
        })
        .collect();
    format!("{}\n", formatted.join(" | "))
}

fn separator(widths: &[usize; 6]) -> String {
    let dashes: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    format!("{}\n", dashes.join("-+-"))
}

fn render_payout(ledger: &Ledger) -> String {
    let lines = payout_instructions(ledger);
    let mut out = String::from("Payout instructions:\n");
    if lines.is_empty() {
        out.push_str("  nothing to settle\n");
    }
    for line in lines {
        out.push_str(&format!("  {line}\n"));
    }
    out
}
