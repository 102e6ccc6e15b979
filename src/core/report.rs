//! Human-readable summary of a state snapshot.

use std::fmt::Write;

use chrono::DateTime;

use crate::api::types::UnixTime;
use crate::core::state::{GlobalState, TabState};

/// Renders the stars ledger and each tab's payment flow, one fact per line.
pub fn summarize(state: &GlobalState) -> String {
    let mut out = String::new();

    match &state.stars {
        None => out.push_str("stars: not loaded\n"),
        Some(stars) => {
            match stars.balance {
                Some(balance) => {
                    let _ = writeln!(out, "stars balance: {balance}");
                }
                None => out.push_str("stars balance: unknown\n"),
            }

            match &stars.history {
                None => out.push_str("history: not loaded\n"),
                Some(history) => {
                    for (kind, slice) in history {
                        let newest = slice.transactions.iter().map(|t| t.date).max();
                        let _ = writeln!(
                            out,
                            "history {:?}: {} transactions, {}, newest {}",
                            kind,
                            slice.transactions.len(),
                            cursor_label(slice.next_offset.as_deref()),
                            newest.map_or_else(|| "-".to_string(), format_date),
                        );
                    }
                }
            }

            if let Some(subs) = &stars.subscriptions {
                let _ = writeln!(
                    out,
                    "subscriptions: {}, {}",
                    subs.list.len(),
                    cursor_label(subs.next_offset.as_deref()),
                );
            }
        }
    }

    for tab in state.by_tab_id.values() {
        out.push_str(&tab_line(tab));
        out.push('\n');
    }

    out
}

fn tab_line(tab: &TabState) -> String {
    let payment = &tab.payment;
    let step = payment.step.map_or("idle", |step| step.label());
    let mut line = format!("{}: {}", tab.id, step);

    if let Some(invoice) = &payment.invoice {
        let _ = write!(line, ", invoice {:?} {} {}", invoice.title, invoice.amount, invoice.currency);
    }
    if payment.receipt.is_some() {
        line.push_str(", receipt");
    }
    if payment.is_payment_modal_open == Some(true) {
        line.push_str(", payment modal open");
    }
    if tab.is_star_payment_modal_open == Some(true) {
        line.push_str(", stars payment modal open");
    }
    if let Some(modal) = &tab.stars_transaction_modal {
        let id = modal.transaction.id.as_deref().unwrap_or("?");
        let _ = write!(line, ", viewing transaction {id}");
    }
    line
}

fn cursor_label(next_offset: Option<&str>) -> String {
    match next_offset {
        Some(offset) => format!("next page {offset:?}"),
        None => "complete".to_string(),
    }
}

fn format_date(date: UnixTime) -> String {
    DateTime::from_timestamp(date, 0)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| date.to_string())
}
