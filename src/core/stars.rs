//! # Stars Ledger Transforms
//!
//! The ledger is global: balance, paged transaction history per type, and the
//! paged subscription list. History pages are appended in arrival order with
//! no deduplication; the cursor is replaced by whatever the server sent, so a
//! `None` cursor means "no more pages".
//!
//! The transaction modal is the one tab-scoped bit living here.

use log::debug;

use crate::api::types::{
    ApiReceiptStars, ApiStarsSubscription, ApiStarsTransaction, StarsTransactionType,
};
use crate::core::patch::Patch;
use crate::core::state::{GlobalState, StarsTransactionModal, SubscriptionSlice, TabId};
use crate::core::tabs::{TabStatePatch, update_tab_state};

/// Sets the balance, creating the ledger if the state has none yet.
pub fn update_stars_balance(mut state: GlobalState, balance: i64) -> GlobalState {
    state.stars.get_or_insert_with(Default::default).balance = Some(balance);
    state
}

/// Appends a page of history for `kind`.
///
/// Returns `state` untouched when the ledger has no history container yet.
pub fn append_stars_transactions(
    mut state: GlobalState,
    kind: StarsTransactionType,
    transactions: Vec<ApiStarsTransaction>,
    next_offset: Option<String>,
) -> GlobalState {
    let Some(history) = state.stars.as_mut().and_then(|stars| stars.history.as_mut()) else {
        debug!("Stars history not loaded, dropping {} {:?} transactions", transactions.len(), kind);
        return state;
    };

    let slice = history.entry(kind).or_default();
    slice.transactions.extend(transactions);
    slice.next_offset = next_offset;
    state
}

/// Appends a page of subscriptions. Returns `state` untouched without a ledger.
pub fn append_stars_subscriptions(
    mut state: GlobalState,
    subscriptions: Vec<ApiStarsSubscription>,
    next_offset: Option<String>,
) -> GlobalState {
    let Some(stars) = state.stars.as_mut() else {
        debug!("Stars ledger not loaded, dropping {} subscriptions", subscriptions.len());
        return state;
    };

    let slice = stars.subscriptions.get_or_insert_with(SubscriptionSlice::default);
    slice.list.extend(subscriptions);
    slice.next_offset = next_offset;
    state
}

pub fn open_stars_transaction_modal(
    state: GlobalState,
    transaction: ApiStarsTransaction,
    tab_id: TabId,
) -> GlobalState {
    update_tab_state(
        state,
        TabStatePatch {
            stars_transaction_modal: Patch::Set(StarsTransactionModal { transaction }),
            ..Default::default()
        },
        tab_id,
    )
}

/// Builds the transaction a stars receipt describes and opens it in the modal.
pub fn open_stars_transaction_from_receipt(
    state: GlobalState,
    receipt: &ApiReceiptStars,
    tab_id: TabId,
) -> GlobalState {
    open_stars_transaction_modal(state, transaction_from_receipt(receipt), tab_id)
}

fn transaction_from_receipt(receipt: &ApiReceiptStars) -> ApiStarsTransaction {
    ApiStarsTransaction {
        id: Some(receipt.transaction_id.clone()),
        peer: receipt.peer.clone(),
        stars: receipt.total_amount,
        date: receipt.date,
        title: receipt.title.clone(),
        description: receipt.text.clone(),
        photo: receipt.photo.clone(),
        extended_media: receipt.media.clone(),
        message_id: receipt.message_id,
        ..Default::default()
    }
}
