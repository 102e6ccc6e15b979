//! Per-tab scoping of the state tree.
//!
//! Every tab-scoped transform goes through `update_tab_state`. Callers pass
//! an explicit `TabId`; picking the "current" tab happens one layer up.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::core::patch::Patch;
use crate::core::state::{GlobalState, Payment, StarsTransactionModal, TabId, TabState};

/// Partial update of a `TabState`. Unknown keys are rejected.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TabStatePatch {
    /// Replaces the payment record wholesale when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment: Option<Payment>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub is_star_payment_modal_open: Patch<bool>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub stars_transaction_modal: Patch<StarsTransactionModal>,
}

pub fn select_tab_state(state: &GlobalState, tab_id: TabId) -> Option<&TabState> {
    state.by_tab_id.get(&tab_id)
}

/// Payment record of a tab; empty for tabs the state doesn't know.
pub fn select_payment(state: &GlobalState, tab_id: TabId) -> Payment {
    select_tab_state(state, tab_id)
        .map(|tab| tab.payment.clone())
        .unwrap_or_default()
}

/// Merges `patch` into the tab's state.
///
/// An unknown tab is created empty first so the transform stays total.
pub fn update_tab_state(mut state: GlobalState, patch: TabStatePatch, tab_id: TabId) -> GlobalState {
    let tab = state.by_tab_id.entry(tab_id).or_insert_with(|| {
        warn!("Updating unknown {}, creating empty tab state", tab_id);
        TabState::new(tab_id)
    });

    let TabStatePatch {
        payment,
        is_star_payment_modal_open,
        stars_transaction_modal,
    } = patch;

    if let Some(payment) = payment {
        tab.payment = payment;
    }
    is_star_payment_modal_open.apply_to(&mut tab.is_star_payment_modal_open);
    stars_transaction_modal.apply_to(&mut tab.stars_transaction_modal);

    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::PaymentStep;

    #[test]
    fn test_update_touches_only_target_tab() {
        let state = GlobalState::with_tabs([TabId(1), TabId(2)]);
        let other_before = state.by_tab_id[&TabId(2)].clone();

        let state = update_tab_state(
            state,
            TabStatePatch {
                is_star_payment_modal_open: Patch::Set(true),
                ..Default::default()
            },
            TabId(1),
        );

        assert_eq!(state.by_tab_id[&TabId(1)].is_star_payment_modal_open, Some(true));
        assert_eq!(state.by_tab_id[&TabId(2)], other_before);
    }

    #[test]
    fn test_update_unknown_tab_creates_it() {
        let state = update_tab_state(
            GlobalState::default(),
            TabStatePatch {
                is_star_payment_modal_open: Patch::Set(true),
                ..Default::default()
            },
            TabId(9),
        );
        let tab = select_tab_state(&state, TabId(9)).unwrap();
        assert_eq!(tab.id, TabId(9));
        assert_eq!(tab.is_star_payment_modal_open, Some(true));
    }

    #[test]
    fn test_payment_replacement_is_wholesale() {
        let mut state = GlobalState::with_tabs([TabId(1)]);
        if let Some(tab) = state.by_tab_id.get_mut(&TabId(1)) {
            tab.payment.step = Some(PaymentStep::Checkout);
            tab.payment.request_id = Some("req".into());
        }

        let state = update_tab_state(
            state,
            TabStatePatch {
                payment: Some(Payment {
                    step: Some(PaymentStep::Shipping),
                    ..Default::default()
                }),
                ..Default::default()
            },
            TabId(1),
        );

        let payment = select_payment(&state, TabId(1));
        assert_eq!(payment.step, Some(PaymentStep::Shipping));
        assert!(payment.request_id.is_none());
    }

    #[test]
    fn test_select_payment_of_unknown_tab_is_empty() {
        assert!(select_payment(&GlobalState::default(), TabId(3)).is_empty());
    }
}
