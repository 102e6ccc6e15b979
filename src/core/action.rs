//! # Actions
//!
//! Everything that can happen to payment and stars state becomes an `Action`.
//! Server sent an invoice? That's `Action::SetInvoiceInfo`.
//! User closed the checkout? That's `Action::CloseInvoice`.
//!
//! The `update()` function takes the current state and an action,
//! then returns the new state. No side effects here. I/O happens elsewhere.
//!
//! ```text
//! State + Action  →  update()  →  New State
//! ```
//!
//! Tab-scoped actions carry an optional `tabId`. When it is missing the
//! caller's `current_tab` is used, so the transforms themselves never guess.
//!
//! Serialized, an action log is a JSON array of objects tagged by `"type"`:
//!
//! ```json
//! [
//!   { "type": "setPaymentStep", "step": "checkout" },
//!   { "type": "updateStarsBalance", "balance": 120 },
//!   { "type": "clearPayment", "tabId": 2 }
//! ]
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use crate::api::types::{
    ApiInvoice, ApiPaymentForm, ApiReceiptRegular, ApiReceiptStars, ApiStarsSubscription,
    ApiStarsTransaction, PaymentStep, ShippingOption, StarsTransactionType,
};
use crate::core::payments;
use crate::core::stars;
use crate::core::state::{
    GlobalState, PaymentPatch, SmartGlocalCredentials, StripeCredentials, TabId,
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Action {
    UpdatePayment {
        update: PaymentPatch,
        #[serde(default)]
        tab_id: Option<TabId>,
    },
    UpdateShippingOptions {
        shipping_options: Vec<ShippingOption>,
        #[serde(default)]
        tab_id: Option<TabId>,
    },
    SetRequestInfoId {
        id: String,
        #[serde(default)]
        tab_id: Option<TabId>,
    },
    SetPaymentStep {
        step: PaymentStep,
        #[serde(default)]
        tab_id: Option<TabId>,
    },
    SetInvoiceInfo {
        invoice: ApiInvoice,
        #[serde(default)]
        tab_id: Option<TabId>,
    },
    SetStripeCardInfo {
        card_info: StripeCredentials,
        #[serde(default)]
        tab_id: Option<TabId>,
    },
    SetSmartGlocalCardInfo {
        card_info: SmartGlocalCredentials,
        #[serde(default)]
        tab_id: Option<TabId>,
    },
    SetPaymentForm {
        form: ApiPaymentForm,
        #[serde(default)]
        tab_id: Option<TabId>,
    },
    SetConfirmPaymentUrl {
        #[serde(default)]
        url: Option<String>,
        #[serde(default)]
        tab_id: Option<TabId>,
    },
    SetReceipt {
        #[serde(default)]
        receipt: Option<ApiReceiptRegular>,
        #[serde(default)]
        tab_id: Option<TabId>,
    },
    ClearPayment {
        #[serde(default)]
        tab_id: Option<TabId>,
    },
    CloseInvoice {
        #[serde(default)]
        tab_id: Option<TabId>,
    },
    UpdateStarsBalance {
        balance: i64,
    },
    AppendStarsTransactions {
        kind: StarsTransactionType,
        transactions: Vec<ApiStarsTransaction>,
        #[serde(default)]
        next_offset: Option<String>,
    },
    AppendStarsSubscriptions {
        subscriptions: Vec<ApiStarsSubscription>,
        #[serde(default)]
        next_offset: Option<String>,
    },
    OpenStarsTransactionModal {
        transaction: ApiStarsTransaction,
        #[serde(default)]
        tab_id: Option<TabId>,
    },
    OpenStarsTransactionFromReceipt {
        receipt: ApiReceiptStars,
        #[serde(default)]
        tab_id: Option<TabId>,
    },
}

impl Action {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Action::UpdatePayment { .. } => "updatePayment",
            Action::UpdateShippingOptions { .. } => "updateShippingOptions",
            Action::SetRequestInfoId { .. } => "setRequestInfoId",
            Action::SetPaymentStep { .. } => "setPaymentStep",
            Action::SetInvoiceInfo { .. } => "setInvoiceInfo",
            Action::SetStripeCardInfo { .. } => "setStripeCardInfo",
            Action::SetSmartGlocalCardInfo { .. } => "setSmartGlocalCardInfo",
            Action::SetPaymentForm { .. } => "setPaymentForm",
            Action::SetConfirmPaymentUrl { .. } => "setConfirmPaymentUrl",
            Action::SetReceipt { .. } => "setReceipt",
            Action::ClearPayment { .. } => "clearPayment",
            Action::CloseInvoice { .. } => "closeInvoice",
            Action::UpdateStarsBalance { .. } => "updateStarsBalance",
            Action::AppendStarsTransactions { .. } => "appendStarsTransactions",
            Action::AppendStarsSubscriptions { .. } => "appendStarsSubscriptions",
            Action::OpenStarsTransactionModal { .. } => "openStarsTransactionModal",
            Action::OpenStarsTransactionFromReceipt { .. } => "openStarsTransactionFromReceipt",
        }
    }
}

/// Applies one action. Tab-scoped actions without a `tab_id` go to `current_tab`.
pub fn update(state: GlobalState, action: Action, current_tab: TabId) -> GlobalState {
    debug!("Applying {} (current {})", action.name(), current_tab);
    let tab = |tab_id: Option<TabId>| tab_id.unwrap_or(current_tab);

    match action {
        Action::UpdatePayment { update, tab_id } => {
            payments::update_payment(state, update, tab(tab_id))
        }
        Action::UpdateShippingOptions {
            shipping_options,
            tab_id,
        } => payments::update_shipping_options(state, shipping_options, tab(tab_id)),
        Action::SetRequestInfoId { id, tab_id } => {
            payments::set_request_info_id(state, id, tab(tab_id))
        }
        Action::SetPaymentStep { step, tab_id } => {
            payments::set_payment_step(state, step, tab(tab_id))
        }
        Action::SetInvoiceInfo { invoice, tab_id } => {
            payments::set_invoice_info(state, &invoice, tab(tab_id))
        }
        Action::SetStripeCardInfo { card_info, tab_id } => {
            payments::set_stripe_card_info(state, card_info, tab(tab_id))
        }
        Action::SetSmartGlocalCardInfo { card_info, tab_id } => {
            payments::set_smart_glocal_card_info(state, card_info, tab(tab_id))
        }
        Action::SetPaymentForm { form, tab_id } => {
            payments::set_payment_form(state, &form, tab(tab_id))
        }
        Action::SetConfirmPaymentUrl { url, tab_id } => {
            payments::set_confirm_payment_url(state, url, tab(tab_id))
        }
        Action::SetReceipt { receipt, tab_id } => {
            payments::set_receipt(state, receipt, tab(tab_id))
        }
        Action::ClearPayment { tab_id } => payments::clear_payment(state, tab(tab_id)),
        Action::CloseInvoice { tab_id } => payments::close_invoice(state, tab(tab_id)),
        Action::UpdateStarsBalance { balance } => stars::update_stars_balance(state, balance),
        Action::AppendStarsTransactions {
            kind,
            transactions,
            next_offset,
        } => stars::append_stars_transactions(state, kind, transactions, next_offset),
        Action::AppendStarsSubscriptions {
            subscriptions,
            next_offset,
        } => stars::append_stars_subscriptions(state, subscriptions, next_offset),
        Action::OpenStarsTransactionModal {
            transaction,
            tab_id,
        } => stars::open_stars_transaction_modal(state, transaction, tab(tab_id)),
        Action::OpenStarsTransactionFromReceipt { receipt, tab_id } => {
            stars::open_stars_transaction_from_receipt(state, &receipt, tab(tab_id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::patch::Patch;
    use crate::core::tabs::select_tab_state;
    use crate::test_support::{TAB, ledger_state, open_invoice_state};

    fn parse(json: &str) -> Action {
        serde_json::from_str(json).expect("valid action")
    }

    #[test]
    fn test_missing_tab_id_uses_current_tab() {
        let state = GlobalState::with_tabs([TAB, TabId(2)]);
        let state = update(state, parse(r#"{"type":"setPaymentStep","step":"shipping"}"#), TabId(2));
        assert!(select_tab_state(&state, TAB).unwrap().payment.step.is_none());
        assert_eq!(
            select_tab_state(&state, TabId(2)).unwrap().payment.step,
            Some(PaymentStep::Shipping)
        );
    }

    #[test]
    fn test_explicit_tab_id_wins() {
        let state = GlobalState::with_tabs([TAB, TabId(2)]);
        let action = parse(r#"{"type":"setRequestInfoId","id":"r1","tabId":1}"#);
        let state = update(state, action, TabId(2));
        assert_eq!(
            select_tab_state(&state, TAB).unwrap().payment.request_id.as_deref(),
            Some("r1")
        );
    }

    #[test]
    fn test_update_payment_patch_from_json() {
        let action = parse(r#"{"type":"updatePayment","update":{"isPaymentModalOpen":null,"url":"https://x"}}"#);
        assert_eq!(
            action,
            Action::UpdatePayment {
                update: PaymentPatch {
                    is_payment_modal_open: Patch::Clear,
                    url: Patch::Set("https://x".into()),
                    ..Default::default()
                },
                tab_id: None,
            }
        );

        let state = update(open_invoice_state(), action, TAB);
        let payment = &select_tab_state(&state, TAB).unwrap().payment;
        assert!(payment.is_payment_modal_open.is_none());
        assert_eq!(payment.url.as_deref(), Some("https://x"));
        assert!(payment.invoice.is_some());
    }

    #[test]
    fn test_update_payment_rejects_misspelt_field() {
        let result =
            serde_json::from_str::<Action>(r#"{"type":"updatePayment","update":{"recipt":null}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_set_receipt_without_receipt_parses_as_clear() {
        let action = parse(r#"{"type":"setReceipt"}"#);
        assert_eq!(
            action,
            Action::SetReceipt {
                receipt: None,
                tab_id: None
            }
        );
    }

    #[test]
    fn test_append_transactions_action() {
        let action = parse(
            r#"{
                "type": "appendStarsTransactions",
                "kind": "gift",
                "transactions": [
                    {"id": "t1", "peer": {"type": "fragment"}, "stars": 3, "date": 1700000000}
                ],
                "nextOffset": "abc"
            }"#,
        );
        let state = update(ledger_state(0), action, TAB);
        let history = state.stars.unwrap().history.unwrap();
        let slice = &history[&StarsTransactionType::Gift];
        assert_eq!(slice.transactions.len(), 1);
        assert_eq!(slice.next_offset.as_deref(), Some("abc"));
    }

    #[test]
    fn test_actions_serialize_with_type_tag() {
        let action = Action::ClearPayment { tab_id: Some(TabId(3)) };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["type"], "clearPayment");
        assert_eq!(json["tabId"], 3);
        assert_eq!(action.name(), "clearPayment");
    }

    #[test]
    fn test_balance_action_ignores_tabs() {
        let state = update(GlobalState::default(), parse(r#"{"type":"updateStarsBalance","balance":42}"#), TAB);
        assert_eq!(state.stars.unwrap().balance, Some(42));
        assert!(state.by_tab_id.is_empty());
    }
}
