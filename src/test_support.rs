//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::api::types::{
    ApiInvoice, ApiPaymentForm, ApiReceiptRegular, ApiStarsSubscription, ApiStarsTransaction,
    LabeledPrice, NativeParams, ShippingOption, StarsSubscriptionPricing, StarsTransactionPeer,
};
use crate::core::state::{GlobalState, Invoice, StarsHistory, StarsLedger, TabId};

/// The tab most tests operate on.
pub const TAB: TabId = TabId(1);

pub fn sample_api_invoice() -> ApiInvoice {
    ApiInvoice {
        title: "Coffee".into(),
        text: "Large latte".into(),
        amount: 450,
        currency: "EUR".into(),
        is_test: Some(true),
        max_tip_amount: Some(200),
        suggested_tip_amounts: Some(vec![50, 100]),
        ..Default::default()
    }
}

pub fn sample_payment_form() -> ApiPaymentForm {
    ApiPaymentForm {
        form_id: "form-1".into(),
        bot_id: "bot-1".into(),
        provider_id: Some("prov-1".into()),
        url: Some("https://pay.example/form".into()),
        native_provider: Some("stripe".into()),
        native_params: Some(NativeParams {
            publishable_key: Some("pk_test".into()),
            ..Default::default()
        }),
        can_save_credentials: Some(true),
        invoice: sample_api_invoice(),
        ..Default::default()
    }
}

pub fn sample_receipt() -> ApiReceiptRegular {
    ApiReceiptRegular {
        title: Some("Coffee".into()),
        currency: "EUR".into(),
        prices: vec![LabeledPrice {
            label: "Latte".into(),
            amount: 450,
        }],
        total_amount: 450,
        credentials_title: Some("**** 4242".into()),
        date: Some(1_700_000_000),
        ..Default::default()
    }
}

pub fn sample_shipping_option() -> ShippingOption {
    ShippingOption {
        id: "express".into(),
        title: "Express".into(),
        amount: 500,
        prices: vec![LabeledPrice {
            label: "Courier".into(),
            amount: 500,
        }],
    }
}

pub fn sample_transaction(id: &str) -> ApiStarsTransaction {
    ApiStarsTransaction {
        id: Some(id.to_string()),
        peer: StarsTransactionPeer::Fragment,
        stars: 10,
        date: 1_700_000_000,
        ..Default::default()
    }
}

pub fn sample_subscription(id: &str) -> ApiStarsSubscription {
    ApiStarsSubscription {
        id: id.to_string(),
        peer_id: "channel-1".into(),
        until: 1_800_000_000,
        pricing: StarsSubscriptionPricing {
            period: 2_592_000,
            amount: 99,
        },
        is_cancelled: None,
        can_refulfill: None,
        has_missing_balance: None,
        title: None,
        photo: None,
    }
}

/// One tab mid-checkout: invoice stored, invoice and stars modals open.
pub fn open_invoice_state() -> GlobalState {
    let mut state = GlobalState::with_tabs([TAB]);
    if let Some(tab) = state.by_tab_id.get_mut(&TAB) {
        tab.payment.invoice = Some(Invoice::from(&sample_api_invoice()));
        tab.payment.is_payment_modal_open = Some(true);
        tab.payment.is_extended_media = Some(true);
        tab.is_star_payment_modal_open = Some(true);
    }
    state
}

/// One tab plus a stars ledger with an empty history container.
pub fn ledger_state(balance: i64) -> GlobalState {
    GlobalState {
        stars: Some(StarsLedger {
            balance: Some(balance),
            history: Some(StarsHistory::new()),
            subscriptions: None,
        }),
        ..GlobalState::with_tabs([TAB])
    }
}
