//! # Payment Flow Transforms
//!
//! Tab-scoped updates to the in-flight purchase. Each function consumes the
//! state and returns the successor:
//!
//! ```text
//! GlobalState + payload + TabId  →  transform  →  GlobalState
//! ```
//!
//! Almost everything funnels through `update_payment`, a shallow merge into
//! the tab's `Payment`. `clear_payment` and `close_invoice` are the two that
//! also touch tab-level flags.

use crate::api::types::{ApiInvoice, ApiPaymentForm, ApiReceiptRegular, PaymentStep, ShippingOption};
use crate::core::patch::Patch;
use crate::core::state::{
    GlobalState, Invoice, Payment, PaymentPatch, SmartGlocalCredentials, StripeCredentials, TabId,
};
use crate::core::tabs::{TabStatePatch, select_payment, update_tab_state};

/// Shallow-merges `update` into the tab's payment record.
pub fn update_payment(state: GlobalState, update: PaymentPatch, tab_id: TabId) -> GlobalState {
    let payment = select_payment(&state, tab_id).merge(update);
    update_tab_state(
        state,
        TabStatePatch {
            payment: Some(payment),
            ..Default::default()
        },
        tab_id,
    )
}

pub fn update_shipping_options(
    state: GlobalState,
    shipping_options: Vec<ShippingOption>,
    tab_id: TabId,
) -> GlobalState {
    update_payment(
        state,
        PaymentPatch {
            shipping_options: Patch::Set(shipping_options),
            ..Default::default()
        },
        tab_id,
    )
}

pub fn set_request_info_id(state: GlobalState, id: String, tab_id: TabId) -> GlobalState {
    update_payment(
        state,
        PaymentPatch {
            request_id: Patch::Set(id),
            ..Default::default()
        },
        tab_id,
    )
}

pub fn set_payment_step(state: GlobalState, step: PaymentStep, tab_id: TabId) -> GlobalState {
    update_payment(
        state,
        PaymentPatch {
            step: Patch::Set(step),
            ..Default::default()
        },
        tab_id,
    )
}

/// Stores the allow-listed part of `invoice`, tagged as media type "invoice".
pub fn set_invoice_info(state: GlobalState, invoice: &ApiInvoice, tab_id: TabId) -> GlobalState {
    update_payment(
        state,
        PaymentPatch {
            invoice: Patch::Set(Invoice::from(invoice)),
            ..Default::default()
        },
        tab_id,
    )
}

pub fn set_stripe_card_info(
    state: GlobalState,
    card_info: StripeCredentials,
    tab_id: TabId,
) -> GlobalState {
    update_payment(
        state,
        PaymentPatch {
            stripe_credentials: Patch::Set(card_info),
            ..Default::default()
        },
        tab_id,
    )
}

pub fn set_smart_glocal_card_info(
    state: GlobalState,
    card_info: SmartGlocalCredentials,
    tab_id: TabId,
) -> GlobalState {
    update_payment(
        state,
        PaymentPatch {
            smart_glocal_credentials: Patch::Set(card_info),
            ..Default::default()
        },
        tab_id,
    )
}

/// Merges every field the form carries. Fields missing from the form are kept.
/// The form's invoice is stored whole, request flags included.
pub fn set_payment_form(state: GlobalState, form: &ApiPaymentForm, tab_id: TabId) -> GlobalState {
    let form = form.clone();
    let patch = PaymentPatch {
        form_id: Patch::Set(form.form_id),
        bot_id: Patch::Set(form.bot_id),
        provider_id: Patch::keep_or_set(form.provider_id),
        url: Patch::keep_or_set(form.url),
        native_provider: Patch::keep_or_set(form.native_provider),
        native_params: Patch::keep_or_set(form.native_params),
        saved_info: Patch::keep_or_set(form.saved_info),
        saved_credentials: Patch::keep_or_set(form.saved_credentials),
        can_save_credentials: Patch::keep_or_set(form.can_save_credentials),
        is_password_missing: Patch::keep_or_set(form.is_password_missing),
        invoice: Patch::Set(Invoice::from_form(&form.invoice)),
        ..Default::default()
    };
    update_payment(state, patch, tab_id)
}

/// `None` clears the URL.
pub fn set_confirm_payment_url(state: GlobalState, url: Option<String>, tab_id: TabId) -> GlobalState {
    update_payment(
        state,
        PaymentPatch {
            confirm_payment_url: Patch::from(url),
            ..Default::default()
        },
        tab_id,
    )
}

/// `None` clears any stored receipt; it is never a no-op.
pub fn set_receipt(
    state: GlobalState,
    receipt: Option<ApiReceiptRegular>,
    tab_id: TabId,
) -> GlobalState {
    update_payment(
        state,
        PaymentPatch {
            receipt: Patch::from(receipt),
            ..Default::default()
        },
        tab_id,
    )
}

/// Wipes the payment record and closes the stars payment modal.
pub fn clear_payment(state: GlobalState, tab_id: TabId) -> GlobalState {
    update_tab_state(
        state,
        TabStatePatch {
            payment: Some(Payment::default()),
            is_star_payment_modal_open: Patch::Clear,
            ..Default::default()
        },
        tab_id,
    )
}

/// Closes the invoice modals but keeps the rest of the payment record.
pub fn close_invoice(state: GlobalState, tab_id: TabId) -> GlobalState {
    let state = update_payment(
        state,
        PaymentPatch {
            is_payment_modal_open: Patch::Clear,
            is_extended_media: Patch::Clear,
            ..Default::default()
        },
        tab_id,
    );
    update_tab_state(
        state,
        TabStatePatch {
            is_star_payment_modal_open: Patch::Clear,
            ..Default::default()
        },
        tab_id,
    )
}
