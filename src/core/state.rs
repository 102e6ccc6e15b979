//! # Application State
//!
//! The slice of the client's global state that payments and stars touch.
//! Domain data only; how it is stored or broadcast is someone else's problem.
//!
//! ```text
//! GlobalState
//! ├── stars: Option<StarsLedger>          // global, not per tab
//! │   ├── balance: Option<i64>
//! │   ├── history: Option<StarsHistory>   // type → TransactionSlice
//! │   └── subscriptions: Option<SubscriptionSlice>
//! └── by_tab_id: BTreeMap<TabId, TabState>
//!     ├── payment: Payment                // in-flight purchase
//!     ├── is_star_payment_modal_open: Option<bool>
//!     └── stars_transaction_modal: Option<StarsTransactionModal>
//! ```
//!
//! State changes only happen through the transforms in `payments.rs`,
//! `stars.rs` and `tabs.rs`, usually reached via `update(state, action)`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::api::types::{
    ApiInvoice, ApiReceiptRegular, ApiStarsSubscription, ApiStarsTransaction, NativeParams,
    PaymentStep, SavedCredential, SavedInfo, ShippingOption, StarsTransactionType, WebDocument,
};
use crate::core::patch::Patch;

/// Identifies one UI tab sharing the process.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(transparent)]
pub struct TabId(pub u32);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tab#{}", self.0)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GlobalState {
    #[serde(default)]
    pub stars: Option<StarsLedger>,
    #[serde(default)]
    pub by_tab_id: BTreeMap<TabId, TabState>,
}

impl GlobalState {
    /// State with one empty tab per id.
    pub fn with_tabs(ids: impl IntoIterator<Item = TabId>) -> Self {
        Self {
            stars: None,
            by_tab_id: ids.into_iter().map(|id| (id, TabState::new(id))).collect(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TabState {
    pub id: TabId,
    #[serde(default)]
    pub payment: Payment,
    #[serde(default)]
    pub is_star_payment_modal_open: Option<bool>,
    #[serde(default)]
    pub stars_transaction_modal: Option<StarsTransactionModal>,
}

impl TabState {
    pub fn new(id: TabId) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StarsTransactionModal {
    pub transaction: ApiStarsTransaction,
}

// ============================================================================
// Payment record
// ============================================================================

/// Discriminator stamped on invoices stored by `set_invoice_info`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum InvoiceMediaType {
    #[default]
    Invoice,
}

/// Invoice as held by the payment flow.
///
/// `set_invoice_info` stores the allow-listed projection (`From<&ApiInvoice>`),
/// stamped with `media_type`. A payment form's invoice is kept whole
/// (`Invoice::from_form`), request flags included, and is not stamped.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<InvoiceMediaType>,
    pub title: String,
    pub text: String,
    pub photo: Option<WebDocument>,
    pub amount: i64,
    pub currency: String,
    pub is_test: Option<bool>,
    pub is_recurring: Option<bool>,
    pub terms_url: Option<String>,
    pub max_tip_amount: Option<i64>,
    pub suggested_tip_amounts: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_message_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_email_requested: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_phone_requested: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_shipping_address_requested: Option<bool>,
}

impl From<&ApiInvoice> for Invoice {
    /// Fixed allow-list projection. Anything else on the source is dropped.
    fn from(invoice: &ApiInvoice) -> Self {
        Self {
            media_type: Some(InvoiceMediaType::Invoice),
            title: invoice.title.clone(),
            text: invoice.text.clone(),
            photo: invoice.photo.clone(),
            amount: invoice.amount,
            currency: invoice.currency.clone(),
            is_test: invoice.is_test,
            is_recurring: invoice.is_recurring,
            terms_url: invoice.terms_url.clone(),
            max_tip_amount: invoice.max_tip_amount,
            suggested_tip_amounts: invoice.suggested_tip_amounts.clone(),
            receipt_message_id: None,
            is_email_requested: None,
            is_phone_requested: None,
            is_shipping_address_requested: None,
        }
    }
}

impl Invoice {
    /// Every field of `invoice`, unprojected and unstamped.
    pub fn from_form(invoice: &ApiInvoice) -> Self {
        let ApiInvoice {
            title,
            text,
            amount,
            currency,
            photo,
            is_test,
            is_recurring,
            terms_url,
            max_tip_amount,
            suggested_tip_amounts,
            receipt_message_id,
            is_email_requested,
            is_phone_requested,
            is_shipping_address_requested,
        } = invoice.clone();

        Self {
            media_type: None,
            title,
            text,
            photo,
            amount,
            currency,
            is_test,
            is_recurring,
            terms_url,
            max_tip_amount,
            suggested_tip_amounts,
            receipt_message_id,
            is_email_requested,
            is_phone_requested,
            is_shipping_address_requested,
        }
    }
}

/// Tokenized Stripe card. Stored exactly as received.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StripeCredentials {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}

/// Tokenized Smart Glocal card. Stored exactly as received.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SmartGlocalCredentials {
    #[serde(rename = "type")]
    pub kind: String,
    pub token: String,
}

/// Transient state of one in-flight purchase.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Payment {
    pub step: Option<PaymentStep>,
    pub shipping_options: Option<Vec<ShippingOption>>,
    pub request_id: Option<String>,
    pub form_id: Option<String>,
    pub bot_id: Option<String>,
    pub provider_id: Option<String>,
    pub url: Option<String>,
    pub native_provider: Option<String>,
    pub native_params: Option<NativeParams>,
    pub saved_info: Option<SavedInfo>,
    pub saved_credentials: Option<Vec<SavedCredential>>,
    pub can_save_credentials: Option<bool>,
    pub is_password_missing: Option<bool>,
    pub invoice: Option<Invoice>,
    pub stripe_credentials: Option<StripeCredentials>,
    pub smart_glocal_credentials: Option<SmartGlocalCredentials>,
    pub confirm_payment_url: Option<String>,
    pub receipt: Option<ApiReceiptRegular>,
    pub is_payment_modal_open: Option<bool>,
    pub is_extended_media: Option<bool>,
}

impl Payment {
    pub fn is_empty(&self) -> bool {
        *self == Payment::default()
    }

    /// Shallow merge: each non-`Keep` field of `patch` overwrites.
    pub fn merge(mut self, patch: PaymentPatch) -> Self {
        let PaymentPatch {
            step,
            shipping_options,
            request_id,
            form_id,
            bot_id,
            provider_id,
            url,
            native_provider,
            native_params,
            saved_info,
            saved_credentials,
            can_save_credentials,
            is_password_missing,
            invoice,
            stripe_credentials,
            smart_glocal_credentials,
            confirm_payment_url,
            receipt,
            is_payment_modal_open,
            is_extended_media,
        } = patch;

        step.apply_to(&mut self.step);
        shipping_options.apply_to(&mut self.shipping_options);
        request_id.apply_to(&mut self.request_id);
        form_id.apply_to(&mut self.form_id);
        bot_id.apply_to(&mut self.bot_id);
        provider_id.apply_to(&mut self.provider_id);
        url.apply_to(&mut self.url);
        native_provider.apply_to(&mut self.native_provider);
        native_params.apply_to(&mut self.native_params);
        saved_info.apply_to(&mut self.saved_info);
        saved_credentials.apply_to(&mut self.saved_credentials);
        can_save_credentials.apply_to(&mut self.can_save_credentials);
        is_password_missing.apply_to(&mut self.is_password_missing);
        invoice.apply_to(&mut self.invoice);
        stripe_credentials.apply_to(&mut self.stripe_credentials);
        smart_glocal_credentials.apply_to(&mut self.smart_glocal_credentials);
        confirm_payment_url.apply_to(&mut self.confirm_payment_url);
        receipt.apply_to(&mut self.receipt);
        is_payment_modal_open.apply_to(&mut self.is_payment_modal_open);
        is_extended_media.apply_to(&mut self.is_extended_media);
        self
    }
}

/// Partial update of a `Payment`, one tri-state slot per field.
///
/// Unknown keys are rejected so a misspelt field can't pass as an empty merge.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PaymentPatch {
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub step: Patch<PaymentStep>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub shipping_options: Patch<Vec<ShippingOption>>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub request_id: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub form_id: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub bot_id: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub provider_id: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub url: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub native_provider: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub native_params: Patch<NativeParams>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub saved_info: Patch<SavedInfo>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub saved_credentials: Patch<Vec<SavedCredential>>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub can_save_credentials: Patch<bool>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub is_password_missing: Patch<bool>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub invoice: Patch<Invoice>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub stripe_credentials: Patch<StripeCredentials>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub smart_glocal_credentials: Patch<SmartGlocalCredentials>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub confirm_payment_url: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub receipt: Patch<ApiReceiptRegular>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub is_payment_modal_open: Patch<bool>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub is_extended_media: Patch<bool>,
}

// ============================================================================
// Stars ledger
// ============================================================================

/// One page-able history list plus the cursor for the next fetch.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSlice {
    pub transactions: Vec<ApiStarsTransaction>,
    #[serde(default)]
    pub next_offset: Option<String>,
}

pub type StarsHistory = BTreeMap<StarsTransactionType, TransactionSlice>;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionSlice {
    pub list: Vec<ApiStarsSubscription>,
    #[serde(default)]
    pub next_offset: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct StarsLedger {
    #[serde(default)]
    pub balance: Option<i64>,
    #[serde(default)]
    pub history: Option<StarsHistory>,
    #[serde(default)]
    pub subscriptions: Option<SubscriptionSlice>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_api_invoice, sample_receipt};

    #[test]
    fn test_with_tabs_creates_empty_tabs() {
        let state = GlobalState::with_tabs([TabId(1), TabId(2)]);
        assert_eq!(state.by_tab_id.len(), 2);
        assert_eq!(state.by_tab_id[&TabId(2)].id, TabId(2));
        assert!(state.by_tab_id[&TabId(1)].payment.is_empty());
        assert!(state.stars.is_none());
    }

    #[test]
    fn test_merge_empty_patch_is_identity() {
        let payment = Payment {
            step: Some(PaymentStep::Shipping),
            receipt: Some(sample_receipt()),
            ..Default::default()
        };
        assert_eq!(payment.clone().merge(PaymentPatch::default()), payment);
    }

    #[test]
    fn test_merge_replaces_nested_values_wholesale() {
        let payment = Payment {
            saved_info: Some(SavedInfo {
                name: Some("Ada".into()),
                email: Some("ada@example.com".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let merged = payment.merge(PaymentPatch {
            saved_info: Patch::Set(SavedInfo {
                phone: Some("+100".into()),
                ..Default::default()
            }),
            ..Default::default()
        });
        let info = merged.saved_info.unwrap();
        assert_eq!(info.phone.as_deref(), Some("+100"));
        assert!(info.name.is_none());
        assert!(info.email.is_none());
    }

    #[test]
    fn test_invoice_projection_stamps_media_type() {
        let invoice = Invoice::from(&sample_api_invoice());
        assert_eq!(invoice.media_type, Some(InvoiceMediaType::Invoice));
        let json = serde_json::to_value(&invoice).unwrap();
        assert_eq!(json["mediaType"], "invoice");
        assert!(json.get("receiptMessageId").is_none());
    }

    #[test]
    fn test_form_invoice_keeps_request_flags_unstamped() {
        let source = ApiInvoice {
            receipt_message_id: Some(11),
            is_email_requested: Some(true),
            is_shipping_address_requested: Some(true),
            ..sample_api_invoice()
        };
        let invoice = Invoice::from_form(&source);
        assert!(invoice.media_type.is_none());
        assert_eq!(invoice.receipt_message_id, Some(11));
        assert_eq!(invoice.is_email_requested, Some(true));
        assert_eq!(invoice.is_shipping_address_requested, Some(true));
        assert!(invoice.is_phone_requested.is_none());

        let json = serde_json::to_value(&invoice).unwrap();
        assert!(json.get("mediaType").is_none());
        assert_eq!(json["isEmailRequested"], true);
    }

    #[test]
    fn test_payment_patch_rejects_unknown_keys() {
        let err = serde_json::from_str::<PaymentPatch>(r#"{"recipt":null}"#).unwrap_err();
        assert!(err.to_string().contains("recipt"));
        let ok: PaymentPatch = serde_json::from_str(r#"{"receipt":null}"#).unwrap();
        assert_eq!(ok.receipt, Patch::Clear);
    }

    #[test]
    fn test_tab_ids_serialize_as_map_keys() {
        let state = GlobalState::with_tabs([TabId(7)]);
        let json = serde_json::to_string(&state).unwrap();
        let back: GlobalState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn test_credentials_use_type_key() {
        let creds: StripeCredentials =
            serde_json::from_str(r#"{"type":"card","id":"tok_1"}"#).unwrap();
        assert_eq!(creds.kind, "card");
        assert_eq!(creds.id, "tok_1");
    }
}
