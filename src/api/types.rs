//! Descriptor shapes handed to the state updater by the network layer.
//!
//! These mirror the client API's JSON (camelCase keys). The updater only
//! reads them; it never validates or decodes their contents.

use serde::{Deserialize, Serialize};

/// Server-side unix timestamp, in seconds.
pub type UnixTime = i64;

/// Image attached to an invoice, receipt or transaction.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WebDocument {
    pub url: String,
    #[serde(default)]
    pub access_hash: Option<String>,
    pub size: u64,
    pub mime_type: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LabeledPrice {
    pub label: String,
    pub amount: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ShippingOption {
    pub id: String,
    pub title: String,
    pub amount: i64,
    pub prices: Vec<LabeledPrice>,
}

/// Screens of the checkout wizard.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum PaymentStep {
    Checkout,
    ShippingInfo,
    Shipping,
    PaymentInfo,
    SavedPayments,
    ConfirmPassword,
    ConfirmPayment,
}

impl PaymentStep {
    pub fn label(self) -> &'static str {
        match self {
            PaymentStep::Checkout => "checkout",
            PaymentStep::ShippingInfo => "shipping info",
            PaymentStep::Shipping => "shipping",
            PaymentStep::PaymentInfo => "payment info",
            PaymentStep::SavedPayments => "saved payments",
            PaymentStep::ConfirmPassword => "confirm password",
            PaymentStep::ConfirmPayment => "confirm payment",
        }
    }
}

/// Invoice as delivered by the API. Carries more than the payment flow keeps.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ApiInvoice {
    pub title: String,
    pub text: String,
    pub amount: i64,
    pub currency: String,
    #[serde(default)]
    pub photo: Option<WebDocument>,
    #[serde(default)]
    pub is_test: Option<bool>,
    #[serde(default)]
    pub is_recurring: Option<bool>,
    #[serde(default)]
    pub terms_url: Option<String>,
    #[serde(default)]
    pub max_tip_amount: Option<i64>,
    #[serde(default)]
    pub suggested_tip_amounts: Option<Vec<i64>>,
    #[serde(default)]
    pub receipt_message_id: Option<i64>,
    #[serde(default)]
    pub is_email_requested: Option<bool>,
    #[serde(default)]
    pub is_phone_requested: Option<bool>,
    #[serde(default)]
    pub is_shipping_address_requested: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub street_line1: String,
    #[serde(default)]
    pub street_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub country_iso2: String,
    pub post_code: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SavedInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub shipping_address: Option<ShippingAddress>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SavedCredential {
    pub id: String,
    pub title: String,
}

/// Processor hints for the card entry form.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct NativeParams {
    #[serde(default)]
    pub need_cardholder_name: Option<bool>,
    #[serde(default)]
    pub need_country: Option<bool>,
    #[serde(default)]
    pub need_zip: Option<bool>,
    #[serde(default)]
    pub publishable_key: Option<String>,
    #[serde(default)]
    pub public_token: Option<String>,
}

/// Payment form fetched before checkout.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ApiPaymentForm {
    pub form_id: String,
    pub bot_id: String,
    #[serde(default)]
    pub provider_id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub native_provider: Option<String>,
    #[serde(default)]
    pub native_params: Option<NativeParams>,
    #[serde(default)]
    pub saved_info: Option<SavedInfo>,
    #[serde(default)]
    pub saved_credentials: Option<Vec<SavedCredential>>,
    #[serde(default)]
    pub can_save_credentials: Option<bool>,
    #[serde(default)]
    pub is_password_missing: Option<bool>,
    pub invoice: ApiInvoice,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ApiReceiptRegular {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub photo: Option<WebDocument>,
    pub currency: String,
    pub prices: Vec<LabeledPrice>,
    #[serde(default)]
    pub info: Option<SavedInfo>,
    #[serde(default)]
    pub tip_amount: i64,
    pub total_amount: i64,
    #[serde(default)]
    pub credentials_title: Option<String>,
    #[serde(default)]
    pub shipping_method: Option<String>,
    #[serde(default)]
    pub shipping_prices: Option<Vec<LabeledPrice>>,
    #[serde(default)]
    pub bot_id: Option<String>,
    #[serde(default)]
    pub date: Option<UnixTime>,
}

/// Counterparty of a stars transaction.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StarsTransactionPeer {
    AppStore,
    PlayMarket,
    PremiumBot,
    Fragment,
    Ads,
    Api,
    #[default]
    Unsupported,
    Peer { id: String },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ApiReceiptStars {
    pub peer: StarsTransactionPeer,
    pub date: UnixTime,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub photo: Option<WebDocument>,
    /// Opaque media payload bought with the transaction.
    #[serde(default)]
    pub media: Option<serde_json::Value>,
    pub currency: String,
    pub total_amount: i64,
    pub transaction_id: String,
    #[serde(default)]
    pub message_id: Option<i64>,
    pub bot_id: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ApiStarsTransaction {
    #[serde(default)]
    pub id: Option<String>,
    pub peer: StarsTransactionPeer,
    pub stars: i64,
    pub date: UnixTime,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub photo: Option<WebDocument>,
    #[serde(default)]
    pub extended_media: Option<serde_json::Value>,
    #[serde(default)]
    pub message_id: Option<i64>,
    #[serde(default)]
    pub is_refund: Option<bool>,
    #[serde(default)]
    pub is_pending: Option<bool>,
    #[serde(default)]
    pub has_failed: Option<bool>,
    #[serde(default)]
    pub is_gift: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StarsSubscriptionPricing {
    /// Billing period in seconds.
    pub period: u32,
    pub amount: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApiStarsSubscription {
    pub id: String,
    pub peer_id: String,
    pub until: UnixTime,
    pub pricing: StarsSubscriptionPricing,
    #[serde(default)]
    pub is_cancelled: Option<bool>,
    #[serde(default)]
    pub can_refulfill: Option<bool>,
    #[serde(default)]
    pub has_missing_balance: Option<bool>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub photo: Option<WebDocument>,
}

/// History filters the client pages through separately.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub enum StarsTransactionType {
    All,
    Inbound,
    Outbound,
    Gift,
}
