use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("Conversion error: {0}")]
pub struct ConversionError(String);

//--------------------------------------        OrderId        ---------------------------------------------------------
/// The order identifier issued by the payment provider. It is the primary lookup key for orders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl FromStr for OrderId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<String> for OrderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for OrderId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl OrderId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

//--------------------------------------       PaymentId       ---------------------------------------------------------
/// The payment identifier issued by the payment provider once a customer has paid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct PaymentId(pub String);

impl From<String> for PaymentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for PaymentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Display for PaymentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PaymentId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

//--------------------------------------   OrderStatusType     ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatusType {
    /// The order has been opened with the payment provider, and no verified payment has been seen yet.
    Created,
    /// A payment confirmation with a valid signature has been received for the order.
    Paid,
    /// The payment attempt failed.
    Failed,
    /// The order has been handed to the courier.
    Shipped,
    /// The order has reached the customer.
    Delivered,
}

impl OrderStatusType {
    /// The statuses from which an order may move into `self`. Orders only ever progress forwards:
    /// `Created` -> `Paid` -> `Shipped` -> `Delivered`, with `Failed` reachable from `Created`.
    pub fn predecessors(&self) -> &'static [OrderStatusType] {
        use OrderStatusType::*;
        match self {
            Created => &[],
            Paid | Failed => &[Created],
            Shipped => &[Paid],
            Delivered => &[Shipped],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatusType::Created => "created",
            OrderStatusType::Paid => "paid",
            OrderStatusType::Failed => "failed",
            OrderStatusType::Shipped => "shipped",
            OrderStatusType::Delivered => "delivered",
        }
    }
}

impl Display for OrderStatusType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatusType {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(Self::Created),
            "paid" => Ok(Self::Paid),
            "failed" => Ok(Self::Failed),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            s => Err(ConversionError(format!("Invalid order status: {s}"))),
        }
    }
}

//--------------------------------------       OrderItem       ---------------------------------------------------------
/// A line item, captured when the order is created. Prices are in major currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
}

impl OrderItem {
    pub fn new(name: &str, price: Decimal, quantity: u32) -> Self {
        Self { name: name.to_string(), price, quantity }
    }
}

//--------------------------------------    CustomerDetails    ---------------------------------------------------------
/// Customer contact fields as submitted by the storefront. Orders keep their own copy of these, so that later edits
/// to the customer record do not rewrite order history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub pincode: String,
}

//--------------------------------------        Order          ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub order_id: OrderId,
    /// Only present once a payment has been verified for this order.
    pub payment_id: Option<PaymentId>,
    /// The order total in major currency units
    pub amount: Decimal,
    pub currency: String,
    pub items: Vec<OrderItem>,
    pub customer_details: CustomerDetails,
    pub status: OrderStatusType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn is_paid(&self) -> bool {
        self.payment_id.is_some() && self.status != OrderStatusType::Created
    }
}

//--------------------------------------        NewOrder       ---------------------------------------------------------
#[derive(Debug, Clone)]
pub struct NewOrder {
    /// The order_id as assigned by the payment provider
    pub order_id: OrderId,
    /// The total in major currency units
    pub amount: Decimal,
    pub currency: String,
    pub items: Vec<OrderItem>,
    pub customer_details: CustomerDetails,
    pub created_at: DateTime<Utc>,
}

impl NewOrder {
    pub fn new(order_id: OrderId, amount: Decimal, currency: &str) -> Self {
        Self {
            order_id,
            amount,
            currency: currency.to_string(),
            items: Vec::new(),
            customer_details: CustomerDetails::default(),
            created_at: Utc::now(),
        }
    }

    pub fn with_items(mut self, items: Vec<OrderItem>) -> Self {
        self.items = items;
        self
    }

    pub fn with_customer_details(mut self, details: CustomerDetails) -> Self {
        self.customer_details = details;
        self
    }
}

//--------------------------------------        Customer       ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    /// The natural key for customer records. Always stored lower-case.
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub pincode: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//--------------------------------------      NewCustomer      ---------------------------------------------------------
/// A validated set of customer fields, ready to be upserted into the customer directory.
///
/// The only way to build one from user input is via `TryFrom<CustomerDetails>`, which trims every field, lower-cases
/// the email and rejects missing fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub pincode: String,
}

pub const PHONE_NUMBER_LENGTH: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CustomerValidationError {
    #[error("All fields required. Missing: {0}")]
    MissingFields(String),
    #[error("Phone number must be exactly {PHONE_NUMBER_LENGTH} characters")]
    InvalidPhoneNumber,
}

impl TryFrom<CustomerDetails> for NewCustomer {
    type Error = CustomerValidationError;

    fn try_from(details: CustomerDetails) -> Result<Self, Self::Error> {
        let CustomerDetails { name, email, phone, address, city, pincode } = details;
        let fields = [
            ("name", name.trim()),
            ("email", email.trim()),
            ("phone", phone.trim()),
            ("address", address.trim()),
            ("city", city.trim()),
            ("pincode", pincode.trim()),
        ];
        let missing = fields.iter().filter(|(_, v)| v.is_empty()).map(|(k, _)| *k).collect::<Vec<_>>();
        if !missing.is_empty() {
            return Err(CustomerValidationError::MissingFields(missing.join(", ")));
        }
        let phone = phone.trim();
        if phone.chars().count() != PHONE_NUMBER_LENGTH {
            return Err(CustomerValidationError::InvalidPhoneNumber);
        }
        Ok(Self {
            name: name.trim().to_string(),
            email: email.trim().to_lowercase(),
            phone: phone.to_string(),
            address: address.trim().to_string(),
            city: city.trim().to_string(),
            pincode: pincode.trim().to_string(),
        })
    }
}
