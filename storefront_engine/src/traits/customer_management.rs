use thiserror::Error;

use crate::db_types::{Customer, CustomerValidationError, NewCustomer};

/// The Customer Directory. Email is the natural key for customer records.
#[allow(async_fn_in_trait)]
pub trait CustomerManagement {
    /// Inserts the customer, or if a customer with the same email exists, overwrites every mutable field of that
    /// record. Returns the record as stored.
    async fn upsert_customer_by_email(&self, customer: NewCustomer) -> Result<Customer, CustomerApiError>;

    async fn fetch_customer_by_email(&self, email: &str) -> Result<Option<Customer>, CustomerApiError>;
}

#[derive(Debug, Clone, Error)]
pub enum CustomerApiError {
    #[error("{0}")]
    ValidationError(#[from] CustomerValidationError),
    #[error("We have an internal database engine (configuration/uptime etc.) : {0}")]
    DatabaseError(String),
}

impl From<sqlx::Error> for CustomerApiError {
    fn from(e: sqlx::Error) -> Self {
        CustomerApiError::DatabaseError(e.to_string())
    }
}
