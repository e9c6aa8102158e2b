use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{Customer, CustomerDetails, NewCustomer},
    traits::{CustomerApiError, CustomerManagement},
};

/// The customer directory API. Customers are identified by their email address.
pub struct CustomerApi<B> {
    db: B,
}

impl<B> Debug for CustomerApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CustomerApi")
    }
}

impl<B> CustomerApi<B>
where B: CustomerManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    /// Validates the submitted details and saves them. An existing customer with the same email has all their
    /// details replaced by the new ones.
    pub async fn save_details(&self, details: CustomerDetails) -> Result<Customer, CustomerApiError> {
        let customer = NewCustomer::try_from(details).map_err(|e| {
            debug!("👤️ Rejected customer details. {e}");
            CustomerApiError::from(e)
        })?;
        let customer = self.db.upsert_customer_by_email(customer).await?;
        info!("👤️ Details saved for customer #{}", customer.id);
        Ok(customer)
    }

    pub async fn fetch_customer(&self, email: &str) -> Result<Option<Customer>, CustomerApiError> {
        self.db.fetch_customer_by_email(email).await
    }
}
