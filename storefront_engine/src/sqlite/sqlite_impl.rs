//! `SqliteDatabase` is a concrete implementation of a storefront engine backend.
//!
//! Unsurprisingly, it uses SQLite as the backend and implements all the storage traits defined in the
//! [`traits`](crate::traits) module.
use std::fmt::Debug;

use log::*;
use sqlx::{migrate::MigrateError, SqlitePool};

use super::db::{customers, new_pool, orders};
use crate::{
    db_types::{Customer, NewCustomer, NewOrder, Order, OrderId, OrderStatusType, PaymentId},
    traits::{CustomerApiError, CustomerManagement, OrderManagement, PaymentGatewayError, StatusUpdate},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl OrderManagement for SqliteDatabase {
    fn url(&self) -> &str {
        self.url.as_str()
    }

    async fn insert_order(&self, order: NewOrder) -> Result<Order, PaymentGatewayError> {
        let mut conn = self.pool.acquire().await?;
        let order = orders::insert_order(order, &mut conn).await?;
        debug!("🗃️ Order [{}] has been saved in the DB with id {}", order.order_id, order.id);
        Ok(order)
    }

    async fn fetch_order_by_order_id(&self, order_id: &OrderId) -> Result<Option<Order>, PaymentGatewayError> {
        let mut conn = self.pool.acquire().await?;
        let order = orders::fetch_order_by_order_id(order_id, &mut conn).await?;
        Ok(order)
    }

    async fn update_status_and_payment_id(
        &self,
        order_id: &OrderId,
        status: OrderStatusType,
        payment_id: &PaymentId,
    ) -> Result<StatusUpdate, PaymentGatewayError> {
        let mut tx = self.pool.begin().await?;
        let result = orders::update_status_and_payment_id(order_id, status, payment_id, &mut tx).await?;
        tx.commit().await?;
        Ok(result)
    }
}

impl CustomerManagement for SqliteDatabase {
    async fn upsert_customer_by_email(&self, customer: NewCustomer) -> Result<Customer, CustomerApiError> {
        let mut conn = self.pool.acquire().await?;
        let customer = customers::upsert_by_email(customer, &mut conn).await?;
        debug!("🗃️ Customer #{} ({}) saved", customer.id, customer.email);
        Ok(customer)
    }

    async fn fetch_customer_by_email(&self, email: &str) -> Result<Option<Customer>, CustomerApiError> {
        let mut conn = self.pool.acquire().await?;
        let customer = customers::fetch_by_email(email, &mut conn).await?;
        Ok(customer)
    }
}

impl SqliteDatabase {
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        trace!("Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    /// Brings the schema up to date. Migrations that have already been applied are skipped.
    pub async fn run_migrations(&self) -> Result<(), MigrateError> {
        sqlx::migrate!("./src/sqlite/migrations").run(&self.pool).await?;
        info!("🗃️ Database migrations complete");
        Ok(())
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
