use chrono::Utc;
use sqlx::SqliteConnection;

use crate::db_types::{Customer, NewCustomer};

/// Inserts the customer, or overwrites the mutable fields of the existing record with the same email, in a single
/// statement. `created_at` is preserved on update.
pub async fn upsert_by_email(customer: NewCustomer, conn: &mut SqliteConnection) -> Result<Customer, sqlx::Error> {
    let now = Utc::now();
    let customer = sqlx::query_as(
        r#"
            INSERT INTO customers (name, email, phone, address, city, pincode, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT(email) DO UPDATE SET
                name = excluded.name,
                phone = excluded.phone,
                address = excluded.address,
                city = excluded.city,
                pincode = excluded.pincode,
                updated_at = excluded.updated_at
            RETURNING *;
        "#,
    )
    .bind(customer.name)
    .bind(customer.email)
    .bind(customer.phone)
    .bind(customer.address)
    .bind(customer.city)
    .bind(customer.pincode)
    .bind(now)
    .bind(now)
    .fetch_one(conn)
    .await?;
    Ok(customer)
}

pub async fn fetch_by_email(email: &str, conn: &mut SqliteConnection) -> Result<Option<Customer>, sqlx::Error> {
    let customer = sqlx::query_as("SELECT * FROM customers WHERE email = $1")
        .bind(email.trim().to_lowercase())
        .fetch_optional(conn)
        .await?;
    Ok(customer)
}

pub async fn count_customers(conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM customers").fetch_one(conn).await?;
    Ok(count)
}
