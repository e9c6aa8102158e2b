use chrono::Utc;
use log::{debug, trace};
use rust_decimal::Decimal;
use sqlx::{sqlite::SqliteRow, types::Json, FromRow, QueryBuilder, Row, Sqlite, SqliteConnection};

use crate::{
    db_types::{CustomerDetails, NewOrder, Order, OrderId, OrderItem, OrderStatusType, PaymentId},
    traits::{PaymentGatewayError, StatusUpdate},
};

impl FromRow<'_, SqliteRow> for Order {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        // Amounts are stored as text so that no precision is lost on the way in or out
        let amount: String = row.try_get("amount")?;
        let amount = amount
            .parse::<Decimal>()
            .map_err(|e| sqlx::Error::ColumnDecode { index: "amount".into(), source: Box::new(e) })?;
        let Json(items): Json<Vec<OrderItem>> = row.try_get("items")?;
        let Json(customer_details): Json<CustomerDetails> = row.try_get("customer_details")?;
        Ok(Self {
            id: row.try_get("id")?,
            order_id: row.try_get("order_id")?,
            payment_id: row.try_get("payment_id")?,
            amount,
            currency: row.try_get("currency")?,
            items,
            customer_details,
            status: row.try_get("status")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// Inserts a new order into the database using the given connection. New orders always start in the `created` state
/// without a payment id.
///
/// A repeated `order_id` is rejected with [`PaymentGatewayError::OrderAlreadyExists`].
pub async fn insert_order(order: NewOrder, conn: &mut SqliteConnection) -> Result<Order, PaymentGatewayError> {
    let order_id = order.order_id.clone();
    let result = sqlx::query_as(
        r#"
            INSERT INTO orders (
                order_id,
                amount,
                currency,
                items,
                customer_details,
                status,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *;
        "#,
    )
    .bind(order.order_id)
    .bind(order.amount.to_string())
    .bind(order.currency)
    .bind(Json(order.items))
    .bind(Json(order.customer_details))
    .bind(OrderStatusType::Created)
    .bind(order.created_at)
    .bind(order.created_at)
    .fetch_one(conn)
    .await;
    match result {
        Ok(order) => Ok(order),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            debug!("📝️ Order [{order_id}] already exists");
            Err(PaymentGatewayError::OrderAlreadyExists(order_id))
        },
        Err(e) => Err(e.into()),
    }
}

/// Returns the order for the corresponding `order_id`, if it exists
pub async fn fetch_order_by_order_id(
    order_id: &OrderId,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, sqlx::Error> {
    let order =
        sqlx::query_as("SELECT * FROM orders WHERE order_id = $1").bind(order_id.as_str()).fetch_optional(conn).await?;
    Ok(order)
}

/// Sets the status and payment id of the order in one conditional `UPDATE`. The row is only touched if its current
/// status is a legal predecessor of `status`, so two concurrent callers can never both apply the change.
///
/// When nothing was updated, the current row is read back to tell the caller why. Run this as the first statement of
/// a transaction so that the read sees the same state the update did.
pub async fn update_status_and_payment_id(
    order_id: &OrderId,
    status: OrderStatusType,
    payment_id: &PaymentId,
    conn: &mut SqliteConnection,
) -> Result<StatusUpdate, PaymentGatewayError> {
    let predecessors = status.predecessors();
    let updated = if predecessors.is_empty() {
        None
    } else {
        let mut builder = QueryBuilder::<Sqlite>::new("UPDATE orders SET status = ");
        builder
            .push_bind(status)
            .push(", payment_id = ")
            .push_bind(payment_id.as_str())
            .push(", updated_at = ")
            .push_bind(Utc::now())
            .push(" WHERE order_id = ")
            .push_bind(order_id.as_str())
            .push(" AND status IN (");
        let mut in_list = builder.separated(", ");
        for s in predecessors {
            in_list.push_bind(*s);
        }
        in_list.push_unseparated(") RETURNING *");
        trace!("📝️ Executing query: {}", builder.sql());
        match builder.build_query_as::<Order>().fetch_optional(&mut *conn).await {
            Ok(order) => order,
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                debug!("📝️ Payment {payment_id} is already attached to another order");
                return Err(PaymentGatewayError::PaymentAlreadyExists(payment_id.clone()));
            },
            Err(e) => return Err(e.into()),
        }
    };
    if let Some(order) = updated {
        debug!("📝️ Order [{order_id}] is now {status} with payment {payment_id}");
        return Ok(StatusUpdate::Updated(order));
    }
    match fetch_order_by_order_id(order_id, conn).await? {
        None => Err(PaymentGatewayError::OrderNotFound(order_id.clone())),
        Some(order) if order.status == status && order.payment_id.as_ref() == Some(payment_id) => {
            trace!("📝️ Order [{order_id}] is already {status} with payment {payment_id}");
            Ok(StatusUpdate::Unchanged(order))
        },
        Some(order) => {
            debug!("📝️ Order [{order_id}] cannot move from {} to {status}", order.status);
            Err(PaymentGatewayError::OrderModificationForbidden)
        },
    }
}
