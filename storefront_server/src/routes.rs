//! Request handler definitions
//!
//! Define each route and its handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current thread will cause the
//! current worker to stop processing new requests. Any long, non-cpu-bound operation (e.g. I/O, database operations,
//! calls to the payment provider) must be awaited, so that the worker can get on with other requests in the meantime.
use actix_web::{get, web, HttpRequest, HttpResponse, Responder};
use log::*;
use storefront_engine::{
    db_types::CustomerDetails,
    order_objects::PaymentConfirmation,
    CustomerApi,
    CustomerManagement,
    OrderFlowApi,
    OrderManagement,
    PaymentGatewayClient,
};

use crate::{
    data_objects::{CreateOrderParams, JsonResponse, VerifyPaymentParams},
    errors::ServerError,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

/// Malformed JSON bodies get the same `{success: false, message}` treatment as every other bad request.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req: &HttpRequest| {
        debug!("💻️ Rejected request body for {}. {err}", req.path());
        ServerError::InvalidRequestBody(format!("Could not read request body. {err}")).into()
    })
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Customers  ----------------------------------------------------
route!(save_details => Post "/save-details" impl CustomerManagement);
/// Saves the customer's contact details. All six fields are required. If a customer with the same email address
/// already exists, their details are replaced.
pub async fn save_details<B: CustomerManagement>(
    body: web::Json<CustomerDetails>,
    api: web::Data<CustomerApi<B>>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ POST save_details");
    api.save_details(body.into_inner()).await.map_err(|e| {
        debug!("💻️ Could not save customer details. {e}");
        ServerError::from(e)
    })?;
    Ok(HttpResponse::Ok().json(JsonResponse::ok()))
}

//----------------------------------------------   Orders  ----------------------------------------------------
route!(create_order => Post "/create-order" impl OrderManagement, PaymentGatewayClient);
/// Opens an order with the payment provider for `amount` (in minor units), and records it locally.
///
/// On success, the payment provider's order object is returned exactly as the provider sent it. The checkout widget
/// on the storefront needs its `id` to collect the payment.
pub async fn create_order<B, G>(
    body: web::Json<CreateOrderParams>,
    api: web::Data<OrderFlowApi<B, G>>,
) -> Result<HttpResponse, ServerError>
where
    B: OrderManagement,
    G: PaymentGatewayClient,
{
    let CreateOrderParams { amount, items, customer_details } = body.into_inner();
    debug!("💻️ POST create_order for {amount} with {} items", items.len());
    let remote = api.create_order(amount, items, customer_details).await.map_err(|e| {
        warn!("💻️ Could not create order. {e}");
        ServerError::from(e)
    })?;
    Ok(HttpResponse::Ok().json(remote.body))
}

route!(verify_payment => Post "/verify-payment" impl OrderManagement, PaymentGatewayClient);
/// Confirms a payment. The request carries the order id, payment id and signature that the payment provider
/// returned to the browser. The order is only marked as paid if the signature is valid.
///
/// Confirming the same payment more than once is harmless, and succeeds every time.
pub async fn verify_payment<B, G>(
    body: web::Json<VerifyPaymentParams>,
    api: web::Data<OrderFlowApi<B, G>>,
) -> Result<HttpResponse, ServerError>
where
    B: OrderManagement,
    G: PaymentGatewayClient,
{
    let confirmation = PaymentConfirmation::from(body.into_inner());
    debug!("💻️ POST verify_payment for order [{}]", confirmation.order_id);
    let order = api.verify_payment(&confirmation).await.map_err(|e| {
        debug!("💻️ Payment confirmation for order [{}] failed. {e}", confirmation.order_id);
        ServerError::from(e)
    })?;
    trace!("💻️ Order [{}] is {}", order.order_id, order.status);
    Ok(HttpResponse::Ok().json(JsonResponse::ok()))
}
