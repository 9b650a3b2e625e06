// File: src/checkout.rs
// Purpose: Checkout form submission, simulated payment and order recording

use crate::account::{AccountStore, Session, User};
use crate::cart::{Cart, CartLine, OrderSummary};
use crate::config::StoreConfig;
use crate::error::CheckoutError;
use accessflow_forms::{checkout_rules, validate, FormValues};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub full_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

impl ShippingAddress {
    fn from_form(values: &FormValues) -> Self {
        let field = |name: &str| values.get(name).trim().to_string();
        Self {
            full_name: field("fullName"),
            address: field("address"),
            city: field("city"),
            state: field("state"),
            zip_code: field("zipCode"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub placed_at: DateTime<Utc>,
    pub items: Vec<CartLine>,
    pub summary: OrderSummary,
    pub shipping_address: ShippingAddress,
}

impl Order {
    /// Number of distinct lines, as shown in order history
    pub fn line_count(&self) -> usize {
        self.items.len()
    }
}

/// Checkout form values pre-filled from the signed-in user, if any
pub fn checkout_form(user: Option<&User>) -> FormValues {
    let mut values: FormValues = checkout_rules()
        .field_names()
        .into_iter()
        .map(|field| (field, ""))
        .collect();
    if let Some(user) = user {
        values.set("fullName", user.name.as_str());
        values.set("email", user.email.as_str());
    }
    values
}

/// Simulated payment running in the background
///
/// Completes with the order once the configured delay has passed. There is
/// no cancellation or retry.
#[derive(Debug)]
pub struct PaymentTask {
    order_id: Uuid,
    receiver: oneshot::Receiver<Order>,
}

impl PaymentTask {
    pub fn order_id(&self) -> Uuid {
        self.order_id
    }

    pub async fn wait(self) -> Result<Order, CheckoutError> {
        self.receiver
            .await
            .map_err(|_| CheckoutError::PaymentInterrupted)
    }
}

/// Validate the checkout form and start payment for the cart's contents
///
/// Must be called from within a tokio runtime. The cart is left untouched;
/// the order holds a snapshot of its lines.
pub fn begin_checkout(
    cart: &Cart,
    values: &FormValues,
    config: &StoreConfig,
) -> Result<PaymentTask, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let validation = validate(values, &checkout_rules());
    if !validation.is_valid {
        tracing::debug!(errors = validation.error_count(), "checkout form rejected");
        return Err(CheckoutError::Invalid(validation));
    }

    let order = Order {
        id: Uuid::new_v4(),
        placed_at: Utc::now(),
        items: cart.lines().to_vec(),
        summary: cart.summary(&config.pricing),
        shipping_address: ShippingAddress::from_form(values),
    };
    let order_id = order.id;
    let delay = config.checkout.payment_delay();
    let (sender, receiver) = oneshot::channel();

    tracing::info!(%order_id, total = order.summary.total, "processing payment");
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        if sender.send(order).is_err() {
            tracing::warn!(%order_id, "payment finished after checkout was abandoned");
        }
    });

    Ok(PaymentTask { order_id, receiver })
}

/// Clear the cart and, for a signed-in shopper, add the order to their history
pub fn complete_checkout(
    order: Order,
    cart: &mut Cart,
    accounts: &mut AccountStore,
    session: Option<&Session>,
) -> Result<Order, CheckoutError> {
    if let Some(session) = session {
        accounts.add_order(session, order.clone())?;
    }
    cart.clear();
    tracing::info!(order_id = %order.id, "order placed");
    Ok(order)
}

/// Run a whole checkout: validate, wait for payment, record the order
pub async fn place_order(
    cart: &mut Cart,
    values: &FormValues,
    accounts: &mut AccountStore,
    session: Option<&Session>,
    config: &StoreConfig,
) -> Result<Order, CheckoutError> {
    let order = begin_checkout(cart, values, config)?.wait().await?;
    complete_checkout(order, cart, accounts, session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::Registration;
    use crate::catalog::Product;
    use crate::config::AuthConfig;

    fn quick_config() -> StoreConfig {
        let mut config = StoreConfig::default();
        config.checkout.payment_delay_ms = 5;
        config
    }

    fn widget() -> Product {
        Product {
            id: 1,
            name: "Widget".to_string(),
            category: "Tools".to_string(),
            price: 10.0,
            rating: 4.5,
            stock: 5,
            description: "A widget".to_string(),
            image: String::new(),
        }
    }

    fn valid_form() -> FormValues {
        checkout_form(None)
            .with("fullName", "Ada Lovelace")
            .with("email", "ada@example.com")
            .with("phone", "555-123-4567")
            .with("address", "12 Analytical Way")
            .with("city", "London")
            .with("state", "LN")
            .with("zipCode", "12345")
            .with("cardNumber", "4111111111111111")
            .with("cardExpiry", "12/30")
            .with("cardCVV", "123")
    }

    #[test]
    fn test_checkout_form_prefills_user() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            created_at: Utc::now(),
            orders: Vec::new(),
        };
        let values = checkout_form(Some(&user));
        assert_eq!(values.get("fullName"), "Ada");
        assert_eq!(values.get("email"), "ada@example.com");
        assert_eq!(values.get("phone"), "");
        assert_eq!(values.len(), 10);
    }

    #[tokio::test]
    async fn test_empty_cart_rejected() {
        let err = begin_checkout(&Cart::new(), &valid_form(), &quick_config()).unwrap_err();
        assert_eq!(err, CheckoutError::EmptyCart);
    }

    #[tokio::test]
    async fn test_invalid_form_blocks_payment() {
        let mut cart = Cart::new();
        cart.add_one(&widget());

        let values = valid_form().with("zipCode", "ABCDE");
        match begin_checkout(&cart, &values, &quick_config()) {
            Err(CheckoutError::Invalid(result)) => {
                assert_eq!(result.get_error("zipCode"), Some("Please enter a valid zip code"));
            }
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_payment_delivers_snapshot() {
        let mut cart = Cart::new();
        cart.add(&widget(), 2);

        let task = begin_checkout(&cart, &valid_form(), &quick_config()).unwrap();
        let order_id = task.order_id();
        cart.add_one(&widget());

        let order = task.wait().await.unwrap();
        assert_eq!(order.id, order_id);
        assert_eq!(order.items[0].quantity, 2);
        assert_eq!(order.summary.subtotal, 20.0);
        assert_eq!(order.shipping_address.city, "London");
    }

    #[tokio::test]
    async fn test_place_order_records_for_signed_in_user() {
        let config = quick_config();
        let mut accounts = AccountStore::new(&AuthConfig::default());
        let session = accounts
            .register(Registration {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                password: "engine42".to_string(),
            })
            .unwrap();

        let mut cart = Cart::new();
        cart.add_one(&widget());

        let order = place_order(&mut cart, &valid_form(), &mut accounts, Some(&session), &config)
            .await
            .unwrap();

        assert!(cart.is_empty());
        let user = accounts.user(&session).unwrap();
        assert_eq!(user.orders.len(), 1);
        assert_eq!(user.orders[0].id, order.id);
    }

    #[tokio::test]
    async fn test_place_order_as_guest() {
        let config = quick_config();
        let mut accounts = AccountStore::new(&AuthConfig::default());
        let mut cart = Cart::new();
        cart.add_one(&widget());

        let order = place_order(&mut cart, &valid_form(), &mut accounts, None, &config)
            .await
            .unwrap();
        assert!(cart.is_empty());
        assert_eq!(order.line_count(), 1);
        assert!(accounts.is_empty());
    }
}
