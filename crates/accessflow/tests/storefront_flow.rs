//! End-to-end shopper flows: sign up, fill a cart, check out, manage the profile

use accessflow::forms::{register_rules, validate, FormValues};
use accessflow::*;

fn fast_config() -> StoreConfig {
    let mut config = StoreConfig::default();
    config.checkout.payment_delay_ms = 1;
    config
}

fn shipping(values: FormValues) -> FormValues {
    values
        .with("phone", "(555) 987-6543")
        .with("address", "1 Infinite Loop")
        .with("city", "Cupertino")
        .with("state", "CA")
        .with("zipCode", "95014")
        .with("cardNumber", "4242 4242 4242 4242")
        .with("cardExpiry", "01/29")
        .with("cardCVV", "321")
}

#[tokio::test]
async fn test_register_shop_and_review_order_history() {
    let config = fast_config();
    let catalog = Catalog::demo().unwrap();
    let mut accounts = AccountStore::new(&config.auth);

    let form = FormValues::new()
        .with("name", "Grace Hopper")
        .with("email", "grace@example.com")
        .with("password", "cobol59")
        .with("confirmPassword", "cobol59");
    assert!(validate(&form, &register_rules()).is_valid);
    let session = accounts.register(Registration::from_form(&form)).unwrap();

    let mut cart = Cart::new();
    let keyboard = catalog.get(3).unwrap();
    let hub = catalog.get(5).unwrap();
    cart.add(keyboard, 1);
    cart.add(hub, 2);
    assert_eq!(cart.count(), 3);

    let expected = cart.summary(&config.pricing);
    assert!(expected.free_shipping());

    let values = shipping(checkout_form(Some(accounts.user(&session).unwrap())));
    let order = place_order(&mut cart, &values, &mut accounts, Some(&session), &config)
        .await
        .unwrap();

    assert!(cart.is_empty());
    assert_eq!(order.summary, expected);
    assert_eq!(order.shipping_address.full_name, "Grace Hopper");

    let user = accounts.user(&session).unwrap();
    assert_eq!(user.orders.len(), 1);
    assert_eq!(user.orders[0].line_count(), 2);
}

#[tokio::test]
async fn test_failed_checkout_keeps_cart() {
    let config = fast_config();
    let catalog = Catalog::demo().unwrap();
    let mut accounts = AccountStore::new(&config.auth);
    let mut cart = Cart::new();
    cart.add_one(catalog.get(1).unwrap());

    let values = shipping(checkout_form(None)).with("email", "grace@example.com");
    let err = place_order(&mut cart, &values, &mut accounts, None, &config)
        .await
        .unwrap_err();

    match err {
        CheckoutError::Invalid(result) => {
            assert_eq!(result.error_count(), 1);
            assert_eq!(result.get_error("fullName"), Some("Full Name is required"));
        }
        other => panic!("expected validation failure, got {:?}", other),
    }
    assert_eq!(cart.count(), 1);
}

#[tokio::test]
async fn test_checkout_after_account_deleted() {
    let config = fast_config();
    let catalog = Catalog::demo().unwrap();
    let mut accounts = AccountStore::new(&config.auth);

    let registration = Registration {
        name: "Grace".to_string(),
        email: "grace@example.com".to_string(),
        password: "cobol59".to_string(),
    };
    let session = accounts.register(registration).unwrap();
    let stale = accounts.login("grace@example.com", "cobol59").unwrap();
    accounts.delete_account(session).unwrap();

    let mut cart = Cart::new();
    cart.add_one(catalog.get(2).unwrap());
    let values = shipping(checkout_form(None))
        .with("fullName", "Grace")
        .with("email", "grace@example.com");

    let err = place_order(&mut cart, &values, &mut accounts, Some(&stale), &config)
        .await
        .unwrap_err();
    assert_eq!(err, CheckoutError::Auth(AuthError::SessionExpired));
    assert_eq!(cart.count(), 1);
}

#[test]
fn test_product_not_found_is_recoverable() {
    let catalog = Catalog::demo().unwrap();
    let err = catalog.get(404).unwrap_err();
    assert_eq!(err.to_string(), "Product not found");

    // Recovery path: back to the full listing
    let listing = catalog.query("", &Filters::default()).unwrap();
    assert!(!listing.is_empty());
}
