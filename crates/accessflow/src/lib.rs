// AccessFlow - storefront core
// Catalog queries, cart, mock accounts and checkout over in-memory data

pub mod account;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;

// Re-export core types
pub use account::{AccountStore, ProfileUpdate, Registration, Session, User};
pub use cart::{Cart, CartLine, OrderSummary};
pub use catalog::{query, Catalog, Filters, PriceRange, Product, SortBy, StockStatus, ALL_CATEGORIES};
pub use checkout::{
    begin_checkout, checkout_form, complete_checkout, place_order, Order, PaymentTask,
    ShippingAddress,
};
pub use config::{AuthConfig, CatalogConfig, CheckoutConfig, PricingConfig, StoreConfig};
pub use error::{AuthError, CatalogError, CheckoutError};

// Re-export the validation engine used by every form
pub use accessflow_forms as forms;
