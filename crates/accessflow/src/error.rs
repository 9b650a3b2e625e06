// File: src/error.rs
// Purpose: Domain errors surfaced to the storefront as a single top-level message

use accessflow_forms::ValidationResult;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Product not found")]
    ProductNotFound(u32),

    #[error("price range {index} is out of bounds ({len} ranges defined)")]
    PriceRangeOutOfBounds { index: usize, len: usize },

    #[error("duplicate product id {0} in catalog")]
    DuplicateProductId(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("An account with this email already exists")]
    EmailTaken,

    #[error("Your session has expired, please sign in again")]
    SessionExpired,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("Your cart is empty. Add items before checking out.")]
    EmptyCart,

    /// Field errors to show inline; submission must not proceed
    #[error("Please correct the highlighted fields")]
    Invalid(ValidationResult),

    #[error("Payment processing was interrupted")]
    PaymentInterrupted,

    #[error(transparent)]
    Auth(#[from] AuthError),
}
