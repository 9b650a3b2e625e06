use super::{money, Context};
use accessflow::{
    checkout_form, place_order, AccountStore, Cart, CheckoutError, OrderSummary, Registration,
    Session,
};
use accessflow_forms::{
    checkout_rules, login_rules, register_rules, validate, FormValues, RuleSet, ValidationResult,
};
use anyhow::{Context as _, Result};
use colored::Colorize;

/// How the shopper identifies themselves for this checkout
pub enum SignIn {
    Guest,
    Login {
        email: String,
        password: String,
    },
    Register {
        name: String,
        email: String,
        password: String,
    },
}

impl SignIn {
    pub fn from_args(email: Option<String>, password: Option<String>, name: Option<String>) -> Self {
        match (email, password, name) {
            (Some(email), Some(password), Some(name)) => SignIn::Register {
                name,
                email,
                password,
            },
            (Some(email), Some(password), None) => SignIn::Login { email, password },
            _ => SignIn::Guest,
        }
    }

    /// The form this sign-in submits and its rules; guests submit nothing
    pub fn form(&self) -> Option<(RuleSet, FormValues)> {
        match self {
            SignIn::Guest => None,
            SignIn::Login { email, password } => Some((
                login_rules(),
                FormValues::new()
                    .with("email", email.as_str())
                    .with("password", password.as_str()),
            )),
            SignIn::Register {
                name,
                email,
                password,
            } => Some((
                register_rules(),
                FormValues::new()
                    .with("name", name.as_str())
                    .with("email", email.as_str())
                    .with("password", password.as_str())
                    .with("confirmPassword", password.as_str()),
            )),
        }
    }
}

fn print_field_errors(rules: &RuleSet, result: &ValidationResult) {
    for (name, rule) in rules.iter() {
        if let Some(message) = result.get_error(name) {
            println!("  {:<18} {}", rule.display_label(name).bold(), message);
        }
    }
}

fn print_summary(summary: &OrderSummary) {
    println!("  {:<10} {:>10}", "Subtotal", money(summary.subtotal));
    let shipping = if summary.free_shipping() {
        "FREE".green().to_string()
    } else {
        money(summary.shipping)
    };
    println!("  {:<10} {:>10}", "Shipping", shipping);
    println!("  {:<10} {:>10}", "Tax", money(summary.tax));
    println!("  {:<10} {:>10}", "Total".bold(), money(summary.total).bold());
}

/// Validate the sign-in form, then log in or register
fn open_session(accounts: &mut AccountStore, sign_in: SignIn) -> Result<Option<Session>> {
    let Some((rules, values)) = sign_in.form() else {
        return Ok(None);
    };

    let result = validate(&values, &rules);
    if !result.is_valid {
        println!("{}", "✗ Sign-in details are invalid".red().bold());
        print_field_errors(&rules, &result);
        anyhow::bail!("Sign-in form has {} error(s)", result.error_count());
    }

    let session = match sign_in {
        SignIn::Guest => return Ok(None),
        SignIn::Login { email, password } => accounts.login(&email, &password)?,
        SignIn::Register { .. } => accounts.register(Registration::from_form(&values))?,
    };
    Ok(Some(session))
}

pub fn execute(
    ctx: &Context,
    items: &[(u32, u32)],
    fields: Vec<(String, String)>,
    sign_in: SignIn,
) -> Result<()> {
    let mut accounts = AccountStore::new(&ctx.config.auth);
    let session = open_session(&mut accounts, sign_in)?;

    let mut cart = Cart::new();
    for &(id, quantity) in items {
        let product = ctx
            .catalog
            .get(id)
            .with_context(|| format!("Cannot add product {} to the cart", id))?;
        cart.add(product, quantity);
        if cart.line(id).is_some_and(|line| line.quantity > product.stock) {
            println!(
                "{}",
                format!("⚠ Only {} of '{}' in stock", product.stock, product.name).yellow()
            );
        }
    }

    println!("{}", "Order Summary".bold());
    for line in cart.lines() {
        println!(
            "  {:<28} x{:<3} {:>10}",
            line.product.name,
            line.quantity,
            money(line.line_total())
        );
    }
    println!();
    print_summary(&cart.summary(&ctx.config.pricing));
    println!();

    let user = session.as_ref().map(|s| accounts.user(s)).transpose()?;
    let mut values = checkout_form(user);
    for (name, value) in fields {
        values.set(name, value);
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("Failed to start checkout runtime")?;

    println!("{}", "Processing...".dimmed());
    let outcome = runtime.block_on(place_order(
        &mut cart,
        &values,
        &mut accounts,
        session.as_ref(),
        &ctx.config,
    ));

    let result = match outcome {
        Ok(order) => {
            println!("{}", "Order Placed Successfully!".green().bold());
            println!("Order #{}", order.id);
            println!(
                "Shipping to {}, {}, {} {}",
                order.shipping_address.full_name,
                order.shipping_address.city,
                order.shipping_address.state,
                order.shipping_address.zip_code
            );
            Ok(())
        }
        Err(CheckoutError::Invalid(result)) => {
            println!("{}", "✗ Please correct the following fields".red().bold());
            print_field_errors(&checkout_rules(), &result);
            Err(anyhow::anyhow!(
                "Checkout form has {} error(s)",
                result.error_count()
            ))
        }
        Err(err) => Err(err.into()),
    };

    if let Some(session) = session {
        let orders = accounts.user(&session).map(|u| u.orders.len()).unwrap_or(0);
        println!("Orders on this account: {}", orders);
        accounts.logout(session);
    }

    result
}
