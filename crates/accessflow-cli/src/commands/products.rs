use super::{money, Context};
use accessflow::{Filters, Product, SortBy, StockStatus};
use anyhow::Result;
use colored::Colorize;

fn stock_badge(product: &Product) -> String {
    match product.stock_status() {
        StockStatus::InStock => String::new(),
        StockStatus::LowStock(n) => format!("Only {} left", n).yellow().to_string(),
        StockStatus::OutOfStock => "Out of stock".red().to_string(),
    }
}

fn stars(rating: f64) -> String {
    "★".repeat(rating.floor().clamp(0.0, 5.0) as usize)
}

pub fn list(
    ctx: &Context,
    search: &str,
    category: String,
    price_range_index: usize,
    sort: &str,
) -> Result<()> {
    let sort_by = SortBy::from_key(sort);
    if sort_by.is_none() {
        println!(
            "{}",
            format!("⚠ Unknown sort key '{}', keeping catalog order", sort).yellow()
        );
    }

    let filters = Filters {
        category,
        price_range_index,
        sort_by,
    };
    let products = ctx.catalog.query(search, &filters)?;

    let noun = if products.len() == 1 { "product" } else { "products" };
    println!("{}", format!("{} {} found", products.len(), noun).bold());
    println!();

    if products.is_empty() {
        println!("No products found matching your criteria.");
        println!(
            "Reset filters with: {}",
            "accessflow products".cyan()
        );
        return Ok(());
    }

    for product in &products {
        println!(
            "{:>4}  {:<28} {:<12} {:>9}  {:<5} {:.1}  {}",
            product.id,
            product.name,
            product.category.dimmed(),
            money(product.price).green(),
            stars(product.rating),
            product.rating,
            stock_badge(product)
        );
    }

    Ok(())
}

pub fn show(ctx: &Context, id: u32) {
    let product = match ctx.catalog.get(id) {
        Ok(product) => product,
        Err(err) => {
            println!("{}", err.to_string().red().bold());
            println!("Back to products: {}", "accessflow products".cyan());
            return;
        }
    };

    println!("{}", product.name.bold());
    println!("{}", product.category.dimmed());
    println!();
    println!("{} {:.1}", stars(product.rating), product.rating);
    println!("{}", money(product.price).green().bold());
    println!();
    println!("{}", product.description);
    println!();
    match product.stock_status() {
        StockStatus::OutOfStock => println!("{}", "Out of stock".red()),
        _ => println!("{}", format!("In stock ({} available)", product.stock).green()),
    }

    let threshold = ctx.config.pricing.free_shipping_threshold;
    println!();
    println!("Free shipping on orders over {}", money(threshold));
}

pub fn filters(ctx: &Context) {
    println!("{}", "Categories".bold());
    for category in ctx.catalog.categories() {
        println!("  {}", category);
    }

    println!();
    println!("{}", "Price ranges".bold());
    for (index, range) in ctx.catalog.price_ranges().iter().enumerate() {
        println!("  {:>2}  {}", index, range.label);
    }

    println!();
    println!("{}", "Sort keys".bold());
    for sort in SortBy::ALL {
        println!("  {:<12} {}", sort.key().cyan(), sort.label());
    }
}
