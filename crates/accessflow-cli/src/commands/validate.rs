use super::form_values;
use accessflow_forms::{validate, FormKind};
use anyhow::Result;
use colored::Colorize;

pub fn execute(form: FormKind, fields: Vec<(String, String)>) -> Result<()> {
    let rules = form.rules();

    for (name, _) in fields.iter().filter(|(name, _)| !rules.contains(name)) {
        println!(
            "{}",
            format!("⚠ '{}' is not part of the {} form and is ignored", name, form).yellow()
        );
    }

    let result = validate(&form_values(fields), &rules);
    if result.is_valid {
        println!("{}", format!("✓ {} form is valid", form).green().bold());
        return Ok(());
    }

    println!(
        "{}",
        format!("✗ {} form has {} error(s)", form, result.error_count())
            .red()
            .bold()
    );
    println!();
    // Report in form order rather than map order
    for (name, rule) in rules.iter() {
        if let Some(message) = result.get_error(name) {
            println!("  {:<18} {}", rule.display_label(name).bold(), message);
        }
    }

    anyhow::bail!("{} form has {} error(s)", form, result.error_count())
}
