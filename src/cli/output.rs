//! Output formatting helpers for CLI commands

use crate::catalog::Category;
use crate::context::AdvisorContext;
use crate::recommend::{ComponentChoices, Recommendation};
use crate::requirements::PcRequirements;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde::Serialize;
use serde_json::{json, Value};

/// View model for one catalog
#[derive(Debug, Clone, Serialize)]
pub struct CatalogView {
    pub category: Category,
    pub rows: usize,
    /// Canonical identifiers per enumerated column
    pub columns: Vec<ColumnView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColumnView {
    pub column: String,
    pub values: Vec<String>,
}

impl CatalogView {
    pub fn collect(context: &AdvisorContext) -> Vec<CatalogView> {
        context
            .catalogs
            .row_counts()
            .into_iter()
            .map(|(category, rows)| CatalogView {
                category,
                rows,
                columns: context
                    .enumerations
                    .iter()
                    .filter(|(c, _, _)| *c == category)
                    .map(|(_, column, set)| ColumnView {
                        column: column.to_string(),
                        values: set.identifiers().map(str::to_string).collect(),
                    })
                    .collect(),
            })
            .collect()
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn format_price(price: f64) -> String {
    format!("${:.2}", price)
}

/// Format chosen components as a table with a total row
pub fn format_choices_table(choices: &ComponentChoices, fallbacks: &[Category]) -> String {
    let mut table = new_table();
    table.set_header(vec!["Category", "Index", "Name", "Price"]);

    for (category, component) in choices.iter() {
        let label = if fallbacks.contains(&category) {
            format!("{} {}", category, "(fallback)".yellow())
        } else {
            category.to_string()
        };
        table.add_row(vec![
            Cell::new(label),
            Cell::new(component.index),
            Cell::new(&component.name),
            Cell::new(format_price(component.price)),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total".bold().to_string()),
        Cell::new(""),
        Cell::new(""),
        Cell::new(format_price(choices.total_price()).green().to_string()),
    ]);

    table.to_string()
}

/// Format the full recommendation as JSON
pub fn format_recommendation_json(
    recommendation: &Recommendation,
    verbose: bool,
) -> Result<String, serde_json::Error> {
    if verbose {
        serde_json::to_string_pretty(recommendation)
    } else {
        serde_json::to_string_pretty(&recommendation.choices)
    }
}

/// Format the active constraints of each category as a table
pub fn format_requirements_table(requirements: &PcRequirements) -> Result<String, serde_json::Error> {
    let value = serde_json::to_value(requirements)?;
    let mut table = new_table();
    table.set_header(vec!["Category", "Field", "Value"]);

    for category in Category::ALL {
        match value.get(category.as_str()) {
            Some(Value::Object(fields)) => {
                let mut active = fields.iter().filter(|(_, v)| !v.is_null()).peekable();
                if active.peek().is_none() {
                    table.add_row(vec![
                        Cell::new(category),
                        Cell::new("-"),
                        Cell::new("no constraints".dimmed().to_string()),
                    ]);
                }
                for (field, v) in active {
                    table.add_row(vec![Cell::new(category), Cell::new(field), Cell::new(render(v))]);
                }
            }
            _ => {
                table.add_row(vec![
                    Cell::new(category),
                    Cell::new("-"),
                    Cell::new("not mentioned".dimmed().to_string()),
                ]);
            }
        }
    }

    Ok(table.to_string())
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(render).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}

/// Format requirements as JSON
pub fn format_requirements_json(requirements: &PcRequirements) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(requirements)
}

/// Format catalogs as a table
pub fn format_catalog_table(catalogs: &[CatalogView]) -> String {
    let mut table = new_table();
    table.set_header(vec!["Category", "Rows", "Column", "Canonical values"]);

    for view in catalogs {
        let rows = if view.rows == 0 {
            "0".red().to_string()
        } else {
            view.rows.to_string().green().to_string()
        };

        if view.columns.is_empty() {
            table.add_row(vec![Cell::new(view.category), Cell::new(rows), Cell::new("-"), Cell::new("-")]);
            continue;
        }
        for (i, column) in view.columns.iter().enumerate() {
            let (category, count) = if i == 0 {
                (view.category.to_string(), rows.clone())
            } else {
                (String::new(), String::new())
            };
            table.add_row(vec![
                Cell::new(category),
                Cell::new(count),
                Cell::new(&column.column),
                Cell::new(column.values.join(", ")),
            ]);
        }
    }

    table.to_string()
}

/// Format catalogs as JSON
pub fn format_catalog_json(catalogs: &[CatalogView]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({ "catalogs": catalogs }))
}
