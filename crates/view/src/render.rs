use std::fmt::Write;

use shopfront_core::domain::product::Product;

use crate::view::{ViewPhase, ViewState};

const HEADERS: [&str; 5] = ["ID", "NAME", "DESCRIPTION", "PRICE", "STOCK"];

pub fn render(state: &ViewState) -> String {
    let mut out = String::new();

    match state.phase() {
        ViewPhase::Loading => out.push_str("Loading products...\n"),
        ViewPhase::Failed => {
            if let Some(message) = &state.error {
                let _ = writeln!(out, "Error: {message}");
            }
            if !state.products.is_empty() {
                out.push('\n');
                out.push_str(&render_table(&state.products));
            }
        }
        ViewPhase::Loaded if state.products.is_empty() => out.push_str("No products available.\n"),
        ViewPhase::Loaded => out.push_str(&render_table(&state.products)),
    }

    out
}

pub fn render_product(product: &Product) -> String {
    render_table(std::slice::from_ref(product))
}

fn render_table(products: &[Product]) -> String {
    let rows: Vec<[String; 5]> = products
        .iter()
        .map(|product| {
            [
                product.id.to_string(),
                product.name.clone(),
                product.description.clone(),
                format!("${:.2}", product.price),
                product.stock.to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(String::from), &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let line = cells
        .iter()
        .zip(widths.iter())
        .enumerate()
        .map(|(column, (cell, &width))| {
            // price and stock are right-aligned
            if column >= 3 {
                format!("{cell:>width$}")
            } else {
                format!("{cell:<width$}")
            }
        })
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}
