//! Layout command - print the header layout for a range of scroll offsets

use anyhow::Result;
use clap::ValueEnum;
use comfy_table::Table;

use super::load_config;
use crate::output::{create_table, format_px};
use pocketbank_core::{CardPresentation, CardStatus, CardVisualState, OperationResult};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Loading,
    Ready,
    Failed,
}

impl From<StatusArg> for CardStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Loading => CardStatus::Loading,
            StatusArg::Ready => CardStatus::Ready,
            StatusArg::Failed => CardStatus::Failed,
        }
    }
}

#[derive(serde::Serialize)]
struct LayoutRow {
    offset: f64,
    style: CardVisualState,
}

/// One row per offset: header sizes, translations and opacities
pub fn style_table(rows: &[(f64, CardVisualState)]) -> Table {
    let mut table = create_table();
    table.set_header(vec![
        "Offset", "Container", "Card", "Card x/y", "Font", "Label", "Menu", "Credit card", "Actions",
    ]);

    for (offset, style) in rows {
        let card = style.balance_card;
        let credit = style
            .credit_card
            .map(|c| format!("{}×{}", format_px(c.card.width), format_px(c.card.height)))
            .unwrap_or_else(|| "-".to_string());
        let actions = style
            .actions
            .map(|a| format!("α {:.2}", a.opacity))
            .unwrap_or_else(|| "-".to_string());

        table.add_row(vec![
            format_px(*offset),
            format_px(style.container_height),
            format!("{}×{}", format_px(card.width), format_px(card.height)),
            format!("{}, {}", format_px(card.translate_x), format_px(card.translate_y)),
            format_px(style.balance_font_size),
            format!("{:.2}", style.balance_label_opacity),
            format!("{:.2}", style.menu_icon_opacity),
            credit,
            actions,
        ]);
    }
    table
}

pub fn run(offsets: Vec<f64>, status: StatusArg, width: Option<f64>, json: bool) -> Result<()> {
    let screen_width = match width {
        Some(w) if w.is_finite() && w > 0.0 => w,
        Some(w) => anyhow::bail!("Invalid screen width: {}", w),
        None => load_config()?.screen_width,
    };
    let presentation = CardPresentation::new(screen_width);
    let status = CardStatus::from(status);

    let rows: Vec<(f64, CardVisualState)> = offsets
        .iter()
        .map(|&offset| (offset, presentation.style(offset, status)))
        .collect();

    if json {
        let data: Vec<LayoutRow> = rows
            .iter()
            .map(|&(offset, style)| LayoutRow { offset, style })
            .collect();
        let result = OperationResult::ok(data)
            .with_context("screenWidth", serde_json::json!(screen_width))
            .with_context("status", serde_json::to_value(status)?);
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("Screen width {} · card {:?}", format_px(screen_width), status);
    println!("{}", style_table(&rows));
    Ok(())
}
