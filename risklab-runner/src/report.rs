//! Result export — JSON reports and CSV trade tapes.

use std::path::Path;

use anyhow::{Context, Result};

use risklab_core::domain::Trade;
use risklab_core::engine::BacktestReport;

/// Serialize a full report to pretty JSON.
pub fn export_json(report: &BacktestReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize report to JSON")
}

/// Write a full report as pretty JSON to `path`.
pub fn write_report_json(path: impl AsRef<Path>, report: &BacktestReport) -> Result<()> {
    let json = export_json(report)?;
    std::fs::write(path.as_ref(), json)
        .with_context(|| format!("failed to write {}", path.as_ref().display()))
}

/// Export the trade tape as CSV.
///
/// Columns: position_id, side, entry_bar, entry_time, entry_price, quantity,
/// stop_loss, take_profit, trailing_stop, exit_time, exit_price, exit_reason,
/// pnl, pnl_pct
pub fn export_trades_csv(trades: &[Trade]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "position_id",
        "side",
        "entry_bar",
        "entry_time",
        "entry_price",
        "quantity",
        "stop_loss",
        "take_profit",
        "trailing_stop",
        "exit_time",
        "exit_price",
        "exit_reason",
        "pnl",
        "pnl_pct",
    ])
    .context("failed to write CSV header")?;

    for trade in trades {
        wtr.write_record([
            trade.position_id.to_string(),
            format!("{:?}", trade.side),
            trade.entry_bar.to_string(),
            trade.entry_time.to_rfc3339(),
            format!("{:.6}", trade.entry_price),
            format!("{:.6}", trade.quantity),
            format!("{:.6}", trade.stop_loss),
            format!("{:.6}", trade.take_profit),
            format!("{:.6}", trade.trailing_stop),
            trade.exit_time.to_rfc3339(),
            format!("{:.6}", trade.exit_price),
            trade.exit_reason.to_string(),
            format!("{:.6}", trade.pnl),
            format!("{:.4}", trade.pnl_pct),
        ])
        .context("failed to write CSV row")?;
    }

    let bytes = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(bytes).context("CSV output was not valid UTF-8")
}

/// Write the trade tape as CSV to `path`.
pub fn write_trades_csv(path: impl AsRef<Path>, trades: &[Trade]) -> Result<()> {
    let csv = export_trades_csv(trades)?;
    std::fs::write(path.as_ref(), csv)
        .with_context(|| format!("failed to write {}", path.as_ref().display()))
}
