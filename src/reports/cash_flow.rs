//! Monthly cash summary
//!
//! Totals the cash book for one month: inflow, outflow and the resulting
//! balance, plus the month's entries in date order.

use std::io::Write;

use crate::dates::{self, YearMonth};
use crate::error::AdminResult;
use crate::models::{CashEntry, CashKind, Money};

/// Cash totals for one month
#[derive(Debug, Clone)]
pub struct CashSummary {
    pub month: YearMonth,
    pub inflow: Money,
    pub outflow: Money,
    /// Inflow minus outflow
    pub balance: Money,
    /// The month's entries sorted by date (stable for equal dates)
    pub entries: Vec<CashEntry>,
}

impl CashSummary {
    pub fn generate(entries: &[CashEntry], month: YearMonth) -> Self {
        let mut selected: Vec<CashEntry> = entries
            .iter()
            .filter(|e| month.contains(e.date))
            .cloned()
            .collect();
        selected.sort_by_key(|e| e.date);

        let total = |kind: CashKind| -> Money {
            selected
                .iter()
                .filter(|e| e.kind == kind)
                .map(|e| e.amount)
                .sum()
        };
        let inflow = total(CashKind::Inflow);
        let outflow = total(CashKind::Outflow);

        Self {
            month,
            inflow,
            outflow,
            balance: inflow - outflow,
            entries: selected,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Cash Summary - {}\n", self.month));
        output.push_str(&"=".repeat(50));
        output.push('\n');
        output.push_str(&format!(
            "Total inflow:  {:>15}\n",
            self.inflow.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "Total outflow: {:>15}\n",
            self.outflow.format_with_symbol(currency)
        ));
        output.push_str(&"-".repeat(31));
        output.push('\n');
        output.push_str(&format!(
            "Balance:       {:>15}\n",
            self.balance.format_with_symbol(currency)
        ));
        output.push('\n');

        if self.entries.is_empty() {
            output.push_str("No cash entries this month.\n");
            return output;
        }

        for entry in &self.entries {
            output.push_str(&format!(
                "{:<12} {:<8} {:>12}  {}\n",
                dates::format(entry.date),
                entry.kind,
                entry.amount,
                entry.id
            ));
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> AdminResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["Date", "Kind", "Amount"])?;
        for entry in &self.entries {
            csv.write_record([
                dates::format(entry.date),
                entry.kind.to_string(),
                entry.amount.to_string(),
            ])?;
        }
        csv.write_record(["", "TOTAL INFLOW", self.inflow.to_string().as_str()])?;
        csv.write_record(["", "TOTAL OUTFLOW", self.outflow.to_string().as_str()])?;
        csv.write_record(["", "BALANCE", self.balance.to_string().as_str()])?;
        csv.flush()?;
        Ok(())
    }
}
