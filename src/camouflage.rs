//! Camouflage templates shown in place of the reader.
//!
//! Content is generated from fixed formulas so the disguise looks the same
//! every time it is raised.

use chrono::{Duration, NaiveDate};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CamouflageTemplate {
    #[default]
    Spreadsheet,
    CodeEditor,
}

impl CamouflageTemplate {
    pub const ALL: [CamouflageTemplate; 2] =
        [CamouflageTemplate::Spreadsheet, CamouflageTemplate::CodeEditor];

    pub fn key(self) -> &'static str {
        match self {
            CamouflageTemplate::Spreadsheet => "spreadsheet",
            CamouflageTemplate::CodeEditor => "code-editor",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            CamouflageTemplate::Spreadsheet => "Spreadsheet",
            CamouflageTemplate::CodeEditor => "Code Editor",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            CamouflageTemplate::Spreadsheet => "Quarterly sales workbook",
            CamouflageTemplate::CodeEditor => "Source file in an editor",
        }
    }

    /// Window title shown while disguised.
    pub fn window_title(self) -> &'static str {
        match self {
            CamouflageTemplate::Spreadsheet => "Sales_Report_Q1.xlsx - Spreadsheet",
            CamouflageTemplate::CodeEditor => "report_service.rs - Editor",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|template| template.key() == key)
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for CamouflageTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

pub const SHEET_COLUMNS: [&str; 6] = ["Date", "Product", "Sales", "Cost", "Profit", "Growth"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    pub date: String,
    pub product: String,
    pub sales: String,
    pub cost: String,
    pub profit: String,
    pub growth: String,
}

impl SheetRow {
    pub fn cells(&self) -> [&str; 6] {
        [
            self.date.as_str(),
            self.product.as_str(),
            self.sales.as_str(),
            self.cost.as_str(),
            self.profit.as_str(),
            self.growth.as_str(),
        ]
    }
}

pub fn sample_rows(count: usize) -> Vec<SheetRow> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default();
    let products = ["Product A", "Product B", "Product C", "Product D", "Product E"];
    (0..count)
        .map(|i| {
            let sales = 78_500 + ((i * 37_300) % 97_000) as u64;
            let cost = sales * 62 / 100;
            let profit = sales - cost;
            // Basis points, mostly positive with the occasional dip.
            let growth = ((i * 733) % 1800) as i64 - 300;
            let date = start + Duration::days(i as i64);
            SheetRow {
                date: date.format("%Y-%m-%d").to_string(),
                product: products[(i * 3 + i / 5) % products.len()].to_string(),
                sales: money(sales),
                cost: money(cost),
                profit: money(profit),
                growth: format!("{:+.1}%", growth as f64 / 100.0),
            }
        })
        .collect()
}

fn money(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

const CODE_LINES: &[&str] = &[
    "use std::collections::HashMap;",
    "",
    "pub struct ReportService {",
    "    cache: HashMap<String, Summary>,",
    "}",
    "",
    "#[derive(Debug, Clone, Default)]",
    "pub struct Summary {",
    "    pub revenue: u64,",
    "    pub cost: u64,",
    "}",
    "",
    "impl ReportService {",
    "    pub fn new() -> Self {",
    "        Self { cache: HashMap::new() }",
    "    }",
    "",
    "    pub fn quarterly(&mut self, region: &str) -> &Summary {",
    "        self.cache",
    "            .entry(region.to_string())",
    "            .or_insert_with(|| Summary::default())",
    "    }",
    "",
    "    pub fn margin(summary: &Summary) -> f64 {",
    "        if summary.revenue == 0 {",
    "            return 0.0;",
    "        }",
    "        (summary.revenue - summary.cost) as f64 / summary.revenue as f64",
    "    }",
    "}",
];

/// Source listing with 1-based line numbers.
pub fn sample_code() -> Vec<(usize, &'static str)> {
    CODE_LINES
        .iter()
        .enumerate()
        .map(|(idx, line)| (idx + 1, *line))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_cycles_through_templates() {
        let first = CamouflageTemplate::default();
        assert_eq!(first.next(), CamouflageTemplate::CodeEditor);
        assert_eq!(first.next().next(), first);
        assert_eq!(
            CamouflageTemplate::from_key("code-editor"),
            Some(CamouflageTemplate::CodeEditor)
        );
    }

    #[test]
    fn sample_rows_are_stable() {
        let rows = sample_rows(15);
        assert_eq!(rows.len(), 15);
        assert_eq!(rows, sample_rows(15));
        assert_eq!(rows[0].date, "2024-01-01");
        assert_eq!(rows[14].date, "2024-01-15");
        assert!(rows.iter().all(|r| r.sales.starts_with('$')));
    }

    #[test]
    fn money_groups_thousands() {
        assert_eq!(money(125_000), "$125,000");
        assert_eq!(money(999), "$999");
        assert_eq!(money(1_234_567), "$1,234,567");
    }

    #[test]
    fn code_listing_is_numbered() {
        let code = sample_code();
        assert_eq!(code[0].0, 1);
        assert_eq!(code.len(), CODE_LINES.len());
    }
}
