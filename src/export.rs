//! Ranking export — render ranked routes for a report or spreadsheet.
//!
//! Produces a delimited table with one row per route, ready to paste into a
//! spreadsheet or to hand to a writer that produces `.xlsx`:
//!
//! ```text
//! Ranking,Route,Total Emissions,Intermediate Nodes
//! 1,starter → X → Y → end,48.35,2
//! ```

use std::io::Write;

use chrono::{DateTime, TimeZone};
use serde::Serialize;

use crate::ranking::RankedPath;
use crate::Result;

/// Column headers, in order.
pub const COLUMNS: [&str; 4] = ["Ranking", "Route", "Total Emissions", "Intermediate Nodes"];

/// One exported row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingRow {
    pub ranking: usize,
    pub route: String,
    /// Rounded to two decimals.
    pub total_emissions: f64,
    pub intermediate_nodes: usize,
}

/// Convert ranked routes into 1-based report rows.
pub fn ranking_rows(ranked: &[RankedPath]) -> Vec<RankingRow> {
    ranked
        .iter()
        .enumerate()
        .map(|(i, r)| RankingRow {
            ranking: i + 1,
            route: r.path.route(),
            total_emissions: round2(r.total_emissions),
            intermediate_nodes: r.intermediate_count,
        })
        .collect()
}

/// Write ranked routes as a delimited table with a header row.
pub fn write_ranking_table(
    ranked: &[RankedPath],
    separator: char,
    writer: &mut dyn Write,
) -> Result<()> {
    let sep = separator.to_string();
    writeln!(writer, "{}", COLUMNS.join(sep.as_str()))?;

    for row in ranking_rows(ranked) {
        writeln!(
            writer,
            "{}{sep}{}{sep}{:.2}{sep}{}",
            row.ranking,
            quote(&row.route, separator),
            row.total_emissions,
            row.intermediate_nodes,
        )?;
    }
    Ok(())
}

/// Ranked routes as a pretty-printed JSON array of rows.
pub fn ranking_to_json(ranked: &[RankedPath]) -> Result<String> {
    Ok(serde_json::to_string_pretty(&ranking_rows(ranked))?)
}

/// Suggested export file name, stamped with `now` to the minute.
pub fn default_file_name<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("Resultados_Camaleon_PSV_{}.xlsx", now.format("%Y%m%d_%H%M"))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Quote a field if it contains the separator or a quote.
fn quote(field: &str, separator: char) -> String {
    if field.contains(separator) || field.contains('"') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Path;
    use chrono::Utc;

    fn sample() -> Vec<RankedPath> {
        vec![
            RankedPath {
                path: ["starter", "X", "Y", "end"].into_iter().collect::<Path>(),
                total_emissions: 48.349999999999994,
                intermediate_count: 2,
            },
            RankedPath {
                path: ["starter", "Z", "end"].into_iter().collect::<Path>(),
                total_emissions: 60.123,
                intermediate_count: 1,
            },
        ]
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(48.349999999999994), 48.35);
        assert_eq!(round2(60.123), 60.12);
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote("a → b", ','), "a → b");
        assert_eq!(quote("a, b", ','), "\"a, b\"");
        assert_eq!(quote("say \"hi\"", ';'), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_table_output() {
        let mut buf = Vec::new();
        write_ranking_table(&sample(), ',', &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Ranking,Route,Total Emissions,Intermediate Nodes");
        assert_eq!(lines[1], "1,starter → X → Y → end,48.35,2");
        assert_eq!(lines[2], "2,starter → Z → end,60.12,1");
    }

    #[test]
    fn test_default_file_name() {
        let now = Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 0).unwrap();
        assert_eq!(default_file_name(&now), "Resultados_Camaleon_PSV_20240307_0905.xlsx");
    }
}
