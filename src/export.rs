use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::evaluation::{EvaluationReport, covers_events, hallucinated_names};
use crate::process::ProcessedMatchRecord;

pub fn export_evaluation(
    path: &Path,
    report: &EvaluationReport,
    entries: &[ProcessedMatchRecord],
) -> Result<()> {
    let metrics_rows = metrics_rows(report);
    let match_rows = match_rows(entries);

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Metrics")?;
        write_rows(sheet, &metrics_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Matches")?;
        write_rows(sheet, &match_rows)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("save evaluation workbook {}", path.display()))?;
    Ok(())
}

fn metrics_rows(report: &EvaluationReport) -> Vec<Vec<String>> {
    vec![
        vec!["Metric".to_string(), "Value".to_string()],
        vec!["Entries".to_string(), report.entries.to_string()],
        vec!["ROUGE-1".to_string(), format!("{:.4}", report.rouge.rouge1)],
        vec!["ROUGE-2".to_string(), format!("{:.4}", report.rouge.rouge2)],
        vec!["ROUGE-L".to_string(), format!("{:.4}", report.rouge.rouge_l)],
        vec![
            "Event coverage".to_string(),
            format!("{:.4}", report.event_coverage),
        ],
        vec![
            "Hallucination rate".to_string(),
            format!("{:.4}", report.hallucination_rate),
        ],
        vec!["Generated at".to_string(), report.generated_at.clone()],
    ]
}

fn match_rows(entries: &[ProcessedMatchRecord]) -> Vec<Vec<String>> {
    let mut rows = vec![vec![
        "Match".to_string(),
        "Type".to_string(),
        "Key Players".to_string(),
        "Injuries".to_string(),
        "Events".to_string(),
        "Covers Events".to_string(),
        "Hallucinated Names".to_string(),
        "Summary".to_string(),
    ]];

    for entry in entries {
        rows.push(vec![
            entry.match_label.clone(),
            entry.match_type.clone(),
            entry.key_players.join(", "),
            entry.injuries.len().to_string(),
            entry.events.len().to_string(),
            if covers_events(entry) { "yes" } else { "no" }.to_string(),
            hallucinated_names(entry).join(", "),
            entry.hybrid_summary.clone(),
        ]);
    }
    rows
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
