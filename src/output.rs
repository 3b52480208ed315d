use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::labels::{LabelEvaluation, LabelPlan};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelReport {
    pub review_unit: String,
    pub generated_at: DateTime<Utc>,
    pub changed_files: usize,
    pub evaluation: LabelEvaluation,
    /// Present when the run applied (or dry-ran) label changes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<LabelPlan>,
}

pub fn create_report(review_unit: &str, changed_files: usize, evaluation: LabelEvaluation) -> LabelReport {
    LabelReport {
        review_unit: review_unit.to_string(),
        generated_at: Utc::now(),
        changed_files,
        evaluation,
        plan: None,
    }
}

pub fn format_table_output(report: &LabelReport, verbose: bool) -> String {
    let mut output = String::new();

    let total = report.evaluation.to_consider.len();
    let matched = report.evaluation.to_add.len();

    output.push_str(&format!(
        "🏷️  Label Summary: {} ({} labels, {} changed files)\n",
        report.review_unit, total, report.changed_files
    ));
    output.push_str(&format!("✅ {} matched  ⏭️  {} not matched\n\n", matched, total - matched));

    let rows: Vec<(&String, bool)> = report
        .evaluation
        .to_consider
        .iter()
        .map(|(label, matched)| (label, *matched))
        .filter(|(_, matched)| verbose || *matched)
        .collect();

    if rows.is_empty() {
        output.push_str("No labels matched.\n");
    } else {
        output.push_str(&format_label_table(&rows));
    }

    if !verbose && total > matched {
        output.push_str(&format!("\n💡 Run with --verbose to see all {} labels\n", total));
    }

    if let Some(plan) = &report.plan {
        output.push('\n');
        output.push_str(&format_plan(plan));
    }

    output
}

fn format_label_table(rows: &[(&String, bool)]) -> String {
    let mut output = String::new();

    output.push_str("┌──────────────────────────┬─────────────┐\n");
    output.push_str("│ Label                    │ Status      │\n");
    output.push_str("├──────────────────────────┼─────────────┤\n");

    for (label, matched) in rows {
        let status = if *matched { "✅ matched" } else { "– skipped" };
        output.push_str(&format!("│ {:<24} │ {:<11} │\n", truncate(label, 24), status));
    }

    output.push_str("└──────────────────────────┴─────────────┘\n");
    output
}

fn format_plan(plan: &LabelPlan) -> String {
    if plan.is_empty() {
        return "Labels already up to date\n".to_string();
    }

    let mut output = String::new();
    if !plan.add.is_empty() {
        output.push_str(&format!("➕ Add: {}\n", plan.add.join(", ")));
    }
    if !plan.remove.is_empty() {
        output.push_str(&format!("➖ Remove: {}\n", plan.remove.join(", ")));
    }
    output.push_str(&format!("🏷️  Labels: {}\n", plan.all.join(", ")));
    output
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len - 1).collect();
        format!("{}…", kept)
    }
}
