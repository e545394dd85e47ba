use crate::models::lighthouse::{AuditReport, CategoryScores, ChecklistItem, Severity};
use chrono::Utc;
use std::cmp::Reverse;
use std::collections::HashSet;

pub const CRITICAL_MULTIPLIER: f64 = 1.2;
pub const INFO_BONUS: f64 = 0.5;
pub const MAX_BONUS: f64 = 10.0;
pub const TOP_ACTIONS: usize = 10;

fn done_set(tasks_done: &[String]) -> HashSet<&str> {
    tasks_done.iter().map(String::as_str).collect()
}

/// Mean of the four category scores, minus outstanding penalties, plus a capped info bonus.
pub fn compute_global_score(
    categories: &CategoryScores,
    checklist: &[ChecklistItem],
    tasks_done: &[String],
) -> u8 {
    let done = done_set(tasks_done);
    let base = categories.mean();
    let mut penalty = 0.0;
    let mut bonus = 0.0;

    for item in checklist.iter().filter(|i| !done.contains(i.id.as_str())) {
        let impact = item.impact() as f64;
        match item.severity {
            Severity::Critical => penalty += impact * CRITICAL_MULTIPLIER,
            Severity::Warning => penalty += impact,
            Severity::Info => bonus += INFO_BONUS,
        }
    }

    (base - penalty + f64::min(bonus, MAX_BONUS))
        .round()
        .clamp(0.0, 100.0) as u8
}

/// Outstanding items, highest priority weight first, at most [`TOP_ACTIONS`].
///
/// The sort is stable, so equal weights keep checklist order.
pub fn prioritize(checklist: &[ChecklistItem], tasks_done: &[String]) -> Vec<ChecklistItem> {
    let done = done_set(tasks_done);
    let mut items: Vec<&ChecklistItem> = checklist
        .iter()
        .filter(|i| !done.contains(i.id.as_str()))
        .collect();

    items.sort_by_key(|i| Reverse(i.priority_weight()));
    items.into_iter().take(TOP_ACTIONS).cloned().collect()
}

pub fn build_report(
    url: &str,
    categories: CategoryScores,
    checklist: Vec<ChecklistItem>,
    tasks_done: &[String],
) -> AuditReport {
    let global_score = compute_global_score(&categories, &checklist, tasks_done);
    let top_actions = prioritize(&checklist, tasks_done);

    AuditReport {
        id: None,
        url: url.to_string(),
        date: Utc::now(),
        global_score,
        category_scores: categories,
        checklist,
        top_actions,
    }
}
