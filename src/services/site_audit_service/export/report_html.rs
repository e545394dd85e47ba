use crate::models::lighthouse::{AuditReport, ChecklistItem};

/// Top actions shown in the exported document. The report itself carries up to ten.
pub const EXPORTED_ACTIONS: usize = 5;

const STYLE: &str = "
    body { font-family: Arial, sans-serif; color: #111; }
    .cover { padding: 40px; border-bottom: 1px solid #ddd; }
    .title { font-size: 24px; font-weight: 700; }
    .meta { color: #555; margin-top: 4px; }
    .scores { display: grid; grid-template-columns: repeat(2, 1fr); gap: 8px; margin-top: 20px; }
    .card { border: 1px solid #ddd; padding: 10px; }
    .section { margin-top: 24px; }
    .item { border: 1px solid #ddd; padding: 10px; margin-top: 8px; }
    .small { font-size: 12px; color: #555; }";

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Printable, self-contained HTML document for a finished report: a cover with the
/// scores, the first five top actions, then the full checklist.
pub fn render_report_html(report: &AuditReport) -> String {
    let scores = &report.category_scores;
    let top_actions: String = report
        .top_actions
        .iter()
        .take(EXPORTED_ACTIONS)
        .map(|item| render_item(item, false))
        .collect();
    let checklist: String = report
        .checklist
        .iter()
        .map(|item| render_item(item, true))
        .collect();

    format!(
        "<!doctype html>
<html>
<head>
  <meta charset=\"utf-8\" />
  <title>SEO QuickAudit Report</title>
  <style>{}
  </style>
</head>
<body>
  <div class=\"cover\">
    <div class=\"title\">SEO QuickAudit</div>
    <div class=\"meta\">{}</div>
    <div class=\"meta\">{}</div>
    <div class=\"section\">
      <div>Global score: {}</div>
      <div class=\"scores\">
        <div class=\"card\">Performance: {}</div>
        <div class=\"card\">Accessibility: {}</div>
        <div class=\"card\">Best Practices: {}</div>
        <div class=\"card\">SEO: {}</div>
      </div>
    </div>
  </div>
  <div class=\"section\" style=\"padding: 20px;\">
    <div class=\"title\" style=\"font-size:18px;\">Top actions</div>
    {}
    <div class=\"title\" style=\"font-size:18px; margin-top:20px;\">Checklist</div>
    {}
  </div>
</body>
</html>",
        STYLE,
        escape_html(&report.url),
        report.date.format("%Y-%m-%d %H:%M UTC"),
        report.global_score,
        scores.performance,
        scores.accessibility,
        scores.best_practices,
        scores.seo,
        top_actions,
        checklist,
    )
}

fn render_item(item: &ChecklistItem, with_severity: bool) -> String {
    let severity = if with_severity {
        format!(" <span class=\"small\">({})</span>", item.severity)
    } else {
        String::new()
    };
    format!(
        "<div class=\"item\"><div><b>{}</b>{}</div><div class=\"small\">{}</div><div class=\"small\">Fix: {}</div></div>",
        escape_html(&item.message),
        severity,
        escape_html(&item.explanation),
        escape_html(&item.fix),
    )
}
