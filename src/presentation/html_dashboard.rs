//! Static HTML rendering of an assessment run.
//!
//! The page has no JavaScript: a global summary block, one card per assessed
//! location with its 24-hour risk strip and forecast table, and a list of
//! locations excluded from the run.

use crate::application::assessment_service::AssessmentRun;
use crate::domain::assessment::LocationAssessment;

const STYLE: &str = r#"
    body { font-family: Arial, sans-serif; background: #f4f4f4; padding: 20px; }
    h1 { text-align: center; margin-bottom: 10px; }
    h2 { margin-top: 0; }
    .summary-block { background: #ffffff; border-radius: 10px; padding: 20px;
      box-shadow: 0 2px 6px rgba(0,0,0,0.1); margin-bottom: 25px; }
    .summary-title { font-size: 18px; font-weight: bold; margin-bottom: 8px; }
    .summary-line { margin: 4px 0; }
    .grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(420px, 1fr));
      gap: 20px; }
    .card { background: white; padding: 20px; border-radius: 10px;
      box-shadow: 0 2px 6px rgba(0,0,0,0.1); }
    .risk { font-weight: bold; padding: 6px 10px; border-radius: 4px; color: white;
      display: inline-block; margin-top: 10px; }
    .strip { display: flex; gap: 2px; margin: 10px 0; }
    .strip div { width: 12px; height: 12px; border-radius: 2px; }
    summary { cursor: pointer; font-weight: bold; margin-top: 10px; color: #333; }
    table { width: 100%; border-collapse: collapse; margin-top: 10px; font-size: 13px; }
    th, td { padding: 4px 6px; border-bottom: 1px solid #ddd; text-align: left; }
    th { background: #eee; }
    .excluded { color: #8b0000; }
"#;

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn render_dashboard(run: &AssessmentRun, title: &str) -> String {
    let summary = &run.summary;
    let title = escape_html(title);

    let mut html = String::from("<!DOCTYPE html>\n<html>\n<head>\n  <meta charset=\"UTF-8\">\n");
    html.push_str(&format!("  <title>{title}</title>\n  <style>{STYLE}</style>\n"));
    html.push_str(&format!("</head>\n<body>\n\n<h1>{title}</h1>\n\n"));

    html.push_str("<div class=\"summary-block\">\n");
    html.push_str("  <div class=\"summary-title\">Global Summary</div>\n");
    html.push_str(&format!(
        "  <p class=\"summary-line\"><strong>Global risk index:</strong> {} ({} risk)</p>\n",
        summary.global_index,
        summary.global_level.as_str().to_uppercase()
    ));
    for line in summary.lines() {
        html.push_str(&format!("  <p class=\"summary-line\">{}</p>\n", escape_html(line)));
    }
    html.push_str(&format!(
        "  <p class=\"summary-line\"><strong>Policy:</strong> {} v{} &middot; \
         <strong>Last updated:</strong> {}</p>\n</div>\n\n",
        escape_html(&run.policy),
        run.policy_version,
        run.generated_at.format("%Y-%m-%d %H:%M UTC")
    ));

    html.push_str("<div class=\"grid\">\n");
    for assessment in &run.assessments {
        html.push_str(&render_card(assessment));
    }
    html.push_str("</div>\n");

    if !run.failures.is_empty() {
        html.push_str("\n<div class=\"summary-block\">\n");
        html.push_str("  <div class=\"summary-title\">Excluded locations</div>\n");
        for failure in &run.failures {
            html.push_str(&format!(
                "  <p class=\"summary-line excluded\"><strong>{}:</strong> {}</p>\n",
                escape_html(&failure.location.name),
                escape_html(&failure.error)
            ));
        }
        html.push_str("</div>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn render_card(assessment: &LocationAssessment) -> String {
    let current = &assessment.current;
    let risk = &assessment.risk;

    let mut card = format!(
        "  <div class=\"card\">\n    <h2>{}</h2>\n\n    \
         <p><strong>Summary:</strong> {}°C, {} km/h wind, {} m vis, {} mm precip</p>\n\n",
        escape_html(&assessment.location.name),
        current.temperature_c,
        current.wind_kmh,
        current.visibility_m,
        current.precip_mm
    );
    card.push_str(&format!(
        "    <p class=\"risk\" style=\"background:{}\">{} (Score: {})</p>\n\n",
        risk.color,
        risk.level.as_str().to_uppercase(),
        risk.score
    ));
    card.push_str(&format!(
        "    <p><strong>Difficulty index:</strong> {} ({})</p>\n",
        risk.difficulty_index,
        risk.difficulty_category.label()
    ));
    card.push_str(&format!(
        "    <p><strong>Next 6 hours outlook:</strong> {}</p>\n",
        risk.outlook_summary
    ));
    card.push_str(&format!(
        "    <p><strong>Dominant driver:</strong> {}</p>\n",
        risk.dominant_driver_label
    ));
    card.push_str(&format!(
        "    <p><strong>Operational impact assessment:</strong> {}</p>\n\n",
        escape_html(&assessment.impact)
    ));

    card.push_str("    <div class=\"strip\">\n");
    for level in &risk.hourly_risk_strip {
        card.push_str(&format!(
            "      <div title=\"{}\" style=\"background:{}\"></div>\n",
            level.as_str(),
            level.color()
        ));
    }
    card.push_str("    </div>\n");

    card.push_str(
        "    <details>\n      <summary>24-Hour Forecast</summary>\n      <table>\n        \
         <tr><th>Time</th><th>Temp</th><th>Wind</th><th>Vis</th><th>Precip</th></tr>\n",
    );
    for hour in &assessment.forecast_24h {
        card.push_str(&format!(
            "        <tr><td>{}</td><td>{}°C</td><td>{} km/h</td>\
             <td>{} m</td><td>{} mm</td></tr>\n",
            escape_html(&hour.time),
            hour.temperature_c,
            hour.wind_kmh,
            hour.visibility_m,
            hour.precip_mm
        ));
    }
    card.push_str("      </table>\n    </details>\n  </div>\n");
    card
}
