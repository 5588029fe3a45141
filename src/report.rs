use crate::odds::{MarketOdds, ValueCheck, is_valid_odds, no_vig_probs, overround};
use crate::predictor::Prediction;
use crate::trace::Trace;

pub fn format_probability(p: f64) -> String {
    format!("{:.1}%", p * 100.0)
}

pub fn format_odds(odds: f64) -> String {
    if is_valid_odds(odds) {
        format!("{odds:.2}")
    } else {
        "n/a".to_string()
    }
}

pub fn format_edge(edge_pct: f64) -> String {
    format!("{edge_pct:+.1}%")
}

fn join_lines(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

pub fn render_trace(trace: &Trace) -> String {
    let width = trace.steps.iter().map(|s| s.name.len()).max().unwrap_or(0);
    let lines = trace
        .steps
        .iter()
        .map(|step| format!("  {:<width$}  {:>10.4}", step.name, step.value))
        .collect();
    join_lines(lines)
}

pub fn render_prediction(pred: &Prediction) -> String {
    let mut lines = vec![
        format!("{} vs {}", pred.home, pred.away),
        format!(
            "xG: {:.2} - {:.2}",
            pred.expected_goals.home, pred.expected_goals.away
        ),
    ];
    for (label, p, odds) in [
        ("Home", pred.probs.home, pred.fair_odds.home),
        ("Draw", pred.probs.draw, pred.fair_odds.draw),
        ("Away", pred.probs.away, pred.fair_odds.away),
    ] {
        lines.push(format!(
            "{label}: {}  ({})",
            format_probability(p),
            format_odds(odds)
        ));
    }
    if let Some(score) = pred.modal_scoreline {
        lines.push(format!(
            "Most likely score: {}-{} ({})",
            score.home,
            score.away,
            format_probability(score.prob)
        ));
    }
    let missing = pred.probs.truncated_mass();
    if missing > 0.001 {
        lines.push(format!("Beyond goal cap: {}", format_probability(missing)));
    }
    join_lines(lines)
}

/// Bookmaker margin and margin-free implied probabilities.
pub fn render_market_summary(market: &MarketOdds) -> String {
    let mut lines = Vec::new();
    match overround(market) {
        Some(margin) => lines.push(format!("Margin: {}", format_probability(margin))),
        None => lines.push("Margin: n/a".to_string()),
    }
    if let Some(fair) = no_vig_probs(market) {
        lines.push(format!(
            "No-vig: home {}  draw {}  away {}",
            format_probability(fair.home),
            format_probability(fair.draw),
            format_probability(fair.away)
        ));
    }
    join_lines(lines)
}

pub fn render_value_table(checks: &[ValueCheck], value_only: bool) -> String {
    let mut lines = vec![format!(
        "{:<6} {:>8} {:>8} {:>8}",
        "", "model", "market", "edge"
    )];
    for check in checks {
        if value_only && !check.is_value() {
            continue;
        }
        let edge = check
            .edge_pct
            .map(format_edge)
            .unwrap_or_else(|| "-".to_string());
        lines.push(format!(
            "{:<6} {:>8} {:>8} {:>8}",
            check.outcome.label(),
            format_odds(check.model_odds),
            format_odds(check.market_odds),
            edge
        ));
    }
    join_lines(lines)
}
