//! Human-readable card output for predictions.

use khaters_core::Prediction;

const MAX_TARGETS_SHOWN: usize = 3;

/// Print one prediction as a short vertical card.
pub fn print_prediction_card(text: &str, p: &Prediction) {
    println!("=== {} ===", truncate(text, 60));
    println!("  {:<12} {}", "verdict", p.label.as_str());
    println!("  {:<12} {}", "label4", p.label4);
    println!("  {:<12} {:.4}", "p_off", p.p_off);

    // Top targets, descending.
    let mut ranked: Vec<(&str, f32)> = p
        .targets
        .iter()
        .map(|s| s.as_str())
        .zip(p.p_targets.iter().copied())
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    for (name, prob) in ranked.iter().take(MAX_TARGETS_SHOWN) {
        println!("  {:<12} {:.4}", format!("t:{name}"), prob);
    }

    for (name, prob) in p.fine.iter().zip(&p.p_fine) {
        println!("  {:<12} {:.4}", format!("f:{name}"), prob);
    }

    if let Some(debug) = &p.debug {
        println!(
            "  {:<12} {} n-grams, top target {} ({:.4})",
            "debug", debug.token_count, debug.top_target, debug.max_target
        );
    }
    println!();
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let cut: String = s.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{cut}...")
}
