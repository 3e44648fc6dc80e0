// Colored terminal output for check results and service status.
//
// The CLI renders flagged words with AnsiMarker, the terminal counterpart
// of the browser's yellow highlight span.

use colored::Colorize;

use crate::config::Config;
use crate::highlight::{Editor, Marker};

/// Marks flagged words as black-on-yellow, like the web client does.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiMarker;

impl Marker for AnsiMarker {
    fn plain(&self, text: &str, out: &mut String) {
        out.push_str(text);
    }

    fn mark(&self, word: &str, out: &mut String) {
        out.push_str(&word.black().on_yellow().to_string());
    }
}

/// Display the editor after a check: the highlighted text and the flagged
/// words. `apply_hint` adds a pointer to `--apply` when a correction is cached.
pub fn display_check(editor: &Editor, wrong_words: &[String], apply_hint: bool) {
    println!("\n{}", "=== Your Text ===".bold());
    println!("{}", editor.rendered());
    println!();

    if wrong_words.is_empty() {
        println!("  {} No wrong words found", "✓".green());
    } else {
        println!(
            "  {} {} flagged: {}",
            "!".yellow(),
            wrong_words.len(),
            wrong_words.join(", ")
        );
    }

    if apply_hint && !editor.cache().is_empty() {
        println!(
            "\n{}",
            "Correction ready. Re-run with --apply to print it.".dimmed()
        );
    }
}

/// Display the corrected text after it has been applied.
pub fn display_correction(corrected: &str) {
    println!("\n{}", "=== Corrected Result ===".bold());
    println!("{}", corrected.green());
}

/// Display the service configuration without exposing any key material.
pub fn display_status(config: &Config) {
    println!("{}", "=== gramcheck ===".bold());
    println!("  Model:            {}", config.model);
    println!("  API endpoint:     {}", config.api_url);
    println!("  Key slots:        {}", config.api_keys.len());
    println!(
        "  Upstream timeout: {}s",
        config.upstream_timeout.as_secs()
    );
    println!(
        "  Quota retry:      {}",
        if config.retry_on_quota {
            "once, with the next key".green()
        } else {
            "off".dimmed()
        }
    );
}
