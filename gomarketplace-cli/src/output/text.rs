//! Text output formatting with colors.

use gomarketplace_core::{CartItem, CartTotals};
use gomarketplace_store::StoreConfig;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";

/// Maximum title width before truncation.
const TITLE_WIDTH: usize = 24;

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Formats the whole cart: header, one row per line, and totals.
    pub fn format_cart(&self, items: &[CartItem], totals: &CartTotals) -> String {
        let mut lines = Vec::new();

        lines.push(self.bold(&format!("Cart ({})", plural(totals.lines, "line"))));
        lines.push("─".repeat(60));

        if items.is_empty() {
            lines.push(self.dim("Your cart is empty"));
            return lines.join("\n");
        }

        for item in items {
            lines.push(self.format_item(item));
        }

        lines.push("─".repeat(60));
        lines.push(format!(
            "{:<44} {:>15}",
            format!("Total: {}", plural(totals.quantity, "unit")),
            self.bold(&format_price(totals.price))
        ));

        lines.join("\n")
    }

    /// Formats a single cart line.
    pub fn format_item(&self, item: &CartItem) -> String {
        format!(
            "{:<10} {:<width$} {:>3} × {:>10} {:>10}",
            item.id,
            truncate(&item.title, TITLE_WIDTH),
            item.quantity,
            format_price(item.price),
            format_price(item.line_total()),
            width = TITLE_WIDTH
        )
    }

    /// Formats the outcome of a mutation, showing the affected line.
    pub fn format_change(&self, action: &str, id: &str, item: Option<&CartItem>) -> String {
        match item {
            Some(item) => format!(
                "{} {} {}",
                self.green("✓"),
                action,
                self.format_item(item)
            ),
            None => format!("{} {} {} {}", self.green("✓"), action, id, self.dim("(not in cart)")),
        }
    }

    /// Formats the active configuration.
    pub fn format_config(&self, config: &StoreConfig) -> String {
        let lines = [
            self.bold("GoMarketplace Configuration"),
            "─".repeat(40),
            format!("Storage key:     {}", config.storage_key),
            format!("Persist mode:    {}", config.persist_mode),
            format!("Corrupt data:    {}", config.corrupt_data),
            format!("Data dir:        {}", config.data_dir().display()),
            format!("Log level:       {}", config.log_level),
        ];
        lines.join("\n")
    }

    /// Formats an error line.
    pub fn format_error(&self, error: &str) -> String {
        format!("{} {}", self.red("✗"), error)
    }

    // ========================================================================
    // Styling
    // ========================================================================

    fn bold(&self, text: &str) -> String {
        if self.use_colors {
            format!("{BOLD}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.use_colors {
            format!("{DIM}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn green(&self, text: &str) -> String {
        if self.use_colors {
            format!("{GREEN}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn red(&self, text: &str) -> String {
        if self.use_colors {
            format!("{RED}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

/// Formats a price with two decimals.
pub fn format_price(price: f64) -> String {
    format!("${price:.2}")
}

fn plural<N>(n: N, word: &str) -> String
where
    N: std::fmt::Display + PartialEq + From<u8>,
{
    if n == N::from(1) {
        format!("1 {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Truncates to `max` characters, marking the cut with `…`.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Shirt", 10), "Shirt");
        assert_eq!(truncate("abcdefghijk", 5), "abcd…");
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "line"), "1 line");
        assert_eq!(plural(0, "line"), "0 lines");
        assert_eq!(plural(3_u64, "unit"), "3 units");
        assert_eq!(plural(1_u64, "unit"), "1 unit");
    }
}
