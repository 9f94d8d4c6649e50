//! Output formatting for the CLI.

use catalog_core::catalog::Product;
use catalog_core::media::MediaPolicy;
use catalog_core::search::{PageItem, PaginationControl};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
    term: Term,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self {
            verbose,
            json,
            term: Term::stderr(),
        }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", truncate(col, *width), width = width))
            .collect();
        println!("  {}", formatted.join("  ").trim_end());
    }

    /// Print a product listing. Photo links are shown only for allowed origins.
    pub fn products(&self, products: &[Product], media: &MediaPolicy) {
        if self.json {
            return;
        }
        if products.is_empty() {
            self.info("No products found.");
            return;
        }

        let widths = [6, 32, 18, 10, 0];
        self.table_row(&["ID", "NAME", "FAMILY", "PRICE", "PHOTO"], &widths);
        for product in products {
            let id = product.id.to_string();
            let price = format!("{:.2}", product.price);
            let photo = product
                .card_photo()
                .and_then(|path| media.displayable(path))
                .unwrap_or_default();
            self.table_row(
                &[&id, &product.name, &product.family_name, &price, &photo],
                &widths,
            );
        }
    }

    /// Print the pagination strip and item range.
    pub fn pagination(&self, control: &PaginationControl) {
        if self.json {
            return;
        }
        println!("\n  {}", render_pages(control));
        println!(
            "  {}",
            style(format!(
                "Showing {}-{} of {}",
                control.start_item, control.end_item, control.total
            ))
            .dim()
        );
    }

    /// Create a spinner for indeterminate progress.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json || !self.term.is_term() {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Check if verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Render the page strip, e.g. `« ‹ 1 … 4 [5] 6 … 10 › »`.
pub fn render_pages(control: &PaginationControl) -> String {
    let arrow = |label: &str, enabled: bool| {
        if enabled {
            label.to_string()
        } else {
            style(label).dim().to_string()
        }
    };

    let mut parts = vec![
        arrow("«", control.nav.first.is_some()),
        arrow("‹", control.nav.previous.is_some()),
    ];
    for item in &control.items {
        parts.push(match item {
            PageItem::Page(n) if *n == control.current => format!("[{}]", n),
            other => other.to_string(),
        });
    }
    parts.push(arrow("›", control.nav.next.is_some()));
    parts.push(arrow("»", control.nav.last.is_some()));
    parts.join(" ")
}

/// Cut `text` to `width` characters, `0` meaning unlimited.
fn truncate(text: &str, width: usize) -> String {
    if width == 0 || text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

/// Format bytes as human-readable size.
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
