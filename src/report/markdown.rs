//! Markdown rendering for the insight report

use chrono::{DateTime, Local};
use std::fmt::Write;

use crate::analysis::Statistics;
use crate::llm::InsightSections;

/// Second-level headings in the order they are rendered
pub const SECTION_HEADINGS: [&str; 6] = [
    "Overview",
    "TL;DR",
    "Top Themes",
    "Recommended Improvements",
    "Quick Wins",
    "Long-Term Actions",
];

/// A finished report, ready to render
#[derive(Debug, Clone)]
pub struct Report {
    pub stats: Statistics,
    pub insights: InsightSections,
    pub generated_at: DateTime<Local>,
    pub samples_analyzed: usize,
    pub guard_note: Option<String>,
}

impl Report {
    pub fn new(
        stats: Statistics,
        insights: InsightSections,
        generated_at: DateTime<Local>,
        samples_analyzed: usize,
    ) -> Self {
        Self {
            stats,
            insights,
            generated_at,
            samples_analyzed,
            guard_note: None,
        }
    }

    pub fn with_guard_note(mut self, note: impl Into<String>) -> Self {
        let note = note.into();
        self.guard_note = (!note.trim().is_empty()).then_some(note);
        self
    }

    /// Render the report as Markdown
    pub fn render(&self) -> String {
        let mut md = String::new();

        md.push_str("# Customer Insight Report\n\n");
        let _ = writeln!(
            md,
            "Generated: {}\n",
            self.generated_at.format("%Y-%m-%d %H:%M")
        );

        self.render_overview(&mut md);

        md.push_str("## TL;DR\n\n");
        if self.insights.summary.trim().is_empty() {
            md.push_str("(no summary)\n\n");
        } else {
            let _ = writeln!(md, "{}\n", escape_headings(self.insights.summary.trim()));
        }

        render_list(&mut md, SECTION_HEADINGS[2], &self.insights.themes);
        render_list(&mut md, SECTION_HEADINGS[3], &self.insights.improvements);
        render_list(&mut md, SECTION_HEADINGS[4], &self.insights.quick_wins);
        render_list(&mut md, SECTION_HEADINGS[5], &self.insights.long_term_actions);

        if let Some(note) = &self.guard_note {
            md.push_str("---\n\n");
            let _ = writeln!(md, "**Safety & Guard Rails:** {}", note);
        }

        md
    }

    fn render_overview(&self, md: &mut String) {
        let stats = &self.stats;

        md.push_str("## Overview\n\n");
        let _ = writeln!(md, "- **Total responses:** {}", stats.total_count);
        let _ = writeln!(md, "- **Rated responses:** {}", stats.rated_count);
        match stats.average_rating {
            Some(_) => {
                let _ = writeln!(md, "- **Average rating:** {} / 5", stats.average_display());
            }
            None => md.push_str("- **Average rating:** n/a\n"),
        }
        if let (Some(earliest), Some(latest)) = (stats.earliest, stats.latest) {
            let _ = writeln!(md, "- **Date range:** {} to {}", earliest, latest);
        }
        let _ = writeln!(md, "- **Samples analyzed:** {}", self.samples_analyzed);
        md.push_str("\n---\n\n");
    }
}

/// Escape line-leading `#` so model text cannot open new sections.
fn escape_headings(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.trim_start().starts_with('#') {
                format!("\\{}", line.trim_start())
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_list(md: &mut String, title: &str, items: &[String]) {
    let _ = writeln!(md, "## {}\n", title);
    if items.is_empty() {
        md.push_str("- (none)\n");
    } else {
        for item in items {
            let _ = writeln!(md, "- {}", item.replace('\n', " "));
        }
    }
    md.push('\n');
}
