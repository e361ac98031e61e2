//! Static HTML dashboard rendered with Askama templates.
//!
//! The built-in page is `templates/dashboard/page.html`. A custom template
//! file may instead use `{{TITLE}}`, `{{HEADER}}`, `{{MARKETS}}`,
//! `{{SUMMARY}}`, `{{BOOKS}}` and `{{GENERATED_AT}}` markers, each replaced
//! by the matching fragment template.

use std::fs;
use std::path::Path;

use askama::Template;

use crate::domain::book::BookKind;
use crate::domain::dashboard::{
    AllocationSlice, BookSection, ClockDisplay, DashboardView, MarketBadge, Summary,
};
use crate::domain::error::FolioError;
use crate::ports::dashboard_port::DashboardPort;

const TITLE: &str = "Portfolio Dashboard";

struct BarSegment {
    kind: BookKind,
    width: String,
}

fn bar_segments(slices: &[AllocationSlice]) -> Vec<BarSegment> {
    slices
        .iter()
        .map(|slice| BarSegment {
            kind: slice.kind,
            width: format!("{:.1}", slice.allocation_pct.unwrap_or(0.0).clamp(0.0, 100.0)),
        })
        .collect()
}

#[derive(Template)]
#[template(path = "dashboard/page.html")]
struct PageTemplate<'a> {
    title: &'a str,
    clock: &'a ClockDisplay,
    markets: &'a [MarketBadge],
    summary: &'a Summary,
    bar: Vec<BarSegment>,
    sections: &'a [BookSection],
}

#[derive(Template)]
#[template(path = "dashboard/header.html")]
struct HeaderTemplate<'a> {
    clock: &'a ClockDisplay,
}

#[derive(Template)]
#[template(path = "dashboard/markets.html")]
struct MarketsTemplate<'a> {
    markets: &'a [MarketBadge],
}

#[derive(Template)]
#[template(path = "dashboard/summary.html")]
struct SummaryTemplate<'a> {
    summary: &'a Summary,
    bar: Vec<BarSegment>,
}

#[derive(Template)]
#[template(path = "dashboard/books.html")]
struct BooksTemplate<'a> {
    sections: &'a [BookSection],
}

#[derive(Template)]
#[template(path = "dashboard/generated_at.html")]
struct GeneratedAtTemplate<'a> {
    clock: &'a ClockDisplay,
}

fn render_error(err: askama::Error) -> FolioError {
    FolioError::Render {
        reason: err.to_string(),
    }
}

#[derive(Debug, Default, Clone)]
pub struct HtmlDashboard {
    template: Option<String>,
}

impl HtmlDashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(template: impl Into<String>) -> Self {
        HtmlDashboard {
            template: Some(template.into()),
        }
    }

    pub fn from_template_file(path: &Path) -> Result<Self, FolioError> {
        let template = fs::read_to_string(path).map_err(|e| FolioError::Render {
            reason: format!("failed to read template {}: {e}", path.display()),
        })?;
        Ok(Self::with_template(template))
    }
}

impl DashboardPort for HtmlDashboard {
    fn render(&self, view: &DashboardView) -> Result<String, FolioError> {
        match &self.template {
            Some(template) => resolve(template, view),
            None => PageTemplate {
                title: TITLE,
                clock: &view.clock,
                markets: &view.markets,
                summary: &view.summary,
                bar: bar_segments(&view.summary.allocations),
                sections: &view.sections,
            }
            .render()
            .map_err(render_error),
        }
    }
}

/// Fragment for a marker name, or `None` when the marker is unknown.
fn fragment(name: &str, view: &DashboardView) -> Result<Option<String>, askama::Error> {
    let html = match name {
        "TITLE" => TITLE.to_string(),
        "HEADER" => HeaderTemplate { clock: &view.clock }.render()?,
        "MARKETS" => MarketsTemplate {
            markets: &view.markets,
        }
        .render()?,
        "SUMMARY" => SummaryTemplate {
            summary: &view.summary,
            bar: bar_segments(&view.summary.allocations),
        }
        .render()?,
        "BOOKS" => BooksTemplate {
            sections: &view.sections,
        }
        .render()?,
        "GENERATED_AT" => GeneratedAtTemplate { clock: &view.clock }.render()?,
        _ => return Ok(None),
    };
    Ok(Some(html))
}

/// Resolve `{{NAME}}` markers in a single left-to-right pass over `template`.
/// Substituted fragments are never scanned again, and unknown markers are
/// copied through unchanged.
pub fn resolve(template: &str, view: &DashboardView) -> Result<String, FolioError> {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        output.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let marker = after
            .find("}}")
            .map(|end| (&after[..end], &after[end + 2..]));

        match marker {
            Some((name, tail)) => match fragment(name, view).map_err(render_error)? {
                Some(html) => {
                    output.push_str(&html);
                    rest = tail;
                }
                None => {
                    output.push_str("{{");
                    rest = after;
                }
            },
            None => {
                output.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    output.push_str(rest);
    Ok(output)
}
