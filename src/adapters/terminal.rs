//! Plain-text dashboard rendering for the terminal.

use std::fmt::Write;

use crate::domain::dashboard::{AllocationSlice, AssetCard, BookSection, DashboardView};
use crate::domain::error::FolioError;
use crate::ports::dashboard_port::DashboardPort;

const WIDTH: usize = 64;
const BAR_WIDTH: usize = 40;
const BAR_GLYPHS: [char; 2] = ['#', '='];
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalRenderer {
    /// Prefix output with an ANSI clear-screen sequence (live redraw).
    pub clear_screen: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live() -> Self {
        TerminalRenderer { clear_screen: true }
    }
}

impl DashboardPort for TerminalRenderer {
    fn render(&self, view: &DashboardView) -> Result<String, FolioError> {
        let mut out = String::new();
        if self.clear_screen {
            out.push_str(CLEAR_SCREEN);
        }
        write_dashboard(&mut out, view).map_err(|e| FolioError::Render {
            reason: e.to_string(),
        })?;
        Ok(out)
    }
}

fn write_dashboard(out: &mut String, view: &DashboardView) -> std::fmt::Result {
    write_header(out, view)?;
    write_markets(out, view)?;
    write_summary(out, view)?;
    for section in &view.sections {
        write_section(out, section)?;
    }
    Ok(())
}

fn write_header(out: &mut String, view: &DashboardView) -> std::fmt::Result {
    let clock = &view.clock;
    writeln!(out, "{:<28}{:>36}", "Portfolio", clock.time)?;
    writeln!(
        out,
        "{:<28}{:>36}",
        "Crypto & Indonesian Equities",
        format!("{} ({})", clock.date, clock.timezone)
    )?;
    writeln!(out, "{}", "-".repeat(WIDTH))
}

fn write_markets(out: &mut String, view: &DashboardView) -> std::fmt::Result {
    let badges: Vec<String> = view
        .markets
        .iter()
        .map(|m| {
            let dot = if m.is_open { '*' } else { 'o' };
            format!("{dot} {} {}", m.market, m.status)
        })
        .collect();
    writeln!(out, "{}", badges.join("   "))?;
    writeln!(out)
}

fn write_summary(out: &mut String, view: &DashboardView) -> std::fmt::Result {
    let s = &view.summary;
    writeln!(out, "TOTAL VALUE")?;
    writeln!(
        out,
        "  {}   {} ({})",
        s.total_display, s.change_display, s.change_pct_display
    )?;
    writeln!(out)?;

    let shares: Vec<String> = s
        .allocations
        .iter()
        .map(|a| format!("{} {}", a.label, a.allocation_display))
        .collect();
    writeln!(out, "ALLOCATION   {}", shares.join(" · "))?;
    writeln!(out, "  [{}]", allocation_bar(&s.allocations))?;

    let subtotals: Vec<String> = s
        .allocations
        .iter()
        .map(|a| format!("{}: {}", a.label, a.subtotal_display))
        .collect();
    writeln!(out, "  {}", subtotals.join("   "))?;
    writeln!(out)
}

/// Fixed-width bar split by allocation share; undefined shares draw nothing.
pub fn allocation_bar(slices: &[AllocationSlice]) -> String {
    let mut bar = String::with_capacity(BAR_WIDTH);
    let mut filled = 0usize;
    for (i, slice) in slices.iter().enumerate() {
        let share = slice.allocation_pct.unwrap_or(0.0).clamp(0.0, 100.0);
        let cells = ((share / 100.0) * BAR_WIDTH as f64).round() as usize;
        let cells = cells.min(BAR_WIDTH - filled);
        let glyph = BAR_GLYPHS[i % BAR_GLYPHS.len()];
        bar.extend(std::iter::repeat_n(glyph, cells));
        filled += cells;
    }
    bar.extend(std::iter::repeat_n(' ', BAR_WIDTH - filled));
    bar
}

fn write_section(out: &mut String, section: &BookSection) -> std::fmt::Result {
    let state = if section.is_open { "" } else { " (closed)" };
    writeln!(out, "{}{}", section.title.to_uppercase(), state)?;
    if section.cards.is_empty() {
        writeln!(out, "  no holdings")?;
    }
    for card in &section.cards {
        write_card(out, card)?;
    }
    writeln!(out)
}

fn write_card(out: &mut String, card: &AssetCard) -> std::fmt::Result {
    let value = match &card.value_secondary {
        Some(secondary) => format!("{} ({secondary})", card.value_display),
        None => card.value_display.clone(),
    };
    writeln!(
        out,
        "  {:<6}{:<24}{:>8}  {:>22}",
        card.symbol,
        truncate(&card.name, 23),
        card.change_display,
        value
    )?;
    writeln!(
        out,
        "        Holdings {:<22}Price {}",
        card.amount_display, card.price_display
    )
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('~');
    cut
}
