//! CLI definition and dispatch.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use clap::{Parser, Subcommand, ValueEnum};
use std::future::Future;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, error, info};

use crate::adapters::html_dashboard::HtmlDashboard;
use crate::adapters::ini_holdings_adapter::IniHoldingsAdapter;
use crate::adapters::static_holdings::StaticHoldings;
use crate::adapters::system_clock::{FixedClock, SystemClock};
use crate::adapters::terminal::TerminalRenderer;
use crate::adapters::ticker::{Ticker, DEFAULT_TICK};
use crate::domain::book::BookKind;
use crate::domain::currency::format_money;
use crate::domain::dashboard::{DashboardView, DisplayZone, ViewFilter};
use crate::domain::error::FolioError;
use crate::domain::holdings::Holdings;
use crate::domain::session::parse_timezone;
use crate::domain::valuation::Valuation;
use crate::ports::clock_port::ClockPort;
use crate::ports::dashboard_port::DashboardPort;
use crate::ports::holdings_port::HoldingsPort;

#[derive(Parser, Debug)]
#[command(name = "folioview", about = "Crypto and Indonesian equity portfolio dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the dashboard once
    Show {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = ViewArg::All)]
        view: ViewArg,
        /// Reference instant (RFC 3339) instead of now
        #[arg(long, value_parser = parse_instant)]
        at: Option<DateTime<Utc>>,
        /// Display timezone, e.g. Asia/Jakarta
        #[arg(long, value_parser = parse_zone)]
        tz: Option<Tz>,
        /// Emit the dashboard view as JSON
        #[arg(long)]
        json: bool,
    },
    /// Redraw the dashboard every second
    Watch {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = ViewArg::All)]
        view: ViewArg,
        #[arg(long, value_parser = parse_zone)]
        tz: Option<Tz>,
        /// Stop after this many redraws
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        ticks: Option<u64>,
    },
    /// Write a static HTML dashboard
    Html {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long, default_value = "dashboard.html")]
        output: PathBuf,
        #[arg(long)]
        template: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = ViewArg::All)]
        view: ViewArg,
        #[arg(long, value_parser = parse_instant)]
        at: Option<DateTime<Utc>>,
        #[arg(long, value_parser = parse_zone)]
        tz: Option<Tz>,
    },
    /// Validate a holdings file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewArg {
    All,
    Crypto,
    Idx,
}

impl From<ViewArg> for ViewFilter {
    fn from(arg: ViewArg) -> Self {
        match arg {
            ViewArg::All => ViewFilter::All,
            ViewArg::Crypto => ViewFilter::Only(BookKind::Crypto),
            ViewArg::Idx => ViewFilter::Only(BookKind::Idx),
        }
    }
}

fn parse_instant(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 timestamp: {e}"))
}

fn parse_zone(raw: &str) -> Result<Tz, String> {
    parse_timezone(raw).map_err(|e| e.to_string())
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Show {
            config,
            view,
            at,
            tz,
            json,
        } => run_show(config.as_deref(), view.into(), at, tz, json),
        Command::Watch {
            config,
            view,
            tz,
            ticks,
        } => run_watch(config.as_deref(), view.into(), tz, ticks),
        Command::Html {
            config,
            output,
            template,
            view,
            at,
            tz,
        } => run_html(
            config.as_deref(),
            &output,
            template.as_deref(),
            view.into(),
            at,
            tz,
        ),
        Command::Validate { config } => run_validate(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            (&e).into()
        }
    }
}

/// Holdings plus the display timezone configured alongside them.
pub struct LoadedPortfolio {
    pub holdings: Holdings,
    pub display_timezone: Option<Tz>,
    pub source: String,
}

impl LoadedPortfolio {
    /// Display zone: an explicit `--tz` wins over the configured zone, which
    /// wins over host local time.
    pub fn zone(&self, tz: Option<Tz>) -> DisplayZone {
        tz.or(self.display_timezone)
            .map(DisplayZone::Named)
            .unwrap_or_default()
    }

    pub fn view_at(
        &self,
        instant: DateTime<Utc>,
        zone: DisplayZone,
        filter: ViewFilter,
    ) -> DashboardView {
        let valuation = Valuation::compute(&self.holdings);
        DashboardView::build(&self.holdings, &valuation, instant, zone, filter)
    }
}

/// Load holdings from `config`, or the built-in portfolio when absent.
pub fn load_portfolio(config: Option<&Path>) -> Result<LoadedPortfolio, FolioError> {
    let loaded = match config {
        Some(path) => {
            let adapter = IniHoldingsAdapter::new(path);
            let (holdings, display_timezone) = adapter.load_with_display_timezone()?;
            LoadedPortfolio {
                holdings,
                display_timezone,
                source: adapter.source(),
            }
        }
        None => LoadedPortfolio {
            holdings: StaticHoldings.load()?,
            display_timezone: None,
            source: StaticHoldings.source(),
        },
    };
    debug!(
        source = %loaded.source,
        assets = loaded.holdings.asset_count(),
        "holdings loaded"
    );
    Ok(loaded)
}

fn clock_for(at: Option<DateTime<Utc>>) -> Box<dyn ClockPort> {
    match at {
        Some(instant) => Box::new(FixedClock(instant)),
        None => Box::new(SystemClock),
    }
}

pub fn run_show(
    config: Option<&Path>,
    filter: ViewFilter,
    at: Option<DateTime<Utc>>,
    tz: Option<Tz>,
    json: bool,
) -> Result<(), FolioError> {
    let loaded = load_portfolio(config)?;
    let view = loaded.view_at(clock_for(at).now(), loaded.zone(tz), filter);
    let output = render_show(&view, json)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// Text or JSON rendering of a single dashboard frame.
pub fn render_show(view: &DashboardView, json: bool) -> Result<String, FolioError> {
    if json {
        let mut text = serde_json::to_string_pretty(view).map_err(|e| FolioError::Render {
            reason: e.to_string(),
        })?;
        text.push('\n');
        Ok(text)
    } else {
        TerminalRenderer::new().render(view)
    }
}

pub fn run_watch(
    config: Option<&Path>,
    filter: ViewFilter,
    tz: Option<Tz>,
    ticks: Option<u64>,
) -> Result<(), FolioError> {
    let loaded = load_portfolio(config)?;
    let zone = loaded.zone(tz);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let shown = runtime.block_on(async {
        let interrupted = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("failed to listen for Ctrl-C: {e}");
                std::future::pending::<()>().await;
            }
        };
        let mut stdout = std::io::stdout();
        watch_loop(&loaded, &SystemClock, zone, filter, ticks, interrupted, &mut stdout).await
    })?;

    info!(ticks = shown, "watch stopped");
    Ok(())
}

/// Redraw the dashboard on every tick until `stop` resolves or `limit`
/// frames have been drawn. Returns the number of frames drawn.
pub async fn watch_loop<S>(
    loaded: &LoadedPortfolio,
    clock: &dyn ClockPort,
    zone: DisplayZone,
    filter: ViewFilter,
    limit: Option<u64>,
    stop: S,
    out: &mut dyn Write,
) -> Result<u64, FolioError>
where
    S: Future<Output = ()>,
{
    let renderer = TerminalRenderer::live();
    let (ticker, mut ticks) = Ticker::channel(DEFAULT_TICK);
    tokio::pin!(stop);

    let mut drawn = 0u64;
    let result = loop {
        tokio::select! {
            _ = &mut stop => break Ok(()),
            tick = ticks.recv() => {
                let Some(n) = tick else { break Ok(()) };
                let view = loaded.view_at(clock.now(), zone, filter);
                let frame = match renderer.render(&view) {
                    Ok(frame) => frame,
                    Err(e) => break Err(e),
                };
                if let Err(e) = out.write_all(frame.as_bytes()).and_then(|_| out.flush()) {
                    break Err(e.into());
                }
                drawn = n;
                if limit.is_some_and(|max| n >= max) {
                    break Ok(());
                }
            }
        }
    };

    ticker.shutdown().await;
    result.map(|()| drawn)
}

pub fn run_html(
    config: Option<&Path>,
    output: &Path,
    template: Option<&Path>,
    filter: ViewFilter,
    at: Option<DateTime<Utc>>,
    tz: Option<Tz>,
) -> Result<(), FolioError> {
    let loaded = load_portfolio(config)?;
    let dashboard = match template {
        Some(path) => HtmlDashboard::from_template_file(path)?,
        None => HtmlDashboard::new(),
    };

    let view = loaded.view_at(clock_for(at).now(), loaded.zone(tz), filter);
    dashboard.write(&view, output)?;
    info!(path = %output.display(), "dashboard written");
    Ok(())
}

pub fn run_validate(config: &Path) -> Result<(), FolioError> {
    info!(path = %config.display(), "validating holdings");
    let loaded = load_portfolio(Some(config))?;
    print!("{}", validation_summary(&loaded));
    Ok(())
}

/// Human-readable summary of a successfully validated holdings file.
pub fn validation_summary(loaded: &LoadedPortfolio) -> String {
    let holdings = &loaded.holdings;
    let mut out = format!("Holdings OK: {}\n", loaded.source);
    if holdings.books().is_empty() {
        out.push_str("  no books configured\n");
    }
    for book in holdings.books() {
        out.push_str(&format!(
            "  {:<7} {} assets, {} ({})\n",
            book.kind().market_label(),
            book.assets().len(),
            format_money(book.total_value(), book.currency()),
            book.session(),
        ));
    }
    out.push_str(&format!(
        "  FX      1 IDR = {} USD\n",
        holdings.fx().idr_to_usd
    ));
    if let Some(tz) = loaded.display_timezone {
        out.push_str(&format!("  Display {}\n", tz.name()));
    }
    out
}
