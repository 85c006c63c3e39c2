use anyhow::{Context, Result};
use chrono::{Datelike, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use linklens::analytics::{
    aggregate_by_country, breakdown, bucket_by_day, rank, Dimension, LinkDashboard, MonthView,
    SortDirection, SortKey, Tables,
};
use linklens::config::Config;
use linklens::models::{ClickEvent, LinkRecord};

#[derive(Parser)]
#[command(name = "linklens")]
#[command(about = "Click-analytics aggregation for shortened links", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive the full dashboard model for one link
    Dashboard {
        /// JSON file with the link record
        link: PathBuf,
        /// JSON file with the click events
        clicks: PathBuf,
        /// Selected year (defaults to the newest event's year)
        #[arg(long)]
        year: Option<i32>,
        /// Selected month, 1-12 (defaults to the newest event's month)
        #[arg(long)]
        month: Option<u32>,
    },
    /// Per-day click counts for one month
    Timeseries {
        clicks: PathBuf,
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
    },
    /// Categorical breakdown for one dimension
    Breakdown {
        clicks: PathBuf,
        #[arg(long, value_enum)]
        dimension: DimensionArg,
    },
    /// Clicks per country with the quantized color scale
    Geo { clicks: PathBuf },
    /// Rank a link listing
    Rank {
        /// JSON file with the link records
        links: PathBuf,
        #[arg(long, value_enum, default_value = "created-at")]
        key: SortKeyArg,
        #[arg(long, value_enum, default_value = "desc")]
        direction: DirectionArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DimensionArg {
    Browser,
    Device,
    Os,
}

impl From<DimensionArg> for Dimension {
    fn from(arg: DimensionArg) -> Self {
        match arg {
            DimensionArg::Browser => Dimension::Browser,
            DimensionArg::Device => Dimension::Device,
            DimensionArg::Os => Dimension::Os,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SortKeyArg {
    Clicks,
    Length,
    CreatedAt,
}

impl From<SortKeyArg> for SortKey {
    fn from(arg: SortKeyArg) -> Self {
        match arg {
            SortKeyArg::Clicks => SortKey::Clicks,
            SortKeyArg::Length => SortKey::Length,
            SortKeyArg::CreatedAt => SortKey::CreatedAt,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum DirectionArg {
    Asc,
    Desc,
}

impl From<DirectionArg> for SortDirection {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Asc => SortDirection::Asc,
            DirectionArg::Desc => SortDirection::Desc,
        }
    }
}

fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_slice(&bytes)
        .with_context(|| format!("failed to parse {}", path.display()))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Explicit view for `--year`/`--month`, else the newest event's month,
/// else the current month.
fn select_view(clicks: &[ClickEvent], year: Option<i32>, month: Option<u32>) -> MonthView {
    if let (Some(year), Some(month)) = (year, month) {
        return MonthView::new(year, month);
    }
    MonthView::latest_for(clicks).unwrap_or_else(|| {
        let now = Utc::now();
        MonthView::new(now.year(), now.month())
    })
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let tables = Tables::load(config.tables.override_dir.as_deref())
        .context("failed to load lookup tables")?;

    match cli.command {
        Commands::Dashboard {
            link,
            clicks,
            year,
            month,
        } => {
            let link: LinkRecord = load_json(&link)?;
            let clicks: Vec<ClickEvent> = load_json(&clicks)?;
            let view = select_view(&clicks, year, month);
            let dashboard = LinkDashboard::derive(&tables, &link, &clicks, view);
            print_json(&dashboard)?;
        }
        Commands::Timeseries {
            clicks,
            year,
            month,
        } => {
            anyhow::ensure!((1..=12).contains(&month), "month must be 1..=12");
            let clicks: Vec<ClickEvent> = load_json(&clicks)?;
            let series = bucket_by_day(&clicks, MonthView::new(year, month));
            print_json(&series)?;
        }
        Commands::Breakdown { clicks, dimension } => {
            let clicks: Vec<ClickEvent> = load_json(&clicks)?;
            let result = breakdown(&tables, &clicks, dimension.into());
            print_json(&result)?;
        }
        Commands::Geo { clicks } => {
            let clicks: Vec<ClickEvent> = load_json(&clicks)?;
            let result = aggregate_by_country(&tables, &clicks);
            print_json(&result)?;
        }
        Commands::Rank {
            links,
            key,
            direction,
        } => {
            let links: Vec<LinkRecord> = load_json(&links)?;
            let ranked = rank(&links, key.into(), direction.into());
            print_json(&ranked)?;
        }
    }

    Ok(())
}
