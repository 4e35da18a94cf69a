// src/cli.rs
use std::{path::PathBuf, time::Duration};

use chrono::{Local, NaiveDate};
use clap::{ArgAction, Parser, ValueEnum};

use crate::{
    config::{
        consts::{ARCHIVE_URL, CACHE_TTL_SECS, CYCLE_LENGTH, LOOKBACK_DAYS},
        options::{
            AppOptions, CohortFilter, ErrorPolicy, ExportFormat, ExportType, ModelSelector,
            ProviderSelector,
        },
    },
    core::net::HttpSource,
    data::{self, Selection},
    error::Error,
    file,
    progress::Progress,
    runner::{self, Report},
    scrape,
    segment::Cohort,
    stats,
    store::CachedSource,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CohortArg { All, Current, Previous }

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg { Csv, Tsv, Json }

/// Fetch the Sisal virtual-football archive and split it into the current
/// and previous championship.
#[derive(Debug, Parser)]
#[command(name = "sisal_archive", version, about, long_about = None)]
pub struct Args {
    /// Days to look back from today (today included)
    #[arg(short = 'd', long, env = "SISAL_DAYS", default_value_t = LOOKBACK_DAYS)]
    pub days: usize,

    /// Archive endpoint; the day (dd-mm-yyyy) is appended
    #[arg(long, env = "SISAL_BASE_URL", default_value = ARCHIVE_URL)]
    pub base_url: String,

    /// Last day of the lookback window (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub today: Option<NaiveDate>,

    /// Read saved archive payloads instead of fetching
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input: Vec<PathBuf>,

    /// Only this provider key of the matchday map
    #[arg(long, env = "SISAL_PROVIDER")]
    pub provider: Option<String>,

    /// Only this betting model (exact label)
    #[arg(long, env = "SISAL_MODEL")]
    pub model: Option<String>,

    /// Fail on the first malformed record instead of skipping it
    #[arg(long)]
    pub strict: bool,

    /// Distinct matchdays in one championship
    #[arg(long, env = "SISAL_CYCLE_LENGTH", default_value_t = CYCLE_LENGTH)]
    pub cycle_length: usize,

    /// Leave an incomplete previous championship unassigned
    #[arg(long)]
    pub drop_partial: bool,

    #[arg(long, value_enum, default_value_t = CohortArg::All)]
    pub cohort: CohortArg,

    /// Only rows where this team plays
    #[arg(short = 't', long)]
    pub team: Option<String>,

    /// Only this bet description (repeatable)
    #[arg(short = 'm', long = "market", value_name = "DESC")]
    pub markets: Vec<String>,

    /// Print outcome counts and mean odds per cohort
    #[arg(long)]
    pub stats: bool,

    /// Print the bet descriptions found in the window and exit
    #[arg(long)]
    pub list_markets: bool,

    /// Output file (directory with --per-team); stdout when omitted
    #[arg(short = 'o', long)]
    pub out: Option<String>,

    #[arg(long, value_enum, default_value_t = FormatArg::Csv)]
    pub format: FormatArg,

    /// One file per team
    #[arg(long)]
    pub per_team: bool,

    /// Omit the header line
    #[arg(long)]
    pub no_headers: bool,

    /// Always hit the network
    #[arg(long)]
    pub no_cache: bool,

    /// Seconds a cached archive day stays fresh
    #[arg(long, env = "SISAL_CACHE_TTL", default_value_t = CACHE_TTL_SECS)]
    pub cache_ttl: u64,

    #[arg(long, env = "SISAL_STORE_DIR")]
    pub store_dir: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn to_options(&self) -> Result<AppOptions, Error> {
        if self.cycle_length == 0 {
            return Err(Error::InvalidOption("--cycle-length must be at least 1".into()));
        }
        if self.days == 0 && self.input.is_empty() {
            return Err(Error::InvalidOption("--days must be at least 1".into()));
        }
        if self.per_team && self.out.is_none() {
            return Err(Error::InvalidOption("--per-team needs --out <DIR>".into()));
        }

        let mut opts = AppOptions::default();

        opts.fetch.days = self.days;
        opts.fetch.base_url = self.base_url.clone();
        opts.fetch.cache_ttl = (!self.no_cache).then(|| Duration::from_secs(self.cache_ttl));
        if let Some(dir) = &self.store_dir {
            opts.fetch.store_dir = dir.clone();
        }

        opts.extract.provider = match &self.provider {
            Some(key) => ProviderSelector::Key(key.clone()),
            None => ProviderSelector::All,
        };
        opts.extract.model = match &self.model {
            Some(label) => ModelSelector::Label(label.clone()),
            None => ModelSelector::All,
        };
        if self.strict {
            opts.extract.on_error = ErrorPolicy::Abort;
        }

        opts.segment.cycle_length = self.cycle_length;
        opts.segment.keep_partial_previous = !self.drop_partial;

        opts.view.cohort = match self.cohort {
            CohortArg::All => CohortFilter::All,
            CohortArg::Current => CohortFilter::Current,
            CohortArg::Previous => CohortFilter::Previous,
        };
        opts.view.team = self.team.clone();
        opts.view.markets = self.markets.clone();
        opts.view.stats = self.stats;

        opts.export.format = match self.format {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Tsv => ExportFormat::Tsv,
            FormatArg::Json => ExportFormat::Json,
        };
        opts.export.include_headers = !self.no_headers;
        if self.per_team {
            opts.export.export_type = ExportType::PerTeam;
        }
        if let Some(out) = &self.out {
            opts.export.set_path(out);
        }

        Ok(opts)
    }
}

/// Prints one line per archive day to stderr.
#[derive(Default)]
struct CliProgress { total: usize, seen: usize }

impl Progress for CliProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        eprintln!("Fetching {total} archive days...");
    }
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
    fn item_done(&mut self, day: NaiveDate, matchdays: usize) {
        self.seen += 1;
        eprintln!("[{}/{}] {day}: {matchdays} matchdays", self.seen, self.total);
    }
    fn item_failed(&mut self, day: NaiveDate, reason: &str) {
        self.seen += 1;
        eprintln!("[{}/{}] {day}: skipped ({reason})", self.seen, self.total);
    }
}

pub fn run() -> color_eyre::Result<()> {
    let args = Args::parse();
    crate::log::init(args.verbose);
    run_with(&args)
}

pub fn run_with(args: &Args) -> color_eyre::Result<()> {
    let opts = args.to_options()?;

    let report = if args.input.is_empty() {
        let http = HttpSource::new(&opts.fetch)?;
        let today = args.today.unwrap_or_else(|| Local::now().date_naive());
        let mut progress = CliProgress::default();
        match opts.fetch.cache_ttl {
            Some(ttl) => {
                let cached = CachedSource::new(http, opts.fetch.store_dir.clone(), ttl);
                runner::run(&opts, &cached, today, Some(&mut progress))?
            }
            None => runner::run(&opts, &http, today, Some(&mut progress))?,
        }
    } else {
        let matchdays = scrape::load_payload_files(&args.input)?;
        runner::process(&matchdays, &opts)?
    };

    if report.rows.is_empty() && !report.failed_days.is_empty() {
        loge!(days = report.failed_days.len(), "no archive day could be loaded");
    }
    print_summary(&report);

    if args.list_markets {
        for market in data::markets(&report.rows) {
            println!("{market}");
        }
        return Ok(());
    }

    if opts.view.stats {
        print_stats(&report);
    }

    let sel = Selection { team: opts.view.team.as_deref(), markets: &opts.view.markets };
    let ds = report.to_dataset(opts.view.cohort, sel);

    if args.out.is_some() {
        for path in file::export_dataset(&opts.export, &ds)? {
            eprintln!("Wrote {}", path.display());
        }
    } else {
        print!("{}", file::render(&opts.export, &ds)?);
    }
    Ok(())
}

fn print_summary(report: &Report) {
    let seg = &report.segmentation;
    eprintln!(
        "{} rows: {} current, {} previous, {} unassigned ({:?})",
        report.rows.len(),
        seg.count(Cohort::Current),
        seg.count(Cohort::Previous),
        seg.count(Cohort::Unassigned),
        seg.completeness(),
    );
    if !report.rejected.is_empty() {
        eprintln!("{} malformed records skipped", report.rejected.len());
    }
    for f in &report.failed_days {
        eprintln!("{}: {}", f.day, f.reason);
    }
}

fn print_stats(report: &Report) {
    for (title, rows) in [
        ("Current championship", report.current().collect::<Vec<_>>()),
        ("Previous championship", report.previous().collect::<Vec<_>>()),
    ] {
        println!("{title} ({} rows)", rows.len());
        for s in stats::summarize(rows.iter().copied()) {
            let odds = s.mean_odds.map(|q| format!("{q:.2}")).unwrap_or_else(|| "-".into());
            println!("  {:<28} {:<12} {:>5}  {odds}", s.market, s.outcome, s.count);
        }
        for (outcome, count, share) in stats::outcome_shares(rows.iter().copied()) {
            println!("  {outcome:<41} {count:>5}  {:.1}%", share * 100.0);
        }
    }
}
