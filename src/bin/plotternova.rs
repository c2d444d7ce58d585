use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::{error, info};

use plotternova::input::{read_table, DataTable};
use plotternova::{
    AxesSettings, BasicPlot, Bins, ColorTheme, ColorThemeSetting, GridSettings, HistPlot,
    HistType, LegendSettings, PlotOptions, StyleSetting, StyleSheet,
};

#[derive(Parser)]
#[command(name = "plotternova")]
#[command(
    version,
    about = "Styled line and histogram plots from delimited text files",
    long_about = "Plot columns of a delimited text file as lines or histograms with preset styles, colour themes, legends and grids. Writes SVG or PNG."
)]
struct Cli {
    /// Log verbosity level
    #[arg(long, global = true, default_value = "info")]
    log_level: LogLevel,
    /// Write log output to a file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<String>,
    /// Append to log file instead of truncating
    #[arg(long, global = true)]
    append_log: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Plot every column against the first one
    Lines {
        #[command(flatten)]
        common: CommonArgs,
        /// How each series is drawn: points, line, pointslines or step.
        #[arg(long, default_value = "line")]
        kind: String,
    },
    /// Histogram every column
    Hist {
        #[command(flatten)]
        common: CommonArgs,
        /// Number of equal-width bins.
        #[arg(long, default_value_t = 10, conflicts_with = "edges")]
        bins: usize,
        /// Explicit bin edges (comma-separated, increasing).
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        edges: Option<Vec<f64>>,
        /// Histogram range "lo,hi"; defaults to the data range.
        #[arg(long, value_parser = parse_pair, allow_hyphen_values = true)]
        range: Option<(f64, f64)>,
        /// Scale each histogram so its bins sum to one.
        #[arg(long)]
        normalize: bool,
        /// Draw per-bin statistical uncertainties.
        #[arg(long)]
        errors: bool,
        /// Uncertainty style: ATLAS, fillbetween or errorbar.
        #[arg(long, default_value = "ATLAS")]
        err_style: String,
        /// Histogram type: bar, step, stepfilled or point.
        #[arg(long, default_value = "stepfilled")]
        hist_type: String,
        /// Fill opacity of the histograms (0.0 - 1.0).
        #[arg(long, default_value_t = 1.0)]
        alpha: f64,
        /// Stack the histograms on top of each other.
        #[arg(long)]
        stack: bool,
        /// Add a lower panel with each histogram divided by the first.
        #[arg(long)]
        ratio: bool,
    },
}

/// Input, output and decoration options shared by all plots.
#[derive(Args)]
struct CommonArgs {
    /// Delimited text file; a non-numeric first row gives the column labels.
    #[arg(long, required = true)]
    input: PathBuf,
    /// Output image (.svg or .png).
    #[arg(long, required = true)]
    out: PathBuf,
    /// Column delimiter (a single character, or "tab").
    #[arg(long, default_value = ",", value_parser = parse_delimiter)]
    delimiter: char,
    #[arg(long)]
    xlabel: Option<String>,
    #[arg(long)]
    ylabel: Option<String>,
    #[arg(long)]
    title: Option<String>,
    /// Logarithmic x axis.
    #[arg(long)]
    logx: bool,
    /// Logarithmic y axis.
    #[arg(long)]
    logy: bool,
    /// x-axis limits "lo,hi".
    #[arg(long, value_parser = parse_pair, allow_hyphen_values = true)]
    xlim: Option<(f64, f64)>,
    /// y-axis limits "lo,hi".
    #[arg(long, value_parser = parse_pair, allow_hyphen_values = true)]
    ylim: Option<(f64, f64)>,
    /// Legend preset (default inside, default outside, fancy inside, fancy outside) or "none".
    #[arg(long, default_value = "default inside")]
    legend: String,
    /// Grid preset (default, dashed, dotted, dash-dot, minor).
    #[arg(long)]
    grid: Option<String>,
    /// Style preset (default, publication small, publication, presentation, ATLAS) or a JSON style sheet.
    #[arg(long, default_value = "default")]
    style: String,
    /// Colour theme (light, dark) or a JSON colour theme.
    #[arg(long, default_value = "light")]
    color_theme: String,
    /// Raster resolution for PNG output.
    #[arg(long, default_value_t = 300)]
    dpi: u32,
    /// Force overwrite of an existing output file.
    #[arg(short, long)]
    force: bool,
}

fn parse_pair(s: &str) -> Result<(f64, f64), String> {
    let (lo, hi) = s
        .split_once(',')
        .ok_or_else(|| format!("expected \"lo,hi\", got '{}'", s))?;
    let lo: f64 = lo.trim().parse().map_err(|e| format!("invalid lower bound '{}': {}", lo, e))?;
    let hi: f64 = hi.trim().parse().map_err(|e| format!("invalid upper bound '{}': {}", hi, e))?;
    if lo >= hi {
        return Err(format!("lower bound {} must be below upper bound {}", lo, hi));
    }
    Ok((lo, hi))
}

fn parse_delimiter(s: &str) -> Result<char, String> {
    if s == "tab" || s == "\\t" {
        return Ok('\t');
    }
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(format!("delimiter must be a single character, got '{}'", s)),
    }
}

fn is_json_path(value: &str) -> bool {
    value.to_lowercase().ends_with(".json") || Path::new(value).is_file()
}

fn style_setting(value: &str) -> Result<StyleSetting> {
    if is_json_path(value) {
        let sheet = StyleSheet::load(value)
            .with_context(|| format!("Error loading style sheet {}", value))?;
        Ok(sheet.into())
    } else {
        Ok(value.into())
    }
}

fn color_theme_setting(value: &str) -> Result<ColorThemeSetting> {
    if is_json_path(value) {
        let theme = ColorTheme::load(value)
            .with_context(|| format!("Error loading colour theme {}", value))?;
        Ok(theme.into())
    } else {
        Ok(value.into())
    }
}

fn check_output_path(path: &Path, force: bool) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            info!("Creating output directory: {:?}", parent);
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Error creating output directory {}", parent.display()))?;
        }
    }
    if !force && path.exists() {
        bail!(
            "Output file {} already exists. Use --force to overwrite.",
            path.display()
        );
    }
    Ok(())
}

impl CommonArgs {
    fn options(&self) -> Result<PlotOptions> {
        let mut options = PlotOptions::new()
            .dpi(self.dpi)
            .style(style_setting(&self.style)?)
            .color_theme(color_theme_setting(&self.color_theme)?);
        if let Some(ref title) = self.title {
            options = options.title(title.as_str());
        }
        Ok(options)
    }

    fn settings(&self, default_ylabel: &str) -> AxesSettings {
        let mut settings = AxesSettings::new()
            .xlabel(self.xlabel.as_deref().unwrap_or("x"))
            .ylabel(self.ylabel.as_deref().unwrap_or(default_ylabel))
            .xlog(self.logx)
            .ylog(self.logy);
        settings.xlim = self.xlim;
        settings.ylim = self.ylim;
        let legend = match self.legend.trim().to_lowercase().as_str() {
            "none" | "off" => None,
            _ => Some(LegendSettings::from(self.legend.as_str())),
        };
        settings
            .legend(legend)
            .grid(self.grid.as_deref().map(GridSettings::from))
    }

    fn read(&self) -> Result<DataTable> {
        let table = read_table(&self.input, self.delimiter)
            .with_context(|| format!("Error reading {}", self.input.display()))?;
        check_output_path(&self.out, self.force)?;
        info!(
            "Read {} columns from {}",
            table.ncols(),
            self.input.display()
        );
        Ok(table)
    }
}

fn run_lines(common: &CommonArgs, kind: &str) -> Result<()> {
    let table = common.read()?;
    if table.ncols() < 2 {
        bail!(
            "{} needs an x column and at least one y column, found {} column(s)",
            common.input.display(),
            table.ncols()
        );
    }
    let mut plot = BasicPlot::new(common.options()?, common.settings("y"))?;
    let x = &table.columns[0];
    for (label, y) in table.headers.iter().zip(&table.columns).skip(1) {
        let (xs, ys): (Vec<f64>, Vec<f64>) = x
            .iter()
            .zip(y)
            .filter(|(a, b)| a.is_finite() && b.is_finite())
            .map(|(a, b)| (*a, *b))
            .unzip();
        plot.add_data(xs, ys, label, kind)
            .with_context(|| format!("Error adding column '{}'", label))?;
    }
    plot.export(&common.out)
        .with_context(|| format!("Error writing {}", common.out.display()))?;
    Ok(())
}

struct HistArgs<'a> {
    bins: Bins,
    range: Option<(f64, f64)>,
    normalize: bool,
    errors: bool,
    err_style: &'a str,
    hist_type: HistType,
    alpha: f64,
    stack: bool,
    ratio: bool,
}

fn run_hist(common: &CommonArgs, args: HistArgs<'_>) -> Result<()> {
    let table = common.read()?;
    let ylabel = if args.normalize { "fraction" } else { "entries" };
    let mut plot = HistPlot::new(common.options()?, common.settings(ylabel))?
        .hist_type(args.hist_type)
        .normalize(args.normalize)
        .alpha(args.alpha)
        .stack(args.stack)
        .ratio(args.ratio);

    // Count bins over the range of every column so the histograms line up
    let range = match (&args.bins, args.range) {
        (Bins::Count(_), None) => shared_range(&table),
        (_, range) => range,
    };
    for (i, label) in table.headers.iter().enumerate() {
        let mut builder = plot
            .hist_builder(table.finite(i), args.bins.clone())
            .errors(args.errors)
            .err_style_name(args.err_style)
            .label(label.as_str());
        if let Some((lo, hi)) = range {
            builder = builder.range(lo, hi);
        }
        let hist = builder
            .build()
            .with_context(|| format!("Error binning column '{}'", label))?;
        plot.add(hist);
    }
    plot.export(&common.out)
        .with_context(|| format!("Error writing {}", common.out.display()))?;
    Ok(())
}

/// Range of all finite values in the table, `None` if it is empty or a
/// single value.
fn shared_range(table: &DataTable) -> Option<(f64, f64)> {
    let (lo, hi) = table
        .columns
        .iter()
        .flatten()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    (lo < hi).then_some((lo, hi))
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Lines { common, kind } => run_lines(common, kind),
        Commands::Hist {
            common,
            bins,
            edges,
            range,
            normalize,
            errors,
            err_style,
            hist_type,
            alpha,
            stack,
            ratio,
        } => {
            let hist_type: HistType = hist_type.parse()?;
            let bins = match edges {
                Some(edges) => Bins::Edges(edges.clone()),
                None => Bins::Count(*bins),
            };
            run_hist(
                common,
                HistArgs {
                    bins,
                    range: *range,
                    normalize: *normalize,
                    errors: *errors,
                    err_style,
                    hist_type,
                    alpha: *alpha,
                    stack: *stack,
                    ratio: *ratio,
                },
            )
        }
    }
}

fn init_logging(cli: &Cli) -> Result<()> {
    let mut log_builder = env_logger::Builder::from_default_env();
    log_builder
        .filter_level(cli.log_level.to_level_filter())
        .format_module_path(false);
    if let Some(ref path) = cli.log_file {
        let file = if cli.append_log {
            std::fs::File::options().create(true).append(true).open(path)
        } else {
            std::fs::File::create(path)
        }
        .with_context(|| format!("Could not open log file '{}'", path))?;
        log_builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    log_builder.init();
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = init_logging(&cli) {
        eprintln!("{:#}", e);
        std::process::exit(2);
    }
    if let Err(e) = run(&cli) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
