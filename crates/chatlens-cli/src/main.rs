use chatlens_core::{AnalyticsResults, ChatlensConfig, UserSelection};
use chatlens_render::charts::{
    activity_bar, emoji_pie, timeline_chart, top_users_pie, top_users_table,
};
use chatlens_render::model::{
    BarChartModel, LineChartModel, PieChartModel, TableModel, TimelineKind,
};
use chatlens_render::session::{ChartSlot, RenderPlan, SlotAction};
use chatlens_render::svg::{SvgRenderOptions, render_word_cloud_svg};
use chatlens_render::{LayoutOptions, layout_results_word_cloud};
use serde::Serialize;
use std::io::Read;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Payload(chatlens_core::Error),
    Render(chatlens_render::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Payload(err) => write!(f, "{err}"),
            CliError::Render(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<chatlens_core::Error> for CliError {
    fn from(value: chatlens_core::Error) -> Self {
        Self::Payload(value)
    }
}

impl From<chatlens_render::Error> for CliError {
    fn from(value: chatlens_render::Error) -> Self {
        Self::Render(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    WordCloud,
    Render,
    Charts,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    width: f64,
    height: f64,
    config: Option<String>,
    user: Option<String>,
    diagram_id: Option<String>,
    background: Option<String>,
    out: Option<String>,
}

#[derive(Serialize)]
struct ChartsOut<'a> {
    selection: &'a UserSelection,
    plan: &'a RenderPlan,
    activity: BarChartModel,
    top_users_pie: Option<PieChartModel>,
    top_users_table: Option<TableModel>,
    emoji_pie: Option<PieChartModel>,
    daily_timeline: Option<LineChartModel>,
    monthly_timeline: Option<LineChartModel>,
    hourly_timeline: Option<LineChartModel>,
}

fn usage() -> &'static str {
    "chatlens-cli\n\
\n\
USAGE:\n\
  chatlens-cli [wordcloud] [--pretty] [--width <w>] [--height <h>] [--config <path>] [<path>|-]\n\
  chatlens-cli render [--width <w>] [--height <h>] [--config <path>] [--id <svg-id>] [--background <css-color>] [--out <path>] [<path>|-]\n\
  chatlens-cli charts [--pretty] [--user <name>] [--config <path>] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - Input is a stats response ({\"results\": ...}) or a bare results object.\n\
  - A missing or zero --width/--height uses the configured fallback canvas (800x500).\n\
  - charts defaults to the 'Overall' selection.\n\
  - Set RUST_LOG (e.g. RUST_LOG=chatlens_render=debug) for diagnostics on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "wordcloud" => args.command = Command::WordCloud,
            "render" => args.command = Command::Render,
            "charts" => args.command = Command::Charts,
            "--pretty" => args.pretty = true,
            "--width" => {
                let Some(w) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.width = w.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
            }
            "--height" => {
                let Some(h) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.height = h.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
            }
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--user" => {
                let Some(user) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                if user.trim().is_empty() {
                    return Err(CliError::Usage(usage()));
                }
                args.user = Some(user.clone());
            }
            "--id" => {
                let Some(id) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.diagram_id = Some(id.clone());
            }
            "--background" => {
                let Some(bg) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                if !bg.trim().is_empty() {
                    args.background = Some(bg.trim().to_string());
                }
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn load_config(path: Option<&str>) -> Result<ChatlensConfig, CliError> {
    match path {
        None => Ok(ChatlensConfig::default()),
        Some(path) => {
            tracing::debug!(path, "loading config");
            let text = std::fs::read_to_string(path)?;
            Ok(ChatlensConfig::from_json_str(&text)?)
        }
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    Ok(())
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None | Some("-") => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn build_charts<'a>(
    results: &AnalyticsResults,
    selection: &'a UserSelection,
    plan: &'a RenderPlan,
    config: &ChatlensConfig,
) -> ChartsOut<'a> {
    let charts = &config.charts;
    let rendered = |slot: ChartSlot| plan.action(slot) == SlotAction::Render;
    ChartsOut {
        selection,
        plan,
        activity: activity_bar(results, charts),
        top_users_pie: rendered(ChartSlot::TopUsersPie)
            .then(|| top_users_pie(results, charts))
            .flatten(),
        top_users_table: rendered(ChartSlot::TopUsersTable)
            .then(|| top_users_table(results, charts))
            .flatten(),
        emoji_pie: emoji_pie(results, charts),
        daily_timeline: timeline_chart(TimelineKind::Daily, results, charts),
        monthly_timeline: timeline_chart(TimelineKind::Monthly, results, charts),
        hourly_timeline: timeline_chart(TimelineKind::Hourly, results, charts),
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let results = chatlens_core::parse_results(&text)?;
    let config = load_config(args.config.as_deref())?;

    match args.command {
        Command::WordCloud => {
            let options = LayoutOptions {
                config,
                ..Default::default()
            };
            let layout = layout_results_word_cloud(&results, args.width, args.height, &options)?;
            write_json(&layout, args.pretty)?;
            Ok(())
        }
        Command::Render => {
            let font_family = config.word_cloud.font_family.clone();
            let options = LayoutOptions {
                config,
                ..Default::default()
            };
            let layout = layout_results_word_cloud(&results, args.width, args.height, &options)?;
            let mut svg_options = SvgRenderOptions {
                diagram_id: args.diagram_id.clone(),
                background: args.background.clone(),
                ..Default::default()
            };
            if let Some(family) = font_family {
                svg_options.font_family = family;
            }
            let svg = render_word_cloud_svg(&layout, &svg_options);
            write_text(&svg, args.out.as_deref())?;
            Ok(())
        }
        Command::Charts => {
            let selection = args
                .user
                .as_deref()
                .map(UserSelection::parse)
                .unwrap_or_default();
            let plan = RenderPlan::for_results(&results, &selection);
            let out = build_charts(&results, &selection, &plan, &config);
            write_json(&out, args.pretty)?;
            Ok(())
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn main() {
    init_logging();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
