use std::future::Future;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use clap::{Args, Parser, Subcommand, ValueEnum};
use nexus::api::ai::{AnalysisRequest, DEFAULT_ANALYSIS_TYPE, DEFAULT_HISTORY_LIMIT};
use nexus::api::analytics::{DEFAULT_METRICS_RANGE, HeatmapQuery, ReportFormat, TrendQuery};
use nexus::api::datasets::{DEFAULT_PREVIEW_LIMIT, DatasetFilters, DownloadFormat};
use nexus::api::ingestion::HistoryQuery;
use nexus::config::{ConfigError, DEFAULT_API_URL, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS, Timeouts};
use nexus::format::{format_coordinates, format_file_size};
use nexus::{ApiClient, ApiConfig, ApiError, FetchHook, FetchOptions};
use serde::Serialize;
use serde_json::Value;
use skymap::engine::SkyMap;
use skymap::projection::{Point, Viewport};
use skymap::svg::SvgSurface;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{message}")]
    Api {
        message: String,
        #[source]
        source: ApiError,
    },
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("sky map render failed")]
    Render(#[from] std::fmt::Error),
}

impl From<ApiError> for CliError {
    fn from(source: ApiError) -> Self {
        Self::Api { message: source.user_message(), source }
    }
}

#[derive(Parser, Debug)]
#[command(name = "nexus", about = "Nexus astronomical dataset client")]
struct Cli {
    #[arg(long, env = "NEXUS_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    #[arg(long, env = "NEXUS_AUTH_TOKEN", hide_env_values = true)]
    auth_token: Option<String>,

    #[arg(long, env = "NEXUS_REQUEST_TIMEOUT_SECS", default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    request_timeout_secs: u64,

    #[arg(long, env = "NEXUS_CONNECT_TIMEOUT_SECS", default_value_t = DEFAULT_CONNECT_TIMEOUT_SECS)]
    connect_timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Datasets(DatasetsCommand),
    /// Compare two datasets.
    Compare { dataset_a: String, dataset_b: String },
    /// Upload a data file for ingestion.
    Upload {
        path: PathBuf,
        #[arg(long)]
        source: String,
    },
    Ingestion(IngestionCommand),
    Analytics(AnalyticsCommand),
    Ai(AiCommand),
    Skymap(SkymapCommand),
}

#[derive(Args, Debug)]
struct DatasetsCommand {
    #[command(subcommand)]
    command: DatasetsSubcommand,
}

#[derive(Subcommand, Debug)]
enum DatasetsSubcommand {
    List {
        #[arg(long, help = "Full-text search query")]
        search: Option<String>,
        #[command(flatten)]
        filters: FilterArgs,
    },
    Show {
        id: String,
        #[arg(long)]
        metadata: bool,
        #[arg(long)]
        stats: bool,
    },
    Preview {
        id: String,
        #[arg(long, default_value_t = DEFAULT_PREVIEW_LIMIT)]
        limit: u32,
    },
    Download {
        id: String,
        #[arg(long, value_enum, default_value_t = FormatArg::Csv)]
        format: FormatArg,
        #[arg(long, short, help = "Output file; stdout when omitted")]
        output: Option<PathBuf>,
    },
    Delete {
        id: String,
    },
    ObjectTypes,
    CoordinateSystems,
}

#[derive(Args, Debug, Clone, Default)]
struct FilterArgs {
    #[arg(long)]
    source: Option<String>,
    #[arg(long)]
    object_type: Option<String>,
    #[arg(long)]
    coordinate_system: Option<String>,
    #[arg(long)]
    date_from: Option<String>,
    #[arg(long)]
    date_to: Option<String>,
}

impl From<FilterArgs> for DatasetFilters {
    fn from(args: FilterArgs) -> Self {
        Self {
            source: args.source,
            object_type: args.object_type,
            coordinate_system: args.coordinate_system,
            date_from: args.date_from,
            date_to: args.date_to,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum FormatArg {
    Csv,
    Json,
    Fits,
    Vot,
}

impl From<FormatArg> for DownloadFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => Self::Csv,
            FormatArg::Json => Self::Json,
            FormatArg::Fits => Self::Fits,
            FormatArg::Vot => Self::VoTable,
        }
    }
}

#[derive(Args, Debug)]
struct IngestionCommand {
    #[command(subcommand)]
    command: IngestionSubcommand,
}

#[derive(Subcommand, Debug)]
enum IngestionSubcommand {
    Status {
        job_id: String,
    },
    History {
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
    Confirm {
        job_id: String,
    },
    Cancel {
        job_id: String,
    },
    Sources,
    Formats,
    /// Preview how an uploaded file will be normalized.
    Preview {
        file_id: String,
    },
}

#[derive(Args, Debug)]
struct AnalyticsCommand {
    #[command(subcommand)]
    command: AnalyticsSubcommand,
}

#[derive(Subcommand, Debug)]
enum AnalyticsSubcommand {
    Summary,
    Statistics {
        dataset_id: String,
    },
    Sources,
    Metrics {
        #[arg(long, default_value = DEFAULT_METRICS_RANGE)]
        range: String,
    },
    Distribution {
        dataset_id: String,
        #[arg(long)]
        column: String,
    },
    Trends {
        #[arg(long)]
        range: Option<String>,
        #[arg(long)]
        metric: Option<String>,
        #[arg(long)]
        interval: Option<String>,
    },
    Correlation {
        dataset_id: String,
        #[arg(required = true)]
        columns: Vec<String>,
    },
    Heatmap {
        #[arg(long)]
        dataset_id: Option<String>,
        #[arg(long)]
        source: Option<String>,
        #[arg(long)]
        resolution: Option<u32>,
    },
    Normalization,
    /// Download the analytics report.
    Export {
        #[arg(long, value_enum, default_value_t = ReportArg::Pdf)]
        format: ReportArg,
        #[arg(long, short, help = "Output file; stdout when omitted")]
        output: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum ReportArg {
    Pdf,
    Csv,
    Json,
}

impl From<ReportArg> for ReportFormat {
    fn from(arg: ReportArg) -> Self {
        match arg {
            ReportArg::Pdf => Self::Pdf,
            ReportArg::Csv => Self::Csv,
            ReportArg::Json => Self::Json,
        }
    }
}

#[derive(Args, Debug)]
struct AiCommand {
    #[command(subcommand)]
    command: AiSubcommand,
}

#[derive(Subcommand, Debug)]
enum AiSubcommand {
    Ask {
        question: String,
        #[arg(long, help = "JSON object passed as context")]
        context: Option<String>,
    },
    Insights {
        dataset_id: String,
    },
    Analyze {
        #[arg(required = true)]
        dataset_ids: Vec<String>,
        #[arg(long, default_value = DEFAULT_ANALYSIS_TYPE)]
        analysis_type: String,
    },
    Status {
        job_id: String,
    },
    Results {
        job_id: String,
    },
    Anomalies {
        dataset_id: String,
        #[arg(long, help = "JSON object of detection parameters")]
        params: Option<String>,
    },
    Outliers {
        dataset_id: String,
        columns: Vec<String>,
    },
    Patterns {
        #[arg(required = true)]
        dataset_ids: Vec<String>,
    },
    Recommendations,
    History {
        #[arg(long, default_value_t = DEFAULT_HISTORY_LIMIT)]
        limit: u32,
    },
}

#[derive(Args, Debug)]
struct SkymapCommand {
    #[command(subcommand)]
    command: SkymapSubcommand,
}

#[derive(Subcommand, Debug)]
enum SkymapSubcommand {
    /// Render the sky map as SVG.
    Render {
        #[command(flatten)]
        view: ViewArgs,
        #[arg(long, short, help = "Output file; stdout when omitted")]
        output: Option<PathBuf>,
    },
    /// Report the object under a pixel.
    Pick {
        #[arg(allow_hyphen_values = true)]
        x: f64,
        #[arg(allow_hyphen_values = true)]
        y: f64,
        #[command(flatten)]
        view: ViewArgs,
    },
}

#[derive(Args, Debug)]
struct ViewArgs {
    #[arg(long, default_value_t = 800.0)]
    width: f64,
    #[arg(long, default_value_t = 500.0)]
    height: f64,
    #[arg(long, help = "Load objects from the API instead of the demo sample")]
    from_api: bool,
    #[arg(long, help = "Plot raw instead of normalized coordinates")]
    raw: bool,
    #[arg(long = "toggle", value_name = "SOURCE", help = "Flip a source on or off; repeatable")]
    toggles: Vec<String>,
    #[arg(long, default_value_t = 0, allow_hyphen_values = true, help = "Zoom button presses; negative zooms out")]
    zoom_steps: i32,
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pan_x: f64,
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pan_y: f64,
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let timeouts = Timeouts { request_secs: cli.request_timeout_secs, connect_secs: cli.connect_timeout_secs };
    let config = ApiConfig::new(&cli.api_url, cli.auth_token, timeouts)?;
    let client = ApiClient::new(&config)?;

    match cli.command {
        Command::Datasets(cmd) => run_datasets(&client, cmd.command).await,
        Command::Compare { dataset_a, dataset_b } => {
            let cmp = fetch(&client, move |c| {
                let (a, b) = (dataset_a.clone(), dataset_b.clone());
                async move { c.compare_datasets(&a, &b).await }
            })
            .await?;
            print_json(&cmp)
        }
        Command::Upload { path, source } => run_upload(&client, path, source).await,
        Command::Ingestion(cmd) => run_ingestion(&client, cmd.command).await,
        Command::Analytics(cmd) => run_analytics(&client, cmd.command).await,
        Command::Ai(cmd) => run_ai(&client, cmd.command).await,
        Command::Skymap(cmd) => run_skymap(&client, cmd.command).await,
    }
}

/// Run one request through a [`FetchHook`], surfacing its error message.
async fn fetch<T, F, Fut>(client: &ApiClient, request: F) -> Result<T, CliError>
where
    T: Clone + Send + Sync + 'static,
    F: Fn(ApiClient) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
{
    let client = client.clone();
    let hook = FetchHook::new(move |()| request(client.clone()), FetchOptions::default());
    match hook.mount().await {
        Some(Ok(value)) => Ok(value),
        Some(Err(source)) => {
            let message = hook.state().error.unwrap_or_else(|| source.user_message());
            Err(CliError::Api { message, source })
        }
        None => Err(CliError::Api {
            message: "request did not run".to_owned(),
            source: ApiError::Network("request did not run".to_owned()),
        }),
    }
}

async fn run_datasets(client: &ApiClient, cmd: DatasetsSubcommand) -> Result<(), CliError> {
    match cmd {
        DatasetsSubcommand::List { search, filters } => {
            let filters = DatasetFilters::from(filters);
            let list = fetch(client, move |c| {
                let (search, filters) = (search.clone(), filters.clone());
                async move {
                    match search {
                        Some(q) => c.search_datasets(&q, &filters).await,
                        None => c.list_datasets(&filters).await,
                    }
                }
            })
            .await?;
            tracing::info!(shown = list.items().len(), total = list.total(), "datasets");
            print_json(&list)
        }
        DatasetsSubcommand::Show { id, metadata, stats } => {
            let value: Value = fetch(client, move |c| {
                let id = id.clone();
                async move {
                    let mut value = serde_json::to_value(c.get_dataset(&id).await?).map_err(decode_err)?;
                    if metadata {
                        value["metadata"] = serde_json::to_value(c.dataset_metadata(&id).await?).map_err(decode_err)?;
                    }
                    if stats {
                        value["stats"] = serde_json::to_value(c.dataset_stats(&id).await?).map_err(decode_err)?;
                    }
                    Ok::<_, ApiError>(value)
                }
            })
            .await?;
            print_json(&value)
        }
        DatasetsSubcommand::Preview { id, limit } => {
            let preview = fetch(client, move |c| {
                let id = id.clone();
                async move { c.dataset_preview(&id, limit).await }
            })
            .await?;
            print_json(&preview)
        }
        DatasetsSubcommand::Download { id, format, output } => {
            let bytes = fetch(client, move |c| {
                let id = id.clone();
                async move { c.download_dataset(&id, format.into()).await }
            })
            .await?;
            tracing::info!(size = %format_file_size(bytes.len() as u64), "downloaded");
            match output {
                Some(path) => tokio::fs::write(path, &bytes).await?,
                None => std::io::stdout().lock().write_all(&bytes)?,
            }
            Ok(())
        }
        DatasetsSubcommand::Delete { id } => {
            let ack = fetch(client, move |c| {
                let id = id.clone();
                async move { c.delete_dataset(&id).await }
            })
            .await?;
            print_json(&ack)
        }
        DatasetsSubcommand::ObjectTypes => print_json(&fetch(client, |c| async move { c.object_types().await }).await?),
        DatasetsSubcommand::CoordinateSystems => {
            print_json(&fetch(client, |c| async move { c.coordinate_systems().await }).await?)
        }
    }
}

fn decode_err(e: serde_json::Error) -> ApiError {
    ApiError::Decode(e.to_string())
}

async fn run_upload(client: &ApiClient, path: PathBuf, source: String) -> Result<(), CliError> {
    let last = Arc::new(AtomicU8::new(0));
    let job = fetch(client, move |c| {
        let (path, source, last) = (path.clone(), source.clone(), Arc::clone(&last));
        async move {
            c.upload_file(&path, &source, move |pct| {
                // Report every tenth percent once.
                let bucket = pct / 10;
                if last.fetch_max(bucket + 1, Ordering::Relaxed) <= bucket {
                    eprintln!("uploading: {pct}%");
                }
            })
            .await
        }
    })
    .await?;
    print_json(&job)
}

async fn run_ingestion(client: &ApiClient, cmd: IngestionSubcommand) -> Result<(), CliError> {
    match cmd {
        IngestionSubcommand::Status { job_id } => {
            let job = fetch(client, move |c| {
                let job_id = job_id.clone();
                async move { c.ingestion_status(&job_id).await }
            })
            .await?;
            tracing::info!(status = ?job.status, terminal = job.status.is_terminal(), "ingestion job");
            print_json(&job)
        }
        IngestionSubcommand::History { status, limit } => {
            let query = HistoryQuery { status, limit };
            let jobs = fetch(client, move |c| {
                let query = query.clone();
                async move { c.ingestion_history(&query).await }
            })
            .await?;
            print_json(&jobs)
        }
        IngestionSubcommand::Confirm { job_id } => {
            let job = fetch(client, move |c| {
                let job_id = job_id.clone();
                async move { c.confirm_ingestion(&job_id).await }
            })
            .await?;
            print_json(&job)
        }
        IngestionSubcommand::Cancel { job_id } => {
            let job = fetch(client, move |c| {
                let job_id = job_id.clone();
                async move { c.cancel_ingestion(&job_id).await }
            })
            .await?;
            print_json(&job)
        }
        IngestionSubcommand::Sources => print_json(&fetch(client, |c| async move { c.data_sources().await }).await?),
        IngestionSubcommand::Formats => {
            print_json(&fetch(client, |c| async move { c.supported_formats().await }).await?)
        }
        IngestionSubcommand::Preview { file_id } => {
            let preview = fetch(client, move |c| {
                let file_id = file_id.clone();
                async move { c.preview_normalization(&file_id).await }
            })
            .await?;
            print_json(&preview)
        }
    }
}

async fn run_analytics(client: &ApiClient, cmd: AnalyticsSubcommand) -> Result<(), CliError> {
    match cmd {
        AnalyticsSubcommand::Summary => {
            print_json(&fetch(client, |c| async move { c.analytics_summary().await }).await?)
        }
        AnalyticsSubcommand::Statistics { dataset_id } => {
            let stats = fetch(client, move |c| {
                let id = dataset_id.clone();
                async move { c.dataset_statistics(&id).await }
            })
            .await?;
            print_json(&stats)
        }
        AnalyticsSubcommand::Sources => {
            print_json(&fetch(client, |c| async move { c.source_distribution().await }).await?)
        }
        AnalyticsSubcommand::Metrics { range } => {
            let metrics = fetch(client, move |c| {
                let range = range.clone();
                async move { c.ingestion_metrics(&range).await }
            })
            .await?;
            if let Some(rate) = metrics.success_rate() {
                tracing::info!(success = %nexus::format::format_percentage(rate, 1), "ingestion metrics");
            }
            print_json(&metrics)
        }
        AnalyticsSubcommand::Distribution { dataset_id, column } => {
            let dist = fetch(client, move |c| {
                let (id, column) = (dataset_id.clone(), column.clone());
                async move { c.value_distribution(&id, &column).await }
            })
            .await?;
            print_json(&dist)
        }
        AnalyticsSubcommand::Trends { range, metric, interval } => {
            let query = TrendQuery { range, metric, interval };
            let trends = fetch(client, move |c| {
                let query = query.clone();
                async move { c.trends(&query).await }
            })
            .await?;
            print_json(&trends)
        }
        AnalyticsSubcommand::Correlation { dataset_id, columns } => {
            let corr = fetch(client, move |c| {
                let (id, columns) = (dataset_id.clone(), columns.clone());
                async move { c.correlation(&id, &columns).await }
            })
            .await?;
            print_json(&corr)
        }
        AnalyticsSubcommand::Heatmap { dataset_id, source, resolution } => {
            let query = HeatmapQuery { dataset_id, source, resolution };
            let heatmap = fetch(client, move |c| {
                let query = query.clone();
                async move { c.heatmap(&query).await }
            })
            .await?;
            print_json(&heatmap)
        }
        AnalyticsSubcommand::Normalization => {
            print_json(&fetch(client, |c| async move { c.normalization_metrics().await }).await?)
        }
        AnalyticsSubcommand::Export { format, output } => {
            let bytes = fetch(client, move |c| async move { c.export_analytics(format.into()).await }).await?;
            tracing::info!(size = %format_file_size(bytes.len() as u64), "exported report");
            match output {
                Some(path) => tokio::fs::write(path, &bytes).await?,
                None => std::io::stdout().lock().write_all(&bytes)?,
            }
            Ok(())
        }
    }
}

async fn run_ai(client: &ApiClient, cmd: AiSubcommand) -> Result<(), CliError> {
    match cmd {
        AiSubcommand::Ask { question, context } => {
            let context = context.as_deref().map(serde_json::from_str::<Value>).transpose()?;
            let answer = fetch(client, move |c| {
                let (question, context) = (question.clone(), context.clone());
                async move { c.ask(&question, context).await }
            })
            .await?;
            print_json(&answer)
        }
        AiSubcommand::Insights { dataset_id } => {
            let insights = fetch(client, move |c| {
                let id = dataset_id.clone();
                async move { c.ai_insights(&id).await }
            })
            .await?;
            print_json(&insights)
        }
        AiSubcommand::Analyze { dataset_ids, analysis_type } => {
            let request = AnalysisRequest { dataset_ids, analysis_type };
            let job = fetch(client, move |c| {
                let request = request.clone();
                async move { c.run_analysis(&request).await }
            })
            .await?;
            print_json(&job)
        }
        AiSubcommand::Status { job_id } => {
            let job = fetch(client, move |c| {
                let job_id = job_id.clone();
                async move { c.analysis_status(&job_id).await }
            })
            .await?;
            print_json(&job)
        }
        AiSubcommand::Results { job_id } => {
            let results = fetch(client, move |c| {
                let job_id = job_id.clone();
                async move { c.analysis_results(&job_id).await }
            })
            .await?;
            print_json(&results)
        }
        AiSubcommand::Anomalies { dataset_id, params } => {
            let params = params.as_deref().map(serde_json::from_str::<Value>).transpose()?;
            let found = fetch(client, move |c| {
                let (id, params) = (dataset_id.clone(), params.clone());
                async move { c.detect_anomalies(&id, params).await }
            })
            .await?;
            tracing::info!(findings = found.findings.len(), "anomaly detection");
            print_json(&found)
        }
        AiSubcommand::Outliers { dataset_id, columns } => {
            let found = fetch(client, move |c| {
                let (id, columns) = (dataset_id.clone(), columns.clone());
                async move { c.find_outliers(&id, &columns).await }
            })
            .await?;
            print_json(&found)
        }
        AiSubcommand::Patterns { dataset_ids } => {
            let found = fetch(client, move |c| {
                let ids = dataset_ids.clone();
                async move { c.discover_patterns(&ids).await }
            })
            .await?;
            print_json(&found)
        }
        AiSubcommand::Recommendations => {
            print_json(&fetch(client, |c| async move { c.recommendations().await }).await?)
        }
        AiSubcommand::History { limit } => {
            print_json(&fetch(client, move |c| async move { c.analysis_history(limit).await }).await?)
        }
    }
}

async fn run_skymap(client: &ApiClient, cmd: SkymapSubcommand) -> Result<(), CliError> {
    match cmd {
        SkymapSubcommand::Render { view, output } => {
            let map = build_map(client, &view).await?;
            let mut svg = SvgSurface::new(map.viewport());
            map.render(&mut svg)?;
            tracing::info!(status = %map.status_line(), "rendered sky map");
            let svg = svg.finish();
            match output {
                Some(path) => tokio::fs::write(path, svg).await?,
                None => println!("{svg}"),
            }
            Ok(())
        }
        SkymapSubcommand::Pick { x, y, view } => {
            let mut map = build_map(client, &view).await?;
            map.on_pointer_move(Point::new(x, y));
            match map.hovered() {
                Some(obj) => {
                    let coord = obj.coord(map.filter().view_mode());
                    println!("{}", map.tooltip().map(|t| t.to_string()).unwrap_or_default());
                    println!("  Position: {}", format_coordinates(coord.map(|c| c.ra), coord.map(|c| c.dec)));
                }
                None => println!("nothing at ({x}, {y})"),
            }
            Ok(())
        }
    }
}

/// Sky map in the state described by `view`.
async fn build_map(client: &ApiClient, view: &ViewArgs) -> Result<SkyMap, CliError> {
    let objects = if view.from_api {
        fetch(client, |c| async move { c.sky_objects(&DatasetFilters::default()).await }).await?
    } else {
        Vec::new()
    };

    let mut map = SkyMap::new(objects, Viewport::new(view.width, view.height), !view.raw);
    if let Some(seed) = view.seed {
        map = map.with_seed(seed);
    }
    for source in &view.toggles {
        map.toggle_source(source);
    }
    for _ in 0..view.zoom_steps.unsigned_abs() {
        if view.zoom_steps > 0 {
            map.zoom_in();
        } else {
            map.zoom_out();
        }
    }
    if view.pan_x.abs() > f64::EPSILON || view.pan_y.abs() > f64::EPSILON {
        let start = map.viewport().center();
        map.on_pointer_down(start);
        map.on_pointer_move(Point::new(start.x + view.pan_x, start.y + view.pan_y));
        map.on_pointer_up();
    }
    Ok(map)
}

fn print_json(value: &impl Serialize) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
