use scratchrobin_layout::{
    Direction, EdgeSpec, Graph, LayoutAlgorithm, LayoutOptions, NodeSpec, layout,
};
use serde::Deserialize;
use std::io::Read;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "SCRATCHROBIN_LOG";

#[derive(Debug)]
enum CliError {
    Usage(String),
    Io(std::io::Error),
    Json(serde_json::Error),
    Graph(scratchrobin_graph::Error),
    Layout(scratchrobin_layout::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Graph(err) => write!(f, "invalid graph: {err}"),
            CliError::Layout(err) => write!(f, "{err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<scratchrobin_graph::Error> for CliError {
    fn from(value: scratchrobin_graph::Error) -> Self {
        Self::Graph(value)
    }
}

impl From<scratchrobin_layout::Error> for CliError {
    fn from(value: scratchrobin_layout::Error) -> Self {
        Self::Layout(value)
    }
}

#[derive(Debug, Default)]
struct Args {
    algorithm: Option<LayoutAlgorithm>,
    direction: Option<Direction>,
    seed: Option<u64>,
    options: Option<String>,
    strict: bool,
    pretty: bool,
    list_algorithms: bool,
    input: Option<String>,
}

/// Graph document read from the input.
#[derive(Debug, Deserialize)]
struct Document {
    #[serde(default)]
    nodes: Vec<NodeSpec>,
    #[serde(default)]
    edges: Vec<EdgeSpec>,
    #[serde(default)]
    options: Option<LayoutOptions>,
}

fn usage() -> String {
    format!(
        "scratchrobin-layout {}\n\n\
         Usage:\n  \
         scratchrobin-layout [--algorithm <name>] [--direction TB|BT|LR|RL] [--seed <n>]\n    \
         [--options <json>] [--strict] [--pretty] [<path>|-]\n  \
         scratchrobin-layout --list-algorithms\n\n\
         Input is a JSON document {{\"nodes\": [...], \"edges\": [...], \"options\": {{...}}}}.\n\
         Flags override the document's options. Output is a JSON array of node positions.\n\n\
         Algorithms: {}\n\
         Logging is controlled by {LOG_ENV} (default: warn).",
        scratchrobin_layout::VERSION,
        LayoutAlgorithm::available().join(", "),
    )
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "--pretty" => args.pretty = true,
            "--strict" => args.strict = true,
            "--list-algorithms" => args.list_algorithms = true,
            "--algorithm" => {
                let Some(name) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.algorithm = Some(LayoutAlgorithm::parse_lossy(name));
            }
            "--direction" => {
                let Some(dir) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.direction = Some(Direction::parse_lossy(dir));
            }
            "--seed" => {
                let Some(seed) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.seed = Some(seed.parse::<u64>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--options" => {
                let Some(json) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.options = Some(json.clone());
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
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
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

fn write_json(value: &impl serde::Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

/// Document options, then `--options`, then the individual flags.
fn resolve_options(
    args: &Args,
    doc_options: Option<LayoutOptions>,
) -> Result<LayoutOptions, CliError> {
    let mut options = match &args.options {
        Some(json) => LayoutOptions::from_json_str(json)?,
        None => doc_options.unwrap_or_default(),
    };
    if let Some(algorithm) = args.algorithm {
        options.algorithm = algorithm;
    }
    if let Some(direction) = args.direction {
        options.direction = direction;
    }
    if args.seed.is_some() {
        options.seed = args.seed;
    }
    if args.strict {
        options.strict_external = true;
    }
    Ok(options)
}

fn run(args: Args) -> Result<(), CliError> {
    if args.list_algorithms {
        for name in LayoutAlgorithm::available() {
            println!("{name}");
        }
        return Ok(());
    }

    let text = read_input(args.input.as_deref())?;
    let doc: Document = serde_json::from_str(&text)?;
    let options = resolve_options(&args, doc.options)?;
    let graph = Graph::from_parts(doc.nodes, doc.edges)?;
    if graph.dropped_edges() > 0 {
        tracing::warn!(
            dropped = graph.dropped_edges(),
            "ignoring edges with unknown endpoints"
        );
    }

    let positions = layout(&graph, &options)?;
    write_json(&positions, args.pretty)
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
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
