use graphwalk::graphlib::{
    Adjacency, AdjacencyMatrix, Edge, Graph, GraphOptions, GraphProperties, Vertex, VertexId,
};
use graphwalk::{
    Controller, EdgeMark, EdgeSpec, Renderer, Step, VertexMark, VisualizerConfig, repr,
};
use serde::Serialize;
use std::io::Write;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Graphwalk(graphwalk::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Graphwalk(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<graphwalk::Error> for CliError {
    fn from(value: graphwalk::Error) -> Self {
        Self::Graphwalk(value)
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
    Run,
    Show,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    overrides: VisualizerConfig,
    edges: Vec<String>,
    vertices: Option<u32>,
    config: Option<String>,
    json: bool,
    realtime: bool,
}

fn usage() -> &'static str {
    "graphwalk-cli\n\
\n\
USAGE:\n\
  graphwalk-cli [run] [--algorithm <name>] [--preset tree|cycle|dag|grid] [--edge <u-v[:w]>]... [--vertices <n>] [--directed] [--weighted] [--grid] [--start <id>] [--goal <id>] [--speed <n>] [--maze-seed <n>] [--config <path>] [--json] [--realtime]\n\
  graphwalk-cli show [--preset <name>] [--edge <u-v[:w]>]... [--vertices <n>] [--directed] [--weighted] [--grid] [--maze-seed <n>] [--config <path>] [--json]\n\
\n\
ALGORITHMS:\n\
  bfs dfs dijkstra topological components cycle bipartite kruskal prim tarjan\n\
  bellman-ford floyd-warshall astar bidirectional\n\
\n\
NOTES:\n\
  - Without --preset, --edge or --vertices the tree preset is loaded.\n\
  - --edge may be repeated; vertices 0..=max id are created automatically.\n\
  - run prints one line per step; --json prints JSON lines instead.\n\
  - --realtime waits 2000ms/speed between steps (default speed 2).\n\
  - Set GRAPHWALK_LOG (e.g. GRAPHWALK_LOG=debug) to enable logging on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "run" => args.command = Command::Run,
            "show" => args.command = Command::Show,
            "--json" => args.json = true,
            "--realtime" => args.realtime = true,
            "--directed" => args.overrides.directed = Some(true),
            "--weighted" => args.overrides.weighted = Some(true),
            "--grid" => args.overrides.grid = Some(true),
            "--algorithm" | "-a" => {
                let Some(name) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.overrides.algorithm = Some(name.clone());
            }
            "--preset" => {
                let Some(name) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.overrides.preset = Some(name.clone());
            }
            "--edge" => {
                let Some(edge) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.edges.push(edge.clone());
            }
            "--vertices" => {
                let Some(n) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.vertices = Some(n.parse::<u32>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--start" => {
                let Some(id) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.overrides.start = Some(parse_vertex(id)?);
            }
            "--goal" => {
                let Some(id) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.overrides.goal = Some(parse_vertex(id)?);
            }
            "--speed" => {
                let Some(speed) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let speed = speed.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
                if !(speed.is_finite() && speed > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
                args.overrides.speed = Some(speed);
            }
            "--maze-seed" => {
                let Some(seed) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.overrides.maze_seed =
                    Some(seed.parse::<u64>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            _ => return Err(CliError::Usage(usage())),
        }
    }

    Ok(args)
}

fn parse_vertex(text: &str) -> Result<VertexId, CliError> {
    text.parse::<u32>()
        .map(VertexId)
        .map_err(|_| CliError::Usage(usage()))
}

/// Prints step-independent results: a final summary and, for all-pairs runs, the last grid.
struct TerminalRenderer {
    json: bool,
    order: Vec<VertexId>,
    steps: usize,
    visited: usize,
    accepted: usize,
    matrix: Option<Vec<Vec<f64>>>,
}

impl TerminalRenderer {
    fn new(json: bool, graph: &Graph) -> Self {
        Self {
            json,
            order: graph.vertex_ids(),
            steps: 0,
            visited: 0,
            accepted: 0,
            matrix: None,
        }
    }
}

impl Renderer for TerminalRenderer {
    fn reset_highlights(&mut self) {
        self.steps = 0;
        self.visited = 0;
        self.accepted = 0;
        self.matrix = None;
    }

    fn highlight_vertex(&mut self, _id: VertexId, mark: VertexMark) {
        if mark == VertexMark::Visited {
            self.visited += 1;
        }
    }

    fn highlight_edge(&mut self, _u: VertexId, _v: VertexId, mark: EdgeMark) {
        if mark == EdgeMark::Accepted {
            self.accepted += 1;
        }
    }

    fn show_matrix(&mut self, matrix: &[Vec<f64>]) {
        self.matrix = Some(matrix.to_vec());
    }

    fn set_status(&mut self, _message: &str) {
        self.steps += 1;
    }

    fn finished(&mut self) {
        if self.json {
            return;
        }
        if let Some(matrix) = &self.matrix {
            print!("{}", repr::distance_grid(&self.order, matrix));
        }
        println!(
            "-- finished after {} steps ({} vertex visits, {} accepted edges)",
            self.steps, self.visited, self.accepted
        );
    }

    fn redraw(&mut self, graph: &Graph) {
        self.order = graph.vertex_ids();
    }
}

fn load_config(args: &Args) -> Result<VisualizerConfig, CliError> {
    let base = match args.config.as_deref() {
        Some(path) => VisualizerConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => VisualizerConfig::default(),
    };
    Ok(base.merge(args.overrides.clone()))
}

/// Upper bound on the vertices created from `--edge` and `--vertices`.
const MAX_VERTICES: u32 = 10_000;

fn build_graph(args: &Args, config: &VisualizerConfig) -> Result<Graph, CliError> {
    let specs = args
        .edges
        .iter()
        .map(|e| e.parse::<EdgeSpec>())
        .collect::<Result<Vec<_>, _>>()?;
    let options = GraphOptions {
        directed: config.directed.unwrap_or(false),
        weighted: config
            .weighted
            .unwrap_or_else(|| specs.iter().any(|s| s.weight.is_some())),
        grid: config.grid.unwrap_or(false),
    };
    let mut graph = Graph::new(options);

    let mut needed = args.vertices.unwrap_or(0);
    for spec in &specs {
        let count = spec
            .max_vertex()
            .0
            .checked_add(1)
            .ok_or(CliError::Usage("edge endpoint is out of range"))?;
        needed = needed.max(count);
    }
    if needed > MAX_VERTICES {
        return Err(CliError::Usage("too many vertices (at most 10000)"));
    }
    for i in 0..needed {
        let angle = std::f64::consts::TAU * f64::from(i) / f64::from(needed);
        graph.add_vertex(400.0 + 200.0 * angle.cos(), 300.0 + 200.0 * angle.sin());
    }
    for spec in &specs {
        if spec.add_to(&mut graph).is_none() {
            tracing::warn!(edge = %spec, "edge rejected");
        }
    }
    Ok(graph)
}

fn build_controller(args: &Args) -> Result<Controller<TerminalRenderer>, CliError> {
    let mut config = load_config(args)?;
    let explicit = !args.edges.is_empty() || args.vertices.is_some();
    if config.preset.is_some() && explicit {
        return Err(CliError::Usage(
            "--preset cannot be combined with --edge or --vertices",
        ));
    }
    if config.preset.is_none() && !explicit {
        config.preset = Some("tree".to_string());
    }
    let graph = build_graph(args, &config)?;
    let renderer = TerminalRenderer::new(args.json, &graph);
    let mut controller = Controller::new(graph, renderer);
    config.apply_to(&mut controller)?;
    tracing::debug!(
        algorithm = %controller.algorithm(),
        vertices = controller.graph().vertex_count(),
        edges = controller.graph().edge_count(),
        "controller ready"
    );
    Ok(controller)
}

fn write_step(out: &mut impl Write, index: usize, step: &Step, json: bool) -> Result<(), CliError> {
    if json {
        serde_json::to_writer(&mut *out, step)?;
        writeln!(out)?;
        return Ok(());
    }
    write!(out, "{index:>4} {:<9} {}", step.kind.as_str(), step.message)?;
    if let Some(frontier) = &step.frontier {
        write!(out, "  [{}]", frontier.join(", "))?;
    }
    if let (Some(distances), None) = (&step.distances, &step.matrix) {
        write!(out, "  {{{}}}", repr::distances(distances))?;
    }
    writeln!(out)?;
    Ok(())
}

fn play(args: &Args) -> Result<(), CliError> {
    let mut controller = build_controller(args)?;
    let mut out = std::io::stdout().lock();
    if args.realtime {
        if let Some(step) = controller.start() {
            write_step(&mut out, controller.applied_steps(), &step, args.json)?;
            out.flush()?;
        }
        while let Some(wait) = controller.time_to_next_step() {
            std::thread::sleep(wait);
            if controller.advance(wait) == 0 {
                continue;
            }
            if let Some(step) = controller.last_step() {
                write_step(&mut out, controller.applied_steps(), step, args.json)?;
                out.flush()?;
            }
        }
    } else {
        while let Some(step) = controller.step() {
            write_step(&mut out, controller.applied_steps(), &step, args.json)?;
        }
    }
    out.flush()?;
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ShowOut<'a> {
    options: GraphOptions,
    vertices: &'a [Vertex],
    edges: &'a [Edge],
    adjacency: Adjacency,
    adjacency_matrix: AdjacencyMatrix,
    properties: GraphProperties,
}

fn show(args: &Args) -> Result<(), CliError> {
    let controller = build_controller(args)?;
    let g = controller.graph();
    if args.json {
        let out = ShowOut {
            options: g.options(),
            vertices: g.vertices(),
            edges: g.edges(),
            adjacency: g.adjacency(),
            adjacency_matrix: g.adjacency_matrix(),
            properties: g.properties(),
        };
        serde_json::to_writer_pretty(std::io::stdout().lock(), &out)?;
        println!();
        return Ok(());
    }
    let props = g.properties();
    print!("Adjacency list:\n{}", repr::adjacency_list(g));
    print!("\nAdjacency matrix:\n{}", repr::adjacency_matrix(g));
    println!("\nEdge list:\n{}", repr::edge_list(g).trim_end());
    println!(
        "\nProperties: vertices={} edges={} components={} tree={}",
        props.vertices,
        props.edges,
        props.components,
        if props.likely_tree { "likely" } else { "no" }
    );
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    match args.command {
        Command::Run => play(&args),
        Command::Show => show(&args),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("GRAPHWALK_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    init_tracing();

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

    match run(args) {
        Ok(()) => {}
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
