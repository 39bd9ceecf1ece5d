use crate::domain::graph::Graph;
use crate::domain::traits::SccDetector;
use crate::infrastructure::event_ndjson::spawn_ndjson_printer;
use crate::infrastructure::scc_kosaraju::KosarajuSccDetector;
use crate::infrastructure::serde_json_adapter::{read_graph_file, write_report_file};
use crate::usecase::event::AppEvent;
use crate::usecase::load::LoadedGraph;
use crate::usecase::scc::{build_report, compute_components, render_components, SccOptions};
use crate::usecase::validate::validate_graph;
use anyhow::{anyhow, Context, Result};
use std::env;
use tokio::sync::mpsc;

pub async fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    run_with_args(&args).await
}

pub async fn run_with_args(args: &[String]) -> Result<()> {
    let cmd = Cli::parse(args)?;

    match cmd {
        Cli::GraphScc {
            input,
            output,
            emit_events,
            verify,
        } => {
            let (tx, rx) = mpsc::channel::<AppEvent>(1024);
            let printer = if emit_events {
                Some(spawn_ndjson_printer(rx))
            } else {
                drop(rx);
                None
            };

            let dto = read_graph_file(&input)
                .await
                .with_context(|| format!("reading input graph JSON: {input}"))?;

            let detector = KosarajuSccDetector;
            let computed =
                compute_components(&dto, &detector, SccOptions { verify }, Some(tx)).await;

            // The sender is gone once compute_components returns, so the
            // printer drains what was sent, including events before a failure.
            if let Some(handle) = printer {
                handle.await.ok();
            }
            let (report, stats) = computed?;

            match output {
                Some(output) => write_report_file(&output, &report)
                    .await
                    .with_context(|| format!("writing SCC report JSON: {output}"))?,
                None => print!("{}", render_components(&report)),
            }

            eprintln!(
                "summary: vertices={} edges={} components={} cyclic_components={} singleton_components={} largest_component={}",
                stats.vertices,
                stats.edges,
                stats.components,
                stats.cyclic_components,
                stats.singleton_components,
                stats.largest_component
            );
            if verify {
                eprintln!("ok: components verified");
            }

            Ok(())
        }

        Cli::GraphValidate { input } => {
            let dto = read_graph_file(&input)
                .await
                .with_context(|| format!("reading input graph JSON: {input}"))?;

            let loaded = validate_graph(&dto)
                .with_context(|| format!("validating graph: {input}"))?;

            eprintln!("schema validation passed");
            eprintln!(
                "ok: graph validated (vertices={} edges={})",
                loaded.graph.vertex_count(),
                loaded.graph.edge_count()
            );
            Ok(())
        }

        Cli::GraphShow { input } => {
            let dto = read_graph_file(&input)
                .await
                .with_context(|| format!("reading input graph JSON: {input}"))?;
            let loaded = validate_graph(&dto)
                .with_context(|| format!("validating graph: {input}"))?;

            print!("{}", render_adjacency(&loaded));
            Ok(())
        }

        Cli::GraphDemo => {
            let loaded = LoadedGraph {
                graph: demo_graph()?,
                labels: None,
            };
            let scc = KosarajuSccDetector.compute_scc(&loaded.graph);
            let report = build_report(&loaded, &scc);

            print!("{}", loaded.graph);
            println!();
            print!("{}", render_components(&report));
            Ok(())
        }
    }
}

#[derive(Debug)]
enum Cli {
    GraphScc {
        input: String,
        output: Option<String>,
        emit_events: bool,
        verify: bool,
    },
    GraphValidate {
        input: String,
    },
    GraphShow {
        input: String,
    },
    GraphDemo,
}

impl Cli {
    fn parse(args: &[String]) -> Result<Self> {
        // Expected:
        // <bin> graph scc --in/--input <graph.json> [--out/--output <report.json>] [--emit-events] [--verify]
        // <bin> graph validate --in/--input <graph.json>
        // <bin> graph show --in/--input <graph.json>
        // <bin> graph demo
        if args.len() < 3 {
            return Err(anyhow!(usage()));
        }

        if args[1] != "graph" {
            return Err(anyhow!(usage()));
        }

        match args[2].as_str() {
            "scc" => Self::parse_scc(args),
            "validate" => Ok(Cli::GraphValidate {
                input: Self::parse_input_only(args)?,
            }),
            "show" => Ok(Cli::GraphShow {
                input: Self::parse_input_only(args)?,
            }),
            "demo" => match args.get(3) {
                None => Ok(Cli::GraphDemo),
                Some(other) => Err(anyhow!(format!("unknown arg: {other}\n\n{}", usage()))),
            },
            _ => Err(anyhow!(usage())),
        }
    }

    fn parse_scc(args: &[String]) -> Result<Self> {
        let mut input: Option<String> = None;
        let mut output: Option<String> = None;
        let mut emit_events = false;
        let mut verify = false;

        let mut i = 3;
        while i < args.len() {
            match args[i].as_str() {
                "--in" | "--input" => {
                    i += 1;
                    input = args.get(i).cloned();
                }
                "--out" | "--output" => {
                    i += 1;
                    output = Some(
                        args.get(i)
                            .cloned()
                            .ok_or_else(|| anyhow!(format!("missing value for --out\n\n{}", usage())))?,
                    );
                }
                "--emit-events" => {
                    emit_events = true;
                }
                "--verify" => {
                    verify = true;
                }
                "-h" | "--help" => return Err(anyhow!(usage())),
                other => return Err(anyhow!(format!("unknown arg: {other}\n\n{}", usage()))),
            }
            i += 1;
        }

        let input = input.ok_or_else(|| anyhow!(format!("missing --in/--input\n\n{}", usage())))?;

        Ok(Cli::GraphScc {
            input,
            output,
            emit_events,
            verify,
        })
    }

    fn parse_input_only(args: &[String]) -> Result<String> {
        let mut input: Option<String> = None;

        let mut i = 3;
        while i < args.len() {
            match args[i].as_str() {
                "--in" | "--input" => {
                    i += 1;
                    input = args.get(i).cloned();
                }
                "-h" | "--help" => return Err(anyhow!(usage())),
                other => return Err(anyhow!(format!("unknown arg: {other}\n\n{}", usage()))),
            }
            i += 1;
        }

        input.ok_or_else(|| anyhow!(format!("missing --in/--input\n\n{}", usage())))
    }
}

fn usage() -> &'static str {
    "Usage:\n  graph scc --in/--input <graph.json> [--out/--output <report.json>] [--emit-events] [--verify]\n  graph validate --in/--input <graph.json>\n  graph show --in/--input <graph.json>\n  graph demo\n\nInput:\n  {\"vertices\": 3, \"edges\": [[1, 2], [2, 3]]} or {\"edges\": [{\"from\": \"a\", \"to\": \"b\"}]}\n\nEvents:\n  If --emit-events is set, NDJSON events are written to stdout; summary goes to stderr."
}

/// Two disjoint cycles: 1 -> 2 -> 3 -> 1 and 4 -> 5 -> 6 -> 7 -> 4.
fn demo_graph() -> Result<Graph> {
    let mut g = Graph::new(7)?;
    for (u, v) in [(1, 2), (2, 3), (3, 1), (4, 5), (5, 6), (6, 7), (7, 4)] {
        g.add_edge(u, v)?;
    }
    Ok(g)
}

fn render_adjacency(loaded: &LoadedGraph) -> String {
    let Some(labels) = loaded.labels.as_ref() else {
        return loaded.graph.to_string();
    };

    let mut out = String::new();
    for u in loaded.graph.vertices() {
        let outs = labels.names_of(loaded.graph.successors(u));
        let name = labels.name(u).map(str::to_string).unwrap_or_else(|| u.to_string());
        if outs.is_empty() {
            out.push_str(&format!("{name} ->\n"));
        } else {
            out.push_str(&format!("{name} -> {}\n", outs.join(" ")));
        }
    }
    out
}
