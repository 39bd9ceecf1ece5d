use crate::domain::graph::SccResult;
use crate::domain::traits::SccDetector;
use crate::infrastructure::serde_json_adapter::{GraphFileDto, SccReportDto};
use crate::usecase::event::AppEvent;
use crate::usecase::load::{build_graph, LoadedGraph};
use crate::usecase::stats::SccStats;
use crate::usecase::validate::verify_scc_result;
use anyhow::{Context, Result};
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, Default)]
pub struct SccOptions {
    /// Re-check the decomposition for partition, reachability and maximality.
    pub verify: bool,
}

/// Loads a graph document, runs `detector` on it and assembles the report.
pub async fn compute_components(
    input: &GraphFileDto,
    detector: &dyn SccDetector,
    options: SccOptions,
    sink: Option<mpsc::Sender<AppEvent>>,
) -> Result<(SccReportDto, SccStats)> {
    emit(&sink, AppEvent::PhaseStarted { name: "load".into() }).await;
    let loaded = build_graph(input).context("building graph from document")?;
    emit(
        &sink,
        AppEvent::GraphLoaded {
            vertices: loaded.graph.vertex_count(),
            edges: loaded.graph.edge_count(),
            labeled: loaded.labels.is_some(),
        },
    )
    .await;
    emit(&sink, AppEvent::PhaseFinished { name: "load".into() }).await;

    emit(&sink, AppEvent::PhaseStarted { name: "scc".into() }).await;
    let scc = detector.compute_scc(&loaded.graph);
    for (index, comp) in scc.components.iter().enumerate() {
        emit(
            &sink,
            AppEvent::ComponentFound {
                index,
                size: comp.len(),
                cyclic: scc.cyclic_component[index],
            },
        )
        .await;
    }
    emit(
        &sink,
        AppEvent::SccComputed {
            vertices: loaded.graph.vertex_count(),
            edges: loaded.graph.edge_count(),
            components: scc.component_count(),
            cyclic_components: scc.cyclic_count(),
        },
    )
    .await;
    emit(&sink, AppEvent::PhaseFinished { name: "scc".into() }).await;

    if options.verify {
        emit(&sink, AppEvent::PhaseStarted { name: "verify".into() }).await;
        verify_scc_result(&loaded.graph, &scc).context("verifying components")?;
        emit(
            &sink,
            AppEvent::Verified {
                components: scc.component_count(),
            },
        )
        .await;
        emit(&sink, AppEvent::PhaseFinished { name: "verify".into() }).await;
    }

    let stats = SccStats::from_result(&loaded.graph, &scc);
    let report = build_report(&loaded, &scc);

    emit(
        &sink,
        AppEvent::Finished {
            stats: stats.clone(),
        },
    )
    .await;
    Ok((report, stats))
}

pub fn build_report(loaded: &LoadedGraph, scc: &SccResult) -> SccReportDto {
    SccReportDto {
        vertex_count: loaded.graph.vertex_count(),
        edge_count: loaded.graph.edge_count(),
        component_count: scc.component_count(),
        components: scc.components.clone(),
        labels: loaded
            .labels
            .as_ref()
            .map(|labels| scc.components.iter().map(|c| labels.names_of(c)).collect()),
        cyclic: scc.cyclic_component.clone(),
    }
}

/// `SCC #k: a b c` lines, preferring names when the report has them.
pub fn render_components(report: &SccReportDto) -> String {
    let mut out = String::new();
    for (i, comp) in report.components.iter().enumerate() {
        let members: Vec<String> = match report.labels.as_ref().and_then(|l| l.get(i)) {
            Some(names) => names.clone(),
            None => comp.iter().map(|v| v.to_string()).collect(),
        };
        out.push_str(&format!("SCC #{}: {}\n", i + 1, members.join(" ")));
    }
    out
}

async fn emit(sink: &Option<mpsc::Sender<AppEvent>>, ev: AppEvent) {
    if let Some(tx) = sink {
        let _ = tx.send(ev).await;
    }
}
