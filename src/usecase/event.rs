use crate::usecase::stats::SccStats;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum AppEvent {
    PhaseStarted {
        name: String,
    },
    PhaseFinished {
        name: String,
    },

    GraphLoaded {
        vertices: usize,
        edges: usize,
        labeled: bool,
    },

    ComponentFound {
        index: usize,
        size: usize,
        cyclic: bool,
    },

    SccComputed {
        vertices: usize,
        edges: usize,
        components: usize,
        cyclic_components: usize,
    },

    Verified {
        components: usize,
    },

    Finished {
        stats: SccStats,
    },
}
