//
//  builder.rs
//  Trellis
//
//  Created by hak (tharun)
//

use tracing::debug;

use super::engine::TypeGraph;
use super::inference::run_global_passes;
use crate::decl::Declaration;

/// Build a fully analyzed graph from a complete declaration stream.
///
/// Ingests every declaration first, then runs the global inference passes —
/// the passes query "all nodes"/"all conformers", so they only produce a
/// complete graph once ingestion has finished. Producers driving ingestion
/// incrementally can call `add_declaration` themselves and finish with
/// `run_global_passes`.
pub fn build_graph<I>(declarations: I) -> TypeGraph
where
    I: IntoIterator<Item = Declaration>,
{
    let mut graph = TypeGraph::new();
    let mut ingested = 0usize;
    for decl in declarations {
        graph.add_declaration(decl);
        ingested += 1;
    }
    debug!(declarations = ingested, "ingestion complete");

    run_global_passes(&mut graph);
    graph
}
