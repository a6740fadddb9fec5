use serde::Serialize;

use crate::entity_graph::{EntityGraph, RelationKind};
use crate::selection::FieldSelection;

/// Separator between segments of a dotted relationship path.
pub const PATH_SEPARATOR: char = '.';

/// Directive sink of a query builder that supports both eager-loading
/// strategies. Implementations must be idempotent: adding a path twice has
/// the effect of adding it once.
pub trait EagerLoadQuery {
    /// Single-round-trip strategy: fetch the relation via a join. Only valid
    /// for to-one relations outside any to-many branch.
    fn add_join_eager_load(&mut self, path: &str);

    /// Separate-round-trip strategy: fetch the relation in a follow-up query
    /// keyed by parent identifiers.
    fn add_batch_eager_load(&mut self, path: &str);
}

/// Accumulated eager-load directives for one query-building pass, partitioned
/// by strategy. Paths keep first-insertion order; duplicates are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EagerLoadPlan {
    pub joins: Vec<String>,
    pub batches: Vec<String>,
}

impl EagerLoadPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.joins.is_empty() && self.batches.is_empty()
    }
}

impl EagerLoadQuery for EagerLoadPlan {
    fn add_join_eager_load(&mut self, path: &str) {
        if !self.joins.iter().any(|existing| existing == path) {
            self.joins.push(path.to_string());
        }
    }

    fn add_batch_eager_load(&mut self, path: &str) {
        if !self.batches.iter().any(|existing| existing == path) {
            self.batches.push(path.to_string());
        }
    }
}

/// Walk a selection against the relationship graph and issue the eager-load
/// directives needed to serve it without N+1 round trips.
///
/// Flat fields are visited before nested ones at each level. Names that do
/// not resolve to a relation on the current entity are skipped, so plain
/// scalar columns fall through untouched; an entity missing from the graph
/// ends the walk for that branch. To-one relations load join-style, to-many
/// relations batch-style, and everything nested beneath a to-many, at any
/// depth, is forced to batch-style as well: joining onto an already
/// batch-loaded branch would multiply its rows.
pub fn expand_eager_loads<Q: EagerLoadQuery>(
    query: &mut Q,
    selection: &FieldSelection,
    graph: &EntityGraph,
    entity: &str,
) {
    expand_level(query, selection, graph, entity, "", false);
}

fn expand_level<Q: EagerLoadQuery>(
    query: &mut Q,
    selection: &FieldSelection,
    graph: &EntityGraph,
    entity: &str,
    prefix: &str,
    parent_batch_loaded: bool,
) {
    for name in &selection.fields {
        let relation = match graph.relation(entity, name) {
            Some(relation) => relation,
            None => continue,
        };
        add_directive(query, prefix, name, relation.kind, parent_batch_loaded);
    }
    for (name, child) in &selection.nested {
        let relation = match graph.relation(entity, name) {
            Some(relation) => relation,
            None => continue,
        };
        add_directive(query, prefix, name, relation.kind, parent_batch_loaded);

        let child_prefix = format!("{}{}{}", prefix, name, PATH_SEPARATOR);
        let child_batch_loaded = parent_batch_loaded || relation.kind.is_to_many();
        expand_level(
            query,
            child,
            graph,
            relation.target_entity,
            &child_prefix,
            child_batch_loaded,
        );
    }
}

fn add_directive<Q: EagerLoadQuery>(
    query: &mut Q,
    prefix: &str,
    name: &str,
    kind: RelationKind,
    parent_batch_loaded: bool,
) {
    let path = format!("{}{}", prefix, name);
    if kind.is_to_many() || parent_batch_loaded {
        query.add_batch_eager_load(&path);
    } else {
        query.add_join_eager_load(&path);
    }
}
