use serde::Serialize;

use crate::entity_graph::EntityGraph;
use crate::query_plan::{expand_eager_loads, EagerLoadPlan, EagerLoadQuery};
use crate::selection::FieldSelection;
use crate::serializer::EntitySerializer;
use crate::types::ApertureResult;

/// Identifier fields injected into every request-supplied selection.
pub const DEFAULT_ALWAYS_INCLUDED: &[&str] = &["id"];

/// Declaration-time configuration of one API resource: the root entity, the
/// shape served when a request does not narrow it, and the identifier fields
/// every dynamic selection carries.
///
/// Built once at startup and shared read-only across requests. A `fields`
/// parameter that fails to parse surfaces the error to the host; serving the
/// declared shape instead is the usual recovery.
#[derive(Debug, Clone, Serialize)]
pub struct Resource {
    pub entity: &'static str,
    pub selection: FieldSelection,
    pub always_included: Vec<String>,
}

impl Resource {
    pub fn new(entity: &'static str, selection: FieldSelection) -> Self {
        Self {
            entity,
            selection,
            always_included: DEFAULT_ALWAYS_INCLUDED
                .iter()
                .map(|field| field.to_string())
                .collect(),
        }
    }

    /// Replace the default `id` identifier injection.
    pub fn always_included<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.always_included = fields.into_iter().map(Into::into).collect();
        self
    }

    /// The selection serving this request: the parsed `fields` parameter
    /// when present, fully replacing the declared shape (no merging), the
    /// declared shape otherwise.
    pub fn selection_for(&self, fields_param: Option<&str>) -> ApertureResult<FieldSelection> {
        match fields_param {
            Some(raw) => {
                let always: Vec<&str> = self.always_included.iter().map(String::as_str).collect();
                FieldSelection::from_request(raw, &always)
            }
            None => Ok(self.selection.clone()),
        }
    }

    /// Serializer restricted to this request's selection.
    pub fn serializer(
        &self,
        graph: &EntityGraph,
        fields_param: Option<&str>,
    ) -> ApertureResult<EntitySerializer> {
        let selection = self.selection_for(fields_param)?;
        EntitySerializer::resolve(graph, self.entity, &selection)
    }

    /// Issue the eager-load directives this request's selection needs.
    pub fn expand_query<Q: EagerLoadQuery>(
        &self,
        query: &mut Q,
        graph: &EntityGraph,
        fields_param: Option<&str>,
    ) -> ApertureResult<()> {
        let selection = self.selection_for(fields_param)?;
        expand_eager_loads(query, &selection, graph, self.entity);
        Ok(())
    }

    /// Collect this request's eager-load directives into a fresh plan.
    pub fn eager_load_plan(
        &self,
        graph: &EntityGraph,
        fields_param: Option<&str>,
    ) -> ApertureResult<EagerLoadPlan> {
        let mut plan = EagerLoadPlan::new();
        self.expand_query(&mut plan, graph, fields_param)?;
        Ok(plan)
    }
}
