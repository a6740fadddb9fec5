// Entity relationship metadata used to resolve field names during query
// expansion and serializer shaping.

use once_cell::sync::OnceCell;
use serde::Serialize;

use crate::types::{ApertureError, ApertureResult};

/// Relationship cardinality, switched on exhaustively by the query-plan
/// expander and the shape resolver.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum RelationKind {
    /// Forward to-one: this entity holds the foreign key.
    BelongsTo,
    /// Reverse to-one: the target holds a unique foreign key back.
    HasOne,
    /// Reverse to-many.
    HasMany,
    /// To-many through a junction table.
    ManyToMany,
}

impl RelationKind {
    /// To-many relations can never be joined without duplicating parent rows.
    pub fn is_to_many(&self) -> bool {
        matches!(self, RelationKind::HasMany | RelationKind::ManyToMany)
    }
}

/// One step from an entity to a related entity.
#[derive(Debug, Clone, Serialize)]
pub struct RelationMeta {
    pub name: &'static str,
    pub kind: RelationKind,
    pub target_entity: &'static str,
}

/// Static description of one entity exposed through the API.
#[derive(Debug, Clone, Serialize)]
pub struct EntityMeta {
    pub name: &'static str,
    pub primary_key_field: &'static str,
    pub relations: Vec<RelationMeta>,
}

impl EntityMeta {
    pub fn new(name: &'static str, primary_key_field: &'static str) -> Self {
        Self {
            name,
            primary_key_field,
            relations: Vec::new(),
        }
    }

    /// Declare a relation reachable from this entity.
    pub fn relation(
        mut self,
        name: &'static str,
        kind: RelationKind,
        target_entity: &'static str,
    ) -> Self {
        self.relations.push(RelationMeta {
            name,
            kind,
            target_entity,
        });
        self
    }
}

/// Registry of entity metadata, built once at startup and read-only while
/// requests are served.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EntityGraph {
    entities: Vec<EntityMeta>,
}

impl EntityGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, meta: EntityMeta) -> Self {
        self.entities.push(meta);
        self
    }

    /// Look up entity metadata with namespace-aware resolution
    pub fn entity(&self, entity_name: &str) -> Option<&EntityMeta> {
        // Try exact match first
        if let Some(meta) = self.entities.iter().find(|meta| meta.name == entity_name) {
            return Some(meta);
        }
        // Try with namespace prefix stripped (e.g. "blog::Post" -> "Post")
        if let Some(colon_pos) = entity_name.rfind("::") {
            let name_without_namespace = &entity_name[colon_pos + 2..];
            if let Some(meta) = self
                .entities
                .iter()
                .find(|meta| meta.name == name_without_namespace)
            {
                return Some(meta);
            }
        }
        // Try snake_case to PascalCase conversion
        let pascal_case = to_pascal_case(entity_name);
        self.entities.iter().find(|meta| meta.name == pascal_case)
    }

    /// Resolve a field name on an entity to a relation. `None` means the
    /// name is not a relationship (a plain column, or unknown).
    pub fn relation(&self, entity_name: &str, field_name: &str) -> Option<&RelationMeta> {
        self.entity(entity_name)?
            .relations
            .iter()
            .find(|relation| relation.name == field_name)
    }
}

// Helper function to convert to PascalCase
fn to_pascal_case(s: &str) -> String {
    let mut out = String::new();
    let mut capitalize = true;
    for c in s.chars() {
        if c == '_' {
            capitalize = true;
        } else if capitalize {
            out.push(c.to_ascii_uppercase());
            capitalize = false;
        } else {
            out.push(c);
        }
    }
    out
}

// Process-wide graph, installed once during startup before request handling
static ENTITY_GRAPH: OnceCell<EntityGraph> = OnceCell::new();

/// Install the process-wide entity graph. Fails when called twice.
pub fn init_entity_graph(graph: EntityGraph) -> ApertureResult<()> {
    ENTITY_GRAPH
        .set(graph)
        .map_err(|_| ApertureError::invalid_configuration("entity graph", "already initialized"))
}

pub fn entity_graph() -> Option<&'static EntityGraph> {
    ENTITY_GRAPH.get()
}

/// The process-wide graph, or a configuration error when startup never
/// installed one.
pub fn require_entity_graph() -> ApertureResult<&'static EntityGraph> {
    entity_graph().ok_or_else(|| {
        ApertureError::missing_configuration("entity graph", "call init_entity_graph at startup")
    })
}
