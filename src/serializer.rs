use serde::Serialize;
use serde_json::{Map, Value};

use crate::entity_graph::EntityGraph;
use crate::selection::FieldSelection;
use crate::types::{ApertureError, ApertureResult};

/// A flat attribute of a shaped serializer.
///
/// `related_pk_field` is set when the name resolves to a relation; emission
/// then collapses the related object (or list) to the target's primary-key
/// value, so flat selections of relations render as identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatField {
    pub name: String,
    pub related_pk_field: Option<String>,
}

/// Serializer configuration restricted to one selection tree and bound to
/// one entity. Each nested entry carries its own child serializer, scoped to
/// exactly its sub-tree; depth never expands beyond what the tree names.
///
/// Built once per request (dynamic mode) or once at startup (static mode)
/// and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntitySerializer {
    pub entity: String,
    pub fields: Vec<FlatField>,
    pub nested: Vec<(String, EntitySerializer)>,
}

impl EntitySerializer {
    /// Resolve a selection tree against the relationship graph.
    ///
    /// Nested names that do not resolve to a relation on `entity` are
    /// dropped, matching the expander's silent-skip policy. A root or target
    /// entity missing from the graph is a registration mistake and errors
    /// with [`ApertureError::EntityNotRegistered`].
    pub fn resolve(
        graph: &EntityGraph,
        entity: &str,
        selection: &FieldSelection,
    ) -> ApertureResult<Self> {
        let meta = graph
            .entity(entity)
            .ok_or_else(|| ApertureError::entity_not_registered(entity))?;

        let mut fields = Vec::with_capacity(selection.fields.len());
        for name in &selection.fields {
            let related_pk_field = match graph.relation(meta.name, name) {
                Some(relation) => {
                    let target = graph.entity(relation.target_entity).ok_or_else(|| {
                        ApertureError::entity_not_registered(relation.target_entity)
                    })?;
                    Some(target.primary_key_field.to_string())
                }
                None => None,
            };
            fields.push(FlatField {
                name: name.clone(),
                related_pk_field,
            });
        }

        let mut nested = Vec::with_capacity(selection.nested.len());
        for (name, child) in &selection.nested {
            let relation = match graph.relation(meta.name, name) {
                Some(relation) => relation,
                None => continue,
            };
            let child_serializer = Self::resolve(graph, relation.target_entity, child)?;
            nested.push((name.clone(), child_serializer));
        }

        Ok(EntitySerializer {
            entity: meta.name.to_string(),
            fields,
            nested,
        })
    }

    /// Shape one instance to this serializer's fields.
    ///
    /// Flat fields are copied in insertion order, with relations collapsed to
    /// identifiers; nested fields render through their child serializer, with
    /// arrays shaped per element and nulls passed through. Attributes absent
    /// from the instance are omitted. A non-object instance is returned
    /// unchanged.
    pub fn serialize(&self, instance: &Value) -> Value {
        let source = match instance.as_object() {
            Some(map) => map,
            None => return instance.clone(),
        };
        let mut out = Map::new();
        for field in &self.fields {
            let value = match source.get(&field.name) {
                Some(value) => value,
                None => continue,
            };
            let rendered = match &field.related_pk_field {
                Some(pk_field) => collapse_to_pk(value, pk_field),
                None => value.clone(),
            };
            out.insert(field.name.clone(), rendered);
        }
        for (name, child) in &self.nested {
            let value = match source.get(name) {
                Some(value) => value,
                None => continue,
            };
            let rendered = match value {
                Value::Null => Value::Null,
                Value::Array(items) => {
                    Value::Array(items.iter().map(|item| child.serialize(item)).collect())
                }
                other => child.serialize(other),
            };
            out.insert(name.clone(), rendered);
        }
        Value::Object(out)
    }

    /// Shape a list of instances.
    pub fn serialize_many(&self, instances: &[Value]) -> Value {
        Value::Array(
            instances
                .iter()
                .map(|instance| self.serialize(instance))
                .collect(),
        )
    }
}

/// Reduce a related object (or list of them) to its primary-key value.
/// Scalars pass through untouched: a host may hydrate plain foreign keys
/// instead of full objects.
fn collapse_to_pk(value: &Value, pk_field: &str) -> Value {
    match value {
        Value::Object(map) => map.get(pk_field).cloned().unwrap_or(Value::Null),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| collapse_to_pk(item, pk_field))
                .collect(),
        ),
        other => other.clone(),
    }
}
