//! Client-driven field selection and eager-load planning for sea-orm APIs.
//!
//! API clients narrow a resource to an arbitrarily nested subset of its
//! fields with a `fields` query parameter:
//!
//! ```text
//! /posts?fields=title,author.fields(name),comments.fields(author.fields(name))
//! ```
//!
//! [`FieldSelection`] parses that parameter into a recursive selection tree,
//! [`EntitySerializer`] shapes response JSON to exactly that tree, and
//! [`expand_eager_loads`] walks the relationship graph to pick join-style or
//! batch-style eager loading for every traversed relation, so the host runs
//! a constant number of queries regardless of the requested shape.

pub mod entity_graph;
pub mod query_plan;
pub mod resource;
pub mod selection;
pub mod serializer;
pub mod types;

pub use entity_graph::*;
pub use query_plan::*;
pub use resource::*;
pub use selection::*;
pub use serializer::*;
pub use types::*;
