use aperture::{expand_eager_loads, EagerLoadPlan, EagerLoadQuery, FieldSelection};

#[path = "helpers.rs"]
mod helpers;
use helpers::blog_graph;

/// Records every directive in issue order, for asserting on the sequence.
#[derive(Default)]
struct RecordingQuery {
    directives: Vec<(&'static str, String)>,
}

impl EagerLoadQuery for RecordingQuery {
    fn add_join_eager_load(&mut self, path: &str) {
        self.directives.push(("join", path.to_string()));
    }

    fn add_batch_eager_load(&mut self, path: &str) {
        self.directives.push(("batch", path.to_string()));
    }
}

mod strategy_tests {
    use super::*;

    #[test]
    fn test_flat_to_one_relations_join() {
        let graph = blog_graph();
        let selection = FieldSelection::new().with_fields(["title", "author", "meta"]);
        let mut plan = EagerLoadPlan::new();
        expand_eager_loads(&mut plan, &selection, &graph, "Post");
        assert_eq!(plan.joins, vec!["author", "meta"]);
        assert!(plan.batches.is_empty());
    }

    #[test]
    fn test_flat_to_many_relations_batch() {
        let graph = blog_graph();
        let selection = FieldSelection::new().with_fields(["comments", "tags"]);
        let mut plan = EagerLoadPlan::new();
        expand_eager_loads(&mut plan, &selection, &graph, "Post");
        assert!(plan.joins.is_empty());
        assert_eq!(plan.batches, vec!["comments", "tags"]);
    }

    #[test]
    fn test_nested_to_one_chain_stays_joined() {
        let graph = blog_graph();
        let selection = FieldSelection::new().with_nested(
            "author",
            FieldSelection::new().field("profile"),
        );
        let mut plan = EagerLoadPlan::new();
        expand_eager_loads(&mut plan, &selection, &graph, "Post");
        assert_eq!(plan.joins, vec!["author", "author.profile"]);
        assert!(plan.batches.is_empty());
    }

    #[test]
    fn test_to_many_forces_batch_for_entire_subtree() {
        let graph = blog_graph();
        let selection = FieldSelection::new().with_nested(
            "comments",
            FieldSelection::new()
                .with_nested("author", FieldSelection::new().field("profile")),
        );
        let mut plan = EagerLoadPlan::new();
        expand_eager_loads(&mut plan, &selection, &graph, "Post");
        assert!(plan.joins.is_empty());
        assert_eq!(
            plan.batches,
            vec!["comments", "comments.author", "comments.author.profile"]
        );
    }

    #[test]
    fn test_to_many_below_to_one_batches_from_there_down() {
        let graph = blog_graph();
        let selection = FieldSelection::new().with_nested(
            "author",
            FieldSelection::new().with_nested("posts", FieldSelection::new().field("tags")),
        );
        let mut plan = EagerLoadPlan::new();
        expand_eager_loads(&mut plan, &selection, &graph, "Post");
        assert_eq!(plan.joins, vec!["author"]);
        assert_eq!(plan.batches, vec!["author.posts", "author.posts.tags"]);
    }

    #[test]
    fn test_many_to_many_batches_like_has_many() {
        let graph = blog_graph();
        let selection = FieldSelection::new().with_nested(
            "category",
            FieldSelection::new().field("moderators"),
        );
        let mut plan = EagerLoadPlan::new();
        expand_eager_loads(&mut plan, &selection, &graph, "Post");
        assert_eq!(plan.joins, vec!["category"]);
        assert_eq!(plan.batches, vec!["category.moderators"]);
    }
}

mod skip_tests {
    use super::*;

    #[test]
    fn test_scalar_and_unknown_fields_are_skipped() {
        let graph = blog_graph();
        let selection = FieldSelection::new()
            .with_fields(["title", "no_such_field"])
            .with_nested("not_a_relation", FieldSelection::new().field("x"));
        let mut plan = EagerLoadPlan::new();
        expand_eager_loads(&mut plan, &selection, &graph, "Post");
        assert!(plan.is_empty());
    }

    #[test]
    fn test_unknown_root_entity_is_a_noop() {
        let graph = blog_graph();
        let selection = FieldSelection::new().field("author");
        let mut plan = EagerLoadPlan::new();
        expand_eager_loads(&mut plan, &selection, &graph, "NoSuchEntity");
        assert!(plan.is_empty());
    }
}

mod plan_tests {
    use super::*;

    #[test]
    fn test_re_expansion_is_idempotent() {
        let graph = blog_graph();
        let selection = FieldSelection::new()
            .field("author")
            .with_nested("comments", FieldSelection::new().field("author"));

        let mut once = EagerLoadPlan::new();
        expand_eager_loads(&mut once, &selection, &graph, "Post");

        let mut twice = EagerLoadPlan::new();
        expand_eager_loads(&mut twice, &selection, &graph, "Post");
        expand_eager_loads(&mut twice, &selection, &graph, "Post");

        assert_eq!(once, twice);
    }

    #[test]
    fn test_flat_fields_are_visited_before_nested() {
        let graph = blog_graph();
        let selection = FieldSelection::new()
            .with_nested("comments", FieldSelection::new())
            .field("author");
        let mut query = RecordingQuery::default();
        expand_eager_loads(&mut query, &selection, &graph, "Post");
        assert_eq!(
            query.directives,
            vec![
                ("join", "author".to_string()),
                ("batch", "comments".to_string()),
            ]
        );
    }

    #[test]
    fn test_entity_lookup_tolerates_snake_case_names() {
        let graph = blog_graph();
        let selection = FieldSelection::new().field("moderators");
        let mut plan = EagerLoadPlan::new();
        expand_eager_loads(&mut plan, &selection, &graph, "category");
        assert_eq!(plan.batches, vec!["moderators"]);
    }
}
