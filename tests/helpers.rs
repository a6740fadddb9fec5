use aperture::{EntityGraph, EntityMeta, RelationKind};

/// Blog-shaped test graph covering all four relation cardinalities.
#[allow(dead_code)]
pub fn blog_graph() -> EntityGraph {
    EntityGraph::new()
        .register(
            EntityMeta::new("Post", "id")
                .relation("author", RelationKind::BelongsTo, "User")
                .relation("category", RelationKind::BelongsTo, "Category")
                .relation("meta", RelationKind::HasOne, "PostMeta")
                .relation("comments", RelationKind::HasMany, "Comment")
                .relation("tags", RelationKind::ManyToMany, "Tag"),
        )
        .register(
            EntityMeta::new("User", "id")
                .relation("profile", RelationKind::HasOne, "Profile")
                .relation("posts", RelationKind::HasMany, "Post"),
        )
        .register(
            EntityMeta::new("Comment", "id")
                .relation("author", RelationKind::BelongsTo, "User")
                .relation("post", RelationKind::BelongsTo, "Post"),
        )
        .register(
            EntityMeta::new("Category", "id").relation(
                "moderators",
                RelationKind::ManyToMany,
                "User",
            ),
        )
        .register(EntityMeta::new("Profile", "id").relation(
            "user",
            RelationKind::BelongsTo,
            "User",
        ))
        .register(EntityMeta::new("PostMeta", "id"))
        .register(EntityMeta::new("Tag", "id").relation("posts", RelationKind::ManyToMany, "Post"))
}
