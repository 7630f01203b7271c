use fenestra::domain::attribute_node::NodeType;
use fenestra::domain::auth::AuthenticatedUser;
use fenestra::domain::manufacturing_type::NewManufacturingType;
use fenestra::forms::nodes::{NodeDraft, NodeSpec};
use fenestra::repository::ManufacturingTypeWriter;
use fenestra::services::ServiceError;
use fenestra::services::hierarchy::{
    create_node, create_subtree, load_tree, remove_subtree, render_ascii,
};

mod common;

fn superuser() -> AuthenticatedUser {
    AuthenticatedUser {
        user_id: 1,
        email: "admin@example.com".to_string(),
        username: "admin".to_string(),
        is_superuser: true,
        token: String::new(),
    }
}

fn regular_user() -> AuthenticatedUser {
    AuthenticatedUser {
        is_superuser: false,
        ..superuser()
    }
}

#[test]
fn test_create_node_computes_paths_and_depths() {
    let test_db = common::TestDb::new("test_create_node_computes_paths_and_depths.db");
    let repo = test_db.repo();
    let user = superuser();

    let window = repo
        .create_manufacturing_type(&NewManufacturingType::new("Window", "window"))
        .unwrap();

    let frame = create_node(
        &repo,
        &user,
        window.id,
        None,
        NodeDraft::new("Frame Profile", NodeType::Category),
    )
    .unwrap();
    assert_eq!(frame.slug, "frame_profile");
    assert_eq!(frame.path, "frame_profile");
    assert_eq!(frame.depth, 0);

    let material = create_node(
        &repo,
        &user,
        window.id,
        Some(frame.id),
        NodeDraft::new("Material", NodeType::Attribute),
    )
    .unwrap();
    assert_eq!(material.path, "frame_profile.material");
    assert_eq!(material.depth, 1);

    let wood = create_node(
        &repo,
        &user,
        window.id,
        Some(material.id),
        NodeDraft::new("Wood", NodeType::Option),
    )
    .unwrap();
    assert_eq!(wood.path, "frame_profile.material.wood");
    assert_eq!(wood.depth, 2);
}

#[test]
fn test_create_node_enforces_placement_and_uniqueness() {
    let test_db = common::TestDb::new("test_create_node_enforces_placement_and_uniqueness.db");
    let repo = test_db.repo();
    let user = superuser();

    let window = repo
        .create_manufacturing_type(&NewManufacturingType::new("Window", "window"))
        .unwrap();

    // Options cannot be roots.
    let err = create_node(
        &repo,
        &user,
        window.id,
        None,
        NodeDraft::new("Wood", NodeType::Option),
    )
    .expect_err("option root must be rejected");
    assert!(matches!(err, ServiceError::Form(_)));

    let material = create_node(
        &repo,
        &user,
        window.id,
        None,
        NodeDraft::new("Material", NodeType::Attribute),
    )
    .unwrap();

    // Attributes only carry options.
    let err = create_node(
        &repo,
        &user,
        window.id,
        Some(material.id),
        NodeDraft::new("Subgroup", NodeType::Category),
    )
    .expect_err("category under attribute must be rejected");
    assert!(matches!(err, ServiceError::Form(_)));

    let wood = create_node(
        &repo,
        &user,
        window.id,
        Some(material.id),
        NodeDraft::new("Wood", NodeType::Option),
    )
    .unwrap();

    // Options are leaves.
    let err = create_node(
        &repo,
        &user,
        window.id,
        Some(wood.id),
        NodeDraft::new("Oak", NodeType::Option),
    )
    .expect_err("children under option must be rejected");
    assert!(matches!(err, ServiceError::Form(_)));

    // Sibling slugs are unique; the same slug under a different parent is fine.
    let err = create_node(
        &repo,
        &user,
        window.id,
        Some(material.id),
        NodeDraft::new("wood", NodeType::Option),
    )
    .expect_err("duplicate sibling slug must be rejected");
    assert!(matches!(err, ServiceError::Conflict));

    let other = create_node(
        &repo,
        &user,
        window.id,
        None,
        NodeDraft::new("Sash material", NodeType::Attribute),
    )
    .unwrap();
    assert!(
        create_node(
            &repo,
            &user,
            window.id,
            Some(other.id),
            NodeDraft::new("Wood", NodeType::Option),
        )
        .is_ok()
    );
}

#[test]
fn test_mutations_require_a_superuser() {
    let test_db = common::TestDb::new("test_hierarchy_mutations_require_a_superuser.db");
    let repo = test_db.repo();

    let window = repo
        .create_manufacturing_type(&NewManufacturingType::new("Window", "window"))
        .unwrap();

    let err = create_node(
        &repo,
        &regular_user(),
        window.id,
        None,
        NodeDraft::new("Frame", NodeType::Category),
    )
    .expect_err("regular users must not mutate hierarchies");
    assert!(matches!(err, ServiceError::Unauthorized));

    let frame = create_node(
        &repo,
        &superuser(),
        window.id,
        None,
        NodeDraft::new("Frame", NodeType::Category),
    )
    .unwrap();

    let err = remove_subtree(&repo, &regular_user(), frame.id)
        .expect_err("regular users must not delete subtrees");
    assert!(matches!(err, ServiceError::Unauthorized));
}

#[test]
fn test_subtree_roundtrip_and_ascii_rendering() {
    let test_db = common::TestDb::new("test_subtree_roundtrip_and_ascii_rendering.db");
    let repo = test_db.repo();
    let user = superuser();

    let window = repo
        .create_manufacturing_type(&NewManufacturingType::new("Window", "window"))
        .unwrap();

    let spec: NodeSpec = serde_json::from_str(
        r#"{
            "name": "Frame",
            "node_type": "category",
            "children": [
                {
                    "name": "Material",
                    "node_type": "attribute",
                    "required": true,
                    "children": [
                        {"name": "Wood", "node_type": "option", "price_impact_cents": 15000},
                        {"name": "PVC", "node_type": "option"}
                    ]
                },
                {"name": "Color", "node_type": "attribute", "data_type": "text", "sort_order": 1}
            ]
        }"#,
    )
    .unwrap();

    let created = create_subtree(&repo, &user, window.id, None, &spec).unwrap();
    assert_eq!(created, 5);

    let tree = load_tree(&repo, window.id).unwrap();
    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0].node.slug, "frame");
    assert_eq!(tree[0].children.len(), 2);
    let material = &tree[0].children[0];
    assert_eq!(material.node.path, "frame.material");
    assert!(material.node.required);
    assert_eq!(material.children.len(), 2);

    assert_eq!(
        render_ascii(&tree),
        "Frame\n├─ Material\n│  ├─ Wood\n│  └─ PVC\n└─ Color"
    );

    // Deleting the material attribute takes its options with it.
    let removed = remove_subtree(&repo, &user, material.node.id).unwrap();
    assert_eq!(removed, 3);
    let tree = load_tree(&repo, window.id).unwrap();
    assert_eq!(tree[0].children.len(), 1);
    assert_eq!(tree[0].children[0].node.slug, "color");
}

#[test]
fn test_load_tree_rejects_unknown_manufacturing_type() {
    let test_db = common::TestDb::new("test_load_tree_rejects_unknown_manufacturing_type.db");
    let repo = test_db.repo();

    let err = load_tree(&repo, 42).expect_err("missing type must be a not-found error");
    assert!(matches!(err, ServiceError::NotFound));
}
