//! Tests for TreeBuilder navigation and bulk loading

use texttree::domain::{DomainError, Nested, Style, TreeArena, TreeBuilder};
use texttree::render::Renderer;

#[test]
fn given_child_cursor_when_end_then_returns_to_parent() {
    // Arrange
    let mut tree = TreeArena::new();
    let builder = TreeBuilder::root(&mut tree);
    let root = builder.id();

    // Act
    let child = builder.child("foo").unwrap();
    let child_id = child.id();
    let back = child.end();

    // Assert
    assert_eq!(back.id(), root);
    assert_ne!(child_id, root);
    assert_eq!(tree.parent(child_id).unwrap(), Some(root));
    assert_eq!(tree.parent(root).unwrap(), None);
}

#[test]
fn given_existing_node_when_positioned_then_continues_building_there() {
    // Arrange
    let mut tree = TreeArena::new();
    let root = tree.create_root();
    let foo = tree.new_child(root, "foo").unwrap();

    // Act
    TreeBuilder::at(&mut tree, foo)
        .unwrap()
        .value("late value")
        .child("late child")
        .unwrap();

    // Assert
    assert_eq!(tree.values(foo).unwrap(), vec!["late value"]);
    assert_eq!(tree.find_node(root, "late child").unwrap().len(), 1);
}

#[test]
fn given_empty_title_when_child_then_invalid_title() {
    let mut tree = TreeArena::new();
    let result = TreeBuilder::root(&mut tree).child("");
    assert!(matches!(result, Err(DomainError::InvalidTitle)));
}

#[test]
fn given_values_then_set_values_when_built_then_replaced_in_order() {
    let mut tree = TreeArena::new();
    let root = TreeBuilder::root(&mut tree)
        .value("dropped")
        .values(["x", "y", "z"])
        .id();

    assert_eq!(tree.values(root).unwrap(), vec!["x", "y", "z"]);
}

#[test]
fn given_nested_map_when_loaded_through_cursor_then_builds_children() {
    // Arrange
    let mut tree = TreeArena::new();
    let doc = Nested::map([
        ("title", Nested::from("ignored as title, kept as value")),
        ("a", Nested::list([1, 2])),
        ("b", Nested::map([("x", Nested::list(["x1"]))])),
    ]);

    // Act
    let root = TreeBuilder::root(&mut tree).nested(&doc).unwrap().id();

    // Assert
    assert_eq!(
        tree.values(root).unwrap(),
        vec!["ignored as title, kept as value"]
    );
    let titles: Vec<Option<&str>> = tree
        .children(root)
        .unwrap()
        .into_iter()
        .map(|id| tree.title(id).unwrap())
        .collect();
    assert_eq!(titles, vec![Some("a"), Some("b")]);
    let x = tree.find_node(root, "x").unwrap()[0];
    assert_eq!(tree.values(x).unwrap(), vec!["x1"]);
}

#[test]
fn given_nested_list_of_maps_when_loaded_then_elements_titled_by_index() {
    let mut tree = TreeArena::new();
    let doc = Nested::map([(
        "servers",
        Nested::list([
            Nested::map([("host", "alpha")]),
            Nested::map([("host", "beta")]),
        ]),
    )]);

    let root = TreeBuilder::root(&mut tree).nested(&doc).unwrap().id();

    let output = Renderer::new(&tree).render_to_string(root).unwrap();
    assert_eq!(
        output,
        ".\n│\n└── servers\n    ├── 0\n    │   └── alpha\n    └── 1\n        └── beta\n\n"
    );
}

#[test]
fn given_map_with_empty_key_for_subtree_when_loaded_then_tree_untouched() {
    // Arrange
    let mut tree = TreeArena::new();
    let root = tree.create_root();
    let entries = vec![
        ("ok".to_string(), Nested::list(["v"])),
        ("".to_string(), Nested::list(["w"])),
    ];

    // Act
    let result = tree.add_from_nested_map(root, &entries);

    // Assert
    assert_eq!(result, Err(DomainError::InvalidTitle));
    assert!(tree.children(root).unwrap().is_empty());
    assert_eq!(tree.len(), 1);
}

#[test]
fn given_arena_style_when_building_then_new_nodes_inherit_it() {
    let mut tree = TreeArena::with_style(Style::ascii());
    let root = TreeBuilder::root(&mut tree)
        .child("a")
        .unwrap()
        .style(Style::compact())
        .end()
        .child("b")
        .unwrap()
        .end()
        .id();

    let kids = tree.children(root).unwrap();
    assert_eq!(tree.style(root).unwrap(), &Style::ascii());
    assert_eq!(tree.style(kids[0]).unwrap(), &Style::compact());
    assert_eq!(tree.style(kids[1]).unwrap(), &Style::ascii());
}
