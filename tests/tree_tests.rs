use sds_tree::tree::{NaryTree, sample_tree};
use sds_tree::{SdsError, Value};
use std::collections::HashSet;

#[test]
fn empty_tree_has_placeholder_root() {
    let tree = NaryTree::new();
    assert_eq!(tree.len(), 1);
    assert!(tree.is_empty());
    assert!(tree.root().is_root());
    assert!(tree.root().value.is_undefined());
    assert_eq!(tree.root().level, 0);
}

#[test]
fn ids_are_dense_and_unique() -> Result<(), Box<dyn std::error::Error>> {
    let tree = sample_tree()?;
    assert_eq!(tree.len(), 13);

    let mut seen = HashSet::new();
    for id in tree.linearize() {
        assert!(seen.insert(id), "duplicate id {}", id);
        assert!(tree.find_by_id(id).is_some());
    }
    assert_eq!(seen.len(), 13);
    Ok(())
}

#[test]
fn level_is_parent_level_plus_one() -> Result<(), Box<dyn std::error::Error>> {
    let tree = sample_tree()?;

    let mut roots = 0;
    for id in tree.linearize() {
        let node = tree.find_by_id(id).ok_or("node missing")?;
        match node.parent {
            Some(pid) => {
                let parent = tree.find_by_id(pid).ok_or("parent missing")?;
                assert_eq!(node.level, parent.level + 1);
                assert!(parent.kids.contains(&id));
            }
            None => {
                roots += 1;
                assert_eq!(node.level, 0);
            }
        }
    }
    assert_eq!(roots, 1);
    Ok(())
}

#[test]
fn linearize_is_breadth_first_and_idempotent() -> Result<(), Box<dyn std::error::Error>> {
    let tree = sample_tree()?;

    let order = tree.linearize();
    // Creation order in sample_tree is already level by level, so the
    // breadth-first order is exactly 0..13.
    assert_eq!(order, (0..13).collect::<Vec<_>>());
    assert_eq!(order, tree.linearize());

    // Levels never decrease along the traversal.
    let mut last_level = 0;
    for id in &order {
        let level = tree.find_by_id(*id).ok_or("node missing")?.level;
        assert!(level >= last_level);
        last_level = level;
    }
    Ok(())
}

#[test]
fn add_child_assigns_next_id_in_append_order() -> Result<(), Box<dyn std::error::Error>> {
    let mut tree = NaryTree::with_root(Value::Int(1));
    let a = tree.add_child(0, Value::Str("a".to_string()))?;
    let b = tree.add_child(0, Value::Char(b'b'))?;
    let c = tree.add_child(a, Value::Double(0.5))?;

    assert_eq!((a, b, c), (1, 2, 3));
    assert_eq!(tree.root().kids, vec![a, b]);
    assert_eq!(tree.find_by_id(c).ok_or("no node")?.level, 2);
    Ok(())
}

#[test]
fn add_child_to_missing_parent_fails() {
    let mut tree = NaryTree::with_root(Value::Int(1));
    let res = tree.add_child(42, Value::Int(2));
    assert!(matches!(res, Err(SdsError::NodeNotFound(42))));
}

#[test]
fn find_by_id_absent_returns_none() -> Result<(), Box<dyn std::error::Error>> {
    let tree = sample_tree()?;
    assert!(tree.find_by_id(999).is_none());
    Ok(())
}

#[test]
fn insert_rejects_orphans_and_second_root() -> Result<(), Box<dyn std::error::Error>> {
    let mut tree = NaryTree::new();

    let res = tree.insert(Value::Int(1), Some(99));
    assert!(matches!(res, Err(SdsError::MissingParent(99))));

    tree.insert(Value::Int(1), None)?;
    let res = tree.insert(Value::Int(2), None);
    assert!(matches!(res, Err(SdsError::Deserialisation(_))));
    Ok(())
}

#[test]
fn counters_are_tree_scoped() -> Result<(), Box<dyn std::error::Error>> {
    let mut first = NaryTree::with_root(Value::Int(1));
    first.add_child(0, Value::Int(2))?;
    first.add_child(0, Value::Int(3))?;

    // A second tree starts numbering from scratch.
    let mut second = NaryTree::with_root(Value::Int(1));
    let id = second.add_child(0, Value::Int(2))?;
    assert_eq!(id, 1);
    Ok(())
}
