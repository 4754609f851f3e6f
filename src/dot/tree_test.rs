use super::*;
use crate::outline::{parse_markdown, parse_text};

fn ids(raw: &[Option<usize>]) -> Vec<Option<NodeId>> {
    raw.iter().map(|p| p.map(NodeId)).collect()
}

#[test]
fn nested_outline_parents() {
    let nodes = parse_text("- A\n  - B\n    - C\n  - D");
    assert_eq!(parents(&nodes), ids(&[None, Some(0), Some(1), Some(0)]));
}

#[test]
fn equal_depths_are_siblings_not_children() {
    let nodes = parse_text("- Alpha\n- Beta");
    assert_eq!(parents(&nodes), ids(&[None, None]));
    assert_eq!(root_count(&nodes), 2);
}

#[test]
fn shallower_second_line_is_another_root() {
    let nodes = parse_text("    - Deep\n- Shallow");
    assert_eq!(parents(&nodes), ids(&[None, None]));
}

#[test]
fn depth_gaps_create_no_intermediate_levels() {
    let nodes = parse_text("Root\n        Far\n  Near");
    assert_eq!(parents(&nodes), ids(&[None, Some(0), Some(0)]));
}

#[test]
fn return_to_shallower_level_pops_to_true_ancestor() {
    let nodes = parse_text("R\n  A\n    A1\n      A1x\n   B\n");
    // B (depth 3) pops A1x (6) and A1 (4), stops at A (2).
    assert_eq!(parents(&nodes), ids(&[None, Some(0), Some(1), Some(2), Some(1)]));
}

#[test]
fn markdown_levels_resolve_the_same_way() {
    let nodes = parse_markdown("# T\n## A\n### A1\n## B\n# U\n### U1").unwrap();
    assert_eq!(parents(&nodes), ids(&[None, Some(0), Some(1), Some(0), None, Some(4)]));
}

#[test]
fn every_parent_is_the_nearest_shallower_predecessor() {
    let nodes = parse_text("a\n  b\n      c\n    d\n  e\n        f\n g\nh\n   i");
    for (index, parent) in parents(&nodes).into_iter().enumerate() {
        let expected = nodes[..index]
            .iter()
            .rev()
            .find(|n| n.depth() < nodes[index].depth())
            .map(Node::id);
        assert_eq!(parent, expected, "node {index}");
    }
}

#[test]
fn empty_input_has_no_parents() {
    assert!(parents(&[]).is_empty());
    assert_eq!(root_count(&[]), 0);
}
