//! Tests for Tree traversal, membership, insertion and ancestor distance

use rstest::{fixture, rstest};

use blindtree::application::{render_tree, LayeredGraph};
use blindtree::domain::{NodeId, SearchMethod, Tree, TreeError};
use blindtree::util::testing;

/// root "1" -> 2, 3, 4; "2" -> 5, 6; "5" -> 9, 10
struct Sample {
    tree: Tree<String>,
    root: NodeId,
    n2: NodeId,
    n5: NodeId,
    n6: NodeId,
    n9: NodeId,
    n10: NodeId,
}

#[fixture]
fn sample() -> Sample {
    testing::init_test_setup();
    let (mut tree, root) = Tree::with_root("1".to_string());
    let [n2, n3, n4, n5, n6, n9, n10] =
        ["2", "3", "4", "5", "6", "9", "10"].map(|c| tree.new_node(c.to_string()));
    tree.insert(root, [n2, n3, n4], SearchMethod::Bfs).unwrap();
    tree.insert(n2, [n5, n6], SearchMethod::Bfs).unwrap();
    tree.insert(n5, [n9, n10], SearchMethod::Dfs).unwrap();
    Sample {
        tree,
        root,
        n2,
        n5,
        n6,
        n9,
        n10,
    }
}

fn labels(tree: &Tree<String>, order: &[NodeId]) -> Vec<String> {
    order
        .iter()
        .filter_map(|&id| tree.content(id).cloned())
        .collect()
}

// ============================================================
// Enumeration
// ============================================================

#[rstest]
fn given_sample_tree_when_order_bfs_then_level_by_level(sample: Sample) {
    assert_eq!(
        labels(&sample.tree, &sample.tree.order_bfs()),
        ["1", "2", "3", "4", "5", "6", "9", "10"]
    );
}

#[rstest]
fn given_sample_tree_when_order_dfs_then_left_most_branch_first(sample: Sample) {
    assert_eq!(
        labels(&sample.tree, &sample.tree.order_dfs()),
        ["1", "2", "5", "9", "10", "6", "3", "4"]
    );
}

#[rstest]
fn given_sample_tree_when_ordering_then_both_orders_visit_each_node_once(sample: Sample) {
    let bfs = sample.tree.order_bfs();
    let dfs = sample.tree.order_dfs();
    assert_eq!(bfs.len(), dfs.len());

    let mut bfs_sorted = bfs.clone();
    bfs_sorted.sort();
    bfs_sorted.dedup();
    assert_eq!(bfs_sorted.len(), bfs.len());

    let mut dfs_sorted = dfs.clone();
    dfs_sorted.sort();
    assert_eq!(bfs_sorted, dfs_sorted);
}

#[rstest]
#[case(SearchMethod::Bfs)]
#[case(SearchMethod::Dfs)]
fn given_rootless_tree_when_ordering_then_empty(#[case] method: SearchMethod) {
    let tree: Tree<String> = Tree::new();
    assert!(tree.order(method).is_empty());
}

// ============================================================
// Membership
// ============================================================

#[rstest]
fn given_reachable_nodes_when_is_in_tree_then_true_for_both_methods(sample: Sample) {
    for id in sample.tree.order_bfs() {
        assert!(sample.tree.is_in_tree(id, SearchMethod::Bfs));
        assert!(sample.tree.is_in_tree(id, SearchMethod::Dfs));
    }
}

#[rstest]
#[case(SearchMethod::Bfs)]
#[case(SearchMethod::Dfs)]
fn given_detached_node_when_is_in_tree_then_false(mut sample: Sample, #[case] method: SearchMethod) {
    let detached = sample.tree.new_node("6".to_string());
    assert!(!sample.tree.is_in_tree(detached, method));
}

#[rstest]
fn given_removed_subtree_when_is_in_tree_then_descendants_unreachable(mut sample: Sample) {
    sample.tree.remove_child(sample.n2, sample.n5).unwrap();
    assert!(!sample.tree.is_in_tree(sample.n5, SearchMethod::Bfs));
    assert!(!sample.tree.is_in_tree(sample.n9, SearchMethod::Dfs));
    assert!(sample.tree.is_in_tree(sample.n6, SearchMethod::Dfs));
}

// ============================================================
// Insertion
// ============================================================

#[rstest]
#[case(SearchMethod::Bfs)]
#[case(SearchMethod::Dfs)]
fn given_rootless_tree_when_insert_then_no_root_error(#[case] method: SearchMethod) {
    let mut tree = Tree::new();
    let a = tree.new_node("a");
    let b = tree.new_node("b");
    assert_eq!(tree.insert(a, [b], method), Err(TreeError::NoRoot));
    assert!(tree.node(a).unwrap().is_leaf());
}

#[rstest]
#[case(SearchMethod::Bfs)]
#[case(SearchMethod::Dfs)]
fn given_parent_outside_tree_when_insert_then_error_and_unchanged(
    mut sample: Sample,
    #[case] method: SearchMethod,
) {
    let outsider = sample.tree.new_node("x".to_string());
    let child = sample.tree.new_node("y".to_string());
    let before = sample.tree.order_bfs();

    let result = sample.tree.insert(outsider, [child], method);

    assert_eq!(result, Err(TreeError::ParentNotInTree(outsider)));
    assert!(sample.tree.node(outsider).unwrap().is_leaf());
    assert_eq!(sample.tree.order_bfs(), before);
}

#[rstest]
fn given_stale_child_when_insert_then_nothing_attached(mut sample: Sample) {
    let fresh = sample.tree.new_node("11".to_string());
    let stale = sample.tree.new_node("12".to_string());
    // Frees both detached nodes; re-create one so only `stale` is invalid
    sample.tree.prune_unreachable();
    let fresh_again = sample.tree.new_node("11".to_string());

    let result = sample.tree.insert(sample.n6, [fresh_again, stale], SearchMethod::Bfs);

    assert_eq!(result, Err(TreeError::UnknownNode(stale)));
    assert!(sample.tree.node(sample.n6).unwrap().is_leaf());
    assert!(sample.tree.node(fresh).is_none());
}

#[rstest]
fn given_existing_child_when_insert_again_then_noop(mut sample: Sample) {
    let before = sample.tree.children(sample.n5).unwrap().to_vec();
    sample
        .tree
        .insert(sample.n5, [sample.n9, sample.n10, sample.n9], SearchMethod::Bfs)
        .unwrap();
    assert_eq!(sample.tree.children(sample.n5).unwrap(), before.as_slice());
}

#[rstest]
fn given_new_children_when_insert_then_appended_in_order(mut sample: Sample) {
    let [a, b] = ["7", "8"].map(|c| sample.tree.new_node(c.to_string()));
    sample.tree.insert(sample.n6, [a, b], SearchMethod::Dfs).unwrap();
    assert_eq!(sample.tree.children(sample.n6).unwrap(), &[a, b]);
    assert!(sample.tree.is_in_tree(b, SearchMethod::Bfs));
}

// ============================================================
// Depth and distance
// ============================================================

#[rstest]
fn given_sample_tree_when_distance_from_root_then_edge_count(sample: Sample) {
    let tree = &sample.tree;
    assert_eq!(tree.distance_between(Some(sample.root), sample.root), Some(0));
    assert_eq!(tree.distance_between(Some(sample.root), sample.n2), Some(1));
    assert_eq!(tree.distance_between(Some(sample.root), sample.n5), Some(2));
    assert_eq!(tree.distance_between(Some(sample.root), sample.n9), Some(3));
    assert_eq!(tree.distance_between(Some(sample.n2), sample.n10), Some(2));
}

#[rstest]
fn given_non_descendant_when_distance_then_none(sample: Sample) {
    let tree = &sample.tree;
    assert_eq!(tree.distance_between(Some(sample.n9), sample.root), None);
    assert_eq!(tree.distance_between(Some(sample.n6), sample.n9), None);
    assert_eq!(tree.distance_between(None, sample.n9), None);
}

#[rstest]
fn given_each_node_when_depth_then_max_distance_to_leaf(sample: Sample) {
    let tree = &sample.tree;
    for id in tree.order_dfs() {
        let expected = tree
            .order_dfs()
            .into_iter()
            .filter(|&leaf| tree.node(leaf).unwrap().is_leaf())
            .filter_map(|leaf| tree.distance_between(Some(id), leaf))
            .max()
            .unwrap();
        assert_eq!(tree.depth(id), Some(expected));
    }
    assert_eq!(tree.depth(sample.root), Some(3));
    assert_eq!(tree.depth(sample.n9), Some(0));
}

#[test]
fn given_long_chain_when_depth_and_distance_then_no_stack_overflow() {
    let (mut tree, root) = Tree::with_root(0u32);
    let mut last = root;
    for i in 1..=100_000u32 {
        let next = tree.new_node(i);
        tree.node_mut(last).unwrap().add_child(next);
        last = next;
    }
    assert_eq!(tree.depth(root), Some(100_000));
    assert_eq!(tree.distance_between(Some(root), last), Some(100_000));
}

#[test]
fn given_long_chain_when_rendering_then_no_stack_overflow() {
    let (mut tree, root) = Tree::with_root(0u32);
    let mut last = root;
    for i in 1..=20_000u32 {
        let next = tree.new_node(i);
        tree.node_mut(last).unwrap().add_child(next);
        last = next;
    }

    let mut current = render_tree(&tree, &LayeredGraph::default())
        .unwrap()
        .unwrap();

    // Walk down one level at a time; each step drops an already emptied level
    let mut levels = 0;
    while let Some(next) = current.leaves.pop() {
        assert!(current.leaves.is_empty());
        current = next;
        levels += 1;
    }
    assert_eq!(levels, 20_000);
    assert_eq!(current.root, "20000");
}

// ============================================================
// Reclaiming nodes
// ============================================================

#[rstest]
fn given_detached_subtree_when_pruning_then_only_unreachable_freed(mut sample: Sample) {
    sample.tree.remove_child(sample.root, sample.n2).unwrap();

    // n2, n5, n6, n9, n10 become unreachable
    assert_eq!(sample.tree.prune_unreachable(), 5);
    assert_eq!(sample.tree.len(), 3);
    assert!(sample.tree.node(sample.n9).is_none());
    assert_eq!(labels(&sample.tree, &sample.tree.order_bfs()), ["1", "3", "4"]);
    assert_eq!(sample.tree.prune_unreachable(), 0);
}
