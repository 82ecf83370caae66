use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

use arbor_bst::raw::{Handle, Nodes};
use arbor_bst::{NodeStrategy, Order, Tree, Unbalanced};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 2_000;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Generates values in a range small enough to cause collisions.
fn value_strategy() -> impl Strategy<Value = i64> {
    -1_000i64..1_000i64
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum TreeOp {
    Insert(i64),
    Remove(i64),
    Take(i64),
    Contains(i64),
    First,
    Last,
    Clear,
}

fn tree_op_strategy() -> impl Strategy<Value = TreeOp> {
    prop_oneof![
        8 => value_strategy().prop_map(TreeOp::Insert),
        4 => value_strategy().prop_map(TreeOp::Remove),
        1 => value_strategy().prop_map(TreeOp::Take),
        3 => value_strategy().prop_map(TreeOp::Contains),
        1 => Just(TreeOp::First),
        1 => Just(TreeOp::Last),
        1 => Just(TreeOp::Clear),
    ]
}

// ─── Core operations against a model ─────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of operations on both Tree and BTreeSet and asserts identical
    /// results at every step.
    #[test]
    fn tree_ops_match_btreeset(ops in proptest::collection::vec(tree_op_strategy(), TEST_SIZE)) {
        init_logging();
        let mut tree: Tree<i64> = Tree::new();
        let mut model: BTreeSet<i64> = BTreeSet::new();

        for op in &ops {
            match op {
                TreeOp::Insert(v) => {
                    prop_assert_eq!(tree.insert(*v), model.insert(*v), "insert({})", v);
                }
                TreeOp::Remove(v) => {
                    prop_assert_eq!(tree.remove(v), model.remove(v), "remove({})", v);
                }
                TreeOp::Take(v) => {
                    prop_assert_eq!(tree.take(v), model.take(v), "take({})", v);
                }
                TreeOp::Contains(v) => {
                    prop_assert_eq!(tree.contains(v), model.contains(v), "contains({})", v);
                }
                TreeOp::First => {
                    prop_assert_eq!(tree.first(), model.first(), "first()");
                }
                TreeOp::Last => {
                    prop_assert_eq!(tree.last(), model.last(), "last()");
                }
                TreeOp::Clear => {
                    tree.clear();
                    model.clear();
                }
            }
            prop_assert_eq!(tree.len(), model.len(), "len mismatch after {:?}", op);
            prop_assert_eq!(tree.is_empty(), model.is_empty(), "is_empty mismatch after {:?}", op);
        }

        let expected: Vec<i64> = model.into_iter().collect();
        prop_assert_eq!(tree.in_order(), expected);
    }

    /// After a successful insert the value is always found.
    #[test]
    fn inserted_values_are_contained(values in proptest::collection::vec(value_strategy(), 0..TEST_SIZE)) {
        let mut tree: Tree<i64> = Tree::new();
        for v in &values {
            if tree.insert(*v) {
                prop_assert!(tree.contains(v), "contains({}) after insert", v);
            }
        }
        prop_assert!(values.iter().all(|v| tree.contains(v)));
    }

    /// In-order output is strictly ascending no matter the insert/remove history.
    #[test]
    fn in_order_is_ascending(
        values in proptest::collection::vec(value_strategy(), 0..TEST_SIZE),
        removals in proptest::collection::vec(value_strategy(), 0..TEST_SIZE / 2),
    ) {
        let mut tree: Tree<i64> = values.iter().copied().collect();
        for v in &removals {
            tree.remove(v);
        }
        let in_order = tree.in_order();
        prop_assert!(in_order.windows(2).all(|pair| pair[0] < pair[1]), "not ascending: {:?}", in_order);
        prop_assert_eq!(in_order.len(), tree.len());
    }

    /// Re-inserting the ascending enumeration into a fresh tree rebuilds the same set.
    #[test]
    fn in_order_round_trip(
        values in proptest::collection::vec(value_strategy(), 0..TEST_SIZE),
        removals in proptest::collection::vec(value_strategy(), 0..TEST_SIZE / 2),
    ) {
        let mut tree: Tree<i64> = values.iter().copied().collect();
        for v in &removals {
            tree.remove(v);
        }

        let rebuilt: Tree<i64> = tree.in_order().into_iter().collect();
        prop_assert_eq!(rebuilt.len(), tree.len());
        for v in values.iter().chain(&removals) {
            prop_assert_eq!(rebuilt.contains(v), tree.contains(v), "contains({})", v);
        }
    }

    /// A duplicate insert reports false and changes nothing observable.
    #[test]
    fn duplicate_insert_is_idempotent(values in proptest::collection::vec(value_strategy(), 1..TEST_SIZE)) {
        let mut tree: Tree<i64> = values.iter().copied().collect();
        let len = tree.len();
        let shape = tree.pre_order();

        for v in &values {
            prop_assert!(!tree.insert(*v), "insert({}) of a present value", v);
        }
        prop_assert_eq!(tree.len(), len);
        prop_assert_eq!(tree.pre_order(), shape);
    }

    /// Copies hold the same values and the source is unaffected by edits to the copy.
    #[test]
    fn clone_is_independent(
        values in proptest::collection::vec(value_strategy(), 0..TEST_SIZE),
        removals in proptest::collection::vec(value_strategy(), 0..TEST_SIZE / 2),
    ) {
        let mut tree: Tree<i64> = values.iter().copied().collect();
        for v in &removals {
            tree.remove(v);
        }

        let mut copy = tree.clone();
        prop_assert_eq!(&copy, &tree);
        prop_assert_eq!(copy.items(), tree.items());

        let before = tree.in_order();
        for v in &values {
            copy.remove(v);
        }
        prop_assert!(copy.is_empty());
        prop_assert_eq!(tree.in_order(), before);
    }

    /// Removing every value one by one, in any order, empties the tree.
    #[test]
    fn remove_everything(values in proptest::collection::vec(value_strategy(), 0..TEST_SIZE)) {
        let mut tree: Tree<i64> = values.iter().copied().collect();
        let distinct: BTreeSet<i64> = values.iter().copied().collect();
        for v in values.iter().rev() {
            tree.remove(v);
        }
        prop_assert!(tree.is_empty());
        prop_assert_eq!(tree.height(), 0);
        prop_assert!(distinct.iter().all(|v| !tree.contains(v)));
    }
}

// ─── Scenarios ───────────────────────────────────────────────────────────────

#[test]
fn removing_root_with_two_children_promotes_successor() {
    init_logging();
    let mut tree = Tree::new();
    for v in [5, 3, 8, 1, 4, 7, 9] {
        assert!(tree.insert(v));
    }

    assert!(tree.remove(&5));
    assert_eq!(tree.in_order(), vec![1, 3, 4, 7, 8, 9]);
    assert_eq!(tree.len(), 6);
    assert_eq!(tree.root(), Some(&7));
    assert_eq!(tree.pre_order(), vec![7, 3, 1, 4, 8, 9]);
    assert_eq!(tree.post_order(), vec![1, 4, 3, 9, 8, 7]);
}

#[test]
fn small_tree_lookups_and_removals() {
    let mut tree = Tree::new();
    for v in [10, 5, 15] {
        tree.insert(v);
    }
    assert!(tree.contains(&5));
    assert!(!tree.contains(&20));
    assert!(tree.remove(&15));
    assert!(!tree.remove(&15));
    assert_eq!(tree.size(), 2);
}

#[test]
fn boundaries() {
    let mut tree: Tree<i32> = Tree::new();
    assert!(!tree.remove(&1));
    assert_eq!(tree.in_order(), Vec::<i32>::new());
    assert_eq!(tree.sideways().to_string(), "Tree size = 0\n");

    tree.insert(1);
    assert!(tree.remove(&1));
    assert_eq!(tree.len(), 0);
    assert!(!tree.contains(&1));
}

#[test]
fn items_is_pre_order() {
    let tree = Tree::from([8, 4, 12, 2, 6, 10, 14]);
    assert_eq!(tree.items(), tree.pre_order());
    assert_eq!(tree.items(), vec![8, 4, 2, 6, 12, 10, 14]);
}

#[test]
fn traversals_are_fresh_each_call() {
    let tree = Tree::from([2, 1, 3]);
    let mut first = tree.in_order();
    first.push(99);
    assert_eq!(tree.in_order(), vec![1, 2, 3]);
}

#[test]
fn sorted_input_degrades_to_a_chain() {
    let tree: Tree<u32> = (0..1_000).collect();
    assert_eq!(tree.height(), 1_000);
    assert_eq!(tree.first(), Some(&0));
    assert_eq!(tree.last(), Some(&999));
    assert_eq!(tree.in_order().len(), 1_000);
}

#[test]
fn move_leaves_source_empty() {
    let mut source = Tree::from([3, 1, 2]);
    let destination = std::mem::take(&mut source);
    assert!(source.is_empty());
    assert_eq!(destination.in_order(), vec![1, 2, 3]);
}

#[test]
fn extend_from_references() {
    let mut tree: Tree<i32> = Tree::new();
    tree.extend(&[3, 1, 2, 3]);
    assert_eq!(tree.len(), 3);
    assert_eq!(format!("{tree:?}"), "{1, 2, 3}");
}

#[test]
fn visit_borrows_values() {
    let tree: Tree<String> = ["b", "a", "c"].into_iter().map(String::from).collect();
    let mut seen: Vec<&str> = Vec::new();
    tree.visit(Order::In, |value| seen.push(value.as_str()));
    assert_eq!(seen, ["a", "b", "c"]);
}

// ─── Ownership ───────────────────────────────────────────────────────────────

static DROPS: AtomicUsize = AtomicUsize::new(0);

/// Ordered by `key` alone; counts its own drops in `DROPS`.
#[derive(Debug)]
struct Counted {
    key: i32,
}

impl Drop for Counted {
    fn drop(&mut self) {
        DROPS.fetch_add(1, AtomicOrdering::SeqCst);
    }
}

impl PartialEq for Counted {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Counted {}

impl PartialOrd for Counted {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Counted {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

impl Borrow<i32> for Counted {
    fn borrow(&self) -> &i32 {
        &self.key
    }
}

fn drops() -> usize {
    DROPS.load(AtomicOrdering::SeqCst)
}

#[test]
fn every_value_is_dropped_exactly_once() {
    let mut tree: Tree<Counted> = [5, 3, 8, 1, 4, 7, 9].into_iter().map(|key| Counted { key }).collect();
    assert_eq!(drops(), 0);

    // A rejected duplicate is dropped on the spot; the stored one survives.
    assert!(!tree.insert(Counted { key: 4 }));
    assert_eq!(drops(), 1);
    assert!(tree.contains(&4));

    // Two children below the root: the successor's value moves up, only `3` goes.
    assert!(tree.remove(&3));
    assert_eq!(drops(), 2);

    // The root itself, also with two children.
    assert!(tree.remove(&5));
    assert_eq!(drops(), 3);

    // `take` hands ownership out; the drop happens in the caller.
    let taken = tree.take(&8);
    assert_eq!(drops(), 3);
    assert_eq!(taken.as_ref().map(|counted| counted.key), Some(8));
    drop(taken);
    assert_eq!(drops(), 4);

    // Misses drop nothing.
    assert!(!tree.remove(&42));
    assert_eq!(drops(), 4);

    assert_eq!(tree.len(), 4);
    tree.clear();
    assert_eq!(drops(), 8);

    tree.extend([2, 6, 10].into_iter().map(|key| Counted { key }));
    drop(tree);
    assert_eq!(drops(), 11);
}

// ─── A strategy defined outside the crate ────────────────────────────────────

/// Removes two-children nodes by promoting the in-order predecessor instead of the successor.
#[derive(Debug)]
struct Predecessor;

impl NodeStrategy for Predecessor {
    fn insert<T: Ord>(nodes: &mut Nodes<T>, subtree: Handle, value: T) -> bool {
        Unbalanced::insert(nodes, subtree, value)
    }

    fn remove<T, Q>(nodes: &mut Nodes<T>, subtree: Handle, value: &Q) -> Option<T>
    where
        T: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        let target = Self::find(nodes, subtree, value)?;
        if nodes.get(target).has_two_children() {
            let predecessor = Self::substitute(nodes, target);
            let replacement = Self::unlink(nodes, predecessor);
            Some(nodes.get_mut(target).replace_value(replacement))
        } else {
            Some(Self::unlink(nodes, target))
        }
    }

    fn unlink<T>(nodes: &mut Nodes<T>, node: Handle) -> T {
        Unbalanced::unlink(nodes, node)
    }

    fn substitute<T>(nodes: &Nodes<T>, node: Handle) -> Handle {
        let mut current = nodes.left(node).expect("two children");
        while let Some(right) = nodes.right(current) {
            current = right;
        }
        current
    }
}

#[test]
fn custom_strategy_drives_the_engine() {
    let mut tree: Tree<i32, Predecessor> = [5, 3, 8, 1, 4, 7, 9].into_iter().collect();
    assert!(tree.remove(&5));
    assert_eq!(tree.root(), Some(&4));
    assert!(tree.remove(&3));
    assert_eq!(tree.pre_order(), vec![4, 1, 8, 7, 9]);

    // Equality only looks at the values, not the strategy or the shape.
    let plain: Tree<i32> = [9, 8, 7, 4, 1].into_iter().collect();
    assert_eq!(tree, plain);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Both strategies agree with the model on every answer.
    #[test]
    fn custom_strategy_matches_btreeset(ops in proptest::collection::vec(tree_op_strategy(), TEST_SIZE)) {
        let mut tree: Tree<i64, Predecessor> = Tree::with_strategy();
        let mut model: BTreeSet<i64> = BTreeSet::new();

        for op in &ops {
            match op {
                TreeOp::Insert(v) => {
                    prop_assert_eq!(tree.insert(*v), model.insert(*v));
                }
                TreeOp::Remove(v) | TreeOp::Take(v) => {
                    prop_assert_eq!(tree.remove(v), model.remove(v));
                }
                TreeOp::Contains(v) => {
                    prop_assert_eq!(tree.contains(v), model.contains(v));
                }
                TreeOp::First | TreeOp::Last => {}
                TreeOp::Clear => {
                    tree.clear();
                    model.clear();
                }
            }
        }

        let expected: Vec<i64> = model.into_iter().collect();
        prop_assert_eq!(tree.in_order(), expected);
    }
}
