//! Property/fuzz-style invariants for pane tree operations.
//!
//! Random operation streams (split, unsplit, ratio changes, resizes) are
//! applied through the public `PaneTree` API. After every step the tree must
//! validate, every leaf must hold a payload whose last layout matches its
//! rectangle, and the leaves must cover the root exactly.

use panesplit_core::surface::RenderSurface;
use panesplit_layout::{PaneError, PaneId, PaneTree, Payload, Rect, SplitAxis};
use proptest::prelude::*;

#[derive(Debug, Clone)]
struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Self {
            state: seed ^ 0x9E37_79B9_7F4A_7C15,
        }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        self.state
    }

    fn next_u16_range(&mut self, min: u16, max: u16) -> u16 {
        debug_assert!(min <= max);
        if min == max {
            return min;
        }
        let span = u64::from(max - min + 1);
        min + (self.next_u64() % span) as u16
    }

    fn choose_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        (self.next_u64() % len as u64) as usize
    }

    fn choose_bool(&mut self) -> bool {
        (self.next_u64() & 1) == 0
    }
}

#[derive(Debug)]
struct Tag {
    serial: u32,
    rect: Option<Rect>,
}

impl Tag {
    fn new(serial: u32) -> Self {
        Self { serial, rect: None }
    }
}

impl Payload for Tag {
    fn render(&self, _surface: &mut dyn RenderSurface, _rect: Rect) {}

    fn on_layout_changed(&mut self, rect: Rect) {
        self.rect = Some(rect);
    }
}

fn internal_ids(tree: &PaneTree<Tag>) -> Vec<PaneId> {
    let mut out = Vec::new();
    tree.root().visit(&mut |node| {
        if !node.is_leaf() {
            out.push(node.id());
        }
    });
    out
}

fn assert_tree_sound(tree: &PaneTree<Tag>) {
    tree.validate().expect("tree must validate");
    let mut covered = 0u32;
    for id in tree.leaf_ids() {
        let node = tree.node(id).expect("leaf exists");
        let payload = node.payload().expect("leaf holds payload");
        assert_eq!(payload.rect, Some(node.rect()), "leaf {id} saw stale layout");
        covered += node.rect().area();
    }
    let area = tree.area();
    let separators: u32 = internal_ids(tree)
        .into_iter()
        .filter_map(|id| tree.node(id)?.separator().map(|s| s.boundary().area()))
        .sum();
    assert_eq!(covered + separators, area.area());
}

fn layout_snapshot(tree: &PaneTree<Tag>) -> Vec<(PaneId, Rect)> {
    let mut out = Vec::new();
    tree.root().visit(&mut |node| out.push((node.id(), node.rect())));
    out
}

/// Re-laying out into the same area must not move anything.
fn assert_resize_idempotent(tree: &mut PaneTree<Tag>) {
    let before = layout_snapshot(tree);
    tree.resize(tree.area());
    assert_eq!(layout_snapshot(tree), before, "second resize moved a pane");
}

fn run_stream(seed: u64, steps: usize) {
    let mut rng = Lcg::new(seed);
    let mut serial = 0u32;
    let mut tree = PaneTree::new(Rect::from_size(240, 120), Tag::new(serial));
    let mut live_payloads = 1usize;

    for _ in 0..steps {
        match rng.next_u16_range(0, 4) {
            0 | 1 => {
                let leaves = tree.leaf_ids();
                let target = leaves[rng.choose_index(leaves.len())];
                let axis = if rng.choose_bool() {
                    SplitAxis::Horizontal
                } else {
                    SplitAxis::Vertical
                };
                serial += 1;
                tree.clear_split_guards();
                tree.split(target, axis, rng.choose_index(3), Tag::new(serial))
                    .expect("leaf split succeeds");
                live_payloads += 1;
            }
            2 => {
                let internals = internal_ids(&tree);
                if internals.is_empty() {
                    continue;
                }
                let target = internals[rng.choose_index(internals.len())];
                let recursive = rng.choose_bool();
                match tree.unsplit(target, recursive) {
                    Ok(outcome) => live_payloads -= outcome.discarded.len(),
                    Err(PaneError::NotSplit { node }) => {
                        assert!(!recursive);
                        assert_eq!(node, target);
                    }
                    Err(other) => panic!("unexpected unsplit failure: {other}"),
                }
            }
            3 => {
                let internals = internal_ids(&tree);
                if internals.is_empty() {
                    continue;
                }
                let target = internals[rng.choose_index(internals.len())];
                let ratio = f64::from(rng.next_u16_range(0, 100)) / 100.0;
                tree.set_ratio(target, ratio).expect("internal node");
            }
            _ => {
                let w = rng.next_u16_range(0, 300);
                let h = rng.next_u16_range(0, 200);
                tree.resize(Rect::new(rng.next_u16_range(0, 5), 0, w, h));
            }
        }
        assert_tree_sound(&tree);
        assert_eq!(tree.leaf_count(), live_payloads);
        assert_resize_idempotent(&mut tree);
    }
}

proptest! {
    #[test]
    fn random_streams_keep_tree_sound(seed in any::<u64>()) {
        run_stream(seed, 64);
    }

    #[test]
    fn ratios_stay_clamped(seed in any::<u64>(), raw in -2.0f64..3.0) {
        let mut tree = PaneTree::new(Rect::from_size(100, 100), Tag::new(0));
        tree.split(PaneId::MIN, SplitAxis::Vertical, seed as usize % 2, Tag::new(1)).unwrap();
        tree.set_ratio(PaneId::MIN, raw).unwrap();
        let ratio = tree.root().split_ratio().unwrap();
        let min = tree.config().min_pane_fraction;
        prop_assert!(ratio >= min && ratio <= 1.0 - min);
    }
}

#[test]
fn long_stream_fixed_seed() {
    run_stream(0xC0FFEE, 512);
}

#[test]
fn nested_tree_resizes_identically_twice() {
    let mut tree = PaneTree::new(Rect::from_size(200, 100), Tag::new(0));
    let outer = tree
        .split(PaneId::MIN, SplitAxis::Horizontal, 1, Tag::new(1))
        .unwrap();
    tree.clear_split_guards();
    let inner = tree
        .split(outer.kept_leaf, SplitAxis::Vertical, 0, Tag::new(2))
        .unwrap();
    tree.clear_split_guards();
    tree.split(inner.kept_leaf, SplitAxis::Horizontal, 0, Tag::new(3))
        .unwrap();
    tree.set_ratio(outer.node, 0.37).unwrap();
    tree.set_ratio(inner.node, 0.61).unwrap();

    let target = Rect::new(3, 2, 63, 27);
    tree.resize(target);
    let first = layout_snapshot(&tree);
    tree.resize(target);
    assert_eq!(layout_snapshot(&tree), first);
    assert_eq!(tree.area(), target);
    assert_tree_sound(&tree);
}
