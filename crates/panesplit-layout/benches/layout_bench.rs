//! Benchmarks for pane tree layout and hit testing.
//!
//! Run with: cargo bench -p panesplit-layout

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use panesplit_core::surface::RenderSurface;
use panesplit_layout::{
    DragDirection, PaneId, PaneTree, Payload, Point, Rect, SplitAxis, classify_drag,
    corner_regions,
};
use std::hint::black_box;

struct Blank;

impl Payload for Blank {
    fn render(&self, _surface: &mut dyn RenderSurface, _rect: Rect) {}
    fn on_layout_changed(&mut self, _rect: Rect) {}
}

/// Build a tree by repeatedly splitting the most recent leaf, alternating axes.
fn make_tree(splits: usize) -> PaneTree<Blank> {
    let mut tree = PaneTree::new(Rect::from_size(400, 200), Blank);
    let mut target = PaneId::MIN;
    for i in 0..splits {
        tree.clear_split_guards();
        let axis = if i % 2 == 0 {
            SplitAxis::Horizontal
        } else {
            SplitAxis::Vertical
        };
        let out = tree.split(target, axis, i % 2, Blank).expect("leaf split");
        tree.set_ratio(out.node, 0.5).expect("internal node");
        target = out.kept_leaf;
    }
    tree
}

fn bench_resize(c: &mut Criterion) {
    let mut group = c.benchmark_group("pane/resize");
    for n in [1usize, 8, 32, 128] {
        group.bench_with_input(BenchmarkId::new("splits", n), &n, |b, &n| {
            b.iter_batched(
                || make_tree(n),
                |mut tree| {
                    tree.resize(Rect::from_size(320, 100));
                    black_box(tree)
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_hit_testing(c: &mut Criterion) {
    let mut group = c.benchmark_group("pane/hit");
    let tree = make_tree(32);
    group.bench_function("leaf_at", |b| {
        b.iter(|| black_box(tree.leaf_at(black_box(Point::new(397, 3)))))
    });
    group.bench_function("separator_at", |b| {
        b.iter(|| black_box(tree.separator_at(black_box(Point::new(200, 50)))))
    });
    let regions = corner_regions(Rect::from_size(200, 150), 14);
    group.bench_function("corner_hit", |b| {
        b.iter(|| black_box(regions.hit(black_box(Point::new(197, 147)))))
    });
    group.bench_function("classify_drag", |b| {
        b.iter(|| {
            let dir = classify_drag(black_box(Point::new(2, 2)), black_box(Point::new(60, 2)));
            black_box(dir == DragDirection::Right)
        })
    });
    group.finish();
}

criterion_group!(benches, bench_resize, bench_hit_testing);
criterion_main!(benches);
