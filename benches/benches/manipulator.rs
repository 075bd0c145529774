// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::Vec2;
use understory_manipulator::{
    Corner, DragTarget, Manipulator, Modifiers, PointerEvent, Pose, ResizeAnchor, ResizeTarget,
    Side,
};

fn rotated_pose() -> Pose {
    Pose::new(120.0, 80.0, 240.0, 160.0).with_rotation(0.6)
}

fn bench_resize(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_manipulator/resize");
    let pose = rotated_pose();
    let min = kurbo::Size::new(10.0, 10.0);

    for target in [
        ResizeTarget::Corner(Corner::BottomRight),
        ResizeTarget::Side(Side::Left),
    ] {
        let anchor = ResizeAnchor::new(&pose, target);
        group.bench_function(format!("apply({target:?})"), |b| {
            let mut t = 0.0_f64;
            b.iter(|| {
                t += 0.25;
                let delta = Vec2::new(t.sin() * 300.0, t.cos() * 300.0);
                black_box(anchor.apply(black_box(delta), min))
            });
        });
    }
    group.finish();
}

fn bench_pointer_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_manipulator/drag");
    let moves: Vec<PointerEvent> = (0..256)
        .map(|i| {
            let t = f64::from(i) * 0.1;
            PointerEvent::at(400.0 + t.sin() * 200.0, 300.0 + t.cos() * 200.0)
        })
        .collect();

    for (name, target, modifiers) in [
        ("translate", DragTarget::Whole, Modifiers::empty()),
        ("translate_snap", DragTarget::Whole, Modifiers::SHIFT),
        ("corner", DragTarget::Corner(Corner::TopLeft), Modifiers::empty()),
        ("rotate_snap", DragTarget::Rotate, Modifiers::SHIFT),
    ] {
        group.bench_function(format!("256_moves({name})"), |b| {
            b.iter_batched(
                || {
                    let mut m = Manipulator::new(rotated_pose());
                    let grab = m.pose().center();
                    m.start_drag(PointerEvent::at(grab.x, grab.y), target);
                    m
                },
                |mut m| {
                    for ev in &moves {
                        black_box(m.on_pointer_move(ev.with_modifiers(modifiers)));
                    }
                    black_box(m.on_pointer_up(PointerEvent::at(0.0, 0.0)))
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.bench_function("hit_test", |b| {
        let m = Manipulator::new(rotated_pose());
        b.iter(|| {
            for ev in &moves {
                black_box(m.hit_test(black_box(ev.page)));
            }
        });
    });
    group.finish();
}

criterion_group!(benches, bench_resize, bench_pointer_moves);
criterion_main!(benches);
