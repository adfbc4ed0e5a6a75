// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use smallvec::smallvec;
use understory_pointer::{
    ButtonChannel, Capabilities, ConsolidationPolicy, DeviceId, DispatchConfig, Dispatcher,
    EventSink, HandlerContext, InputSample, PointerId, PointerKind, TargetChain, TouchPhase,
    UiEvent,
};

const CELL: f64 = 10.0;
const GRID: u32 = 64;
const ROOT: u32 = u32::MAX;

/// A GRID×GRID board of cells, each inside its row, inside one root.
fn raycast(point: Point, _viewport: Option<Rect>) -> Option<TargetChain<u32>> {
    if point.x < 0.0 || point.y < 0.0 {
        return None;
    }
    let col = (point.x / CELL) as u32;
    let row = (point.y / CELL) as u32;
    if col >= GRID || row >= GRID {
        return None;
    }
    let row_id = GRID * GRID + row;
    Some(smallvec![row * GRID + col, row_id, ROOT])
}

/// Accepts everything and only counts deliveries.
struct Counter(u64);

impl EventSink<u32> for Counter {
    fn capabilities(&self, _target: u32) -> Option<Capabilities> {
        Some(Capabilities::all())
    }

    fn handle(&mut self, event: &UiEvent<u32>, _cx: &mut HandlerContext<u32>) {
        self.0 += u64::from(event.target & 1) + 1;
    }
}

fn sweep(step: u32) -> Point {
    let span = f64::from(GRID) * CELL;
    let t = f64::from(step % 1024) / 1024.0;
    Point::new(t * span, (1.0 - t) * span * 0.5 + 1.0)
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_pointer");
    group.sample_size(50);

    let mouse = PointerId::for_device(DeviceId(0));

    group.bench_function("hover_sweep(pointers=1)", |b| {
        let mut dispatcher: Dispatcher<u32> = Dispatcher::new(DispatchConfig::default());
        let mut sink = Counter(0);
        let mut step = 0_u32;
        b.iter(|| {
            step = step.wrapping_add(1);
            dispatcher.push_sample(InputSample::Point {
                source: mouse,
                kind: PointerKind::MouseOrPen,
                position: sweep(step),
            });
            dispatcher.process_tick(f64::from(step) * 0.016, &raycast, &(), &mut sink);
            black_box(sink.0);
        });
    });

    group.bench_function("drag_sweep(pointers=1)", |b| {
        let mut dispatcher: Dispatcher<u32> = Dispatcher::new(DispatchConfig::default());
        let mut sink = Counter(0);
        dispatcher.push_sample(InputSample::Point {
            source: mouse,
            kind: PointerKind::MouseOrPen,
            position: sweep(0),
        });
        dispatcher.push_sample(InputSample::Button {
            source: mouse,
            channel: ButtonChannel::Left,
            pressed: true,
        });
        dispatcher.process_tick(0.0, &raycast, &(), &mut sink);
        let mut step = 0_u32;
        b.iter(|| {
            step = step.wrapping_add(1);
            dispatcher.push_sample(InputSample::Point {
                source: mouse,
                kind: PointerKind::MouseOrPen,
                position: sweep(step),
            });
            dispatcher.process_tick(f64::from(step) * 0.016, &raycast, &(), &mut sink);
            black_box(sink.0);
        });
    });

    for &fingers in &[2_u32, 10_u32] {
        group.bench_function(format!("touch_moves(pointers={fingers})"), |b| {
            let mut dispatcher: Dispatcher<u32> = Dispatcher::new(DispatchConfig {
                consolidation: ConsolidationPolicy::AllPointersAsIs,
                ..DispatchConfig::default()
            });
            let mut sink = Counter(0);
            for contact in 0..fingers {
                dispatcher.push_sample(InputSample::Touch {
                    source: PointerId::for_touch(DeviceId(1), contact),
                    phase: TouchPhase::Began,
                    position: sweep(contact * 37),
                });
            }
            dispatcher.process_tick(0.0, &raycast, &(), &mut sink);
            let mut step = 0_u32;
            b.iter(|| {
                step = step.wrapping_add(1);
                for contact in 0..fingers {
                    dispatcher.push_sample(InputSample::Touch {
                        source: PointerId::for_touch(DeviceId(1), contact),
                        phase: TouchPhase::Moved,
                        position: sweep(step + contact * 37),
                    });
                }
                dispatcher.process_tick(f64::from(step) * 0.016, &raycast, &(), &mut sink);
                black_box(sink.0);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_dispatch);
criterion_main!(benches);
