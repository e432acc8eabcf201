use criterion::{criterion_group, criterion_main, Criterion};
use segmaze::{
    generators::{GrowingSegments, GrowthOptionsBuilder},
    units::{ColumnLength, RowLength},
};

fn bench_growing_segments(c: &mut Criterion, width: usize, height: usize) {
    let options = GrowthOptionsBuilder::new()
        .row_length(RowLength(width))
        .column_length(ColumnLength(height))
        .seed(42)
        .build();

    c.bench_function(&format!("growing_segments_{}_{}", width, height), move |b| {
        b.iter(|| {
            let mut generator = GrowingSegments::new(&options).unwrap();
            generator.run_to_completion().unwrap()
        })
    });
}

fn bench_growing_segments_32(c: &mut Criterion) {
    bench_growing_segments(c, 32, 32);
}

fn bench_growing_segments_140_80(c: &mut Criterion) {
    bench_growing_segments(c, 140, 80);
}

fn bench_growing_segments_step_140_80(c: &mut Criterion) {
    let options = GrowthOptionsBuilder::new().seed(7).build();
    let mut generator = GrowingSegments::new(&options).unwrap();

    c.bench_function("growing_segments_step_140_80", move |b| {
        b.iter(|| {
            if generator.is_complete() {
                generator = GrowingSegments::new(&options).unwrap();
            }
            generator.step().unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_growing_segments_32,
    bench_growing_segments_140_80,
    bench_growing_segments_step_140_80
);
criterion_main!(benches);
