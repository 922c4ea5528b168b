use criterion::{criterion_group, criterion_main, Criterion};
use study_core::align;

fn bench_align(c: &mut Criterion) {
    let text = "For God so loved the world, that he gave his only Son, that whoever believes in him \
                should not perish but have eternal life.";
    let map = "01=<1063> 02=<2316> 03=<3779> 04=<25> 06=<2889> 08=<5620> 10=<1325> 12=<3439> \
               13=<5207> 15=<3956> 16=<4100> 18=<1519> 20=<3361> 21=<622> 22=<235> 23=<2192> \
               25=<166> 26=<2222>";
    c.bench_function("align_john_3_16", |b| b.iter(|| align(text, map, true)));
}

criterion_group!(benches, bench_align);
criterion_main!(benches);
