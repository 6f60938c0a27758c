use criterion::{black_box, criterion_group, criterion_main, Criterion};
use jiff::civil::{date, Date};
use nextdate::Rule;

fn fixed_now() -> Date {
    date(2026, 2, 6)
}

// ---------------------------------------------------------------------------
// Parse benchmarks
// ---------------------------------------------------------------------------

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    group.bench_function("simple", |b| {
        b.iter(|| Rule::parse(black_box("d 7")).unwrap());
    });

    group.bench_function("complex", |b| {
        b.iter(|| Rule::parse(black_box("m -2,-1,1,10,15,20,25 1,3,5,7,9,11")).unwrap());
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Eval benchmarks (next_after)
// ---------------------------------------------------------------------------

fn bench_eval(c: &mut Criterion) {
    let mut group = c.benchmark_group("eval");
    let now = fixed_now();

    let yearly = Rule::parse("y").unwrap();
    let old_base = date(1926, 2, 6);
    group.bench_function("yearly_century", |b| {
        b.iter(|| yearly.next_after(black_box(old_base), black_box(now)).unwrap());
    });

    let days = Rule::parse("d 3").unwrap();
    let far_base = date(1900, 1, 1);
    group.bench_function("every_n_days_far_base", |b| {
        b.iter(|| days.next_after(black_box(far_base), black_box(now)).unwrap());
    });

    let weekly = Rule::parse("w 7").unwrap();
    group.bench_function("weekly", |b| {
        b.iter(|| weekly.next_after(black_box(now), black_box(now)).unwrap());
    });

    let last_day = Rule::parse("m -1").unwrap();
    group.bench_function("monthly_last_day", |b| {
        b.iter(|| last_day.next_after(black_box(now), black_box(now)).unwrap());
    });

    let leap_day = Rule::parse("m 29 2").unwrap();
    group.bench_function("monthly_leap_day", |b| {
        b.iter(|| leap_day.next_after(black_box(date(2025, 3, 1)), black_box(now)).unwrap());
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Chained occurrences
// ---------------------------------------------------------------------------

fn bench_occurrences(c: &mut Criterion) {
    let mut group = c.benchmark_group("occurrences");
    let now = fixed_now();
    let rule = Rule::parse("m -2,15").unwrap();

    group.bench_function("next_n_100", |b| {
        b.iter(|| rule.next_n_after(black_box(now), black_box(now), 100).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_parse, bench_eval, bench_occurrences);
criterion_main!(benches);
