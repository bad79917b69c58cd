use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use mohu::matcher::{MatchMode, Matcher, MatcherConfig};
use mohu::settings::{parse_settings_toml, DEFAULT_SETTINGS_TOML};
use mohu::trace_init::init_tracing_from_env;

static ENTRIES: &[&str] = &[
    "北京", "背景", "南京", "东京", "北海", "上海", "深圳", "广州", "杭州", "苏州",
    "中国", "重庆", "成都", "西安", "武汉", "天津", "苹果", "香蕉", "橙子", "葡萄",
    "apple", "apply", "ample", "maple", "banana", "bandana", "orange", "grape",
];

static INPUTS: &[(&str, &str)] = &[
    ("short", "北京"),
    ("romanized", "beijing"),
    ("latin", "aple"),
    ("long", "中国北京上海"),
];

fn bench_matcher() -> Matcher {
    let config = MatcherConfig::from_settings(
        &parse_settings_toml(DEFAULT_SETTINGS_TOML).expect("default settings"),
    );
    let mut matcher = Matcher::with_config(config);
    matcher.build(ENTRIES.iter().copied());
    matcher
}

fn bench_build(c: &mut Criterion) {
    // Set MOHU_TRACE_DIR (with --features trace) to capture spans from a run.
    init_tracing_from_env();
    c.bench_function("matcher/build", |b| {
        b.iter(bench_matcher);
    });
}

fn bench_modes(c: &mut Criterion) {
    let matcher = bench_matcher();
    for mode in [MatchMode::Literal, MatchMode::Phonetic, MatchMode::Hybrid] {
        let mut group = c.benchmark_group(format!("matcher/{mode}"));
        for &(label, query) in INPUTS {
            group.bench_with_input(BenchmarkId::new(label, query.len()), &query, |b, &query| {
                b.iter(|| matcher.match_query(query, mode, 0.0, Some(10)));
            });
        }
        group.finish();
    }
}

criterion_group!(benches, bench_build, bench_modes);
criterion_main!(benches);
