//! Criterion benchmarks for MarketFlow hot paths.
//!
//! Benchmarks:
//! 1. Record assembly over one year and four years of daily candles
//! 2. Chart payload parsing
//! 3. Individual primitives (SMA200, ATR14)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use marketflow_core::indicators::{atr, sma, ATR_PERIOD};
use marketflow_core::{parse_chart_payload, Candle, CandleSeries, IndicatorRecord};

// ── Helpers ──────────────────────────────────────────────────────────

/// Seeded random walk so every run benchmarks the same series.
fn make_candles(n: usize) -> Vec<Candle> {
    let mut rng = StdRng::seed_from_u64(42);
    let base_date = chrono::NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
    let mut close = 100.0_f64;
    (0..n)
        .map(|i| {
            let open = close;
            close = (close * (1.0 + rng.gen_range(-0.02..0.02))).max(1.0);
            let high = open.max(close) * (1.0 + rng.gen_range(0.0..0.01));
            let low = open.min(close) * (1.0 - rng.gen_range(0.0..0.01));
            Candle {
                timestamp: 1_577_975_400 + i as i64 * 86_400,
                date: base_date + chrono::Duration::days(i as i64),
                open: Some(open),
                high,
                low,
                close,
                volume: Some(1_000_000.0),
            }
        })
        .collect()
}

fn make_payload(candles: &[Candle]) -> serde_json::Value {
    serde_json::json!({
        "chart": {"result": [{
            "timestamp": candles.iter().map(|c| c.timestamp).collect::<Vec<_>>(),
            "indicators": {"quote": [{
                "open": candles.iter().map(|c| c.open).collect::<Vec<_>>(),
                "high": candles.iter().map(|c| c.high).collect::<Vec<_>>(),
                "low": candles.iter().map(|c| c.low).collect::<Vec<_>>(),
                "close": candles.iter().map(|c| c.close).collect::<Vec<_>>(),
                "volume": candles.iter().map(|c| c.volume).collect::<Vec<_>>(),
            }]}
        }]}
    })
}

// ── 1. Record Assembly ───────────────────────────────────────────────

fn bench_record(c: &mut Criterion) {
    let mut group = c.benchmark_group("record_compute");

    for &count in &[252, 1000] {
        let series = CandleSeries::new(make_candles(count)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(count), &series, |b, s| {
            b.iter(|| IndicatorRecord::compute(black_box(s)))
        });
    }

    group.finish();
}

// ── 2. Payload Parsing ───────────────────────────────────────────────

fn bench_parse(c: &mut Criterion) {
    let payload = make_payload(&make_candles(252));
    c.bench_function("parse_chart_payload_252", |b| {
        b.iter(|| parse_chart_payload(black_box(&payload)))
    });
}

// ── 3. Primitives ────────────────────────────────────────────────────

fn bench_primitives(c: &mut Criterion) {
    let candles = make_candles(1000);
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();

    c.bench_function("sma_200", |b| b.iter(|| sma(black_box(&closes), 200)));
    c.bench_function("atr_14", |b| {
        b.iter(|| atr(black_box(&candles), ATR_PERIOD))
    });
}

criterion_group!(benches, bench_record, bench_parse, bench_primitives);
criterion_main!(benches);
