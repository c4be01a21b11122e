use criterion::{Criterion, criterion_group, criterion_main};
use serde_json::json;
use std::hint::black_box;

use scout_compare::join::{JoinSpec, join_records};
use scout_compare::normalize::normalize;
use scout_compare::ordering::{SortDirection, sort_records};
use scout_compare::panels::panels;
use scout_compare::record::RawRecord;
use scout_compare::schema::Position;

fn object(value: serde_json::Value) -> RawRecord {
    value.as_object().cloned().unwrap_or_default()
}

fn sample_sources(n: usize) -> (Vec<String>, Vec<RawRecord>, Vec<RawRecord>) {
    let keys: Vec<String> = (0..n).map(|i| format!("cb-{i}")).collect();
    let statistics: Vec<RawRecord> = (0..n)
        .map(|i| {
            object(json!({
                "blabla_stp": format!(" cb-{i} "),
                "player_id": i,
                "oyuncu_isim": format!("Player {i}"),
                "takim_adi": "Test FC",
                "dakika": (i * 37) % 3000,
                "gol": i % 7,
                "sutengllmeMB": (i % 11) as f64 * 0.2,
                "hava_topu_kazanma": 40.0 + (i % 40) as f64,
                "pas_isabet": "85.5",
            }))
        })
        .collect();
    // Every third player has no graphic row.
    let graphic: Vec<RawRecord> = (0..n)
        .filter(|i| i % 3 != 0)
        .map(|i| {
            object(json!({
                "player_id": i,
                "KazanTop/90": (i % 9) as f64,
                "HavaTop%": 60.0,
                "Eng/90": 1.1,
                "Mudahale/90": 1.3,
                "Pas%": 87.0,
                "IleriPas/90": 5.5,
            }))
        })
        .collect();
    (keys, statistics, graphic)
}

fn bench_join(c: &mut Criterion) {
    let (keys, statistics, graphic) = sample_sources(300);
    let spec = JoinSpec::for_schema(Position::CentreBack.schema());
    c.bench_function("join_300_centre_backs", |b| {
        b.iter(|| {
            let merged = join_records(
                black_box(&keys),
                black_box(&statistics),
                black_box(&graphic),
                &spec,
            );
            black_box(merged.len());
        })
    });
}

fn bench_sort_and_normalize(c: &mut Criterion) {
    let (keys, statistics, graphic) = sample_sources(300);
    let spec = JoinSpec::for_schema(Position::CentreBack.schema());
    let merged = join_records(&keys, &statistics, &graphic, &spec);
    let panel = &panels(Position::CentreBack)[0];

    c.bench_function("sort_300_by_minutes", |b| {
        b.iter(|| {
            let sorted = sort_records(black_box(&merged), "dakika", SortDirection::Desc);
            black_box(sorted.len());
        })
    });

    c.bench_function("normalize_panel_300", |b| {
        b.iter(|| {
            let mut total = 0.0;
            for record in &merged {
                for calib in panel.calibrations {
                    total += normalize(record.number(calib.field), calib);
                }
            }
            black_box(total);
        })
    });
}

criterion_group!(benches, bench_join, bench_sort_and_normalize);
criterion_main!(benches);
