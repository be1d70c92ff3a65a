use criterion::{black_box, criterion_group, criterion_main, Criterion};
use macrolog::models::{DailySummary, FoodItem, MealCategory};
use macrolog::services::export::export_full_log;

fn seed_log(days: usize, per_day: usize) -> Vec<FoodItem> {
    let mut entries = Vec::with_capacity(days * per_day);
    let mut id = 0i64;
    for day in 0..days {
        let date = format!("2024-{:02}-{:02}", day / 28 + 1, day % 28 + 1);
        for n in 0..per_day {
            id += 1;
            entries.push(FoodItem {
                id,
                name: format!("Food {}", n),
                calories: "250".to_string(),
                protein: "12.5g".to_string(),
                carbs: "30g".to_string(),
                fat: "8g".to_string(),
                meal: MealCategory::ALL[n % 4],
                date: date.clone(),
            });
        }
    }
    entries
}

fn benchmark_aggregation(c: &mut Criterion) {
    // Three months of heavy logging; the daily pass filters one day of it.
    let log = seed_log(90, 12);

    let mut group = c.benchmark_group("food_log");

    group.bench_function("daily_summary_over_90_days", |b| {
        b.iter(|| DailySummary::compute(black_box(&log), black_box("2024-02-15"), 2000))
    });

    group.bench_function("export_full_log_90_days", |b| {
        b.iter(|| export_full_log(black_box(&log)))
    });

    group.finish();
}

criterion_group!(benches, benchmark_aggregation);
criterion_main!(benches);
