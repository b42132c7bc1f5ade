//! Extraction throughput on large listing pages
//!
//! Pages grow to a few hundred entries after the listing finishes loading;
//! extraction runs once on the full snapshot.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use market_helper_lib::infrastructure::parsing::ModuleExtractor;
use market_helper_lib::test_utils::{ancestor_item, listing_page, trigger_item};

fn build_listing(size: usize) -> String {
    let items: Vec<String> = (0..size)
        .map(|i| {
            if i % 3 == 0 {
                trigger_item(
                    &format!("Trigger {}", i),
                    "Trigger Module",
                    &[("Damage (10-20)", "+15"), ("Range (1-5)", "+2")],
                )
            } else {
                ancestor_item(
                    &format!("Ancestor {}", i),
                    "Ancestor Boots",
                    "Red",
                    &["(+)Power [10-20]", "(-)Speed [1-2]", "Luck [0-1]"],
                    &["120", "Gold"],
                )
            }
        })
        .collect();
    listing_page(&items)
}

fn extraction(c: &mut Criterion) {
    let extractor = ModuleExtractor::new().expect("default selectors compile");
    let mut group = c.benchmark_group("extract_html");

    for size in [50, 200, 800] {
        let html = build_listing(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &html, |b, html| {
            b.iter(|| extractor.extract_html(black_box(html)))
        });
    }

    group.finish();
}

criterion_group!(benches, extraction);
criterion_main!(benches);
