use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

use tradeledger_store::{InMemoryWorldState, TableStore};

fn populated_store(rows: usize) -> TableStore<InMemoryWorldState> {
    let mut store = TableStore::new(InMemoryWorldState::new());
    store.create_table("bids", 2).unwrap();
    for auction in 0..rows / 16 {
        let auction = format!("A{auction:04}");
        for no in 0..16 {
            let no = no.to_string();
            store
                .insert("bids", &[&auction, &no], vec![0u8; 128])
                .unwrap();
        }
    }
    store
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    group.throughput(Throughput::Elements(1));

    group.bench_function("insert_row", |b| {
        let mut store = TableStore::new(InMemoryWorldState::new());
        store.create_table("bids", 2).unwrap();
        let mut i = 0u64;
        b.iter(|| {
            let auction = format!("A{:08}", i / 16);
            let no = (i % 16).to_string();
            i += 1;
            store
                .insert("bids", &[&auction, &no], black_box(vec![0u8; 128]))
                .unwrap();
        });
    });

    group.finish();
}

fn bench_prefix_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("prefix_scan");

    for rows in [1_024usize, 16_384] {
        let store = populated_store(rows);
        group.throughput(Throughput::Elements(16));
        group.bench_function(format!("scan_one_auction_of_{rows}"), |b| {
            b.iter(|| {
                let rows = store
                    .query_by_prefix("bids", &[black_box("A0001")])
                    .unwrap();
                assert_eq!(rows.len(), 16);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_insert, bench_prefix_scan);
criterion_main!(benches);
