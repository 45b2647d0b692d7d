use assessment_core::{FormStore, InstanceCoord, ItemCoord, ValidationService};
use assessment_domain::Status;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

/// Store where every item carries `copies` instances, half of them Not OK.
fn build_store(copies: usize) -> (FormStore, Vec<InstanceCoord>) {
    let mut store = FormStore::default();
    let items: Vec<_> = store
        .form()
        .sections
        .iter()
        .enumerate()
        .flat_map(|(s, section)| (0..section.items.len()).map(move |i| (s, i)))
        .collect();

    let mut coords = Vec::new();
    for (section, item) in items {
        let item_coord = ItemCoord::new(section, item);
        for n in 0..copies {
            if n > 0 {
                store.add_instance(item_coord).expect("add instance");
            }
            let coord = item_coord.instance(n);
            let status = if n % 2 == 0 { Status::Ok } else { Status::NotOk };
            store.set_instance_status(coord, status).expect("status");
            coords.push(coord);
        }
    }
    (store, coords)
}

fn bench_validation(c: &mut Criterion) {
    let (store, coords) = build_store(black_box(20));

    c.bench_function("full_validation_740", |b| {
        b.iter(|| black_box(ValidationService::validate(store.form())))
    });

    let target = coords[1];
    c.bench_function("incremental_description_edit_740", |b| {
        b.iter_batched(
            || store.clone(),
            |mut store| {
                store
                    .set_instance_description(target, black_box("belt misaligned"))
                    .expect("describe");
                store
            },
            BatchSize::SmallInput,
        )
    });

    c.bench_function("full_validation_after_edit_740", |b| {
        b.iter_batched(
            || store.clone(),
            |mut store| {
                store
                    .set_instance_description(target, black_box("belt misaligned"))
                    .expect("describe");
                store.validate_all()
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_validation);
criterion_main!(benches);
