use std::hint::black_box;

use autosweeper_core::{
    BoardGeometry, GameConfig, GameSession, MineField, RandomMinefieldGenerator,
};
use criterion::{Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::SmallRng;

fn bench_geometry(c: &mut Criterion) {
    c.bench_function("expert_geometry", |b| {
        b.iter(|| BoardGeometry::new(black_box(GameConfig::expert().size)))
    });
}

fn bench_place_mines(c: &mut Criterion) {
    let config = GameConfig::expert();
    let mut rng = SmallRng::seed_from_u64(12345);
    let blank = MineField::new(config).expect("valid config");
    let first = blank.geometry().center();

    c.bench_function("expert_place_mines", |b| {
        b.iter(|| {
            let mut field = blank.clone();
            field
                .place_mines(black_box(first), &mut RandomMinefieldGenerator, &mut rng)
                .expect("mines fit");
            field
        })
    });
}

fn bench_autoplay(c: &mut Criterion) {
    let mut group = c.benchmark_group("autoplay");
    for (name, config) in [
        ("beginner", GameConfig::beginner()),
        ("intermediate", GameConfig::intermediate()),
        ("expert", GameConfig::expert()),
    ] {
        let mut seed = 0;
        group.bench_function(name, |b| {
            b.iter(|| {
                seed += 1;
                let mut session = GameSession::seeded(config, seed).expect("valid config");
                session.run(&mut ()).expect("solver games always finish")
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_geometry, bench_place_mines, bench_autoplay);
criterion_main!(benches);
