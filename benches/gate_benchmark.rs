use coach_gate::gate::{AccessGate, Session};
use coach_gate::models::{Profile, Role, SubscriptionStatus};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn benchmark_decide(c: &mut Criterion) {
    let gate = AccessGate::new("questionario.example.com");
    let session = Session {
        user_id: "7f9c2b1e-5d3a-4c8e-9b0a-1f2e3d4c5b6a".to_string(),
    };
    let coach = Profile {
        role: Role::Coach,
        email: "coach@example.com".to_string(),
        is_admin: false,
        approved: false,
        subscription_status: Some(SubscriptionStatus::Active),
        charges_enabled: true,
        payouts_enabled: false,
    };

    let mut group = c.benchmark_group("access_gate");

    group.bench_function("anonymous_protected", |b| {
        b.iter(|| {
            gate.decide(
                black_box("app.example.com"),
                black_box("/coach/alunos/42"),
                None,
                None,
            )
        })
    });

    group.bench_function("coach_kyc_redirect", |b| {
        b.iter(|| {
            gate.decide(
                black_box("app.example.com"),
                black_box("/coach/alunos/42"),
                Some(&session),
                Some(&coach),
            )
        })
    });

    group.bench_function("coach_public_bounce", |b| {
        b.iter(|| {
            gate.decide(
                black_box("app.example.com"),
                black_box("/cadastro/coach"),
                Some(&session),
                Some(&coach),
            )
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_decide);
criterion_main!(benches);
