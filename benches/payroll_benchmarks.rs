//! Performance benchmarks for the payroll engine.
//!
//! - Single payslip, direct call
//! - Batch of 1000 payslips, direct calls
//! - Single payslip through the HTTP router
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rust_decimal::Decimal;

use payroll_engine::api::{create_router, AppState};
use payroll_engine::calculation::{generate_payslip, recalculate_deductions};
use payroll_engine::config::{ConfigLoader, RateTable};
use payroll_engine::models::{Employee, OvertimeEntry, PayrollInput};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn create_input(index: usize) -> PayrollInput {
    let mut input = PayrollInput::new(
        Employee {
            id: format!("emp_bench_{:04}", index),
            base_salary: Decimal::from(3000 + (index as i64 % 50) * 250),
            hire_date: if index % 7 == 0 {
                Some("2025-12-10".to_string())
            } else {
                None
            },
        },
        "December 2025",
    );
    if index % 3 == 0 {
        input.overtime = vec![OvertimeEntry {
            hours: Decimal::from(8),
            multiplier: None,
        }];
    }
    input
}

fn bench_single_payslip(c: &mut Criterion) {
    let rates = RateTable::morocco_2025();
    let input = create_input(3);

    c.bench_function("single_payslip", |b| {
        b.iter(|| black_box(generate_payslip(black_box(&input), &rates)))
    });
}

fn bench_recalculate(c: &mut Criterion) {
    let rates = RateTable::morocco_2025();
    let payslip = generate_payslip(&create_input(3), &rates).expect("valid input");

    c.bench_function("recalculate_deductions", |b| {
        b.iter(|| {
            black_box(recalculate_deductions(
                black_box(&payslip.earnings),
                black_box(&payslip.deductions),
                &rates,
            ))
        })
    });
}

fn bench_batch_1000(c: &mut Criterion) {
    let rates = RateTable::morocco_2025();
    let inputs: Vec<PayrollInput> = (0..1000).map(create_input).collect();

    let mut group = c.benchmark_group("batch_processing");
    group.throughput(Throughput::Elements(1000));
    group.bench_function("batch_1000", |b| {
        b.iter(|| {
            let payslips: Vec<_> = inputs
                .iter()
                .map(|input| generate_payslip(input, &rates))
                .collect();
            black_box(payslips)
        })
    });
    group.finish();
}

fn bench_http_payslip(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let config = ConfigLoader::load("./config/morocco").expect("Failed to load config");
    let router = create_router(AppState::new(config));
    let body = serde_json::json!({
        "employee": { "id": "emp_bench_http", "base_salary": "6000.00" },
        "period": "December 2025",
        "overtime": [{ "hours": "10" }]
    })
    .to_string();

    c.bench_function("http_payslip", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/payslips")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_single_payslip,
    bench_recalculate,
    bench_batch_1000,
    bench_http_payslip
);
criterion_main!(benches);
