// ============================================================================
// Basic Usage Example
// ============================================================================

use fixed_point_engine::prelude::*;

fn vector(values: &[i64]) -> Value {
    Value::from_scalars(
        values
            .iter()
            .map(|&v| FixedPoint::integral(v).unwrap())
            .collect(),
    )
    .unwrap()
}

fn matrix(rows: &[&[i64]]) -> Value {
    Value::array(rows.iter().map(|row| vector(row)).collect()).unwrap()
}

fn main() {
    println!("=== Fixed-Point Engine Example ===\n");

    // Scalars carry their precision; the default is 16 fractional bits
    println!("=== Scalars ===");
    let three = FixedPoint::integral(3).unwrap();
    let third = FixedPoint::ratio(1, 3).unwrap();
    println!("three       = {} (raw {})", three, three.raw_value());
    println!("one third   = {} (raw {})", third, third.raw_value());
    println!("product     = {}", three.mul(third).unwrap());
    println!(
        "exp(1)      = {}",
        FixedPoint::one(DEFAULT_FBITS).unwrap().exp().unwrap()
    );

    // Multiplication rounds toward negative infinity, division toward
    // zero; the smallest negative raw value shows the difference
    let tiny = FixedPoint::from_raw(-1, DEFAULT_FBITS).unwrap();
    let half = FixedPoint::ratio(1, 2).unwrap();
    let two = FixedPoint::integral(2).unwrap();
    println!("tiny * 1/2  = {:?}", tiny.mul(half).unwrap());
    println!("tiny / 2    = {:?}", tiny.div(two).unwrap());

    // Values broadcast per element, numpy style
    println!("\n=== Values and Broadcasting ===");
    let table = matrix(&[&[1, 2, 3], &[4, 5, 6]]);
    println!("table       = {}", table.materialize());
    println!("shape       = {}", table.shape());

    let offsets = vector(&[10, 20, 30]);
    println!(
        "table + row = {}",
        table.add(&offsets).unwrap().materialize()
    );

    let scale = Value::scalar(two);
    println!(
        "table * 2   = {}",
        table.mul(&scale).unwrap().materialize()
    );

    println!("\n=== Reductions and Linear Algebra ===");
    println!("sum         = {}", sum(&table).unwrap().materialize());
    println!("product     = {}", product(&table).unwrap().materialize());
    println!(
        "transpose   = {}",
        transpose(&table).unwrap().materialize()
    );

    let weights = matrix(&[&[1], &[0], &[-1]]);
    println!(
        "table . w   = {}",
        dot(&table, &weights).unwrap().materialize()
    );
    println!(
        "cell [1, 2] = {}",
        table.getitem(&[1, 2]).unwrap().materialize()
    );

    // Train on the usual tiny set where the first feature carries the
    // outcome, then score a sample that was never seen
    println!("\n=== Training ===");
    let samples = matrix(&[&[0, 0, 1], &[1, 1, 1], &[1, 0, 1], &[0, 1, 1]]);
    let observations = matrix(&[&[0], &[1], &[1], &[0]]);

    let trained = train(&samples, &observations, 100).unwrap();
    println!("weights     = {}", trained.materialize());

    let scored = predict(&samples, &observations, 100, &vector(&[1, 0, 0])).unwrap();
    println!("prediction  = {}", scored.materialize());
}
