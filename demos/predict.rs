// ============================================================================
// Prediction Example
// Scores a command-line sample against the built-in training set
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
    #[cfg(feature = "logging")]
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() != 3 {
        eprintln!("usage: predict <f0> <f1> <f2>");
        eprintln!("  scores a three-feature decimal sample, e.g. predict 1 0.5 0");
        std::process::exit(2);
    }

    let mut features = Vec::with_capacity(args.len());
    for arg in &args {
        match arg.parse::<FixedPoint>() {
            Ok(value) => features.push(value),
            Err(err) => {
                eprintln!("cannot parse {:?}: {}", arg, err);
                std::process::exit(2);
            },
        }
    }
    let sample = Value::from_scalars(features).expect("three parsed features");

    // The first feature alone carries the outcome in this set
    let samples = matrix(&[&[0, 0, 1], &[1, 1, 1], &[1, 0, 1], &[0, 1, 1]]);
    let observations = matrix(&[&[0], &[1], &[1], &[0]]);

    match predict(&samples, &observations, 100, &sample) {
        Ok(prediction) => println!("{}", prediction.materialize()),
        Err(err) => {
            eprintln!("prediction failed: {}", err);
            std::process::exit(1);
        },
    }
}
