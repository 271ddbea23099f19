// Opt-in runtime harness. Run with: cargo bench --bench runtime
use std::hint::black_box;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use topr::cli::args::{Args, OrderArg};
use topr::orchestrator;

struct Case {
    name: &'static str,
    input: PathBuf,
    by: &'static [&'static str],
    top: u64,
    unique: bool,
    order: OrderArg,
}

fn main() {
    let iterations = env_u64("TOPR_RUNTIME_ITERS", 50);
    let warmup = env_u64("TOPR_RUNTIME_WARMUP", 3);
    let budget_ms = env_f64("TOPR_RUNTIME_BUDGET_MS");

    println!("topr runtime harness");
    println!("iterations={iterations} warmup={warmup}");
    if let Some(budget) = budget_ms {
        println!("budget_ms={budget}");
    }

    let wide = synthetic_input(env_u64("TOPR_RUNTIME_ROWS", 50_000));

    let cases = [
        Case {
            name: "plain_small",
            input: PathBuf::from("tests/fixtures/products.csv"),
            by: &["price"],
            top: 2,
            unique: false,
            order: OrderArg::Sorted,
        },
        Case {
            name: "unique_small",
            input: PathBuf::from("tests/fixtures/scores.csv"),
            by: &["score"],
            top: 1,
            unique: true,
            order: OrderArg::Input,
        },
        Case {
            name: "plain_synthetic",
            input: wide.clone(),
            by: &["value"],
            top: 100,
            unique: false,
            order: OrderArg::Sorted,
        },
        Case {
            name: "input_order_synthetic",
            input: wide,
            by: &["value"],
            top: 100,
            unique: false,
            order: OrderArg::Input,
        },
    ];

    let mut failed = false;
    for case in &cases {
        let avg_ms = run_case(case, iterations, warmup);
        if let Some(budget) = budget_ms
            && avg_ms > budget
        {
            eprintln!(
                "budget exceeded for {}: avg_ms={:.3} budget_ms={:.3}",
                case.name, avg_ms, budget
            );
            failed = true;
        }
    }

    if failed {
        std::process::exit(1);
    }
}

fn synthetic_input(rows: u64) -> PathBuf {
    let path = std::env::temp_dir().join("topr-runtime-synthetic.csv");
    let mut text = String::from("id,value\n");
    // Deterministic but unsorted values so the heap churns.
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    for id in 0..rows {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        text.push_str(&format!("{id},{}\n", state % 1_000_000));
    }
    std::fs::write(&path, text).expect("could not write synthetic input");
    path
}

fn run_case(case: &Case, iterations: u64, warmup: u64) -> f64 {
    let args = Args {
        input: case.input.clone(),
        top: case.top,
        by: case.by.iter().map(|column| column.to_string()).collect(),
        unique: case.unique,
        order: case.order,
        missing_to_end: false,
        delimiter: None,
        json: false,
    };

    for _ in 0..warmup {
        let result = orchestrator::run(&args).expect("warmup run failed");
        black_box(result);
    }

    let mut total = Duration::ZERO;
    for _ in 0..iterations {
        let start = Instant::now();
        let result = orchestrator::run(&args).expect("timed run failed");
        black_box(result);
        total += start.elapsed();
    }

    let total_ms = total.as_secs_f64() * 1000.0;
    let avg_ms = if iterations == 0 {
        0.0
    } else {
        total_ms / iterations as f64
    };

    println!(
        "case {}: avg_ms={:.3} total_ms={:.3}",
        case.name, avg_ms, total_ms
    );

    avg_ms
}

fn env_u64(name: &str, default: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_f64(name: &str) -> Option<f64> {
    std::env::var(name)
        .ok()
        .and_then(|value| value.parse::<f64>().ok())
        .filter(|value| *value > 0.0)
}
