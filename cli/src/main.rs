//! Sampler scheduler driver
//!
//! Replays JSON scenario files against the indexed event queue, or generates
//! a deterministic synthetic workload, printing one trace line per operation
//! so queue behavior can be inspected and diffed between runs.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sampler_scheduler_core_rs::{Event, EventQueue, RngManager};
use serde::Deserialize;

/// Sampler scheduler driver.
#[derive(Parser)]
#[command(name = "sampler-scheduler")]
#[command(about = "Replay and demo driver for the indexed event queue", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a JSON scenario file against a fresh queue.
    Replay {
        /// Path to the scenario file.
        scenario: PathBuf,
    },

    /// Generate and drain a deterministic synthetic workload.
    Demo {
        /// Queue capacity (also the number of variables).
        #[arg(short, long, default_value = "8")]
        capacity: usize,

        /// Number of scheduling steps to generate.
        #[arg(short, long, default_value = "32")]
        events: usize,

        /// RNG seed.
        #[arg(short, long, default_value = "12345")]
        seed: u64,
    },
}

/// One scripted queue operation.
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum ScenarioOp {
    Add {
        variable: usize,
        #[serde(default)]
        value: i64,
        time: f64,
    },
    Remove {
        variable: usize,
    },
    Head,
    PopHead,
}

/// A scripted run: queue capacity plus the operations to apply in order.
#[derive(Debug, Deserialize)]
struct Scenario {
    capacity: usize,
    ops: Vec<ScenarioOp>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Replay { scenario } => replay(&scenario),
        Commands::Demo {
            capacity,
            events,
            seed,
        } => demo(capacity, events, seed),
    }
}

/// Apply every scenario operation in order, then drain what remains.
///
/// Rejected operations are reported on their trace line and do not abort the
/// replay; the queue guarantees they leave its state unchanged.
fn replay(path: &Path) -> Result<()> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
    let scenario: Scenario = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse scenario file {}", path.display()))?;

    println!(
        "replaying {} ops against a queue of capacity {}",
        scenario.ops.len(),
        scenario.capacity
    );

    let mut queue: EventQueue<i64> = EventQueue::new(scenario.capacity);
    for (step, op) in scenario.ops.into_iter().enumerate() {
        match op {
            ScenarioOp::Add {
                variable,
                value,
                time,
            } => match queue.add(Event::new(variable, value, time)) {
                Ok(()) => println!(
                    "[{:3}] add      var {} value {} at t={} -> ok (len {})",
                    step,
                    variable,
                    value,
                    time,
                    queue.len()
                ),
                Err(e) => println!(
                    "[{:3}] add      var {} value {} at t={} -> rejected: {}",
                    step, variable, value, time, e
                ),
            },
            ScenarioOp::Remove { variable } => match queue.remove(variable) {
                Ok(event) => println!(
                    "[{:3}] remove   var {} -> cancelled event at t={} (len {})",
                    step,
                    variable,
                    event.time(),
                    queue.len()
                ),
                Err(e) => println!("[{:3}] remove   var {} -> rejected: {}", step, variable, e),
            },
            ScenarioOp::Head => match queue.head() {
                Some(event) => println!(
                    "[{:3}] head     -> var {} fires at t={}",
                    step,
                    event.variable(),
                    event.time()
                ),
                None => println!("[{:3}] head     -> empty", step),
            },
            ScenarioOp::PopHead => match queue.pop_head() {
                Some(event) => println!(
                    "[{:3}] pop_head -> var {} value {} at t={} (len {})",
                    step,
                    event.variable(),
                    event.value(),
                    event.time(),
                    queue.len()
                ),
                None => println!("[{:3}] pop_head -> empty", step),
            },
        }
    }

    drain(&mut queue);
    Ok(())
}

/// Build a reschedule-heavy workload from a seeded RNG, then drain it.
///
/// Each step picks a variable, cancels its pending event if it has one, and
/// schedules a fresh event at the current clock plus an exponential holding
/// time. Identical seed and parameters reproduce the trace exactly.
fn demo(capacity: usize, events: usize, seed: u64) -> Result<()> {
    anyhow::ensure!(capacity > 0, "capacity must be at least 1");

    println!(
        "demo: capacity {}, {} steps, seed {}",
        capacity, events, seed
    );

    let mut queue: EventQueue<i64> = EventQueue::new(capacity);
    let mut rng = RngManager::new(seed);
    let mut clock = 0.0;

    for step in 0..events {
        let variable = rng.range(0, capacity);
        clock += rng.next_exponential(1.0);

        if queue.contains(variable) {
            let stale = queue
                .remove(variable)
                .context("queued variable disappeared")?;
            println!(
                "[{:3}] reschedule var {}: t={} -> t={}",
                step,
                variable,
                stale.time(),
                clock
            );
        } else {
            println!("[{:3}] schedule   var {} at t={}", step, variable, clock);
        }
        queue
            .add(Event::new(variable, step as i64, clock))
            .context("scheduling generated event")?;
    }

    println!("rng state after generation: {:#018x}", rng.get_state());
    drain(&mut queue);
    Ok(())
}

/// Pop every remaining event in firing order.
fn drain(queue: &mut EventQueue<i64>) {
    println!("draining {} pending events:", queue.len());
    while let Some(event) = queue.pop_head() {
        println!(
            "  var {} value {} at t={}",
            event.variable(),
            event.value(),
            event.time()
        );
    }
}
