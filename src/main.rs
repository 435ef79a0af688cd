//! Krist Wallet Generator CLI
//!
//! Usage:
//!   krist-vanity test         # Find one wallet whose address ends in "test"
//!   krist-vanity test,foo 4   # Find 4 wallets ending in "test" or "foo"

use std::process;
use std::sync::atomic::Ordering;

use clap::Parser;

use krist_vanity::{Config, ConsoleReporter, Outcome, SearchCoordinator, SuffixSet};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();

    // Validate configuration
    if let Err(e) = config.validate() {
        eprintln!("Configuration error: {}", e);
        process::exit(1);
    }

    let options = config.search_options();

    // Print startup info
    println!("Krist Wallet Generator");
    println!("======================");
    println!("Search terms:");
    for term in &options.suffixes {
        println!("  - {}", term);
    }
    if let Ok(targets) = SuffixSet::new(options.suffixes.iter().cloned()) {
        println!("Difficulty: {}", targets.difficulty_description());
    }
    println!("Workers:    {}", options.workers);
    println!("Target:     {} wallet(s)", options.target);
    println!();

    let coordinator = SearchCoordinator::new(options);

    // Set up ctrl-c handler
    let interrupt = coordinator.interrupt_handle();
    ctrlc::set_handler(move || {
        interrupt.store(true, Ordering::Relaxed);
    })
    .expect("Error setting Ctrl-C handler");

    let mut reporter = ConsoleReporter::new();
    let outcome = coordinator.run(&mut reporter);

    if let Outcome::Completed(summary) = &outcome {
        println!(
            "Target reached! Found {} wallet(s) in {:.2}s.",
            summary.matches.len(),
            summary.elapsed.as_secs_f64()
        );
    }

    process::exit(outcome.exit_code());
}
