//! Monte Carlo control self-play training binary.
//!
//! Trains two tabular MC agents head-to-head on Leduc hold'em, then
//! evaluates each greedily against a uniform random baseline. The two seats
//! can use different visit rules and abstractions, which is how first-visit
//! and every-visit control (or abstraction levels) are compared.
//!
//! Usage:
//!   cargo run --release --bin train_mc -- [OPTIONS]
//!
//! Options:
//!   --episodes <N>       Training episodes (default: 100000)
//!   --update-freq <N>    Episodes per table update (default: 100)
//!   --epsilon <E>        Exploration probability (default: 0.1)
//!   --gamma <G>          Discount factor (default: 0.9)
//!   --visit0 <KIND>      Seat 0 visit rule: first | every (default: first)
//!   --visit1 <KIND>      Seat 1 visit rule: first | every (default: every)
//!   --abstraction0 <V>   Seat 0 abstraction: v1..v4 (default: v1)
//!   --abstraction1 <V>   Seat 1 abstraction: v1..v4 (default: v1)
//!   --eval-episodes <N>  Greedy evaluation episodes vs random (default: 10000)
//!   --seed <N>           Base random seed
//!   --save0 <FILE>       Checkpoint file for seat 0's agent
//!   --save1 <FILE>       Checkpoint file for seat 1's agent

use std::env;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};

use poker_search_poc::games::leduc::LeducGame;
use poker_search_poc::mc::{
    EpisodeRunner, LeducAbstraction, McAgent, McConfig, RandomPolicy, VisitKind,
};

fn parse_visit(s: &str) -> Option<VisitKind> {
    match s.to_ascii_lowercase().as_str() {
        "first" => Some(VisitKind::FirstVisit),
        "every" => Some(VisitKind::EveryVisit),
        _ => None,
    }
}

fn visit_name(visit: VisitKind) -> &'static str {
    match visit {
        VisitKind::FirstVisit => "first-visit",
        VisitKind::EveryVisit => "every-visit",
    }
}

fn main() {
    env_logger::init();
    let args: Vec<String> = env::args().collect();

    // Parse arguments
    let mut episodes: usize = 100_000;
    let mut update_freq: usize = 100;
    let mut epsilon: f64 = 0.1;
    let mut gamma: f64 = 0.9;
    let mut visit0 = VisitKind::FirstVisit;
    let mut visit1 = VisitKind::EveryVisit;
    let mut abstraction0 = LeducAbstraction::V1;
    let mut abstraction1 = LeducAbstraction::V1;
    let mut eval_episodes: usize = 10_000;
    let mut seed: Option<u64> = None;
    let mut save0: Option<String> = None;
    let mut save1: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--episodes" | "-e" => {
                i += 1;
                if i < args.len() {
                    episodes = args[i].parse().unwrap_or(100_000);
                }
            }
            "--update-freq" | "-u" => {
                i += 1;
                if i < args.len() {
                    update_freq = args[i].parse().unwrap_or(100);
                }
            }
            "--epsilon" => {
                i += 1;
                if i < args.len() {
                    epsilon = args[i].parse().unwrap_or(0.1);
                }
            }
            "--gamma" => {
                i += 1;
                if i < args.len() {
                    gamma = args[i].parse().unwrap_or(0.9);
                }
            }
            "--visit0" => {
                i += 1;
                if i < args.len() {
                    match parse_visit(&args[i]) {
                        Some(v) => visit0 = v,
                        None => {
                            eprintln!("Unknown visit rule: {} (expected first or every)", args[i]);
                            return;
                        }
                    }
                }
            }
            "--visit1" => {
                i += 1;
                if i < args.len() {
                    match parse_visit(&args[i]) {
                        Some(v) => visit1 = v,
                        None => {
                            eprintln!("Unknown visit rule: {} (expected first or every)", args[i]);
                            return;
                        }
                    }
                }
            }
            "--abstraction0" => {
                i += 1;
                if i < args.len() {
                    match LeducAbstraction::parse(&args[i]) {
                        Some(a) => abstraction0 = a,
                        None => {
                            eprintln!("Unknown abstraction: {} (expected v1..v4)", args[i]);
                            return;
                        }
                    }
                }
            }
            "--abstraction1" => {
                i += 1;
                if i < args.len() {
                    match LeducAbstraction::parse(&args[i]) {
                        Some(a) => abstraction1 = a,
                        None => {
                            eprintln!("Unknown abstraction: {} (expected v1..v4)", args[i]);
                            return;
                        }
                    }
                }
            }
            "--eval-episodes" => {
                i += 1;
                if i < args.len() {
                    eval_episodes = args[i].parse().unwrap_or(10_000);
                }
            }
            "--seed" | "-s" => {
                i += 1;
                if i < args.len() {
                    seed = args[i].parse().ok();
                }
            }
            "--save0" => {
                i += 1;
                if i < args.len() {
                    save0 = Some(args[i].clone());
                }
            }
            "--save1" => {
                i += 1;
                if i < args.len() {
                    save1 = Some(args[i].clone());
                }
            }
            "--help" | "-h" => {
                print_help();
                return;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_help();
                return;
            }
        }
        i += 1;
    }

    let config0 = McConfig::new()
        .with_epsilon(epsilon)
        .with_gamma(gamma)
        .with_visit(visit0);
    let config1 = McConfig::new()
        .with_epsilon(epsilon)
        .with_gamma(gamma)
        .with_visit(visit1);

    // Distinct streams per seat from one base seed.
    let (config0, config1) = match seed {
        Some(s) => (config0.with_seed(s), config1.with_seed(s.wrapping_add(1))),
        None => (config0, config1),
    };

    if let Err(e) = config0.validate() {
        eprintln!("Invalid configuration: {}", e);
        return;
    }

    println!("=================================================");
    println!("  Leduc Monte Carlo Control Training");
    println!("=================================================");
    println!();
    println!("Episodes: {}", episodes);
    println!("Update frequency: every {} episodes", update_freq);
    println!("Epsilon: {}  Gamma: {}", epsilon, gamma);
    println!(
        "Seat 0: {} control, abstraction {:?}",
        visit_name(visit0),
        abstraction0
    );
    println!(
        "Seat 1: {} control, abstraction {:?}",
        visit_name(visit1),
        abstraction1
    );
    if let Some(s) = seed {
        println!("Seed: {}", s);
    }
    println!();

    let game = LeducGame::new();
    let mut agent0: McAgent<LeducGame> = McAgent::new(config0, Box::new(abstraction0));
    let mut agent1: McAgent<LeducGame> = McAgent::new(config1, Box::new(abstraction1));
    let mut runner = EpisodeRunner::new(game, update_freq, seed.map(|s| s.wrapping_add(2)));

    // Training
    println!("Starting training...");
    let start_time = Instant::now();

    let pb = ProgressBar::new(episodes as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} episodes ({per_sec})",
        )
        .unwrap()
        .progress_chars("#>-"),
    );

    let mut total0 = 0.0;
    let mut played = 0;
    while played < episodes {
        let chunk = update_freq.min(episodes - played);
        let payoffs = runner.play_episodes(&mut agent0, &mut agent1, chunk, true);
        total0 += payoffs.iter().map(|p| p[0]).sum::<f64>();
        played += chunk;
        pb.inc(chunk as u64);
    }
    pb.finish();

    let elapsed = start_time.elapsed().as_secs_f64();
    println!();
    println!("Training complete!");
    println!("Total time: {:.2}s", elapsed);
    println!("Speed: {:.0} episodes/second", episodes as f64 / elapsed);
    println!(
        "Seat 0 mean payoff during training: {:+.4} chips/hand",
        total0 / episodes as f64
    );
    println!(
        "Seat 0 tables: {} info states, {} entries",
        agent0.table().num_states(),
        agent0.table().num_entries()
    );
    println!(
        "Seat 1 tables: {} info states, {} entries",
        agent1.table().num_states(),
        agent1.table().num_entries()
    );
    println!();

    // Greedy evaluation against a uniform random baseline
    println!("Evaluating {} greedy episodes vs random...", eval_episodes);
    let mut baseline = RandomPolicy::new(seed.map(|s| s.wrapping_add(3)));
    let mean0 = runner.evaluate(&mut agent0, &mut baseline, eval_episodes);
    println!(
        "  Seat 0 ({}): {:+.4} chips/hand",
        visit_name(visit0),
        mean0[0]
    );

    let mut baseline = RandomPolicy::new(seed.map(|s| s.wrapping_add(4)));
    let mean1 = runner.evaluate(&mut baseline, &mut agent1, eval_episodes);
    println!(
        "  Seat 1 ({}): {:+.4} chips/hand",
        visit_name(visit1),
        mean1[1]
    );
    println!();

    // Checkpoints
    for (path, agent, seat) in [(save0, &agent0, 0), (save1, &agent1, 1)] {
        if let Some(path) = path {
            match agent.save(&path) {
                Ok(_) => println!("Seat {} agent saved to {}", seat, path),
                Err(e) => eprintln!("Error saving seat {} agent: {}", seat, e),
            }
        }
    }

    println!("Done!");
}

fn print_help() {
    println!("Leduc Monte Carlo Control Training");
    println!();
    println!("Usage: train_mc [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -e, --episodes <N>       Training episodes (default: 100000)");
    println!("  -u, --update-freq <N>    Episodes per table update (default: 100)");
    println!("  --epsilon <E>            Exploration probability (default: 0.1)");
    println!("  --gamma <G>              Discount factor (default: 0.9)");
    println!("  --visit0 <KIND>          Seat 0 visit rule: first | every (default: first)");
    println!("  --visit1 <KIND>          Seat 1 visit rule: first | every (default: every)");
    println!("  --abstraction0 <V>       Seat 0 state abstraction: v1..v4 (default: v1)");
    println!("  --abstraction1 <V>       Seat 1 state abstraction: v1..v4 (default: v1)");
    println!("  --eval-episodes <N>      Greedy evaluation episodes (default: 10000)");
    println!("  -s, --seed <N>           Base random seed");
    println!("  --save0 <FILE>           Checkpoint file for seat 0's agent");
    println!("  --save1 <FILE>           Checkpoint file for seat 1's agent");
    println!("  -h, --help               Show this help");
    println!();
    println!("Examples:");
    println!("  # First-visit vs every-visit, 1M episodes, reproducible");
    println!("  train_mc --episodes 1000000 --seed 42");
    println!();
    println!("  # Compare abstractions with the same visit rule");
    println!("  train_mc --visit1 first --abstraction0 v1 --abstraction1 v4");
    println!();
    println!("  # Save both agents for later tournaments");
    println!("  train_mc --save0 first_visit.json --save1 every_visit.json");
}
