//! Minimal host loop driving a birth-death jump process end-to-end: a birth
//! channel at constant rate `lambda` and a death channel at rate `mu * u`.
//! This core is synchronous and single-threaded, so the loop below is the
//! entire host.

use clap::Parser;
use nrm_core::{Aggregator, Channel, Integrator, MassActionJump};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[derive(Parser)]
#[command(about = "Drive a birth-death jump process with the Next Reaction Method core")]
struct Args {
    /// Birth rate (lambda).
    #[arg(long, default_value_t = 2.0)]
    lambda: f64,
    /// Per-individual death rate (mu); the death channel's rate is mu * u.
    #[arg(long, default_value_t = 1.0)]
    mu: f64,
    /// Initial population.
    #[arg(long, default_value_t = 0)]
    u0: i64,
    /// Simulated end time.
    #[arg(long, default_value_t = 50.0)]
    end_time: f64,
    /// RNG seed.
    #[arg(long, default_value_t = 1)]
    seed: u64,
}

struct HostIntegrator {
    end_time: f64,
}
impl Integrator<f64> for HostIntegrator {
    fn end_time(&self) -> f64 {
        self.end_time
    }
}

fn init_logging() {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    simplelog::TermLogger::init(
        log::LevelFilter::Info,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )
    .expect("initialize logger");
}

fn main() {
    init_logging();
    let args = Args::parse();

    // birth: 0 -> A, rate lambda (zero reactants: a degenerate mass-action channel)
    let birth = Channel::MassAction(MassActionJump::new(vec![], vec![(0, 1)], args.lambda));
    // death: A -> 0, rate mu * u
    let death = Channel::MassAction(MassActionJump::new(vec![(0, 1)], vec![(0, -1)], args.mu));

    let rng = SmallRng::seed_from_u64(args.seed);
    let integrator = HostIntegrator { end_time: args.end_time };
    let mut aggregator = Aggregator::build(vec![birth, death], None, rng, args.end_time)
        .expect("birth-death channels are mass-action; no dependency graph needed");

    let mut u = [args.u0 as f64];
    aggregator
        .initialize(&u, &(), 0.0)
        .expect("initialize with non-negative rates");

    let mut jumps = 0usize;
    loop {
        let (time, channel) = aggregator.peek_next();
        if time >= args.end_time {
            break;
        }
        aggregator
            .execute_jump(&integrator, &mut u, &(), time)
            .expect("host-supplied rate/affect functions do not fail");
        jumps += 1;
        log::info!("t={time:.4} channel={channel} u={}", u[0]);
    }

    println!("final population: {}", u[0]);
    println!("total jumps: {jumps}");
    println!("expected stationary mean (lambda/mu): {}", args.lambda / args.mu);
}
