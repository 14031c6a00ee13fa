//! The stationary distribution of a birth-death system (birth rate lambda,
//! death rate mu*u) matches Poisson(lambda/mu) within binomial confidence
//! bounds. Slow, so `#[ignore]`d by default.

use nrm_core::{Aggregator, Channel, Integrator, MassActionJump};
use rand::rngs::SmallRng;
use rand::SeedableRng;

struct NoopIntegrator;
impl Integrator<f64> for NoopIntegrator {
    fn end_time(&self) -> f64 {
        f64::INFINITY
    }
}

fn run_to_stationary(seed: u64, lambda: f64, mu: f64, end_time: f64) -> f64 {
    let birth = Channel::MassAction(MassActionJump::new(vec![], vec![(0, 1)], lambda));
    let death = Channel::MassAction(MassActionJump::new(vec![(0, 1)], vec![(0, -1)], mu));
    let rng = SmallRng::seed_from_u64(seed);
    let integrator = NoopIntegrator;
    let mut agg = Aggregator::build(vec![birth, death], None, rng, end_time).unwrap();
    let mut u = [0.0];
    agg.initialize(&u, &(), 0.0).unwrap();
    loop {
        let (time, _) = agg.peek_next();
        if time >= end_time {
            break;
        }
        agg.execute_jump(&integrator, &mut u, &(), time).unwrap();
    }
    u[0]
}

fn poisson_pmf(k: u32, mean: f64) -> f64 {
    let mut log_pmf = -mean + k as f64 * mean.ln();
    for i in 1..=k {
        log_pmf -= (i as f64).ln();
    }
    log_pmf.exp()
}

#[test]
#[ignore]
fn birth_death_stationary_distribution_matches_poisson() {
    let lambda = 4.0;
    let mu = 1.0;
    let mean = lambda / mu;
    let trajectories = 4000;
    let end_time = 30.0; // long enough past the mixing time for mean ~4

    #[cfg(feature = "parallel")]
    let samples: Vec<f64> = {
        use rayon::prelude::*;
        (0..trajectories)
            .into_par_iter()
            .map(|i| run_to_stationary(i as u64 + 1, lambda, mu, end_time))
            .collect()
    };
    #[cfg(not(feature = "parallel"))]
    let samples: Vec<f64> = (0..trajectories)
        .map(|i| run_to_stationary(i as u64 + 1, lambda, mu, end_time))
        .collect();

    let empirical_mean: f64 = samples.iter().sum::<f64>() / trajectories as f64;
    // Var(Poisson) = mean; standard error of the sample mean over N draws.
    let standard_error = (mean / trajectories as f64).sqrt();
    let tolerance = 5.0 * standard_error;
    assert!(
        (empirical_mean - mean).abs() < tolerance,
        "empirical mean {empirical_mean} too far from Poisson mean {mean} (tolerance {tolerance})"
    );

    // spot-check the empirical mass at k=mean against the Poisson pmf.
    let k = mean.round() as u32;
    let empirical_mass =
        samples.iter().filter(|&&u| u.round() as u32 == k).count() as f64 / trajectories as f64;
    let expected_mass = poisson_pmf(k, mean);
    assert!(
        (empirical_mass - expected_mass).abs() < 0.05,
        "empirical P(u={k})={empirical_mass} too far from Poisson pmf {expected_mass}"
    );
}
