use orbit_sim::sim::runner::{aim_velocity, AttractorLayout, Phase};
use orbit_sim::types::{
    Attractor, Bounds, OutcomeSummary, Scenario, ScenarioConfig, Vec2, WinCondition,
};
use orbit_sim::integrator::IntegratorKind;
use orbit_sim::physics::gravity;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // -----------------------------------------------------------------------
    // Scenario: single planet at the center, tangential launch
    // -----------------------------------------------------------------------
    let bounds = Bounds { width: 1400.0, height: 700.0 };
    let planet = Attractor {
        pos: bounds.center(),
        mass: 500_000.0, // so GM = 500000 with g = 1
        radius: 75.0,
    };
    let cfg = ScenarioConfig {
        g: 1.0,
        dt: 0.02,
        bounds,
        win: WinCondition::Revolutions(3.0),
        softening_r2: gravity::recommended_softening_r2(std::slice::from_ref(&planet)),
        probe_radius: 7.5,
        trail_min_distance: 50.0,
        trail_lifetime: None,
        offscreen_grace: 0.0,
        photo_margin: 100.0,
    };

    let gm = cfg.g * planet.mass;
    let orbit_radius = 160.0;
    let launch_pos = planet.pos + Vec2::new(orbit_radius, 0.0);
    let speed = (gm / orbit_radius).sqrt();
    let launch_vel = match aim_velocity(&Vec2::new(0.0, 1.0), speed) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("bad launch vector: {}", e);
            return;
        }
    };

    let mut scenario = match Scenario::new(cfg.clone(), AttractorLayout::Fixed(vec![planet]), 0) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("scenario setup failed: {}", e);
            return;
        }
    };
    if let Err(e) = scenario.launch(launch_pos, launch_vel, IntegratorKind::Rk4) {
        eprintln!("launch failed: {}", e);
        return;
    }

    // -----------------------------------------------------------------------
    // Run to completion at the fixed step
    // -----------------------------------------------------------------------
    let max_ticks = 200_000;
    let mut ticks = 0;
    while scenario.phase() != Phase::Finished && ticks < max_ticks {
        scenario.tick();
        ticks += 1;
    }

    // -----------------------------------------------------------------------
    // Flight report
    // -----------------------------------------------------------------------
    let probe = &scenario.bodies()[0];
    let period = 2.0 * std::f64::consts::PI * (orbit_radius.powi(3) / gm).sqrt();

    println!();
    println!("====================================================================");
    println!("  ORBIT SIMULATION — circular launch demo");
    println!("====================================================================");
    println!();
    println!("  Scenario");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!("  GM:            {:>10.0}      dt:           {:>8.3} s", gm, cfg.dt);
    println!(
        "  Launch radius: {:>10.1}      speed:        {:>8.2}",
        orbit_radius, speed
    );
    println!(
        "  Analytic period: {:>8.2} s    target:       {:>8.1} revs",
        period, 3.0
    );
    println!();

    println!("  Energy samples");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:>8}  {:>12}  {:>12}  {:>12}",
        "t (s)", "kinetic", "potential", "mechanical"
    );
    let series = probe.energy_series();
    let stride = (series.len() / 12).max(1);
    for sample in series.iter().step_by(stride) {
        println!(
            "  {:>8.2}  {:>12.2}  {:>12.2}  {:>12.2}",
            sample.t, sample.kinetic, sample.potential, sample.mechanical
        );
    }
    if let (Some(first), Some(last)) = (series.first(), series.last()) {
        let drift = ((last.mechanical - first.mechanical) / first.mechanical).abs();
        println!();
        println!("  Mechanical energy drift: {:.5}% over {} steps", drift * 100.0, ticks);
    }
    println!();

    println!("  Result");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Revolutions:   {:>8.3}       measured periods: {:?}",
        probe.revolutions(),
        probe
            .revolution_periods()
            .iter()
            .map(|p| (p * 100.0).round() / 100.0)
            .collect::<Vec<_>>()
    );
    match scenario.outcome() {
        Some(outcome) => {
            let verdict = if outcome.won { "WIN" } else { "LOSS" };
            match &outcome.summary {
                OutcomeSummary::Revolutions(revs) => {
                    println!("  Outcome:       {}  ({:.2} revolutions)", verdict, revs)
                }
                OutcomeSummary::PeriodStdDev(Some(std)) => {
                    println!("  Outcome:       {}  (period σ = {:.3} s)", verdict, std)
                }
                OutcomeSummary::PeriodStdDev(None) => {
                    println!("  Outcome:       {}  (no full revolution recorded)", verdict)
                }
                OutcomeSummary::Pictures { taken, total } => {
                    println!("  Outcome:       {}  (pictures {}/{})", verdict, taken, total)
                }
            }
        }
        None => println!("  Outcome:       still in flight after {} ticks", ticks),
    }
    println!("  Trail points:  {:>8}", probe.trail().len());
    println!("====================================================================");
    println!();
}
