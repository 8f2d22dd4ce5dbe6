//! Writes a synthetic `sredjena_baza_elas.csv` for trying out the viewer.

use anyhow::{Context, Result};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Baseline stiffness per muscle (kPa).
const MUSCLES: [(&str, f64); 3] = [("biceps", 18.0), ("triceps", 22.0), ("gastrocnemius", 30.0)];
const POSITIONS: [(&str, f64); 2] = [("rest", 1.0), ("flex", 1.6)];
const VISITS: [f64; 5] = [0.0, 30.0, 90.0, 180.0, 365.0];

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let output_path = "sredjena_baza_elas.csv";

    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer.write_record(["code", "muscle", "position", "health_status", "time_days", "value"])?;

    let mut rows = 0usize;
    for code in 101..=112u32 {
        let injured = code % 3 == 0;
        let status = if injured { "injured" } else { "healthy" };
        // Injured muscles start stiffer and relax towards normal over a year.
        let recovery = if injured { rng.gauss(0.35, 0.05) } else { 0.0 };

        for (muscle, base) in MUSCLES {
            for (position, factor) in POSITIONS {
                let subject = rng.gauss(0.0, 1.5);
                for &t in &VISITS {
                    let excess = recovery * (-t / 120.0).exp();
                    let value = base * factor * (1.0 + excess) + subject + rng.gauss(0.0, 0.8);
                    writer.write_record([
                        code.to_string(),
                        muscle.to_string(),
                        position.to_string(),
                        status.to_string(),
                        t.to_string(),
                        format!("{value:.2}"),
                    ])?;
                    rows += 1;
                }
            }
        }
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {rows} measurements to {output_path}");
    Ok(())
}
