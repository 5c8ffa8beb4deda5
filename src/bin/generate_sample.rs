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

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

const COUNTRIES: &[&str] = &[
    "United States",
    "China",
    "Germany",
    "India",
    "France",
    "United Kingdom",
    "Brazil",
    "Japan",
    "Switzerland",
    "Australia",
];

const INDUSTRIES: &[&str] = &[
    "Technology",
    "Finance",
    "Retail",
    "Manufacturing",
    "Energy",
    "Real Estate",
    "Healthcare",
    "Media",
];

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let output_path = "billionaires.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;

    writer
        .write_record(["name", "country_of_residence", "industry", "gender", "wealth"])
        .context("writing header")?;

    let n_rows = 400;
    for i in 0..n_rows {
        let name = format!("Billionaire {i}");

        // A sprinkling of missing cells exercises the null paths.
        let country = if rng.next_f64() < 0.03 {
            ""
        } else {
            rng.pick(COUNTRIES)
        };
        let industry = if rng.next_f64() < 0.03 {
            ""
        } else {
            rng.pick(INDUSTRIES)
        };
        let gender = if rng.next_f64() < 0.05 {
            ""
        } else if rng.next_f64() < 0.85 {
            "Male"
        } else {
            "Female"
        };

        // Heavy-tailed wealth in $ billions, with the occasional blank and
        // the occasional unparseable cell the loader must coerce to null.
        let roll = rng.next_f64();
        let wealth = if roll < 0.02 {
            String::new()
        } else if roll < 0.03 {
            "n/a".to_string()
        } else {
            let w = 1.0 + 40.0 * rng.next_f64().powi(3);
            format!("{w:.2}")
        };

        writer
            .write_record([name.as_str(), country, industry, gender, wealth.as_str()])
            .with_context(|| format!("writing row {i}"))?;
    }

    writer.flush().context("flushing CSV")?;
    println!("Wrote {n_rows} rows to {output_path}");
    Ok(())
}
