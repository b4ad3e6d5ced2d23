use anyhow::{Context, Result};
use serde::Serialize;

/// One CSV row in the fight songs schema.
#[derive(Serialize)]
struct Row {
    school: String,
    conference: &'static str,
    song_name: String,
    year: String,
    student_writer: &'static str,
    fight: &'static str,
    victory: &'static str,
    win_won: &'static str,
    rah: &'static str,
    nonsense: &'static str,
    colors: &'static str,
    men: &'static str,
    opponents: &'static str,
    spelling: &'static str,
    trope_count: u32,
    spotify_id: String,
    bpm: u32,
    sec_duration: u32,
}

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

    fn range(&mut self, lo: u32, hi: u32) -> u32 {
        lo + (self.next_f64() * (hi - lo + 1) as f64) as u32
    }

    /// "Yes" with probability `p`.
    fn flag(&mut self, p: f64) -> &'static str {
        if self.next_f64() < p {
            "Yes"
        } else {
            "No"
        }
    }
}

/// Conference, number of schools, and how likely each conference is to use
/// the tradition tropes (colors, spelling).
const CONFERENCES: [(&str, usize, f64); 6] = [
    ("Big Ten", 14, 0.7),
    ("SEC", 14, 0.4),
    ("ACC", 14, 0.35),
    ("Big 12", 10, 0.3),
    ("Pac-12", 12, 0.3),
    ("Independent", 1, 0.5),
];

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_fight_songs.csv".to_string());

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;

    let mut n = 0;
    for (conference, schools, tradition) in CONFERENCES {
        for i in 0..schools {
            n += 1;
            let flags = [
                rng.flag(0.55),
                rng.flag(0.5),
                rng.flag(0.55),
                rng.flag(0.3),
                rng.flag(0.25),
                rng.flag(tradition),
                rng.flag(0.3),
                rng.flag(0.3),
                rng.flag(tradition * 0.6),
            ];
            let trope_count = flags.iter().filter(|f| **f == "Yes").count() as u32;

            // Every ninth song has an unknown year, every 23rd no recording.
            let year = if n % 9 == 0 {
                "Unknown".to_string()
            } else {
                rng.range(1890, 1970).to_string()
            };
            let spotify_id = if n % 23 == 0 {
                String::new()
            } else {
                format!("{:022x}", rng.next_u64())
            };

            writer
                .serialize(Row {
                    school: format!("{conference} School {}", i + 1),
                    conference,
                    song_name: format!("Fight Song No. {n}"),
                    year,
                    student_writer: rng.flag(0.4),
                    fight: flags[0],
                    victory: flags[1],
                    win_won: flags[2],
                    rah: flags[3],
                    nonsense: flags[4],
                    colors: flags[5],
                    men: flags[6],
                    opponents: flags[7],
                    spelling: flags[8],
                    trope_count,
                    spotify_id,
                    bpm: rng.range(60, 180),
                    sec_duration: rng.range(30, 180),
                })
                .context("writing row")?;
        }
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {n} fight songs to {output_path}");
    Ok(())
}
