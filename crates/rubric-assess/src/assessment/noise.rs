use super::domain::Submission;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// How the scorer draws its bounded random terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseMode {
    /// No randomness: jitter is zero and every range collapses to a fixed point.
    Disabled,
    /// A fixed seed shared by every invocation.
    Seeded(u64),
    /// Seed derived from a hash of the inputs, so equal inputs score equally.
    #[default]
    Derived,
    /// Fresh OS entropy per invocation.
    Entropy,
}

impl NoiseMode {
    /// Parse `derived`, `disabled`, `entropy`, or `seed:<u64>`.
    pub fn parse(raw: &str) -> Option<Self> {
        let value = raw.trim().to_ascii_lowercase();
        match value.as_str() {
            "derived" | "hash" => Some(Self::Derived),
            "disabled" | "off" | "none" => Some(Self::Disabled),
            "entropy" | "random" => Some(Self::Entropy),
            other => other
                .strip_prefix("seed:")
                .and_then(|seed| seed.trim().parse::<u64>().ok())
                .map(Self::Seeded),
        }
    }

    /// Build a noise source; `Derived` hashes `parts` into the seed.
    pub fn source(self, parts: &[&[u8]]) -> Noise {
        match self {
            NoiseMode::Disabled => Noise::disabled(),
            NoiseMode::Seeded(seed) => Noise::seeded(seed),
            NoiseMode::Derived => Noise::seeded(derive_seed(parts)),
            NoiseMode::Entropy => Noise {
                rng: Some(ChaCha8Rng::from_entropy()),
            },
        }
    }

    pub fn for_submission(self, submission: &Submission) -> Noise {
        let mut parts: Vec<&[u8]> = Vec::with_capacity(1 + submission.fields.len() * 2);
        parts.push(submission.subcomponent_id.as_bytes());
        for (name, text) in &submission.fields {
            parts.push(name.as_bytes());
            parts.push(text.as_bytes());
        }
        self.source(&parts)
    }
}

/// Stable 64-bit seed from length-delimited byte parts.
pub fn derive_seed(parts: &[&[u8]]) -> u64 {
    let mut hasher = blake3::Hasher::new();
    for part in parts {
        hasher.update(&(part.len() as u64).to_le_bytes());
        hasher.update(part);
    }
    let digest = hasher.finalize();
    let mut seed = [0u8; 8];
    seed.copy_from_slice(&digest.as_bytes()[..8]);
    u64::from_le_bytes(seed)
}

/// Bounded random draws used by scoring and the synthetic generators.
#[derive(Debug, Clone)]
pub struct Noise {
    rng: Option<ChaCha8Rng>,
}

impl Noise {
    pub fn disabled() -> Self {
        Self { rng: None }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Some(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.rng.is_some()
    }

    /// Symmetric integer jitter in `[-spread, spread]`; zero when disabled.
    pub fn jitter(&mut self, spread: i64) -> i64 {
        match &mut self.rng {
            Some(rng) if spread > 0 => rng.gen_range(-spread..=spread),
            _ => 0,
        }
    }

    /// Integer in `[low, high]`; `low` when disabled.
    pub fn pick(&mut self, low: u32, high: u32) -> u32 {
        match &mut self.rng {
            Some(rng) if high > low => rng.gen_range(low..=high),
            _ => low,
        }
    }

    /// Real in `[low, high)`; the midpoint when disabled.
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        match &mut self.rng {
            Some(rng) if high > low => rng.gen_range(low..high),
            _ => (low + high) / 2.0,
        }
    }
}
