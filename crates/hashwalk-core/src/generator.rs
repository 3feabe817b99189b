//! Bounded integer generators used as the walk's direction source.
//!
//! Every strategy owns a single 64-bit state word that persists across calls,
//! advances it with its own mixing step, and reduces the new state modulo the
//! caller's bound.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};
use std::{error::Error, fmt, str::FromStr};

/// Seed every stock strategy starts from unless told otherwise.
pub const DEFAULT_SEED: u64 = 1000;

/// FNV-1a 32-bit prime, applied to the full 64-bit state.
const FNV_PRIME: u64 = 0x0100_0193;

const WY_P0: u64 = 0xa076_1d64_78bd_642f;
const WY_P1: u64 = 0xe703_7ed1_a0b4_28db;

/// A stateful source of integers uniformly distributed on `[0, bound)`.
pub trait BoundedGenerator {
    /// Advance the state and return a value in `[0, bound)`. `bound` must be non-zero.
    fn next_below(&mut self, bound: u32) -> u32;

    /// Short label used in logs and reports.
    fn name(&self) -> &str {
        "custom"
    }
}

impl<G: BoundedGenerator + ?Sized> BoundedGenerator for Box<G> {
    fn next_below(&mut self, bound: u32) -> u32 {
        (**self).next_below(bound)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

#[inline]
fn reduce(state: u64, bound: u32) -> u32 {
    debug_assert!(bound > 0, "bound must be positive");
    (state % u64::from(bound)) as u32
}

/// 64x64→128 multiply folded back to 64 bits (wyhash "mum").
#[inline]
fn mum(a: u64, b: u64) -> u64 {
    let r = u128::from(a) * u128::from(b);
    (r as u64) ^ ((r >> 64) as u64)
}

/// Multiply-fold mixer from the wyhash family. This is the hash under audit.
pub fn mum_mix64(v: u64) -> u64 {
    mum(mum(v ^ WY_P0, v ^ WY_P1) ^ WY_P0, WY_P1)
}

/// SplitMix64 step: golden-ratio increment followed by the avalanche finalizer.
pub fn splitmix64(v: u64) -> u64 {
    let mut z = v.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Hash-advance strategy: `state = mix(state)`, result `state % bound`.
#[derive(Clone, Debug)]
pub struct HashAdvance {
    state: u64,
    mix: fn(u64) -> u64,
    name: &'static str,
}

impl HashAdvance {
    pub fn new(seed: u64, mix: fn(u64) -> u64) -> Self {
        Self {
            state: seed,
            mix,
            name: "custom",
        }
    }

    pub fn mum(seed: u64) -> Self {
        Self {
            name: "mum",
            ..Self::new(seed, mum_mix64)
        }
    }

    pub fn splitmix(seed: u64) -> Self {
        Self {
            name: "splitmix",
            ..Self::new(seed, splitmix64)
        }
    }

    pub fn state(&self) -> u64 {
        self.state
    }
}

impl BoundedGenerator for HashAdvance {
    #[inline]
    fn next_below(&mut self, bound: u32) -> u32 {
        self.state = (self.mix)(self.state);
        reduce(self.state, bound)
    }

    fn name(&self) -> &str {
        self.name
    }
}

/// Byte-mixing strategy (FNV-1a over the state's own bytes).
///
/// Each of the eight rounds multiplies the state by the FNV prime and then
/// folds in byte `i` of the *already multiplied* state, little-endian.
#[derive(Clone, Debug)]
pub struct ByteMixing {
    state: u64,
}

impl ByteMixing {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn state(&self) -> u64 {
        self.state
    }
}

impl Default for ByteMixing {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl BoundedGenerator for ByteMixing {
    #[inline]
    fn next_below(&mut self, bound: u32) -> u32 {
        for i in 0..8 {
            self.state = self.state.wrapping_mul(FNV_PRIME);
            self.state ^= (self.state >> (8 * i)) & 0xff;
        }
        reduce(self.state, bound)
    }

    fn name(&self) -> &str {
        "fnv"
    }
}

/// Baseline backed by a general-purpose `rand` generator.
#[derive(Clone, Debug)]
pub struct RandBaseline<R> {
    rng: R,
    label: &'static str,
}

impl<R: Rng> RandBaseline<R> {
    pub fn new(rng: R) -> Self {
        Self::labeled(rng, "rand")
    }

    /// Baseline reported under `label` in logs and render reports.
    pub fn labeled(rng: R, label: &'static str) -> Self {
        Self { rng, label }
    }
}

impl RandBaseline<ChaCha12Rng> {
    pub fn chacha(seed: u64) -> Self {
        Self::labeled(ChaCha12Rng::seed_from_u64(seed), "chacha")
    }
}

impl<R: Rng> BoundedGenerator for RandBaseline<R> {
    #[inline]
    fn next_below(&mut self, bound: u32) -> u32 {
        debug_assert!(bound > 0, "bound must be positive");
        self.rng.random_range(0..bound)
    }

    fn name(&self) -> &str {
        self.label
    }
}

/// Replays a fixed sequence, repeating from the start when exhausted.
///
/// Values are reduced modulo the bound, so a script of directions `0..4`
/// comes back unchanged for the walk's radix.
#[derive(Clone, Debug)]
pub struct Scripted {
    values: Vec<u32>,
    cursor: usize,
}

impl Scripted {
    /// Panics if `values` is empty.
    pub fn new(values: Vec<u32>) -> Self {
        assert!(!values.is_empty(), "scripted generator needs at least one value");
        Self { values, cursor: 0 }
    }
}

impl BoundedGenerator for Scripted {
    fn next_below(&mut self, bound: u32) -> u32 {
        debug_assert!(bound > 0, "bound must be positive");
        let v = self.values[self.cursor];
        self.cursor = (self.cursor + 1) % self.values.len();
        v % bound
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Stock strategies selectable by name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorKind {
    #[default]
    Mum,
    SplitMix,
    Fnv,
    ChaCha,
}

impl GeneratorKind {
    pub const ALL: [GeneratorKind; 4] = [
        GeneratorKind::Mum,
        GeneratorKind::SplitMix,
        GeneratorKind::Fnv,
        GeneratorKind::ChaCha,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GeneratorKind::Mum => "mum",
            GeneratorKind::SplitMix => "splitmix",
            GeneratorKind::Fnv => "fnv",
            GeneratorKind::ChaCha => "chacha",
        }
    }

    pub fn build(self, seed: u64) -> Box<dyn BoundedGenerator> {
        match self {
            GeneratorKind::Mum => Box::new(HashAdvance::mum(seed)),
            GeneratorKind::SplitMix => Box::new(HashAdvance::splitmix(seed)),
            GeneratorKind::Fnv => Box::new(ByteMixing::new(seed)),
            GeneratorKind::ChaCha => Box::new(RandBaseline::chacha(seed)),
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseGeneratorKindError(pub String);

impl fmt::Display for ParseGeneratorKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown generator '{}' (expected one of: mum, splitmix, fnv, chacha)",
            self.0
        )
    }
}

impl Error for ParseGeneratorKindError {}

impl FromStr for GeneratorKind {
    type Err = ParseGeneratorKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GeneratorKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseGeneratorKindError(s.to_string()))
    }
}
