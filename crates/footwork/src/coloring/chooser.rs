//! Weighted color choice.
//!
//! The search asks a [`ColorChooser`] to pick one pad out of the still-open
//! candidates, each paired with a positive weight. [`RngChooser`] draws
//! proportionally to the weights from any [`rand::RngCore`]; [`FnChooser`]
//! wraps a closure for scripted choices.
use rand::RngCore;

use crate::chart::Pad;

/// Picks one pad from weighted candidates.
pub trait ColorChooser {
    fn choose(&mut self, options: &[(Pad, f64)]) -> Option<Pad>;
}

/// Weighted random draw backed by an RNG.
pub struct RngChooser<R: RngCore> {
    rng: R,
}

impl<R: RngCore> RngChooser<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: RngCore> ColorChooser for RngChooser<R> {
    #[inline]
    fn choose(&mut self, options: &[(Pad, f64)]) -> Option<Pad> {
        pick_weighted(options, &mut self.rng)
    }
}

/// A chooser that forwards to a user-provided closure.
pub struct FnChooser<F>
where
    F: FnMut(&[(Pad, f64)]) -> Option<Pad>,
{
    f: F,
}

impl<F> FnChooser<F>
where
    F: FnMut(&[(Pad, f64)]) -> Option<Pad>,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> ColorChooser for FnChooser<F>
where
    F: FnMut(&[(Pad, f64)]) -> Option<Pad>,
{
    #[inline]
    fn choose(&mut self, options: &[(Pad, f64)]) -> Option<Pad> {
        (self.f)(options)
    }
}

/// Generate a random float in the range [0, 1).
#[inline]
pub(crate) fn rand01(rng: &mut dyn RngCore) -> f64 {
    (rng.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
}

/// Draws a pad with probability proportional to its weight.
///
/// Weights that do not sum to a positive finite total are treated as equal.
pub fn pick_weighted(options: &[(Pad, f64)], rng: &mut dyn RngCore) -> Option<Pad> {
    let total: f64 = options.iter().map(|(_, w)| *w).sum();
    if !(total.is_finite() && total > 0.0) {
        if options.is_empty() {
            return None;
        }
        let index = (rand01(rng) * options.len() as f64) as usize;
        return options.get(index.min(options.len() - 1)).map(|(pad, _)| *pad);
    }

    let mut roll = rand01(rng) * total;
    for (pad, weight) in options {
        if roll <= *weight {
            return Some(*pad);
        }
        roll -= weight;
    }

    options.last().map(|(pad, _)| *pad)
}
