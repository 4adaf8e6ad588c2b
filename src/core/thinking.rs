//! Cosmetic "thinking" messages shown while a request is in flight.

use rand::Rng;

pub const THINKING_MESSAGES: [&str; 4] = [
    "I am thinking... or maybe I'm just daydreaming!",
    "Give me a sec, my brain cells are on it!",
    "Calculating... or pretending to be a genius!",
    "Just a moment, my circuits are aligning.",
];

/// Picks one message uniformly at random. The random source is injected so
/// callers can seed it.
pub fn pick(rng: &mut impl Rng) -> &'static str {
    THINKING_MESSAGES[rng.gen_range(0..THINKING_MESSAGES.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn pick_is_deterministic_under_a_fixed_seed() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..32 {
            assert_eq!(pick(&mut a), pick(&mut b));
        }
    }

    #[test]
    fn pick_always_lands_in_the_fixed_set() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..64 {
            assert!(THINKING_MESSAGES.contains(&pick(&mut rng)));
        }
    }
}
