//! Traceability build numbers.

use chrono::Utc;
use rand::Rng;

/// Generates a build number numeral for stamping into the descriptor.
///
/// The numeral combines a uniformly random component R in [10000, 99999]
/// with the current unix time reduced modulo 1,000,000, as
/// `R * 1_000_000 + T`. This is a traceability tag, not a uniqueness
/// guarantee: two runs within the same second can collide on an R collision.
pub fn generate_build_number() -> String {
    let random: i64 = rand::rng().random_range(10_000..100_000);
    let timestamp = Utc::now().timestamp().rem_euclid(1_000_000);

    (random * 1_000_000 + timestamp).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_number_stays_in_range() {
        for _ in 0..100 {
            let number: i64 = generate_build_number().parse().expect("decimal numeral");
            assert!(number >= 10_000 * 1_000_000);
            assert!(number < 100_000 * 1_000_000);
        }
    }

    #[test]
    fn build_number_tracks_the_clock() {
        let before = Utc::now().timestamp().rem_euclid(1_000_000);
        let number: i64 = generate_build_number().parse().expect("decimal numeral");
        let after = Utc::now().timestamp().rem_euclid(1_000_000);

        let embedded = number % 1_000_000;
        // The timestamp component advances monotonically except at the
        // once-per-~11-days modulus wrap, which the range check tolerates.
        if before <= after {
            assert!(embedded >= before && embedded <= after);
        }
    }
}
