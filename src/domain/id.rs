use rand::Rng;
use rand::distributions::Alphanumeric;

/// Length of a payment identifier, in characters.
pub const ID_LENGTH: usize = 6;

/// Draws one identifier candidate from the supplied RNG.
///
/// The alphabet is `[A-Za-z0-9]`, 62 symbols, for roughly 5.7e10 possible
/// identifiers. Candidates are not reserved here; uniqueness is enforced
/// where the record is inserted.
pub fn random_id_with<R: Rng>(rng: &mut R) -> String {
    (0..ID_LENGTH).map(|_| char::from(rng.sample(Alphanumeric))).collect()
}

/// Draws one identifier candidate from the thread RNG.
pub fn random_id() -> String {
    random_id_with(&mut rand::thread_rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn test_id_length_and_alphabet() {
        for _ in 0..100 {
            let id = random_id();
            assert_eq!(id.chars().count(), ID_LENGTH);
            assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_seeded_rng_is_deterministic() {
        let a = random_id_with(&mut StdRng::seed_from_u64(42));
        let b = random_id_with(&mut StdRng::seed_from_u64(42));
        let c = random_id_with(&mut StdRng::seed_from_u64(43));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_candidates_are_spread_out() {
        let mut rng = StdRng::seed_from_u64(7);
        let ids: HashSet<String> = (0..100).map(|_| random_id_with(&mut rng)).collect();
        assert_eq!(ids.len(), 100);
    }
}
