use rand::Rng;

/// Fisher-Yates shuffle in place. Every permutation is equally likely.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    #[test]
    fn test_shuffle_keeps_multiset() {
        let mut rng = StdRng::seed_from_u64(42);
        let original = vec!["a", "a", "b", "b", "c", "c", "d", "d"];
        let mut items = original.clone();

        shuffle(&mut items, &mut rng);

        let mut sorted = items.clone();
        sorted.sort();
        assert_eq!(sorted, original);
    }

    #[test]
    fn test_shuffle_handles_tiny_slices() {
        let mut rng = StdRng::seed_from_u64(0);

        let mut empty: Vec<u8> = Vec::new();
        shuffle(&mut empty, &mut rng);
        assert!(empty.is_empty());

        let mut single = vec![9];
        shuffle(&mut single, &mut rng);
        assert_eq!(single, vec![9]);
    }

    #[test]
    fn test_shuffle_is_uniform_over_permutations() {
        let mut rng = StdRng::seed_from_u64(2024);
        let trials = 60_000;
        let mut counts: HashMap<[u8; 3], usize> = HashMap::new();

        for _ in 0..trials {
            let mut items = [0u8, 1, 2];
            shuffle(&mut items, &mut rng);
            *counts.entry(items).or_insert(0) += 1;
        }

        // 3! permutations, each expected 10_000 times
        assert_eq!(counts.len(), 6);
        for (perm, &count) in &counts {
            assert!(
                (9_500..=10_500).contains(&count),
                "permutation {:?} drawn {} times",
                perm,
                count
            );
        }
    }

    #[test]
    fn test_shuffle_is_reproducible_with_seed() {
        let mut a: Vec<u32> = (0..20).collect();
        let mut b: Vec<u32> = (0..20).collect();
        shuffle(&mut a, &mut StdRng::seed_from_u64(5));
        shuffle(&mut b, &mut StdRng::seed_from_u64(5));
        assert_eq!(a, b);
    }
}
