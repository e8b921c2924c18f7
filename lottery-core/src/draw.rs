use rand::seq::IteratorRandom;
use rand::Rng;
use std::collections::HashSet;

/// Pick one participant uniformly at random. `None` when nobody registered.
pub fn pick_winner<R: Rng + ?Sized>(participants: &HashSet<String>, rng: &mut R) -> Option<String> {
    participants.iter().choose(rng).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    #[test]
    fn test_empty_set_has_no_winner() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(pick_winner(&HashSet::new(), &mut rng), None);
    }

    #[test]
    fn test_every_participant_can_win() {
        let participants: HashSet<String> = ["alice", "bob", "carol", "dave", "erin"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let mut rng = StdRng::seed_from_u64(42);
        let mut wins: HashMap<String, usize> = HashMap::new();

        for _ in 0..5000 {
            let winner = pick_winner(&participants, &mut rng).unwrap();
            assert!(participants.contains(&winner));
            *wins.entry(winner).or_default() += 1;
        }

        assert_eq!(wins.len(), 5);
        // ~1000 each
        assert!(wins.values().all(|&count| (800..1200).contains(&count)));
    }
}
