use rand::Rng;
use rand::seq::SliceRandom;

/// Recomputes the online set from scratch.
///
/// The local user is always first. Between `others.0` and `others.1`
/// (inclusive) distinct names are drawn from `pool`; names already online,
/// including the local user's own, are never drawn twice. When the pool runs
/// dry the draw simply stops short.
pub fn compute_presence<R: Rng + ?Sized>(
    current_user: &str,
    pool: &[String],
    others: (usize, usize),
    rng: &mut R,
) -> Vec<String> {
    let mut online = vec![current_user.to_string()];
    let (min, max) = others;
    let wanted = rng.gen_range(min..=max.max(min));

    for _ in 0..wanted {
        let available: Vec<&String> = pool.iter().filter(|name| !online.contains(*name)).collect();
        match available.choose(rng) {
            Some(name) => online.push((*name).clone()),
            None => break,
        }
    }

    online
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn pool() -> Vec<String> {
        ["Alice", "Bob", "Charlie", "Diana", "Eve"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn fixed_count_draws_exactly_that_many() {
        let mut rng = StdRng::seed_from_u64(7);
        let online = compute_presence("Sam", &pool(), (2, 2), &mut rng);

        assert_eq!(online.len(), 3);
        assert_eq!(online[0], "Sam");
        assert!(online[1..].iter().all(|name| pool().contains(name)));
        assert_ne!(online[1], online[2]);
    }

    #[test]
    fn small_pool_stops_early() {
        let mut rng = StdRng::seed_from_u64(1);
        let pool = vec!["Alice".to_string()];
        let online = compute_presence("Sam", &pool, (3, 3), &mut rng);
        assert_eq!(online, ["Sam", "Alice"]);
    }

    #[test]
    fn empty_pool_leaves_only_current_user() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(compute_presence("Sam", &[], (1, 3), &mut rng), ["Sam"]);
    }

    #[test]
    fn current_user_named_like_a_candidate_is_not_duplicated() {
        let mut rng = StdRng::seed_from_u64(3);
        let online = compute_presence("Alice", &pool(), (4, 4), &mut rng);

        assert_eq!(online.len(), 5);
        assert_eq!(online.iter().filter(|name| *name == "Alice").count(), 1);
    }

    #[test]
    fn every_count_in_range_shows_up() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = [false; 3];
        for _ in 0..200 {
            let online = compute_presence("Sam", &pool(), (1, 3), &mut rng);
            seen[online.len() - 2] = true;
        }
        assert_eq!(seen, [true; 3]);
    }
}
