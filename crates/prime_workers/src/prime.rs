//! src/prime.rs
//!
//! Primality predicate used by every worker.
//!
//! Trial division by every integer in `2..=n/2`. This is O(n) per candidate on
//! purpose: the workload exists to keep the workers busy, so it must not be
//! swapped for a faster test without also changing what the timings mean.

/// Returns `true` if `n` is prime.
///
/// # Examples
/// ```
/// use prime_workers::is_prime;
///
/// assert!(is_prime(7));
/// assert!(!is_prime(9));
/// assert!(!is_prime(1));
/// ```
pub fn is_prime(n: u64) -> bool {
    if n <= 1 {
        return false;
    }
    (2..=n / 2).all(|i| n % i != 0)
}

/// ============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_and_one() {
        assert!(!is_prime(0));
        assert!(!is_prime(1));
    }

    #[test]
    fn accepts_small_primes() {
        for p in [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 97] {
            assert!(is_prime(p), "{} should be prime", p);
        }
    }

    #[test]
    fn rejects_composites() {
        for c in [4, 6, 8, 9, 15, 21, 25, 49, 91, 100] {
            assert!(!is_prime(c), "{} should not be prime", c);
        }
    }

    #[test]
    fn counts_primes_below_one_hundred() {
        assert_eq!((0..100).filter(|&n| is_prime(n)).count(), 25);
    }
}
