use crate::domain::model::Factorization;
use crate::utils::error::{Result, TableError};

/// Factorizes `n` by trial division.
///
/// Divisors are tried in increasing order while `d * d` does not exceed the
/// remaining value; whatever is left above 1 afterwards is itself prime.
/// `n = 1` gives an empty factorization and `n = 0` is rejected.
pub fn factorize(n: u64) -> Result<Factorization> {
    if n == 0 {
        return Err(TableError::InvalidInput {
            value: n,
            reason: "zero has no prime factorization".to_string(),
        });
    }

    let mut factors = Factorization::new();
    let mut remaining = n;
    let mut divisor: u64 = 2;

    while divisor.saturating_mul(divisor) <= remaining {
        while remaining % divisor == 0 {
            factors.add_factor(divisor);
            remaining /= divisor;
        }
        divisor += 1;
    }
    if remaining > 1 {
        factors.add_factor(remaining);
    }

    Ok(factors)
}
