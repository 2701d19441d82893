/// Arithmetic mean of a set of review ratings
///
/// Returns None for an empty set; the caller decides what an unreviewed
/// product's aggregate looks like (zero, per the catalog schema default).
pub fn average(ratings: &[i16]) -> Option<f64> {
    if ratings.is_empty() {
        return None;
    }
    let sum: i64 = ratings.iter().map(|&r| r as i64).sum();
    Some(sum as f64 / ratings.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_average_of_mixed_ratings() {
        assert_eq!(average(&[5, 4, 3]), Some(4.0));
    }

    #[test]
    fn test_average_single_review() {
        assert_eq!(average(&[5]), Some(5.0));
    }

    #[test]
    fn test_average_decimal_result() {
        assert_eq!(average(&[5, 4]), Some(4.5));
    }

    #[test]
    fn test_average_empty_is_none() {
        assert_eq!(average(&[]), None);
    }

    proptest! {
        #[test]
        fn prop_average_is_exact_arithmetic_mean(
            ratings in proptest::collection::vec(1i16..=5, 1..50)
        ) {
            let avg = average(&ratings).unwrap();
            let expected: f64 =
                ratings.iter().map(|&r| r as f64).sum::<f64>() / ratings.len() as f64;
            prop_assert_eq!(avg, expected);
            // The mean of 1..=5 ratings stays within the rating bounds.
            prop_assert!((1.0..=5.0).contains(&avg));
        }
    }
}
