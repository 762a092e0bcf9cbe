/// (total questions, multiplier) anchor points, ascending by question count.
/// Shorter games give fewer chances to score, so each dare is worth more.
const ANCHORS: [(f64, f64); 3] = [(3.0, 1.5), (5.0, 1.0), (10.0, 0.8)];

/// Dare value multiplier for a game of `total_questions`.
///
/// Piecewise linear between the anchors and clamped to the first and last
/// anchor outside them, so the curve never increases with game length.
pub fn question_count_multiplier(total_questions: usize) -> f64 {
    let count = total_questions as f64;
    let (first_count, first_multiplier) = ANCHORS[0];
    let (last_count, last_multiplier) = ANCHORS[ANCHORS.len() - 1];

    if count <= first_count {
        return first_multiplier;
    }
    if count >= last_count {
        return last_multiplier;
    }

    ANCHORS
        .windows(2)
        .find(|pair| count <= pair[1].0)
        .map(|pair| {
            let (low_count, low_multiplier) = pair[0];
            let (high_count, high_multiplier) = pair[1];
            let t = (count - low_count) / (high_count - low_count);
            low_multiplier + t * (high_multiplier - low_multiplier)
        })
        .unwrap_or(last_multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(3, 1.5)]
    #[case(5, 1.0)]
    #[case(10, 0.8)]
    fn reproduces_anchor_values_exactly(#[case] questions: usize, #[case] expected: f64) {
        assert_eq!(question_count_multiplier(questions), expected);
    }

    #[rstest]
    #[case(4, 1.25)]
    #[case(6, 0.96)]
    #[case(0, 1.5)]
    #[case(1, 1.5)]
    #[case(25, 0.8)]
    fn interpolates_and_clamps(#[case] questions: usize, #[case] expected: f64) {
        let multiplier = question_count_multiplier(questions);
        assert!(
            (multiplier - expected).abs() < 1e-9,
            "{questions} questions gave {multiplier}, expected {expected}"
        );
    }

    #[test]
    fn never_increases_with_game_length() {
        let values: Vec<f64> = (0..=30).map(question_count_multiplier).collect();
        for pair in values.windows(2) {
            assert!(pair[1] <= pair[0]);
        }
    }
}
