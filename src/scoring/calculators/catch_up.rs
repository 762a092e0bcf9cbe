const CATCH_UP_RATE: f64 = 0.2;

/// Bonus dare points for a player trailing the table average.
///
/// Leading or tied players get nothing; the result is never negative.
/// `None` when `player_index` does not address a score.
pub fn catch_up_bonus(player_index: usize, all_player_scores: &[u32]) -> Option<f64> {
    let player_score = f64::from(*all_player_scores.get(player_index)?);
    let total: f64 = all_player_scores.iter().map(|&s| f64::from(s)).sum();
    let average = total / all_player_scores.len() as f64;

    Some(((average - player_score) * CATCH_UP_RATE).max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn trailing_player_gets_fifth_of_deficit() {
        // average 150, player at 100
        let bonus = catch_up_bonus(0, &[100, 200]).unwrap();
        assert_eq!(bonus, 10.0);
    }

    #[rstest]
    #[case(vec![300, 100, 50], 0)]
    #[case(vec![120, 120, 120], 1)]
    #[case(vec![0], 0)]
    fn leader_or_tie_gets_nothing(#[case] scores: Vec<u32>, #[case] index: usize) {
        assert_eq!(catch_up_bonus(index, &scores), Some(0.0));
    }

    #[test]
    fn never_negative_for_any_seat() {
        let scores = [0, 17, 950, 420, 3];
        for index in 0..scores.len() {
            assert!(catch_up_bonus(index, &scores).unwrap() >= 0.0);
        }
    }

    #[test]
    fn unknown_seat_is_none() {
        assert_eq!(catch_up_bonus(2, &[10, 20]), None);
        assert_eq!(catch_up_bonus(0, &[]), None);
    }
}
