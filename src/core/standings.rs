use crate::{core::record::CompetitorRecord, utils::normalize_name};
use itertools::Itertools;
use std::cmp::Ordering;

// Two scores closer than this are rendered as the same value by the leaderboard site.
const SAME_SCORE_EPSILON: f64 = 1e-5;

/// Rows of a single cohort, in the order the leaderboard site displays them.
#[derive(Debug)]
pub struct Standing<'a> {
    rows: Vec<&'a CompetitorRecord>,
}

/// Position bookkeeping while walking a sorted cohort.
///
/// The site prints a rank number only on the first non-disqualified row of each
/// score level and leaves the cell blank otherwise. A blank cell reads as the last
/// printed number, which is what `last_place` holds.
#[derive(Debug, Default)]
struct Walk {
    // non-disqualified rows seen so far
    rank_counter: u32,
    last_score: Option<f64>,
    last_place: Option<u32>,
}

impl Walk {
    fn opens_level(&self, score: f64) -> bool {
        match self.last_score {
            Some(last) => (score - last).abs() > SAME_SCORE_EPSILON,
            None => true,
        }
    }

    /// Place displayed for `row`, advancing the counters past it.
    fn step(&mut self, row: &CompetitorRecord) -> Option<u32> {
        if !row.disqual && self.opens_level(row.sum_rank) {
            self.last_score = Some(row.sum_rank);
            self.last_place = Some(self.rank_counter + 1);
        }
        let place = self.last_place;
        if !row.disqual {
            self.rank_counter += 1;
        }
        place
    }
}

impl<'a> Standing<'a> {
    /// Keep the rows of `form` and sort them by score descending, then
    /// disqualified last, then automatic last, then form, then raw name.
    pub fn new(rows: &'a [CompetitorRecord], form: i64) -> Standing<'a> {
        let rows = rows
            .iter()
            .filter(|row| row.form == Some(form))
            .sorted_by(|a, b| display_order(a, b))
            .collect::<Vec<&CompetitorRecord>>();
        Standing { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sorted rows paired with the place shown next to them.
    pub fn displayed(&self) -> impl Iterator<Item = (&'a CompetitorRecord, Option<u32>)> + '_ {
        self.rows
            .iter()
            .scan(Walk::default(), |walk, row| Some((*row, walk.step(row))))
    }

    /// First row, in display order, answering to `name`, with its displayed place.
    pub fn locate(&self, name: &str) -> Option<(&'a CompetitorRecord, Option<u32>)> {
        let target = normalize_name(name);
        self.displayed()
            .find(|(row, _place)| name_matches(&normalize_name(&row.name), &target))
    }
}

/// Displayed place of `name` within cohort `form`.
///
/// `None` when the competitor is not listed in the cohort, and also when it is
/// listed before any place was printed (a disqualified row heading the cohort).
pub fn compute_place(rows: &[CompetitorRecord], name: &str, form: i64) -> Option<u32> {
    Standing::new(rows, form)
        .locate(name)
        .and_then(|(_row, place)| place)
}

fn display_order(a: &CompetitorRecord, b: &CompetitorRecord) -> Ordering {
    // scores are always finite, the fallback is never hit
    b.sum_rank
        .partial_cmp(&a.sum_rank)
        .unwrap_or(Ordering::Equal)
        .then(a.disqual.cmp(&b.disqual))
        .then(a.automatic.cmp(&b.automatic))
        .then(a.form_key().cmp(&b.form_key()))
        .then_with(|| a.name.cmp(&b.name))
}

// Both names already normalized. A longer row name only matches when the target
// is followed by a word break, so "ann" does not match "anna".
fn name_matches(row_name: &str, target: &str) -> bool {
    row_name
        .strip_prefix(target)
        .map_or(false, |rest| rest.is_empty() || rest.starts_with(' '))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::record;

    fn disqualified(name: &str, form: i64, sum_rank: f64) -> CompetitorRecord {
        CompetitorRecord {
            disqual: true,
            ..record(name, form, sum_rank)
        }
    }

    fn automatic(name: &str, form: i64, sum_rank: f64) -> CompetitorRecord {
        CompetitorRecord {
            automatic: true,
            ..record(name, form, sum_rank)
        }
    }

    fn places(standing: &Standing) -> Vec<(String, Option<u32>)> {
        standing
            .displayed()
            .map(|(row, place)| (row.name.clone(), place))
            .collect()
    }

    #[test]
    fn disqualified_row_shows_previous_place() {
        let rows = vec![
            record("A", 1, 100.0),
            record("B", 1, 100.0),
            disqualified("C", 1, 90.0),
            record("D", 1, 80.0),
        ];

        assert_eq!(compute_place(&rows, "C", 1), Some(1));
        assert_eq!(
            places(&Standing::new(&rows, 1)),
            vec![
                ("A".to_string(), Some(1)),
                ("B".to_string(), Some(1)),
                ("C".to_string(), Some(1)),
                ("D".to_string(), Some(3)),
            ]
        );
    }

    #[test]
    fn unknown_name_or_form_is_not_found() {
        let rows = vec![record("A", 1, 100.0), record("B", 1, 90.0)];
        assert_eq!(compute_place(&rows, "Z", 1), None);
        assert_eq!(compute_place(&rows, "A", 2), None);
        assert!(Standing::new(&rows, 2).is_empty());
        assert!(Standing::new(&[], 1).locate("A").is_none());
    }

    #[test]
    fn other_cohorts_do_not_shift_places() {
        let rows = vec![
            record("Top", 10, 500.0),
            record("A", 11, 100.0),
            record("B", 11, 90.0),
            record("Other", 10, 95.0),
        ];
        let standing = Standing::new(&rows, 11);
        assert_eq!(standing.len(), 2);
        assert_eq!(compute_place(&rows, "B", 11), Some(2));
    }

    #[test]
    fn rows_without_form_are_ignored() {
        let rows = vec![
            CompetitorRecord {
                form: None,
                ..record("Ghost", -1, 500.0)
            },
            record("A", -1, 100.0),
        ];
        assert_eq!(compute_place(&rows, "A", -1), Some(1));
        assert_eq!(compute_place(&rows, "Ghost", -1), None);
    }

    #[test]
    fn equal_scores_put_disqualified_rows_last() {
        let rows = vec![disqualified("Aaron", 1, 50.0), record("Zoe", 1, 50.0)];
        let order = Standing::new(&rows, 1)
            .displayed()
            .map(|(row, _)| row.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(order, vec!["Zoe", "Aaron"]);
    }

    #[test]
    fn equal_scores_put_automatic_rows_after_manual_ones() {
        let rows = vec![
            automatic("Aaron", 1, 50.0),
            record("Zoe", 1, 50.0),
            record("Mia", 1, 50.0),
        ];
        let order = Standing::new(&rows, 1)
            .displayed()
            .map(|(row, _)| row.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(order, vec!["Mia", "Zoe", "Aaron"]);
    }

    #[test]
    fn names_are_compared_on_raw_text() {
        // Uppercase sorts before lowercase, untrimmed names before trimmed ones.
        let rows = vec![
            record("b", 1, 10.0),
            record("B", 1, 10.0),
            record(" c", 1, 10.0),
        ];
        let order = Standing::new(&rows, 1)
            .displayed()
            .map(|(row, _)| row.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(order, vec![" c", "B", "b"]);
    }

    #[test]
    fn scores_within_epsilon_share_a_place() {
        let rows = vec![
            record("A", 1, 100.0),
            record("B", 1, 100.000_001),
            record("C", 1, 99.0),
        ];
        assert_eq!(compute_place(&rows, "A", 1), Some(1));
        assert_eq!(compute_place(&rows, "B", 1), Some(1));
        assert_eq!(compute_place(&rows, "C", 1), Some(3));
    }

    #[test]
    fn scores_beyond_epsilon_get_their_own_place() {
        let rows = vec![record("A", 1, 100.0), record("B", 1, 99.9999)];
        assert_eq!(compute_place(&rows, "B", 1), Some(2));
    }

    #[test]
    fn disqualified_rows_do_not_count_towards_places() {
        let rows = vec![
            record("A", 1, 100.0),
            disqualified("X", 1, 95.0),
            disqualified("Y", 1, 92.0),
            record("B", 1, 90.0),
            record("C", 1, 90.0),
            record("D", 1, 10.0),
        ];
        assert_eq!(
            places(&Standing::new(&rows, 1)),
            vec![
                ("A".to_string(), Some(1)),
                ("X".to_string(), Some(1)),
                ("Y".to_string(), Some(1)),
                ("B".to_string(), Some(2)),
                ("C".to_string(), Some(2)),
                ("D".to_string(), Some(4)),
            ]
        );
    }

    #[test]
    fn disqualified_leader_has_no_place() {
        let rows = vec![disqualified("X", 1, 200.0), record("A", 1, 100.0)];
        let standing = Standing::new(&rows, 1);
        let (row, place) = standing.locate("x").unwrap();
        assert_eq!(row.name, "X");
        assert_eq!(place, None);
        assert_eq!(compute_place(&rows, "A", 1), Some(1));
    }

    #[test]
    fn disqualified_row_does_not_close_a_score_level() {
        // B sorts after C, and C still ties with A.
        let rows = vec![
            record("A", 1, 80.0),
            disqualified("B", 1, 80.0),
            record("C", 1, 80.0),
        ];
        assert_eq!(compute_place(&rows, "C", 1), Some(1));
    }

    #[test]
    fn zero_scores_open_a_level() {
        let rows = vec![record("A", 1, 0.0), record("B", 1, -1.0)];
        assert_eq!(compute_place(&rows, "A", 1), Some(1));
        assert_eq!(compute_place(&rows, "B", 1), Some(2));
    }

    #[test]
    fn names_match_regardless_of_case_and_spacing() {
        let rows = vec![
            record("  Иванов   Иван  ", 1, 100.0),
            record("Иванов Иван Петрович", 1, 90.0),
            record("Иванова Ивана", 1, 95.0),
        ];
        let standing = Standing::new(&rows, 1);
        let (row, place) = standing.locate("иванов иван").unwrap();
        assert_eq!(row.name, "  Иванов   Иван  ");
        assert_eq!(place, Some(1));

        let only_suffixed = vec![rows[1].clone(), rows[2].clone()];
        let standing = Standing::new(&only_suffixed, 1);
        let (row, place) = standing.locate("ИВАНОВ ИВАН").unwrap();
        assert_eq!(row.name, "Иванов Иван Петрович");
        assert_eq!(place, Some(2));
    }

    #[test]
    fn prefix_without_word_break_does_not_match() {
        let rows = vec![record("Anna", 1, 100.0)];
        assert_eq!(compute_place(&rows, "Ann", 1), None);
        assert!(name_matches("ann lee", "ann"));
        assert!(!name_matches("anna", "ann"));
    }

    #[test]
    fn first_duplicate_in_display_order_wins() {
        let rows = vec![
            record("Petrov", 1, 50.0),
            record("Sidorov", 1, 70.0),
            record("Petrov (school 5)", 1, 60.0),
        ];
        let standing = Standing::new(&rows, 1);
        let (row, place) = standing.locate("petrov").unwrap();
        assert_eq!(row.name, "Petrov (school 5)");
        assert_eq!(place, Some(2));
    }
}
