//! Book ranking pipeline.
//!
//! Listings are produced by chaining stages over a [`Ranking`]:
//!
//! 1. [`Ranking::popular`] annotates each book with the number of reviews in a
//!    [`DateRange`] and orders by it
//! 2. [`Ranking::highest_rated`] annotates the average rating in a range and
//!    orders by it
//! 3. [`Ranking::min_reviews`] drops books whose last computed count is too low
//!
//! Every stage consumes the previous collection and returns a new one. Sorting
//! is stable, so the final order follows the **last** ordering stage applied
//! and earlier stages only break ties.
//!
//! [`Preset`] bundles the fixed compositions offered to clients.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Months, Utc};

use crate::domain::entities::{Book, BookWithReviews, Review};

/// Optional inclusive bounds on review creation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn new(from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Self {
        Self { from, to }
    }

    /// A range that matches every review.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// `[now - months, now]`.
    ///
    /// Month arithmetic clamps to the last day of the target month
    /// (31 March minus one month is 28 or 29 February).
    pub fn last_months(now: DateTime<Utc>, months: u32) -> Self {
        let from = now
            .checked_sub_months(Months::new(months))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);

        Self {
            from: Some(from),
            to: Some(now),
        }
    }

    /// Returns true if `at` falls inside the range. Both bounds are inclusive.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        match (self.from, self.to) {
            (None, None) => true,
            (Some(from), None) => at >= from,
            (None, Some(to)) => at <= to,
            (Some(from), Some(to)) => from <= at && at <= to,
        }
    }
}

/// Returns the reviews created inside `range`, preserving their order.
pub fn filter_by_date_range<'a>(reviews: &'a [Review], range: &DateRange) -> Vec<&'a Review> {
    reviews
        .iter()
        .filter(|review| range.contains(review.created_at))
        .collect()
}

/// Mean rating of `reviews`, or `None` when there are none.
pub fn average_rating(reviews: &[&Review]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }

    let sum: i64 = reviews
        .iter()
        .map(|review| i64::from(review.rating.value()))
        .sum();

    Some(sum as f64 / reviews.len() as f64)
}

/// A book annotated by the ranking stages applied so far.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedBook {
    pub book: Book,
    pub reviews: Vec<Review>,
    /// Set by [`Ranking::popular`].
    pub reviews_count: Option<i64>,
    /// Set by [`Ranking::highest_rated`]; stays `None` when the window is empty.
    pub avg_rating: Option<f64>,
}

impl From<BookWithReviews> for RankedBook {
    fn from(entry: BookWithReviews) -> Self {
        Self {
            book: entry.book,
            reviews: entry.reviews,
            reviews_count: None,
            avg_rating: None,
        }
    }
}

/// Errors raised while composing ranking stages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RankingError {
    #[error("min_reviews needs a review count; apply popular() first")]
    CountNotComputed,
}

/// An ordered, annotated collection of books.
#[derive(Debug, Clone, Default)]
pub struct Ranking {
    books: Vec<RankedBook>,
    counted: bool,
}

impl Ranking {
    pub fn new(books: Vec<BookWithReviews>) -> Self {
        Self {
            books: books.into_iter().map(RankedBook::from).collect(),
            counted: false,
        }
    }

    /// Counts reviews inside `range` and orders by that count, highest first.
    pub fn popular(self, range: &DateRange) -> Self {
        let mut books: Vec<RankedBook> = self
            .books
            .into_iter()
            .map(|ranked| {
                let count = filter_by_date_range(&ranked.reviews, range).len() as i64;
                RankedBook {
                    reviews_count: Some(count),
                    ..ranked
                }
            })
            .collect();

        books.sort_by(|a, b| b.reviews_count.cmp(&a.reviews_count));

        Self {
            books,
            counted: true,
        }
    }

    /// Averages ratings inside `range` and orders by that average, highest first.
    ///
    /// Books without a review in the window get no average and sink to the end.
    pub fn highest_rated(self, range: &DateRange) -> Self {
        let mut books: Vec<RankedBook> = self
            .books
            .into_iter()
            .map(|ranked| {
                let avg = average_rating(&filter_by_date_range(&ranked.reviews, range));
                RankedBook {
                    avg_rating: avg,
                    ..ranked
                }
            })
            .collect();

        books.sort_by(|a, b| compare_avg_desc(a.avg_rating, b.avg_rating));

        Self {
            books,
            counted: self.counted,
        }
    }

    /// Keeps books whose most recent review count is at least `min`.
    ///
    /// The count is read from the annotation left by [`Ranking::popular`], not
    /// recomputed.
    ///
    /// # Errors
    ///
    /// Returns [`RankingError::CountNotComputed`] when no popularity stage ran.
    pub fn min_reviews(self, min: i64) -> Result<Self, RankingError> {
        if !self.counted {
            return Err(RankingError::CountNotComputed);
        }

        let books = self
            .books
            .into_iter()
            .filter(|ranked| ranked.reviews_count.unwrap_or(0) >= min)
            .collect();

        Ok(Self {
            books,
            counted: true,
        })
    }

    /// Orders by book creation time, newest first.
    pub fn latest(self) -> Self {
        let mut books = self.books;
        books.sort_by(|a, b| {
            b.book
                .created_at
                .cmp(&a.book.created_at)
                .then_with(|| b.book.id.cmp(&a.book.id))
        });

        Self {
            books,
            counted: self.counted,
        }
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn books(&self) -> &[RankedBook] {
        &self.books
    }

    pub fn into_books(self) -> Vec<RankedBook> {
        self.books
    }
}

fn compare_avg_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Returned when a preset name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown ranking preset '{0}'")]
pub struct UnknownPreset(pub String);

/// Named, fixed compositions of ranking stages.
///
/// Every preset runs `popular(window)`, then `highest_rated(window)`, then
/// `min_reviews(n)`. Since the rating stage sorts last, the popular presets
/// end up ordered by average rating too; this mirrors the established
/// composition order and is intentionally kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    PopularLastMonth,
    PopularLast6Months,
    HighestRatedLastMonth,
    HighestRatedLast6Months,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::PopularLastMonth,
        Preset::PopularLast6Months,
        Preset::HighestRatedLastMonth,
        Preset::HighestRatedLast6Months,
    ];

    /// Query-string name of the preset.
    pub fn as_str(self) -> &'static str {
        match self {
            Preset::PopularLastMonth => "popular_last_month",
            Preset::PopularLast6Months => "popular_last_6months",
            Preset::HighestRatedLastMonth => "highest_rated_last_month",
            Preset::HighestRatedLast6Months => "highest_rated_last_6months",
        }
    }

    pub fn window_months(self) -> u32 {
        match self {
            Preset::PopularLastMonth | Preset::HighestRatedLastMonth => 1,
            Preset::PopularLast6Months | Preset::HighestRatedLast6Months => 6,
        }
    }

    pub fn min_reviews(self) -> i64 {
        match self {
            Preset::PopularLastMonth | Preset::HighestRatedLastMonth => 2,
            Preset::PopularLast6Months | Preset::HighestRatedLast6Months => 5,
        }
    }

    pub fn window(self, now: DateTime<Utc>) -> DateRange {
        DateRange::last_months(now, self.window_months())
    }

    /// Runs the preset's stages over `ranking`.
    pub fn apply(self, ranking: Ranking, now: DateTime<Utc>) -> Result<Ranking, RankingError> {
        let window = self.window(now);

        ranking
            .popular(&window)
            .highest_rated(&window)
            .min_reviews(self.min_reviews())
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|preset| preset.as_str() == s)
            .ok_or_else(|| UnknownPreset(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Rating;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn book(id: i64) -> Book {
        let created = now() - Duration::days(365) + Duration::hours(id);
        Book::new(id, format!("Book {id}"), created, created)
    }

    fn review(id: i64, book_id: i64, rating: i64, created_at: DateTime<Utc>) -> Review {
        Review::new(
            id,
            book_id,
            Rating::new(rating).unwrap(),
            "A thoughtful review text".to_string(),
            created_at,
            created_at,
        )
    }

    /// Builds a book whose reviews were written `days_ago` with the given ratings.
    fn entry(id: i64, reviews: &[(i64, i64)]) -> BookWithReviews {
        BookWithReviews {
            book: book(id),
            reviews: reviews
                .iter()
                .enumerate()
                .map(|(i, (rating, days_ago))| {
                    review(
                        id * 100 + i as i64,
                        id,
                        *rating,
                        now() - Duration::days(*days_ago),
                    )
                })
                .collect(),
        }
    }

    fn ids(ranking: &Ranking) -> Vec<i64> {
        ranking.books().iter().map(|r| r.book.id).collect()
    }

    #[test]
    fn test_date_range_branches() {
        let t = now();
        let before = t - Duration::seconds(1);
        let after = t + Duration::seconds(1);

        let open = DateRange::unbounded();
        assert!(open.contains(before) && open.contains(after));

        let from_only = DateRange::new(Some(t), None);
        assert!(!from_only.contains(before));
        assert!(from_only.contains(t));
        assert!(from_only.contains(after));

        let to_only = DateRange::new(None, Some(t));
        assert!(to_only.contains(before));
        assert!(to_only.contains(t));
        assert!(!to_only.contains(after));

        let both = DateRange::new(Some(before), Some(after));
        assert!(both.contains(before));
        assert!(both.contains(t));
        assert!(both.contains(after));
        assert!(!both.contains(after + Duration::seconds(1)));
        assert!(!both.contains(before - Duration::seconds(1)));
    }

    #[test]
    fn test_filter_by_date_range_includes_exact_bounds() {
        let t1 = now() - Duration::days(3);
        let t2 = now() - Duration::days(2);
        let t3 = now() - Duration::days(1);
        let reviews = vec![review(1, 1, 5, t1), review(2, 1, 4, t2), review(3, 1, 3, t3)];

        let filtered = filter_by_date_range(&reviews, &DateRange::new(Some(t1), Some(t3)));
        assert_eq!(filtered.len(), 3);

        let filtered = filter_by_date_range(&reviews, &DateRange::new(Some(t2), Some(t2)));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 2);
    }

    #[test]
    fn test_last_months_window() {
        let range = DateRange::last_months(now(), 6);
        assert_eq!(
            range.from,
            Some(Utc.with_ymd_and_hms(2023, 12, 15, 12, 0, 0).unwrap())
        );
        assert_eq!(range.to, Some(now()));
    }

    #[test]
    fn test_last_months_clamps_to_month_end() {
        let end_of_march = Utc.with_ymd_and_hms(2024, 3, 31, 8, 0, 0).unwrap();
        let range = DateRange::last_months(end_of_march, 1);

        assert_eq!(
            range.from,
            Some(Utc.with_ymd_and_hms(2024, 2, 29, 8, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_popular_orders_by_count_in_window() {
        let books = vec![
            entry(1, &[(5, 1)]),
            entry(2, &[(3, 1), (3, 2), (3, 3)]),
            entry(3, &[(4, 1), (4, 400), (4, 400), (4, 400)]),
        ];

        let ranking = Ranking::new(books).popular(&DateRange::last_months(now(), 1));

        assert_eq!(ids(&ranking), vec![2, 1, 3]);
        let counts: Vec<_> = ranking.books().iter().map(|r| r.reviews_count).collect();
        assert_eq!(counts, vec![Some(3), Some(1), Some(1)]);
    }

    #[test]
    fn test_highest_rated_counts_only_reviews_from_start() {
        let t1 = now() - Duration::days(3);
        let t2 = now() - Duration::days(2);
        let t3 = now() - Duration::days(1);
        let books = vec![BookWithReviews {
            book: book(1),
            reviews: vec![review(1, 1, 5, t1), review(2, 1, 4, t2), review(3, 1, 3, t3)],
        }];

        let ranking = Ranking::new(books).highest_rated(&DateRange::new(Some(t2), None));

        assert_eq!(ranking.books()[0].avg_rating, Some(3.5));
    }

    #[test]
    fn test_highest_rated_sorts_empty_window_last() {
        let books = vec![
            entry(1, &[]),
            entry(2, &[(2, 1)]),
            entry(3, &[(5, 400)]),
            entry(4, &[(4, 1), (5, 1)]),
        ];

        let ranking = Ranking::new(books).highest_rated(&DateRange::last_months(now(), 1));

        assert_eq!(ids(&ranking)[..2], [4, 2]);
        assert_eq!(ranking.len(), 4);
        assert!(ranking.books()[2..].iter().all(|r| r.avg_rating.is_none()));
    }

    #[test]
    fn test_min_reviews_uses_existing_count() {
        let books = vec![
            entry(1, &[(5, 1)]),
            entry(2, &[(3, 1), (3, 2)]),
            entry(3, &[(4, 1), (4, 2), (4, 3)]),
        ];

        let ranking = Ranking::new(books)
            .popular(&DateRange::unbounded())
            .min_reviews(2)
            .unwrap();

        assert_eq!(ids(&ranking), vec![3, 2]);
        assert!(
            ranking
                .books()
                .iter()
                .all(|r| r.reviews_count.unwrap() >= 2)
        );
    }

    #[test]
    fn test_min_reviews_reads_annotation_not_reviews() {
        // Counted over a one-month window, so the old reviews do not qualify
        // book 1 even though it owns three reviews overall.
        let books = vec![entry(1, &[(5, 1), (5, 400), (5, 400)]), entry(2, &[(1, 1), (1, 2)])];

        let ranking = Ranking::new(books)
            .popular(&DateRange::last_months(now(), 1))
            .highest_rated(&DateRange::unbounded())
            .min_reviews(2)
            .unwrap();

        assert_eq!(ids(&ranking), vec![2]);
    }

    #[test]
    fn test_min_reviews_without_count_is_an_error() {
        let ranking = Ranking::new(vec![entry(1, &[(5, 1)])]).highest_rated(&DateRange::unbounded());

        assert_eq!(
            ranking.min_reviews(1).unwrap_err(),
            RankingError::CountNotComputed
        );
        assert_eq!(
            Ranking::new(vec![]).min_reviews(0).unwrap_err(),
            RankingError::CountNotComputed
        );
    }

    #[test]
    fn test_stages_do_not_touch_input_reviews() {
        let books = vec![entry(1, &[(5, 1), (1, 400)])];
        let original = books.clone();

        let ranking = Ranking::new(books.clone())
            .popular(&DateRange::last_months(now(), 1))
            .highest_rated(&DateRange::last_months(now(), 1));

        assert_eq!(books, original);
        assert_eq!(ranking.books()[0].reviews.len(), 2);
    }

    #[test]
    fn test_last_ordering_stage_wins_and_earlier_breaks_ties() {
        let books = vec![
            entry(1, &[(5, 1)]),
            entry(2, &[(3, 1), (3, 2), (3, 3)]),
            entry(3, &[(3, 1)]),
        ];
        let window = DateRange::unbounded();

        let ranking = Ranking::new(books).popular(&window).highest_rated(&window);

        // Book 1 wins on rating; books 2 and 3 tie on 3.0 and keep count order.
        assert_eq!(ids(&ranking), vec![1, 2, 3]);
    }

    #[test]
    fn test_latest_orders_by_creation() {
        let ranking = Ranking::new(vec![entry(1, &[]), entry(3, &[]), entry(2, &[])]).latest();
        assert_eq!(ids(&ranking), vec![3, 2, 1]);
    }

    #[test]
    fn test_popular_last_month_threshold() {
        let books = vec![
            entry(1, &[(5, 3)]),
            entry(2, &[(4, 3), (4, 10)]),
            entry(3, &[(5, 3), (5, 90)]),
        ];

        let ranking = Preset::PopularLastMonth
            .apply(Ranking::new(books), now())
            .unwrap();

        assert_eq!(ids(&ranking), vec![2]);
        assert_eq!(ranking.books()[0].reviews_count, Some(2));
        assert_eq!(ranking.books()[0].avg_rating, Some(4.0));
    }

    #[test]
    fn test_six_month_presets_require_five_reviews() {
        let four: Vec<(i64, i64)> = (1..=4).map(|d| (5, d * 20)).collect();
        let five: Vec<(i64, i64)> = (1..=5).map(|d| (3, d * 20)).collect();
        let books = vec![entry(1, &four), entry(2, &five)];

        for preset in [Preset::PopularLast6Months, Preset::HighestRatedLast6Months] {
            let ranking = preset.apply(Ranking::new(books.clone()), now()).unwrap();
            assert_eq!(ids(&ranking), vec![2], "{preset}");
        }
    }

    #[test]
    fn test_month_presets_share_rating_order() {
        // Book 1 has more reviews, book 2 the better average. Both presets end
        // on the rating stage, so both rank book 2 first.
        let books = vec![
            entry(1, &[(3, 1), (3, 2), (3, 3)]),
            entry(2, &[(5, 1), (5, 2)]),
        ];

        let popular = Preset::PopularLastMonth
            .apply(Ranking::new(books.clone()), now())
            .unwrap();
        let rated = Preset::HighestRatedLastMonth
            .apply(Ranking::new(books), now())
            .unwrap();

        assert_eq!(ids(&popular), vec![2, 1]);
        assert_eq!(ids(&popular), ids(&rated));
    }

    #[test]
    fn test_preset_names_round_trip() {
        for preset in Preset::ALL {
            assert_eq!(preset.as_str().parse::<Preset>().unwrap(), preset);
        }
        assert_eq!(
            "popular_last_year".parse::<Preset>(),
            Err(UnknownPreset("popular_last_year".to_string()))
        );
    }

    #[test]
    fn test_average_rating_of_nothing_is_none() {
        assert_eq!(average_rating(&[]), None);
    }
}
