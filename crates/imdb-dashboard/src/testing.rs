//! Record builders shared by the unit tests.

use imdb_processing::MovieRecord;

/// A record with a title, rating and main genre; every other field is null.
pub fn movie(title: &str, rating: f64, main_genre: Option<&str>) -> MovieRecord {
    let genre_list: Vec<String> = main_genre.map(str::to_string).into_iter().collect();
    MovieRecord {
        title: title.to_string(),
        year: None,
        runtime: None,
        genre_raw: main_genre.map(str::to_string),
        main_genre: main_genre.map(str::to_string),
        genre_list,
        imdb_rating: rating,
        metascore: None,
        votes: None,
        revenue: None,
        certificate: None,
        decade: None,
    }
}

pub trait RecordFixture {
    /// Sets the year and its decade.
    fn with_year(self, year: i32) -> Self;
    fn with_revenue(self, revenue: f64) -> Self;
}

impl RecordFixture for MovieRecord {
    fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self.decade = Some(year.div_euclid(10) * 10);
        self
    }

    fn with_revenue(mut self, revenue: f64) -> Self {
        self.revenue = Some(revenue);
        self
    }
}
