//! Canned TMDB responses for engine tests.
#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use letswatch_api::tmdb::{
    DiscoverMovieParams, LocalTmdbApi, SearchPersonParams, TmdbAuthorDetails, TmdbCastMember,
    TmdbCredits, TmdbCrewMember, TmdbDiscoverMovieResponse, TmdbGenre, TmdbGenreListResponse,
    TmdbMovieResult, TmdbPersonResult, TmdbReview, TmdbReviewsResponse, TmdbSearchPersonResponse,
};

/// Either a canned payload or the failure message to return.
type Canned<T> = std::result::Result<T, String>;

/// Shorthand for a calendar date.
pub(crate) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Minimal discovery result.
pub(crate) fn movie(id: u64, title: &str) -> TmdbMovieResult {
    TmdbMovieResult {
        id: Some(id),
        title: Some(String::from(title)),
        release_date: Some(String::from("1994-07-06")),
        vote_average: Some(7.0),
        ..TmdbMovieResult::default()
    }
}

/// Mock API returning pre-configured payloads and recording calls.
#[derive(Debug)]
pub(crate) struct MockTmdbApi {
    genres: Canned<Vec<TmdbGenre>>,
    people: Vec<TmdbPersonResult>,
    /// Discovery pages keyed by the window's lower bound (`None` = unbounded).
    discover: HashMap<Option<NaiveDate>, Vec<Canned<Vec<TmdbMovieResult>>>>,
    credits: HashMap<u64, Canned<TmdbCredits>>,
    reviews: HashMap<u64, Canned<Vec<TmdbReview>>>,
    discover_calls: Mutex<Vec<DiscoverMovieParams>>,
    person_calls: AtomicU32,
    credits_calls: AtomicU32,
}

impl MockTmdbApi {
    pub(crate) fn new() -> Self {
        Self {
            genres: Ok(Vec::new()),
            people: Vec::new(),
            discover: HashMap::new(),
            credits: HashMap::new(),
            reviews: HashMap::new(),
            discover_calls: Mutex::new(Vec::new()),
            person_calls: AtomicU32::new(0),
            credits_calls: AtomicU32::new(0),
        }
    }

    pub(crate) fn with_genres(mut self, genres: &[(&str, u32)]) -> Self {
        self.genres = Ok(genres
            .iter()
            .map(|&(name, id)| TmdbGenre {
                id: Some(id),
                name: Some(String::from(name)),
            })
            .collect());
        self
    }

    pub(crate) fn failing_genres(mut self) -> Self {
        self.genres = Err(String::from("connection refused"));
        self
    }

    pub(crate) fn with_people(mut self, people: &[(u64, &str)]) -> Self {
        self.people = people
            .iter()
            .map(|&(id, name)| TmdbPersonResult {
                id: Some(id),
                name: Some(String::from(name)),
                known_for_department: Some(String::from("Acting")),
                popularity: Some(1.0),
            })
            .collect();
        self
    }

    /// Person search results exactly as given, incomplete entries included.
    pub(crate) fn with_person_results(mut self, people: Vec<TmdbPersonResult>) -> Self {
        self.people = people;
        self
    }

    /// Appends one discovery page for the window starting at `gte`.
    pub(crate) fn with_discover(mut self, gte: Option<NaiveDate>, movies: Vec<TmdbMovieResult>) -> Self {
        self.discover.entry(gte).or_default().push(Ok(movies));
        self
    }

    /// Appends one discovery page of `Movie {id}` results.
    pub(crate) fn with_discover_ids(self, gte: Option<NaiveDate>, ids: &[u64]) -> Self {
        let movies = ids.iter().map(|&id| movie(id, &format!("Movie {id}"))).collect();
        self.with_discover(gte, movies)
    }

    /// Appends one failing discovery page for the window starting at `gte`.
    pub(crate) fn failing_discover(mut self, gte: Option<NaiveDate>) -> Self {
        self.discover
            .entry(gte)
            .or_default()
            .push(Err(String::from("HTTP 503")));
        self
    }

    pub(crate) fn with_credits(mut self, movie_id: u64, cast: &[&str], crew: &[(&str, &str)]) -> Self {
        let credits = TmdbCredits {
            id: Some(movie_id),
            cast: cast
                .iter()
                .zip(0u32..)
                .map(|(name, order)| TmdbCastMember {
                    name: Some(String::from(*name)),
                    character: None,
                    order: Some(order),
                })
                .collect(),
            crew: crew
                .iter()
                .map(|&(name, job)| TmdbCrewMember {
                    name: Some(String::from(name)),
                    job: Some(String::from(job)),
                    department: None,
                })
                .collect(),
        };
        self.credits.insert(movie_id, Ok(credits));
        self
    }

    pub(crate) fn failing_credits(mut self, movie_id: u64) -> Self {
        self.credits
            .insert(movie_id, Err(String::from("credits timed out")));
        self
    }

    /// Reviews named `review 0`, `review 1`, ... with the given ratings.
    pub(crate) fn with_reviews(mut self, movie_id: u64, ratings: &[Option<f64>]) -> Self {
        let reviews = ratings
            .iter()
            .enumerate()
            .map(|(i, &rating)| TmdbReview {
                author: Some(format!("author {i}")),
                author_details: Some(TmdbAuthorDetails {
                    rating,
                    ..TmdbAuthorDetails::default()
                }),
                content: Some(format!("review {i}")),
                url: None,
            })
            .collect();
        self.reviews.insert(movie_id, Ok(reviews));
        self
    }

    pub(crate) fn failing_reviews(mut self, movie_id: u64) -> Self {
        self.reviews
            .insert(movie_id, Err(String::from("reviews timed out")));
        self
    }

    pub(crate) fn discover_calls(&self) -> Vec<DiscoverMovieParams> {
        self.discover_calls.lock().unwrap().clone()
    }

    pub(crate) fn person_calls(&self) -> u32 {
        self.person_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn credits_calls(&self) -> u32 {
        self.credits_calls.load(Ordering::SeqCst)
    }
}

impl LocalTmdbApi for MockTmdbApi {
    async fn genre_movie_list(&self, _language: &str) -> Result<TmdbGenreListResponse> {
        let genres = self.genres.clone().map_err(|e| anyhow!(e))?;
        Ok(TmdbGenreListResponse { genres })
    }

    async fn search_person(&self, _params: &SearchPersonParams) -> Result<TmdbSearchPersonResponse> {
        self.person_calls.fetch_add(1, Ordering::SeqCst);
        Ok(TmdbSearchPersonResponse {
            page: 1,
            results: self.people.clone(),
            total_pages: 1,
            total_results: u32::try_from(self.people.len()).unwrap(),
        })
    }

    async fn discover_movie(
        &self,
        params: &DiscoverMovieParams,
    ) -> Result<TmdbDiscoverMovieResponse> {
        self.discover_calls.lock().unwrap().push(params.clone());

        let pages = self
            .discover
            .get(&params.release_date_gte)
            .cloned()
            .unwrap_or_default();
        let total_pages = u32::try_from(pages.len()).unwrap().max(1);
        let index = usize::try_from(params.page.saturating_sub(1)).unwrap();
        let results = match pages.get(index) {
            Some(Ok(movies)) => movies.clone(),
            Some(Err(e)) => return Err(anyhow!(e.clone())),
            None => Vec::new(),
        };

        Ok(TmdbDiscoverMovieResponse {
            page: params.page,
            total_results: u32::try_from(results.len()).unwrap(),
            results,
            total_pages,
        })
    }

    async fn movie_credits(&self, movie_id: u64, _language: &str) -> Result<TmdbCredits> {
        self.credits_calls.fetch_add(1, Ordering::SeqCst);
        match self.credits.get(&movie_id) {
            Some(Ok(credits)) => Ok(credits.clone()),
            Some(Err(e)) => Err(anyhow!(e.clone())),
            None => Ok(TmdbCredits::default()),
        }
    }

    async fn movie_reviews(
        &self,
        movie_id: u64,
        _language: &str,
        page: u32,
    ) -> Result<TmdbReviewsResponse> {
        match self.reviews.get(&movie_id) {
            Some(Ok(results)) => Ok(TmdbReviewsResponse {
                id: Some(movie_id),
                page,
                total_pages: 1,
                total_results: u32::try_from(results.len()).unwrap(),
                results: results.clone(),
            }),
            Some(Err(e)) => Err(anyhow!(e.clone())),
            None => Ok(TmdbReviewsResponse::default()),
        }
    }
}
