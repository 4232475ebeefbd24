mod category;
mod config;
mod favorite;
mod fetch;
mod movie;
mod nav;
mod utils;

pub use crate::data::{
    category::{Category, CATEGORIES},
    config::Config,
    favorite::{favorites_in, FavoriteMovie},
    fetch::{Fetch, FetchStatus},
    movie::{CastMember, Genre, Movie, MovieDetails},
    nav::{Heading, Nav},
};

use std::sync::Arc;

use im::{HashSet, Vector};
use itertools::Itertools;

use crate::error::Error;

/// Monotonically increasing token identifying one issued movie list fetch.
/// Completions carry it back, only the most recently issued token may move
/// the list out of its loading state.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct RequestToken(u64);

#[derive(Clone, Debug, Default)]
pub struct MovieList {
    sequence: u64,
    pub movies: Fetch<Vector<Movie>, RequestToken>,
}

impl MovieList {
    fn next_token(&mut self) -> RequestToken {
        self.sequence += 1;
        RequestToken(self.sequence)
    }
}

/// Data of the opened movie page, all keyed by the movie id so completions
/// for a previously opened movie cannot land.
#[derive(Clone, Debug, Default)]
pub struct MovieDetail {
    pub movie: Fetch<Arc<MovieDetails>, Arc<str>>,
    pub credits: Fetch<Vector<CastMember>, Arc<str>>,
    pub recommendations: Fetch<Vector<Movie>, Arc<str>>,
}

#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Config,
    pub nav: Nav,
    pub movie_list: MovieList,
    pub movie_detail: MovieDetail,
    pub genres: Fetch<Vector<Genre>>,
    pub favorites: Vector<FavoriteMovie>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::default_with_config(Config::default())
    }
}

impl AppState {
    pub fn default_with_config(config: Config) -> Self {
        Self {
            config,
            nav: Nav::default(),
            movie_list: MovieList::default(),
            movie_detail: MovieDetail::default(),
            genres: Fetch::Idle,
            favorites: Vector::new(),
        }
    }
}

/// Navigation and fetch transitions.
impl AppState {
    /// Record a route change and move the movie list into its loading state,
    /// dropping whatever the previous route had loaded.  Returns the token
    /// the matching completion must present.
    pub fn navigate(&mut self, nav: Nav) -> RequestToken {
        self.nav = nav;
        let token = self.movie_list.next_token();
        self.movie_list.movies.begin(token);
        token
    }

    /// Fold a completed movie list fetch back in.  Results of superseded
    /// navigations are discarded here, regardless of arrival order.
    pub fn finish_movie_list(&mut self, token: RequestToken, result: Result<Vector<Movie>, Error>) {
        self.movie_list.movies.finish((token, result));
    }

    pub fn finish_genres(&mut self, result: Result<Vector<Genre>, Error>) {
        self.genres.finish(((), result));
    }

    pub fn open_movie(&mut self, id: Arc<str>) {
        self.movie_detail.movie.begin(id.clone());
        self.movie_detail.credits.begin(id.clone());
        self.movie_detail.recommendations.begin(id);
    }

    pub fn close_movie(&mut self) {
        self.movie_detail.movie.clear();
        self.movie_detail.credits.clear();
        self.movie_detail.recommendations.clear();
    }

    pub fn finish_movie_detail(&mut self, id: Arc<str>, result: Result<Arc<MovieDetails>, Error>) {
        self.movie_detail.movie.finish((id, result));
    }

    pub fn finish_movie_credits(
        &mut self,
        id: Arc<str>,
        result: Result<Vector<CastMember>, Error>,
    ) {
        self.movie_detail.credits.finish((id, result));
    }

    pub fn finish_movie_recommendations(
        &mut self,
        id: Arc<str>,
        result: Result<Vector<Movie>, Error>,
    ) {
        self.movie_detail.recommendations.finish((id, result));
    }
}

/// Read surface for the render shell.
impl AppState {
    pub fn movies(&self) -> Option<&Vector<Movie>> {
        self.movie_list.movies.loaded()
    }

    pub fn heading(&self) -> Heading {
        match &self.nav {
            Nav::Search(term) => Heading {
                title: "Search".into(),
                subtitle: term.clone(),
            },
            Nav::Category(id) => Heading {
                title: Category::find(id)
                    .map(|category| Arc::from(category.label))
                    .unwrap_or_else(|| id.clone()),
                subtitle: "Category".into(),
            },
            Nav::Genre(id) => Heading {
                title: "Genre".into(),
                subtitle: self.genre_label(id).unwrap_or_else(utils::default_str),
            },
        }
    }

    fn genre_label(&self, id: &str) -> Option<Arc<str>> {
        self.genres
            .loaded()?
            .iter()
            .find(|genre| &*genre.id == id)
            .map(|genre| genre.label.clone())
    }
}

/// Favorites mirror and the views derived from it.
impl AppState {
    pub fn set_favorites(&mut self, favorites: Vector<FavoriteMovie>) {
        self.favorites = favorites;
    }

    /// Re-derived from the favorites collection on every call; the
    /// collection is the only source of truth.
    pub fn favorite_ids(&self) -> HashSet<Arc<str>> {
        self.favorites.iter().map(|fav| fav.id.clone()).collect()
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.iter().any(|fav| &*fav.id == id)
    }

    /// The currently loaded movies that are favorited, in list order.  While
    /// a fetch is in flight there is no loaded list and the view is empty, so
    /// a superseded fetch can never leak stale movies in.
    pub fn visible_favorites(&self) -> Vector<Movie> {
        match self.movies() {
            Some(movies) => favorites_in(movies, &self.favorite_ids()),
            None => Vector::new(),
        }
    }

    pub fn favorite_titles(&self) -> String {
        self.favorites.iter().map(|fav| &*fav.title).join(" • ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: &str, title: &str) -> Movie {
        Movie {
            id: id.into(),
            title: title.into(),
            poster_path: None,
            vote_average: 0.0,
        }
    }

    fn movies(ids: &[&str]) -> Vector<Movie> {
        ids.iter().map(|&id| movie(id, &id.to_uppercase())).collect()
    }

    #[test]
    fn navigation_enters_loading_and_drops_loaded_data() {
        let mut state = AppState::default();
        let token = state.navigate(Nav::Category("popular".into()));
        state.finish_movie_list(token, Ok(movies(&["a", "b"])));
        assert!(state.movies().is_some());

        state.navigate(Nav::Category("upcoming".into()));
        assert_eq!(state.movie_list.movies.status(), FetchStatus::Loading);
        assert!(state.movies().is_none());
    }

    #[test]
    fn last_query_wins_even_when_responses_arrive_out_of_order() {
        let mut state = AppState::default();
        let first = state.navigate(Nav::Category("popular".into()));
        let second = state.navigate(Nav::Category("top_rated".into()));

        // The superseded response resolves after the fresh one was issued.
        state.finish_movie_list(second, Ok(movies(&["a", "b", "c", "d", "e"])));
        state.finish_movie_list(first, Ok(movies(&["x"; 20])));

        let loaded = state.movies().unwrap();
        assert_eq!(loaded.len(), 5);
        assert_eq!(&*loaded[0].id, "a");
    }

    #[test]
    fn last_query_wins_when_responses_arrive_in_order() {
        let mut state = AppState::default();
        let first = state.navigate(Nav::Category("popular".into()));
        let second = state.navigate(Nav::Category("top_rated".into()));

        state.finish_movie_list(first, Ok(movies(&["x"; 20])));
        assert_eq!(state.movie_list.movies.status(), FetchStatus::Loading);

        state.finish_movie_list(second, Ok(movies(&["a", "b", "c", "d", "e"])));
        assert_eq!(state.movies().unwrap().len(), 5);
    }

    #[test]
    fn stale_response_does_not_leave_loading() {
        let mut state = AppState::default();
        let first = state.navigate(Nav::Search("alien".into()));
        state.navigate(Nav::Search("aliens".into()));

        state.finish_movie_list(first, Ok(movies(&["a"])));
        assert_eq!(state.movie_list.movies.status(), FetchStatus::Loading);
    }

    #[test]
    fn repeated_query_is_not_satisfied_by_its_first_issue() {
        let mut state = AppState::default();
        let first = state.navigate(Nav::Category("popular".into()));
        state.navigate(Nav::Category("top_rated".into()));
        let third = state.navigate(Nav::Category("popular".into()));

        state.finish_movie_list(first, Ok(movies(&["stale"])));
        assert_eq!(state.movie_list.movies.status(), FetchStatus::Loading);

        state.finish_movie_list(third, Ok(movies(&["fresh"])));
        assert_eq!(&*state.movies().unwrap()[0].id, "fresh");
    }

    #[test]
    fn failure_of_the_current_query_surfaces() {
        let mut state = AppState::default();
        let token = state.navigate(Nav::Genre("28".into()));
        state.finish_movie_list(token, Err(Error::WebApiError("timed out".into())));
        assert_eq!(state.movie_list.movies.status(), FetchStatus::Failed);
    }

    #[test]
    fn failure_of_a_superseded_query_is_ignored() {
        let mut state = AppState::default();
        let first = state.navigate(Nav::Genre("28".into()));
        let second = state.navigate(Nav::Genre("12".into()));

        state.finish_movie_list(first, Err(Error::WebApiError("timed out".into())));
        assert_eq!(state.movie_list.movies.status(), FetchStatus::Loading);

        state.finish_movie_list(second, Ok(movies(&["a"])));
        assert!(state.movie_list.movies.is_loaded());
    }

    #[test]
    fn category_heading_uses_the_catalog_label() {
        let mut state = AppState::default();
        state.navigate(Nav::Category("top_rated".into()));
        let heading = state.heading();
        assert_eq!(&*heading.title, "Top Rated");
        assert_eq!(&*heading.subtitle, "Category");
    }

    #[test]
    fn unknown_category_heading_falls_back_to_the_id() {
        let mut state = AppState::default();
        state.navigate(Nav::Category("watchlist".into()));
        assert_eq!(&*state.heading().title, "watchlist");
    }

    #[test]
    fn search_heading_shows_the_term() {
        let mut state = AppState::default();
        state.navigate(Nav::Search("alien".into()));
        let heading = state.heading();
        assert_eq!(&*heading.title, "Search");
        assert_eq!(&*heading.subtitle, "alien");
    }

    #[test]
    fn genre_heading_labels_once_the_table_loads() {
        let mut state = AppState::default();
        state.navigate(Nav::Genre("28".into()));
        assert_eq!(&*state.heading().subtitle, "");

        state.genres.begin(());
        state.finish_genres(Ok(Vector::from(vec![Genre {
            id: "28".into(),
            label: "Action".into(),
        }])));
        assert_eq!(&*state.heading().subtitle, "Action");
    }

    #[test]
    fn reopening_a_movie_discards_the_previous_detail_fetches() {
        let mut state = AppState::default();
        state.open_movie("550".into());
        state.open_movie("603".into());

        state.finish_movie_recommendations("550".into(), Ok(movies(&["stale"])));
        assert_eq!(state.movie_detail.recommendations.status(), FetchStatus::Loading);

        state.finish_movie_recommendations("603".into(), Ok(movies(&["fresh"])));
        let recommended = state.movie_detail.recommendations.loaded().unwrap();
        assert_eq!(&*recommended[0].id, "fresh");
    }

    #[test]
    fn closing_the_movie_resets_the_detail_fetches() {
        let mut state = AppState::default();
        state.open_movie("550".into());
        state.close_movie();
        assert!(state.movie_detail.movie.is_idle());
        assert!(state.movie_detail.credits.is_idle());
        assert!(state.movie_detail.recommendations.is_idle());
    }

    #[test]
    fn visible_favorites_follow_both_inputs() {
        let mut state = AppState::default();
        let token = state.navigate(Nav::Category("popular".into()));
        state.finish_movie_list(token, Ok(movies(&["a", "b", "c"])));

        state.set_favorites(Vector::from(vec![FavoriteMovie::from_movie(&movie("b", "B"))]));
        let visible = state.visible_favorites();
        assert_eq!(visible.len(), 1);
        assert_eq!(&*visible[0].id, "b");

        state.set_favorites(Vector::from(vec![
            FavoriteMovie::from_movie(&movie("b", "B")),
            FavoriteMovie::from_movie(&movie("a", "A")),
        ]));
        let favorites = state.visible_favorites();
        let ids: Vec<&str> = favorites.iter().map(|movie| &*movie.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn visible_favorites_are_empty_while_loading() {
        let mut state = AppState::default();
        state.set_favorites(Vector::from(vec![FavoriteMovie::from_movie(&movie("a", "A"))]));
        state.navigate(Nav::Category("popular".into()));
        assert!(state.visible_favorites().is_empty());
    }

    #[test]
    fn favorite_titles_join_for_the_widget() {
        let mut state = AppState::default();
        state.set_favorites(Vector::from(vec![
            FavoriteMovie::from_annotation("Alien", "scary"),
            FavoriteMovie::from_annotation("Heat", "tense"),
        ]));
        assert_eq!(state.favorite_titles(), "Alien • Heat");
    }
}
