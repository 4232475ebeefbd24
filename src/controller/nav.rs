use std::sync::Arc;

use crossbeam_channel::Sender;
use threadpool::ThreadPool;

use crate::{
    controller::Event,
    data::{AppState, Nav},
    error::Error,
    webapi::WebApi,
};

/// Reacts to route changes: one catalog call per navigation, issued in
/// arrival order on a worker pool.  Completions come back as `Event`s and
/// are folded into the state by `handle`, where anything belonging to a
/// superseded navigation is discarded.  In-flight calls are never cancelled,
/// their late completions simply fail the token check.
pub struct NavController {
    webapi: Arc<WebApi>,
    pool: ThreadPool,
    sink: Sender<Event>,
}

impl NavController {
    pub fn new(webapi: Arc<WebApi>, sink: Sender<Event>) -> Self {
        const MAX_FETCH_THREADS: usize = 4;

        Self {
            webapi,
            pool: ThreadPool::with_name("catalog_fetch".into(), MAX_FETCH_THREADS),
            sink,
        }
    }

    pub fn navigate(&self, state: &mut AppState, nav: Nav) {
        let token = state.navigate(nav.clone());
        let webapi = self.webapi.clone();
        let sink = self.sink.clone();
        self.pool.execute(move || {
            let result = match &nav {
                Nav::Category(id) => webapi.get_movies(id),
                Nav::Genre(id) => webapi.get_movies_by_genre(id),
                Nav::Search(term) => webapi.search_movies(term),
            };
            if sink.send(Event::MovieListLoaded(token, result)).is_err() {
                log::warn!("event sink closed, dropping movie list");
            }
        });
    }

    pub fn load_genres(&self, state: &mut AppState) {
        if state.genres.is_loaded() || state.genres.is_loading() {
            return;
        }
        state.genres.begin(());
        let webapi = self.webapi.clone();
        let sink = self.sink.clone();
        self.pool.execute(move || {
            let result = webapi.get_genres();
            if sink.send(Event::GenresLoaded(result)).is_err() {
                log::warn!("event sink closed, dropping genre list");
            }
        });
    }

    /// Open a movie page: details, credits and recommendations are fetched
    /// together, all keyed by the movie id.
    pub fn open_movie(&self, state: &mut AppState, id: Arc<str>) {
        let already_open = state
            .movie_detail
            .movie
            .loaded()
            .map_or(false, |movie| movie.id == id);
        if already_open || state.movie_detail.movie.is_loading_for(&id) {
            return;
        }
        state.open_movie(id.clone());
        self.spawn(id.clone(), Event::MovieDetailLoaded, |webapi, id| {
            webapi.get_movie(id)
        });
        self.spawn(id.clone(), Event::MovieCreditsLoaded, |webapi, id| {
            webapi.get_movie_credits(id)
        });
        self.spawn(id, Event::MovieRecommendationsLoaded, |webapi, id| {
            webapi.get_movie_recommendations(id)
        });
    }

    fn spawn<T: Send + 'static>(
        &self,
        id: Arc<str>,
        event: impl Fn(Arc<str>, Result<T, Error>) -> Event + Send + 'static,
        fetch: impl Fn(&WebApi, &str) -> Result<T, Error> + Send + 'static,
    ) {
        let webapi = self.webapi.clone();
        let sink = self.sink.clone();
        self.pool.execute(move || {
            let result = fetch(&webapi, &id);
            if sink.send(event(id, result)).is_err() {
                log::warn!("event sink closed, dropping completion");
            }
        });
    }

    pub fn handle(&self, state: &mut AppState, event: Event) {
        match event {
            Event::MovieListLoaded(token, result) => state.finish_movie_list(token, result),
            Event::GenresLoaded(result) => state.finish_genres(result),
            Event::MovieDetailLoaded(id, result) => state.finish_movie_detail(id, result),
            Event::MovieCreditsLoaded(id, result) => state.finish_movie_credits(id, result),
            Event::MovieRecommendationsLoaded(id, result) => {
                state.finish_movie_recommendations(id, result)
            }
        }
    }
}
