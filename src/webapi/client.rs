use std::{env, fmt::Display, sync::Arc, thread, time::Duration};

use im::Vector;
use once_cell::sync::OnceCell;
use serde::{de::DeserializeOwned, Deserialize};
use ureq::{
    http::{Response, StatusCode},
    Agent, Body,
};
use url::Url;

use crate::{
    data::{CastMember, Config, Genre, Movie, MovieDetails},
    error::Error,
};

const PROXY_ENV_VAR: &str = "HTTPS_PROXY";

pub struct WebApi {
    agent: Agent,
    base_url: Arc<str>,
    access_key: Arc<str>,
    genres: OnceCell<Vector<Genre>>,
}

impl WebApi {
    pub fn new(config: &Config) -> Self {
        let mut agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(5)))
            .http_status_as_error(false);
        if let Ok(proxy_url) = env::var(PROXY_ENV_VAR) {
            let proxy = ureq::Proxy::new(&proxy_url).ok();
            agent = agent.proxy(proxy);
        }
        Self {
            agent: agent.build().into(),
            base_url: config.api_base_url.clone(),
            access_key: config.api_read_access_key.clone(),
            genres: OnceCell::new(),
        }
    }

    fn endpoint(&self, path: impl Display) -> RequestBuilder {
        RequestBuilder::new(self.base_url.clone(), path)
    }

    fn request(&self, request: &RequestBuilder) -> Result<Response<Body>, Error> {
        let url = request.build()?;
        self.agent
            .get(url.as_str())
            .header("Authorization", &format!("Bearer {}", self.access_key))
            .call()
            .map_err(|err| Error::WebApiError(err.to_string()))
    }

    fn with_retry(f: impl Fn() -> Result<Response<Body>, Error>) -> Result<Response<Body>, Error> {
        loop {
            let response = f()?;
            match response.status() {
                StatusCode::TOO_MANY_REQUESTS => {
                    let retry_after_secs = response
                        .headers()
                        .get("Retry-After")
                        .and_then(|secs| secs.to_str().ok());
                    let secs = retry_after_secs.unwrap_or("2").parse::<u64>().unwrap_or(2);
                    thread::sleep(Duration::from_secs(secs));
                }
                _ => {
                    break Ok(response);
                }
            }
        }
    }

    /// Send a request and return the deserialized JSON body.
    fn load<T: DeserializeOwned>(&self, request: &RequestBuilder) -> Result<T, Error> {
        let mut response = Self::with_retry(|| self.request(request))?;
        if !response.status().is_success() {
            return Err(Error::WebApiError(format!(
                "unexpected status code {}",
                response.status()
            )));
        }
        response
            .body_mut()
            .read_json()
            .map_err(|err| Error::WebApiError(err.to_string()))
    }
}

#[derive(Clone, Deserialize)]
struct ResultsPage<T: Clone> {
    results: Vector<T>,
}

/// Movie list endpoints.
impl WebApi {
    // https://developer.themoviedb.org/reference/movie-popular-list
    pub fn get_movies(&self, category_id: &str) -> Result<Vector<Movie>, Error> {
        let request = self.endpoint(format!("3/movie/{}", category_id));
        let result: ResultsPage<Movie> = self.load(&request)?;
        Ok(result.results)
    }

    // https://developer.themoviedb.org/reference/discover-movie
    pub fn get_movies_by_genre(&self, genre_id: &str) -> Result<Vector<Movie>, Error> {
        let request = self.endpoint("3/discover/movie").query("with_genres", genre_id);
        let result: ResultsPage<Movie> = self.load(&request)?;
        Ok(result.results)
    }

    // https://developer.themoviedb.org/reference/search-movie
    pub fn search_movies(&self, query: &str) -> Result<Vector<Movie>, Error> {
        let request = self.endpoint("3/search/movie").query("query", query);
        let result: ResultsPage<Movie> = self.load(&request)?;
        Ok(result.results)
    }
}

/// Movie detail endpoints.
impl WebApi {
    // https://developer.themoviedb.org/reference/movie-details
    pub fn get_movie(&self, id: &str) -> Result<Arc<MovieDetails>, Error> {
        let request = self.endpoint(format!("3/movie/{}", id));
        let result: MovieDetails = self.load(&request)?;
        Ok(Arc::new(result))
    }

    // https://developer.themoviedb.org/reference/movie-credits
    pub fn get_movie_credits(&self, id: &str) -> Result<Vector<CastMember>, Error> {
        #[derive(Clone, Deserialize)]
        struct Credits {
            cast: Vector<CastMember>,
        }

        let request = self.endpoint(format!("3/movie/{}/credits", id));
        let result: Credits = self.load(&request)?;
        Ok(result.cast)
    }

    // https://developer.themoviedb.org/reference/movie-recommendations
    pub fn get_movie_recommendations(&self, id: &str) -> Result<Vector<Movie>, Error> {
        let request = self.endpoint(format!("3/movie/{}/recommendations", id));
        let result: ResultsPage<Movie> = self.load(&request)?;
        Ok(result.results)
    }
}

/// Genre endpoints.
impl WebApi {
    // https://developer.themoviedb.org/reference/genre-movie-list
    //
    // The genre table is static reference data, fetched once and kept for
    // the whole session.
    pub fn get_genres(&self) -> Result<Vector<Genre>, Error> {
        #[derive(Clone, Deserialize)]
        struct GenreList {
            genres: Vector<Genre>,
        }

        self.genres
            .get_or_try_init(|| {
                let request = self.endpoint("3/genre/movie/list");
                let result: GenreList = self.load(&request)?;
                Ok(result.genres)
            })
            .cloned()
    }
}

#[derive(Clone)]
struct RequestBuilder {
    base: Arc<str>,
    path: String,
    queries: Vec<(String, String)>,
}

impl RequestBuilder {
    fn new(base: Arc<str>, path: impl Display) -> Self {
        Self {
            base,
            path: path.to_string(),
            queries: Vec::new(),
        }
    }

    fn query(mut self, key: impl Display, value: impl Display) -> Self {
        self.queries.push((key.to_string(), value.to_string()));
        self
    }

    fn build(&self) -> Result<Url, Error> {
        let mut url = Url::parse(&self.base)
            .and_then(|base| base.join(&self.path))
            .map_err(|err| Error::WebApiError(err.to_string()))?;
        for (key, value) in &self.queries {
            url.query_pairs_mut().append_pair(key, value);
        }
        Ok(url)
    }
}
