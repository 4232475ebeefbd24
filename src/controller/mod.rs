mod library;
mod nav;

pub use crate::controller::{library::LibraryController, nav::NavController};

use std::sync::Arc;

use im::Vector;

use crate::{
    data::{CastMember, Genre, Movie, MovieDetails, RequestToken},
    error::Error,
};

/// Completion of an outbound catalog call, delivered back to the thread of
/// control that owns the `AppState`.
#[derive(Debug)]
pub enum Event {
    MovieListLoaded(RequestToken, Result<Vector<Movie>, Error>),
    GenresLoaded(Result<Vector<Genre>, Error>),
    MovieDetailLoaded(Arc<str>, Result<Arc<MovieDetails>, Error>),
    MovieCreditsLoaded(Arc<str>, Result<Vector<CastMember>, Error>),
    MovieRecommendationsLoaded(Arc<str>, Result<Vector<Movie>, Error>),
}
