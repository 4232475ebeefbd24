use std::sync::Arc;

use im::{HashSet, Vector};
use serde::{Deserialize, Serialize};

use crate::data::movie::Movie;

/// A user-curated movie entry with an annotation, persisted independent of
/// the remote catalog.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct FavoriteMovie {
    pub id: Arc<str>,
    pub title: Arc<str>,
    pub comment: Arc<str>,
}

impl FavoriteMovie {
    /// Entry authored through the annotation form.  The title doubles as the
    /// natural key.
    pub fn from_annotation(title: impl Into<Arc<str>>, comment: impl Into<Arc<str>>) -> Self {
        let title = title.into();
        Self {
            id: title.clone(),
            title,
            comment: comment.into(),
        }
    }

    /// Entry toggled from a catalog movie, keyed by the movie id so the
    /// on-screen favorites view can intersect against the movie list.
    pub fn from_movie(movie: &Movie) -> Self {
        Self {
            id: movie.id.clone(),
            title: movie.title.clone(),
            comment: "".into(),
        }
    }
}

/// The movies of `movies` whose id is favorited, in the original order.
pub fn favorites_in(movies: &Vector<Movie>, favorite_ids: &HashSet<Arc<str>>) -> Vector<Movie> {
    movies
        .iter()
        .filter(|movie| favorite_ids.contains(&movie.id))
        .cloned()
        .collect()
}
