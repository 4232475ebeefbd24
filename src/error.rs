use std::{error, fmt, sync::Arc};

#[derive(Clone, Debug)]
pub enum Error {
    WebApiError(String),
    DuplicateFavorite(Arc<str>),
    FavoriteNotFound(Arc<str>),
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::WebApiError(err) => f.write_str(err),
            Self::DuplicateFavorite(title) => write!(f, "already in favorites: {}", title),
            Self::FavoriteNotFound(id) => write!(f, "favorite not found: {}", id),
        }
    }
}
