use crate::{
    data::{AppState, FavoriteMovie, Movie},
    error::Error,
    library::FavoritesStore,
};

/// Favorites actions for the shell.  Every mutation goes through the store
/// and re-reads it into the state, so the derived views recompute from the
/// persisted collection.
pub struct LibraryController {
    store: FavoritesStore,
}

impl LibraryController {
    pub fn new(store: FavoritesStore) -> Self {
        Self { store }
    }

    pub fn refresh(&self, state: &mut AppState) {
        state.set_favorites(self.store.list());
    }

    pub fn toggle_favorite(&self, state: &mut AppState, movie: &Movie) {
        if state.is_favorite(&movie.id) {
            self.store.remove(&movie.id);
        } else if let Err(err) = self.store.add(FavoriteMovie::from_movie(movie)) {
            log::warn!("failed to toggle favorite: {}", err);
        }
        self.refresh(state);
    }

    /// Submit the annotation form.  A duplicate title surfaces to the caller
    /// as a validation error.
    pub fn add_favorite(&self, state: &mut AppState, title: &str, comment: &str) -> Result<(), Error> {
        self.store.add(FavoriteMovie::from_annotation(title, comment))?;
        self.refresh(state);
        Ok(())
    }

    pub fn remove_favorite(&self, state: &mut AppState, id: &str) {
        self.store.remove(id);
        self.refresh(state);
    }

    pub fn update_favorite(&self, state: &mut AppState, favorite: FavoriteMovie) {
        // A vanished entry here usually means two UI actions raced on the
        // same item; skipping is the right outcome.
        if let Err(err) = self.store.update(favorite) {
            log::warn!("favorite update skipped: {}", err);
        }
        self.refresh(state);
    }

    /// Form validation predicate, checked before submission.
    pub fn is_unique(&self, title: &str) -> bool {
        self.store.is_unique(title)
    }
}
