use std::sync::Arc;

use im::{HashSet, Vector};

use crate::{data::FavoriteMovie, error::Error, storage::Storage};

const FAVORITES_KEY: &str = "favorites";

/// The favorite-movie collection, persisted as one JSON blob under a single
/// storage key.  Every mutation is a read-modify-write of the whole
/// collection; mutation is synchronous and single-writer, so no partial
/// state is ever observable.
pub struct FavoritesStore {
    storage: Arc<dyn Storage>,
}

impl FavoritesStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// The persisted favorites in insertion order.  An absent key means no
    /// favorites; an unparsable blob is treated the same way, with a logged
    /// warning instead of a crash.
    pub fn list(&self) -> Vector<FavoriteMovie> {
        match self.storage.get(FAVORITES_KEY) {
            Some(blob) => match serde_json::from_str(&blob) {
                Ok(favorites) => favorites,
                Err(err) => {
                    log::warn!("ignoring unparsable favorites: {}", err);
                    Vector::new()
                }
            },
            None => Vector::new(),
        }
    }

    /// Append a favorite.  Ids are unique across the collection; adding an
    /// existing one fails and leaves the persisted state untouched.
    pub fn add(&self, favorite: FavoriteMovie) -> Result<(), Error> {
        let mut favorites = self.list();
        if favorites.iter().any(|fav| fav.id == favorite.id) {
            return Err(Error::DuplicateFavorite(favorite.title));
        }
        favorites.push_back(favorite);
        self.persist(&favorites);
        Ok(())
    }

    /// Remove by id, a no-op when the id is not present.
    pub fn remove(&self, id: &str) {
        let mut favorites = self.list();
        let len = favorites.len();
        favorites.retain(|fav| &*fav.id != id);
        if favorites.len() != len {
            self.persist(&favorites);
        }
    }

    /// Replace the comment of an existing entry.  Id and title are the
    /// entry's identity and stay as they were created.
    pub fn update(&self, favorite: FavoriteMovie) -> Result<(), Error> {
        let mut favorites = self.list();
        let index = favorites
            .iter()
            .position(|fav| fav.id == favorite.id)
            .ok_or_else(|| Error::FavoriteNotFound(favorite.id.clone()))?;
        if let Some(entry) = favorites.get_mut(index) {
            entry.comment = favorite.comment;
        }
        self.persist(&favorites);
        Ok(())
    }

    /// The favorite-id set, re-derived from the persisted collection.
    pub fn ids(&self) -> HashSet<Arc<str>> {
        self.list().iter().map(|fav| fav.id.clone()).collect()
    }

    /// Form validation predicate: exact title match, case- and
    /// whitespace-sensitive.
    pub fn is_unique(&self, title: &str) -> bool {
        self.list().iter().all(|fav| &*fav.title != title)
    }

    fn persist(&self, favorites: &Vector<FavoriteMovie>) {
        match serde_json::to_string(favorites) {
            Ok(blob) => self.storage.set(FAVORITES_KEY, &blob),
            Err(err) => log::error!("failed to serialize favorites: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::storage::MemoryStorage;

    use super::*;

    fn store() -> FavoritesStore {
        FavoritesStore::new(Arc::new(MemoryStorage::new()))
    }

    #[test]
    fn add_then_list_round_trips() {
        let store = store();
        store
            .add(FavoriteMovie::from_annotation("Alien", "still holds up"))
            .unwrap();

        let favorites = store.list();
        assert_eq!(favorites.len(), 1);
        assert_eq!(&*favorites[0].title, "Alien");
        assert_eq!(&*favorites[0].comment, "still holds up");
    }

    #[test]
    fn remove_deletes_the_entry() {
        let store = store();
        store.add(FavoriteMovie::from_annotation("Alien", "")).unwrap();
        store.add(FavoriteMovie::from_annotation("Heat", "")).unwrap();

        store.remove("Alien");
        let favorites = store.list();
        assert_eq!(favorites.len(), 1);
        assert_eq!(&*favorites[0].title, "Heat");
    }

    #[test]
    fn remove_of_absent_id_is_a_noop() {
        let store = store();
        store.add(FavoriteMovie::from_annotation("Alien", "")).unwrap();
        store.remove("Blade Runner");
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn duplicate_add_fails_and_leaves_store_unchanged() {
        let store = store();
        store
            .add(FavoriteMovie::from_annotation("Alien", "first"))
            .unwrap();
        let err = store
            .add(FavoriteMovie::from_annotation("Alien", "second"))
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateFavorite(_)));

        let favorites = store.list();
        assert_eq!(favorites.len(), 1);
        assert_eq!(&*favorites[0].comment, "first");
    }

    #[test]
    fn update_replaces_the_comment_in_place() {
        let store = store();
        store
            .add(FavoriteMovie::from_annotation("Alien", "good"))
            .unwrap();
        store
            .update(FavoriteMovie::from_annotation("Alien", "great"))
            .unwrap();

        let favorites = store.list();
        assert_eq!(favorites.len(), 1);
        assert_eq!(&*favorites[0].id, "Alien");
        assert_eq!(&*favorites[0].comment, "great");
    }

    #[test]
    fn update_of_missing_entry_fails() {
        let store = store();
        let err = store
            .update(FavoriteMovie::from_annotation("Alien", "great"))
            .unwrap_err();
        assert!(matches!(err, Error::FavoriteNotFound(_)));
    }

    #[test]
    fn unparsable_blob_reads_as_no_favorites() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(FAVORITES_KEY, "{not json");
        let store = FavoritesStore::new(storage);
        assert!(store.list().is_empty());

        // The store recovers: the next mutation persists a clean blob.
        store.add(FavoriteMovie::from_annotation("Alien", "")).unwrap();
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn uniqueness_is_case_sensitive() {
        let store = store();
        store.add(FavoriteMovie::from_annotation("Alien", "")).unwrap();
        assert!(!store.is_unique("Alien"));
        assert!(store.is_unique("alien"));
        assert!(store.is_unique("Alien "));
    }

    #[test]
    fn ids_are_derived_from_the_collection() {
        let store = store();
        store.add(FavoriteMovie::from_annotation("Alien", "")).unwrap();
        store.add(FavoriteMovie::from_annotation("Heat", "")).unwrap();

        let ids = store.ids();
        assert!(ids.contains("Alien"));
        assert!(ids.contains("Heat"));
        assert_eq!(ids.len(), 2);
    }

    #[test]
    fn persisted_state_is_shared_between_store_handles() {
        let storage: Arc<MemoryStorage> = Arc::new(MemoryStorage::new());
        let first = FavoritesStore::new(storage.clone());
        first.add(FavoriteMovie::from_annotation("Alien", "")).unwrap();

        let second = FavoritesStore::new(storage);
        assert_eq!(second.list().len(), 1);
    }
}
