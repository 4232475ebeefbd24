use crate::error::Error;

/// Remote data tracked through its loading lifecycle.  `D` is the request
/// payload kept while the fetch is in flight and compared again at completion
/// time, so a completion belonging to a superseded request never lands.
#[derive(Clone, Debug)]
pub enum Fetch<T, D = (), E = Error> {
    Idle,
    Loading(D),
    Loaded(T),
    Failed(E),
}

#[derive(Eq, PartialEq, Debug)]
pub enum FetchStatus {
    Idle,
    Loading,
    Loaded,
    Failed,
}

impl<T, D, E> Fetch<T, D, E> {
    pub fn status(&self) -> FetchStatus {
        match self {
            Self::Idle => FetchStatus::Idle,
            Self::Loading(_) => FetchStatus::Loading,
            Self::Loaded(_) => FetchStatus::Loaded,
            Self::Failed(_) => FetchStatus::Failed,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading(_))
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn is_loading_for(&self, req: &D) -> bool
    where
        D: PartialEq,
    {
        matches!(self, Self::Loading(r) if r == req)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(val) => Some(val),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&E> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::Idle;
    }

    /// Start a fetch, dropping any previously loaded data.
    pub fn begin(&mut self, req: D) {
        *self = Self::Loading(req);
    }

    /// Apply a completed fetch.  The result lands only while still loading
    /// the same request; anything else is ignored.
    pub fn finish(&mut self, (req, res): (D, Result<T, E>))
    where
        D: PartialEq,
    {
        if self.is_loading_for(&req) {
            *self = match res {
                Ok(val) => Self::Loaded(val),
                Err(err) => Self::Failed(err),
            };
        }
    }
}

impl<T, D, E> Default for Fetch<T, D, E> {
    fn default() -> Self {
        Self::Idle
    }
}
