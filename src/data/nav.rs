use std::sync::Arc;

/// Parsed navigation parameters, exactly one variant per route change.  The
/// routing mechanics live in the shell; this is the query the data layer
/// fetches for.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Nav {
    Category(Arc<str>),
    Genre(Arc<str>),
    Search(Arc<str>),
}

impl Default for Nav {
    fn default() -> Self {
        // The shell redirects the root route to the popular listing.
        Self::Category("popular".into())
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Heading {
    pub title: Arc<str>,
    pub subtitle: Arc<str>,
}
