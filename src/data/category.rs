/// Movie list categories the catalog can be browsed by.  The table doubles as
/// the route validation set, unknown category segments are rejected before a
/// fetch is issued.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Category {
    pub id: &'static str,
    pub label: &'static str,
}

pub const CATEGORIES: &[Category] = &[
    Category {
        id: "popular",
        label: "Popular",
    },
    Category {
        id: "top_rated",
        label: "Top Rated",
    },
    Category {
        id: "upcoming",
        label: "Upcoming",
    },
];

impl Category {
    pub fn find(id: &str) -> Option<&'static Category> {
        CATEGORIES.iter().find(|category| category.id == id)
    }

    pub fn is_valid(id: &str) -> bool {
        Self::find(id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_known_category() {
        let category = Category::find("top_rated").unwrap();
        assert_eq!(category.label, "Top Rated");
    }

    #[test]
    fn unknown_category_is_rejected() {
        assert!(Category::find("watchlist").is_none());
        assert!(!Category::is_valid("watchlist"));
        assert!(Category::is_valid("popular"));
    }
}
