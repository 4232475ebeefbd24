use std::sync::Arc;

use im::Vector;
use serde::Deserialize;
use time::Date;

use crate::data::utils;

const POSTER_CDN_BASE: &str = "https://image.tmdb.org/t/p";

fn poster_url(path: Option<&str>, width: u32) -> Option<String> {
    path.map(|path| format!("{}/w{}{}", POSTER_CDN_BASE, width, path))
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Movie {
    #[serde(deserialize_with = "utils::deserialize_numeric_id")]
    pub id: Arc<str>,
    pub title: Arc<str>,
    #[serde(default)]
    pub poster_path: Option<Arc<str>>,
    #[serde(default)]
    pub vote_average: f64,
}

impl Movie {
    /// Poster CDN URL for the requested width, `None` when the movie has no
    /// poster and the shell should show its placeholder.
    pub fn poster_url(&self, width: u32) -> Option<String> {
        poster_url(self.poster_path.as_deref(), width)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Deserialize)]
pub struct Genre {
    #[serde(deserialize_with = "utils::deserialize_numeric_id")]
    pub id: Arc<str>,
    #[serde(rename = "name")]
    pub label: Arc<str>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MovieDetails {
    #[serde(deserialize_with = "utils::deserialize_numeric_id")]
    pub id: Arc<str>,
    pub title: Arc<str>,
    #[serde(default = "utils::default_str", deserialize_with = "utils::deserialize_null_arc_str")]
    pub overview: Arc<str>,
    #[serde(default = "utils::default_str", deserialize_with = "utils::deserialize_null_arc_str")]
    pub tagline: Arc<str>,
    #[serde(default)]
    pub poster_path: Option<Arc<str>>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub genres: Vector<Genre>,
    #[serde(default, deserialize_with = "utils::deserialize_date_option")]
    pub release_date: Option<Date>,
    #[serde(default)]
    pub runtime: Option<u32>,
}

impl MovieDetails {
    pub fn poster_url(&self, width: u32) -> Option<String> {
        poster_url(self.poster_path.as_deref(), width)
    }

    pub fn release_year(&self) -> String {
        self.release_date
            .map(|date| date.year().to_string())
            .unwrap_or_else(|| '-'.to_string())
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct CastMember {
    #[serde(deserialize_with = "utils::deserialize_numeric_id")]
    pub id: Arc<str>,
    pub name: Arc<str>,
    #[serde(default = "utils::default_str", deserialize_with = "utils::deserialize_null_arc_str")]
    pub character: Arc<str>,
    #[serde(default)]
    pub profile_path: Option<Arc<str>>,
}
