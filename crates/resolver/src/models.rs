//! Provider payloads and the final record handed back to callers.
//!
//! Every provider field has a default when it is absent or `null`, so decoding only fails when
//! a field has an unusable shape.

use crate::normalizer::extract_year;
use crate::ResolveError;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

const LIST_SEPARATOR: &str = ", ";

/// Accepts a string, a number or `null`; anything else is a decoding error.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(D::Error::custom(format!(
            "expected a string, found {}",
            other
        ))),
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// One hit from the search endpoint.
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct SearchCandidate {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    /// Free text such as `"(2010)"`; may embed the release year.
    #[serde(rename = "description", default, deserialize_with = "lenient_string")]
    pub description_text: String,
}

impl SearchCandidate {
    /// The year found in the description, if there is one.
    pub fn year(&self) -> Option<&str> {
        extract_year(&self.description_text)
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct SearchResults {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub results: Vec<SearchCandidate>,
}

/// The full record returned by the detail endpoint.
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MovieDetail {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub original_title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub year: String,
    #[serde(rename = "directors", default, deserialize_with = "lenient_string")]
    pub directors_raw: String,
    #[serde(rename = "genres", default, deserialize_with = "lenient_string")]
    pub genres_raw: String,
    #[serde(rename = "imDbRating", default, deserialize_with = "lenient_string")]
    pub rating_raw: String,
}

impl MovieDetail {
    pub fn has_rating(&self) -> bool {
        !self.rating_raw.trim().is_empty()
    }
}

/// The answer of the ratings endpoint; only the IMDb rating is of interest.
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Ratings {
    #[serde(rename = "imDb", default, deserialize_with = "lenient_string")]
    pub imdb: String,
}

/// A resolved movie.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MovieRecord {
    pub title: String,
    pub year: i32,
    pub directors: Vec<String>,
    pub genres: Vec<String>,
    #[serde(rename = "imDbRating")]
    pub rating: f64,
}

fn split_list(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return vec![];
    }
    raw.split(LIST_SEPARATOR).map(String::from).collect()
}

fn coerce_year(raw: &str) -> Result<i32, ResolveError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed
        .parse::<i32>()
        .map_err(|_| ResolveError::MalformedRecord(String::from("year")))
}

/// Unparsable or missing ratings count as zero.
fn coerce_rating(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|r| r.is_finite())
        .unwrap_or(0.0)
}

impl TryFrom<MovieDetail> for MovieRecord {
    type Error = ResolveError;

    fn try_from(detail: MovieDetail) -> Result<Self, Self::Error> {
        let year = coerce_year(&detail.year)?;
        let title = if detail.original_title.is_empty() {
            detail.title
        } else {
            detail.original_title
        };

        Ok(MovieRecord {
            title,
            year,
            directors: split_list(&detail.directors_raw),
            genres: split_list(&detail.genres_raw),
            rating: coerce_rating(&detail.rating_raw),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn movie_detail_decodes_provider_payload() {
        // Arrange
        let payload = json!({
            "id": "tt1375666",
            "title": "Inception",
            "originalTitle": "",
            "year": "2010",
            "directors": "Christopher Nolan",
            "genres": "Action, Adventure, Sci-Fi",
            "imDbRating": "8.8",
            "errorMessage": ""
        });

        // Act
        let actual: MovieDetail = serde_json::from_value(payload).unwrap();

        // Assert
        assert_eq!("tt1375666", actual.id);
        assert_eq!("2010", actual.year);
        assert_eq!("Action, Adventure, Sci-Fi", actual.genres_raw);
        assert!(actual.has_rating());
    }

    #[test]
    fn movie_detail_defaults_null_and_missing_fields() {
        // Arrange
        let payload = json!({ "title": "Heat", "year": 1995, "imDbRating": null });

        // Act
        let actual: MovieDetail = serde_json::from_value(payload).unwrap();

        // Assert
        assert_eq!("1995", actual.year);
        assert_eq!("", actual.original_title);
        assert_eq!("", actual.directors_raw);
        assert!(!actual.has_rating());
    }

    #[test]
    fn search_results_treats_null_results_as_empty() {
        // Act
        let actual: SearchResults = serde_json::from_value(json!({ "results": null })).unwrap();

        // Assert
        assert!(actual.results.is_empty());
    }

    #[test]
    fn search_candidate_year_comes_from_description() {
        // Arrange
        let candidate: SearchCandidate = serde_json::from_value(json!({
            "id": "tt0113277",
            "title": "Heat",
            "description": "(1995) Al Pacino, Robert De Niro"
        }))
        .unwrap();

        // Act
        let actual = candidate.year();

        // Assert
        assert_eq!(Some("1995"), actual);
    }

    #[test]
    fn movie_record_prefers_original_title() {
        // Arrange
        let detail = MovieDetail {
            title: String::from("Amelie"),
            original_title: String::from("Le fabuleux destin d'Amélie Poulain"),
            year: String::from("2001"),
            ..MovieDetail::default()
        };

        // Act
        let actual = MovieRecord::try_from(detail).unwrap();

        // Assert
        assert_eq!("Le fabuleux destin d'Amélie Poulain", actual.title);
        assert_eq!(2001, actual.year);
    }

    #[test]
    fn movie_record_splits_lists_in_order() {
        // Arrange
        let detail = MovieDetail {
            title: String::from("The Matrix"),
            year: String::from("1999"),
            directors_raw: String::from("Lana Wachowski, Lilly Wachowski"),
            genres_raw: String::from("Action, Sci-Fi"),
            rating_raw: String::from("8.7"),
            ..MovieDetail::default()
        };

        // Act
        let actual = MovieRecord::try_from(detail).unwrap();

        // Assert
        assert_eq!(vec!["Lana Wachowski", "Lilly Wachowski"], actual.directors);
        assert_eq!(vec!["Action", "Sci-Fi"], actual.genres);
        assert_eq!(8.7, actual.rating);
    }

    #[test]
    fn movie_record_defaults_missing_values() {
        // Arrange
        let detail = MovieDetail {
            title: String::from("Untitled"),
            rating_raw: String::from("N/A"),
            ..MovieDetail::default()
        };

        // Act
        let actual = MovieRecord::try_from(detail).unwrap();

        // Assert
        assert_eq!(0, actual.year);
        assert!(actual.directors.is_empty());
        assert!(actual.genres.is_empty());
        assert_eq!(0.0, actual.rating);
    }

    #[test]
    fn movie_record_rejects_non_numeric_year() {
        // Arrange
        let detail = MovieDetail {
            title: String::from("Heat"),
            year: String::from("nineteen ninety-five"),
            ..MovieDetail::default()
        };

        // Act
        let actual = MovieRecord::try_from(detail);

        // Assert
        assert_eq!(
            Err(ResolveError::MalformedRecord(String::from("year"))),
            actual
        );
    }

    #[test]
    fn movie_record_serializes_outward_field_names() {
        // Arrange
        let record = MovieRecord {
            title: String::from("Inception"),
            year: 2010,
            directors: vec![String::from("Christopher Nolan")],
            genres: vec![String::from("Action")],
            rating: 8.8,
        };

        // Act
        let actual = serde_json::to_value(&record).unwrap();

        // Assert
        assert_eq!(
            json!({
                "title": "Inception",
                "year": 2010,
                "directors": ["Christopher Nolan"],
                "genres": ["Action"],
                "imDbRating": 8.8
            }),
            actual
        );
    }
}
