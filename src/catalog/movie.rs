use serde::Deserialize;

/// Index of a movie in the catalog arena.
///
/// Ids are assigned in load order, which is also the tie-breaker for
/// movies sharing a title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MovieId(pub usize);

/// One (source, value) rating pair, e.g. `("Rotten Tomatoes", "82%")`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Rating {
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Value")]
    pub value: String,
}

impl Rating {
    /// The rating normalized to a percentage.
    pub fn percentage(&self) -> f64 {
        rating_percentage(&self.value)
    }
}

/// A movie record as decoded from the catalog file.
///
/// Multi-value fields (`genre`, `director`, `actors`) are raw comma-delimited
/// strings. Use the split accessors rather than the raw fields when grouping
/// or matching so every caller trims the same way.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Movie {
    pub title: String,
    pub year: String,
    pub rated: String,
    pub released: String,
    pub genre: String,
    pub director: String,
    #[serde(default)]
    pub writer: String,
    pub actors: String,
    pub plot: String,
    pub language: String,
    pub poster: String,
    #[serde(default)]
    pub ratings: Vec<Rating>,
}

impl Movie {
    /// Trimmed genre values.
    pub fn genres(&self) -> impl Iterator<Item = &str> {
        split_field(&self.genre)
    }

    /// Trimmed director values.
    pub fn directors(&self) -> impl Iterator<Item = &str> {
        split_field(&self.director)
    }

    /// Trimmed actor values.
    pub fn actors_list(&self) -> impl Iterator<Item = &str> {
        split_field(&self.actors)
    }
}

/// Split a comma-delimited field and trim each piece.
///
/// An empty field yields nothing. A whitespace-only piece yields `""`,
/// which is kept as a regular value.
pub fn split_field(field: &str) -> impl Iterator<Item = &str> {
    let pieces = if field.is_empty() {
        None
    } else {
        Some(field.split(','))
    };
    pieces.into_iter().flatten().map(str::trim)
}

/// Convert a rating string to a percentage.
///
/// Accepts `"8/10"`-style fractions and `"75%"`-style percentages.
/// Anything else (including a zero denominator) is `0.0`.
pub fn rating_percentage(value: &str) -> f64 {
    if let Some((score, total)) = value.split_once('/') {
        return match (score.trim().parse::<f64>(), total.trim().parse::<f64>()) {
            (Ok(score), Ok(total)) if total != 0.0 => score / total * 100.0,
            _ => 0.0,
        };
    }
    if let Some(number) = value.strip_suffix('%') {
        return number.trim().parse::<f64>().unwrap_or(0.0);
    }
    0.0
}
