use lazy_static::lazy_static;
use std::collections::HashMap;

pub const UNKNOWN_GENRE: &str = "Unknown Genre";

const GENRES: [(u64, &str); 19] = [
    (28, "Action"),
    (12, "Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (99, "Documentary"),
    (18, "Drama"),
    (10751, "Family"),
    (14, "Fantasy"),
    (36, "History"),
    (27, "Horror"),
    (10402, "Music"),
    (9648, "Mystery"),
    (10749, "Romance"),
    (878, "Science Fiction"),
    (10770, "TV Movie"),
    (53, "Thriller"),
    (10752, "War"),
    (37, "Western"),
];

lazy_static! {
    static ref GENRE_TABLE: HashMap<u64, &'static str> = GENRES.iter().copied().collect();
}

pub fn genre_name(id: u64) -> &'static str {
    GENRE_TABLE.get(&id).copied().unwrap_or(UNKNOWN_GENRE)
}

/// Look up each id and join the names with ", ", keeping the input order
pub fn resolve_genres(ids: &[u64]) -> String {
    ids.iter()
        .map(|id| genre_name(*id))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod test {
    use super::{genre_name, resolve_genres, GENRES, UNKNOWN_GENRE};

    #[test]
    fn test_genre_name() {
        assert_eq!(genre_name(28), "Action");
        assert_eq!(genre_name(878), "Science Fiction");
        assert_eq!(genre_name(10770), "TV Movie");
        assert_eq!(genre_name(1), UNKNOWN_GENRE);
    }

    #[test]
    fn test_every_entry_resolves() {
        for (id, name) in GENRES {
            assert_eq!(genre_name(id), name);
        }
    }

    #[test]
    fn test_resolve_genres() {
        assert_eq!(resolve_genres(&[]), "");
        assert_eq!(resolve_genres(&[18]), "Drama");
        assert_eq!(resolve_genres(&[878, 28, 12]), "Science Fiction, Action, Adventure");
        assert_eq!(
            resolve_genres(&[35, 4242, 35]),
            "Comedy, Unknown Genre, Comedy"
        );
    }

    #[test]
    fn test_one_name_per_id() {
        let ids = [28, 0, 53, 99999, 37];
        let resolved = resolve_genres(&ids);
        assert_eq!(resolved.split(", ").count(), ids.len());
    }
}
