/// One of the TMDB movie listings the bot can post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Trending,
    Upcoming,
    NowPlaying,
    Popular,
    TopRated,
}

impl Endpoint {
    pub const ALL: [Endpoint; 5] = [
        Endpoint::Trending,
        Endpoint::Upcoming,
        Endpoint::NowPlaying,
        Endpoint::Popular,
        Endpoint::TopRated,
    ];

    /// Path of the listing relative to the TMDB API root.
    pub fn path(self) -> &'static str {
        match self {
            Self::Trending => "trending/movie/day",
            Self::Upcoming => "movie/upcoming",
            Self::NowPlaying => "movie/now_playing",
            Self::Popular => "movie/popular",
            Self::TopRated => "movie/top_rated",
        }
    }

    /// Name of the slash command bound to this listing.
    pub fn command_name(self) -> &'static str {
        match self {
            Self::Trending => "trending",
            Self::Upcoming => "upcoming",
            Self::NowPlaying => "nowplaying",
            Self::Popular => "popular",
            Self::TopRated => "toprated",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Trending => "Get the trending movies on TMDB.",
            Self::Upcoming => "Get a list of movies that are being released soon.",
            Self::NowPlaying => "Get a list of movies that are currently in theatres.",
            Self::Popular => "Get a list of movies ordered by popularity.",
            Self::TopRated => "Get a list of movies ordered by rating.",
        }
    }

    /// Reply used when the listing comes back empty.
    pub fn no_results_notice(self) -> &'static str {
        match self {
            Self::Trending => "No trending movies found.",
            Self::Upcoming => "No upcoming movies found.",
            Self::NowPlaying => "No now-playing movies found.",
            Self::Popular => "No popular movies found.",
            Self::TopRated => "No top-rated movies found.",
        }
    }

    pub fn from_command_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|endpoint| endpoint.command_name() == name)
    }
}

/// A TMDB result, normalized for display.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieRecord {
    pub id: u64,
    pub title: String,
    pub overview: String,
    pub popularity: f64,
    /// Long form, e.g. "March 05, 2024"
    pub release_date: String,
    /// Genre names joined with ", "
    pub genres: String,
    pub backdrop_path: Option<String>,
    pub poster_path: Option<String>,
}

/// Everything needed to render one movie as a message embed.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieCard {
    pub title: String,
    pub description: String,
    pub link: String,
    pub release_date: String,
    pub genres: String,
    pub popularity: String,
    pub image_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub footer_text: String,
    pub footer_icon_url: String,
}

#[cfg(test)]
mod test {
    use super::Endpoint;

    #[test]
    fn command_names_round_trip() {
        for endpoint in Endpoint::ALL {
            assert_eq!(
                Endpoint::from_command_name(endpoint.command_name()),
                Some(endpoint)
            );
        }
        assert_eq!(Endpoint::from_command_name("now_playing"), None);
    }

    #[test]
    fn paths_match_tmdb() {
        assert_eq!(Endpoint::Trending.path(), "trending/movie/day");
        assert_eq!(Endpoint::NowPlaying.path(), "movie/now_playing");
        assert_eq!(Endpoint::TopRated.path(), "movie/top_rated");
    }
}
