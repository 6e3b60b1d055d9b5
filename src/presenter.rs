use serenity::async_trait;
use tracing::{error, info};

use crate::{
    config::PresenterConfig,
    error::SendError,
    genres::UNKNOWN_GENRE,
    models::{MovieCard, MovieRecord},
};

pub const MOVIE_PAGE_URL: &str = "https://www.themoviedb.org/movie";
/// File name the logo is attached under, so the footer can reference it.
pub const LOGO_FILENAME: &str = "tmdb-logo.png";

/// Somewhere cards and plain text replies can be delivered to.
///
/// Each call completes before the next one is made; implementations don't need to handle
/// overlapping sends for the same invocation.
#[async_trait]
pub trait CardSink: Send + Sync {
    async fn send_card(&self, card: &MovieCard) -> Result<(), SendError>;

    async fn send_text(&self, text: &str) -> Result<(), SendError>;
}

/// How many cards of a batch made it to the channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Delivery {
    pub sent: usize,
    pub failed: usize,
}

#[derive(Debug, Clone)]
pub struct Presenter {
    asset_url: String,
}

impl Presenter {
    pub fn new(config: &PresenterConfig) -> Self {
        Self {
            asset_url: config.asset_url.trim_end_matches('/').to_owned(),
        }
    }

    pub fn build_card(&self, record: &MovieRecord, fetched_at: &str) -> MovieCard {
        let genres = if record.genres.is_empty() {
            UNKNOWN_GENRE.to_owned()
        } else {
            record.genres.clone()
        };
        MovieCard {
            title: record.title.clone(),
            description: record.overview.clone(),
            link: format!("{}/{}", MOVIE_PAGE_URL, record.id),
            release_date: record.release_date.clone(),
            genres,
            popularity: record.popularity.to_string(),
            image_url: self.asset(record.backdrop_path.as_deref()),
            thumbnail_url: self.asset(record.poster_path.as_deref()),
            footer_text: format!("Fetched from The Movie Database (TMDB): {}", fetched_at),
            footer_icon_url: format!("attachment://{}", LOGO_FILENAME),
        }
    }

    fn asset(&self, path: Option<&str>) -> Option<String> {
        path.map(|path| format!("{}{}", self.asset_url, path))
    }

    /// Send one card per record, in order, waiting for each send before starting the next.
    ///
    /// A card that fails to send is logged and skipped; the rest of the batch still goes out.
    pub async fn render<S>(&self, records: &[MovieRecord], fetched_at: &str, sink: &S) -> Delivery
    where
        S: CardSink + ?Sized,
    {
        let mut delivery = Delivery::default();
        for record in records {
            let card = self.build_card(record, fetched_at);
            match sink.send_card(&card).await {
                Ok(()) => delivery.sent += 1,
                Err(why) => {
                    error!(movie_id = record.id, "Failed to send movie card: {}", why);
                    delivery.failed += 1;
                }
            }
        }
        info!(sent = delivery.sent, failed = delivery.failed, "Delivered movie cards");
        delivery
    }
}
