use tracing::{error, info, warn};

use crate::{
    dates::fetched_at_now,
    models::Endpoint,
    presenter::{CardSink, Delivery, Presenter},
    tmdb::TmdbClient,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingOutcome {
    Delivered(Delivery),
    NoResults,
    Failed,
}

/// Fetch a listing and post it: one card per movie, the listing's "no results" notice when it
/// is empty, or an error message when the fetch fails. Nothing is retried.
pub async fn run_listing<S>(
    client: &TmdbClient,
    presenter: &Presenter,
    endpoint: Endpoint,
    sink: &S,
) -> ListingOutcome
where
    S: CardSink + ?Sized,
{
    let movies = match client.fetch(endpoint).await {
        Ok(movies) => movies,
        Err(why) => {
            warn!(endpoint = endpoint.command_name(), "Failed to fetch movies: {}", why);
            reply(sink, &why.user_message()).await;
            return ListingOutcome::Failed;
        }
    };

    if movies.is_empty() {
        info!(endpoint = endpoint.command_name(), "No movies returned");
        reply(sink, endpoint.no_results_notice()).await;
        return ListingOutcome::NoResults;
    }

    // Same timestamp on every card of the batch
    let fetched_at = fetched_at_now();
    ListingOutcome::Delivered(presenter.render(&movies, &fetched_at, sink).await)
}

async fn reply<S>(sink: &S, text: &str)
where
    S: CardSink + ?Sized,
{
    if let Err(why) = sink.send_text(text).await {
        error!("Failed to send reply: {}", why);
    }
}
