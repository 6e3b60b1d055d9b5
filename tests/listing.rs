use marquee::{
    config::{PresenterConfig, TmdbConfig},
    error::SendError,
    listing::{run_listing, ListingOutcome},
    models::{Endpoint, MovieCard},
    presenter::{CardSink, Delivery, Presenter},
    tmdb::TmdbClient,
};
use serde_json::{json, Value};
use serenity::async_trait;
use std::{path::PathBuf, sync::Mutex, time::Duration};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Clone, PartialEq)]
enum Sent {
    Card(MovieCard),
    Text(String),
}

#[derive(Default)]
struct RecordingSink {
    sent: Mutex<Vec<Sent>>,
}

impl RecordingSink {
    fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    fn cards(&self) -> Vec<MovieCard> {
        self.sent()
            .into_iter()
            .filter_map(|sent| match sent {
                Sent::Card(card) => Some(card),
                Sent::Text(_) => None,
            })
            .collect()
    }
}

#[async_trait]
impl CardSink for RecordingSink {
    async fn send_card(&self, card: &MovieCard) -> Result<(), SendError> {
        self.sent.lock().unwrap().push(Sent::Card(card.clone()));
        Ok(())
    }

    async fn send_text(&self, text: &str) -> Result<(), SendError> {
        self.sent.lock().unwrap().push(Sent::Text(text.to_owned()));
        Ok(())
    }
}

fn client(server: &MockServer) -> TmdbClient {
    client_with_timeout(server, Duration::from_secs(10))
}

fn client_with_timeout(server: &MockServer, timeout: Duration) -> TmdbClient {
    TmdbClient::new(TmdbConfig {
        api_key: "test-key".to_owned(),
        base_url: server.uri(),
        timeout,
    })
    .unwrap()
}

fn presenter() -> Presenter {
    Presenter::new(&PresenterConfig {
        asset_url: "https://image.tmdb.org/t/p/w500".to_owned(),
        logo_path: PathBuf::from("assets/tmdb-logo.png"),
    })
}

fn movie(id: u64, title: &str) -> Value {
    json!({
        "adult": false,
        "id": id,
        "title": title,
        "overview": format!("All about {}.", title),
        "popularity": 250.75,
        "release_date": "2023-07-19",
        "genre_ids": [18, 36],
        "backdrop_path": format!("/{}-backdrop.jpg", id),
        "poster_path": format!("/{}-poster.jpg", id)
    })
}

#[tokio::test]
async fn test_popular_sends_one_card_per_movie_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/popular"))
        .and(query_param("api_key", "test-key"))
        .and(query_param("language", "en-US"))
        .and(query_param("include_adult", "false"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1,
            "results": [
                movie(872585, "Oppenheimer"),
                movie(346698, "Barbie"),
                movie(569094, "Spider-Man: Across the Spider-Verse"),
            ],
            "total_pages": 1,
            "total_results": 3
        })))
        .expect(1)
        .mount(&server)
        .await;

    let sink = RecordingSink::default();
    let outcome = run_listing(&client(&server), &presenter(), Endpoint::Popular, &sink).await;

    assert_eq!(outcome, ListingOutcome::Delivered(Delivery { sent: 3, failed: 0 }));
    let cards = sink.cards();
    assert_eq!(sink.sent().len(), 3);
    let titles: Vec<&str> = cards.iter().map(|card| card.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Oppenheimer", "Barbie", "Spider-Man: Across the Spider-Verse"]
    );
    for (card, id) in cards.iter().zip([872585, 346698, 569094]) {
        assert_eq!(card.link, format!("https://www.themoviedb.org/movie/{}", id));
        assert_eq!(card.release_date, "July 19, 2023");
        assert_eq!(card.genres, "Drama, History");
        assert_eq!(
            card.thumbnail_url,
            Some(format!("https://image.tmdb.org/t/p/w500/{}-poster.jpg", id))
        );
    }

    // One timestamp for the whole batch
    assert!(cards[0]
        .footer_text
        .starts_with("Fetched from The Movie Database (TMDB): "));
    assert!(cards.iter().all(|card| card.footer_text == cards[0].footer_text));
}

#[tokio::test]
async fn test_trending_uses_the_trending_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/trending/movie/day"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "results": [movie(1, "Heat")] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let sink = RecordingSink::default();
    let outcome = run_listing(&client(&server), &presenter(), Endpoint::Trending, &sink).await;

    assert_eq!(outcome, ListingOutcome::Delivered(Delivery { sent: 1, failed: 0 }));
}

#[tokio::test]
async fn test_only_the_first_ten_movies_are_sent() {
    let server = MockServer::start().await;
    let results: Vec<Value> = (1..=20).map(|id| movie(id, &format!("Movie {}", id))).collect();
    Mock::given(method("GET"))
        .and(path("/movie/top_rated"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": results })))
        .mount(&server)
        .await;

    let sink = RecordingSink::default();
    run_listing(&client(&server), &presenter(), Endpoint::TopRated, &sink).await;

    let links: Vec<String> = sink.cards().into_iter().map(|card| card.link).collect();
    let expected: Vec<String> = (1..=10)
        .map(|id| format!("https://www.themoviedb.org/movie/{}", id))
        .collect();
    assert_eq!(links, expected);
}

#[tokio::test]
async fn test_server_error_replies_with_one_error_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/popular"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .expect(1)
        .mount(&server)
        .await;

    let sink = RecordingSink::default();
    let outcome = run_listing(&client(&server), &presenter(), Endpoint::Popular, &sink).await;

    assert_eq!(outcome, ListingOutcome::Failed);
    match sink.sent().as_slice() {
        [Sent::Text(text)] => {
            assert!(text.starts_with("Error: Failed to fetch data:"), "{}", text);
            assert!(text.contains("500"), "{}", text);
        }
        other => panic!("expected a single error message, got {:?}", other),
    }
}

#[tokio::test]
async fn test_error_page_is_shortened_to_fit_a_message() {
    let server = MockServer::start().await;
    let page = format!("<html>{}</html>", "x".repeat(5000));
    Mock::given(method("GET"))
        .and(path("/movie/upcoming"))
        .respond_with(ResponseTemplate::new(502).set_body_string(page))
        .mount(&server)
        .await;

    let sink = RecordingSink::default();
    let outcome = run_listing(&client(&server), &presenter(), Endpoint::Upcoming, &sink).await;

    assert_eq!(outcome, ListingOutcome::Failed);
    match sink.sent().as_slice() {
        [Sent::Text(text)] => {
            assert!(text.contains("502 Bad Gateway"), "{}", text);
            assert!(text.chars().count() <= 2000);
        }
        other => panic!("expected a single error message, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_results_replies_with_no_results_notice() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/upcoming"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "page": 1 })))
        .mount(&server)
        .await;

    let sink = RecordingSink::default();
    let outcome = run_listing(&client(&server), &presenter(), Endpoint::Upcoming, &sink).await;

    assert_eq!(outcome, ListingOutcome::NoResults);
    assert_eq!(
        sink.sent(),
        vec![Sent::Text("No upcoming movies found.".to_owned())]
    );
}

#[tokio::test]
async fn test_other_success_statuses_are_treated_as_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/now_playing"))
        .respond_with(
            ResponseTemplate::new(203).set_body_json(json!({ "results": [movie(1, "Heat")] })),
        )
        .mount(&server)
        .await;

    let sink = RecordingSink::default();
    let outcome = run_listing(&client(&server), &presenter(), Endpoint::NowPlaying, &sink).await;

    assert_eq!(outcome, ListingOutcome::NoResults);
    assert_eq!(
        sink.sent(),
        vec![Sent::Text("No now-playing movies found.".to_owned())]
    );
}

#[tokio::test]
async fn test_malformed_payload_sends_no_cards() {
    let server = MockServer::start().await;
    let mut broken = movie(2, "Broken");
    broken["release_date"] = json!("someday");
    Mock::given(method("GET"))
        .and(path("/movie/popular"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [movie(1, "Fine"), broken]
        })))
        .mount(&server)
        .await;

    let sink = RecordingSink::default();
    let outcome = run_listing(&client(&server), &presenter(), Endpoint::Popular, &sink).await;

    assert_eq!(outcome, ListingOutcome::Failed);
    assert_eq!(
        sink.sent(),
        vec![Sent::Text(
            "Error: TMDB returned data that could not be read.".to_owned()
        )]
    );
}

#[tokio::test]
async fn test_timeout_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/popular"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "results": [] }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let sink = RecordingSink::default();
    let client = client_with_timeout(&server, Duration::from_millis(100));
    let outcome = run_listing(&client, &presenter(), Endpoint::Popular, &sink).await;

    assert_eq!(outcome, ListingOutcome::Failed);
    match sink.sent().as_slice() {
        [Sent::Text(text)] => assert!(text.starts_with("Error: Failed to fetch data:"), "{}", text),
        other => panic!("expected a single error message, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_returns_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/popular"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "results": [movie(7, "Se7en")] })),
        )
        .mount(&server)
        .await;

    let movies = client(&server).fetch(Endpoint::Popular).await.unwrap();

    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].id, 7);
    assert_eq!(movies[0].title, "Se7en");
    assert_eq!(movies[0].overview, "All about Se7en.");
    assert_eq!(movies[0].popularity, 250.75);
    assert_eq!(movies[0].backdrop_path.as_deref(), Some("/7-backdrop.jpg"));
}
