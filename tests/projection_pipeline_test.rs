use props_scraper::error::ScraperError;
use props_scraper::infra::{InMemoryPublisher, StaticSourceFetcher};
use props_scraper::pipeline::ProjectionPipeline;
use props_scraper::projections::CrossReferenceJoiner;
use serde_json::json;

const API: &str = "https://partner-api.example.com/projections?per_page=1000";

fn payload() -> String {
    json!({
        "data": [
            {
                "id": "p1",
                "type": "projection",
                "attributes": {"stat_type": "Points", "line_score": 20.5, "description": "SEA", "odds_type": "standard"},
                "relationships": {"new_player": {"data": {"id": "10", "type": "new_player"}}}
            },
            {
                "id": "p2",
                "type": "projection",
                "attributes": {"stat_type": "Pts+Rebs", "line_score": 31, "description": "CON", "odds_type": "goblin"},
                "relationships": {"new_player": {"data": {"id": "11", "type": "new_player"}}}
            },
            {
                "id": "p3",
                "type": "projection",
                "attributes": {"stat_type": "Points", "line_score": 27.5, "description": "BOS", "odds_type": "standard"},
                "relationships": {"new_player": {"data": {"id": "12", "type": "new_player"}}}
            },
            {
                "id": "p4",
                "type": "projection",
                "attributes": {"stat_type": "Rebounds", "line_score": 7.5},
                "relationships": {"new_player": {"data": {"id": "999", "type": "new_player"}}}
            },
            {
                "id": "p5",
                "type": "projection",
                "attributes": {"stat_type": "Assists", "line_score": 4.5, "description": "LVA", "odds_type": "demon"},
                "relationships": {"new_player": {"data": {"id": "13", "type": "new_player"}}}
            }
        ],
        "included": [
            {"id": "10", "type": "new_player", "attributes": {"name": "A. Wilson", "team": "LVA", "league": "WNBA"}},
            {"id": "11", "type": "new_player", "attributes": {"name": "A. Wilson + B. Stewart", "team": "LVA/NYL", "league": "WNBA"}},
            {"id": "12", "type": "new_player", "attributes": {"name": "L. James", "team": "LAL", "league": "NBA"}},
            {"id": "13", "type": "new_player", "attributes": {"name": "B. Stewart", "team": "NYL", "league": "WNBA"}},
            {"id": "g1", "type": "game", "attributes": {"start_time": "2025-07-01T19:00:00-04:00"}},
            {"id": "l1", "type": "league"}
        ]
    })
    .to_string()
}

fn pipeline() -> ProjectionPipeline {
    ProjectionPipeline::new(API, CrossReferenceJoiner::new("WNBA"))
}

#[tokio::test]
async fn test_projections_join_and_filter() {
    let fetcher = StaticSourceFetcher::new().with_response(API, &payload());
    let publisher = InMemoryPublisher::new();

    let report = pipeline().run(&fetcher, &publisher).await.unwrap();
    assert_eq!(report.players_indexed, 4);
    assert_eq!(report.projections_total, 5);
    assert_eq!(report.unknown_players, 1);
    assert_eq!(report.rows_published, 2);

    let table = publisher.contents().unwrap();
    assert_eq!(table.header, vec!["Name", "League", "Team", "Stat", "Versus", "Prizepicks", "Odds Type"]);
    assert_eq!(table.rows[0], vec!["A. Wilson", "WNBA", "LVA", "Points", "SEA", "20.5", "standard"]);
    assert_eq!(table.rows[1], vec!["B. Stewart", "WNBA", "NYL", "Assists", "LVA", "4.5", "demon"]);
}

#[tokio::test]
async fn test_other_league_target() {
    let fetcher = StaticSourceFetcher::new().with_response(API, &payload());
    let publisher = InMemoryPublisher::new();

    let pipeline = ProjectionPipeline::new(API, CrossReferenceJoiner::new("NBA"));
    let report = pipeline.run(&fetcher, &publisher).await.unwrap();
    assert_eq!(report.rows_published, 1);
    assert_eq!(publisher.contents().unwrap().value(0, "Name"), Some("L. James"));
}

#[tokio::test]
async fn test_malformed_payload_aborts_before_publish() {
    let fetcher = StaticSourceFetcher::new().with_response(API, "<html>rate limited</html>");
    let publisher = InMemoryPublisher::new();

    let err = pipeline().run(&fetcher, &publisher).await.unwrap_err();
    assert!(matches!(err, ScraperError::Json(_)));
    assert_eq!(publisher.publish_count(), 0);
}

#[tokio::test]
async fn test_fetch_failure_aborts_run() {
    let fetcher = StaticSourceFetcher::new();
    let publisher = InMemoryPublisher::new();

    let err = pipeline().run(&fetcher, &publisher).await.unwrap_err();
    assert!(matches!(err, ScraperError::Fetch { .. }));
    assert!(publisher.contents().is_none());
}
