//! End-to-end tests: fetch from a mock events API into the calendar view.

use campus_calendar::{
    refresh, CalendarCursor, CalendarView, Direction, EventsClient, LoadState, SidePanel,
};
use campus_core::Config;
use chrono::{NaiveDate, TimeZone, Utc};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_event(id: i64, fecha: &str, titulo: &str, costo: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "fecha": fecha,
        "titulo": titulo,
        "descripcion": format!("Descripción de {}", titulo),
        "costo": costo,
        "evento_url": "campus.example.org/eventos",
        "status_id": 2
    })
}

fn client_for(server: &MockServer) -> EventsClient {
    let mut config = Config::default();
    config.api.base_url = server.uri();
    EventsClient::from_config(&config).unwrap()
}

fn march_2025() -> CalendarCursor {
    CalendarCursor::new(2025, 3).unwrap()
}

#[tokio::test]
async fn test_month_grid_from_api() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/eventos/filtrados"))
        .and(query_param("status", "aprobado"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            test_event(1, "2025-03-05T09:00:00.000Z", "Taller de robótica", "0"),
            test_event(2, "2025-03-05T13:00:00.000Z", "Charla de astronomía", "5.5"),
            test_event(3, "2025-03-05T18:00:00.000Z", "Club de lectura", "0.00"),
            test_event(4, "fecha inválida", "Evento roto", "0"),
            test_event(5, "2025-04-02", "Feria de abril", "10"),
        ])))
        .mount(&mock_server)
        .await;

    let mut view = CalendarView::new(march_2025());
    refresh(&mut view, &client_for(&mock_server)).await;

    // The malformed record is dropped, the rest load.
    assert_eq!(view.event_count(), 4);

    let today = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
    let grid = view.grid(today);
    let busy = grid.day(5).unwrap();
    assert!(busy.is_today);
    assert_eq!(busy.visible_events().len(), 2);
    assert_eq!(busy.visible_events()[0].title, "Taller de robótica");
    assert_eq!(busy.overflow_label().as_deref(), Some("+1 más"));
    assert_eq!(grid.days().map(|d| d.events.len()).sum::<usize>(), 3);

    view.navigate(Direction::Next);
    let april = view.grid(today);
    assert_eq!(april.day(2).map(|d| d.events.len()), Some(1));
}

#[tokio::test]
async fn test_selection_and_side_panel() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/eventos/filtrados"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            test_event(1, "2025-01-01T10:00:00Z", "Pasado", "0"),
            test_event(2, "2025-09-01T10:00:00Z", "Septiembre", "3"),
            test_event(3, "2025-07-01T10:00:00Z", "Julio", "12.5"),
            test_event(4, "2025-08-01T10:00:00Z", "Agosto", "0"),
        ])))
        .mount(&mock_server)
        .await;

    let mut view = CalendarView::new(march_2025());
    refresh(&mut view, &client_for(&mock_server)).await;

    let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
    match view.side_panel(now) {
        SidePanel::Upcoming(events) => {
            let titles: Vec<_> = events.iter().map(|e| e.title.as_str()).collect();
            assert_eq!(titles, vec!["Julio", "Agosto", "Septiembre"]);
        }
        other => panic!("expected upcoming events, got {:?}", other),
    }

    assert!(view.select_by_id("3"));
    view.navigate(Direction::Previous);
    match view.side_panel(now) {
        SidePanel::Detail(detail) => {
            assert_eq!(detail.title, "Julio");
            assert_eq!(detail.cost_label, "$12.50");
            assert_eq!(detail.date_label, "1/7/2025");
            assert_eq!(
                detail.link.map(|u| u.to_string()),
                Some("https://campus.example.org/eventos".to_string())
            );
        }
        other => panic!("expected event detail, got {:?}", other),
    }

    view.clear_selection();
    assert!(matches!(view.side_panel(now), SidePanel::Upcoming(_)));
}

#[tokio::test]
async fn test_failure_then_retry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/eventos/filtrados"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/eventos/filtrados"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut view = CalendarView::new(march_2025());

    refresh(&mut view, &client).await;
    assert!(matches!(view.state(), LoadState::Failed(_)));
    assert!(view.state().can_retry());
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 1);

    refresh(&mut view, &client).await;
    assert_eq!(view.state(), &LoadState::Loaded(Vec::new()));
    assert!(!view.state().can_retry());
    assert_eq!(view.grid(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()).days().count(), 31);
}

#[tokio::test]
async fn test_failed_refresh_sends_one_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/eventos/filtrados"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut view = CalendarView::new(march_2025());
    refresh(&mut view, &client_for(&mock_server)).await;

    assert_eq!(mock_server.received_requests().await.unwrap().len(), 1);
    assert_eq!(
        view.state(),
        &LoadState::Failed(
            "El servidor de eventos no responde. Intenta de nuevo más tarde.".to_string()
        )
    );
}
