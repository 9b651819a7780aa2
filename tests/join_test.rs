//! Integration tests for the seat-assignment flow.

mod helpers;

use axum::http::StatusCode;

/// Count assignment rows for a student name within a class.
async fn assignment_rows(app: &helpers::TestApp, public_id: &str, name: &str) -> i64 {
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM seat_assignments a \
         INNER JOIN students s ON s.id = a.student_id \
         INNER JOIN classes c ON c.id = a.class_id \
         WHERE c.public_id = $1 AND s.name = $2",
    )
    .bind(public_id)
    .bind(name)
    .fetch_one(&app.db_pool)
    .await
    .expect("count assignments")
}

/// Fetch the seat a student currently holds in a class.
async fn seat_of(app: &helpers::TestApp, public_id: &str, name: &str) -> Option<i32> {
    sqlx::query_scalar(
        "SELECT a.seat_number FROM seat_assignments a \
         INNER JOIN students s ON s.id = a.student_id \
         INNER JOIN classes c ON c.id = a.class_id \
         WHERE c.public_id = $1 AND s.name = $2",
    )
    .bind(public_id)
    .bind(name)
    .fetch_one(&app.db_pool)
    .await
    .expect("fetch seat")
}

#[tokio::test]
async fn test_join_assigns_seat_and_returns_roster() {
    let Some(app) = helpers::TestApp::try_new().await else {
        return;
    };
    app.seed_class("IT-JOIN", true).await;

    let response = app
        .request_with_headers(
            "GET",
            "/api/v1/classes/IT-JOIN/join?seat=5",
            None,
            &[("X-Student-Name", "Alice-Join")],
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "body: {:?}", response.body);
    assert_eq!(response.body["success"], true);

    let students = response.body["data"]["students"].as_array().expect("students");
    let alice = students
        .iter()
        .find(|s| s["name"] == "Alice-Join")
        .expect("Alice in roster");
    assert_eq!(alice["seatNumber"], 5);
}

#[tokio::test]
async fn test_rejoining_own_seat_is_idempotent() {
    let Some(app) = helpers::TestApp::try_new().await else {
        return;
    };
    app.seed_class("IT-IDEM", true).await;

    for _ in 0..2 {
        let response = app
            .request_with_headers(
                "GET",
                "/api/v1/classes/IT-IDEM/join?seat=3",
                None,
                &[("X-Student-Name", "Alice-Idem")],
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }

    assert_eq!(assignment_rows(&app, "IT-IDEM", "Alice-Idem").await, 1);
    assert_eq!(seat_of(&app, "IT-IDEM", "Alice-Idem").await, Some(3));
}

#[tokio::test]
async fn test_taken_seat_is_a_conflict() {
    let Some(app) = helpers::TestApp::try_new().await else {
        return;
    };
    app.seed_class("IT-CONF", true).await;

    let first = app
        .request_with_headers(
            "GET",
            "/api/v1/classes/IT-CONF/join?seat=7",
            None,
            &[("X-Student-Name", "Bob-Conf")],
        )
        .await;
    assert_eq!(first.status, StatusCode::OK);

    let second = app
        .request_with_headers(
            "GET",
            "/api/v1/classes/IT-CONF/join?seat=7",
            None,
            &[("X-Student-Name", "Carol-Conf")],
        )
        .await;
    assert_eq!(second.status, StatusCode::CONFLICT);
    assert_eq!(second.body["success"], false);

    // The seat still belongs to its first claimant.
    assert_eq!(seat_of(&app, "IT-CONF", "Bob-Conf").await, Some(7));
    assert_eq!(assignment_rows(&app, "IT-CONF", "Carol-Conf").await, 0);
}

#[tokio::test]
async fn test_rejoin_moves_seat_without_duplicating_row() {
    let Some(app) = helpers::TestApp::try_new().await else {
        return;
    };
    app.seed_class("IT-MOVE", true).await;

    // Start from a clean seat map so re-runs against the same database
    // see the same free seats.
    let response = app
        .request("POST", "/api/v1/classes/IT-MOVE/clear-seats", None)
        .await;
    assert_eq!(response.status, StatusCode::OK);

    for seat in [1, 2] {
        let response = app
            .request_with_headers(
                "GET",
                &format!("/api/v1/classes/IT-MOVE/join?seat={seat}"),
                None,
                &[("X-Student-Name", "Dave-Move")],
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }

    assert_eq!(assignment_rows(&app, "IT-MOVE", "Dave-Move").await, 1);
    assert_eq!(seat_of(&app, "IT-MOVE", "Dave-Move").await, Some(2));

    // Seat 1 is free again for someone else.
    let response = app
        .request_with_headers(
            "GET",
            "/api/v1/classes/IT-MOVE/join?seat=1",
            None,
            &[("X-Student-Name", "Erin-Move")],
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_join_validation_errors() {
    let Some(app) = helpers::TestApp::try_new().await else {
        return;
    };
    app.seed_class("IT-VAL", true).await;

    // Missing seat parameter.
    let response = app.request("GET", "/api/v1/classes/IT-VAL/join", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    // Non-numeric seat.
    let response = app
        .request("GET", "/api/v1/classes/IT-VAL/join?seat=front", None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    // Non-positive seat.
    let response = app
        .request("GET", "/api/v1/classes/IT-VAL/join?seat=0", None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_inactive_class_rejects_join() {
    let Some(app) = helpers::TestApp::try_new().await else {
        return;
    };
    app.seed_class("IT-INACT", false).await;

    let response = app
        .request("GET", "/api/v1/classes/IT-INACT/join?seat=1", None)
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_anonymous_join_uses_guest_placeholder() {
    let Some(app) = helpers::TestApp::try_new().await else {
        return;
    };
    app.seed_class("IT-GUEST", true).await;

    let response = app
        .request("GET", "/api/v1/classes/IT-GUEST/join?seat=11", None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(seat_of(&app, "IT-GUEST", "Guest").await, Some(11));
}

#[tokio::test]
async fn test_clear_seats_preserves_student_identities() {
    let Some(app) = helpers::TestApp::try_new().await else {
        return;
    };
    app.seed_class("IT-CLEAR", true).await;

    for (name, seat) in [("Gia-Clear", 1), ("Hal-Clear", 2), ("Ida-Clear", 3)] {
        let response = app
            .request_with_headers(
                "GET",
                &format!("/api/v1/classes/IT-CLEAR/join?seat={seat}"),
                None,
                &[("X-Student-Name", name)],
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }

    let response = app
        .request("POST", "/api/v1/classes/IT-CLEAR/clear-seats", None)
        .await;
    assert_eq!(response.status, StatusCode::OK);

    for name in ["Gia-Clear", "Hal-Clear", "Ida-Clear"] {
        assert_eq!(assignment_rows(&app, "IT-CLEAR", name).await, 1);
        assert_eq!(seat_of(&app, "IT-CLEAR", name).await, None);
    }
}

#[tokio::test]
async fn test_concurrent_claims_yield_one_winner() {
    let Some(app) = helpers::TestApp::try_new().await else {
        return;
    };
    app.seed_class("IT-RACE", true).await;

    let (first, second) = tokio::join!(
        app.request_with_headers(
            "GET",
            "/api/v1/classes/IT-RACE/join?seat=9",
            None,
            &[("X-Student-Name", "Eve-Race")],
        ),
        app.request_with_headers(
            "GET",
            "/api/v1/classes/IT-RACE/join?seat=9",
            None,
            &[("X-Student-Name", "Frank-Race")],
        ),
    );

    let statuses = [first.status, second.status];
    assert!(
        statuses.contains(&StatusCode::OK),
        "one claim must win: {statuses:?}"
    );
    assert!(
        statuses.contains(&StatusCode::CONFLICT),
        "one claim must lose: {statuses:?}"
    );
}
