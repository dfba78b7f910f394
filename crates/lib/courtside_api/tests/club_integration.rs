//! Staff and inventory endpoints: reads for any member, writes only for
//! club accounts.

mod common;

use axum::http::StatusCode;
use courtside_core::store::UserStore;
use serde_json::json;
use uuid::Uuid;

use common::{delete, get, json_request, login, send, test_app};

#[tokio::test]
async fn protected_reads_need_a_token() {
    let (_, app) = test_app();
    for uri in ["/api/staff", "/api/inventory"] {
        let (status, _) = send(&app, get(uri, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
    }
}

#[tokio::test]
async fn any_member_can_read() {
    let (store, app) = test_app();
    store.seed_user("member", false);
    let (access, _) = login(&app, "member").await;
    let bearer = format!("Bearer {access}");

    let (status, staff) = send(&app, get("/api/staff", Some(&bearer))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(staff, json!([]));

    let (status, inventory) = send(&app, get("/api/inventory", Some(&bearer))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(inventory, json!([]));
}

#[tokio::test]
async fn regular_members_cannot_mutate() {
    let (store, app) = test_app();
    store.seed_user("captain", true);
    store.seed_user("member", false);
    let (club, _) = login(&app, "captain").await;
    let (member, _) = login(&app, "member").await;

    let (_, coach) = send(
        &app,
        json_request(
            "POST",
            "/api/staff",
            &json!({ "name": "Coach Carter", "role": "coach" }),
            Some(&club),
        ),
    )
    .await;
    let (_, hopper) = send(
        &app,
        json_request(
            "POST",
            "/api/inventory",
            &json!({ "name": "Ball hopper", "category": "training", "quantity": 3 }),
            Some(&club),
        ),
    )
    .await;
    let coach_id = coach["id"].as_str().unwrap();
    let hopper_id = hopper["id"].as_str().unwrap();

    let staff_body = json!({ "name": "Someone", "role": "coach" });
    let item_body = json!({ "name": "Net", "category": "court", "quantity": 1 });
    let attempts = [
        json_request("POST", "/api/staff", &staff_body, Some(&member)),
        json_request("PUT", &format!("/api/staff/{coach_id}"), &staff_body, Some(&member)),
        delete(&format!("/api/staff/{coach_id}"), &member),
        json_request("POST", "/api/inventory", &item_body, Some(&member)),
        json_request("PUT", &format!("/api/inventory/{hopper_id}"), &item_body, Some(&member)),
        delete(&format!("/api/inventory/{hopper_id}"), &member),
    ];
    for req in attempts {
        let uri = req.uri().to_string();
        let method = req.method().clone();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{method} {uri}");
        assert_eq!(body["error"], "forbidden");
    }

    // Nothing changed.
    let (_, staff) = send(&app, get("/api/staff", Some(&format!("Bearer {club}")))).await;
    assert_eq!(staff.as_array().unwrap().len(), 1);
    assert_eq!(staff[0]["name"], "Coach Carter");
}

#[tokio::test]
async fn club_account_manages_inventory() {
    let (store, app) = test_app();
    store.seed_user("captain", true);
    let (club, _) = login(&app, "captain").await;
    let bearer = format!("Bearer {club}");

    let (status, created) = send(
        &app,
        json_request(
            "POST",
            "/api/inventory",
            &json!({ "name": "Racket", "category": "rackets", "quantity": 12, "condition": "good" }),
            Some(&club),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["quantity"], 12);
    let id = created["id"].as_str().unwrap().to_string();

    let (status, updated) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/inventory/{id}"),
            &json!({ "name": "Racket", "category": "rackets", "quantity": 10, "condition": "worn" }),
            Some(&club),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["quantity"], 10);
    assert_eq!(updated["condition"], "worn");

    let (_, listed) = send(&app, get("/api/inventory", Some(&bearer))).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, body) = send(&app, delete(&format!("/api/inventory/{id}"), &club)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, serde_json::Value::Null);

    let (status, _) = send(&app, delete(&format!("/api/inventory/{id}"), &club)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn club_account_manages_staff() {
    let (store, app) = test_app();
    store.seed_user("captain", true);
    let (club, _) = login(&app, "captain").await;

    let (status, created) = send(
        &app,
        json_request(
            "POST",
            "/api/staff",
            &json!({ "name": "Coach Carter", "role": "coach", "email": "carter@club.test" }),
            Some(&club),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap().to_string();

    let (status, updated) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/staff/{id}"),
            &json!({ "name": "Coach Carter", "role": "head coach" }),
            Some(&club),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["role"], "head coach");

    let missing = Uuid::new_v4();
    let (status, _) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/staff/{missing}"),
            &json!({ "name": "Ghost", "role": "coach" }),
            Some(&club),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, delete(&format!("/api/staff/{id}"), &club)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn club_writes_are_validated() {
    let (store, app) = test_app();
    store.seed_user("captain", true);
    let (club, _) = login(&app, "captain").await;

    for (uri, body) in [
        ("/api/staff", json!({ "name": "", "role": "coach" })),
        ("/api/staff", json!({ "name": "Coach" })),
        ("/api/inventory", json!({ "name": "Balls", "category": "balls", "quantity": -1 })),
        ("/api/inventory", json!({ "category": "balls", "quantity": 1 })),
    ] {
        let (status, resp) = send(&app, json_request("POST", uri, &body, Some(&club))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri} {body} gave {resp}");
    }
}

#[tokio::test]
async fn revoking_club_flag_takes_effect_immediately() {
    let (store, app) = test_app();
    let captain = store.seed_user("captain", true);
    let (club, _) = login(&app, "captain").await;
    let item = json!({ "name": "Net", "category": "court", "quantity": 1 });

    let (status, _) = send(&app, json_request("POST", "/api/inventory", &item, Some(&club))).await;
    assert_eq!(status, StatusCode::CREATED);

    // The token is unchanged, but the policy re-reads the record.
    assert!(store.set_club_account(captain.id, false).await.unwrap());

    let (status, _) = send(&app, json_request("POST", "/api/inventory", &item, Some(&club))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
