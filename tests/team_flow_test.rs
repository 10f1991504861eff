mod common;

use actix_web::{http::StatusCode, test};
use common::{client::TestClient, test_data, TestContext};

#[tokio::test]
async fn test_team_creation_flow_success() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    let (user_id, user_token) = client.create_test_user().await;
    let team_data = test_data::sample_team("Falcons");

    let req = test::TestRequest::post()
        .uri("/teams")
        .insert_header(("Authorization", format!("Bearer {}", user_token)))
        .set_json(&team_data)
        .to_request();

    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["name"], "Falcons");
    assert_eq!(body["captain"], user_id.to_string());
    assert_eq!(body["max_players"], 5);

    let team_id = uuid::Uuid::parse_str(body["id"].as_str().unwrap()).unwrap();

    // the captain is on their own roster
    let team = ctx.db.find_team_for_player(user_id).await.unwrap();
    assert_eq!(team.map(|t| t.id), Some(team_id));
    assert_eq!(ctx.db.member_count(team_id).await.unwrap(), 1);
}

#[tokio::test]
async fn test_team_creation_flow_unauthorized() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/teams")
        .insert_header(("Authorization", "Bearer invalid_token"))
        .set_json(&test_data::sample_team("Nope"))
        .to_request();

    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_team_creation_flow_unverified_user() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    let (_user_id, token) = client.create_unverified_user().await;

    let req = test::TestRequest::post()
        .uri("/teams")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(&test_data::sample_team("Ghosts"))
        .to_request();

    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "USER_NOT_VERIFIED");
}

#[tokio::test]
async fn test_team_creation_flow_duplicate_name() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    let (_a_id, a_token) = client.create_test_user().await;
    let (_b_id, b_token) = client.create_test_user().await;

    let req = test::TestRequest::post()
        .uri("/teams")
        .insert_header(("Authorization", format!("Bearer {}", a_token)))
        .set_json(&test_data::sample_team("Falcons"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CREATED
    );

    let req = test::TestRequest::post()
        .uri("/teams")
        .insert_header(("Authorization", format!("Bearer {}", b_token)))
        .set_json(&test_data::sample_team("Falcons"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "NAME_TAKEN");
}

#[tokio::test]
async fn test_team_creation_flow_already_captain() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    let (user_id, user_token) = client.create_test_user().await;
    client.create_team_for(user_id, "First Team").await;

    let req = test::TestRequest::post()
        .uri("/teams")
        .insert_header(("Authorization", format!("Bearer {}", user_token)))
        .set_json(&test_data::sample_team("Second Team"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "ALREADY_HAS_TEAM");
}

#[tokio::test]
async fn test_team_creation_flow_already_a_player() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    let (captain_id, _captain_token) = client.create_test_user().await;
    let (player_id, player_token) = client.create_test_user().await;
    let team = client.create_team_for(captain_id, "Existing Team").await;
    ctx.db.add_member(team.id, player_id).await.unwrap();

    let req = test::TestRequest::post()
        .uri("/teams")
        .insert_header(("Authorization", format!("Bearer {}", player_token)))
        .set_json(&test_data::sample_team("Breakaway"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "ALREADY_IN_TEAM");
}

#[tokio::test]
async fn test_team_creation_flow_bad_name() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    let (_user_id, user_token) = client.create_test_user().await;

    let too_long = "x".repeat(65);
    for bad_name in ["", " padded ", too_long.as_str()] {
        let req = test::TestRequest::post()
            .uri("/teams")
            .insert_header(("Authorization", format!("Bearer {}", user_token)))
            .set_json(&test_data::sample_team(bad_name))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "BAD_FORMAT");
    }
}

#[tokio::test]
async fn test_team_read_flows() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    let (captain_id, captain_token) = client.create_test_user().await;
    let (_other_id, other_token) = client.create_test_user().await;
    let team = client.create_team_for(captain_id, "Readable").await;

    // by id
    let req = test::TestRequest::get()
        .uri(&format!("/teams/{}", team.id))
        .insert_header(("Authorization", format!("Bearer {}", other_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["name"], "Readable");

    // malformed id
    let req = test::TestRequest::get()
        .uri("/teams/not-a-uuid")
        .insert_header(("Authorization", format!("Bearer {}", other_token)))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );

    // unknown id
    let req = test::TestRequest::get()
        .uri(&format!("/teams/{}", uuid::Uuid::new_v4()))
        .insert_header(("Authorization", format!("Bearer {}", other_token)))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );

    // @me finds the captain's team
    let req = test::TestRequest::get()
        .uri("/teams/@me")
        .insert_header(("Authorization", format!("Bearer {}", captain_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], team.id.to_string());

    // @me for a teamless user
    let req = test::TestRequest::get()
        .uri("/teams/@me")
        .insert_header(("Authorization", format!("Bearer {}", other_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "TEAM_NOT_FOUND");

    // list
    let req = test::TestRequest::get()
        .uri("/teams")
        .insert_header(("Authorization", format!("Bearer {}", other_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_team_update_flow() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    let (captain_id, captain_token) = client.create_test_user().await;
    let (_other_id, other_token) = client.create_test_user().await;
    let team = client.create_team_for(captain_id, "Old Name").await;

    // non-captain can't touch it
    let req = test::TestRequest::put()
        .uri(&format!("/teams/{}", team.id))
        .insert_header(("Authorization", format!("Bearer {}", other_token)))
        .set_json(serde_json::json!({"name": "Hijacked"}))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );

    // partial update: name only
    let req = test::TestRequest::put()
        .uri(&format!("/teams/{}", team.id))
        .insert_header(("Authorization", format!("Bearer {}", captain_token)))
        .set_json(serde_json::json!({"name": "New Name"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["name"], "New Name");
    assert_eq!(body["invitations_open"], true);

    // partial update: flag only, name untouched
    let req = test::TestRequest::put()
        .uri(&format!("/teams/{}", team.id))
        .insert_header(("Authorization", format!("Bearer {}", captain_token)))
        .set_json(serde_json::json!({"invitations_open": false}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["name"], "New Name");
    assert_eq!(body["invitations_open"], false);

    // renaming onto another team's name conflicts
    let (other_captain, _) = client.create_test_user().await;
    client.create_team_for(other_captain, "Taken Name").await;

    let req = test::TestRequest::put()
        .uri(&format!("/teams/{}", team.id))
        .insert_header(("Authorization", format!("Bearer {}", captain_token)))
        .set_json(serde_json::json!({"name": "Taken Name"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // renaming to the current name is a no-op, not a conflict
    let req = test::TestRequest::put()
        .uri(&format!("/teams/{}", team.id))
        .insert_header(("Authorization", format!("Bearer {}", captain_token)))
        .set_json(serde_json::json!({"name": "New Name"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_team_delete_flow() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    let (captain_id, captain_token) = client.create_test_user().await;
    let (player_id, _player_token) = client.create_test_user().await;
    let (_other_id, other_token) = client.create_test_user().await;
    let team = client.create_team_for(captain_id, "Doomed").await;
    ctx.db.add_member(team.id, player_id).await.unwrap();

    // non-captain can't delete
    let req = test::TestRequest::delete()
        .uri(&format!("/teams/{}", team.id))
        .insert_header(("Authorization", format!("Bearer {}", other_token)))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );

    let req = test::TestRequest::delete()
        .uri(&format!("/teams/{}", team.id))
        .insert_header(("Authorization", format!("Bearer {}", captain_token)))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NO_CONTENT
    );

    // team and memberships are gone
    assert!(ctx.db.get_team(team.id).await.is_err());
    assert!(ctx
        .db
        .find_team_for_player(captain_id)
        .await
        .unwrap()
        .is_none());
    assert!(ctx
        .db
        .find_team_for_player(player_id)
        .await
        .unwrap()
        .is_none());
}
