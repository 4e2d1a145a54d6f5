use axum::http::StatusCode;
use integration_tests::TestApp;
use serde_json::json;

fn join(name: &str, eligibility: &str) -> serde_json::Value {
    json!({ "communityName": "Readers", "fullName": name, "eligibility": eligibility })
}

#[tokio::test]
async fn join_then_appear_in_members() {
    let app = TestApp::spawn().await;
    app.create_community("Readers").await;

    let joined = app.post("/join-community", join("bob", "yes")).await;
    assert_eq!(joined.status, StatusCode::OK);
    assert_eq!(joined.body["message"], "Join request submitted successfully");
    assert!(joined.body.get("redirect").is_none());

    let members = app.get("/community-members?communityName=Readers").await;
    assert_eq!(members.status, StatusCode::OK);
    assert_eq!(members.body, json!([{ "fullName": "bob" }]));
}

#[tokio::test]
async fn rejoining_returns_redirect_without_duplicate() {
    let app = TestApp::spawn().await;
    app.create_community("Readers").await;
    app.post("/join-community", join("bob", "yes")).await;

    let again = app.post("/join-community", join("bob", "yes")).await;
    assert_eq!(again.status, StatusCode::OK);
    assert_eq!(again.body["message"], "Already a member");
    assert_eq!(again.body["redirect"], "/community/Readers");

    let members = app.get("/community-members?communityName=Readers").await;
    assert_eq!(members.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn joining_unknown_community_is_not_found_regardless_of_eligibility() {
    let app = TestApp::spawn().await;
    for eligibility in ["yes", "no", "maybe"] {
        let response = app
            .post(
                "/join-community",
                json!({ "communityName": "Ghosts", "fullName": "bob", "eligibility": eligibility }),
            )
            .await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "eligibility {eligibility}");
    }
}

#[tokio::test]
async fn existing_member_answering_no_is_redirected() {
    let app = TestApp::spawn().await;
    app.create_community("Readers").await;
    app.post("/join-community", join("bob", "yes")).await;

    let again = app.post("/join-community", join("bob", "no")).await;
    assert_eq!(again.status, StatusCode::OK);
    assert_eq!(again.body["message"], "Already a member");
    assert_eq!(again.body["redirect"], "/community/Readers");

    // the original "yes" record is untouched
    assert_eq!(
        app.get("/community-members?communityName=Readers").await.body,
        json!([{ "fullName": "bob" }])
    );
}

#[tokio::test]
async fn redirect_percent_encodes_the_community_name() {
    let app = TestApp::spawn().await;
    app.create_community("River Cleanup").await;
    let body = json!({ "communityName": "River Cleanup", "fullName": "bob", "eligibility": "yes" });
    app.post("/join-community", body.clone()).await;

    let again = app.post("/join-community", body).await;
    assert_eq!(again.body["redirect"], "/community/River%20Cleanup");
}

#[tokio::test]
async fn ineligible_join_is_rejected_by_default() {
    let app = TestApp::spawn().await;
    app.create_community("Readers").await;

    let response = app.post("/join-community", join("carol", "no")).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        app.get("/community-members?communityName=Readers").await.body,
        json!([])
    );
}

#[tokio::test]
async fn ineligible_join_is_recorded_but_not_listed_when_allowed() {
    let app = TestApp::with_options(false).await;
    app.create_community("Readers").await;

    let response = app.post("/join-community", join("carol", "no")).await;
    assert_eq!(response.status, StatusCode::OK);
    app.post("/join-community", join("bob", "yes")).await;

    assert_eq!(
        app.get("/community-members?communityName=Readers").await.body,
        json!([{ "fullName": "bob" }])
    );

    // carol's record exists, so a second attempt is recognised
    let again = app.post("/join-community", join("carol", "no")).await;
    assert_eq!(again.body["message"], "Already a member");
}

#[tokio::test]
async fn missing_or_invalid_fields_are_bad_request() {
    let app = TestApp::spawn().await;
    app.create_community("Readers").await;

    let missing = app
        .post("/join-community", json!({ "communityName": "Readers", "fullName": "bob" }))
        .await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);

    let invalid = app.post("/join-community", join("bob", "maybe")).await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn members_of_unknown_community_is_empty_and_param_is_required() {
    let app = TestApp::spawn().await;
    assert_eq!(
        app.get("/community-members?communityName=Ghosts").await.body,
        json!([])
    );
    assert_eq!(
        app.get("/community-members").await.status,
        StatusCode::BAD_REQUEST
    );
}
