use acct_auth::Crypto;
use acct_auth::Directory;
use acct_auth::Memory;
use acct_auth::Profile;
use acct_auth::TokenResponse;
use acct_core::Unique;
use actix_web::App;
use actix_web::http::StatusCode;
use actix_web::test;
use actix_web::web;
use serde_json::json;

const SECRET: &[u8] = b"integration-secret";

macro_rules! app {
    ($directory:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(Crypto::new(SECRET)))
                .app_data($directory.clone())
                .configure(acct_server::routes::<Memory>),
        )
        .await
    };
}

macro_rules! register {
    ($app:expr, $email:expr, $password:expr) => {{
        let req = test::TestRequest::post()
            .uri("/users")
            .set_json(json!({ "name": "someone", "email": $email, "password": $password }))
            .to_request();
        let res = test::call_service(&$app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let profile: Profile = test::read_body_json(res).await;
        profile
    }};
}

macro_rules! login {
    ($app:expr, $email:expr, $password:expr) => {{
        let req = test::TestRequest::post()
            .uri("/login")
            .set_json(json!({ "email": $email, "password": $password }))
            .to_request();
        let res = test::call_service(&$app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: TokenResponse = test::read_body_json(res).await;
        body.token
    }};
}

fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

async fn promote(directory: &Memory, email: &str) {
    let account = directory.find_by_email(email).await.unwrap().unwrap();
    let patch = acct_auth::Patch {
        admin: Some(true),
        ..Default::default()
    };
    directory.update(account.id(), &patch).await.unwrap();
}

#[actix_web::test]
async fn register_login_profile_scenario() {
    let directory = web::Data::new(Memory::default());
    let app = app!(directory);
    let other = register!(app, "b@x.com", "pw2");
    let mine = register!(app, "a@x.com", "pw1");
    assert_eq!(mine.email, "a@x.com");
    let token = login!(app, "a@x.com", "pw1");

    let req = test::TestRequest::get()
        .uri("/users/profile")
        .insert_header(bearer(&token))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["email"], "a@x.com");
    assert_eq!(body["id"], mine.id.as_str());
    assert!(body.get("password").is_none());
    assert!(body.get("hashword").is_none());

    let req = test::TestRequest::patch()
        .uri(&format!("/users/{}", other.id))
        .insert_header(bearer(&token))
        .set_json(json!({ "name": "hijacked" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn duplicate_registration_conflicts() {
    let directory = web::Data::new(Memory::default());
    let app = app!(directory);
    register!(app, "a@x.com", "pw1");
    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(json!({ "name": "again", "email": "a@x.com", "password": "pw9" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let stored = directory.find_by_email("a@x.com").await.unwrap().unwrap();
    assert!(stored.hashword() != "pw1");
    assert!(acct_auth::password::verify("pw1", stored.hashword()));
}

#[actix_web::test]
async fn login_failures_share_one_message() {
    let directory = web::Data::new(Memory::default());
    let app = app!(directory);
    register!(app, "a@x.com", "pw1");
    let mut bodies = Vec::new();
    for (email, password) in [("a@x.com", "wrong"), ("nobody@x.com", "pw1")] {
        let req = test::TestRequest::post()
            .uri("/login")
            .set_json(json!({ "email": email, "password": password }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = test::read_body_json(res).await;
        bodies.push(body);
    }
    assert_eq!(bodies[0], bodies[1]);
}

#[actix_web::test]
async fn authentication_failures_are_unauthorized() {
    let directory = web::Data::new(Memory::default());
    let app = app!(directory);
    let req = test::TestRequest::get().uri("/users/profile").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/users/profile")
        .insert_header(bearer("garbage"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let forged = Crypto::new(b"someone-else")
        .encode(&acct_auth::Claims::new(acct_core::ID::default(), acct_core::now()))
        .unwrap();
    let req = test::TestRequest::get()
        .uri("/users")
        .insert_header(bearer(&forged))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn listing_is_admin_only() {
    let directory = web::Data::new(Memory::default());
    let app = app!(directory);
    register!(app, "a@x.com", "pw1");
    register!(app, "root@x.com", "pw0");
    promote(&directory, "root@x.com").await;

    let member = login!(app, "a@x.com", "pw1");
    let req = test::TestRequest::get()
        .uri("/users")
        .insert_header(bearer(&member))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let admin = login!(app, "root@x.com", "pw0");
    let req = test::TestRequest::get()
        .uri("/users")
        .insert_header(bearer(&admin))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let profiles: Vec<Profile> = test::read_body_json(res).await;
    assert_eq!(profiles.len(), 2);
}

#[actix_web::test]
async fn owner_updates_and_deletes_self() {
    let directory = web::Data::new(Memory::default());
    let app = app!(directory);
    let mine = register!(app, "a@x.com", "pw1");
    let token = login!(app, "a@x.com", "pw1");

    let req = test::TestRequest::patch()
        .uri(&format!("/users/{}", mine.id))
        .insert_header(bearer(&token))
        .set_json(json!({ "name": "renamed", "password": "pw2" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Profile = test::read_body_json(res).await;
    assert_eq!(updated.name, "renamed");
    login!(app, "a@x.com", "pw2");

    let req = test::TestRequest::patch()
        .uri(&format!("/users/{}", mine.id))
        .insert_header(bearer(&token))
        .set_json(json!({ "admin": true }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::delete()
        .uri(&format!("/users/{}", mine.id))
        .insert_header(bearer(&token))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    // token still verifies, but its account is gone
    let req = test::TestRequest::get()
        .uri("/users/profile")
        .insert_header(bearer(&token))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn admin_acts_on_anyone() {
    let directory = web::Data::new(Memory::default());
    let app = app!(directory);
    let victim = register!(app, "a@x.com", "pw1");
    register!(app, "root@x.com", "pw0");
    promote(&directory, "root@x.com").await;
    let admin = login!(app, "root@x.com", "pw0");

    let req = test::TestRequest::patch()
        .uri(&format!("/users/{}", victim.id))
        .insert_header(bearer(&admin))
        .set_json(json!({ "admin": true }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Profile = test::read_body_json(res).await;
    assert!(updated.admin);

    let req = test::TestRequest::delete()
        .uri(&format!("/users/{}", victim.id))
        .insert_header(bearer(&admin))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::delete()
        .uri(&format!("/users/{}", victim.id))
        .insert_header(bearer(&admin))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn member_cannot_reach_other_ids() {
    let directory = web::Data::new(Memory::default());
    let app = app!(directory);
    register!(app, "a@x.com", "pw1");
    let token = login!(app, "a@x.com", "pw1");
    let req = test::TestRequest::delete()
        .uri(&format!("/users/{}", uuid_like()))
        .insert_header(bearer(&token))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

fn uuid_like() -> String {
    acct_core::ID::<acct_auth::Account>::default().to_string()
}

#[actix_web::test]
async fn health_answers_ok() {
    let directory = web::Data::new(Memory::default());
    let app = app!(directory);
    let req = test::TestRequest::get().uri("/health").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(test::read_body(res).await, "ok");
}

#[actix_web::test]
async fn malformed_requests_answer_with_json_message() {
    let directory = web::Data::new(Memory::default());
    let app = app!(directory);
    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "email": "a@x.com" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert!(body["message"].is_string());

    register!(app, "a@x.com", "pw1");
    let token = login!(app, "a@x.com", "pw1");
    let req = test::TestRequest::delete()
        .uri("/users/not-an-id")
        .insert_header(bearer(&token))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert!(body["message"].is_string());
}

#[actix_web::test]
async fn expired_tokens_are_unauthorized() {
    let directory = web::Data::new(Memory::default());
    let app = app!(directory);
    register!(app, "a@x.com", "pw1");
    let account = directory.find_by_email("a@x.com").await.unwrap().unwrap();
    let crypto = Crypto::new(SECRET);
    let window = acct_core::TOKEN_DURATION.as_secs() as i64;

    let stale = crypto
        .encode(&acct_auth::Claims::new(account.id(), acct_core::now() - window))
        .unwrap();
    let req = test::TestRequest::get()
        .uri("/users/profile")
        .insert_header(bearer(&stale))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "invalid or expired token");

    let fresh = crypto
        .encode(&acct_auth::Claims::new(account.id(), acct_core::now() - window + 60))
        .unwrap();
    let req = test::TestRequest::get()
        .uri("/users/profile")
        .insert_header(bearer(&fresh))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[actix_web::test]
async fn unchanged_role_is_not_a_grant() {
    let directory = web::Data::new(Memory::default());
    let app = app!(directory);
    let mine = register!(app, "a@x.com", "pw1");
    let token = login!(app, "a@x.com", "pw1");
    let req = test::TestRequest::patch()
        .uri(&format!("/users/{}", mine.id))
        .insert_header(bearer(&token))
        .set_json(json!({ "name": "renamed", "admin": false }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Profile = test::read_body_json(res).await;
    assert_eq!(updated.name, "renamed");
    assert!(!updated.admin);
}
