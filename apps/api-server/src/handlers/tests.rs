use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use chrono::{Duration, Utc};
use serde_json::{Value, json};
use uuid::Uuid;

use pressroom_core::domain::{BlogPost, NewComment, NewPoll, NewPost};
use pressroom_core::ports::ADMIN_ROLE;

use super::configure_routes;
use crate::middleware::error::bad_input;
use crate::middleware::visitor::VISITOR_HEADER;
use crate::state::AppState;

const PIN: &str = "7391";

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .app_data(web::JsonConfig::default().error_handler(bad_input))
                .configure(configure_routes),
        )
        .await
    };
}

fn admin_token(state: &AppState) -> String {
    state
        .tokens
        .generate_token("admin", vec![ADMIN_ROLE.to_string()])
        .unwrap()
}

fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

async fn seed_post(state: &AppState, title: &str, category: &str) -> BlogPost {
    state
        .content
        .add_post(NewPost {
            title: title.to_string(),
            excerpt: format!("{} excerpt", title),
            content: format!("<p>{} has a short body.</p>", title),
            category: category.to_string(),
            tags: vec!["rust".to_string()],
            author: "Dana".to_string(),
            ..Default::default()
        })
        .await
        .unwrap()
}

#[actix_web::test]
async fn test_health_reports_storage() {
    let state = AppState::for_tests(PIN).await;
    let app = test_app!(state);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/health").to_request())
        .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "memory");
}

#[actix_web::test]
async fn test_admin_login() {
    let state = AppState::for_tests(PIN).await;
    let app = test_app!(state);

    let wrong = test::TestRequest::post()
        .uri("/api/admin/login")
        .set_json(json!({"pin": "0000"}))
        .to_request();
    assert_eq!(
        test::call_service(&app, wrong).await.status(),
        StatusCode::UNAUTHORIZED
    );

    let right = test::TestRequest::post()
        .uri("/api/admin/login")
        .set_json(json!({"pin": PIN}))
        .to_request();
    let resp = test::call_service(&app, right).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let token = body["data"]["access_token"].as_str().unwrap();
    assert!(state.tokens.validate_token(token).unwrap().has_role(ADMIN_ROLE));
}

#[actix_web::test]
async fn test_admin_routes_require_admin_token() {
    let state = AppState::for_tests(PIN).await;
    let app = test_app!(state);

    let anonymous = test::TestRequest::get().uri("/api/admin/stats").to_request();
    assert_eq!(
        test::call_service(&app, anonymous).await.status(),
        StatusCode::UNAUTHORIZED
    );

    let no_role = state.tokens.generate_token("reader", vec![]).unwrap();
    let forbidden = test::TestRequest::get()
        .uri("/api/admin/stats")
        .insert_header(bearer(&no_role))
        .to_request();
    assert_eq!(
        test::call_service(&app, forbidden).await.status(),
        StatusCode::FORBIDDEN
    );

    let admin = test::TestRequest::get()
        .uri("/api/admin/stats")
        .insert_header(bearer(&admin_token(&state)))
        .to_request();
    assert_eq!(test::call_service(&app, admin).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_admin_creates_post_then_public_reads_it() {
    let state = AppState::for_tests(PIN).await;
    let app = test_app!(state);

    let create = test::TestRequest::post()
        .uri("/api/admin/posts")
        .insert_header(bearer(&admin_token(&state)))
        .set_json(json!({
            "title": "Shipping Rust at Work",
            "excerpt": "Notes from a year in production",
            "content": "<p>We moved our services over.</p>",
            "category": "Engineering",
            "tags": ["rust"],
            "author": "Dana"
        }))
        .to_request();
    let resp = test::call_service(&app, create).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let list = test::TestRequest::get().uri("/api/posts").to_request();
    let body: Value = test::call_and_read_body_json(&app, list).await;
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["items"][0]["slug"], "shipping-rust-at-work");
    assert_eq!(body["data"]["items"][0]["category_slug"], "engineering");

    let detail = test::TestRequest::get()
        .uri("/api/posts/shipping-rust-at-work")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, detail).await;
    assert_eq!(body["data"]["title"], "Shipping Rust at Work");
    assert_eq!(body["data"]["reading_time_minutes"], 1);
    assert_eq!(body["data"]["bookmarked"], false);
}

#[actix_web::test]
async fn test_invalid_post_is_bad_request() {
    let state = AppState::for_tests(PIN).await;
    let app = test_app!(state);

    let create = test::TestRequest::post()
        .uri("/api/admin/posts")
        .insert_header(bearer(&admin_token(&state)))
        .set_json(json!({
            "title": "  ",
            "excerpt": "e",
            "content": "c",
            "category": "News",
            "author": "Dana"
        }))
        .to_request();
    assert_eq!(
        test::call_service(&app, create).await.status(),
        StatusCode::BAD_REQUEST
    );
}

#[actix_web::test]
async fn test_missing_post_is_not_found() {
    let state = AppState::for_tests(PIN).await;
    let app = test_app!(state);

    let req = test::TestRequest::get().uri("/api/posts/nope").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 404);
    assert_eq!(body["title"], "Not Found");
}

#[actix_web::test]
async fn test_comment_reply_and_like() {
    let state = AppState::for_tests(PIN).await;
    let app = test_app!(state);
    let post = seed_post(&state, "Discuss", "News").await;

    let comment = test::TestRequest::post()
        .uri(&format!("/api/posts/{}/comments", post.id))
        .set_json(json!({"name": "Sam", "content": "Nice one"}))
        .to_request();
    let resp = test::call_service(&app, comment).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let comment_id = body["data"]["id"].as_str().unwrap().to_string();

    let reply = test::TestRequest::post()
        .uri(&format!("/api/comments/{}/replies", comment_id))
        .set_json(json!({"name": "Dana", "content": "Thanks"}))
        .to_request();
    assert_eq!(
        test::call_service(&app, reply).await.status(),
        StatusCode::CREATED
    );

    let like = test::TestRequest::post()
        .uri(&format!("/api/comments/{}/like", comment_id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, like).await;
    assert_eq!(body["data"]["likes"], 1);

    assert_eq!(state.content.post(post.id).await.unwrap().comment_count(), 2);
}

#[actix_web::test]
async fn test_empty_comment_rejected() {
    let state = AppState::for_tests(PIN).await;
    let app = test_app!(state);
    let post = seed_post(&state, "Quiet", "News").await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/{}/comments", post.id))
        .set_json(json!({"name": "Sam", "content": ""}))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );
}

#[actix_web::test]
async fn test_reaction_once_per_visitor() {
    let state = AppState::for_tests(PIN).await;
    let app = test_app!(state);
    let post = seed_post(&state, "Applause", "News").await;
    let visitor = Uuid::new_v4().to_string();

    let react = || {
        test::TestRequest::post()
            .uri(&format!("/api/posts/{}/reactions", post.id))
            .insert_header((VISITOR_HEADER, visitor.clone()))
            .set_json(json!({"kind": "clap"}))
            .to_request()
    };

    let body: Value = test::call_and_read_body_json(&app, react()).await;
    assert_eq!(body["data"]["counts"]["clap"], 1);
    assert_eq!(body["data"]["my_reactions"], json!(["clap"]));

    assert_eq!(
        test::call_service(&app, react()).await.status(),
        StatusCode::CONFLICT
    );

    let anonymous = test::TestRequest::post()
        .uri(&format!("/api/posts/{}/reactions", post.id))
        .set_json(json!({"kind": "clap"}))
        .to_request();
    assert_eq!(
        test::call_service(&app, anonymous).await.status(),
        StatusCode::BAD_REQUEST
    );
}

#[actix_web::test]
async fn test_poll_revote_is_conflict() {
    let state = AppState::for_tests(PIN).await;
    let app = test_app!(state);
    let poll = state
        .content
        .create_poll(NewPoll {
            question: "Favourite editor?".to_string(),
            options: vec!["Vim".to_string(), "Emacs".to_string()],
            end_date: Some(Utc::now() + Duration::days(3)),
        })
        .await
        .unwrap();
    let visitor = Uuid::new_v4().to_string();

    let vote = || {
        test::TestRequest::post()
            .uri(&format!("/api/polls/{}/vote", poll.id))
            .insert_header((VISITOR_HEADER, visitor.clone()))
            .set_json(json!({"option_index": 0}))
            .to_request()
    };

    let body: Value = test::call_and_read_body_json(&app, vote()).await;
    assert_eq!(body["data"]["total_votes"], 1);
    assert_eq!(body["data"]["percentages"], json!([100, 0]));

    assert_eq!(
        test::call_service(&app, vote()).await.status(),
        StatusCode::CONFLICT
    );

    let listing = test::TestRequest::get()
        .uri("/api/polls")
        .insert_header((VISITOR_HEADER, visitor.clone()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, listing).await;
    assert_eq!(body["data"][0]["has_voted"], true);
}

#[actix_web::test]
async fn test_rejected_vote_leaves_visitor_free_to_vote() {
    let state = AppState::for_tests(PIN).await;
    let app = test_app!(state);
    let poll = state
        .content
        .create_poll(NewPoll {
            question: "Tabs or spaces?".to_string(),
            options: vec!["Tabs".to_string(), "Spaces".to_string()],
            end_date: Some(Utc::now() + Duration::days(3)),
        })
        .await
        .unwrap();
    let visitor = Uuid::new_v4().to_string();

    let vote = |option_index: usize| {
        test::TestRequest::post()
            .uri(&format!("/api/polls/{}/vote", poll.id))
            .insert_header((VISITOR_HEADER, visitor.clone()))
            .set_json(json!({"option_index": option_index}))
            .to_request()
    };

    assert_eq!(
        test::call_service(&app, vote(7)).await.status(),
        StatusCode::BAD_REQUEST
    );

    let body: Value = test::call_and_read_body_json(&app, vote(1)).await;
    assert_eq!(body["data"]["total_votes"], 1);
    assert_eq!(body["data"]["has_voted"], true);
}

#[actix_web::test]
async fn test_non_ascii_category_listing() {
    let state = AppState::for_tests(PIN).await;
    let app = test_app!(state);
    seed_post(&state, "Перший випуск", "Новини").await;
    seed_post(&state, "Вакансія", "Кар'єра").await;

    let category = test::TestRequest::get()
        .uri("/api/categories/%D0%BD%D0%BE%D0%B2%D0%B8%D0%BD%D0%B8/posts")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, category).await;
    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Перший випуск");
}

#[actix_web::test]
async fn test_search_and_categories() {
    let state = AppState::for_tests(PIN).await;
    let app = test_app!(state);
    seed_post(&state, "Borrow Checker Tips", "Engineering").await;
    seed_post(&state, "Hiring Update", "Company News").await;

    let search = test::TestRequest::get()
        .uri("/api/search?q=borrow")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, search).await;
    assert_eq!(body["data"]["total"], 1);

    let blank = test::TestRequest::get().uri("/api/search?q=").to_request();
    let body: Value = test::call_and_read_body_json(&app, blank).await;
    assert_eq!(body["data"]["total"], 0);

    let category = test::TestRequest::get()
        .uri("/api/categories/company-news/posts")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, category).await;
    assert_eq!(body["data"]["items"][0]["title"], "Hiring Update");

    let categories = test::TestRequest::get().uri("/api/categories").to_request();
    let body: Value = test::call_and_read_body_json(&app, categories).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn test_visitor_preferences() {
    let state = AppState::for_tests(PIN).await;
    let app = test_app!(state);
    let post = seed_post(&state, "Keep Me", "News").await;
    let visitor = Uuid::new_v4().to_string();

    let bookmark = test::TestRequest::put()
        .uri(&format!("/api/visitor/bookmarks/{}", post.id))
        .insert_header((VISITOR_HEADER, visitor.clone()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, bookmark).await;
    assert_eq!(body["data"]["post_ids"], json!([post.id]));

    let language = test::TestRequest::put()
        .uri("/api/visitor/language")
        .insert_header((VISITOR_HEADER, visitor.clone()))
        .set_json(json!({"language": "DE"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, language).await;
    assert_eq!(body["data"]["language"], "de");

    let dismiss = test::TestRequest::post()
        .uri("/api/visitor/popups/newsletter/dismiss")
        .insert_header((VISITOR_HEADER, visitor.clone()))
        .to_request();
    assert_eq!(test::call_service(&app, dismiss).await.status(), StatusCode::OK);

    let status = test::TestRequest::get()
        .uri("/api/visitor/popups/newsletter")
        .insert_header((VISITOR_HEADER, visitor.clone()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, status).await;
    assert_eq!(body["data"]["dismissed"], true);
}

#[actix_web::test]
async fn test_contact_message_reaches_admin_inbox() {
    let state = AppState::for_tests(PIN).await;
    let app = test_app!(state);

    let submit = test::TestRequest::post()
        .uri("/api/messages")
        .set_json(json!({
            "name": "Sam",
            "email": "sam@example.com",
            "content": "Love the podcast"
        }))
        .to_request();
    let resp = test::call_service(&app, submit).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let id = body["data"].as_str().unwrap().to_string();

    let token = admin_token(&state);
    let reply = test::TestRequest::post()
        .uri(&format!("/api/admin/messages/{}/reply", id))
        .insert_header(bearer(&token))
        .set_json(json!({"reply": "Thank you!"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, reply).await;
    assert_eq!(body["data"]["read"], true);

    let inbox = test::TestRequest::get()
        .uri("/api/admin/messages")
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, inbox).await;
    assert_eq!(body["data"][0]["reply"], "Thank you!");
}

#[actix_web::test]
async fn test_admin_deletes_reply() {
    let state = AppState::for_tests(PIN).await;
    let app = test_app!(state);
    let post = seed_post(&state, "Moderated", "News").await;
    let input = NewComment {
        name: "Sam".to_string(),
        content: "Hello".to_string(),
    };
    let root = state.content.add_comment(post.id, input.clone()).await.unwrap();
    let reply = state.content.add_reply(root.id, input).await.unwrap();

    let req = test::TestRequest::delete()
        .uri(&format!("/api/admin/comments/{}/replies/{}", root.id, reply.id))
        .insert_header(bearer(&admin_token(&state)))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NO_CONTENT
    );
    assert_eq!(state.content.post(post.id).await.unwrap().comment_count(), 1);
}

#[actix_web::test]
async fn test_import_function() {
    let state = AppState::for_tests(PIN).await;
    let app = test_app!(state);
    let posts = json!([{
        "title": "Welcome to Pressroom",
        "excerpt": "Our first post",
        "content": "<p>Hello readers.</p>",
        "category": "News",
        "author": "Dana",
        "comments": [{"name": "Sam", "content": "First!"}]
    }]);

    let wrong_pin = test::TestRequest::post()
        .uri("/api/functions/import-initial-posts")
        .set_json(json!({"pin": "1111", "posts": posts.clone()}))
        .to_request();
    let resp = test::call_service(&app, wrong_pin).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"error": "Invalid PIN"}));

    let import = test::TestRequest::post()
        .uri("/api/functions/import-initial-posts")
        .set_json(json!({"pin": PIN, "posts": posts}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, import).await;
    assert_eq!(body, json!({"success": true, "posts": 1, "comments": 1}));

    let post = state
        .content
        .post_by_slug("welcome-to-pressroom")
        .await
        .unwrap();
    assert_eq!(post.comment_count(), 1);
}

#[actix_web::test]
async fn test_import_reports_malformed_entry() {
    let state = AppState::for_tests(PIN).await;
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/functions/import-initial-posts")
        .set_json(json!({"pin": PIN, "posts": [{"title": 42}]}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().starts_with("posts[0]"));
}

#[actix_web::test]
async fn test_import_unreadable_body_keeps_function_shape() {
    let state = AppState::for_tests(PIN).await;
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/functions/import-initial-posts")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{\"pin\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid request body"));
    assert!(body.get("title").is_none());
}
