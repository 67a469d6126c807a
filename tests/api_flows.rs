use std::{io::Cursor, sync::Arc};

use image::{DynamicImage, ImageFormat, RgbImage};
use newsdesk_admin::{
    errors::{CONNECTIVITY_FAILURE, FILE_TOO_LARGE, PERMISSION_DENIED},
    forms::{PostForm, UserForm},
    media::{MediaFile, PreviewRegistry},
    models::{news_post::ContentType, users::UserRole},
    repositories::{dashboard_repo::DashboardRepository, ApiRepo},
    routes::{navigate, Navigation, Route},
    services::{
        auth::AuthService, dashboard::DashboardService, moderation::ModerationService,
        posts::NewsPostsService, upload::UploadService, user::UserService,
    },
    session::Session,
    views::{PendingView, UsersView},
    Error,
};
use serde_json::{json, Value};
use wiremock::{
    matchers::{body_json, body_partial_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

fn api(server: &MockServer, session: Session) -> Arc<ApiRepo> {
    Arc::new(ApiRepo::with_client(
        reqwest::Client::new(),
        &server.uri(),
        session,
    ))
}

fn signed_in() -> Session {
    let session = Session::in_memory();
    session.sign_in("tok-123").unwrap();
    session
}

fn pending(ids: &[u32]) -> Value {
    let posts: Vec<Value> = ids
        .iter()
        .map(|id| json!({ "_id": id, "title": format!("Story {id}"), "status": "pending" }))
        .collect();
    json!({ "data": { "posts": posts } })
}

/// A noisy RGB PNG, which barely compresses, of roughly 2 MB.
fn large_png() -> Vec<u8> {
    let mut seed: u32 = 0x2545_f491;
    let img = RgbImage::from_fn(840, 840, |_, _| {
        seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        let [r, g, b, _] = seed.to_le_bytes();
        image::Rgb([r, g, b])
    });
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

async fn last_body(server: &MockServer) -> String {
    let requests = server.received_requests().await.unwrap();
    let request = requests.last().unwrap();
    String::from_utf8_lossy(&request.body).into_owned()
}

#[tokio::test]
async fn login_stores_token_and_login_route_redirects() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({ "email": "desk@news.in", "password": "secret" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "token": "jwt-abc" } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let token_path = dir.path().join("token");
    let session = Session::from_file(&token_path);
    let auth = AuthService::new(api(&server, session.clone()), session.clone());

    assert_eq!(
        navigate("/posts/pending", &session),
        Navigation::Redirect(Route::Login)
    );

    auth.login("desk@news.in", "secret").await.unwrap();

    assert_eq!(std::fs::read_to_string(&token_path).unwrap().trim(), "jwt-abc");
    let reopened = Session::from_file(&token_path);
    assert_eq!(
        navigate("/login", &reopened),
        Navigation::Redirect(Route::Dashboard)
    );
}

#[tokio::test]
async fn approving_42_updates_status_and_refetch_drops_it() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/dashboard/pending-posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(pending(&[41, 42, 43])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/dashboard/pending-posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(pending(&[41, 43])))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/news/admin/news/status/42"))
        .and(header("authorization", "Bearer tok-123"))
        .and(body_json(json!({ "status": "approved" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "News approved" })))
        .expect(1)
        .mount(&server)
        .await;

    let repo = api(&server, signed_in());
    let mut view = PendingView::new(
        DashboardService::new(repo.clone()),
        ModerationService::new(repo),
    );

    assert_eq!(view.refresh().await.unwrap().len(), 3);
    let notice = view.approve("42").await.unwrap();

    assert_eq!(notice.message, "News approved");
    let ids: Vec<&str> = view.posts().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["41", "43"]);
    assert!(!view.is_busy("42"));
}

#[tokio::test]
async fn standard_post_with_large_image_is_resampled_and_form_resets() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/news/admin/create"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "status": "success",
            "message": "News created and sent for review"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let previews = PreviewRegistry::new();
    let posts = NewsPostsService::new(api(&server, signed_in()), previews.clone());

    let png = large_png();
    assert!(png.len() > 1024 * 1024, "fixture is {} bytes", png.len());

    let mut form = PostForm::standard(previews.clone());
    form.set_headline("Ganga water level rises");
    form.set_category("राष्ट्रीय");
    form.set_state("Bihar").unwrap();
    form.set_district("Bhagalpur").unwrap();
    form.set_content("<p>Officials issued an alert.</p>");
    form.set_image(MediaFile::new("photo.png", "image/png", png.clone()))
        .unwrap();
    assert_eq!(previews.live_count(), 1);

    let message = posts.create_news_post(&mut form).await.unwrap();
    assert_eq!(message, "News created and sent for review");
    assert!(form.is_empty());
    assert_eq!(form.kind(), ContentType::Standard);
    assert_eq!(previews.live_count(), 0);

    let requests = server.received_requests().await.unwrap();
    let body = &requests[0].body;
    assert!(body.len() < png.len());
    let text = String::from_utf8_lossy(body).to_lowercase();
    assert!(text.contains("name=\"featuredimage\"; filename=\"photo.jpg\""));
    assert!(text.contains("image/jpeg"));
    assert!(text.contains("name=\"district\"\r\n\r\nbhagalpur"));
    assert!(text.contains("name=\"category\"\r\n\r\nnational"));
}

#[tokio::test]
async fn invalid_form_never_reaches_the_server() {
    let server = MockServer::start().await;
    let posts = NewsPostsService::new(api(&server, signed_in()), PreviewRegistry::new());

    let mut form = posts.video_form();
    form.set_headline("Clip");
    form.set_category("sports");
    form.set_state("jharkhand").unwrap();
    form.set_district("ranchi").unwrap();
    form.set_content("<p>x</p>");
    form.set_video_file(MediaFile::new("clip.mov", "video/quicktime", vec![0; 16]));

    let err = posts.create_news_post(&mut form).await.unwrap_err();
    assert_eq!(err.user_message(), "Only MP4 video files are supported.");
    assert!(!form.is_empty());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn unauthorized_response_clears_the_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/dashboard/users"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "jwt expired" })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let session = Session::from_file(dir.path().join("token"));
    session.sign_in("stale").unwrap();

    let mut view = UsersView::new(UserService::new(api(&server, session.clone())));
    let err = view.refresh().await.unwrap_err();

    assert!(matches!(err, Error::SessionExpired));
    assert!(err.requires_login());
    assert!(view.notice().unwrap().is_error());
    assert!(!session.is_authenticated());
    assert_eq!(navigate("/users", &session), Navigation::Redirect(Route::Login));
}

#[tokio::test]
async fn forbidden_and_too_large_map_to_dedicated_messages() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/news/admin/news/status/7"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(json!({ "message": "Journalists cannot moderate" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .respond_with(
            ResponseTemplate::new(413).set_body_string("<html><body>413 Request Entity Too Large</body></html>"),
        )
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/news/admin/news/status/8"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({ "message": "Post already reviewed" })),
        )
        .mount(&server)
        .await;

    let session = signed_in();
    let repo = api(&server, session.clone());

    let moderation = ModerationService::new(repo.clone());
    let err = moderation.approve("7", None).await.unwrap_err();
    assert!(matches!(err, Error::Forbidden(Some(ref m)) if m == "Journalists cannot moderate"));
    assert_eq!(err.user_message(), PERMISSION_DENIED);

    let err = moderation.reject("8", None).await.unwrap_err();
    assert_eq!(err.user_message(), "Post already reviewed");

    let uploads = UploadService::new(repo);
    let err = uploads
        .upload_image(MediaFile::new("a.png", "image/png", vec![1, 2, 3]))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::PayloadTooLarge));
    assert_eq!(err.user_message(), FILE_TOO_LARGE);

    assert!(session.is_authenticated());
}

#[tokio::test]
async fn every_envelope_shape_yields_the_same_list() {
    let items = json!([
        { "id": 1, "title": "one", "status": "rejected" },
        { "id": 2, "title": "two", "status": "rejected" },
        { "id": 3, "title": "three", "status": "rejected" }
    ]);
    let shapes = [
        items.clone(),
        json!({ "success": true, "data": items.clone() }),
        json!({ "data": { "news": items.clone(), "total": 3 } }),
    ];

    for shape in shapes {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/dashboard/rejected-news"))
            .respond_with(ResponseTemplate::new(200).set_body_json(shape))
            .mount(&server)
            .await;

        let posts = api(&server, signed_in()).rejected_news().await.unwrap();
        let titles: Vec<&str> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["one", "two", "three"]);
    }
}

#[tokio::test]
async fn well_formed_empty_list_is_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/dashboard/pending-posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "posts": [] } })))
        .mount(&server)
        .await;

    let posts = api(&server, signed_in()).pending_posts().await.unwrap();
    assert!(posts.is_empty());
}

#[tokio::test]
async fn missing_token_fails_before_any_request() {
    let server = MockServer::start().await;
    let repo = api(&server, Session::in_memory());

    let err = repo.stats().await.unwrap_err();
    assert!(matches!(err, Error::NotAuthenticated));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn unreachable_api_is_a_connectivity_error() {
    let repo = ApiRepo::with_client(reqwest::Client::new(), "http://127.0.0.1:9", signed_in());
    let err = repo.stats().await.unwrap_err();
    assert!(matches!(err, Error::Network(_)));
    assert_eq!(err.user_message(), CONNECTIVITY_FAILURE);
}

#[tokio::test]
async fn edit_without_new_files_sends_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/news/public/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "_id": "9",
                "title": "Film premiere",
                "content": "<p>Stars arrive</p>",
                "category": "मनोरंजन",
                "state": "Jharkhand",
                "district": "Ranchi",
                "contentType": "video",
                "youtubeUrl": "https://youtu.be/dQw4w9WgXcQ",
                "featuredImage": "/uploads/premiere.jpg"
            }
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/news/re-edit/9"))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(json!({
            "title": "Film premiere tonight",
            "category": "entertainment",
            "state": "jharkhand",
            "district": "ranchi",
            "contentType": "standard"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Updated" })))
        .expect(1)
        .mount(&server)
        .await;

    let posts = NewsPostsService::new(api(&server, signed_in()), PreviewRegistry::new());
    let mut form = posts.edit_form("9").await.unwrap();
    assert!(form.image_locked());
    assert!(!form.shows_video_fields());

    form.set_title("Film premiere tonight");
    assert_eq!(posts.update_news_post(&form).await.unwrap(), "Updated");

    let body: Value = serde_json::from_str(&last_body(&server).await).unwrap();
    assert!(body.get("youtubeUrl").is_none());
}

#[tokio::test]
async fn journalist_creation_and_deletion() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/dashboard/users"))
        .and(body_json(json!({
            "name": "Ravi Kumar",
            "phone": "9876543210",
            "email": "ravi@example.com",
            "password": "secret1",
            "role": "journalist",
            "state": "bihar",
            "district": "gaya"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "message": "User created" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/dashboard/users/u-7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/dashboard/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "users": [] } })))
        .mount(&server)
        .await;

    let users = UserService::new(api(&server, signed_in()));
    let mut form = UserForm::default();
    form.name = "Ravi Kumar".into();
    form.phone = "9876543210".into();
    form.email = "ravi@example.com".into();
    form.password = "secret1".into();
    form.set_role(UserRole::Journalist);
    form.set_state("बिहार").unwrap();
    form.set_district("Gaya").unwrap();

    assert_eq!(users.create_user(&mut form).await.unwrap(), "User created");
    assert_eq!(form.role(), UserRole::Editor);
    assert!(form.name.is_empty());

    let mut view = UsersView::new(users);
    let notice = view.delete("u-7").await.unwrap();
    assert!(!notice.is_error());
    assert!(view.users().is_empty());
}

#[tokio::test]
async fn embedded_image_upload_returns_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": { "url": "/uploads/inline/a.png" } })),
        )
        .mount(&server)
        .await;

    let uploads = UploadService::new(api(&server, signed_in()));
    let url = uploads
        .upload_image(MediaFile::new("a.png", "image/png", vec![1, 2, 3]))
        .await
        .unwrap();
    assert_eq!(url, "/uploads/inline/a.png");
    assert!(last_body(&server).await.contains("name=\"image\"; filename=\"a.png\""));
}
