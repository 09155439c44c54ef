use actix_web::{
    App,
    body::MessageBody,
    cookie::{Cookie, Key},
    dev::ServiceResponse,
    http::{StatusCode, header},
    test, web,
};
use page_analyzer::{
    config::{Config, DatabaseConfig},
    db,
    notice::NOTICE_COOKIE,
    routes,
    types::{AppData, AppState},
};
use tempfile::TempDir;

async fn app_data() -> (TempDir, AppData) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("analyzer.db");
    let path = path.to_str().unwrap().to_owned();

    let db = db::open_local(&path).await.unwrap();
    db::migrate_db(db::connect(&db).unwrap()).await.unwrap();

    let config = Config {
        secret_key: Key::derive_from(&[42u8; 32]),
        host: "127.0.0.1".into(),
        port: 0,
        database: DatabaseConfig::Local { path },
    };

    (dir, web::Data::new(AppState { db, config }))
}

fn location<B>(res: &ServiceResponse<B>) -> String {
    res.headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_owned()
}

fn notice_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|c| c.name() == NOTICE_COOKIE)
        .unwrap()
        .into_owned()
}

async fn body_text<B: MessageBody>(res: ServiceResponse<B>) -> String {
    String::from_utf8(test::read_body(res).await.to_vec()).unwrap()
}

fn submit(url: &str) -> test::TestRequest {
    test::TestRequest::post().uri("/urls").set_form(&[("url", url)])
}

#[actix_web::test]
async fn index_renders_form() {
    let (_dir, data) = app_data().await;
    let app = test::init_service(App::new().app_data(data).configure(routes::configure)).await;

    let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = body_text(res).await;
    assert!(body.contains(r#"<form action="/urls" method="post">"#));
    assert!(body.contains(r#"name="url""#));
}

#[actix_web::test]
async fn invalid_url_redirects_home_with_notice_once() {
    let (_dir, data) = app_data().await;
    let app = test::init_service(App::new().app_data(data).configure(routes::configure)).await;

    let res = test::call_service(&app, submit("definitely not a url").to_request()).await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "/");
    let cookie = notice_cookie(&res);

    let req = test::TestRequest::get().uri("/").cookie(cookie).to_request();
    let res = test::call_service(&app, req).await;
    let removal = notice_cookie(&res);
    assert_eq!(removal.value(), "");

    let body = body_text(res).await;
    assert!(body.contains("alert-danger"));
    assert!(body.contains("Invalid URL"));

    let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert!(!body_text(res).await.contains("Invalid URL"));
}

#[actix_web::test]
async fn empty_and_oversized_urls_are_rejected() {
    let (_dir, data) = app_data().await;
    let app = test::init_service(App::new().app_data(data).configure(routes::configure)).await;

    let long = format!("https://example.com/{}", "a".repeat(300));
    for url in ["", "   ", long.as_str()] {
        let res = test::call_service(&app, submit(url).to_request()).await;
        assert_eq!(location(&res), "/", "{url}");
    }

    let res = test::call_service(&app, test::TestRequest::get().uri("/urls").to_request()).await;
    assert!(!body_text(res).await.contains("/urls/1"));
}

#[actix_web::test]
async fn registering_twice_lands_on_the_same_page() {
    let (_dir, data) = app_data().await;
    let app = test::init_service(App::new().app_data(data).configure(routes::configure)).await;

    let res = test::call_service(&app, submit("https://example.com/a/b?x=1").to_request()).await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "/urls/1");

    let req = test::TestRequest::get()
        .uri("/urls/1")
        .cookie(notice_cookie(&res))
        .to_request();
    let body = body_text(test::call_service(&app, req).await).await;
    assert!(body.contains("Site: https://example.com"));
    assert!(body.contains("Page successfully added"));

    let res = test::call_service(&app, submit("  https://example.com  ").to_request()).await;
    assert_eq!(location(&res), "/urls/1");

    let req = test::TestRequest::get()
        .uri("/urls/1")
        .cookie(notice_cookie(&res))
        .to_request();
    let body = body_text(test::call_service(&app, req).await).await;
    assert!(body.contains("alert-info"));
    assert!(body.contains("Page already exists"));
}

#[actix_web::test]
async fn checks_show_up_on_detail_and_list() {
    let (_dir, data) = app_data().await;
    let app = test::init_service(App::new().app_data(data).configure(routes::configure)).await;

    test::call_service(&app, submit("https://example.com").to_request()).await;
    test::call_service(&app, submit("https://rust-lang.org/learn").to_request()).await;

    for _ in 0..2 {
        let req = test::TestRequest::post().uri("/urls/1/checks").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res), "/urls/1");
    }

    let req = test::TestRequest::post().uri("/urls/1/checks").to_request();
    let res = test::call_service(&app, req).await;
    let req = test::TestRequest::get()
        .uri("/urls/1")
        .cookie(notice_cookie(&res))
        .to_request();
    let body = body_text(test::call_service(&app, req).await).await;
    assert!(body.contains("Check started successfully"));
    let third = body.find("<tr><td>3</td>").unwrap();
    let second = body.find("<tr><td>2</td>").unwrap();
    let first = body.find("<tr><td>1</td>").unwrap();
    assert!(third < second && second < first);

    let res = test::call_service(&app, test::TestRequest::get().uri("/urls").to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_text(res).await;
    let newer = body.find(r#"<a href="/urls/2">https://rust-lang.org</a></td><td></td>"#);
    let older = body.find(r#"<a href="/urls/1">https://example.com</a>"#);
    assert!(newer.unwrap() < older.unwrap());
}

#[actix_web::test]
async fn missing_url_redirects_home() {
    let (_dir, data) = app_data().await;
    let app = test::init_service(App::new().app_data(data).configure(routes::configure)).await;

    let res = test::call_service(&app, test::TestRequest::get().uri("/urls/99").to_request()).await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "/");

    let req = test::TestRequest::post().uri("/urls/99/checks").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "/");

    let req = test::TestRequest::get()
        .uri("/")
        .cookie(notice_cookie(&res))
        .to_request();
    assert!(body_text(test::call_service(&app, req).await).await.contains("Page not found"));
}

#[actix_web::test]
async fn non_numeric_id_is_not_routed() {
    let (_dir, data) = app_data().await;
    let app = test::init_service(App::new().app_data(data).configure(routes::configure)).await;

    let res = test::call_service(&app, test::TestRequest::get().uri("/urls/abc").to_request()).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn forged_notice_is_ignored() {
    let (_dir, data) = app_data().await;
    let app = test::init_service(App::new().app_data(data).configure(routes::configure)).await;

    let req = test::TestRequest::get()
        .uri("/")
        .cookie(Cookie::new(NOTICE_COOKIE, "page_added"))
        .to_request();
    let body = body_text(test::call_service(&app, req).await).await;
    assert!(!body.contains("alert"));
}
