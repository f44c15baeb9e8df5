use actix_web::cookie::Cookie;
use actix_web::http::{StatusCode, header};
use actix_web::test::{TestRequest, call_service, init_service, read_body};
use actix_web::{App, HttpResponse, web};
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::{Value, json};

use convenios_dashboard::middleware::{RequireSessionToken, SessionGate, SessionUser};
use convenios_dashboard::token::TokenExpiryGate;

fn token(payload: Value) -> String {
    format!(
        "{}.{}.sig",
        URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256"}"#),
        URL_SAFE_NO_PAD.encode(payload.to_string())
    )
}

fn gate() -> SessionGate {
    SessionGate::new("/dashboard", "token", TokenExpiryGate::default())
}

async fn whoami(user: SessionUser) -> HttpResponse {
    HttpResponse::Ok().body(user.0.display_name().to_string())
}

macro_rules! gated_app {
    () => {
        init_service(
            App::new()
                .wrap(RequireSessionToken::new(gate()))
                .route("/", web::get().to(|| async { HttpResponse::Ok().body("landing") }))
                .route("/dashboard", web::get().to(whoami)),
        )
        .await
    };
}

#[actix_web::test]
async fn public_paths_pass_through() {
    let app = gated_app!();

    let req = TestRequest::get().uri("/").to_request();
    let resp = call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn missing_cookie_redirects_to_login() {
    let app = gated_app!();

    let req = TestRequest::get().uri("/dashboard").to_request();
    let resp = call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");
}

#[actix_web::test]
async fn expired_token_is_cleared_and_flagged() {
    let app = gated_app!();

    let req = TestRequest::get()
        .uri("/dashboard")
        .cookie(Cookie::new("token", token(json!({ "exp": 1_000 }))))
        .to_request();
    let resp = call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "/?session=expired"
    );
    let cleared = resp
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "token")
        .expect("removal cookie");
    assert_eq!(cleared.value(), "");
}

#[actix_web::test]
async fn valid_token_reaches_handler_with_claims() {
    let app = gated_app!();

    let req = TestRequest::get()
        .uri("/dashboard")
        .cookie(Cookie::new(
            "token",
            token(json!({ "nombre": "Ana Pérez", "exp": 4_102_444_800_i64 })),
        ))
        .to_request();
    let resp = call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = read_body(resp).await;
    assert_eq!(body, "Ana Pérez");
}
