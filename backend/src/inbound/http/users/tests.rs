//! Tests for session endpoints.

use super::*;
use crate::domain::UserId;
use crate::domain::ports::MockLoginService;
use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};
use actix_web::http::StatusCode;
use actix_web::{App, HttpResponse, test as actix_test, web};
use rstest::rstest;
use serde_json::Value;
use std::sync::Arc;

async fn whoami(session: SessionContext) -> ApiResult<HttpResponse> {
    let id = session.require_user_id()?;
    Ok(HttpResponse::Ok().body(id.to_string()))
}

fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(test_session_middleware())
        .service(web::scope("/api/v1").service(login).service(logout))
        .route("/whoami", web::get().to(whoami))
}

fn login_request(email: &str, password: &str) -> actix_http::Request {
    actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(&LoginRequest {
            email: email.into(),
            password: password.into(),
        })
        .to_request()
}

#[rstest]
#[case("   ", "password", "email", "empty_email")]
#[case("ada@campus.example", "", "password", "empty_password")]
#[actix_web::test]
async fn login_rejects_blank_fields(
    #[case] email: &str,
    #[case] password: &str,
    #[case] field: &str,
    #[case] code: &str,
) {
    let mut login_service = MockLoginService::new();
    login_service.expect_authenticate().times(0);
    let state = HttpState {
        login: Arc::new(login_service),
        ..HttpState::fixture()
    };
    let app = actix_test::init_service(test_app(state)).await;

    let response = actix_test::call_service(&app, login_request(email, password)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["code"], "invalid_request");
    assert_eq!(value["details"]["field"], field);
    assert_eq!(value["details"]["code"], code);
}

#[actix_web::test]
async fn login_rejects_wrong_password() {
    let app = actix_test::init_service(test_app(HttpState::fixture())).await;

    let response =
        actix_test::call_service(&app, login_request("ada@campus.example", "wrong")).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["code"], "unauthorized");
}

#[actix_web::test]
async fn login_passes_normalised_credentials_to_the_port() {
    let expected = UserId::random();
    let returned = expected.clone();
    let mut login_service = MockLoginService::new();
    login_service
        .expect_authenticate()
        .withf(|creds| creds.email() == "grace@campus.example")
        .times(1)
        .returning(move |_| Ok(returned.clone()));
    let state = HttpState {
        login: Arc::new(login_service),
        ..HttpState::fixture()
    };
    let app = actix_test::init_service(test_app(state)).await;

    let response =
        actix_test::call_service(&app, login_request(" Grace@Campus.Example ", "pw")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie(&response);

    let who = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/whoami")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(actix_test::read_body(who).await, expected.to_string());
}

#[actix_web::test]
async fn logout_returns_no_content() {
    let app = actix_test::init_service(test_app(HttpState::fixture())).await;
    let login_res =
        actix_test::call_service(&app, login_request("ada@campus.example", "password")).await;
    let cookie = session_cookie(&login_res);

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/logout")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
