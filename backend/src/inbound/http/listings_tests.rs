//! Tests for listing HTTP handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use mockall::predicate::eq;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{
    FIXTURE_LISTING_ID, FIXTURE_PASSWORD, MockListingCommand, MockListingQuery, fixture_contacts,
    fixture_listing,
};
use crate::domain::{InterestMatch, ListingDetailsDraft, ListingView, UserId};
use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};
use crate::inbound::http::users::{LoginRequest, login};
use crate::inbound::http::validation::{json_config, path_config};

const ADA: &str = "11111111-1111-1111-1111-111111111111";

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
        .app_data(json_config())
        .app_data(path_config())
        .wrap(test_session_middleware())
        .service(
            web::scope("/api/v1")
                .service(login)
                .service(create_listing)
                .service(list_listings)
                .service(express_interest)
                .service(my_listings)
                .service(my_interests)
                .service(interest_received),
        )
}

async fn login_as_ada(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
) -> actix_web::cookie::Cookie<'static> {
    let req = actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(&LoginRequest {
            email: "ada@campus.example".into(),
            password: FIXTURE_PASSWORD.into(),
        })
        .to_request();
    let res = actix_test::call_service(app, req).await;
    assert!(res.status().is_success());
    session_cookie(&res)
}

fn ada() -> UserId {
    UserId::new(ADA).expect("fixture id")
}

fn fixture_view(kind: ListingKind) -> ListingView {
    let listing =
        fixture_listing(kind, ListingId::from_uuid(FIXTURE_LISTING_ID)).expect("fixture listing");
    let owner = fixture_contacts().remove(0);
    ListingView { listing, owner }
}

#[actix_web::test]
async fn create_requires_session_before_touching_the_port() {
    let mut command = MockListingCommand::new();
    command.expect_create_listing().times(0);
    let state = HttpState {
        listings: Arc::new(command),
        ..HttpState::fixture()
    };
    let app = actix_test::init_service(test_app(state)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/listings/goods")
            .set_json(json!({ "title": "Bike" }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn create_passes_caller_kind_and_fields_to_the_port() {
    let mut command = MockListingCommand::new();
    command
        .expect_create_listing()
        .withf(|owner, kind, draft| {
            owner.as_ref() == ADA
                && *kind == ListingKind::Service
                && draft.title == "Move a sofa"
                && draft.details
                    == ListingDetailsDraft::Service {
                        deadline: None,
                        payment: Some(20.0),
                    }
        })
        .times(1)
        .returning(|_, kind, _| fixture_listing(kind, ListingId::from_uuid(FIXTURE_LISTING_ID)));
    let state = HttpState {
        listings: Arc::new(command),
        ..HttpState::fixture()
    };
    let app = actix_test::init_service(test_app(state)).await;
    let cookie = login_as_ada(&app).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/listings/services")
            .cookie(cookie)
            .set_json(json!({ "title": "Move a sofa", "payment": 20.0 }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["type"], "Service");
    assert_eq!(body["payment"], 20.0);
    assert_eq!(body["fulfilled"], false);
    assert_eq!(body["interestedUserIds"], json!([]));
    assert!(body.get("price").is_none());
}

#[rstest]
#[case("goods", json!({ "title": "Bike", "payment": 5.0 }), "payment")]
#[case("services", json!({ "title": "Tutor", "images": [] }), "images")]
#[actix_web::test]
async fn create_rejects_fields_of_the_other_kind(
    #[case] segment: &str,
    #[case] body: Value,
    #[case] field: &str,
) {
    let mut command = MockListingCommand::new();
    command.expect_create_listing().times(0);
    let state = HttpState {
        listings: Arc::new(command),
        ..HttpState::fixture()
    };
    let app = actix_test::init_service(test_app(state)).await;
    let cookie = login_as_ada(&app).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/v1/listings/{segment}"))
            .cookie(cookie)
            .set_json(body)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let value: Value = actix_test::read_body_json(res).await;
    assert_eq!(value["details"]["field"], field);
    assert_eq!(value["details"]["code"], "not_applicable");
}

#[actix_web::test]
async fn create_surfaces_validation_details() {
    let app = actix_test::init_service(test_app(HttpState::fixture())).await;
    let cookie = login_as_ada(&app).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/listings/goods")
            .cookie(cookie)
            .set_json(json!({ "price": 10.0 }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let value: Value = actix_test::read_body_json(res).await;
    assert_eq!(value["code"], "invalid_request");
    assert_eq!(value["details"]["field"], "title");
}

#[rstest]
#[case("/api/v1/listings/cars")]
#[case("/api/v1/listings/Goods")]
#[actix_web::test]
async fn unknown_kind_is_not_found(#[case] uri: &str) {
    let mut query = MockListingQuery::new();
    query.expect_list_all().times(0);
    let state = HttpState {
        listings_query: Arc::new(query),
        ..HttpState::fixture()
    };
    let app = actix_test::init_service(test_app(state)).await;

    let res =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let value: Value = actix_test::read_body_json(res).await;
    assert_eq!(value["code"], "not_found");
}

#[actix_web::test]
async fn list_includes_owner_contact_and_type() {
    let mut query = MockListingQuery::new();
    query
        .expect_list_all()
        .with(eq(ListingKind::Goods))
        .times(1)
        .returning(|kind| Ok(vec![fixture_view(kind)]));
    let state = HttpState {
        listings_query: Arc::new(query),
        ..HttpState::fixture()
    };
    let app = actix_test::init_service(test_app(state)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/listings/goods")
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    let first = &body[0];
    assert_eq!(first["type"], "Goods");
    assert_eq!(first["title"], "Bike");
    assert_eq!(first["price"], 100.0);
    assert_eq!(first["ownerId"], ADA);
    assert_eq!(first["owner"]["name"], "Ada Lovelace");
    assert!(first.get("owner_id").is_none());
}

#[actix_web::test]
async fn malformed_listing_id_is_not_found_without_port_call() {
    let mut command = MockListingCommand::new();
    command.expect_express_interest().times(0);
    let state = HttpState {
        listings: Arc::new(command),
        ..HttpState::fixture()
    };
    let app = actix_test::init_service(test_app(state)).await;
    let cookie = login_as_ada(&app).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/listings/goods/not-a-uuid/interest")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn express_interest_forwards_caller_and_listing() {
    let listing_id = ListingId::from_uuid(FIXTURE_LISTING_ID);
    let mut command = MockListingCommand::new();
    command
        .expect_express_interest()
        .with(eq(ListingKind::Goods), eq(listing_id), eq(ada()))
        .times(1)
        .returning(|kind, id, user| {
            let mut listing = fixture_listing(kind, *id)?;
            listing.record_interest(user.clone());
            Ok(listing)
        });
    let state = HttpState {
        listings: Arc::new(command),
        ..HttpState::fixture()
    };
    let app = actix_test::init_service(test_app(state)).await;
    let cookie = login_as_ada(&app).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/v1/listings/goods/{FIXTURE_LISTING_ID}/interest"))
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["interestedUserIds"], json!([ADA]));
}

#[actix_web::test]
async fn express_interest_in_missing_listing_is_not_found() {
    let app = actix_test::init_service(test_app(HttpState::fixture())).await;
    let cookie = login_as_ada(&app).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!(
                "/api/v1/listings/services/{}/interest",
                ListingId::random()
            ))
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[case("/api/v1/listings/goods/mine")]
#[case("/api/v1/listings/goods/interested")]
#[case("/api/v1/listings/services/interest-received")]
#[actix_web::test]
async fn caller_scoped_reads_require_session(#[case] uri: &str) {
    let mut query = MockListingQuery::new();
    query.expect_my_listings().times(0);
    query.expect_my_interests().times(0);
    query.expect_interest_in_my_listings().times(0);
    let state = HttpState {
        listings_query: Arc::new(query),
        ..HttpState::fixture()
    };
    let app = actix_test::init_service(test_app(state)).await;

    let res =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn my_listings_are_scoped_to_the_session_user() {
    let mut query = MockListingQuery::new();
    query
        .expect_my_listings()
        .with(eq(ListingKind::Goods), eq(ada()))
        .times(1)
        .returning(|kind, _| {
            Ok(vec![fixture_listing(
                kind,
                ListingId::from_uuid(FIXTURE_LISTING_ID),
            )?])
        });
    let state = HttpState {
        listings_query: Arc::new(query),
        ..HttpState::fixture()
    };
    let app = actix_test::init_service(test_app(state)).await;
    let cookie = login_as_ada(&app).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/listings/goods/mine")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["ownerId"], ADA);
    assert!(body[0].get("owner").is_none());
}

#[actix_web::test]
async fn interest_received_pairs_user_with_listing() {
    let mut query = MockListingQuery::new();
    query
        .expect_interest_in_my_listings()
        .with(eq(ListingKind::Goods), eq(ada()))
        .times(1)
        .returning(|kind, _| {
            let listing = fixture_listing(kind, ListingId::from_uuid(FIXTURE_LISTING_ID))?;
            let interested_user = fixture_contacts().remove(1);
            Ok(vec![InterestMatch {
                interested_user,
                listing,
            }])
        });
    let state = HttpState {
        listings_query: Arc::new(query),
        ..HttpState::fixture()
    };
    let app = actix_test::init_service(test_app(state)).await;
    let cookie = login_as_ada(&app).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/listings/goods/interest-received")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body[0]["interestedUser"]["name"], "Grace Hopper");
    assert_eq!(body[0]["listing"]["title"], "Bike");
}

#[rstest]
fn into_draft_defaults_goods_images_to_empty() {
    let request = CreateListingRequest {
        title: "Bike".to_owned(),
        price: Some(100.0),
        ..CreateListingRequest::default()
    };

    let draft = request.into_draft(ListingKind::Goods).expect("goods draft");

    assert_eq!(
        draft.details,
        ListingDetailsDraft::Goods {
            price: Some(100.0),
            images: Vec::new(),
        }
    );
}

#[rstest]
#[case(json!({ "title": "Move a sofa", "deadline": "2026-05-01", "payment": 20 }), "2026-05-01T00:00:00Z")]
#[case(json!({ "title": "Move a sofa", "deadline": "2026-05-01T09:30:00+02:00" }), "2026-05-01T07:30:00Z")]
#[case(json!({ "title": "Move a sofa", "deadline": null }), "")]
fn create_body_accepts_dates_and_timestamps(#[case] body: Value, #[case] expected: &str) {
    let request: CreateListingRequest = serde_json::from_value(body).expect("valid body");

    let expected = (!expected.is_empty()).then(|| {
        expected
            .parse::<chrono::DateTime<chrono::Utc>>()
            .expect("expected timestamp")
    });
    assert_eq!(request.deadline, expected);
}

#[actix_web::test]
async fn create_service_with_date_only_deadline() {
    let mut command = MockListingCommand::new();
    command
        .expect_create_listing()
        .withf(|_, kind, draft| {
            let midnight = "2026-05-01T00:00:00Z"
                .parse::<chrono::DateTime<chrono::Utc>>()
                .ok();
            *kind == ListingKind::Service
                && draft.details
                    == ListingDetailsDraft::Service {
                        deadline: midnight,
                        payment: Some(20.0),
                    }
        })
        .times(1)
        .returning(|_, kind, _| fixture_listing(kind, ListingId::from_uuid(FIXTURE_LISTING_ID)));
    let state = HttpState {
        listings: Arc::new(command),
        ..HttpState::fixture()
    };
    let app = actix_test::init_service(test_app(state)).await;
    let cookie = login_as_ada(&app).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/listings/services")
            .cookie(cookie)
            .set_json(json!({ "title": "Move a sofa", "deadline": "2026-05-01", "payment": 20 }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn create_rejects_unparseable_deadline() {
    let mut command = MockListingCommand::new();
    command.expect_create_listing().times(0);
    let state = HttpState {
        listings: Arc::new(command),
        ..HttpState::fixture()
    };
    let app = actix_test::init_service(test_app(state)).await;
    let cookie = login_as_ada(&app).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/listings/services")
            .cookie(cookie)
            .set_json(json!({ "title": "Move a sofa", "deadline": "next tuesday" }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
}
