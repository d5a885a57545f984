use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use crate::core::principal::Principal;
use crate::db::types::{ADMIN_ROLE_ID, SUPER_ADMIN_ROLE_ID};
use crate::test_support;

const PASSWORD: &str = "correct-horse";

async fn send(
    ctx: &test_support::TestContext,
    method: Method,
    uri: &str,
    token: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(method, uri, Some(token), body))
        .await
        .expect("response");
    let status = response.status();
    (status, test_support::read_json(response).await)
}

#[tokio::test]
async fn admin_provisions_course_offering_and_enrollment() {
    let ctx = test_support::setup_test_context().await;
    let admin = test_support::insert_admin(ctx.state.db(), "clerk", PASSWORD, ADMIN_ROLE_ID).await;
    let principal = Principal::from_admin(admin).expect("admin role");
    let token = test_support::bearer_token(&ctx.state, &principal).await;

    let (status, teacher) = send(
        &ctx,
        Method::POST,
        "/api/v1/admin/teachers",
        &token,
        Some(json!({
            "username": "hopper",
            "email": "hopper@school.test",
            "password": PASSWORD,
            "full_name": "Grace Hopper",
            "department": "Computer Science"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{teacher}");

    let (status, student) = send(
        &ctx,
        Method::POST,
        "/api/v1/admin/students",
        &token,
        Some(json!({
            "student_id_no": "S-00001",
            "username": "ada",
            "email": "ada@school.test",
            "password": PASSWORD,
            "full_name": "Ada Lovelace"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{student}");

    let (status, course) = send(
        &ctx,
        Method::POST,
        "/api/v1/admin/courses",
        &token,
        Some(json!({ "code": "CS101", "name": "Algorithms", "credit_hours": 3.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{course}");

    let (status, body) = send(
        &ctx,
        Method::POST,
        "/api/v1/admin/offerings",
        &token,
        Some(json!({ "course_id": course["id"], "academic_year": "2024-2026", "semester": "first" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");

    let (status, offering) = send(
        &ctx,
        Method::POST,
        "/api/v1/admin/offerings",
        &token,
        Some(json!({ "course_id": course["id"], "academic_year": "2024-2025", "semester": "first" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{offering}");
    let offering_id = offering["id"].as_i64().expect("offering id");

    let (status, assignment) = send(
        &ctx,
        Method::POST,
        &format!("/api/v1/admin/offerings/{offering_id}/teachers"),
        &token,
        Some(json!({ "teacher_id": teacher["id"], "assigned_date": "2024-09-01" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{assignment}");
    assert_eq!(assignment["assigned_date"], "2024-09-01");

    let (status, _) = send(
        &ctx,
        Method::POST,
        &format!("/api/v1/admin/offerings/{offering_id}/enrollments"),
        &token,
        Some(json!({ "student_id": student["id"] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &ctx,
        Method::POST,
        &format!("/api/v1/admin/offerings/{offering_id}/enrollments"),
        &token,
        Some(json!({ "student_id": student["id"] })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &ctx,
        Method::POST,
        &format!("/api/v1/admin/offerings/{offering_id}/enrollments"),
        &token,
        Some(json!({ "student_id": 9999 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn only_super_admins_manage_admins() {
    let ctx = test_support::setup_test_context().await;
    let db = ctx.state.db();
    let root = test_support::insert_admin(db, "root", PASSWORD, SUPER_ADMIN_ROLE_ID).await;
    let clerk = test_support::insert_admin(db, "clerk", PASSWORD, ADMIN_ROLE_ID).await;

    let root_token =
        test_support::bearer_token(&ctx.state, &Principal::from_admin(root).expect("role")).await;
    let clerk_token =
        test_support::bearer_token(&ctx.state, &Principal::from_admin(clerk).expect("role")).await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/v1/admin/admins",
            Some(&clerk_token),
            None,
        ))
        .await
        .expect("clerk list");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let (status, created) = send(
        &ctx,
        Method::POST,
        "/api/v1/admin/admins",
        &root_token,
        Some(json!({
            "username": "registrar",
            "email": "registrar@school.test",
            "password": PASSWORD,
            "full_name": "Registrar"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(created["role"], "admin");
    assert_eq!(created["role_id"], ADMIN_ROLE_ID);

    let (status, listed) = send(&ctx, Method::GET, "/api/v1/admin/admins", &root_token, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn usernames_with_at_sign_are_rejected() {
    let ctx = test_support::setup_test_context().await;
    let admin = test_support::insert_admin(ctx.state.db(), "clerk", PASSWORD, ADMIN_ROLE_ID).await;
    let token =
        test_support::bearer_token(&ctx.state, &Principal::from_admin(admin).expect("role")).await;

    let (status, _) = send(
        &ctx,
        Method::POST,
        "/api/v1/admin/teachers",
        &token,
        Some(json!({
            "username": "a@b",
            "email": "ab@school.test",
            "password": PASSWORD,
            "full_name": "A B"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn emails_differing_only_by_case_conflict() {
    let ctx = test_support::setup_test_context().await;
    let admin = test_support::insert_admin(ctx.state.db(), "clerk", PASSWORD, ADMIN_ROLE_ID).await;
    let token =
        test_support::bearer_token(&ctx.state, &Principal::from_admin(admin).expect("role")).await;

    let (status, body) = send(
        &ctx,
        Method::POST,
        "/api/v1/admin/students",
        &token,
        Some(json!({
            "student_id_no": "S-00001",
            "username": "first",
            "email": "Ada@school.test",
            "password": "first-password",
            "full_name": "Ada First"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    let (status, body) = send(
        &ctx,
        Method::POST,
        "/api/v1/admin/students",
        &token,
        Some(json!({
            "student_id_no": "S-00002",
            "username": "second",
            "email": "ada@school.test",
            "password": "second-password",
            "full_name": "Ada Second"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT, "{body}");

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "identifier": "ada@school.test", "password": "first-password" })),
        ))
        .await
        .expect("login");
    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["principal"]["username"], "first");
}

#[tokio::test]
async fn repository_rejects_case_variant_emails() {
    let ctx = test_support::setup_test_context().await;
    let db = ctx.state.db();
    test_support::insert_teacher(db, "hopper", "Grace Hopper", PASSWORD).await;

    let err = crate::repositories::teachers::create(
        db,
        crate::repositories::teachers::CreateTeacher {
            username: "grace",
            email: "HOPPER@School.Test",
            hashed_password: crate::core::security::hash_password(PASSWORD).expect("hash"),
            full_name: "Grace",
            department: None,
            created_at: crate::core::time::primitive_now_utc(),
        },
    )
    .await
    .expect_err("case variant email must conflict");
    assert!(crate::db::is_unique_violation(&err), "{err}");
}
