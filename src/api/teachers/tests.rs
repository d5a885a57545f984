use axum::http::{Method, StatusCode};
use serde_json::json;
use time::macros::date;
use tower::ServiceExt;

use crate::core::principal::Principal;
use crate::db::types::{Semester, ADMIN_ROLE_ID};
use crate::test_support;

const PASSWORD: &str = "correct-horse";

fn grade_body(student_id_no: &str, course_name: &str, letter: &str) -> serde_json::Value {
    json!({ "student_id_no": student_id_no, "course_name": course_name, "letter_grade": letter })
}

#[tokio::test]
async fn add_then_update_grade_is_reflected_in_history() {
    let ctx = test_support::setup_test_context().await;
    let db = ctx.state.db();

    let teacher = test_support::insert_teacher(db, "hopper", "Grace Hopper", PASSWORD).await;
    let student = test_support::insert_student(db, "S-00001", "ada", PASSWORD).await;
    let course = test_support::insert_course(db, "CS101", "Algorithms", 3.0).await;
    let offering = test_support::insert_offering(db, &course, "2024-2025", Semester::First).await;
    test_support::assign(db, &offering, &teacher, date!(2024 - 09 - 01)).await;
    test_support::enroll(db, &offering, &student).await;

    let teacher_token = test_support::bearer_token(&ctx.state, &Principal::Teacher(teacher)).await;
    let student_token = test_support::bearer_token(&ctx.state, &Principal::Student(student)).await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::PUT,
            "/api/v1/teachers/me/grades",
            Some(&teacher_token),
            Some(grade_body("S-00001", "Algorithms", "B")),
        ))
        .await
        .expect("update before add");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/teachers/me/grades",
            Some(&teacher_token),
            Some(grade_body("S-00001", "Algorithms", "B+")),
        ))
        .await
        .expect("add grade");
    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["letter_grade"], "B+");
    assert_eq!(body["grade_points"], 3.5);

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/teachers/me/grades",
            Some(&teacher_token),
            Some(grade_body("S-00001", "Algorithms", "A")),
        ))
        .await
        .expect("second add");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::PUT,
            "/api/v1/teachers/me/grades",
            Some(&teacher_token),
            Some(grade_body("S-00001", "Algorithms", "A-")),
        ))
        .await
        .expect("update grade");
    assert_eq!(response.status(), StatusCode::OK);

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/v1/students/me/grades",
            Some(&student_token),
            None,
        ))
        .await
        .expect("history");
    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["records"][0]["letter_grade"], "A-");
    assert_eq!(body["records"][0]["grade_points"], 3.7);
    assert_eq!(body["records"][0]["instructor"], "Grace Hopper");
    assert_eq!(body["summary"]["gpa"], 3.7);
}

#[tokio::test]
async fn invalid_letter_is_a_bad_request() {
    let ctx = test_support::setup_test_context().await;
    let teacher =
        test_support::insert_teacher(ctx.state.db(), "hopper", "Grace Hopper", PASSWORD).await;
    let token = test_support::bearer_token(&ctx.state, &Principal::Teacher(teacher)).await;

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/teachers/me/grades",
            Some(&token),
            Some(grade_body("S-00001", "Algorithms", "E")),
        ))
        .await
        .expect("add grade");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn teachers_only_see_and_grade_their_own_offerings() {
    let ctx = test_support::setup_test_context().await;
    let db = ctx.state.db();

    let owner = test_support::insert_teacher(db, "hopper", "Grace Hopper", PASSWORD).await;
    let outsider = test_support::insert_teacher(db, "knuth", "Donald Knuth", PASSWORD).await;
    let student = test_support::insert_student(db, "S-00001", "ada", PASSWORD).await;
    let course = test_support::insert_course(db, "CS101", "Algorithms", 3.0).await;
    let other = test_support::insert_course(db, "CS102", "Compilers", 4.0).await;

    let offering = test_support::insert_offering(db, &course, "2024-2025", Semester::First).await;
    let other_offering =
        test_support::insert_offering(db, &other, "2024-2025", Semester::First).await;
    test_support::assign(db, &offering, &owner, date!(2024 - 09 - 01)).await;
    test_support::assign(db, &other_offering, &outsider, date!(2024 - 09 - 01)).await;
    test_support::enroll(db, &offering, &student).await;

    let outsider_token =
        test_support::bearer_token(&ctx.state, &Principal::Teacher(outsider)).await;
    let owner_token = test_support::bearer_token(&ctx.state, &Principal::Teacher(owner)).await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/v1/teachers/me/courses/Algorithms/students",
            Some(&outsider_token),
            None,
        ))
        .await
        .expect("outsider roster");
    let body = test_support::read_json(response).await;
    assert_eq!(body, json!([]));

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/teachers/me/grades",
            Some(&outsider_token),
            Some(grade_body("S-00001", "Algorithms", "F")),
        ))
        .await
        .expect("outsider grade");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/v1/teachers/me/courses/Algorithms/students",
            Some(&owner_token),
            None,
        ))
        .await
        .expect("owner roster");
    let body = test_support::read_json(response).await;
    assert_eq!(body[0]["student_id_no"], "S-00001");
    assert_eq!(body[0]["email"], "ada@school.test");

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/v1/teachers/me/courses",
            Some(&owner_token),
            None,
        ))
        .await
        .expect("owner courses");
    let body = test_support::read_json(response).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["course_code"], "CS101");
    assert_eq!(body[0]["assigned_date"], "2024-09-01");
    assert_eq!(body[0]["enrolled_count"], 1);
}

#[tokio::test]
async fn students_cannot_use_teacher_routes() {
    let ctx = test_support::setup_test_context().await;
    let student = test_support::insert_student(ctx.state.db(), "S-00001", "ada", PASSWORD).await;
    let token = test_support::bearer_token(&ctx.state, &Principal::Student(student)).await;

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/v1/teachers/me/courses",
            Some(&token),
            None,
        ))
        .await
        .expect("courses");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn role_guards_only_admit_their_own_kind() {
    let ctx = test_support::setup_test_context().await;
    let db = ctx.state.db();
    let teacher = test_support::insert_teacher(db, "hopper", "Grace Hopper", PASSWORD).await;
    let clerk = test_support::insert_admin(db, "clerk", PASSWORD, ADMIN_ROLE_ID).await;
    let teacher_token = test_support::bearer_token(&ctx.state, &Principal::Teacher(teacher)).await;
    let clerk_token = test_support::bearer_token(
        &ctx.state,
        &Principal::from_admin(clerk).expect("admin role"),
    )
    .await;

    let cases = [
        (&teacher_token, "/api/v1/students/me/grades", StatusCode::FORBIDDEN),
        (&teacher_token, "/api/v1/admin/teachers", StatusCode::FORBIDDEN),
        (&teacher_token, "/api/v1/teachers/me/courses", StatusCode::OK),
        (&clerk_token, "/api/v1/teachers/me/courses", StatusCode::FORBIDDEN),
        (&clerk_token, "/api/v1/admin/admins", StatusCode::FORBIDDEN),
        (&clerk_token, "/api/v1/admin/teachers", StatusCode::OK),
    ];

    for (token, uri, expected) in cases {
        let response = ctx
            .app
            .clone()
            .oneshot(test_support::json_request(Method::GET, uri, Some(token), None))
            .await
            .expect("response");
        assert_eq!(response.status(), expected, "{uri}");
    }
}
