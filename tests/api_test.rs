use std::env;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;
use uuid::Uuid;

async fn body_json(response: axum::response::Response) -> JsonValue {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str, payload: &JsonValue) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

#[tokio::test]
async fn exam_flow_end_to_end() {
    dotenvy::dotenv().ok();
    env::set_var("SERVER_ADDRESS", "127.0.0.1:0");

    examhub_backend::config::init_config().expect("init config");
    let pool = examhub_backend::database::pool::create_pool()
        .await
        .expect("pool");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");

    let app = examhub_backend::routes::router(examhub_backend::AppState::new(pool));

    // Unknown ids are 404s with the standard error body.
    let response = app
        .clone()
        .oneshot(get(&format!("/exams/{}", Uuid::new_v4())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert!(body["error"].is_string());

    let response = app
        .clone()
        .oneshot(get(&format!("/attempts/{}", Uuid::new_v4())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert!(body["error"].is_string());

    // Author an exam.
    let payload = json!({
        "title": "Geography Basics",
        "description": "Two quick questions",
        "duration": 15,
        "questions": [
            {
                "question": "Capital of Brazil?",
                "optionA": "Rio de Janeiro",
                "optionB": "Brasilia",
                "optionC": "Sao Paulo",
                "optionD": "Salvador",
                "correctOption": "B"
            },
            {
                "question": "Longest river?",
                "optionA": "Amazon",
                "optionB": "Mississippi",
                "optionC": "Nile",
                "optionD": "Yangtze",
                "correctOption": "C"
            }
        ]
    });
    let response = app.clone().oneshot(post("/exams", &payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["totalQuestions"], 2);
    assert_eq!(created["questionsToShow"], 2);
    let exam_id = created["id"].as_str().expect("exam id").to_string();
    let question_ids: Vec<String> = created["questions"]
        .as_array()
        .expect("questions")
        .iter()
        .map(|q| q["id"].as_str().expect("question id").to_string())
        .collect();
    assert_eq!(question_ids.len(), 2);

    // Students see the questions without correct options.
    let response = app
        .clone()
        .oneshot(get(&format!("/exams/{}", exam_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let exam_view = body_json(response).await;
    let questions = exam_view["questions"].as_array().expect("questions");
    assert_eq!(questions.len(), 2);
    assert!(questions.iter().all(|q| q.get("correctOption").is_none()));

    // One right answer, one left blank: half the questions, half the score.
    let submission = json!({
        "examId": exam_id,
        "studentName": "Alice",
        "answers": [
            { "questionId": question_ids[0], "selectedOption": "B" },
            { "questionId": question_ids[1], "selectedOption": null }
        ]
    });
    let response = app
        .clone()
        .oneshot(post("/attempts", &submission))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let attempt = body_json(response).await;
    assert_eq!(attempt["score"], 50);
    let attempt_id = attempt["id"].as_str().expect("attempt id").to_string();
    let answers = attempt["answers"].as_array().expect("answers");
    assert_eq!(answers.len(), 2);
    assert_eq!(answers[0]["isCorrect"], true);
    assert_eq!(answers[1]["isCorrect"], false);
    assert_eq!(answers[1]["selectedOption"], JsonValue::Null);

    // The stored attempt reveals correct options post hoc.
    let response = app
        .clone()
        .oneshot(get(&format!("/attempts/{}", attempt_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = body_json(response).await;
    assert_eq!(fetched["score"], 50);
    assert_eq!(fetched["exam"]["title"], "Geography Basics");
    assert_eq!(fetched["answers"][0]["question"]["correctOption"], "B");
    assert_eq!(fetched["answers"][1]["question"]["correctOption"], "C");

    // Submitting the same answers again grades identically.
    let response = app
        .clone()
        .oneshot(post("/attempts", &submission))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let replay = body_json(response).await;
    assert_eq!(replay["score"], 50);
}
