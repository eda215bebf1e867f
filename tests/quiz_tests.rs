// tests/quiz_tests.rs

use tokio::task::JoinSet;

use crate::common::{TestApp, create_question, spawn_app, spawn_app_on_file};

mod common;

async fn submit(app: &TestApp, payload: serde_json::Value) -> reqwest::Response {
    app.client
        .post(format!("{}/api/v1/quiz/submit", app.address))
        .json(&payload)
        .send()
        .await
        .expect("Submit failed")
}

async fn get_json(app: &TestApp, path: &str) -> (u16, serde_json::Value) {
    let response = app
        .client
        .get(format!("{}{}", app.address, path))
        .send()
        .await
        .expect("Request failed");
    let status = response.status().as_u16();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn submit_scores_answers() {
    // Arrange
    let app = spawn_app(false).await;
    let q1 = create_question(&app, &["A", "B", "C"], 1).await;
    let q2 = create_question(&app, &["A", "B", "C"], 2).await;
    let user_id = format!("u_{}", &uuid::Uuid::new_v4().to_string()[..8]);

    // Act
    let response = submit(
        &app,
        serde_json::json!({
            "userId": user_id,
            "answers": { q1.to_string(): 1, q2.to_string(): 0 },
            "timeSpent": 4200
        }),
    )
    .await;

    // Assert
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Quiz submitted successfully");

    let data = &body["data"];
    assert!(data["id"].as_i64().unwrap() > 0);
    assert_eq!(data["userId"], user_id);
    assert_eq!(data["score"], 1);
    assert_eq!(data["total"], 2);
    assert_eq!(data["percentage"], 50.0);
    assert_eq!(data["timeSpent"], 4200);
    assert!(data["createdAt"].is_string());

    let answers = data["answers"].as_array().unwrap();
    assert_eq!(answers.len(), 2);
    assert_eq!(answers[0]["questionId"], q1);
    assert_eq!(answers[0]["userAnswer"], 1);
    assert_eq!(answers[0]["correctAnswer"], 1);
    assert_eq!(answers[0]["isCorrect"], true);
    assert_eq!(answers[0]["selectedOption"], "B");
    assert_eq!(answers[0]["correctOption"], "B");
    assert_eq!(answers[1]["questionId"], q2);
    assert_eq!(answers[1]["isCorrect"], false);
    assert_eq!(answers[1]["selectedOption"], "A");
    assert_eq!(answers[1]["correctOption"], "C");
    assert_eq!(answers[1]["question"], "Pick option 2");
}

#[tokio::test]
async fn unknown_question_counts_toward_total() {
    let app = spawn_app(false).await;
    let q1 = create_question(&app, &["A", "B"], 1).await;

    let response = submit(
        &app,
        serde_json::json!({
            "answers": { q1.to_string(): 1, "bogus": 0 },
            "timeSpent": 10
        }),
    )
    .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    let data = &body["data"];
    assert_eq!(data["score"], 1);
    assert_eq!(data["total"], 2);
    assert_eq!(data["percentage"], 50.0);
    assert_eq!(data["answers"].as_array().unwrap().len(), 1);
    assert_eq!(data["userId"], "");
}

#[tokio::test]
async fn out_of_range_selection_is_wrong_with_empty_text() {
    let app = spawn_app(false).await;
    let q1 = create_question(&app, &["A", "B"], 0).await;

    let body: serde_json::Value = submit(
        &app,
        serde_json::json!({ "answers": { q1.to_string(): 9 }, "timeSpent": 0 }),
    )
    .await
    .json()
    .await
    .unwrap();

    let detail = &body["data"]["answers"][0];
    assert_eq!(detail["isCorrect"], false);
    assert_eq!(detail["selectedOption"], "");
    assert_eq!(detail["correctOption"], "A");
    assert_eq!(body["data"]["percentage"], 0.0);
}

#[tokio::test]
async fn empty_answers_score_zero() {
    let app = spawn_app(false).await;

    let response = submit(&app, serde_json::json!({ "answers": {}, "timeSpent": 0 })).await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["score"], 0);
    assert_eq!(body["data"]["total"], 0);
    assert_eq!(body["data"]["percentage"], 0.0);
    assert_eq!(body["data"]["answers"], serde_json::json!([]));
}

#[tokio::test]
async fn submit_rejects_invalid_bodies() {
    let app = spawn_app(false).await;

    let invalid = [
        serde_json::json!({ "answers": { "1": 0 }, "timeSpent": -1 }),
        serde_json::json!({ "answers": { "1": 0 } }),
        serde_json::json!({ "timeSpent": 10 }),
        serde_json::json!({ "answers": { "1": "zero" }, "timeSpent": 10 }),
        serde_json::json!([1, 2, 3]),
    ];

    for payload in invalid {
        let response = submit(&app, payload.clone()).await;
        assert_eq!(response.status().as_u16(), 422, "payload: {}", payload);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["success"], false);
    }

    // Nothing was stored.
    let (_, stats) = get_json(&app, "/api/v1/quiz/stats").await;
    assert_eq!(stats["data"]["totalSubmissions"], 0);
}

#[tokio::test]
async fn long_user_id_is_stored_verbatim() {
    let app = spawn_app(false).await;
    let user_id = "u".repeat(1024);

    let response = submit(
        &app,
        serde_json::json!({ "userId": user_id, "answers": {}, "timeSpent": 5 }),
    )
    .await;
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["userId"], user_id);

    let id = body["data"]["id"].as_i64().unwrap();
    let (status, stored) = get_json(&app, &format!("/api/v1/quiz/results/{}", id)).await;
    assert_eq!(status, 200);
    assert_eq!(stored["data"]["userId"], user_id);
}

#[tokio::test]
async fn signed_key_does_not_resolve() {
    let app = spawn_app(false).await;
    let q = create_question(&app, &["A", "B"], 1).await;

    let response = submit(
        &app,
        serde_json::json!({ "answers": { format!("+{}", q): 1 }, "timeSpent": 5 }),
    )
    .await;
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["score"], 0);
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["answers"], serde_json::json!([]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_submits_all_succeed() {
    const SUBMITS: usize = 60;

    let (app, path) = spawn_app_on_file(5).await;
    let q1 = create_question(&app, &["A", "B"], 0).await;
    let q2 = create_question(&app, &["A", "B"], 1).await;

    let mut set = JoinSet::new();
    for i in 0..SUBMITS {
        let client = app.client.clone();
        let url = format!("{}/api/v1/quiz/submit", app.address);
        let payload = serde_json::json!({
            "userId": format!("user-{}", i),
            "answers": { q1.to_string(): 0, q2.to_string(): (i % 2) as i64 },
            "timeSpent": 1000
        });
        set.spawn(async move {
            let response = client.post(url).json(&payload).send().await.unwrap();
            response.status().as_u16()
        });
    }

    let mut statuses = Vec::with_capacity(SUBMITS);
    while let Some(status) = set.join_next().await {
        statuses.push(status.unwrap());
    }
    assert!(statuses.iter().all(|&s| s == 200), "statuses: {:?}", statuses);

    let (_, stats) = get_json(&app, "/api/v1/quiz/stats").await;
    assert_eq!(stats["data"]["totalSubmissions"], SUBMITS as i64);

    app.pool.close().await;
    let _ = std::fs::remove_file(&path);
    let _ = std::fs::remove_file(path.with_extension("db-wal"));
    let _ = std::fs::remove_file(path.with_extension("db-shm"));
}

#[tokio::test]
async fn submit_rejects_non_json_body() {
    let app = spawn_app(false).await;

    let response = app
        .client
        .post(format!("{}/api/v1/quiz/submit", app.address))
        .header("Content-Type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 422);
}

#[tokio::test]
async fn result_retrieval_is_stable() {
    let app = spawn_app(false).await;
    let q1 = create_question(&app, &["A", "B", "C"], 1).await;
    let q2 = create_question(&app, &["A", "B", "C"], 2).await;

    let submitted: serde_json::Value = submit(
        &app,
        serde_json::json!({
            "userId": "alice",
            "answers": { q1.to_string(): 1, q2.to_string(): 0 },
            "timeSpent": 1500
        }),
    )
    .await
    .json()
    .await
    .unwrap();
    let id = submitted["data"]["id"].as_i64().unwrap();

    let (status, first) = get_json(&app, &format!("/api/v1/quiz/results/{}", id)).await;
    assert_eq!(status, 200);
    let (_, second) = get_json(&app, &format!("/api/v1/quiz/results/{}", id)).await;

    assert_eq!(first["message"], "Quiz result retrieved successfully");
    assert_eq!(first["data"], second["data"]);
    assert_eq!(first["data"]["score"], submitted["data"]["score"]);
    assert_eq!(first["data"]["total"], submitted["data"]["total"]);
    assert_eq!(first["data"]["percentage"], submitted["data"]["percentage"]);
    assert_eq!(first["data"]["answers"], submitted["data"]["answers"]);
    assert_eq!(first["data"]["userId"], "alice");
    assert_eq!(first["data"]["timeSpent"], 1500);
}

#[tokio::test]
async fn result_details_follow_question_edits_but_score_is_frozen() {
    let app = spawn_app(false).await;
    let q1 = create_question(&app, &["A", "B"], 1).await;

    let submitted: serde_json::Value = submit(
        &app,
        serde_json::json!({ "answers": { q1.to_string(): 1 }, "timeSpent": 5 }),
    )
    .await
    .json()
    .await
    .unwrap();
    let id = submitted["data"]["id"].as_i64().unwrap();
    assert_eq!(submitted["data"]["score"], 1);

    // Move the correct answer and rename the options.
    let response = app
        .client
        .put(format!("{}/api/v1/questions/{}", app.address, q1))
        .json(&serde_json::json!({
            "question": "Edited prompt",
            "options": ["First", "Second"],
            "correctAnswer": 0
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let (_, result) = get_json(&app, &format!("/api/v1/quiz/results/{}", id)).await;
    let data = &result["data"];
    assert_eq!(data["score"], 1);
    assert_eq!(data["percentage"], 100.0);

    let detail = &data["answers"][0];
    assert_eq!(detail["question"], "Edited prompt");
    assert_eq!(detail["selectedOption"], "Second");
    assert_eq!(detail["correctOption"], "First");
    assert_eq!(detail["isCorrect"], false);
}

#[tokio::test]
async fn result_not_found_and_bad_id() {
    let app = spawn_app(false).await;

    let (status, body) = get_json(&app, "/api/v1/quiz/results/424242").await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "Quiz result not found");

    let (status, body) = get_json(&app, "/api/v1/quiz/results/abc").await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Invalid quiz result ID");
}

#[tokio::test]
async fn report_includes_counts_and_grade() {
    let app = spawn_app(false).await;
    let mut answers = serde_json::Map::new();
    // 4 of 5 correct -> 80% -> B
    for i in 0..5 {
        let id = create_question(&app, &["A", "B"], 0).await;
        let selected = if i == 4 { 1 } else { 0 };
        answers.insert(id.to_string(), serde_json::json!(selected));
    }

    let submitted: serde_json::Value = submit(
        &app,
        serde_json::json!({ "answers": answers, "timeSpent": 60000 }),
    )
    .await
    .json()
    .await
    .unwrap();
    let id = submitted["data"]["id"].as_i64().unwrap();

    let (status, report) = get_json(&app, &format!("/api/v1/quiz/results/{}/report", id)).await;
    assert_eq!(status, 200);

    let data = &report["data"];
    assert_eq!(data["score"], 4);
    assert_eq!(data["total"], 5);
    assert_eq!(data["percentage"], 80.0);
    assert_eq!(data["correctAnswers"], 4);
    assert_eq!(data["wrongAnswers"], 1);
    assert_eq!(data["grade"], "B");
    assert_eq!(data["answers"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn stats_aggregate_submissions() {
    let app = spawn_app(false).await;
    let q1 = create_question(&app, &["A", "B"], 0).await;
    let q2 = create_question(&app, &["A", "B"], 0).await;

    let (_, empty) = get_json(&app, "/api/v1/quiz/stats").await;
    assert_eq!(
        empty["data"],
        serde_json::json!({
            "totalSubmissions": 0,
            "averageScore": 0.0,
            "averageTime": 0.0,
            "highestScore": 0,
            "lowestScore": 0
        })
    );

    submit(
        &app,
        serde_json::json!({ "answers": { q1.to_string(): 0, q2.to_string(): 0 }, "timeSpent": 1000 }),
    )
    .await;
    submit(
        &app,
        serde_json::json!({ "answers": { q1.to_string(): 1, q2.to_string(): 1 }, "timeSpent": 3000 }),
    )
    .await;

    let (status, stats) = get_json(&app, "/api/v1/quiz/stats").await;
    assert_eq!(status, 200);
    let data = &stats["data"];
    assert_eq!(data["totalSubmissions"], 2);
    assert_eq!(data["averageScore"], 1.0);
    assert_eq!(data["averageTime"], 2000.0);
    assert_eq!(data["highestScore"], 2);
    assert_eq!(data["lowestScore"], 0);
}

#[tokio::test]
async fn submit_against_seeded_questions() {
    let app = spawn_app(true).await;

    let (_, body) = get_json(&app, "/api/v1/questions").await;
    let mut answers = serde_json::Map::new();
    for q in body["data"].as_array().unwrap() {
        answers.insert(q["id"].as_i64().unwrap().to_string(), q["correctAnswer"].clone());
    }

    let result: serde_json::Value = submit(
        &app,
        serde_json::json!({ "userId": "perfect", "answers": answers, "timeSpent": 120000 }),
    )
    .await
    .json()
    .await
    .unwrap();

    assert_eq!(result["data"]["score"], 20);
    assert_eq!(result["data"]["total"], 20);
    assert_eq!(result["data"]["percentage"], 100.0);
}
