pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::resume::handlers as resume;
use crate::sessions::handlers as sessions;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Catalog + analysis
        .route("/api/analyze", post(analysis::handle_analyze))
        .route("/api/skills", get(analysis::handle_list_skills))
        .route("/api/industries", get(analysis::handle_list_industries))
        // Skill assessment
        .route(
            "/api/assessment/start",
            post(sessions::handle_start_assessment),
        )
        .route(
            "/api/assessment/submit",
            post(sessions::handle_submit_assessment),
        )
        .route(
            "/api/assessment/history/:user_id",
            get(sessions::handle_assessment_history),
        )
        .route(
            "/api/assessment/insights/:user_id",
            get(sessions::handle_assessment_insights),
        )
        // Mock interview
        .route("/api/interview/start", post(sessions::handle_start_interview))
        .route(
            "/api/interview/submit",
            post(sessions::handle_submit_interview),
        )
        .route(
            "/api/interview/history/:user_id",
            get(sessions::handle_interview_history),
        )
        .route(
            "/api/interview/insights/:user_id",
            get(sessions::handle_interview_insights),
        )
        // Resume
        .route("/api/generate-resume", post(resume::handle_generate_resume))
        .route("/downloads/:filename", get(resume::handle_download))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use std::time::Duration;
    use tempfile::TempDir;
    use tower::ServiceExt;

    use crate::analysis::AnalysisSettings;
    use crate::catalog::seed::builtin_catalog;
    use crate::config::Config;
    use crate::sessions::store::RetentionPolicy;

    fn test_config(downloads: &TempDir) -> Config {
        Config {
            database_url: None,
            downloads_dir: downloads.path().to_path_buf(),
            port: 0,
            rust_log: "info".to_string(),
            analysis: AnalysisSettings::default(),
            sessions: RetentionPolicy::default(),
            download_max_age: Duration::from_secs(86_400),
        }
    }

    fn test_app() -> (Router, TempDir) {
        let downloads = tempfile::tempdir().unwrap();
        let config = test_config(&downloads);
        (build_router(AppState::new(builtin_catalog(), config)), downloads)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes.to_vec())
    }

    async fn send_json(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let (status, bytes) = send(app, method, uri, body).await;
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _dir) = test_app();
        let (status, body) = send_json(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"], "careerpath-api");
        assert_eq!(body["catalog"]["careers"], 10);
    }

    #[tokio::test]
    async fn test_analyze_returns_full_report() {
        let (app, _dir) = test_app();
        let (status, body) = send_json(
            &app,
            Method::POST,
            "/api/analyze",
            Some(json!({"skills": ["Python Programming", "SQL"], "interests": ["Technology"]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        for key in [
            "skill_analysis",
            "market_analysis",
            "career_recommendations",
            "learning_plan",
            "resume_guidance",
        ] {
            assert!(body.get(key).is_some(), "missing {key}");
        }
        let top = body["career_recommendations"]["top_careers"].as_array().unwrap();
        assert_eq!(top.len(), 5);
        assert_eq!(body["career_recommendations"]["total_careers_considered"], 10);
    }

    #[tokio::test]
    async fn test_analyze_rejects_bad_input() {
        let (app, _dir) = test_app();
        let too_many: Vec<String> = (0..51).map(|i| format!("skill {i}")).collect();
        let (status, body) = send_json(
            &app,
            Method::POST,
            "/api/analyze",
            Some(json!({"skills": too_many})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (status, body) = send_json(
            &app,
            Method::POST,
            "/api/analyze",
            Some(json!({"skills": "Python"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_skills_and_industries() {
        let (app, _dir) = test_app();
        let (status, body) = send_json(&app, Method::GET, "/api/skills", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["technical"].as_array().unwrap().len(), 7);
        assert_eq!(body["soft_skills"].as_array().unwrap().len(), 8);
        assert_eq!(body["technical"][0]["name"], "Python Programming");

        let (status, body) = send_json(&app, Method::GET, "/api/industries", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0], "Technology");
    }

    #[tokio::test]
    async fn test_assessment_lifecycle() {
        let (app, _dir) = test_app();
        let (status, start) = send_json(
            &app,
            Method::POST,
            "/api/assessment/start",
            Some(json!({"user_id": "alice"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(start["total_questions"], 10);
        assert!(start["question"]["options"].is_array());
        let session_id = start["session_id"].as_str().unwrap().to_string();

        // out-of-range option does not consume the question
        let (status, _) = send_json(
            &app,
            Method::POST,
            "/api/assessment/submit",
            Some(json!({"session_id": session_id, "answer": 9})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let mut last = Value::Null;
        for _ in 0..10 {
            let (status, body) = send_json(
                &app,
                Method::POST,
                "/api/assessment/submit",
                Some(json!({"session_id": session_id, "answer": 1})),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            last = body;
        }
        assert_eq!(last["status"], "completed");
        assert!(last["overall_score"].is_number());

        let (status, body) = send_json(
            &app,
            Method::POST,
            "/api/assessment/submit",
            Some(json!({"session_id": session_id, "answer": 1})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "SESSION_COMPLETED");

        let (_, history) = send_json(&app, Method::GET, "/api/assessment/history/alice", None).await;
        assert_eq!(history["sessions"].as_array().unwrap().len(), 1);

        let (_, insights) = send_json(&app, Method::GET, "/api/assessment/insights/alice", None).await;
        assert_eq!(insights["sessions_completed"], 1);
    }

    #[tokio::test]
    async fn test_unknown_session_is_404() {
        let (app, _dir) = test_app();
        let (status, body) = send_json(
            &app,
            Method::POST,
            "/api/interview/submit",
            Some(json!({"session_id": uuid::Uuid::new_v4(), "answer": "hello"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "UNKNOWN_SESSION");
    }

    #[tokio::test]
    async fn test_interview_lifecycle() {
        let (app, _dir) = test_app();
        let (status, _) = send_json(
            &app,
            Method::POST,
            "/api/interview/start",
            Some(json!({"interview_type": "trivia", "difficulty": "beginner"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, start) = send_json(
            &app,
            Method::POST,
            "/api/interview/start",
            Some(json!({"user_id": "bob", "interview_type": "technical", "difficulty": "beginner"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(start["total_questions"], 3);
        let session_id = start["session_id"].as_str().unwrap().to_string();

        let (status, _) = send_json(
            &app,
            Method::POST,
            "/api/interview/submit",
            Some(json!({"session_id": session_id, "answer": "  "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let mut last = Value::Null;
        for _ in 0..3 {
            let (status, body) = send_json(
                &app,
                Method::POST,
                "/api/interview/submit",
                Some(json!({"session_id": session_id, "answer": "A list is mutable, a tuple is immutable."})),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            last = body;
        }
        assert_eq!(last["status"], "completed");
        assert!(last["evaluation"]["feedback"].is_string());

        let (_, history) = send_json(&app, Method::GET, "/api/interview/history/bob", None).await;
        assert_eq!(history["sessions"][0]["label"], "technical / beginner");
    }

    #[tokio::test]
    async fn test_generate_and_download_resume() {
        let (app, dir) = test_app();
        let (status, body) = send_json(
            &app,
            Method::POST,
            "/api/generate-resume",
            Some(json!({
                "personal_info": {"full_name": "Test User", "email": "test@example.com"},
                "summary": "Test summary for resume generation",
                "experience": [{
                    "job_title": "Intern",
                    "company": "Acme",
                    "start_date": "2024-06",
                    "current": true,
                    "achievements": "Built a dashboard\nCut report time by 30%"
                }],
                "skills": {"technical_skills": ["Python"]},
                "template": "modern"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["resume_content"]["experience"][0]["dates"], "2024-06 - Present");
        assert_eq!(body["resume_content"]["impact_gaps"].as_array().unwrap().len(), 1);

        let url = body["download_url"].as_str().unwrap().to_string();
        assert!(url.starts_with("/downloads/Test_User_"));
        let filename = url.trim_start_matches("/downloads/");
        assert!(dir.path().join(filename).exists());

        let (status, bytes) = send(&app, Method::GET, &url, None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_download_guards() {
        let (app, _dir) = test_app();
        let (status, body) = send_json(&app, Method::GET, "/downloads/missing.pdf", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");

        let (status, body) = send_json(&app, Method::GET, "/downloads/..secret.pdf", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_interview_start_defaults_to_technical_intermediate() {
        let (app, _dir) = test_app();
        let (status, start) =
            send_json(&app, Method::POST, "/api/interview/start", Some(json!({}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(start["label"], "technical / intermediate");
        assert_eq!(start["user_id"], "anonymous");
    }

    #[tokio::test]
    async fn test_submit_accepts_session_id_under_user_id_key() {
        let (app, _dir) = test_app();
        let (_, start) = send_json(&app, Method::POST, "/api/assessment/start", Some(json!({}))).await;
        let session_id = start["session_id"].as_str().unwrap().to_string();

        let (status, body) = send_json(
            &app,
            Method::POST,
            "/api/assessment/submit",
            Some(json!({"user_id": session_id, "answer": 0})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["answered"], 1);
        assert_eq!(body["session_id"], session_id.as_str());
    }

    #[tokio::test]
    async fn test_repeated_starts_are_capped_by_retention() {
        let downloads = tempfile::tempdir().unwrap();
        let mut config = test_config(&downloads);
        config.sessions = RetentionPolicy {
            max_per_user: 2,
            max_total: 3,
            ..RetentionPolicy::default()
        };
        let app = build_router(AppState::new(builtin_catalog(), config));

        for _ in 0..5 {
            let (status, _) =
                send_json(&app, Method::POST, "/api/assessment/start", Some(json!({}))).await;
            assert_eq!(status, StatusCode::OK);
        }
        for user in ["a", "b"] {
            send_json(&app, Method::POST, "/api/assessment/start", Some(json!({"user_id": user}))).await;
        }

        let (_, health) = send_json(&app, Method::GET, "/health", None).await;
        assert_eq!(health["sessions"]["assessment"], 3);
    }

    #[tokio::test]
    async fn test_generate_resume_prunes_expired_downloads() {
        let downloads = tempfile::tempdir().unwrap();
        let stale = downloads.path().join("Stale_00000000.pdf");
        std::fs::write(&stale, b"%PDF").unwrap();
        let mut config = test_config(&downloads);
        config.download_max_age = Duration::ZERO;
        let app = build_router(AppState::new(builtin_catalog(), config));

        let (status, body) = send_json(
            &app,
            Method::POST,
            "/api/generate-resume",
            Some(json!({
                "personal_info": {"full_name": "Fresh User", "email": "fresh@example.com"},
                "summary": "Fresh summary"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(!stale.exists());

        let url = body["download_url"].as_str().unwrap();
        let filename = url.trim_start_matches("/downloads/");
        assert!(downloads.path().join(filename).exists());
    }
}
