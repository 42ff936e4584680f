use std::sync::Arc;

use rag_frontend::{
    api::*,
    flow::{QueryFlow, QueryState, Submission, UploadFlow},
    view, Config, Error, Locale, RemoteClient,
};
use serde_json::json;
use wiremock::{
    matchers::{body_json, method, path},
    Mock, MockServer, ResponseTemplate,
};

fn config(server: &MockServer) -> Config {
    Config {
        api_url: format!("{}/api/v1", server.uri()),
        ..Config::default()
    }
}

fn client(server: &MockServer) -> RemoteClient {
    RemoteClient::new(&config(server)).unwrap()
}

#[tokio::test]
async fn health_check_reports_status_and_version() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/health"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": "healthy", "version": "1.0.0"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let status = client(&server).health_check().await.unwrap();

    assert_eq!(
        status,
        HealthStatus {
            status: "healthy".into(),
            version: "1.0.0".into()
        }
    );
}

#[tokio::test]
async fn health_check_failure_is_service_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/health"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client(&server).health_check().await.unwrap_err();

    assert!(matches!(err, Error::ServiceUnavailable(_)), "{err:?}");
}

#[tokio::test]
async fn unreachable_service_is_unavailable_or_failed() {
    let config = Config {
        api_url: "http://127.0.0.1:1/api/v1".into(),
        ..Config::default()
    };
    let client = RemoteClient::new(&config).unwrap();

    assert!(matches!(
        client.health_check().await,
        Err(Error::ServiceUnavailable(_))
    ));
    assert_eq!(
        client.delete_collection().await,
        Err(Error::RequestFailed("Failed to delete the collection.".into()))
    );
}

#[tokio::test]
async fn upload_posts_text_and_metadata() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/documents/upload"))
        .and(body_json(json!({"text": "문서 내용", "metadata": {"source": "wiki"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "document_id": "7f3c",
            "message": "문서가 성공적으로 업로드되었습니다."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut request = UploadRequest::new("문서 내용");
    request.metadata = json!({"source": "wiki"}).as_object().cloned();
    let ack = client(&server).upload_document(request).await.unwrap();

    assert!(ack.success);
    assert_eq!(ack.document_id.as_deref(), Some("7f3c"));
}

#[tokio::test]
async fn upload_failure_carries_server_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/documents/upload"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({"detail": "문서 업로드 중 오류가 발생했습니다: timeout"})),
        )
        .mount(&server)
        .await;

    let err = client(&server)
        .upload_document(UploadRequest::new("doc"))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        Error::RequestFailed("문서 업로드 중 오류가 발생했습니다: timeout".into())
    );
}

#[tokio::test]
async fn upload_failure_without_message_uses_localized_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/documents/upload"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let config = Config {
        locale: Locale::Ko,
        ..config(&server)
    };
    let err = RemoteClient::new(&config)
        .unwrap()
        .upload_document(UploadRequest::new("doc"))
        .await
        .unwrap_err();

    assert_eq!(err, Error::RequestFailed("문서 업로드에 실패했습니다.".into()));
}

#[tokio::test]
async fn query_round_trip_keeps_source_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/query"))
        .and(body_json(json!({"query": "What is X?", "top_k": 3})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "answer": "X is Y",
            "sources": [
                {"text": "doc1", "score": 0.92, "metadata": {"document_id": "a"}},
                {"text": "doc2", "score": 0.41}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client(&server)
        .query(QueryRequest {
            query: "What is X?".into(),
            top_k: 3,
        })
        .await
        .unwrap();

    assert_eq!(resp.answer, "X is Y");
    let texts: Vec<&str> = resp.sources.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, ["doc1", "doc2"]);
}

#[tokio::test]
async fn out_of_range_top_k_reaches_the_server_and_its_verdict_is_shown() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/query"))
        .and(body_json(json!({"query": "q", "top_k": 50})))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [{
                "type": "less_than_equal",
                "loc": ["body", "top_k"],
                "msg": "Input should be less than or equal to 10"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server)
        .query(QueryRequest {
            query: "q".into(),
            top_k: 50,
        })
        .await
        .unwrap_err();

    assert_eq!(
        err,
        Error::RequestFailed("Input should be less than or equal to 10".into())
    );
}

#[tokio::test]
async fn malformed_query_response_is_a_request_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": "?"})))
        .mount(&server)
        .await;

    let err = client(&server)
        .query(QueryRequest {
            query: "q".into(),
            top_k: 3,
        })
        .await
        .unwrap_err();

    assert_eq!(err, Error::RequestFailed("Failed to process the query.".into()));
}

#[tokio::test]
async fn delete_collection_uses_delete_verb() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/collection"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "컬렉션이 성공적으로 삭제되었습니다."})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let ack = client(&server).delete_collection().await.unwrap();

    assert_eq!(
        ack.message.as_deref(),
        Some("컬렉션이 성공적으로 삭제되었습니다.")
    );
}

#[tokio::test]
async fn delete_failure_prefers_message_field() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/collection"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "collection is locked"})))
        .mount(&server)
        .await;

    let err = client(&server).delete_collection().await.unwrap_err();

    assert_eq!(err, Error::RequestFailed("collection is locked".into()));
}

#[tokio::test]
async fn query_flow_renders_the_answer_from_the_service() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "answer": "X is Y",
            "sources": [{"text": "doc1", "score": 0.92}]
        })))
        .mount(&server)
        .await;

    let config = config(&server);
    let flow = QueryFlow::new(Arc::new(RemoteClient::new(&config).unwrap()), &config);
    flow.set_query("What is X?").await;

    assert_eq!(flow.submit().await, Submission::Sent);
    let state = flow.state().await;
    assert!(matches!(state, QueryState::Answered(_)));

    let out = view::query_output(&state, Locale::En).unwrap();
    assert!(out.contains("X is Y"));
    assert!(out.contains("Similarity: 92.0%"));
}

#[tokio::test]
async fn blank_upload_never_reaches_the_service() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = config(&server);
    let flow = UploadFlow::new(Arc::new(RemoteClient::new(&config).unwrap()), &config);
    flow.set_text(" \n ").await;

    assert_eq!(flow.submit().await, Submission::Invalid);
}

#[tokio::test]
async fn null_sources_and_metadata_still_yield_an_answer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "answer": "a",
            "sources": [{"text": "t", "score": null, "metadata": null}]
        })))
        .mount(&server)
        .await;

    let resp = client(&server)
        .query(QueryRequest {
            query: "q".into(),
            top_k: 3,
        })
        .await
        .unwrap();

    assert_eq!(resp.answer, "a");
    assert!(resp.sources[0].metadata.is_empty());
}
