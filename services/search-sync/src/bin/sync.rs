/// Appwrite → Algolia 同期Lambdaエントリポイント
///
/// AppwriteのWebhook（Lambda Function URL経由のHTTPリクエスト）を受け取り、
/// 変更されたドキュメントをAlgolia検索インデックスに反映する。
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use search_sync::application::SyncHandler;
use search_sync::infrastructure::{init_logging, AlgoliaClient, SyncConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    info!("同期Lambda関数を初期化");

    run(service_fn(handler)).await
}

/// HTTPリクエストハンドラー
///
/// # 処理フロー
/// 1. 環境変数から設定を読み込み・検証（不足時はLambdaエラーで終了）
/// 2. AlgoliaClientを呼び出しごとに作成
/// 3. SyncHandlerでイベントを処理してJSONレスポンスを返す
async fn handler(request: Request) -> Result<Response<Body>, Error> {
    let config = match SyncConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "設定読み込み失敗");
            return Err(err.into());
        }
    };

    let client = match AlgoliaClient::new(config.algolia()) {
        Ok(client) => client,
        Err(err) => {
            error!(error = %err, "AlgoliaClient作成失敗");
            return Err(err.into());
        }
    };
    let sync_handler = SyncHandler::new(client, &config);

    let response = sync_handler.handle_request(&request).await?;

    info!(status = response.status().as_u16(), "同期レスポンス送信");

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_http::http::Request as HttpRequest;
    use search_sync::application::EVENT_HEADER;
    use search_sync::infrastructure::setting;
    use serde_json::{json, Value};
    use serial_test::serial;

    // 注: Rust 2024エディションでset_var/remove_varはunsafe
    unsafe fn set_env(key: &str, value: &str) {
        unsafe { std::env::set_var(key, value) };
    }

    unsafe fn remove_env(key: &str) {
        unsafe { std::env::remove_var(key) };
    }

    unsafe fn cleanup_env() {
        unsafe {
            remove_env(setting::ALGOLIA_APP_ID);
            remove_env(setting::ALGOLIA_ADMIN_API_KEY);
            remove_env(setting::ALGOLIA_INDEX_ID);
            remove_env(setting::ALGOLIA_HOST);
            remove_env(setting::APPWRITE_NOTE_COLLECTION_ID);
            remove_env(setting::APPWRITE_SUBJECT_COLLECTION_ID);
            remove_env(setting::APPWRITE_YOUTUBE_COLLECTION_ID);
            remove_env(setting::APPWRITE_QUIZ_COLLECTION_ID);
            remove_env(setting::APPWRITE_EVENT_COLLECTION_SEGMENT);
        }
    }

    // Algoliaへは到達しない経路のみをテストする
    unsafe fn setup_env() {
        unsafe {
            cleanup_env();
            set_env(setting::ALGOLIA_APP_ID, "TESTAPP");
            set_env(setting::ALGOLIA_ADMIN_API_KEY, "test-admin-key");
            set_env(setting::ALGOLIA_INDEX_ID, "test-index");
            set_env(setting::APPWRITE_NOTE_COLLECTION_ID, "notes");
        }
    }

    fn request(event_type: Option<&str>, body: Value) -> Request {
        let mut builder = HttpRequest::builder().method("POST").uri("/");
        if let Some(event_type) = event_type {
            builder = builder.header(EVENT_HEADER, event_type);
        }
        builder.body(Body::Text(body.to_string())).unwrap()
    }

    fn body_json(response: &Response<Body>) -> Value {
        let body = match response.body() {
            Body::Text(text) => text.clone(),
            Body::Binary(bytes) => String::from_utf8(bytes.clone()).unwrap(),
            Body::Empty => String::new(),
            _ => panic!("予期しないBody型"),
        };
        serde_json::from_str(&body).unwrap()
    }

    #[tokio::test]
    #[serial(sync_env)]
    async fn test_handler_fails_without_required_config() {
        init_logging();
        unsafe {
            cleanup_env();
            set_env(setting::ALGOLIA_APP_ID, "TESTAPP");
        }

        let result = handler(request(None, json!({"$id": "abc"}))).await;

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains(setting::ALGOLIA_INDEX_ID));

        unsafe { cleanup_env() };
    }

    #[tokio::test]
    #[serial(sync_env)]
    async fn test_handler_rejects_non_appwrite_trigger() {
        init_logging();
        unsafe { setup_env() };

        let response = handler(request(None, json!({"$id": "abc"}))).await.unwrap();

        assert_eq!(response.status(), 400);
        assert_eq!(
            body_json(&response),
            json!({
                "success": false,
                "message": "Function was not triggered by an Appwrite event.",
            })
        );

        unsafe { cleanup_env() };
    }

    #[tokio::test]
    #[serial(sync_env)]
    async fn test_handler_rejects_unhandled_event_type() {
        init_logging();
        unsafe { setup_env() };

        let response = handler(request(
            Some("users.u1.sessions.s1.rotate"),
            json!({"$id": "abc"}),
        ))
        .await
        .unwrap();

        assert_eq!(response.status(), 400);
        assert_eq!(
            body_json(&response),
            json!({"success": false, "message": "Event type not handled."})
        );

        unsafe { cleanup_env() };
    }

    #[tokio::test]
    #[serial(sync_env)]
    async fn test_handler_reports_delete_failure_for_missing_index() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::TcpListener;

        init_logging();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let host = format!("http://{}", listener.local_addr().unwrap());
        unsafe {
            setup_env();
            set_env(setting::ALGOLIA_HOST, &host);
        }

        // DELETEリクエストには本文がないためヘッダー終端まで読めば十分
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut received = Vec::new();
            let mut buf = [0u8; 1024];
            while !received.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                received.extend_from_slice(&buf[..n]);
            }
            let body = r#"{"message":"Index does not exist","status":404}"#;
            let response = format!(
                "HTTP/1.1 404 Not Found\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        let response = handler(request(
            Some("databases.main.collections.notes.documents.abc.delete"),
            json!({"$id": "abc"}),
        ))
        .await
        .unwrap();
        server.await.unwrap();

        assert_eq!(response.status(), 500);
        assert_eq!(
            body_json(&response),
            json!({"success": false, "error": "Index does not exist (status 404)"})
        );

        unsafe { cleanup_env() };
    }

    #[tokio::test]
    #[serial(sync_env)]
    async fn test_handler_rejects_unhandled_collection() {
        init_logging();
        unsafe { setup_env() };

        let response = handler(request(
            Some("databases.main.collections.comments.documents.c1.create"),
            json!({"$id": "c1"}),
        ))
        .await
        .unwrap();

        assert_eq!(response.status(), 400);
        assert_eq!(
            body_json(&response),
            json!({"success": false, "message": "Collection type 'comments' not handled."})
        );

        unsafe { cleanup_env() };
    }
}
