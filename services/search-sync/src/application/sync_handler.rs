// 同期ハンドラー
//
// Appwriteのドキュメントイベント1件を受け取り、種別に応じて
// 検索インデックスのレコードを保存または削除する。
// 呼び出し1回につきゲートウェイへのリクエストは最大1回。

use lambda_http::http::header::{HeaderValue, CONTENT_TYPE};
use lambda_http::{Body, Request, Response};
use tracing::{error, info, instrument};

use crate::domain::{
    CollectionRegistry, DocumentPayload, EventClassification, SearchRecord, SyncOutcome,
};
use crate::infrastructure::{IndexGateway, SyncConfig};

/// Appwriteがイベント種別を載せるヘッダー
pub const EVENT_HEADER: &str = "x-appwrite-event";

/// 同期ハンドラー
///
/// コレクションIDの対応表とイベント種別中のコレクションIDの位置を保持し、
/// ゲートウェイを介して検索インデックスを更新する。
pub struct SyncHandler<G>
where
    G: IndexGateway,
{
    /// 検索インデックスゲートウェイ
    gateway: G,
    /// コレクションID → コレクション種別
    collections: CollectionRegistry,
    /// イベント種別文字列中のコレクションIDの位置
    collection_segment: usize,
}

impl<G> SyncHandler<G>
where
    G: IndexGateway,
{
    /// 設定からハンドラーを作成
    pub fn new(gateway: G, config: &SyncConfig) -> Self {
        Self::with_collections(
            gateway,
            config.collections().clone(),
            config.collection_segment(),
        )
    }

    /// コレクション対応表を指定してハンドラーを作成
    pub fn with_collections(
        gateway: G,
        collections: CollectionRegistry,
        collection_segment: usize,
    ) -> Self {
        Self {
            gateway,
            collections,
            collection_segment,
        }
    }

    /// HTTPリクエストを処理してJSONレスポンスを返す
    ///
    /// イベント種別は`x-appwrite-event`ヘッダー、ドキュメントは本文（JSON）から取得する。
    pub async fn handle_request(
        &self,
        request: &Request,
    ) -> Result<Response<Body>, lambda_http::http::Error> {
        let event_type = request
            .headers()
            .get(EVENT_HEADER)
            .and_then(|v| v.to_str().ok());

        let body: &[u8] = request.body();
        let payload = serde_json::from_slice(body)
            .ok()
            .and_then(DocumentPayload::from_value);

        let outcome = self.handle(event_type, payload).await;
        Self::build_response(&outcome)
    }

    /// イベントを処理して結果を返す
    ///
    /// # 処理フロー
    /// 1. イベント種別を分類（未設定・未対応はここで終了）
    /// 2. 本文とドキュメントIDを検証
    /// 3. 削除イベントはレコードを削除、作成/更新イベントはレコードを構築して保存
    #[instrument(skip(self, payload))]
    pub async fn handle(
        &self,
        event_type: Option<&str>,
        payload: Option<DocumentPayload>,
    ) -> SyncOutcome {
        let classification = EventClassification::classify(event_type, self.collection_segment);

        match classification {
            EventClassification::Missing => {
                error!("Appwriteイベント以外から呼び出された（イベント種別なし）");
                SyncOutcome::MissingEventType
            }
            EventClassification::Unrecognized(event_type) => {
                error!(event_type = %event_type, "未対応のイベント種別");
                SyncOutcome::UnhandledEventType { event_type }
            }
            EventClassification::Delete => match payload {
                Some(payload) => self.delete(&payload).await,
                None => Self::invalid_payload(),
            },
            EventClassification::Upsert { collection_id } => match payload {
                Some(payload) => self.upsert(&collection_id, &payload).await,
                None => Self::invalid_payload(),
            },
        }
    }

    /// レコードを削除
    async fn delete(&self, payload: &DocumentPayload) -> SyncOutcome {
        let Some(document_id) = payload.document_id() else {
            return Self::missing_document_id();
        };

        info!(document_id = %document_id, "検索インデックスからドキュメントを削除");

        match self.gateway.delete_object(&document_id).await {
            Ok(()) => {
                info!(document_id = %document_id, "ドキュメントの削除に成功");
                SyncOutcome::Deleted { document_id }
            }
            Err(e) => {
                error!(document_id = %document_id, error = %e, "ドキュメントの削除に失敗");
                SyncOutcome::DeleteFailed {
                    document_id,
                    error: e.to_string(),
                }
            }
        }
    }

    /// レコードを構築して保存
    async fn upsert(&self, collection_id: &str, payload: &DocumentPayload) -> SyncOutcome {
        let Some(kind) = self.collections.resolve(collection_id) else {
            error!(collection_id = %collection_id, "同期対象外のコレクション");
            return SyncOutcome::UnhandledCollection {
                collection_id: collection_id.to_string(),
            };
        };

        let Some(document_id) = payload.document_id() else {
            return Self::missing_document_id();
        };

        info!(
            document_id = %document_id,
            collection_id = %collection_id,
            kind = %kind,
            "ドキュメントを同期"
        );

        let record = SearchRecord::build(kind, &document_id, payload);

        match self.gateway.save_object(&record).await {
            Ok(()) => {
                info!(document_id = %document_id, "ドキュメントの同期に成功");
                SyncOutcome::Synced { document_id, kind }
            }
            Err(e) => {
                error!(document_id = %document_id, error = %e, "ドキュメントの同期に失敗");
                SyncOutcome::SyncFailed {
                    document_id,
                    error: e.to_string(),
                }
            }
        }
    }

    fn invalid_payload() -> SyncOutcome {
        error!("リクエスト本文がJSONオブジェクトではない");
        SyncOutcome::InvalidPayload
    }

    fn missing_document_id() -> SyncOutcome {
        error!("ドキュメントに$idがない");
        SyncOutcome::MissingDocumentId
    }

    /// 処理結果からHTTPレスポンスを構築
    pub fn build_response(
        outcome: &SyncOutcome,
    ) -> Result<Response<Body>, lambda_http::http::Error> {
        Response::builder()
            .status(outcome.status_code())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(Body::Text(outcome.to_response().to_json()))
    }
}
