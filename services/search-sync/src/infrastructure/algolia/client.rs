// AlgoliaClient - Algolia REST APIクライアント
//
// 検索レコードの追加・置換（saveObject）と削除（deleteObject）を行う。
// 1回の呼び出しにつき1リクエストのみ送信し、再試行は行わない。

use super::config::AlgoliaConfig;
use crate::domain::SearchRecord;
use crate::infrastructure::index_gateway::{IndexGateway, IndexGatewayError};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info, instrument};
use url::Url;

/// リクエストタイムアウト（秒）
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// 接続タイムアウト（秒）
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// アプリケーションIDヘッダー
const APPLICATION_ID_HEADER: &str = "X-Algolia-Application-Id";

/// APIキーヘッダー
const API_KEY_HEADER: &str = "X-Algolia-API-Key";

/// Algoliaのエラーレスポンス本文（`{"message": "...", "status": 403}`）
#[derive(Debug, Deserialize)]
struct AlgoliaErrorBody {
    message: String,
}

/// Algolia REST APIクライアント
#[derive(Clone)]
pub struct AlgoliaClient {
    client: Client,
    host: String,
    app_id: String,
    api_key: String,
    index_id: String,
}

impl std::fmt::Debug for AlgoliaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlgoliaClient")
            .field("host", &self.host)
            .field("index_id", &self.index_id)
            .finish_non_exhaustive()
    }
}

impl AlgoliaClient {
    /// 設定からAlgoliaClientを作成
    ///
    /// # 戻り値
    /// * `Ok(AlgoliaClient)` - 初期化されたクライアント
    /// * `Err(IndexGatewayError::ClientError)` - HTTPクライアントの構築に失敗
    pub fn new(config: &AlgoliaConfig) -> Result<Self, IndexGatewayError> {
        debug!(
            host = config.host(),
            index_id = config.index_id(),
            "AlgoliaClientを初期化"
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| IndexGatewayError::ClientError(e.to_string()))?;

        Ok(Self {
            client,
            host: config.host().to_string(),
            app_id: config.app_id().to_string(),
            api_key: config.admin_api_key().to_string(),
            index_id: config.index_id().to_string(),
        })
    }

    /// オブジェクトURLを構築（`{host}/1/indexes/{index}/{objectID}`）
    ///
    /// インデックス名とobjectIDはパスセグメントとしてパーセントエンコードする。
    fn object_url(&self, object_id: &str) -> Result<Url, IndexGatewayError> {
        let mut url = Url::parse(&self.host)
            .map_err(|e| IndexGatewayError::InvalidUrl(format!("{}: {}", self.host, e)))?;

        url.path_segments_mut()
            .map_err(|_| IndexGatewayError::InvalidUrl(self.host.clone()))?
            .pop_if_empty()
            .extend(["1", "indexes", self.index_id.as_str(), object_id]);

        Ok(url)
    }

    /// 送信エラーを変換（タイムアウトは明示する）
    fn map_send_error(e: reqwest::Error) -> IndexGatewayError {
        if e.is_timeout() {
            IndexGatewayError::NetworkError(format!("request timed out: {}", e))
        } else {
            IndexGatewayError::NetworkError(e.to_string())
        }
    }

    /// エラーレスポンスをIndexGatewayErrorに変換
    ///
    /// 本文がAlgolia形式ならそのmessageを、そうでなければ本文そのものを使う。
    async fn error_from_response(response: Response) -> IndexGatewayError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        IndexGatewayError::HttpError {
            status: status.as_u16(),
            message: Self::error_message(status, &body),
        }
    }

    fn error_message(status: StatusCode, body: &str) -> String {
        if let Ok(parsed) = serde_json::from_str::<AlgoliaErrorBody>(body) {
            return parsed.message;
        }
        if !body.trim().is_empty() {
            return body.trim().to_string();
        }
        status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string()
    }
}

#[async_trait]
impl IndexGateway for AlgoliaClient {
    /// レコードを追加または置換（PUT /1/indexes/{index}/{objectID}）
    #[instrument(skip(self, record), fields(object_id = %record.object_id(), kind = %record.kind()))]
    async fn save_object(&self, record: &SearchRecord) -> Result<(), IndexGatewayError> {
        let url = self.object_url(record.object_id())?;
        debug!(url = %url, "レコードを保存");

        let body = serde_json::to_string(record).map_err(|e| {
            error!(error = %e, "レコードのシリアライズに失敗");
            IndexGatewayError::SerializationError(e.to_string())
        })?;

        let response = self
            .client
            .put(url)
            .header(APPLICATION_ID_HEADER, &self.app_id)
            .header(API_KEY_HEADER, &self.api_key)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "レコード保存リクエスト失敗");
                Self::map_send_error(e)
            })?;

        let status = response.status();
        if status.is_success() {
            info!(status = %status, "レコードの保存に成功");
            return Ok(());
        }

        let err = Self::error_from_response(response).await;
        error!(status = %status, error = %err, "レコード保存エラー");
        Err(err)
    }

    /// レコードを削除（DELETE /1/indexes/{index}/{objectID}）
    ///
    /// 存在しないobjectIDの削除はAlgolia側で成功（2xx）となる。
    /// 404はインデックス自体が存在しないことを示すためエラーとして返す。
    #[instrument(skip(self), fields(object_id = %object_id))]
    async fn delete_object(&self, object_id: &str) -> Result<(), IndexGatewayError> {
        let url = self.object_url(object_id)?;
        debug!(url = %url, "レコードを削除");

        let response = self
            .client
            .delete(url)
            .header(APPLICATION_ID_HEADER, &self.app_id)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "レコード削除リクエスト失敗");
                Self::map_send_error(e)
            })?;

        let status = response.status();
        if status.is_success() {
            info!(status = %status, "レコード削除成功");
            return Ok(());
        }

        let err = Self::error_from_response(response).await;
        error!(status = %status, error = %err, "レコード削除エラー");
        Err(err)
    }
}
