/// 検索インデックスへの書き込み操作を抽象化するゲートウェイ
///
/// 実装はAlgolia REST APIクライアント（本番）とテスト用モック。
/// 1回の呼び出しにつき1リクエストのみ送信し、再試行は行わない。
use async_trait::async_trait;
use thiserror::Error;

use crate::domain::SearchRecord;

/// インデックス操作のエラー型
///
/// 表示文字列はそのままレスポンスの`error`に入るため、利用者向けの英語で記述する。
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IndexGatewayError {
    /// APIがエラーステータスを返した
    #[error("{message} (status {status})")]
    HttpError { status: u16, message: String },

    /// 接続失敗・タイムアウト等
    #[error("Network error: {0}")]
    NetworkError(String),

    /// レコードのシリアライズに失敗
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// リクエストURLを構築できない
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTPクライアントを初期化できない
    #[error("HTTP client error: {0}")]
    ClientError(String),
}

/// 検索インデックスゲートウェイ
#[async_trait]
pub trait IndexGateway: Send + Sync {
    /// レコードを追加または置換する（`objectID`をキーとする）
    async fn save_object(&self, record: &SearchRecord) -> Result<(), IndexGatewayError>;

    /// `objectID`のレコードを削除する
    async fn delete_object(&self, object_id: &str) -> Result<(), IndexGatewayError>;
}
