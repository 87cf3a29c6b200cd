// Algolia接続設定
//
// アプリケーションID・管理APIキー・インデックス名と、REST APIのベースURLを保持する。

use std::fmt;

/// Algolia接続設定
///
/// # フィールド
/// - `app_id`: アプリケーションID（`X-Algolia-Application-Id`ヘッダー）
/// - `admin_api_key`: 管理APIキー（`X-Algolia-API-Key`ヘッダー）。Debug出力には含めない
/// - `index_id`: 同期先インデックス名
/// - `host`: REST APIのベースURL（デフォルト: `https://{app_id}.algolia.net`）
#[derive(Clone, PartialEq, Eq)]
pub struct AlgoliaConfig {
    app_id: String,
    admin_api_key: String,
    index_id: String,
    host: String,
}

impl fmt::Debug for AlgoliaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlgoliaConfig")
            .field("app_id", &self.app_id)
            .field("index_id", &self.index_id)
            .field("host", &self.host)
            .finish_non_exhaustive()
    }
}

impl AlgoliaConfig {
    /// 新しい設定を作成（ホストはアプリケーションIDから導出）
    pub fn new(
        app_id: impl Into<String>,
        admin_api_key: impl Into<String>,
        index_id: impl Into<String>,
    ) -> Self {
        let app_id = app_id.into();
        let host = Self::default_host(&app_id);
        Self {
            app_id,
            admin_api_key: admin_api_key.into(),
            index_id: index_id.into(),
            host,
        }
    }

    /// ホストを上書きした設定を返す
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// アプリケーションIDから書き込み用ホストURLを導出
    pub fn default_host(app_id: &str) -> String {
        format!("https://{}.algolia.net", app_id)
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn admin_api_key(&self) -> &str {
        &self.admin_api_key
    }

    pub fn index_id(&self) -> &str {
        &self.index_id
    }

    pub fn host(&self) -> &str {
        &self.host
    }
}
