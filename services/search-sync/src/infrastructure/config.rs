// 同期Lambdaの設定
//
// 環境変数をキー/値のマップとして一度だけ読み込み、必須項目を検証した上で
// 不変のSyncConfigを構築する。テストではマップを直接渡して構築する。

use std::collections::HashMap;

use thiserror::Error;
use url::Url;

use super::algolia::AlgoliaConfig;
use crate::domain::{
    CollectionKind, CollectionRegistry, DuplicateCollectionId, DEFAULT_COLLECTION_SEGMENT,
};

/// 設定キー
pub mod setting {
    pub const ALGOLIA_APP_ID: &str = "ALGOLIA_APP_ID";
    pub const ALGOLIA_ADMIN_API_KEY: &str = "ALGOLIA_ADMIN_API_KEY";
    pub const ALGOLIA_INDEX_ID: &str = "ALGOLIA_INDEX_ID";
    pub const ALGOLIA_HOST: &str = "ALGOLIA_HOST";
    pub const APPWRITE_NOTE_COLLECTION_ID: &str = "APPWRITE_NOTE_COLLECTION_ID";
    pub const APPWRITE_SUBJECT_COLLECTION_ID: &str = "APPWRITE_SUBJECT_COLLECTION_ID";
    pub const APPWRITE_YOUTUBE_COLLECTION_ID: &str = "APPWRITE_YOUTUBE_COLLECTION_ID";
    pub const APPWRITE_QUIZ_COLLECTION_ID: &str = "APPWRITE_QUIZ_COLLECTION_ID";
    pub const APPWRITE_EVENT_COLLECTION_SEGMENT: &str = "APPWRITE_EVENT_COLLECTION_SEGMENT";

    /// 環境変数から読み込むすべてのキー
    pub const ALL: [&str; 9] = [
        ALGOLIA_APP_ID,
        ALGOLIA_ADMIN_API_KEY,
        ALGOLIA_INDEX_ID,
        ALGOLIA_HOST,
        APPWRITE_NOTE_COLLECTION_ID,
        APPWRITE_SUBJECT_COLLECTION_ID,
        APPWRITE_YOUTUBE_COLLECTION_ID,
        APPWRITE_QUIZ_COLLECTION_ID,
        APPWRITE_EVENT_COLLECTION_SEGMENT,
    ];
}

/// 処理開始前に必ず存在しなければならない設定
pub const REQUIRED_SETTINGS: [&str; 3] = [
    setting::ALGOLIA_APP_ID,
    setting::ALGOLIA_INDEX_ID,
    setting::ALGOLIA_ADMIN_API_KEY,
];

/// 設定エラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// 必須の設定が未設定または空
    #[error("必須の設定が不足しています: {0}")]
    MissingSetting(String),

    /// 設定値が不正
    #[error("設定値が不正です: {name}={value} ({reason})")]
    InvalidSetting {
        name: String,
        value: String,
        reason: String,
    },

    /// 複数のコレクション種別に同じIDが設定されている
    #[error("コレクションIDが重複しています: {0}")]
    DuplicateCollectionId(#[from] DuplicateCollectionId),
}

/// 必須設定を検証する
///
/// 未設定・空文字（空白のみを含む）の最初のキーで失敗する。
pub fn require_settings(
    settings: &HashMap<String, String>,
    names: &[&str],
) -> Result<(), ConfigError> {
    for name in names {
        let present = settings
            .get(*name)
            .is_some_and(|value| !value.trim().is_empty());
        if !present {
            return Err(ConfigError::MissingSetting(name.to_string()));
        }
    }
    Ok(())
}

/// コレクション種別ごとの設定キー
fn collection_setting(kind: CollectionKind) -> &'static str {
    match kind {
        CollectionKind::Note => setting::APPWRITE_NOTE_COLLECTION_ID,
        CollectionKind::Subject => setting::APPWRITE_SUBJECT_COLLECTION_ID,
        CollectionKind::Youtube => setting::APPWRITE_YOUTUBE_COLLECTION_ID,
        CollectionKind::Quiz => setting::APPWRITE_QUIZ_COLLECTION_ID,
    }
}

/// 同期Lambdaの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    algolia: AlgoliaConfig,
    collections: CollectionRegistry,
    collection_segment: usize,
}

impl SyncConfig {
    /// 明示的な値で設定を作成
    pub fn new(
        algolia: AlgoliaConfig,
        collections: CollectionRegistry,
        collection_segment: usize,
    ) -> Self {
        Self {
            algolia,
            collections,
            collection_segment,
        }
    }

    /// 環境変数から設定を読み込み
    ///
    /// # 環境変数
    /// - `ALGOLIA_APP_ID` / `ALGOLIA_INDEX_ID` / `ALGOLIA_ADMIN_API_KEY`（必須）
    /// - `APPWRITE_{NOTE,SUBJECT,YOUTUBE,QUIZ}_COLLECTION_ID`（オプション）
    /// - `APPWRITE_EVENT_COLLECTION_SEGMENT`（オプション、デフォルト: 3）
    /// - `ALGOLIA_HOST`（オプション、デフォルト: `https://{app_id}.algolia.net`）
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut settings = HashMap::new();
        for name in setting::ALL {
            match std::env::var(name) {
                Ok(value) => {
                    settings.insert(name.to_string(), value);
                }
                Err(std::env::VarError::NotPresent) => {}
                Err(std::env::VarError::NotUnicode(_)) => {
                    return Err(ConfigError::InvalidSetting {
                        name: name.to_string(),
                        value: String::new(),
                        reason: "UTF-8ではありません".to_string(),
                    });
                }
            }
        }
        Self::from_settings(&settings)
    }

    /// キー/値のマップから設定を構築
    ///
    /// 必須設定の検証を最初に行い、その後にオプション設定を解釈する。
    pub fn from_settings(settings: &HashMap<String, String>) -> Result<Self, ConfigError> {
        require_settings(settings, &REQUIRED_SETTINGS)?;

        let get = |name: &str| {
            settings
                .get(name)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
        };

        // require_settingsで検証済み
        let app_id = get(setting::ALGOLIA_APP_ID).unwrap_or_default();
        let admin_api_key = get(setting::ALGOLIA_ADMIN_API_KEY).unwrap_or_default();
        let index_id = get(setting::ALGOLIA_INDEX_ID).unwrap_or_default();

        let mut algolia = AlgoliaConfig::new(app_id, admin_api_key, index_id);
        if let Some(host) = get(setting::ALGOLIA_HOST) {
            Self::validate_host(host)?;
            algolia = algolia.with_host(host);
        }

        let mut collections = CollectionRegistry::new();
        for kind in CollectionKind::ALL {
            if let Some(collection_id) = get(collection_setting(kind)) {
                collections.register(collection_id, kind)?;
            }
        }

        let collection_segment = match get(setting::APPWRITE_EVENT_COLLECTION_SEGMENT) {
            Some(value) => value.parse::<usize>().map_err(|e| ConfigError::InvalidSetting {
                name: setting::APPWRITE_EVENT_COLLECTION_SEGMENT.to_string(),
                value: value.to_string(),
                reason: e.to_string(),
            })?,
            None => DEFAULT_COLLECTION_SEGMENT,
        };

        Ok(Self {
            algolia,
            collections,
            collection_segment,
        })
    }

    /// ホストURLのバリデーション（http/httpsのみ）
    fn validate_host(host: &str) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidSetting {
            name: setting::ALGOLIA_HOST.to_string(),
            value: host.to_string(),
            reason,
        };

        let url = Url::parse(host).map_err(|e| invalid(e.to_string()))?;
        if url.scheme() != "https" && url.scheme() != "http" {
            return Err(invalid(
                "スキームはhttpまたはhttpsである必要があります".to_string(),
            ));
        }
        Ok(())
    }

    pub fn algolia(&self) -> &AlgoliaConfig {
        &self.algolia
    }

    pub fn collections(&self) -> &CollectionRegistry {
        &self.collections
    }

    /// イベント種別文字列中のコレクションIDの位置（0始まり）
    pub fn collection_segment(&self) -> usize {
        self.collection_segment
    }
}
