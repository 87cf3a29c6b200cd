/// ログ基盤モジュール
///
/// Lambda（CloudWatch Logs）向けにJSON形式の構造化ログを設定する。
/// Appwriteから渡されていたlog/errorコールバックの代わりに
/// tracingのinfo!/error!で処理経過を記録する。
use std::sync::Once;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// デフォルトのログレベル（`RUST_LOG`未設定時）
const DEFAULT_LOG_LEVEL: &str = "info";

/// Lambda環境向けのログサブスクライバーを初期化する
///
/// `RUST_LOG`でフィルタリングし、未設定の場合は`info`を使用する。
/// 複数回呼び出しても最初の一回だけ初期化される。
///
/// # 使用例
/// ```ignore
/// use search_sync::infrastructure::init_logging;
///
/// init_logging();
/// tracing::info!(document_id = "abc123", "同期開始");
/// ```
pub fn init_logging() {
    INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

        // イベントフィールドをトップレベルに展開（CloudWatch Logs Insightsで検索しやすくする）
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .flatten_event(true)
            .with_current_span(false);

        // 別のサブスクライバーが既に登録されていても失敗させない
        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .try_init();
    });
}

/// テスト用のログサブスクライバーを初期化する（人間が読みやすい形式）
#[cfg(test)]
pub fn init_test_logging() {
    static TEST_INIT: Once = Once::new();

    TEST_INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_test_writer()
            .with_target(true)
            .compact();

        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_test_logging_idempotent() {
        init_test_logging();
        init_test_logging();
    }

    #[test]
    fn test_init_logging_after_test_logging_does_not_panic() {
        // テスト用サブスクライバーが既に登録済みでもパニックしない
        init_test_logging();
        init_logging();
        init_logging();
    }

    #[test]
    fn test_sync_span_fields() {
        init_test_logging();

        let span = tracing::info_span!(
            "sync",
            event_type = "databases.main.collections.notes.documents.abc123.create",
            document_id = "abc123"
        );
        let _guard = span.enter();

        tracing::info!(collection_id = "notes", "ドキュメントを同期");
        tracing::error!(error = "HTTPエラー: status=403", "同期に失敗");
    }
}
