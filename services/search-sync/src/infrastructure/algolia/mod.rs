// Algolia関連のインフラストラクチャ実装
//
// Appwriteを「真実の源」とし、Algoliaインデックスは検索用のミラーとして扱う。

mod client;
mod config;

pub use client::AlgoliaClient;
pub use config::AlgoliaConfig;
