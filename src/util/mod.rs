// ログ出力やその他の汎用処理
#[macro_use]
pub mod log;
pub mod misc;
