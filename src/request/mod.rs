/*!
 * Request classification
 *
 * Responsibility:
 * - RequestView: classifier が読むだけの request の抽象
 * - RequestResolver: callback / logout / skip / index page の判定
 * - classify + Classified: 判定結果をまとめ、axum extractor として提供する
 */

mod classification;
mod resolver;
mod view;

pub use classification::{Classification, Classified, classify};
pub use resolver::{ERROR_PARAM, RequestResolver};
pub use view::{HttpRequestView, RequestView};
