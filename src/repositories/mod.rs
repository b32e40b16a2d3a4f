//! リポジトリモジュール
//!
//! 商品とカートをストレージ上のコレクションとして扱う。
//! 読み込みのたびに全件デコードし、変更のたびに全件書き直す。

pub mod cart;
pub mod product;

pub use cart::CartRepository;
pub use product::ProductRepository;
