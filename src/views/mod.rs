//! ビューモジュール

pub mod storefront;

pub use storefront::StorefrontView;
