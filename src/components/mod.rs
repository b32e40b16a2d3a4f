//! UIコンポーネントモジュール

pub mod cart_dialog;
pub mod debug_panel;
pub mod filter_panel;
pub mod product_card;

pub use cart_dialog::CartDialog;
pub use debug_panel::DebugPanel;
pub use filter_panel::FilterPanel;
pub use product_card::ProductCard;
