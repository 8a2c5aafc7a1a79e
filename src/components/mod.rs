//! UI Components
//!
//! Reusable Leptos components shared by the pages.

mod artwork_card;
mod delete_confirm_button;
mod filter_tabs;
mod gallery_header;
mod history_timeline;
mod image_upload;
mod nav_bar;
mod post_card;
mod status_banner;

pub use artwork_card::ArtworkCard;
pub use delete_confirm_button::DeleteConfirmButton;
pub use filter_tabs::{FilterTabs, ARTWORK_STATUS_TABS, POST_TYPE_TABS};
pub use gallery_header::GalleryHeader;
pub use history_timeline::HistoryTimeline;
pub use image_upload::{discard_pending, ImageUpload, UploadSlot};
pub use nav_bar::NavBar;
pub use post_card::PostCard;
pub use status_banner::{EmptyState, ErrorBanner, Load, LoadingSpinner};
