//! Client-side core of the user directory: fetching the user list and the
//! observable list state the presentation layer renders.

pub mod controller;
pub mod fetcher;
pub mod filter;
pub mod view_state;

pub use controller::ListController;
pub use fetcher::{HttpUserFetcher, UserFetcher, DEFAULT_BASE_URL};
pub use filter::apply_filter;
pub use view_state::ViewState;

#[cfg(test)]
mod test_support;
