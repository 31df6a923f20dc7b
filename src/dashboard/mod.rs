//! Dashboard module
//!
//! Renders the root page and the section holding the transaction list and the
//! spending-by-category chart, which is swapped in after every change.

mod chart;
mod page;
mod transaction_list;

pub use page::{dashboard_data_oob_view, dashboard_data_view, get_dashboard_page};
pub use transaction_list::category_form;
