pub mod report_html;

pub use report_html::{escape_html, render_report_html, EXPORTED_ACTIONS};
