pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{error, header, section, status, success, summary_row, timing, warn};
pub use table::{TableBuilder, file_table, stats_table, symbol_table};
pub use theme::{Theme, theme};
