pub mod alert;
pub mod bar_chart;
pub mod data_table;
pub mod forms;
pub mod header;
pub mod low_stock_table;
pub mod page_header;

pub use alert::{Alert, ErrorBanner};
pub use bar_chart::{BarChart, Measure};
pub use data_table::DataTable;
pub use header::Header;
pub use low_stock_table::LowStockTable;
pub use page_header::PageHeader;
