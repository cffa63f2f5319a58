// Customs paperwork core: line items, sheet pagination, totals and display formatting.
// Everything here is synchronous and free of I/O.

pub mod format;
pub mod line_item;
pub mod numeric;
pub mod paginator;
pub mod totals;

pub use line_item::{ItemDefaults, LineItem};
pub use numeric::{Money, Weight};
pub use paginator::{paginate, Page, PageCapacities, PageKind, PaginationError, PaginationResult};
pub use totals::DeclarationTotals;
