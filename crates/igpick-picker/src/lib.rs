pub mod error;
pub mod report;
pub mod selection;
pub mod service;

pub use error::PickError;
pub use report::{PickResponse, WinnerView};
pub use selection::{population, select, Population, Selection, SelectionResult};
pub use service::PickService;
