pub mod assemble;
pub mod bulk;
pub mod capacity;
pub mod codes;
pub mod duplicates;
pub mod engine;
pub mod images;
pub mod partition;
pub mod render;
pub mod selection;

pub use crate::domain::model::{CodeImage, Page, PrintDocument, PrintableItem, RenderedPage};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
