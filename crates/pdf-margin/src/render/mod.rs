//! PDF rendering modules for margin insertion
//!
//! This module handles all PDF-specific operations:
//! - Creating XObjects from source pages
//! - Building widened output pages
//! - Deep copying PDF objects

mod page;
mod xobject;

pub use page::render_margin_page;
pub use xobject::{
    PageBox, copy_object_deep, create_page_xobject, get_page_box, get_page_dimensions,
};
