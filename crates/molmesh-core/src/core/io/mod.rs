pub mod listing;
pub mod model_doc;
pub mod stl;
pub mod traits;
