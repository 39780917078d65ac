pub mod error;
pub mod store;
pub mod text;
pub mod xlsx;

pub use error::ExportError;
pub use store::{ArtifactKind, ArtifactStore, ExportHandle};
pub use text::render_txt;
pub use xlsx::write_xlsx;
