pub mod escape;
pub mod line;
pub mod timestamp;
pub mod vtt;

pub use escape::html_encode_latin1;
pub use line::{classify, LineKind, TimecodeLine};
pub use timestamp::Timestamp;
