mod google;

pub use google::{parse_translation, GoogleTranslator};
