use thiserror::Error;

#[derive(Error, Debug)]
pub enum CssError {
    #[error("failed to set CSS language for parser")]
    LanguageSet,

    #[error("failed to parse stylesheet")]
    ParseFailed,
}
