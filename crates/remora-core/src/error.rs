pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("signature not found: {id}")]
    SignatureNotFound { id: String },

    #[error("invalid system id: {value:?}")]
    InvalidSystemId { value: String },

    #[error("invalid signature code: {code:?}")]
    InvalidSignatureCode { code: String },
}
