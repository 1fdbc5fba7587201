use thiserror::Error;

pub type Result<T> = std::result::Result<T, PaymentError>;

#[derive(Error, Debug)]
pub enum PaymentError {
    // The amount messages and NotFound are shown to users verbatim.
    #[error("Сумма должна быть числом")]
    InvalidAmountFormat,
    #[error("Сумма должна быть больше нуля")]
    NonPositiveAmount,
    #[error("Платёж не найден")]
    NotFound(String),
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
    #[error("payment id {0} already exists")]
    DuplicateId(String),
    #[error("identifier space exhausted after {0} attempts")]
    IdSpaceExhausted(u32),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("QR encoding error: {0}")]
    QrEncoding(String),
}
