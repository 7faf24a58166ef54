use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("illegal IP address '{0}'")]
    InvalidAddress(String),
    #[error("malformed input '{input}': missing '{expected}'")]
    MalformedInput { input: String, expected: char },
    #[error("invalid CIDR '{0}'")]
    InvalidCidr(String),
    #[error("lower bound {lo} greater than upper bound {hi}")]
    InvalidRange { lo: String, hi: String },
    #[error("index {0} out of range")]
    IndexOutOfRange(i128),
    #[error("unsupported index type '{0}'")]
    InvalidIndexType(String),
    #[error("slice step cannot be zero")]
    ZeroSliceStep,
}

pub type Result<T> = std::result::Result<T, Error>;
