use bincode::error::{DecodeError, EncodeError};
use strum_macros::Display;

#[derive(Debug, Display)]
pub enum CodecError {
    Decode(DecodeError),
    Encode(EncodeError),
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CodecError::Decode(e) => Some(e),
            CodecError::Encode(e) => Some(e),
        }
    }
}
impl From<DecodeError> for CodecError {
    fn from(value: DecodeError) -> Self { CodecError::Decode(value) }
}
impl From<EncodeError> for CodecError {
    fn from(value: EncodeError) -> Self { CodecError::Encode(value) }
}

#[derive(Debug, Display)]
pub enum LinkError {
    /// No datagram has been received yet, so there is nobody to send commands to.
    NoPeer,
    Network(std::io::Error),
    Codec(CodecError),
}

impl std::error::Error for LinkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LinkError::NoPeer => None,
            LinkError::Network(e) => Some(e),
            LinkError::Codec(e) => Some(e),
        }
    }
}
impl From<std::io::Error> for LinkError {
    fn from(value: std::io::Error) -> Self { LinkError::Network(value) }
}
impl From<CodecError> for LinkError {
    fn from(value: CodecError) -> Self { LinkError::Codec(value) }
}
