//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert from host
//! error types to the unified Error type.

use super::types::Error;
use crate::timeline::HostError;

impl From<HostError> for Error {
    fn from(err: HostError) -> Self {
        Error::Host(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::Field;

    #[test]
    fn test_host_error_conversion() {
        let err: Error = HostError::Unavailable(Field::Duration).into();
        assert!(matches!(err, Error::Host(HostError::Unavailable(Field::Duration))));
        assert_eq!(err.to_string(), "Host error: property 'duration' is unavailable");
    }
}
