//! Application error type.
//!
//! Every fallible operation returns `Result<_, AppError>`. The exit code is
//! chosen at the failure site:
//!
//! - `2`: missing files/columns, CSV structure, JSON, I/O
//! - `3`: invalid values inside otherwise well-formed data
//! - `4`: terminal/runtime failures (raw mode, drawing, logging setup)

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    /// Input could not be read or is structurally malformed.
    pub fn input(message: impl Into<String>) -> Self {
        Self::new(2, message)
    }

    /// Input is readable but carries a value we refuse to coerce.
    pub fn data(message: impl Into<String>) -> Self {
        Self::new(3, message)
    }

    pub fn runtime(message: impl Into<String>) -> Self {
        Self::new(4, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_pick_exit_codes() {
        assert_eq!(AppError::input("x").exit_code(), 2);
        assert_eq!(AppError::data("x").exit_code(), 3);
        assert_eq!(AppError::runtime("x").exit_code(), 4);
        assert_eq!(AppError::data("bad price").to_string(), "bad price");
    }
}
