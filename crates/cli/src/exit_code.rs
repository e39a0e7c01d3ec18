//! Process exit codes
//!
//! The contract: 0 success, 1 upload or archival failure, 2 unresolvable
//! parent path, 3 argument/validation failure (including parse failure,
//! missing credentials, missing source, missing bucket).

use uts_core::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    /// Upload or archive creation failed
    OperationFailed = 1,
    /// Source directory has no parent to host the temp archive
    PathUnresolvable = 2,
    /// Bad arguments or failed validation
    UsageError = 3,
}

impl From<&Error> for ExitCode {
    fn from(error: &Error) -> Self {
        match error {
            Error::Validation(_) => ExitCode::UsageError,
            Error::PathResolution(_) => ExitCode::PathUnresolvable,
            Error::Archive(_)
            | Error::Transfer(_)
            | Error::Auth(_)
            | Error::Io(_)
            | Error::General(_) => ExitCode::OperationFailed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_mapping() {
        assert_eq!(
            ExitCode::from(&Error::Validation("bad".into())),
            ExitCode::UsageError
        );
        assert_eq!(
            ExitCode::from(&Error::PathResolution("no parent".into())),
            ExitCode::PathUnresolvable
        );
        assert_eq!(
            ExitCode::from(&Error::Archive("disk full".into())),
            ExitCode::OperationFailed
        );
        assert_eq!(
            ExitCode::from(&Error::Transfer("timeout".into())),
            ExitCode::OperationFailed
        );
        assert_eq!(
            ExitCode::from(&Error::Auth("denied".into())),
            ExitCode::OperationFailed
        );
    }

    #[test]
    fn test_numeric_values() {
        assert_eq!(ExitCode::Success as i32, 0);
        assert_eq!(ExitCode::OperationFailed as i32, 1);
        assert_eq!(ExitCode::PathUnresolvable as i32, 2);
        assert_eq!(ExitCode::UsageError as i32, 3);
    }
}
