use crate::error::SelectorError;

pub fn exit_code_for_error(err: &SelectorError) -> i32 {
    match err {
        SelectorError::RestrictedScheme(_) => 4,
        SelectorError::NoHostname(_) | SelectorError::NoUrl => 3,
        SelectorError::NoActiveTab => 2,
        SelectorError::InvalidDomain(_) => 6,
        SelectorError::PermissionDenied(_) => 37,
        SelectorError::Timeout(_) => 28,
        SelectorError::ApiUnavailable(_) => 43,
        SelectorError::NothingSelected => 64,
        SelectorError::ExportFailed(_) => 25,
        SelectorError::Io(_) => 23,
        SelectorError::Json(_) => 26,
        SelectorError::Unknown(_) => 1,
    }
}
