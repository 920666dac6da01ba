pub mod error;
pub mod version;


/// Return early with [`error::ProofVersionError::UnknownVersionMismatch`] unless
/// `$version` is 0.
///
/// The enclosing function must return a `Result` whose error type implements
/// `From<ProofVersionError>`.
#[macro_export]
macro_rules! check_v0 {
    ($method:expr, $version:expr) => {{
        const EXPECTED_VERSION: u16 = 0;
        if $version != EXPECTED_VERSION {
            return Err($crate::error::ProofVersionError::UnknownVersionMismatch {
                method: $method.to_string(),
                known_versions: vec![EXPECTED_VERSION],
                received: $version,
            }
            .into());
        }
    }};
}
