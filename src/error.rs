//! Fatal simulation errors. Anything here means the input data is corrupt,
//! not that the battle went badly.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// Hit in the damage-calculation dispatch. Always an upstream
    /// data/parsing defect, never a legitimate battle state.
    #[error("unknown weapon type `{0}`")]
    UnknownWeaponType(String),

    #[error("unknown zodiac sign `{0}`")]
    UnknownSign(String),

    #[error("unknown gender `{0}`")]
    UnknownGender(String),

    #[error("unknown status `{0}`")]
    UnknownStatus(String),
}
