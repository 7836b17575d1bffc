use std::fmt;

use crate::face::Face;

/// Machine-readable error codes for scripts that drive the `mc` binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    EmptyFaces,
    DuplicateFace,
    MixedFaceKinds,
    UnknownFace,
    InvalidWeight,
    ZeroTotalWeight,
    InvalidRollCount,
    NoDice,
    NotPlayed,
    InvalidForm,
    InvalidFace,
    InvalidConfig,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::EmptyFaces => "E1001",
            Self::DuplicateFace => "E1002",
            Self::MixedFaceKinds => "E1003",
            Self::UnknownFace => "E1004",
            Self::InvalidWeight => "E1005",
            Self::ZeroTotalWeight => "E1006",
            Self::InvalidRollCount => "E1007",
            Self::NoDice => "E2001",
            Self::NotPlayed => "E2002",
            Self::InvalidForm => "E2003",
            Self::InvalidFace => "E3001",
            Self::InvalidConfig => "E3002",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::EmptyFaces => "Die has no faces",
            Self::DuplicateFace => "Duplicate face on die",
            Self::MixedFaceKinds => "Die mixes integer and text faces",
            Self::UnknownFace => "Face not on die",
            Self::InvalidWeight => "Invalid face weight",
            Self::ZeroTotalWeight => "All face weights are zero",
            Self::InvalidRollCount => "Invalid roll count",
            Self::NoDice => "Game has no dice",
            Self::NotPlayed => "Game has not been played",
            Self::InvalidForm => "Unknown result form",
            Self::InvalidFace => "Invalid face token",
            Self::InvalidConfig => "Invalid game config",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint surfaced next to the error.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::EmptyFaces => Some("Pass at least one face, e.g. `--faces 1,2,3,4,5,6`."),
            Self::DuplicateFace => Some("Every face on a die must be distinct."),
            Self::MixedFaceKinds => {
                Some("Use only integer faces or only text faces on a single die.")
            }
            Self::UnknownFace => None,
            Self::InvalidWeight => {
                Some("Weights must be finite numbers >= 0 whose sum stays finite.")
            }
            Self::ZeroTotalWeight => Some("Give at least one face a positive weight."),
            Self::InvalidRollCount => Some("Roll at least once."),
            Self::NoDice => Some("Add at least one die to the game."),
            Self::NotPlayed => Some("Call play before reading or analyzing results."),
            Self::InvalidForm => Some("Use `wide` or `narrow`."),
            Self::InvalidFace => None,
            Self::InvalidConfig => Some("Check the game file against the documented layout."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Failures raised by dice, games, and analyzers.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MonteCarloError {
    #[error("a die needs at least one face")]
    EmptyFaces,

    #[error("face '{0}' appears more than once")]
    DuplicateFace(Face),

    #[error("faces must all be integers or all be text")]
    MixedFaceKinds,

    /// The face is not on the die; `first`/`last` describe the valid faces.
    #[error("face '{face}' is not on this die (faces run from '{first}' to '{last}')")]
    UnknownFace { face: Face, first: Face, last: Face },

    #[error("weight {raw:?} for face '{face}' must be a finite number >= 0 and keep the total weight finite")]
    InvalidWeight { face: Face, raw: String },

    #[error("cannot roll a die whose weights are all zero")]
    ZeroTotalWeight,

    #[error("roll count must be an integer greater than 0, got {0}")]
    InvalidRollCount(usize),

    #[error("a game needs at least one die")]
    NoDice,

    #[error("the game has not been played yet")]
    NotPlayed,

    #[error("form must be 'wide' or 'narrow', got {0:?}")]
    InvalidForm(String),

    #[error("invalid face token {0:?}")]
    InvalidFace(String),

    #[error("invalid game config: {0}")]
    InvalidConfig(String),

    /// A state the public API should never allow, such as a die whose
    /// weights sum past `f64::MAX`.
    #[error("internal error: {0}")]
    Internal(String),
}

impl MonteCarloError {
    /// Map this error to its stable [`ErrorCode`].
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::EmptyFaces => ErrorCode::EmptyFaces,
            Self::DuplicateFace(_) => ErrorCode::DuplicateFace,
            Self::MixedFaceKinds => ErrorCode::MixedFaceKinds,
            Self::UnknownFace { .. } => ErrorCode::UnknownFace,
            Self::InvalidWeight { .. } => ErrorCode::InvalidWeight,
            Self::ZeroTotalWeight => ErrorCode::ZeroTotalWeight,
            Self::InvalidRollCount(_) => ErrorCode::InvalidRollCount,
            Self::NoDice => ErrorCode::NoDice,
            Self::NotPlayed => ErrorCode::NotPlayed,
            Self::InvalidForm(_) => ErrorCode::InvalidForm,
            Self::InvalidFace(_) => ErrorCode::InvalidFace,
            Self::InvalidConfig(_) => ErrorCode::InvalidConfig,
            Self::Internal(_) => ErrorCode::InternalUnexpected,
        }
    }
}

/// Convenience alias for results carrying a [`MonteCarloError`].
pub type Result<T> = std::result::Result<T, MonteCarloError>;
