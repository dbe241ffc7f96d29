// src/classify/buildsystem.rs

//! Build system detection from the first `%build` command

use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// Build system name used when the recipe's tool is not supported natively
pub const FALLBACK_BUILDSYSTEM: &str = "simple";

/// Build systems flatpak-builder drives by name
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum NativeBuildSystem {
    Cmake,
    Qmake,
    Meson,
    Autotools,
    CmakeNinja,
}

impl NativeBuildSystem {
    /// All supported names, in allow-list order
    pub fn names() -> Vec<&'static str> {
        Self::iter().map(<&'static str>::from).collect()
    }
}

/// Outcome of build system classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildSystemDecision {
    /// Passed through by name with default option handling
    Native(NativeBuildSystem),
    /// Unsupported or missing tool; the module becomes `simple`
    Fallback { tool: Option<String> },
}

impl BuildSystemDecision {
    /// The `buildsystem` value written to the module
    pub fn buildsystem(&self) -> &str {
        match self {
            Self::Native(native) => native.as_ref(),
            Self::Fallback { .. } => FALLBACK_BUILDSYSTEM,
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Self::Native(_))
    }
}

/// Classify the first token of a recipe's build invocation
///
/// One leading `%` is stripped, then the token must match an allow-listed
/// name exactly (case-sensitive).
pub fn classify_build_system(token: Option<&str>) -> BuildSystemDecision {
    let Some(token) = token else {
        return BuildSystemDecision::Fallback { tool: None };
    };
    let name = token.strip_prefix('%').unwrap_or(token);

    match name.parse::<NativeBuildSystem>() {
        Ok(native) => BuildSystemDecision::Native(native),
        Err(_) => BuildSystemDecision::Fallback {
            tool: Some(name.to_string()),
        },
    }
}
