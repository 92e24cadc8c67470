//! Command attribute types.

use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// Operating mode of the air conditioner.
///
/// The record layout only distinguishes cooling from heating; anything
/// else a caller hands in is filed under `Heat`, matching the records
/// already written by devices in the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Mode {
    Cool,
    Heat,
}

impl From<String> for Mode {
    fn from(s: String) -> Self {
        if s.eq_ignore_ascii_case("cool") {
            Mode::Cool
        } else {
            Mode::Heat
        }
    }
}

impl FromStr for Mode {
    type Err = core::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Mode::from(s.to_string()))
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Cool => write!(f, "cool"),
            Mode::Heat => write!(f, "heat"),
        }
    }
}

/// Fan speed setting.
///
/// Remotes report either a numeric level or a symbolic token such as
/// `"auto"`; records carry whichever form was taught, so both forms are
/// kept as-is and compared through their string rendering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FanSpeed {
    Level(i32),
    Token(String),
}

impl FanSpeed {
    pub fn auto() -> Self {
        FanSpeed::Token("auto".to_string())
    }
}

impl From<i32> for FanSpeed {
    fn from(level: i32) -> Self {
        FanSpeed::Level(level)
    }
}

impl FromStr for FanSpeed {
    type Err = core::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<i32>() {
            Ok(level) => Ok(FanSpeed::Level(level)),
            Err(_) => Ok(FanSpeed::Token(s.trim().to_string())),
        }
    }
}

impl fmt::Display for FanSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FanSpeed::Level(level) => write!(f, "{}", level),
            FanSpeed::Token(token) => write!(f, "{}", token),
        }
    }
}

/// The fully-specified command tuple; the natural primary key of a
/// stored signal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignalAttrs {
    pub power_on: bool,
    pub mode: Mode,
    pub temperature: i32,
    pub fan_speed: FanSpeed,
}

/// A partially-specified command tuple used for retrieval. `None` means
/// "any value", in decreasing order of significance: power, mode,
/// temperature, fan speed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignalQuery {
    pub power_on: Option<bool>,
    pub mode: Option<Mode>,
    pub temperature: Option<i32>,
    pub fan_speed: Option<FanSpeed>,
}

impl SignalQuery {
    /// Query that matches exactly one tuple.
    pub fn exact(attrs: &SignalAttrs) -> Self {
        Self {
            power_on: Some(attrs.power_on),
            mode: Some(attrs.mode),
            temperature: Some(attrs.temperature),
            fan_speed: Some(attrs.fan_speed.clone()),
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        self.power_on.is_none()
            && self.mode.is_none()
            && self.temperature.is_none()
            && self.fan_speed.is_none()
    }
}

impl From<SignalAttrs> for SignalQuery {
    fn from(attrs: SignalAttrs) -> Self {
        SignalQuery::exact(&attrs)
    }
}
