//! Icon identifier parsing
//!
//! Icons are keyed `<Name><Size>`, e.g. `Home24`: the longest trailing run of
//! decimal digits is the pixel size of the square canvas, everything before
//! it is the logical name.

use std::fmt;
use std::str::FromStr;

use crate::error::KeyFormatError;

/// Logical name and pixel size decoded from an icon identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IconKey {
    pub name: String,
    pub size: u32,
}

impl IconKey {
    /// Split an identifier into its name and pixel size
    pub fn parse(identifier: &str) -> Result<Self, KeyFormatError> {
        if identifier.is_empty() {
            return Err(KeyFormatError::Empty);
        }

        let name_len = identifier
            .trim_end_matches(|c: char| c.is_ascii_digit())
            .len();
        let (name, digits) = identifier.split_at(name_len);

        if digits.is_empty() {
            return Err(KeyFormatError::MissingSize(identifier.to_string()));
        }
        if name.is_empty() {
            return Err(KeyFormatError::MissingName(identifier.to_string()));
        }

        let size: u32 = digits
            .parse()
            .map_err(|_| KeyFormatError::InvalidSize(identifier.to_string()))?;
        if size == 0 {
            return Err(KeyFormatError::InvalidSize(identifier.to_string()));
        }

        Ok(Self {
            name: name.to_string(),
            size,
        })
    }
}

impl FromStr for IconKey {
    type Err = KeyFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for IconKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}x{})", self.name, self.size, self.size)
    }
}
