use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::Error;

/// A parsed `item in collection [track by expr]` binding expression.
///
/// Binders use it to learn which collection feeds the engine and under which name each item is
/// exposed to the row template. Whitespace runs inside each part are collapsed to one space.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceExpression {
    pub item: String,
    pub collection: String,
    pub track_by: Option<String>,
}

impl SourceExpression {
    pub fn parse(expression: &str) -> Result<Self, Error> {
        let malformed = |reason| Error::MalformedExpression {
            expression: expression.to_string(),
            reason,
        };

        let tokens: Vec<&str> = expression.split_whitespace().collect();
        let Some(in_at) = tokens.iter().position(|&t| t == "in") else {
            return Err(malformed("expected `<item> in <collection>`"));
        };
        if in_at == 0 {
            return Err(malformed("missing item name before `in`"));
        }

        let rest = &tokens[in_at + 1..];
        let track_at = rest
            .windows(2)
            .position(|w| w[0] == "track" && w[1] == "by");
        let (collection, track_by) = match track_at {
            Some(at) => {
                let track_by = &rest[at + 2..];
                if track_by.is_empty() {
                    return Err(malformed("missing expression after `track by`"));
                }
                (&rest[..at], Some(track_by.join(" ")))
            }
            None => (rest, None),
        };
        if collection.is_empty() {
            return Err(malformed("missing collection after `in`"));
        }

        Ok(Self {
            item: tokens[..in_at].join(" "),
            collection: collection.join(" "),
            track_by,
        })
    }
}

impl core::str::FromStr for SourceExpression {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
