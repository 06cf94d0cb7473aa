//! Item and order type tags.
//!
//! Both are closed enums: an unknown tag is rejected while parsing, so the
//! validation pipeline never sees one.

use {
    serde::{Deserialize, Serialize},
    std::str::FromStr,
    strum::{EnumIter, EnumString, IntoStaticStr},
};

#[derive(Debug, thiserror::Error, Eq, PartialEq)]
pub enum UnknownTag {
    #[error("unknown item type tag {0}")]
    ItemType(u8),
    #[error("unknown order type tag {0}")]
    OrderType(u8),
    #[error("unknown type name {0:?}")]
    Name(String),
}

/// Wire representation of a tag: either the integer discriminant used on
/// chain or the upper snake case name.
#[derive(Deserialize)]
#[serde(untagged)]
enum TagRepr {
    Tag(u8),
    Name(String),
}

#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    PartialEq,
    Hash,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Deserialize,
    Serialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(try_from = "TagRepr", into = "&'static str")]
#[repr(u8)]
pub enum ItemType {
    Native = 0,
    Erc20 = 1,
    Erc721 = 2,
    Erc1155 = 3,
    Erc721WithCriteria = 4,
    Erc1155WithCriteria = 5,
}

impl ItemType {
    /// Items that are used as the payment side of a trade.
    pub fn is_fungible(self) -> bool {
        matches!(self, Self::Native | Self::Erc20)
    }

    pub fn is_criteria_based(self) -> bool {
        matches!(self, Self::Erc721WithCriteria | Self::Erc1155WithCriteria)
    }

    pub fn tag(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for ItemType {
    type Error = UnknownTag;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        Ok(match tag {
            0 => Self::Native,
            1 => Self::Erc20,
            2 => Self::Erc721,
            3 => Self::Erc1155,
            4 => Self::Erc721WithCriteria,
            5 => Self::Erc1155WithCriteria,
            tag => return Err(UnknownTag::ItemType(tag)),
        })
    }
}

impl TryFrom<TagRepr> for ItemType {
    type Error = UnknownTag;

    fn try_from(repr: TagRepr) -> Result<Self, Self::Error> {
        match repr {
            TagRepr::Tag(tag) => Self::try_from(tag),
            TagRepr::Name(name) => Self::from_str(&name).map_err(|_| UnknownTag::Name(name)),
        }
    }
}

/// Restricts who may fulfill and cancel an order and whether it can be
/// partially filled.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    PartialEq,
    Hash,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Deserialize,
    Serialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(try_from = "TagRepr", into = "&'static str")]
#[repr(u8)]
pub enum OrderType {
    #[default]
    FullOpen = 0,
    PartialOpen = 1,
    FullRestricted = 2,
    PartialRestricted = 3,
}

impl OrderType {
    pub fn tag(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for OrderType {
    type Error = UnknownTag;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        Ok(match tag {
            0 => Self::FullOpen,
            1 => Self::PartialOpen,
            2 => Self::FullRestricted,
            3 => Self::PartialRestricted,
            tag => return Err(UnknownTag::OrderType(tag)),
        })
    }
}

impl TryFrom<TagRepr> for OrderType {
    type Error = UnknownTag;

    fn try_from(repr: TagRepr) -> Result<Self, Self::Error> {
        match repr {
            TagRepr::Tag(tag) => Self::try_from(tag),
            TagRepr::Name(name) => Self::from_str(&name).map_err(|_| UnknownTag::Name(name)),
        }
    }
}
