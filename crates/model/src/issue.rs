//! Issue codes reported by the validation pipeline.
//!
//! Every issue belongs to a family. Its numeric code is the family base plus
//! the index of the issue within the family, so `Time.Expired` is `901`.
//! Codes are part of the public contract and must never be renumbered.

use {
    serde::{Deserialize, Deserializer, Serialize, Serializer, de},
    std::fmt::{self, Display, Formatter},
    strum::{EnumIter, IntoEnumIterator, IntoStaticStr},
};

macro_rules! issue_families {
    ($($family:ident($issue:ident) = $base:literal, $name:literal;)*) => {
        #[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
        pub enum Issue {
            $($family($issue),)*
        }

        impl Issue {
            /// The numeric issue code.
            pub fn code(self) -> u16 {
                match self {
                    $(Self::$family(issue) => $base + issue as u16,)*
                }
            }

            pub fn family(self) -> &'static str {
                match self {
                    $(Self::$family(_) => $name,)*
                }
            }

            fn variant(self) -> &'static str {
                match self {
                    $(Self::$family(issue) => issue.into(),)*
                }
            }

            /// All known issues in code order.
            pub fn all() -> impl Iterator<Item = Issue> {
                std::iter::empty::<Issue>()
                    $(.chain($issue::iter().map(Self::$family)))*
            }
        }

        $(
            impl From<$issue> for Issue {
                fn from(issue: $issue) -> Self {
                    Self::$family(issue)
                }
            }
        )*
    };
}

issue_families! {
    Generic(GenericIssue) = 100, "Generic";
    Erc20(Erc20Issue) = 200, "ERC20";
    Erc721(Erc721Issue) = 300, "ERC721";
    Erc1155(Erc1155Issue) = 400, "ERC1155";
    Consideration(ConsiderationIssue) = 500, "Consideration";
    Offer(OfferIssue) = 600, "Offer";
    ProtocolFee(FeeIssue) = 700, "ProtocolFee";
    Status(StatusIssue) = 800, "Status";
    Time(TimeIssue) = 900, "Time";
    Conduit(ConduitIssue) = 1000, "Conduit";
    Signature(SignatureIssue) = 1100, "Signature";
    RoyaltyFee(RoyaltyFeeIssue) = 1200, "RoyaltyFee";
    Native(NativeIssue) = 1300, "Native";
    Zone(ZoneIssue) = 1400, "Zone";
    Merkle(MerkleIssue) = 1500, "Merkle";
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, EnumIter, IntoStaticStr)]
#[repr(u16)]
pub enum GenericIssue {
    InvalidOrderFormat,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, EnumIter, IntoStaticStr)]
#[repr(u16)]
pub enum Erc20Issue {
    IdentifierNonZero,
    InvalidToken,
    InsufficientAllowance,
    InsufficientBalance,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, EnumIter, IntoStaticStr)]
#[repr(u16)]
pub enum Erc721Issue {
    AmountNotOne,
    InvalidToken,
    #[strum(serialize = "IdentifierDNE")]
    IdentifierDne,
    NotOwner,
    NotApproved,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, EnumIter, IntoStaticStr)]
#[repr(u16)]
pub enum Erc1155Issue {
    InvalidToken,
    NotApproved,
    InsufficientBalance,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, EnumIter, IntoStaticStr)]
#[repr(u16)]
pub enum ConsiderationIssue {
    AmountZero,
    NullRecipient,
    ExtraItems,
    PrivateSaleToSelf,
    ZeroItems,
    DuplicateItem,
    MissingOriginalConsiderationItems,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, EnumIter, IntoStaticStr)]
#[repr(u16)]
pub enum OfferIssue {
    ZeroItems,
    AmountZero,
    MoreThanOneItem,
    NativeItem,
    DuplicateItem,
}

/// Mismatches of the protocol fee consideration item.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, EnumIter, IntoStaticStr)]
#[repr(u16)]
pub enum FeeIssue {
    Missing,
    ItemType,
    Token,
    StartAmount,
    EndAmount,
    Recipient,
}

/// Mismatches of the royalty fee consideration item. Same members as
/// [`FeeIssue`], reported under their own family.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, EnumIter, IntoStaticStr)]
#[repr(u16)]
pub enum RoyaltyFeeIssue {
    Missing,
    ItemType,
    Token,
    StartAmount,
    EndAmount,
    Recipient,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, EnumIter, IntoStaticStr)]
#[repr(u16)]
pub enum StatusIssue {
    Cancelled,
    FullyFilled,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, EnumIter, IntoStaticStr)]
#[repr(u16)]
pub enum TimeIssue {
    EndTimeBeforeStartTime,
    Expired,
    DistantExpiration,
    NotActive,
    ShortOrder,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, EnumIter, IntoStaticStr)]
#[repr(u16)]
pub enum ConduitIssue {
    KeyInvalid,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, EnumIter, IntoStaticStr)]
#[repr(u16)]
pub enum SignatureIssue {
    Invalid,
    LowCounter,
    HighCounter,
    OriginalConsiderationItems,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, EnumIter, IntoStaticStr)]
#[repr(u16)]
pub enum NativeIssue {
    TokenAddress,
    IdentifierNonZero,
    InsufficientBalance,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, EnumIter, IntoStaticStr)]
#[repr(u16)]
pub enum ZoneIssue {
    RejectedOrder,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, EnumIter, IntoStaticStr)]
#[repr(u16)]
pub enum MerkleIssue {
    EmptySet,
    SingleLeaf,
    DuplicateLeaf,
    TargetIndexOutOfRange,
}

impl FeeIssue {
    /// The same mismatch reported against the royalty fee item.
    pub fn royalty(self) -> RoyaltyFeeIssue {
        match self {
            Self::Missing => RoyaltyFeeIssue::Missing,
            Self::ItemType => RoyaltyFeeIssue::ItemType,
            Self::Token => RoyaltyFeeIssue::Token,
            Self::StartAmount => RoyaltyFeeIssue::StartAmount,
            Self::EndAmount => RoyaltyFeeIssue::EndAmount,
            Self::Recipient => RoyaltyFeeIssue::Recipient,
        }
    }
}

impl Issue {
    pub fn from_code(code: u16) -> Option<Self> {
        Self::all().find(|issue| issue.code() == code)
    }

    /// Stable human readable name, e.g. `Time.Expired`.
    pub fn name(self) -> String {
        format!("{}.{}", self.family(), self.variant())
    }
}

impl Display for Issue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.code())
    }
}

impl Serialize for Issue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u16(self.code())
    }
}

impl<'de> Deserialize<'de> for Issue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = u16::deserialize(deserializer)?;
        Self::from_code(code)
            .ok_or_else(|| de::Error::custom(format!("unknown issue code {code}")))
    }
}
