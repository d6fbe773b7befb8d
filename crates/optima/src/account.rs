//! Advertiser accounts and the marketplaces they sell in.

use optima_budget::AccountId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error parsing a marketplace code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown marketplace code '{0}'")]
pub struct UnknownMarketplace(pub String);

/// Marketplaces an account can sell in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Marketplace {
    /// United States
    #[serde(rename = "US")]
    UnitedStates,

    /// United Kingdom
    #[serde(rename = "UK")]
    UnitedKingdom,

    /// Germany
    #[serde(rename = "DE")]
    Germany,

    /// Canada
    #[serde(rename = "CA")]
    Canada,
}

impl Marketplace {
    /// Returns all marketplaces.
    pub fn all() -> Vec<Self> {
        vec![
            Self::UnitedStates,
            Self::UnitedKingdom,
            Self::Germany,
            Self::Canada,
        ]
    }

    /// Returns the marketplace code.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::UnitedStates => "US",
            Self::UnitedKingdom => "UK",
            Self::Germany => "DE",
            Self::Canada => "CA",
        }
    }

    /// Returns the ISO currency the marketplace settles in.
    pub const fn currency(&self) -> &'static str {
        match self {
            Self::UnitedStates => "USD",
            Self::UnitedKingdom => "GBP",
            Self::Germany => "EUR",
            Self::Canada => "CAD",
        }
    }

    /// Parse a marketplace from its code.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|m| m.code().eq_ignore_ascii_case(code.trim()))
    }
}

impl fmt::Display for Marketplace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Marketplace {
    type Err = UnknownMarketplace;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| UnknownMarketplace(s.to_string()))
    }
}

/// An advertiser seller account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Account identifier.
    pub id: AccountId,
    /// Display name.
    pub name: String,
    /// Seller identifier on the marketplace.
    pub seller_id: String,
    /// Marketplace the account sells in.
    #[serde(rename = "marketplaceCode")]
    pub marketplace: Marketplace,
    /// Reporting currency.
    pub currency: String,
}

impl Account {
    /// Create an account reporting in the marketplace's currency.
    pub fn new(
        id: impl Into<AccountId>,
        name: impl Into<String>,
        seller_id: impl Into<String>,
        marketplace: Marketplace,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            seller_id: seller_id.into(),
            marketplace,
            currency: marketplace.currency().to_string(),
        }
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {} {})",
            self.name, self.id, self.marketplace, self.currency
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marketplace_codes() {
        assert_eq!(Marketplace::from_code("uk"), Some(Marketplace::UnitedKingdom));
        assert_eq!(Marketplace::from_code("FR"), None);
        assert_eq!("US".parse::<Marketplace>().unwrap(), Marketplace::UnitedStates);
        assert!("XX".parse::<Marketplace>().is_err());
    }

    #[test]
    fn test_currency() {
        assert_eq!(Marketplace::UnitedKingdom.currency(), "GBP");
        let account = Account::new("acc2", "Alpha Brands UK", "B456ABC", Marketplace::UnitedKingdom);
        assert_eq!(account.currency, "GBP");
        assert_eq!(account.to_string(), "Alpha Brands UK (acc2, UK GBP)");
    }

    #[test]
    fn test_json_shape() {
        let json = r#"{"id":"acc1","name":"Alpha Brands US","sellerId":"A123XYZ","marketplaceCode":"US","currency":"USD"}"#;
        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account.marketplace, Marketplace::UnitedStates);
        assert_eq!(serde_json::to_string(&account).unwrap(), json);
    }
}
