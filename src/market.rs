//! Market inference from free-text bug descriptions, and the diagnostic
//! checklist attached to each market.
//!
//! Matching is a case-sensitive substring test run in a fixed order:
//! `FRR` wins over `SBB`, which wins over `DBMCP`.

use std::str::FromStr;

use Market::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Market {
    Frr,
    Sbb,
    Dbmcp,
    Unknown,
}

impl Market {
    /// Known markets, in matching priority order.
    pub const PRIORITY: [Market; 3] = [Frr, Sbb, Dbmcp];

    /// Token that must appear in a description for it to match this market.
    pub const fn token(&self) -> Option<&'static str> {
        match self {
            Frr => Some("FRR"),
            Sbb => Some("SBB"),
            Dbmcp => Some("DBMCP"),
            Unknown => None,
        }
    }

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Frr => "FRR",
            Sbb => "SBB",
            Dbmcp => "DBMCP",
            Unknown => "Unknown",
        }
    }

    pub const fn investigation_steps(&self) -> &'static str {
        match self {
            Frr => concat!(
                "1️⃣ Check if issueContractRQ was sent from ProviderAO to the provider.\n",
                "2️⃣ Look for a successful issueContractRS response.\n",
                "3️⃣ If successful, validate issueTicketRQ format.\n",
                "4️⃣ Check reverse flow logs for the response."
            ),
            Sbb => concat!(
                "1️⃣ Verify ticketing credentials.\n",
                "2️⃣ Ensure authTokenRQ was processed correctly.\n",
                "3️⃣ Look at issueTicketRQ and validate parameters.\n",
                "4️⃣ Confirm issueTicketRS response is as expected."
            ),
            Dbmcp => concat!(
                "1️⃣ Ensure passenger profile is loaded.\n",
                "2️⃣ Verify issueTicketRQ has all mandatory fields.\n",
                "3️⃣ Check provider response logs.\n",
                "4️⃣ Debug error codes in issueTicketRS."
            ),
            Unknown => "No predefined investigation steps. Perform standard debugging.",
        }
    }
}

impl std::fmt::Display for Market {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::default::Default for Market {
    fn default() -> Self {
        Unknown
    }
}

/// Labels are matched exactly; anything unrecognized is [`Unknown`].
impl FromStr for Market {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "FRR" => Frr,
            "SBB" => Sbb,
            "DBMCP" => Dbmcp,
            _ => Unknown,
        })
    }
}

/// First market in [`Market::PRIORITY`] whose token occurs in `description`.
pub fn classify(description: &str) -> Market {
    Market::PRIORITY
        .into_iter()
        .find(|market| {
            market
                .token()
                .is_some_and(|token| description.contains(token))
        })
        .unwrap_or_default()
}
