//! Marketing campaigns.

use chrono::NaiveDate;
use larder_core::CampaignId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Channel a campaign runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignType {
    Email,
    Sms,
    Social,
    Display,
}

/// Campaign lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    #[default]
    Draft,
    Scheduled,
    Active,
    Paused,
    Completed,
}

/// A marketing campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    /// Unique campaign ID.
    pub id: CampaignId,
    /// Display name.
    pub name: String,
    /// Channel.
    #[serde(rename = "type")]
    pub kind: CampaignType,
    /// Lifecycle state.
    pub status: CampaignStatus,
    /// Planned spend.
    pub budget: Decimal,
    /// First day the campaign runs.
    pub start_date: NaiveDate,
    /// Last day, if the campaign is time-boxed.
    pub end_date: Option<NaiveDate>,
    /// People reached so far.
    pub reach: u64,
    /// Conversions attributed so far.
    pub conversions: u64,
}

impl Campaign {
    /// Conversions as a percentage of reach, or `None` before anyone is reached.
    #[must_use]
    pub fn conversion_rate(&self) -> Option<Decimal> {
        (self.reach > 0).then(|| {
            let rate = Decimal::from(self.conversions) * Decimal::ONE_HUNDRED
                / Decimal::from(self.reach);
            rate.round_dp(2)
        })
    }
}

/// Partial campaign update; only the fields that are `Some` change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignPatch {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<CampaignType>,
    pub status: Option<CampaignStatus>,
    pub budget: Option<Decimal>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub reach: Option<u64>,
    pub conversions: Option<u64>,
}

impl CampaignPatch {
    /// Merge the patch into `campaign`. The id never changes.
    pub fn apply_to(self, campaign: &mut Campaign) {
        if let Some(name) = self.name {
            campaign.name = name;
        }
        if let Some(kind) = self.kind {
            campaign.kind = kind;
        }
        if let Some(status) = self.status {
            campaign.status = status;
        }
        if let Some(budget) = self.budget {
            campaign.budget = budget;
        }
        if let Some(start_date) = self.start_date {
            campaign.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            campaign.end_date = Some(end_date);
        }
        if let Some(reach) = self.reach {
            campaign.reach = reach;
        }
        if let Some(conversions) = self.conversions {
            campaign.conversions = conversions;
        }
    }
}
