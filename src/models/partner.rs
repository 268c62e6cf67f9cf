// ABOUTME: Workout partner (FitFam) relationship models
// ABOUTME: Partnership status lifecycle and the list views returned to clients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserSummary;
use crate::errors::AppError;

/// Status of a partnership
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PartnerStatus {
    /// Invite sent, awaiting an answer
    #[default]
    Pending,
    /// Receiver accepted
    Accepted,
    /// Receiver declined
    Rejected,
}

impl PartnerStatus {
    /// Database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }

    /// Pending and accepted rows block a new invite between the same pair
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Accepted)
    }
}

impl Display for PartnerStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartnerStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            _ => Err(AppError::invalid_input(format!(
                "Invalid partner status: {s}"
            ))),
        }
    }
}

/// A partnership row. `user_id` sent the invite, `partner_id` received it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Partnership {
    /// Row id, also used as the invite id
    pub id: Uuid,
    /// Initiator
    pub user_id: Uuid,
    /// Receiver
    pub partner_id: Uuid,
    /// Lifecycle status
    pub status: PartnerStatus,
    /// Initiator marked the receiver as favorite
    pub is_favorite: bool,
    /// When the invite was sent
    pub created_at: DateTime<Utc>,
    /// Last status change
    pub updated_at: DateTime<Utc>,
}

impl Partnership {
    /// New pending invite from `user_id` to `partner_id`
    #[must_use]
    pub fn new_invite(user_id: Uuid, partner_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            partner_id,
            status: PartnerStatus::Pending,
            is_favorite: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// The member of this partnership that is not `user_id`
    #[must_use]
    pub fn other_party(&self, user_id: Uuid) -> Uuid {
        if self.user_id == user_id {
            self.partner_id
        } else {
            self.user_id
        }
    }

    /// Whether `user_id` is either side of this partnership
    #[must_use]
    pub fn involves(&self, user_id: Uuid) -> bool {
        self.user_id == user_id || self.partner_id == user_id
    }
}

/// A partnership together with the profile of the other party
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartnershipView {
    /// The row
    #[serde(flatten)]
    pub partnership: Partnership,
    /// The other party
    pub partner: UserSummary,
}

/// Partnerships split by direction
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartnerLists {
    /// Invites the caller sent, accepted first then favorites first
    pub sent: Vec<PartnershipView>,
    /// Invites the caller received, newest first
    pub received: Vec<PartnershipView>,
}

/// Accepted partner as offered by the workout sharing picker
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AcceptedPartner {
    /// Partner user id
    pub id: Uuid,
    /// Partner display name
    pub name: String,
}

/// Answer to a pending invite
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InviteResponse {
    /// Accept the invite
    Accepted,
    /// Decline the invite
    Rejected,
}

impl From<InviteResponse> for PartnerStatus {
    fn from(response: InviteResponse) -> Self {
        match response {
            InviteResponse::Accepted => Self::Accepted,
            InviteResponse::Rejected => Self::Rejected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_and_activity() {
        assert_eq!(
            "Accepted".parse::<PartnerStatus>().unwrap(),
            PartnerStatus::Accepted
        );
        assert!("blocked".parse::<PartnerStatus>().is_err());
        assert!(PartnerStatus::Pending.is_active());
        assert!(!PartnerStatus::Rejected.is_active());
    }

    #[test]
    fn test_other_party() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let row = Partnership::new_invite(a, b);
        assert_eq!(row.other_party(a), b);
        assert_eq!(row.other_party(b), a);
        assert!(row.involves(a));
        assert!(!row.involves(Uuid::new_v4()));
    }
}
