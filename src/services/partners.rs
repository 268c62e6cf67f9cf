// ABOUTME: Partnership workflow: invites, responses, favorites, and partner search
// ABOUTME: Enforces who may act on a partnership row before touching the database
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

use uuid::Uuid;

use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{
    AcceptedPartner, InviteResponse, PartnerLists, PartnerStatus, Partnership, PartnershipView,
    UserSummary,
};

/// Invite another user to become a workout partner
///
/// # Errors
///
/// Returns `INVALID_INPUT` when inviting yourself, `RESOURCE_NOT_FOUND` for an
/// unknown user, and a conflict when a pending or accepted row already exists
pub async fn send_invite(
    database: &Database,
    user_id: Uuid,
    partner_id: Uuid,
) -> AppResult<Partnership> {
    if user_id == partner_id {
        return Err(AppError::invalid_input("You cannot invite yourself"));
    }
    if database.get_user(partner_id).await?.is_none() {
        return Err(AppError::not_found("User").with_resource_id(partner_id.to_string()));
    }

    let partners = database.partners();
    if partners
        .between(user_id, partner_id)
        .await?
        .iter()
        .any(|p| p.status.is_active())
    {
        return Err(AppError::conflict(
            "A partnership with this user already exists",
        ));
    }

    partners.delete_rejected_between(user_id, partner_id).await?;
    let invite = Partnership::new_invite(user_id, partner_id);
    partners.create(&invite).await?;

    AppLogger::log_partner_event(&user_id.to_string(), &partner_id.to_string(), "invited");
    Ok(invite)
}

/// Sent and received partnerships with the other party's profile
///
/// # Errors
///
/// Returns an error if a database query fails
pub async fn get_partners(database: &Database, user_id: Uuid) -> AppResult<PartnerLists> {
    let partners = database.partners();
    let mut sent = partners.list_sent(user_id).await?;
    order_sent(&mut sent);
    Ok(PartnerLists {
        sent,
        received: partners.list_received(user_id).await?,
    })
}

/// Stable sort: accepted rows first, favorites first within each group
pub fn order_sent(sent: &mut [PartnershipView]) {
    sent.sort_by_key(|view| {
        (
            view.partnership.status != PartnerStatus::Accepted,
            !view.partnership.is_favorite,
        )
    });
}

async fn partnership(database: &Database, invite_id: Uuid) -> AppResult<Partnership> {
    database
        .partners()
        .get(invite_id)
        .await?
        .ok_or_else(|| AppError::not_found("Invite").with_resource_id(invite_id.to_string()))
}

/// Accept or reject a pending invite addressed to the caller
///
/// # Errors
///
/// Returns `RESOURCE_NOT_FOUND` for an unknown invite, `PERMISSION_DENIED`
/// when the caller is not the receiver, and a conflict when it is no longer
/// pending
pub async fn respond_to_invite(
    database: &Database,
    user_id: Uuid,
    invite_id: Uuid,
    response: InviteResponse,
) -> AppResult<Partnership> {
    let mut invite = partnership(database, invite_id).await?;
    if invite.partner_id != user_id {
        return Err(AppError::permission_denied(
            "Only the invited user can respond to this invite",
        ));
    }
    if invite.status != PartnerStatus::Pending {
        return Err(AppError::conflict("This invite has already been answered"));
    }

    let status = PartnerStatus::from(response);
    database.partners().update_status(invite_id, status).await?;
    invite.status = status;

    AppLogger::log_partner_event(
        &user_id.to_string(),
        &invite.user_id.to_string(),
        status.as_str(),
    );
    Ok(invite)
}

/// Delete a partnership row. Either party may do this, at any status.
///
/// # Errors
///
/// Returns `RESOURCE_NOT_FOUND` for an unknown invite and `PERMISSION_DENIED`
/// when the caller is not a party to it
pub async fn cancel_invite(database: &Database, user_id: Uuid, invite_id: Uuid) -> AppResult<()> {
    let invite = partnership(database, invite_id).await?;
    if !invite.involves(user_id) {
        return Err(AppError::permission_denied(
            "You are not part of this partnership",
        ));
    }

    database.partners().delete(invite_id).await?;
    AppLogger::log_partner_event(
        &user_id.to_string(),
        &invite.other_party(user_id).to_string(),
        "removed",
    );
    Ok(())
}

/// Mark or unmark a partner the caller invited as a favorite
///
/// # Errors
///
/// Returns `RESOURCE_NOT_FOUND` when no accepted row with the caller as
/// initiator exists
pub async fn toggle_favorite(
    database: &Database,
    user_id: Uuid,
    partner_id: Uuid,
    is_favorite: bool,
) -> AppResult<()> {
    if database
        .partners()
        .set_favorite(user_id, partner_id, is_favorite)
        .await?
    {
        Ok(())
    } else {
        Err(AppError::not_found("Partnership").with_resource_id(partner_id.to_string()))
    }
}

/// Users the caller could invite
///
/// # Errors
///
/// Returns an error if the database query fails
pub async fn search_candidates(
    database: &Database,
    user_id: Uuid,
    query: &str,
) -> AppResult<Vec<UserSummary>> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(Vec::new());
    }
    database.partners().search_candidates(user_id, query).await
}

/// Every accepted partner in either direction
///
/// # Errors
///
/// Returns an error if the database query fails
pub async fn accepted_partners(
    database: &Database,
    user_id: Uuid,
) -> AppResult<Vec<AcceptedPartner>> {
    database.partners().accepted_partners(user_id).await
}

/// Pending invites waiting on the caller
///
/// # Errors
///
/// Returns an error if the database query fails
pub async fn pending_invite_count(database: &Database, user_id: Uuid) -> AppResult<u32> {
    database.partners().count_pending_received(user_id).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(status: PartnerStatus, is_favorite: bool, name: &str) -> PartnershipView {
        let mut partnership = Partnership::new_invite(Uuid::new_v4(), Uuid::new_v4());
        partnership.status = status;
        partnership.is_favorite = is_favorite;
        PartnershipView {
            partnership,
            partner: UserSummary {
                id: Uuid::new_v4(),
                name: name.into(),
                username: name.to_lowercase(),
            },
        }
    }

    #[test]
    fn test_order_sent_accepted_then_favorites() {
        let mut sent = vec![
            view(PartnerStatus::Pending, false, "A"),
            view(PartnerStatus::Accepted, false, "B"),
            view(PartnerStatus::Accepted, true, "C"),
            view(PartnerStatus::Rejected, false, "D"),
            view(PartnerStatus::Accepted, false, "E"),
        ];
        order_sent(&mut sent);
        let names: Vec<&str> = sent.iter().map(|v| v.partner.name.as_str()).collect();
        assert_eq!(names, vec!["C", "B", "E", "A", "D"]);
    }

    #[test]
    fn test_order_sent_status_outranks_favorite_flag() {
        let mut sent = vec![
            view(PartnerStatus::Pending, true, "A"),
            view(PartnerStatus::Accepted, false, "B"),
            view(PartnerStatus::Accepted, true, "C"),
        ];
        order_sent(&mut sent);
        let names: Vec<&str> = sent.iter().map(|v| v.partner.name.as_str()).collect();
        assert_eq!(names, vec!["C", "B", "A"]);
    }
}
