// ABOUTME: Integration tests for partner invites, responses, favorites, and search
// ABOUTME: Exercises /api/partners and the pending invite counter through the full router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use fitfam_server::models::{AcceptedPartner, PartnerLists, PartnerStatus, Partnership, UserSummary};
use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};

async fn invite(
    resources: &std::sync::Arc<fitfam_server::resources::ServerResources>,
    from: &common::TestUser,
    to: &common::TestUser,
) -> Partnership {
    AxumTestRequest::post("/api/partners/invites")
        .bearer(&from.token)
        .json(&json!({ "partner_id": to.id() }))
        .send(common::test_router(resources))
        .await
        .assert_status(StatusCode::CREATED)
        .json()
}

#[tokio::test]
async fn test_invite_shows_up_on_both_sides() {
    let resources = common::create_test_resources().await;
    let ana = common::create_user(&resources, "ana").await;
    let ben = common::create_user(&resources, "ben").await;

    let invite = invite(&resources, &ana, &ben).await;
    assert_eq!(invite.status, PartnerStatus::Pending);
    assert!(!invite.is_favorite);

    let lists: PartnerLists = AxumTestRequest::get("/api/partners")
        .bearer(&ana.token)
        .send(common::test_router(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(lists.sent.len(), 1);
    assert_eq!(lists.sent[0].partner.username, "ben");
    assert!(lists.received.is_empty());

    let lists: PartnerLists = AxumTestRequest::get("/api/partners")
        .bearer(&ben.token)
        .send(common::test_router(&resources))
        .await
        .json();
    assert_eq!(lists.received.len(), 1);
    assert_eq!(lists.received[0].partner.username, "ana");

    let count: Value = AxumTestRequest::get("/api/notifications/pending-invites")
        .bearer(&ben.token)
        .send(common::test_router(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(count["count"], 1);
}

#[tokio::test]
async fn test_invite_rules() {
    let resources = common::create_test_resources().await;
    let ana = common::create_user(&resources, "ana").await;
    let ben = common::create_user(&resources, "ben").await;

    // Yourself
    let response = AxumTestRequest::post("/api/partners/invites")
        .bearer(&ana.token)
        .json(&json!({ "partner_id": ana.id() }))
        .send(common::test_router(&resources))
        .await;
    assert_eq!(response.status(), 400);

    // Unknown user
    let response = AxumTestRequest::post("/api/partners/invites")
        .bearer(&ana.token)
        .json(&json!({ "partner_id": uuid::Uuid::new_v4() }))
        .send(common::test_router(&resources))
        .await;
    assert_eq!(response.status(), 404);

    invite(&resources, &ana, &ben).await;

    // Pending in either direction blocks a second invite
    let response = AxumTestRequest::post("/api/partners/invites")
        .bearer(&ben.token)
        .json(&json!({ "partner_id": ana.id() }))
        .send(common::test_router(&resources))
        .await;
    assert_eq!(response.status(), 409);
}

#[tokio::test]
async fn test_only_receiver_can_respond_and_only_once() {
    let resources = common::create_test_resources().await;
    let ana = common::create_user(&resources, "ana").await;
    let ben = common::create_user(&resources, "ben").await;
    let invite = invite(&resources, &ana, &ben).await;
    let uri = format!("/api/partners/invites/{}", invite.id);

    let response = AxumTestRequest::put(&uri)
        .bearer(&ana.token)
        .json(&json!({ "status": "accepted" }))
        .send(common::test_router(&resources))
        .await;
    assert_eq!(response.status(), 403);

    let accepted: Partnership = AxumTestRequest::put(&uri)
        .bearer(&ben.token)
        .json(&json!({ "status": "accepted" }))
        .send(common::test_router(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(accepted.status, PartnerStatus::Accepted);

    let response = AxumTestRequest::put(&uri)
        .bearer(&ben.token)
        .json(&json!({ "status": "rejected" }))
        .send(common::test_router(&resources))
        .await;
    assert_eq!(response.status(), 409);

    let partners: Vec<AcceptedPartner> = AxumTestRequest::get("/api/partners/accepted")
        .bearer(&ana.token)
        .send(common::test_router(&resources))
        .await
        .json();
    assert_eq!(partners.len(), 1);
    assert_eq!(partners[0].id, ben.id());
}

#[tokio::test]
async fn test_rejected_invite_can_be_sent_again() {
    let resources = common::create_test_resources().await;
    let ana = common::create_user(&resources, "ana").await;
    let ben = common::create_user(&resources, "ben").await;
    let first = invite(&resources, &ana, &ben).await;

    AxumTestRequest::put(&format!("/api/partners/invites/{}", first.id))
        .bearer(&ben.token)
        .json(&json!({ "status": "rejected" }))
        .send(common::test_router(&resources))
        .await
        .assert_status(StatusCode::OK);

    let second = invite(&resources, &ben, &ana).await;
    assert_ne!(second.id, first.id);

    let lists: PartnerLists = AxumTestRequest::get("/api/partners")
        .bearer(&ana.token)
        .send(common::test_router(&resources))
        .await
        .json();
    // The rejected row was replaced
    assert!(lists.sent.is_empty());
    assert_eq!(lists.received.len(), 1);
}

#[tokio::test]
async fn test_either_party_can_remove_partnership() {
    let resources = common::create_test_resources().await;
    let ana = common::create_user(&resources, "ana").await;
    let ben = common::create_user(&resources, "ben").await;
    let eve = common::create_user(&resources, "eve").await;
    let invite = invite(&resources, &ana, &ben).await;
    let uri = format!("/api/partners/invites/{}", invite.id);

    let response = AxumTestRequest::delete(&uri)
        .bearer(&eve.token)
        .send(common::test_router(&resources))
        .await;
    assert_eq!(response.status(), 403);

    AxumTestRequest::delete(&uri)
        .bearer(&ben.token)
        .send(common::test_router(&resources))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let response = AxumTestRequest::delete(&uri)
        .bearer(&ana.token)
        .send(common::test_router(&resources))
        .await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_favorite_is_set_by_the_inviter() {
    let resources = common::create_test_resources().await;
    let ana = common::create_user(&resources, "ana").await;
    let ben = common::create_user(&resources, "ben").await;
    let cal = common::create_user(&resources, "cal").await;
    common::make_partners(&resources, &ana, &ben).await;
    common::make_partners(&resources, &ana, &cal).await;

    AxumTestRequest::put(&format!("/api/partners/{}/favorite", cal.id()))
        .bearer(&ana.token)
        .json(&json!({ "is_favorite": true }))
        .send(common::test_router(&resources))
        .await
        .assert_status(StatusCode::OK);

    // Favorites come first in the sent list and the accepted list
    let lists: PartnerLists = AxumTestRequest::get("/api/partners")
        .bearer(&ana.token)
        .send(common::test_router(&resources))
        .await
        .json();
    assert_eq!(lists.sent[0].partner.id, cal.id());
    assert!(lists.sent[0].partnership.is_favorite);

    let accepted: Vec<AcceptedPartner> = AxumTestRequest::get("/api/partners/accepted")
        .bearer(&ana.token)
        .send(common::test_router(&resources))
        .await
        .json();
    assert_eq!(accepted[0].id, cal.id());

    // The invitee has no row of their own to mark
    let response = AxumTestRequest::put(&format!("/api/partners/{}/favorite", ana.id()))
        .bearer(&ben.token)
        .json(&json!({ "is_favorite": true }))
        .send(common::test_router(&resources))
        .await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_search_skips_self_and_existing_partners() {
    let resources = common::create_test_resources().await;
    let ana = common::create_user(&resources, "ana").await;
    let anaya = common::create_user(&resources, "anaya").await;
    common::create_user(&resources, "anatole").await;
    common::make_partners(&resources, &ana, &anaya).await;

    let found: Vec<UserSummary> = AxumTestRequest::get("/api/partners/search?q=ana")
        .bearer(&ana.token)
        .send(common::test_router(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    let handles: Vec<&str> = found.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(handles, vec!["anatole"]);

    let found: Vec<UserSummary> = AxumTestRequest::get("/api/partners/search?q=%20")
        .bearer(&ana.token)
        .send(common::test_router(&resources))
        .await
        .json();
    assert!(found.is_empty());
}

#[tokio::test]
async fn test_concurrent_invites_in_both_directions_keep_one_row() {
    use fitfam_server::errors::ErrorCode;
    use fitfam_server::models::InviteResponse;
    use fitfam_server::services::partners;

    let resources = common::create_test_resources().await;
    let ana = common::create_user(&resources, "ana").await;
    let ben = common::create_user(&resources, "ben").await;

    let (forward, backward) = tokio::join!(
        partners::send_invite(&resources.database, ana.id(), ben.id()),
        partners::send_invite(&resources.database, ben.id(), ana.id()),
    );
    let results = [forward, backward];
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    let rejected = results
        .iter()
        .find_map(|r| r.as_ref().err())
        .expect("one invite should lose the race");
    assert_eq!(rejected.http_status(), 409);
    assert_ne!(rejected.code, ErrorCode::DatabaseError);

    let rows = resources
        .database
        .partners()
        .between(ana.id(), ben.id())
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);

    let invite = &rows[0];
    partners::respond_to_invite(
        &resources.database,
        invite.partner_id,
        invite.id,
        InviteResponse::Accepted,
    )
    .await
    .unwrap();

    let count = resources
        .database
        .partners()
        .count_accepted(ana.id())
        .await
        .unwrap();
    assert_eq!(count, 1);
}
