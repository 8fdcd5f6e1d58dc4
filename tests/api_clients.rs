use std::sync::Arc;

use serde_json::json;
use volunteer_hub::auth::StaticAuth;
use volunteer_hub::models::{ApplicationStatus, HourLogForm, OrganizationStatus, ProfileUpdate};
use volunteer_hub::prelude::*;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn hub_with_token(server: &MockServer) -> VolunteerHub {
    let config = HubConfig::new(&server.uri()).unwrap();
    VolunteerHub::new(config, Arc::new(StaticAuth::with_token("secret", None))).unwrap()
}

fn organization_json(id: i64) -> serde_json::Value {
    json!({
        "id": id,
        "name": format!("Org {}", id),
        "contact_email": format!("org{}@example.org", id),
        "status": "active",
        "created_at": "2024-01-01T00:00:00Z"
    })
}

#[tokio::test]
async fn lists_accept_every_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/organizations"))
        .and(header("Authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [organization_json(1), { "id": "broken" }, organization_json(2)]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/admins"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "unexpected": true })))
        .mount(&server)
        .await;

    let hub = hub_with_token(&server);

    let organizations = hub.api().organizations().list().await.unwrap();
    let ids: Vec<i64> = organizations.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert!(!organizations[0].verified);

    let admins = hub.api().admin().admins().await.unwrap();
    assert!(admins.is_empty());
}

#[tokio::test]
async fn status_changes_send_the_canonical_value() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/matches/4/status"))
        .and(body_json(json!({ "status": "approved" })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/organizations/2/status"))
        .and(body_json(json!({ "status": "suspended" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let hub = hub_with_token(&server);
    hub.api()
        .matches()
        .set_status(4, ApplicationStatus::Approved)
        .await
        .unwrap();
    hub.api()
        .organizations()
        .set_status(2, OrganizationStatus::Suspended)
        .await
        .unwrap();
}

#[tokio::test]
async fn apply_posts_the_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/matches/5/apply"))
        .and(body_json(json!({ "message": "Weekends work for me" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 40,
            "volunteer_id": 101,
            "opportunity_id": 5,
            "status": "accepted",
            "applied_at": "2024-06-01T12:00:00Z"
        })))
        .mount(&server)
        .await;

    let hub = hub_with_token(&server);
    let application = hub
        .api()
        .matches()
        .apply(5, Some("Weekends work for me"))
        .await
        .unwrap();

    assert_eq!(application.status, ApplicationStatus::Unknown("accepted".to_string()));
}

#[tokio::test]
async fn admin_user_actions() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/admin/users/9"))
        .and(body_json(json!({ "is_active": false })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/admin/users/9"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "detail": "User not found" })))
        .mount(&server)
        .await;

    let hub = hub_with_token(&server);
    hub.api().admin().set_user_active(9, false).await.unwrap();

    let err = hub.api().admin().delete_user(9).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(classify(&err).message, "User not found");
}

#[tokio::test]
async fn invalid_payloads_are_rejected_locally() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let hub = hub_with_token(&server);
    let log = HourLogForm {
        opportunity_id: 1,
        hours: 30.0,
        date: chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        description: "Night shift".to_string(),
    };
    assert!(matches!(hub.api().hours().log(&log).await, Err(Error::Validation(_))));

    let profile = ProfileUpdate {
        name: "Maya".to_string(),
        email: "maya-at-example".to_string(),
        ..Default::default()
    };
    let err = hub.api().volunteers().update_profile(101, &profile).await.unwrap_err();
    assert_eq!(classify(&err).message, "Enter a valid email address");
}

#[tokio::test]
async fn analytics_and_hours_round_out_the_admin_views() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/analytics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_users": 12,
            "total_hours": 40.5,
            "monthly": [{ "month": "2024-05", "applications": 3, "hours": 12.0, "new_volunteers": 1 }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/hours/3/verify"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let hub = hub_with_token(&server);
    let report = hub.api().admin().analytics().await.unwrap();
    assert_eq!(report.total_users, 12);
    assert_eq!(report.total_organizations, 0);
    assert_eq!(report.monthly.len(), 1);

    hub.api().hours().verify(3).await.unwrap();
}
