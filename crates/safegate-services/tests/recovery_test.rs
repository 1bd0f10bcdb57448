//! Recovery workflow: identifier re-derivation, credential rotation,
//! out-of-band notice, and the single terminal status write.

mod helpers;

use serde_json::json;

use safegate_core::models::Role;
use safegate_store::DocumentStore;

fn reset_request(tenant_name: &str, unit: &str) -> serde_json::Value {
    json!({
        "tenantName": tenant_name,
        "unit": unit,
        "email": "resident@example.com",
        "tempPassword": "temp-9f2",
        "status": "pending"
    })
}

async fn provision_sunrise(world: &helpers::World) {
    world
        .directory
        .create_or_get_account(
            "sunriseresidency",
            "Sunrise Residency",
            "201",
            Role::Resident,
            "original-pw",
        )
        .await
        .expect("provision account");
}

#[tokio::test]
async fn successful_reset_rotates_credential_and_completes() {
    let world = helpers::world();
    provision_sunrise(&world).await;

    world
        .docs
        .set("passwordResets/r1", reset_request("Sunrise Residency", "201"))
        .await
        .expect("file reset request");

    let doc = world
        .docs
        .get("passwordResets/r1")
        .await
        .expect("get")
        .expect("request doc");
    assert_eq!(doc["status"], "completed");
    assert!(doc.get("processedAt").is_some(), "completion timestamp recorded");
    assert!(doc.get("error").is_none());

    // The credential was rotated to the temporary value via the re-derived
    // login id 201@sunriseresidency.app.
    assert!(
        world
            .credentials
            .verify_password("201@sunriseresidency.app", "temp-9f2")
            .await
    );
    assert!(
        !world
            .credentials
            .verify_password("201@sunriseresidency.app", "original-pw")
            .await
    );

    let emails = world.email.messages().await;
    assert_eq!(emails.len(), 1);
    assert_eq!(emails[0].to, "resident@example.com");
    assert!(emails[0].subject.contains("Temporary Password"));
    assert!(emails[0].body.contains("temp-9f2"));
    assert!(emails[0].body.contains("Sunrise Residency"));
}

#[tokio::test]
async fn unknown_account_is_a_terminal_failure() {
    let world = helpers::world();
    // No account was ever provisioned for this unit.
    world
        .docs
        .set("passwordResets/r2", reset_request("Sunrise Residency", "999"))
        .await
        .expect("file reset request");

    let doc = world
        .docs
        .get("passwordResets/r2")
        .await
        .expect("get")
        .expect("request doc");
    assert_eq!(doc["status"], "failed");
    let error = doc["error"].as_str().expect("error message captured");
    assert!(error.contains("999@sunriseresidency.app"));
    assert!(world.email.messages().await.is_empty());
}

#[tokio::test]
async fn email_failure_marks_request_failed() {
    let world = helpers::world();
    provision_sunrise(&world).await;
    world.email.fail_next_sends(true);

    world
        .docs
        .set("passwordResets/r3", reset_request("Sunrise Residency", "201"))
        .await
        .expect("file reset request");

    let doc = world
        .docs
        .get("passwordResets/r3")
        .await
        .expect("get")
        .expect("request doc");
    assert_eq!(doc["status"], "failed");
    assert!(doc["error"].as_str().expect("error").contains("email transport down"));
}

#[tokio::test]
async fn non_pending_request_is_ignored() {
    let world = helpers::world();
    provision_sunrise(&world).await;

    let mut doc = reset_request("Sunrise Residency", "201");
    doc["status"] = json!("completed");
    world
        .docs
        .set("passwordResets/r4", doc.clone())
        .await
        .expect("file already-terminal request");

    assert!(world.email.messages().await.is_empty());
    let stored = world
        .docs
        .get("passwordResets/r4")
        .await
        .expect("get")
        .expect("request doc");
    assert_eq!(stored, doc, "no second terminal write");
}
