mod common;

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::{ALICE, ALICE_HOME, PETER, PETER_HOME, PETER_OFFICE};

fn update_payload(id: i64) -> Value {
    json!({
        "id": id,
        "addressLine1": "177A Bleecker Street",
        "addressLine2": "Flat 2",
        "city": "New York",
        "country": "US"
    })
}

#[tokio::test]
async fn each_customer_lists_only_their_addresses() -> Result<()> {
    let server = common::seeded_server().await?;

    let res = server
        .client
        .get(server.url("/customer/address/"))
        .header("Token", server.token_for(PETER)?)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Vec<Value>>().await?;
    let ids: Vec<i64> = body.iter().filter_map(|a| a["id"].as_i64()).collect();
    assert_eq!(ids, vec![PETER_HOME, PETER_OFFICE]);
    assert_eq!(body[0]["addressLine1"], "20 Ingram Street");

    let res = server
        .client
        .get(server.url("/customer/address/"))
        .header("Token", server.token_for(ALICE)?)
        .send()
        .await?;
    let body = res.json::<Vec<Value>>().await?;
    assert_eq!(body.len(), 1);
    assert_eq!(body[0]["id"], ALICE_HOME);
    Ok(())
}

#[tokio::test]
async fn added_address_belongs_to_the_token_customer() -> Result<()> {
    let server = common::seeded_server().await?;

    let res = server
        .client
        .post(server.url("/customer/address/"))
        .header("Token", server.token_for(ALICE)?)
        .json(&json!({
            "addressLine1": "2 Looking Glass Lane",
            "city": "Oxford",
            "country": "GB"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    let id = body["id"].as_i64().context("response has no id")?;
    assert_eq!(body["addressLine2"], "");

    let stored = server.address(id).await.context("address was not stored")?;
    assert_eq!(stored.customer_id, ALICE);
    assert_eq!(stored.address_line1, "2 Looking Glass Lane");
    Ok(())
}

#[tokio::test]
async fn invalid_address_is_rejected() -> Result<()> {
    let server = common::seeded_server().await?;

    let res = server
        .client
        .post(server.url("/customer/address/"))
        .header("Token", server.token_for(PETER)?)
        .json(&json!({ "addressLine1": "Somewhere", "country": "GB" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "invalid request field city: required");

    assert_eq!(server.store.addresses().await.len(), 3);
    Ok(())
}

#[tokio::test]
async fn owner_can_update_address() -> Result<()> {
    let server = common::seeded_server().await?;

    let res = server
        .client
        .put(server.url("/customer/address/"))
        .header("Token", server.token_for(PETER)?)
        .json(&update_payload(PETER_OFFICE))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let stored = server.address(PETER_OFFICE).await.context("address vanished")?;
    assert_eq!(stored.address_line1, "177A Bleecker Street");
    assert_eq!(stored.address_line2, "Flat 2");
    assert_eq!(stored.customer_id, PETER);
    Ok(())
}

#[tokio::test]
async fn other_customer_cannot_update_address() -> Result<()> {
    let server = common::seeded_server().await?;
    let before = server.address(PETER_HOME).await;

    let res = server
        .client
        .put(server.url("/customer/address/"))
        .header("Token", server.token_for(ALICE)?)
        .json(&update_payload(PETER_HOME))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "unauthorized action");

    assert_eq!(server.address(PETER_HOME).await, before);
    Ok(())
}

#[tokio::test]
async fn missing_address_is_not_found() -> Result<()> {
    let server = common::seeded_server().await?;

    let res = server
        .client
        .put(server.url("/customer/address/"))
        .header("Token", server.token_for(PETER)?)
        .json(&update_payload(99))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "address doesn't exist");
    Ok(())
}

#[tokio::test]
async fn missing_customer_is_checked_before_address() -> Result<()> {
    let server = common::seeded_server().await?;

    let res = server
        .client
        .put(server.url("/customer/address/"))
        .header("Token", server.token_for(42)?)
        .json(&update_payload(PETER_HOME))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "customer doesn't exist");
    Ok(())
}

#[tokio::test]
async fn update_without_id_is_rejected() -> Result<()> {
    let server = common::seeded_server().await?;

    let mut payload = update_payload(PETER_HOME);
    payload.as_object_mut().context("payload is an object")?.remove("id");
    let res = server
        .client
        .put(server.url("/customer/address/"))
        .header("Token", server.token_for(PETER)?)
        .json(&payload)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "invalid request field id: required");
    Ok(())
}

#[tokio::test]
async fn owner_can_delete_address() -> Result<()> {
    let server = common::seeded_server().await?;

    let res = server
        .client
        .delete(server.url(&format!("/customer/address/?id={}", PETER_HOME)))
        .header("Token", server.token_for(PETER)?)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    assert!(server.address(PETER_HOME).await.is_none());
    assert!(server.address(PETER_OFFICE).await.is_some());
    Ok(())
}

#[tokio::test]
async fn delete_follows_the_same_checks() -> Result<()> {
    let server = common::seeded_server().await?;
    let client = &server.client;

    let res = client
        .delete(server.url(&format!("/customer/address/?id={}", ALICE_HOME)))
        .header("Token", server.token_for(PETER)?)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .delete(server.url("/customer/address/?id=99"))
        .header("Token", server.token_for(PETER)?)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .delete(server.url("/customer/address/"))
        .header("Token", server.token_for(PETER)?)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .delete(server.url("/customer/address/?id=home"))
        .header("Token", server.token_for(PETER)?)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    assert_eq!(server.store.addresses().await.len(), 3);
    Ok(())
}
