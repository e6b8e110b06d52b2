mod common;

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::{PETER, SECRET};
use customer_svc::auth;

#[tokio::test]
async fn login_returns_token_for_the_customer() -> Result<()> {
    let server = common::seeded_server().await?;

    let res = server
        .client
        .post(server.url("/customer/login/"))
        .json(&json!({ "email": "peter@example.com", "password": "password123" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::ACCEPTED);

    let token = res
        .headers()
        .get("Token")
        .context("login returned no token")?
        .to_str()?
        .to_string();
    assert_eq!(auth::verify(&token, SECRET.as_bytes())?, PETER);

    let res = server
        .client
        .get(server.url("/customer/"))
        .header("Token", &token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn wrong_password_is_unauthorized() -> Result<()> {
    let server = common::seeded_server().await?;

    let res = server
        .client
        .post(server.url("/customer/login/"))
        .json(&json!({ "email": "peter@example.com", "password": "not-my-password" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(res.headers().get("Token").is_none());

    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "invalid user credentials");
    Ok(())
}

#[tokio::test]
async fn unknown_email_is_unauthorized() -> Result<()> {
    let server = common::seeded_server().await?;

    let res = server
        .client
        .post(server.url("/customer/login/"))
        .json(&json!({ "email": "nobody@example.com", "password": "password123" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "invalid user credentials");
    Ok(())
}

#[tokio::test]
async fn login_payload_is_validated() -> Result<()> {
    let server = common::seeded_server().await?;

    let res = server
        .client
        .post(server.url("/customer/login/"))
        .json(&json!({ "email": "not-an-email", "password": "password123" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = server
        .client
        .post(server.url("/customer/login/"))
        .json(&json!({ "email": "peter@example.com" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}
