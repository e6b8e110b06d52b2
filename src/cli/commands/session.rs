use anyhow::{anyhow, Context};
use reqwest::{Client, RequestBuilder, Response};
use serde_json::{json, Value};

use crate::cli::utils::{output_empty_collection, output_record, output_success};
use crate::cli::OutputFormat;
use crate::middleware::TOKEN_HEADER;

/// POST /customer/login/ and print the issued token
pub async fn login(
    base_url: &str,
    email: &str,
    password: &str,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let request = Client::new()
        .post(format!("{}/customer/login/", base_url))
        .json(&json!({ "email": email, "password": password }));
    let response = send(request).await?;

    let token = response
        .headers()
        .get(TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .ok_or_else(|| anyhow!("server accepted the login but returned no token"))?;

    match output_format {
        OutputFormat::Json => {
            output_success(&output_format, "Logged in", Some(json!({ "token": token })))
        }
        OutputFormat::Text => {
            println!("{}", token);
            Ok(())
        }
    }
}

/// GET /customer/ with the given token
pub async fn whoami(base_url: &str, token: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let request = Client::new()
        .get(format!("{}/customer/", base_url))
        .header(TOKEN_HEADER, token);
    let profile: Value = send(request).await?.json().await?;

    output_record(&output_format, &profile)
}

/// GET /customer/address/ with the given token
pub async fn addresses(base_url: &str, token: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let request = Client::new()
        .get(format!("{}/customer/address/", base_url))
        .header(TOKEN_HEADER, token);
    let addresses: Vec<Value> = send(request).await?.json().await?;

    if addresses.is_empty() {
        return output_empty_collection(&output_format, "addresses", "No addresses");
    }

    match output_format {
        OutputFormat::Json => output_record(&output_format, &Value::Array(addresses)),
        OutputFormat::Text => {
            for address in &addresses {
                output_record(&output_format, address)?;
                println!();
            }
            Ok(())
        }
    }
}

// Send and turn non-success statuses into errors carrying the server's message.
async fn send(request: RequestBuilder) -> anyhow::Result<Response> {
    let response = request
        .timeout(std::time::Duration::from_secs(10))
        .send()
        .await
        .context("request to customer service failed")?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<Value>()
        .await
        .ok()
        .and_then(|body| body.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| status.to_string());
    Err(anyhow!("{} ({})", message, status))
}
