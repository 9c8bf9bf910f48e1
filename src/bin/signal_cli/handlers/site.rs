#![deny(clippy::all, clippy::pedantic)]

use reqwest::Method;
use signal_api_types::ConfigResponse;

use crate::client::{CliError, Ctx};
use crate::print::{print_json, print_status};

pub async fn config(ctx: &Ctx) -> Result<(), CliError> {
    let res: ConfigResponse = ctx.fetch(ctx.get(&["config"])?).await?;
    print_json(&res)
}

pub async fn verify_key(ctx: &Ctx) -> Result<(), CliError> {
    ctx.execute(ctx.authorized(Method::POST, &["verify-key"])?)
        .await?;
    print_status("valid")
}
