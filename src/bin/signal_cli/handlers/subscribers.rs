#![deny(clippy::all, clippy::pedantic)]

use reqwest::Method;
use signal_api_types::{SubscribeRequest, SubscribeResponse, SubscriberResponse};
use signal_site::domain::subscribers::EmailAddress;

use crate::args::SubscribersCmd;
use crate::client::{CliError, Ctx};
use crate::io::require;
use crate::print::{print_json, print_status};

pub async fn handle(ctx: &Ctx, cmd: SubscribersCmd) -> Result<(), CliError> {
    match cmd {
        SubscribersCmd::List => {
            let res: Vec<SubscriberResponse> = ctx.fetch(ctx.get(&["subscribers"])?).await?;
            print_json(&res)
        }
        SubscribersCmd::Add { email } => {
            let email = EmailAddress::parse(&email)
                .map_err(|err| CliError::InvalidInput(err.message().to_string()))?;
            let req = ctx
                .build(Method::POST, &["subscribe"])?
                .json(&SubscribeRequest {
                    email: email.as_str().to_string(),
                });
            let res: SubscribeResponse = ctx.fetch(req).await?;
            print_json(&res)
        }
        SubscribersCmd::Remove { email } => {
            require("email", &email)?;
            let req = ctx.authorized(Method::DELETE, &["subscribers", email.trim()])?;
            ctx.execute(req).await?;
            print_status("removed")
        }
    }
}
