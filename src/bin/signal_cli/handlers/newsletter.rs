#![deny(clippy::all, clippy::pedantic)]

use reqwest::Method;
use signal_api_types::{NewsletterRequest, NewsletterResponse};

use crate::args::NewsletterCmd;
use crate::client::{CliError, Ctx};
use crate::io::{read_value, require};
use crate::print::print_json;

pub async fn handle(ctx: &Ctx, cmd: NewsletterCmd) -> Result<(), CliError> {
    match cmd {
        NewsletterCmd::Send {
            subject,
            message,
            message_file,
        } => {
            let body = NewsletterRequest {
                subject,
                message: read_value(message, message_file)?,
            };
            require("subject", &body.subject)?;
            require("message", &body.message)?;

            let req = ctx
                .authorized(Method::POST, &["newsletter", "send"])?
                .json(&body);
            let res: NewsletterResponse = ctx.fetch(req).await?;
            print_json(&res)
        }
    }
}
