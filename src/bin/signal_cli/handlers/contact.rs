#![deny(clippy::all, clippy::pedantic)]

use reqwest::Method;
use signal_api_types::{ContactRequest, MessageResponse};

use crate::args::ContactCmd;
use crate::client::{CliError, Ctx};
use crate::io::{read_value, require};
use crate::print::print_json;

pub async fn handle(ctx: &Ctx, cmd: ContactCmd) -> Result<(), CliError> {
    match cmd {
        ContactCmd::Send {
            name,
            email,
            message,
            message_file,
        } => {
            let body = ContactRequest {
                name,
                email,
                message: read_value(message, message_file)?,
            };
            require("name", &body.name)?;
            require("email", &body.email)?;
            require("message", &body.message)?;

            let req = ctx.build(Method::POST, &["api", "contact"])?.json(&body);
            let res: MessageResponse = ctx.fetch(req).await?;
            print_json(&res)
        }
    }
}
