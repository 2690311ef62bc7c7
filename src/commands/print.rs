use std::io::Write;

use serde::Deserialize;

use super::Ctx;
use crate::client::RequestSpec;
use crate::error::{Error, Result};
use crate::render;
use crate::target::ValId;
use crate::token::Credential;

#[derive(Debug, Deserialize)]
struct AliasResponse {
    code: String,
}

/// Prints the resolved token, or an empty line when anonymous.
pub fn token<W: Write>(ctx: &Ctx, out: &mut W) -> Result<()> {
    let token = ctx.client.credential().map(Credential::as_str).unwrap_or_default();
    writeln!(out, "{token}").map_err(Error::Output)
}

/// Prints the source code of a val.
pub async fn val<W: Write>(ctx: &Ctx, val: &str, out: &mut W) -> Result<()> {
    let val: ValId = val.parse()?;
    let body = ctx
        .client
        .execute(RequestSpec::get(ctx.api.alias_url(&val)?))
        .await?;

    let Some(value) = render::decode(&body)? else {
        return Ok(());
    };
    let alias: AliasResponse = serde_json::from_value(value)?;
    writeln!(out, "{}", alias.code).map_err(Error::Output)
}
