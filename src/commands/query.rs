use std::io::Write;

use serde::Serialize;

use super::Ctx;
use crate::client::RequestSpec;
use crate::error::Result;
use crate::render;

#[derive(Debug, Serialize)]
pub struct QueryPayload<'a> {
    pub statement: &'a str,
}

/// Executes one SQLite statement against the user's database and prints the
/// result set as JSON.
pub async fn handle<W: Write>(ctx: &Ctx, statement: &str, out: &mut W) -> Result<()> {
    let url = ctx.api.endpoint(&["sqlite", "execute"])?;
    let spec = RequestSpec::post_json(url, &QueryPayload { statement })?;
    let body = ctx.client.execute(spec).await?;
    render::render(out, &body)
}
