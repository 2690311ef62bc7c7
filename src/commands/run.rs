use std::io::Write;

use serde::Serialize;
use serde_json::Value;

use super::Ctx;
use crate::args::coerce_all;
use crate::cli::RunArgs;
use crate::client::RequestSpec;
use crate::error::Result;
use crate::render;
use crate::target::ValId;

#[derive(Debug, Serialize)]
pub struct RunPayload {
    pub args: Vec<Value>,
}

pub async fn handle<W: Write>(ctx: &Ctx, args: RunArgs, out: &mut W) -> Result<()> {
    let val: ValId = args.val.parse()?;
    let payload = RunPayload {
        args: coerce_all(&args.args),
    };

    let spec = RequestSpec::post_json(ctx.api.run_url(&val)?, &payload)?;
    let body = ctx.client.execute(spec).await?;
    render::render(out, &body)
}
