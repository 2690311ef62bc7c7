use std::io::Write;

use serde::Serialize;
use serde_json::Value;

use super::Ctx;
use crate::args::coerce_all;
use crate::cli::EvalArgs;
use crate::client::RequestSpec;
use crate::error::{Error, Result};
use crate::input::Input;
use crate::render;

#[derive(Debug, Serialize)]
pub struct EvalPayload {
    pub code: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<Value>,
}

/// The expression comes from the argument if given, otherwise from piped stdin.
/// An explicit argument is sent as is, even when empty; blank stdin is not
/// an expression.
fn read_expression<I: Input>(expression: Option<String>, input: &mut I) -> Result<String> {
    if let Some(expression) = expression {
        return Ok(expression);
    }

    let bytes = input.piped()?.ok_or(Error::ExpressionRequired)?;
    let code = String::from_utf8_lossy(&bytes).into_owned();
    if code.trim().is_empty() {
        return Err(Error::ExpressionRequired);
    }
    Ok(code)
}

pub async fn handle<I, W>(ctx: &Ctx, args: EvalArgs, input: &mut I, out: &mut W) -> Result<()>
where
    I: Input,
    W: Write,
{
    let payload = EvalPayload {
        code: read_expression(args.expression, input)?,
        args: coerce_all(&args.args),
    };

    let spec = RequestSpec::post_json(ctx.api.eval_url()?, &payload)?;
    let body = ctx.client.execute(spec).await?;
    render::render(out, &body)
}
