use std::io::Write;

use super::Ctx;
use crate::cli::ApiArgs;
use crate::client::RequestSpec;
use crate::error::Result;
use crate::input::Input;
use crate::render;
use crate::target::Method;

/// `--data` value that reads the body from stdin, even from a terminal.
const DATA_FROM_STDIN: &str = "@-";

/// Sends an arbitrary request to the API. The body is `--data` when given,
/// otherwise whatever is piped on stdin.
pub async fn handle<I, W>(ctx: &Ctx, args: ApiArgs, input: &mut I, out: &mut W) -> Result<()>
where
    I: Input,
    W: Write,
{
    let body = match args.data {
        Some(data) if data == DATA_FROM_STDIN => input.read_all()?,
        Some(data) => data.into_bytes(),
        None => input.piped()?.unwrap_or_default(),
    };

    let method = Method::infer(args.method, &body);
    let url = ctx.api.resolve(&args.endpoint)?;
    let mut spec = RequestSpec::new(method, url, Some(body))?;
    for header in &args.headers {
        spec = spec.header(header)?;
    }

    let body = ctx.client.execute(spec).await?;
    render::render(out, &body)
}
