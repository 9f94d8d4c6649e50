//! Product code generation command.

use anyhow::{Context as _, Result};
use catalog_client::CatalogApi;

use crate::context::Context;

/// Print the next product code.
pub async fn run(ctx: &Context) -> Result<()> {
    let generated = ctx
        .api()
        .generate_code()
        .await
        .context("Failed to generate product code")?;

    if ctx.output.is_json() {
        ctx.output.json(&generated);
    } else {
        println!("{}", generated.code);
    }
    Ok(())
}
