//! Family listing command.

use anyhow::Result;
use catalog_core::catalog::filter_families;

use super::{load_families, FamiliesArgs};
use crate::context::Context;

/// Run the families command.
pub async fn run(args: FamiliesArgs, ctx: &Context) -> Result<()> {
    let families = load_families(&ctx.api()).await?;
    let shown = filter_families(&families, args.filter.as_deref().unwrap_or(""));

    if ctx.output.is_json() {
        ctx.output.json(&shown);
        return Ok(());
    }

    ctx.output.header("Families");
    if shown.is_empty() {
        ctx.output.info("No families found.");
        return Ok(());
    }
    let widths = [6, 0];
    ctx.output.table_row(&["ID", "NAME"], &widths);
    for family in shown {
        ctx.output
            .table_row(&[&family.id.to_string(), &family.name], &widths);
    }
    Ok(())
}
