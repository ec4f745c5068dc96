use anyhow::Result;
use log::info;

use crate::{cli::PreviewArgs, table};

pub fn execute(args: &PreviewArgs) -> Result<()> {
    let import = crate::load_source(&args.source)?;
    let shown = import.rows().len().min(args.rows);
    println!("table:       {}", import.table_name());
    println!("schema:      {}", import.schema());
    println!("fingerprint: {}", import.fingerprint());
    println!();
    print!("{}", table::render_rows(import.schema(), &import.rows()[..shown]));
    info!(
        "Displayed {} of {} row(s) from {:?}",
        shown,
        import.rows().len(),
        args.source.input
    );
    Ok(())
}
