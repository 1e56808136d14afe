//! `dockyard embed` command

use std::sync::Arc;

use anyhow::Result;

use crate::cli::EmbedArgs;
use dockyard::ops::embed::{embed, EmbedEnvironment};
use dockyard::util::shell::{Shell, Status};

pub fn execute(args: EmbedArgs, shell: &Arc<Shell>) -> Result<()> {
    let env = EmbedEnvironment::from_env()?;
    let destination = embed(&args.path, &env)?;
    shell.status(Status::Embedded, destination.display());
    Ok(())
}
