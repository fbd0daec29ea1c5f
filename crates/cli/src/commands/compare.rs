use clap::Args;
use savora_core::config::ConfigOverrides;
use savora_core::ApplicationError;

use crate::commands::{finish, load_cookbook, CommandResult};

#[derive(Args, Clone, Debug, Default)]
pub struct CompareArgs {
    #[arg(required = true, num_args = 2.., help = "Two or more recipe names")]
    pub names: Vec<String>,
}

pub fn run(args: &CompareArgs) -> CommandResult {
    finish("compare", execute(args))
}

fn execute(args: &CompareArgs) -> Result<CommandResult, ApplicationError> {
    let cookbook = load_cookbook(ConfigOverrides::default())?;

    let comparison = cookbook.compare(&args.names)?;
    let message = format!("compared {} recipes", comparison.recipes.len());
    Ok(CommandResult::success_with_data("compare", message, comparison))
}
