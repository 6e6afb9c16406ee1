//! `ideadeps unresolved`: print artifacts that failed to resolve.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::{CliConfig, OutputFormat};
use crate::models::UnresolvedDependency;
use crate::resolver::DependenciesProvider;

#[derive(Args, Debug)]
pub struct UnresolvedCommand {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

impl UnresolvedCommand {
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let project = config.load_project()?;
        let extractor = project.extractor();
        let provider = DependenciesProvider::new(&project.registry, &extractor);
        let unresolved = provider.unresolved_dependencies(&project.module)?;

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&unresolved)?),
            OutputFormat::Text => print!("{}", render_text(&unresolved)),
        }
        Ok(())
    }
}

fn render_text(unresolved: &[UnresolvedDependency]) -> String {
    if unresolved.is_empty() {
        return format!("{}\n", "All artifacts resolved".green());
    }
    let mut out = String::new();
    for dependency in unresolved {
        out.push_str(&format!(
            "{} {}\n",
            dependency.display_name().red().bold(),
            format!("({})", dependency.problem).bright_black()
        ));
    }
    out
}
