//! `ideadeps resolve`: print every dependency with its scope.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::{CliConfig, OutputFormat};
use crate::core::IdeaScope;
use crate::models::{IdeDependency, ResolvedDependencies};
use crate::resolver::DependenciesProvider;

#[derive(Args, Debug)]
pub struct ResolveCommand {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Only show dependencies with this scope (PROVIDED, COMPILE, TEST, RUNTIME)
    #[arg(short, long)]
    scope: Option<IdeaScope>,
}

impl ResolveCommand {
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let project = config.load_project()?;
        let extractor = project.extractor();
        let provider = DependenciesProvider::new(&project.registry, &extractor);

        let mut resolved = provider.provide(&project.module)?;
        if let Some(scope) = self.scope {
            resolved = resolved.filter_scope(scope);
        }

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&resolved)?),
            OutputFormat::Text => print!("{}", render_text(&project.module.name, &resolved)),
        }
        Ok(())
    }
}

/// Text report: one block per scope, modules first as written by the resolver.
pub(crate) fn render_text(module: &str, resolved: &ResolvedDependencies) -> String {
    let mut out = String::new();
    if resolved.is_empty() {
        out.push_str(&format!("No dependencies resolved for {module}\n"));
        return out;
    }

    for (scope, deps) in resolved.by_scope() {
        out.push_str(&format!("{}:\n", scope.label().cyan().bold()));
        for dep in deps {
            let line = match &dep.dependency {
                IdeDependency::Module { name } => format!("module {name}"),
                IdeDependency::Library(library) => {
                    let mut line = match &library.module_version {
                        Some(id) => format!("{id} ({})", library.class_path.path),
                        None => library.class_path.path.clone(),
                    };
                    if !library.sources.is_empty() {
                        line.push_str(" +sources");
                    }
                    if !library.javadoc.is_empty() {
                        line.push_str(" +javadoc");
                    }
                    line
                }
            };
            out.push_str(&format!("  {line}\n"));
        }
    }
    out.push_str(&format!("{}: {} dependencies\n", "Total".green().bold(), resolved.len()));
    out
}
