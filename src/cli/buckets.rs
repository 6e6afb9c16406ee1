//! `ideadeps buckets`: show the effective bucket rules of each scope.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use indexmap::IndexSet;

use super::CliConfig;
use crate::models::BucketId;
use crate::registry::BucketRegistry;
use crate::resolver::{DependenciesProvider, ScopeRules};

#[derive(Args, Debug)]
pub struct BucketsCommand {}

impl BucketsCommand {
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let project = config.load_project()?;
        let extractor = project.extractor();
        let provider = DependenciesProvider::new(&project.registry, &extractor);
        let rules = provider.effective_rules(&project.module);

        print!("{}", render_text(&project.registry, &rules));
        Ok(())
    }
}

fn render_text<R: BucketRegistry + ?Sized>(registry: &R, rules: &ScopeRules) -> String {
    let names = |ids: &IndexSet<BucketId>| -> String {
        let names: Vec<&str> = ids
            .iter()
            .filter_map(|id| registry.bucket(*id))
            .map(|bucket| bucket.name.as_str())
            .collect();
        if names.is_empty() { "-".to_string() } else { names.join(", ") }
    };

    let mut out = String::new();
    for (scope, rule) in rules.primitives() {
        out.push_str(&format!(
            "{}: plus [{}] minus [{}]\n",
            scope.name().cyan().bold(),
            names(&rule.plus),
            names(&rule.minus)
        ));
    }
    out
}
