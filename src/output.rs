//! Renders the usage manual, the error block and the verbose trace.

use crate::{
    diagnostics::Diagnostics,
    registry::{OutputMap, Parameter, Registry},
};

const INDENT: &str = "    ";

/// Alias of the built-in flag that turns on errors and the trace
pub const VERBOSE: &str = "v";
/// Alias of the built-in flag that forces the manual
pub const HELP: &str = "h";

/// Everything the formatter reads after a validation pass.
pub struct Report<'a> {
    pub program: &'a str,
    pub description: &'a str,
    pub registry: &'a Registry,
    pub out: &'a OutputMap,
    pub diagnostics: &'a Diagnostics,
    /// Emit a one-line count when validation fails quietly
    pub failure_summary: bool,
}

impl Report<'_> {
    fn flag(&self, alias: &str) -> bool {
        self.out.flag(alias).unwrap_or(false)
    }

    /// Picks the blocks to show. Each condition is independent, so a failed
    /// verbose run shows errors, manual and trace together.
    pub fn render(&self) -> String {
        let verbose = self.flag(VERBOSE);
        let failed = !self.diagnostics.is_empty();
        let mut text = String::new();
        if failed && verbose {
            text.push_str(&errors(self.diagnostics));
        }
        if self.flag(HELP) || (failed && verbose) {
            text.push_str(&manual(self.program, self.description, self.registry));
        }
        if verbose {
            text.push_str(&trace(self.out));
        }
        if failed && !verbose && self.failure_summary {
            text.push_str(&summary(self.program, self.diagnostics));
        }
        text
    }
}

fn option_entry(text: &mut String, param: &Parameter) {
    text.push_str(&format!("{INDENT}{}", param.alias_list()));
    if param.mandatory {
        text.push_str(" [REQ]");
    }
    text.push_str(&format!("\n{INDENT}{INDENT}{}\n\n", param.description));
}

/// Mandatory parameters first, then optional ones, each group in
/// registration order.
pub fn manual(program: &str, description: &str, registry: &Registry) -> String {
    let mut text = String::new();
    text.push_str(&format!("NAME\n{INDENT}{program}\n\n"));
    text.push_str(&format!("DESCRIPTION\n{INDENT}{description}\n\n"));
    text.push_str("OPTIONS\n");
    let (mandatory, optional): (Vec<&Parameter>, Vec<&Parameter>) =
        registry.iter().partition(|param| param.mandatory);
    for param in mandatory.into_iter().chain(optional) {
        option_entry(&mut text, param);
    }
    text
}

pub fn errors(diagnostics: &Diagnostics) -> String {
    let mut text = String::from("ERRORS\n");
    for diagnostic in diagnostics {
        text.push_str(&format!("{INDENT}{diagnostic}\n"));
    }
    text.push('\n');
    text
}

pub fn trace(out: &OutputMap) -> String {
    let mut text = String::from("ARGUMENTS\n");
    for (alias, value) in out.iter() {
        text.push_str(&format!("{INDENT}[ {alias} ] {{{value}}}\n"));
    }
    text.push('\n');
    text
}

fn summary(program: &str, diagnostics: &Diagnostics) -> String {
    format!(
        "{program}: {} argument error(s), rerun with --verbose for details\n",
        diagnostics.len()
    )
}
