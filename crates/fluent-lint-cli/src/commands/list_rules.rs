//! List rules command implementation.

use fluent_lint_core::RuleId;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<6} {:<32} Description", "Code", "Name");
    println!("{}", "-".repeat(100));

    for rule in RuleId::ALL {
        println!(
            "{:<6} {:<32} {}",
            rule.code(),
            rule.name(),
            rule.description()
        );
    }

    println!("\nRules are off unless enabled in config.yml (see `fluent-lint init`).");
    println!("Use --rules to report only some of the enabled rules, e.g.:");
    println!("  fluent-lint check --rules ID01,TE05");
    println!("  fluent-lint check --rules three-dot-ellipsis");
}
