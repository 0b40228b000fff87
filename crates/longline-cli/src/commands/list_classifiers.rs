//! List classifiers command implementation.

use longline_rules::all_classifiers;

/// Runs the list-classifiers command.
pub fn run() {
    println!("Available classifiers:\n");
    println!("{:<8} {:<20} Description", "Code", "Name");
    println!("{}", "-".repeat(80));

    for classifier in all_classifiers() {
        println!(
            "{:<8} {:<20} {}",
            classifier.code(),
            classifier.name(),
            classifier.description()
        );
    }

    println!("\nPresets:");
    println!("  recommended    - LL001, LL002, LL003, LL004 (default)");
    println!("  comments-only  - LL001 only (for gradual adoption)");

    println!("\nUse --classifiers to filter, e.g.:");
    println!("  longline check --classifiers long-comment,extract-variable");
    println!("  longline check --classifiers LL001,LL004");
}
