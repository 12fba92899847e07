//! List commands implementation

use crate::programmers;

/// List all supported programmers
pub fn list_programmers() {
    let programmers = programmers::available_programmers();

    println!("Supported programmers:");
    println!();
    if programmers.is_empty() {
        println!("  (none, recompile with programmer features enabled)");
    }
    for p in &programmers {
        println!("  {:<10} - {}", p.name, p.description);
        if !p.aliases.is_empty() {
            println!("  {:<10}   aliases: {}", "", p.aliases.join(", "));
        }
    }
    println!();
    println!("Supported chips:");
    println!();
    for family in [spirtc_core::ChipFamily::Ds1391, spirtc_core::ChipFamily::Max6902] {
        let (min, max) = family.year_range();
        println!("  {:<10} - years {}-{}", family.name(), min, max);
    }
}
