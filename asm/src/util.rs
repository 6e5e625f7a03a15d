use crate::assembler::Assembly;
use crate::pass2::Object;
use crate::record::Intermediate;
use color_print::cformat;

const ARROW: &str = "      ->      ";

/// `record -> object` per line, as written to the Pass-2 output file.
pub fn listing(records: &Intermediate, objects: &[Object]) -> String {
    records
        .iter()
        .zip(objects)
        .map(|(record, object)| format!("{}{}{}\n", record, ARROW, object))
        .collect()
}

pub fn print_listing(records: &Intermediate, objects: &[Object]) {
    let width = records
        .iter()
        .map(|record| record.to_string().len())
        .max()
        .unwrap_or(0);
    for (record, object) in records.iter().zip(objects) {
        let object = match object {
            Object::Code { .. } => cformat!("<g>{}</>", object),
            Object::Placeholder => cformat!("<dim>{}</>", object),
        };
        println!("  {:<width$}{}{}", record.to_string(), ARROW, object, width = width);
    }
}

pub fn print_tables(assembly: &Assembly) {
    println!("=== INTERMEDIATE CODE ===");
    for record in assembly.records() {
        println!("  {}", record);
    }

    println!("=== SYMBOL TABLE ===");
    for (idx, (name, addr)) in assembly.symbols().iter().enumerate() {
        println!("{}", cformat!("  <blue>{:>3}</> {:<12}<y>{}</>", idx + 1, name, addr));
    }

    println!("=== LITERAL TABLE ===");
    for (idx, (text, addr)) in assembly.literals().iter().enumerate() {
        println!("{}", cformat!("  <blue>{:>3}</> {:<12}<y>{}</>", idx + 1, text, addr));
    }
}
