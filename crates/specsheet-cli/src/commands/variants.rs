use specsheet_core::error::SpecSheetError;
use specsheet_core::registry::VARIANTS;

pub fn list() -> Result<(), SpecSheetError> {
    println!("Supported document variants:\n");
    for variant in VARIANTS {
        let pages = match variant.expected_pages() {
            Some(n) => format!(" [{n} pages]"),
            None => String::new(),
        };
        println!("  {:<18} {}{}", variant.key(), variant.description(), pages);
        println!("  {:<18} file:   {}", "", variant.source_filename());
        println!("  {:<18} output: {}", "", variant.output_filename());
        println!();
    }
    Ok(())
}
