use specsheet_core::error::SpecSheetError;
use specsheet_core::schema::Field;

pub fn print() -> Result<(), SpecSheetError> {
    let width = Field::ALL.iter().map(|f| f.name().len()).max().unwrap_or(20);

    println!("Canonical record fields, in column order:\n");
    println!("  {:<width$}  Default", "Field");
    println!("  {}", "-".repeat(width + 10));
    for field in Field::ALL {
        let default = match field.default_value() {
            "" => "(empty)",
            v => v,
        };
        println!("  {:<width$}  {}", field.name(), default);
    }
    println!();
    println!("Facility flags take \"Y\" or \"N\". Manufacturer, website, product URL");
    println!("and specification sheet are stamped from the variant that read the sheet.");
    Ok(())
}
